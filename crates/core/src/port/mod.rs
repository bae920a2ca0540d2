// Port Layer - Interfaces for external dependencies

pub mod process_runner;
pub mod time_provider; // For duration tracking

// Re-exports
pub use process_runner::{CommandSpec, ExecutionError, ProcessOutput, ProcessRunner};
pub use time_provider::TimeProvider;
