// Application Layer - Use Cases

pub mod constants;
pub mod executor;

// Re-exports
pub use executor::LlamaExecutor;
