// llamaexec Core - Domain Types, Ports & Executor Service
// NO process spawning here: adapters live in infra-system

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::LlamaExecutor;
pub use domain::{InvocationRequest, InvokerConfig};
pub use error::{InvokerError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
