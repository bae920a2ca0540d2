// Domain Layer - Validated configuration and request values

pub mod config;
pub mod request;

// Re-exports
pub use config::InvokerConfig;
pub use request::InvocationRequest;
