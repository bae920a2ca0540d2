// Central Error Type for the Executor

use std::path::PathBuf;
use thiserror::Error;

use crate::port::ExecutionError;

/// Executor-level error type
///
/// `ExecutableNotFound` and `ModelNotFound` are construction preconditions;
/// `ProcessFailed` is raised by `infer` when the child exits unsuccessfully.
#[derive(Error, Debug)]
pub enum InvokerError {
    #[error("Executable not found: {}", .0.display())]
    ExecutableNotFound(PathBuf),

    #[error("Model not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    #[error("Error running model: {stderr}")]
    ProcessFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),
}

impl InvokerError {
    /// True for the two path preconditions checked at construction
    pub fn is_missing_resource(&self) -> bool {
        matches!(
            self,
            InvokerError::ExecutableNotFound(_) | InvokerError::ModelNotFound(_)
        )
    }
}

/// Result type alias using InvokerError
pub type Result<T> = std::result::Result<T, InvokerError>;
