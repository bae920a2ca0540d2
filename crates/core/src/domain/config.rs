// Invoker Configuration (validated paths)

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::constants::TOKENIZER_BINARY_NAME;
use crate::error::{InvokerError, Result};

/// Validated executable and model locations
///
/// Both paths are checked for existence once, at construction. There are no
/// setters for the paths, so a constructed config always points at entries
/// that existed when it was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokerConfig {
    executable: PathBuf,
    model: PathBuf,
    timeout: Option<Duration>,
}

impl InvokerConfig {
    /// Validate and store the executable and model paths
    ///
    /// # Errors
    /// - `InvokerError::ExecutableNotFound` if `executable` does not exist (checked first)
    /// - `InvokerError::ModelNotFound` if `model` does not exist
    pub fn new(executable: impl Into<PathBuf>, model: impl Into<PathBuf>) -> Result<Self> {
        let executable = executable.into();
        let model = model.into();

        if !executable.exists() {
            return Err(InvokerError::ExecutableNotFound(executable));
        }
        if !model.exists() {
            return Err(InvokerError::ModelNotFound(model));
        }

        Ok(Self {
            executable,
            model,
            timeout: None,
        })
    }

    /// Bound every invocation made with this config (unbounded by default)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn model(&self) -> &Path {
        &self.model
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Tokenizer binary that ships next to the inference executable
    ///
    /// A bare executable name (no parent component) resolves the tokenizer
    /// relative to the current directory.
    pub fn tokenizer_path(&self) -> PathBuf {
        let file_name = format!("{}{}", TOKENIZER_BINARY_NAME, std::env::consts::EXE_SUFFIX);
        match self.executable.parent() {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}
