// Llama Executor - runs the inference and tokenizer binaries

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::application::constants::{MODEL_FLAG, PREDICT_FLAG, PROMPT_FLAG};
use crate::domain::{InvocationRequest, InvokerConfig};
use crate::error::{InvokerError, Result};
use crate::port::{CommandSpec, ProcessRunner};

/// Wraps an external llama.cpp executable
///
/// Holds an immutable, already-validated config. Each call spawns exactly one
/// child through the runner port and waits for it; nothing is retained
/// between calls.
pub struct LlamaExecutor {
    config: InvokerConfig,
    runner: Arc<dyn ProcessRunner>,
}

impl LlamaExecutor {
    /// Create an executor from a validated config
    ///
    /// # Example
    /// ```ignore
    /// let config = InvokerConfig::new("/opt/llama/llama-run", "/models/mistral.gguf")?;
    /// let executor = LlamaExecutor::new(config, Arc::new(SubprocessRunner::default()));
    /// ```
    pub fn new(config: InvokerConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Self { config, runner }
    }

    /// Validate both paths and build the executor in one step
    ///
    /// # Errors
    /// - `InvokerError::ExecutableNotFound` / `InvokerError::ModelNotFound`
    pub fn from_paths(
        executable: impl Into<PathBuf>,
        model: impl Into<PathBuf>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Result<Self> {
        let config = InvokerConfig::new(executable, model)?;
        Ok(Self::new(config, runner))
    }

    pub fn config(&self) -> &InvokerConfig {
        &self.config
    }

    /// `<exe> -m <model> -p <prompt> -n <predict_limit>`
    pub fn infer_command(&self, request: &InvocationRequest) -> CommandSpec {
        CommandSpec::new(
            self.config.executable(),
            [
                OsString::from(MODEL_FLAG),
                self.config.model().as_os_str().to_os_string(),
                OsString::from(PROMPT_FLAG),
                OsString::from(&request.prompt),
                OsString::from(PREDICT_FLAG),
                OsString::from(request.predict_limit.to_string()),
            ],
        )
        .with_timeout(self.config.timeout())
    }

    /// `<exe dir>/llama-tokenize -p <prompt>`
    pub fn tokenize_command(&self, prompt: &str) -> CommandSpec {
        CommandSpec::new(
            self.config.tokenizer_path(),
            [PROMPT_FLAG, prompt],
        )
        .with_timeout(self.config.timeout())
    }

    /// Run inference and return the child's stdout verbatim
    ///
    /// # Errors
    /// - `InvokerError::ProcessFailed` carrying stderr if the child exits nonzero
    /// - `InvokerError::Execution` if the child cannot be spawned or times out
    pub async fn infer(&self, request: impl Into<InvocationRequest>) -> Result<String> {
        let request = request.into();
        let command = self.infer_command(&request);

        info!(
            executable = %self.config.executable().display(),
            model = %self.config.model().display(),
            prompt_len = request.prompt.len(),
            predict_limit = request.predict_limit,
            "Running inference"
        );

        let output = self.runner.run(&command).await?;

        if !output.success() {
            warn!(
                exit_code = ?output.exit_code,
                duration_ms = output.duration_ms,
                "Inference process failed"
            );
            return Err(InvokerError::ProcessFailed {
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }

        debug!(
            stdout_len = output.stdout.len(),
            duration_ms = output.duration_ms,
            "Inference completed"
        );

        Ok(output.stdout)
    }

    /// Run the sibling tokenizer and return its stdout
    ///
    /// The exit status is not checked: a failing tokenizer yields whatever it
    /// printed (possibly nothing). Only a spawn/IO/timeout failure is an error,
    /// since then there is no output at all.
    pub async fn tokenize(&self, prompt: &str) -> Result<String> {
        let command = self.tokenize_command(prompt);

        info!(
            tokenizer = %command.program.display(),
            prompt_len = prompt.len(),
            "Running tokenizer"
        );

        let output = self.runner.run(&command).await?;

        if !output.success() {
            warn!(
                exit_code = ?output.exit_code,
                stderr = %output.stderr,
                "Tokenizer exited unsuccessfully; returning captured stdout"
            );
        }

        Ok(output.stdout)
    }
}
