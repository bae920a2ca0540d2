// Subprocess runner implementation
// reason: tokio for async process management, kill_on_drop reaps timed-out children
use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::info;

use llamaexec_core::port::time_provider::SystemTimeProvider;
use llamaexec_core::port::{CommandSpec, ExecutionError, ProcessOutput, ProcessRunner, TimeProvider};

/// Subprocess runner
///
/// Spawns the command with stdin closed and stdout/stderr captured, then
/// waits for it to exit. The child inherits the parent's environment and
/// working directory.
pub struct SubprocessRunner {
    time_provider: Arc<dyn TimeProvider>,
}

impl SubprocessRunner {
    /// Create a new subprocess runner
    ///
    /// # Arguments
    /// * `time_provider` - Time provider for duration tracking
    pub fn new(time_provider: Arc<dyn TimeProvider>) -> Self {
        Self { time_provider }
    }

    /// Spawn child process and wait for output
    async fn spawn_and_wait(
        &self,
        command: &CommandSpec,
    ) -> Result<std::process::Output, ExecutionError> {
        let child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ExecutionError::SpawnFailed(format!("{}: {}", command.program.display(), e))
            })?;

        match command.timeout {
            Some(limit) => match timeout(limit, child.wait_with_output()).await {
                Ok(Ok(output)) => Ok(output),
                Ok(Err(e)) => Err(ExecutionError::IoError(e.to_string())),
                // The child future is dropped here, which kills it
                Err(_) => Err(ExecutionError::Timeout(timeout_millis(limit))),
            },
            None => child
                .wait_with_output()
                .await
                .map_err(|e| ExecutionError::IoError(e.to_string())),
        }
    }

    /// Build process output from the raw std output
    fn build_output(output: std::process::Output, duration_ms: i64) -> ProcessOutput {
        ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            duration_ms,
        }
    }
}

/// Timeout in whole milliseconds, saturating at `i64::MAX`
fn timeout_millis(limit: Duration) -> i64 {
    i64::try_from(limit.as_millis()).unwrap_or(i64::MAX)
}

impl Default for SubprocessRunner {
    fn default() -> Self {
        Self::new(Arc::new(SystemTimeProvider))
    }
}

#[async_trait]
impl ProcessRunner for SubprocessRunner {
    async fn run(&self, command: &CommandSpec) -> Result<ProcessOutput, ExecutionError> {
        let start_time = self.time_provider.now_millis();

        // Prompt text stays out of the logs
        info!(
            program = %command.program.display(),
            arg_count = command.args.len(),
            timeout_ms = ?command.timeout.map(|t| t.as_millis()),
            "Starting subprocess"
        );

        let output = self.spawn_and_wait(command).await?;
        let duration_ms = self.time_provider.elapsed_since(start_time);
        let result = Self::build_output(output, duration_ms);

        info!(
            program = %command.program.display(),
            duration_ms = %duration_ms,
            exit_code = ?result.exit_code,
            "Subprocess completed"
        );

        Ok(result)
    }
}
