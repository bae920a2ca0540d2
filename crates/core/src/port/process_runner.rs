// Process Runner Port
// Abstraction for running one external command to completion

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// A fully built child invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    /// Kept as OS strings so non-UTF-8 paths reach the child byte-for-byte
    pub args: Vec<OsString>,
    /// `None` waits for the child indefinitely
    pub timeout: Option<Duration>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full argument vector with the program in position 0
    pub fn argv(&self) -> Vec<OsString> {
        std::iter::once(self.program.clone().into_os_string())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

/// Captured result of a finished child process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the child was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: i64,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("Process timeout after {0}ms")]
    Timeout(i64),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Process Runner trait
///
/// Implementations:
/// - SubprocessRunner (infra-system): spawns a real child via tokio
/// - MockProcessRunner: scripted replies for unit tests
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run the command, wait for it to exit and return everything it printed
    ///
    /// A nonzero exit status is NOT an error at this layer; callers decide.
    ///
    /// # Errors
    /// - ExecutionError::SpawnFailed if the process cannot be started
    /// - ExecutionError::Timeout if `command.timeout` elapses first
    /// - ExecutionError::IoError if collecting output fails
    async fn run(&self, command: &CommandSpec) -> Result<ProcessOutput, ExecutionError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock runner behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Exit with the given code and output
        Exit {
            code: Option<i32>,
            stdout: String,
            stderr: String,
        },
        /// Fail to spawn with message
        SpawnFail(String),
        /// Time out after N ms
        Timeout(i64),
    }

    /// Mock Process Runner for testing
    ///
    /// Records every command it is asked to run.
    pub struct MockProcessRunner {
        behavior: Arc<Mutex<MockBehavior>>,
        calls: Arc<Mutex<Vec<CommandSpec>>>,
    }

    impl MockProcessRunner {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn new_exit(
            code: i32,
            stdout: impl Into<String>,
            stderr: impl Into<String>,
        ) -> Self {
            Self::new(MockBehavior::Exit {
                code: Some(code),
                stdout: stdout.into(),
                stderr: stderr.into(),
            })
        }

        pub fn new_success(stdout: impl Into<String>) -> Self {
            Self::new_exit(0, stdout, "")
        }

        pub fn new_spawn_fail(message: impl Into<String>) -> Self {
            Self::new(MockBehavior::SpawnFail(message.into()))
        }

        pub fn calls(&self) -> Vec<CommandSpec> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ProcessRunner for MockProcessRunner {
        async fn run(&self, command: &CommandSpec) -> Result<ProcessOutput, ExecutionError> {
            self.calls.lock().unwrap().push(command.clone());

            let behavior = self.behavior.lock().unwrap().clone();

            match behavior {
                MockBehavior::Exit {
                    code,
                    stdout,
                    stderr,
                } => Ok(ProcessOutput {
                    exit_code: code,
                    stdout,
                    stderr,
                    duration_ms: 1,
                }),
                MockBehavior::SpawnFail(msg) => Err(ExecutionError::SpawnFailed(msg)),
                MockBehavior::Timeout(ms) => Err(ExecutionError::Timeout(ms)),
            }
        }
    }
}
