//! llamaexec CLI - run a prompt through a local llama.cpp executable

mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use llamaexec_core::{InvocationRequest, InvokerConfig, LlamaExecutor};
use llamaexec_infra_system::SubprocessRunner;

const TIMEOUT_ENV: &str = "LLAMAEXEC_TIMEOUT_SECS";

#[derive(Parser, Debug)]
#[command(name = "llamaexec")]
#[command(about = "Run a prompt through a local llama.cpp executable", long_about = None)]
#[command(version)]
struct Cli {
    /// Prompt text passed to the model
    #[arg(long)]
    prompt: String,

    /// Path to the llama.cpp inference executable
    #[arg(long, env = "LLAMAEXEC_EXE")]
    exe: PathBuf,

    /// Path to the GGUF model file
    #[arg(long, env = "LLAMAEXEC_MODEL")]
    model: PathBuf,
}

/// Expand a leading `~` so paths from env files work unquoted
fn expand_path(raw: &Path) -> PathBuf {
    match raw.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        // Non-UTF-8 paths are used as given
        None => raw.to_path_buf(),
    }
}

/// Optional invocation timeout; `0` means none, unparseable values are ignored
fn timeout_from_env(value: Option<String>) -> Option<Duration> {
    let raw = value?;
    match raw.trim().parse::<u64>() {
        Ok(0) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(e) => {
            warn!(value = %raw, error = %e, "Ignoring invalid {}", TIMEOUT_ENV);
            None
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let exe = expand_path(&cli.exe);
    let model = expand_path(&cli.model);

    let mut config = InvokerConfig::new(exe, model)?;
    if let Some(limit) = timeout_from_env(std::env::var(TIMEOUT_ENV).ok()) {
        config = config.with_timeout(limit);
    }
    debug!(config = ?config, "Configuration resolved");

    let executor = LlamaExecutor::new(config, Arc::new(SubprocessRunner::default()));
    let output = executor
        .infer(InvocationRequest::new(cli.prompt))
        .await
        .context("Inference failed")?;

    println!("{}", output);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging() {
        eprintln!("{} {:#}", "warning:".yellow().bold(), e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
