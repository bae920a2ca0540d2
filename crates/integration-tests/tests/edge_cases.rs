//! Edge cases: prompt passthrough, timeouts, missing tokenizer
#![cfg(unix)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FakeInstall, ECHO_ARGS};
use llamaexec_core::port::ExecutionError;
use llamaexec_core::{InvocationRequest, InvokerConfig, InvokerError, LlamaExecutor};
use llamaexec_infra_system::SubprocessRunner;

fn executor_with(config: InvokerConfig) -> LlamaExecutor {
    LlamaExecutor::new(config, Arc::new(SubprocessRunner::default()))
}

#[tokio::test]
async fn test_prompt_with_shell_metacharacters_is_one_argument() {
    let install = FakeInstall::new(ECHO_ARGS);
    let config = InvokerConfig::new(&install.exe, &install.model).unwrap();
    let prompt = r#"say "hi"; echo $HOME && exit 1"#;

    let output = executor_with(config).infer(prompt).await.unwrap();

    assert!(output.contains(&format!("-p\n{}\n-n", prompt)));
}

#[tokio::test]
async fn test_empty_prompt_and_negative_limit_pass_through() {
    let install = FakeInstall::new(ECHO_ARGS);
    let config = InvokerConfig::new(&install.exe, &install.model).unwrap();

    let output = executor_with(config)
        .infer(InvocationRequest::new("").with_predict_limit(-1))
        .await
        .unwrap();

    assert!(output.ends_with("-p\n\n-n\n-1\n"));
}

#[tokio::test]
async fn test_exit_zero_with_stderr_noise_is_success() {
    let install = FakeInstall::new(r#"echo 'warning: slow' >&2; printf 'ok'"#);
    let config = InvokerConfig::new(&install.exe, &install.model).unwrap();

    assert_eq!(executor_with(config).infer("x").await.unwrap(), "ok");
}

#[tokio::test]
async fn test_hung_child_times_out_when_configured() {
    let install = FakeInstall::new("sleep 10");
    let config = InvokerConfig::new(&install.exe, &install.model)
        .unwrap()
        .with_timeout(Duration::from_millis(200));

    let err = executor_with(config).infer("x").await.unwrap_err();

    assert!(matches!(
        err,
        InvokerError::Execution(ExecutionError::Timeout(200))
    ));
}

#[tokio::test]
async fn test_missing_tokenizer_is_spawn_error() {
    let install = FakeInstall::new(ECHO_ARGS);
    let config = InvokerConfig::new(&install.exe, &install.model).unwrap();

    let err = executor_with(config).tokenize("x").await.unwrap_err();

    assert!(matches!(
        err,
        InvokerError::Execution(ExecutionError::SpawnFailed(_))
    ));
}

#[tokio::test]
async fn test_non_executable_file_fails_to_spawn() {
    // Exists (so construction passes) but has no execute bit
    let install = FakeInstall::new(ECHO_ARGS);
    let plain = install.dir.path().join("llama-run.txt");
    std::fs::write(&plain, "not a program").unwrap();
    let config = InvokerConfig::new(&plain, &install.model).unwrap();

    let err = executor_with(config).infer("x").await.unwrap_err();

    assert!(!err.is_missing_resource());
    assert!(matches!(
        err,
        InvokerError::Execution(ExecutionError::SpawnFailed(_))
    ));
}

#[tokio::test]
async fn test_non_utf8_model_path_reaches_child_unchanged() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    // Succeeds only if the exact bytes of argument 2 name an existing file
    let install = FakeInstall::new(r#"test -e "$2" && printf found || exit 3"#);
    let model = install
        .dir
        .path()
        .join(OsStr::from_bytes(b"m\xffodel.gguf"));
    std::fs::write(&model, b"GGUF").unwrap();
    let config = InvokerConfig::new(&install.exe, &model).unwrap();

    let output = executor_with(config).infer("x").await.unwrap();

    assert_eq!(output, "found");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_parallel_fake_installs_spawn_cleanly() {
    // Many threads writing and exec'ing fresh scripts at once
    let handles: Vec<_> = (0..32)
        .map(|i| {
            tokio::spawn(async move {
                let install = FakeInstall::new(&format!("printf run-{}", i));
                let config = InvokerConfig::new(&install.exe, &install.model).unwrap();
                let result = executor_with(config).infer("x").await;
                result
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let output = handle.await.unwrap().unwrap();
        assert_eq!(output, format!("run-{}", i));
    }
}
