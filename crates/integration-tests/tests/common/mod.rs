#![allow(dead_code)]

//! Shared fixtures: fake llama.cpp binaries written as shell scripts

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Prints every argument on its own line, then exits 0
pub const ECHO_ARGS: &str = r#"for a in "$@"; do printf '%s\n' "$a"; done"#;

/// A temp directory holding a fake `llama-run` and a model file
pub struct FakeInstall {
    pub dir: TempDir,
    pub exe: PathBuf,
    pub model: PathBuf,
}

impl FakeInstall {
    /// `llama-run` runs `body` under /bin/sh
    pub fn new(body: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let exe = write_script(dir.path(), "llama-run", body);
        let model = dir.path().join("mistral-7b-instruct.Q4_K_M.gguf");
        fs::write(&model, b"GGUF").unwrap();
        Self { dir, exe, model }
    }

    /// Add a sibling `llama-tokenize` running `body`
    pub fn with_tokenizer(self, body: &str) -> Self {
        write_script(self.dir.path(), "llama-tokenize", body);
        self
    }
}

/// Write an executable script without this process ever opening it
///
/// A write handle held here can leak into a child forked by a parallel
/// test, and exec of the script then fails with ETXTBSY. `sh` writes and
/// chmods the file instead; only the stdin pipe is held in-process.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let mut child = Command::new("sh")
        .arg("-c")
        .arg(r#"cat > "$1" && chmod 755 "$1""#)
        .arg("sh")
        .arg(&path)
        .stdin(Stdio::piped())
        .spawn()
        .unwrap();

    let mut stdin = child.stdin.take().unwrap();
    stdin
        .write_all(format!("#!/bin/sh\n{}\n", body).as_bytes())
        .unwrap();
    drop(stdin);

    assert!(child.wait().unwrap().success(), "failed to write {}", path.display());
    path
}
