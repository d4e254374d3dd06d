//! Remote git repository source.
//!
//! Clones a repository into a temporary directory so it can be scanned
//! like a local project. The clone is shallow and lives only as long as
//! the returned [`TempDir`]; dropping it removes the checkout.

use anyhow::{bail, Context, Result};
use std::process::Command;
use tempfile::TempDir;

/// Shallow-clone `url` into a fresh temporary directory.
///
/// Requires the `git` binary on PATH.
pub fn clone_repo(url: &str) -> Result<TempDir> {
    let temp_dir = TempDir::new().with_context(|| "Failed to create temporary clone directory")?;

    let output = Command::new("git")
        .args(["clone", "--depth", "1"])
        .arg(url)
        .arg(temp_dir.path())
        .output()
        .with_context(|| "Failed to execute 'git clone'. Is git installed?")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("git clone failed for {}: {}", url, stderr.trim());
    }

    Ok(temp_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_invalid_url_fails() {
        // A path that is certainly not a repository.
        let result = clone_repo("/definitely/not/a/repo");
        assert!(result.is_err());
    }

    #[test]
    fn test_clone_local_repo() {
        // Build a tiny local repository and clone it by path.
        let origin = TempDir::new().unwrap();
        let run = |args: &[&str]| {
            Command::new("git")
                .args(args)
                .current_dir(origin.path())
                .env("GIT_AUTHOR_NAME", "test")
                .env("GIT_AUTHOR_EMAIL", "test@example.com")
                .env("GIT_COMMITTER_NAME", "test")
                .env("GIT_COMMITTER_EMAIL", "test@example.com")
                .output()
                .unwrap()
        };
        assert!(run(&["init", "-b", "main"]).status.success());
        std::fs::write(origin.path().join("main.py"), "def f():\n    pass\n").unwrap();
        assert!(run(&["add", "."]).status.success());
        assert!(run(&["commit", "-m", "init"]).status.success());

        let clone = clone_repo(origin.path().to_str().unwrap()).unwrap();
        assert!(clone.path().join("main.py").exists());
    }
}
