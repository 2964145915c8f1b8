//! Common test utilities

use envtag::{RetagOptions, RewriteRequest};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write `content` to `.env` inside `dir` and return its path
pub fn write_env_file(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join(".env");
    fs::write(&path, content).expect("Failed to write env file");
    path
}

/// Options targeting `path` with everything else at its default
pub fn options_for(path: &Path) -> RetagOptions {
    RetagOptions {
        path: path.to_path_buf(),
        ..Default::default()
    }
}

pub fn request(key: &str, tag: &str) -> RewriteRequest {
    RewriteRequest::new(key, tag).expect("Request should be valid")
}

/// Backup files created next to `.env` in `dir`
pub fn backups_in(dir: &Path) -> Vec<PathBuf> {
    let mut backups: Vec<PathBuf> = fs::read_dir(dir)
        .expect("Failed to read temp directory")
        .map(|entry| entry.expect("Failed to read entry").path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(".env_bkp_"))
        })
        .collect();
    backups.sort();
    backups
}
