//! Timestamped backups taken before a file is rewritten.
mod guard;

pub use guard::BackupGuard;

use std::path::PathBuf;
use thiserror::Error;

/// Backup lifecycle errors
#[derive(Error, Debug)]
pub enum BackupError {
    #[error("Could not create backup file {}: {source}", .path.display())]
    Create { path: PathBuf, source: std::io::Error },

    #[error("Could not copy file content to {}: {source}", .path.display())]
    Copy { path: PathBuf, source: std::io::Error },

    #[error("Failed to reset {} after copy: {source}", .path.display())]
    Rewind { path: PathBuf, source: std::io::Error },

    #[error("Error deleting backup {}: {source}", .path.display())]
    Remove { path: PathBuf, source: std::io::Error },
}

impl BackupError {
    /// The file the failed operation was acting on.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Create { path, .. }
            | Self::Copy { path, .. }
            | Self::Rewind { path, .. }
            | Self::Remove { path, .. } => path,
        }
    }
}

#[cfg(test)]
#[path = "backup_tests.rs"]
mod tests;
