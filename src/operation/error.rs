use crate::backup::BackupError;
use crate::rewrite::RewriteError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure of a single retag run.
///
/// A run that finds nothing to change is not an error; see
/// [`RetagOutcome::changed`](super::RetagOutcome::changed).
#[derive(Error, Debug)]
pub enum RetagError {
    #[error("Invalid arguments: {0}")]
    Usage(String),

    #[error("{context} {}: {source}", .path.display())]
    FileAccess {
        context: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unable to find the tag on line {line_number} (key '{key}')")]
    Format { line_number: usize, key: String },

    #[error(
        "Failed to write to file {}: {source}{}",
        .path.display(),
        backup_note(.backup.as_deref())
    )]
    Write {
        path: PathBuf,
        source: std::io::Error,
        /// Backup kept for recovery, if one was made.
        backup: Option<PathBuf>,
    },
}

fn backup_note(backup: Option<&Path>) -> String {
    backup.map_or_else(String::new, |path| {
        format!(" (original kept in {})", path.display())
    })
}

impl RetagError {
    pub(crate) fn file_access(
        context: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileAccess {
            context,
            path: path.into(),
            source,
        }
    }
}

impl From<RewriteError> for RetagError {
    fn from(err: RewriteError) -> Self {
        match err {
            RewriteError::EmptyKey => Self::Usage(RewriteError::EmptyKey.to_string()),
            RewriteError::MalformedLine { line_number, key } => Self::Format { line_number, key },
        }
    }
}

impl From<BackupError> for RetagError {
    fn from(err: BackupError) -> Self {
        match err {
            BackupError::Create { path, source } => {
                Self::file_access("Could not create backup file", path, source)
            }
            BackupError::Copy { path, source } => {
                Self::file_access("Could not copy file content to", path, source)
            }
            BackupError::Rewind { path, source } => {
                Self::file_access("Failed to reset the file after copy", path, source)
            }
            BackupError::Remove { path, source } => {
                Self::file_access("Error deleting backup", path, source)
            }
        }
    }
}
