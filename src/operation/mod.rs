//! One retag run: open, back up, rewrite, write.
//!
//! The target file is not locked. If another process modifies it while a run
//! is in progress the result is undefined.
mod error;
mod write;

pub use error::RetagError;
pub use write::write_lines;

use crate::backup::BackupGuard;
use crate::rewrite::{rewrite_lines, MatchPolicy, RewriteRequest, RewriteResult};
use crate::utils::{backup_timestamp, DEFAULT_ENV_FILE};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// How the rewritten content replaces the original.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Reopen the file with truncation and write in place.
    #[default]
    Truncate,
    /// Write a sibling temp file and rename it over the original.
    Atomic,
}

/// Options for a retag run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetagOptions {
    pub path: PathBuf,
    pub backup: bool,
    pub write_mode: WriteMode,
    pub policy: MatchPolicy,
}

impl Default for RetagOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_ENV_FILE),
            backup: true,
            write_mode: WriteMode::default(),
            policy: MatchPolicy::default(),
        }
    }
}

/// Result of a retag run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetagOutcome {
    pub path: PathBuf,
    /// 1-based numbers of rewritten lines; empty when nothing changed.
    pub modified: Vec<usize>,
    /// Backup left on disk as a recovery point.
    pub backup: Option<PathBuf>,
    /// Backup of a run that changed nothing but could not be removed.
    pub stale_backup: Option<PathBuf>,
}

impl RetagOutcome {
    /// Whether the file was rewritten.
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.modified.is_empty()
    }
}

/// Replace the tag of `request.key()` in the file at `options.path`.
///
/// When the scan fails or changes nothing, the backup (if any) is deleted and
/// the file is left untouched. On success the backup is kept.
pub fn retag(request: &RewriteRequest, options: &RetagOptions) -> Result<RetagOutcome, RetagError> {
    retag_with_timestamp(request, options, &backup_timestamp())
}

/// [`retag`] with the backup name's timestamp supplied by the caller.
#[instrument(
    name = "retag",
    skip(request, options, timestamp),
    fields(path = %options.path.display(), key = request.key())
)]
pub fn retag_with_timestamp(
    request: &RewriteRequest,
    options: &RetagOptions,
    timestamp: &str,
) -> Result<RetagOutcome, RetagError> {
    let path = options.path.as_path();

    let mut source = File::open(path)
        .map_err(|e| RetagError::file_access("Failed to open the file", path, e))?;

    let guard = if options.backup {
        BackupGuard::create(&mut source, path, timestamp)?
    } else {
        BackupGuard::disabled()
    };

    let scanned = read_lines(source, path).and_then(|lines| {
        rewrite_lines(&lines, request, options.policy).map_err(RetagError::from)
    });

    let result = match scanned {
        Ok(result) if !result.is_unchanged() => result,
        Ok(_) => {
            info!("No line with key {} to update", request.key());
            return Ok(unchanged_outcome(path, guard));
        }
        Err(e) => {
            discard_backup(guard);
            return Err(e);
        }
    };

    let outcome = write_and_keep(path, result, options.write_mode, guard)?;
    info!(
        "Updated {} line(s) in {} with tag '{}'",
        outcome.modified.len(),
        path.display(),
        request.new_tag()
    );
    Ok(outcome)
}

/// Read every line as raw bytes, dropping the `\n` and any trailing `\r`.
/// The handle is closed before returning.
fn read_lines(source: File, path: &Path) -> Result<Vec<Vec<u8>>, RetagError> {
    BufReader::new(source)
        .split(b'\n')
        .map(|line| {
            line.map(|mut line| {
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                line
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| RetagError::file_access("Failed to scan the file", path, e))
}

fn unchanged_outcome(path: &Path, guard: BackupGuard) -> RetagOutcome {
    RetagOutcome {
        path: path.to_path_buf(),
        modified: Vec::new(),
        backup: None,
        stale_backup: discard_backup(guard),
    }
}

/// Keep the backup and write the new content. A write error names the backup.
fn write_and_keep(
    path: &Path,
    result: RewriteResult,
    mode: WriteMode,
    guard: BackupGuard,
) -> Result<RetagOutcome, RetagError> {
    let backup = guard.keep();
    write_lines(path, &result, mode, backup.as_deref())?;

    Ok(RetagOutcome {
        path: path.to_path_buf(),
        modified: result.modified,
        backup,
        stale_backup: None,
    })
}

/// Remove the backup, returning its path if it is still on disk.
fn discard_backup(guard: BackupGuard) -> Option<PathBuf> {
    let path = guard.path().map(Path::to_path_buf);
    match guard.discard() {
        Ok(()) => None,
        Err(e) => {
            warn!("{}", e);
            path
        }
    }
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
