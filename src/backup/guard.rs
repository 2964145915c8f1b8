use super::BackupError;
use crate::utils::backup_path_for;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Seek};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Attempts at a free backup name before giving up.
const MAX_NAME_ATTEMPTS: usize = 100;

/// A backup copy made before a file is rewritten.
///
/// Either `keep` it once the new content is written, or `discard` it when the
/// rewrite fails or changes nothing. Dropping the guard leaves the backup on disk.
#[must_use = "a backup must be kept or discarded"]
#[derive(Debug, Default)]
pub struct BackupGuard {
    path: Option<PathBuf>,
}

impl BackupGuard {
    /// A guard that holds no backup.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Copy the remaining bytes of `source` to `<source_path>_bkp_<timestamp>`,
    /// then rewind `source` so it can be scanned from the start.
    ///
    /// An existing file is never reused: if the name is taken (two runs in the
    /// same second) a `_1`, `_2`, ... suffix is appended. The backup gets the
    /// source's permissions. A backup file left half-written by a failed copy is removed.
    pub fn create(
        source: &mut File,
        source_path: &Path,
        timestamp: &str,
    ) -> Result<Self, BackupError> {
        let (backup_path, mut destination) = create_new_backup(source_path, timestamp)?;

        let copied = source
            .metadata()
            .and_then(|metadata| destination.set_permissions(metadata.permissions()))
            .and_then(|()| io::copy(source, &mut destination))
            .and_then(|bytes| destination.sync_all().map(|()| bytes))
            .map_err(|err| BackupError::Copy {
                path: backup_path.clone(),
                source: err,
            })
            .and_then(|bytes| {
                source.rewind().map(|()| bytes).map_err(|err| BackupError::Rewind {
                    path: source_path.to_path_buf(),
                    source: err,
                })
            });

        match copied {
            Ok(bytes) => {
                info!("Created backup {} ({} bytes)", backup_path.display(), bytes);
                Ok(Self {
                    path: Some(backup_path),
                })
            }
            Err(e) => {
                drop(destination);
                if let Err(remove_err) = fs::remove_file(&backup_path) {
                    warn!(
                        "Failed to remove incomplete backup {}: {}",
                        backup_path.display(),
                        remove_err
                    );
                }
                Err(e)
            }
        }
    }

    /// Path of the backup, if one was made.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Leave the backup in place as a recovery point.
    #[must_use]
    pub fn keep(self) -> Option<PathBuf> {
        self.path
    }

    /// Delete the backup. A guard without a backup is a no-op.
    pub fn discard(self) -> Result<(), BackupError> {
        let Some(path) = self.path else {
            return Ok(());
        };
        fs::remove_file(&path).map_err(|source| BackupError::Remove {
            path: path.clone(),
            source,
        })?;
        info!("Removed backup {}", path.display());
        Ok(())
    }
}

/// Create a backup file that did not exist before this call.
fn create_new_backup(source_path: &Path, timestamp: &str) -> Result<(PathBuf, File), BackupError> {
    let base = backup_path_for(source_path, timestamp);
    let mut candidate = base.clone();

    for attempt in 1..=MAX_NAME_ATTEMPTS {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(file) => return Ok((candidate, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                warn!("Backup {} already exists", candidate.display());
                let mut name = base.clone().into_os_string();
                name.push(format!("_{attempt}"));
                candidate = PathBuf::from(name);
            }
            Err(e) => {
                return Err(BackupError::Create {
                    path: candidate,
                    source: e,
                })
            }
        }
    }

    Err(BackupError::Create {
        path: base,
        source: io::Error::new(ErrorKind::AlreadyExists, "no free backup file name"),
    })
}
