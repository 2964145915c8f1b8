//! Atomic file write operations.
//!
//! Provides atomic file replacement using the `tempfile` crate.
//! Temp files are automatically cleaned up on failure.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace a file's content atomically using a temporary file.
///
/// The temp file is created next to the target so the final rename stays on
/// one filesystem. If the target already exists its permissions are copied to
/// the temp file before the rename.
///
/// # Errors
///
/// Returns an `io::Error` if the temp file cannot be created or written, or if
/// the rename fails.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(content)?;
    temp_file.flush()?;

    if let Ok(metadata) = fs::metadata(path) {
        temp_file.as_file().set_permissions(metadata.permissions())?;
    }

    // Consumes the NamedTempFile, preventing auto-deletion
    temp_file.persist(path)?;

    Ok(())
}
