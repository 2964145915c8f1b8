mod atomic;

pub use atomic::atomic_write;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// File edited when no path is given
pub const DEFAULT_ENV_FILE: &str = "./.env";

/// Infix between the original file name and the backup timestamp
pub const BACKUP_INFIX: &str = "_bkp_";

/// Sortable timestamp format used in backup file names
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Current local time formatted for a backup file name
#[must_use]
pub fn backup_timestamp() -> String {
    chrono::Local::now()
        .format(BACKUP_TIMESTAMP_FORMAT)
        .to_string()
}

/// Sibling backup path: `<path>_bkp_<timestamp>`
#[must_use]
pub fn backup_path_for(path: &Path, timestamp: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_INFIX);
    name.push(timestamp);
    PathBuf::from(name)
}

/// Format a path for display, replacing home directory with ~/
#[must_use]
pub fn format_display_path(path: &Path) -> String {
    replace_homedir::replace_homedir(&path.to_string_lossy(), "~")
}

#[cfg(test)]
#[path = "utils_tests.rs"]
mod tests;
