mod init;

pub use init::{init_logging, level_from_verbosity, parse_rotation};

use std::path::PathBuf;
use tracing::Level;
use tracing_appender::rolling::Rotation;

/// Log filename used when file logging is enabled.
pub const LOG_FILENAME: &str = "envtag.log";

/// Configuration for the logging system.
pub struct LogConfig {
    /// Directory for the log file; `None` logs to stderr only.
    pub log_dir: Option<PathBuf>,
    /// Default log level when `RUST_LOG` is not set.
    pub log_level: Level,
    pub json_format: bool,
    pub rotation: Rotation,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            log_level: Level::WARN,
            json_format: false,
            rotation: Rotation::NEVER,
        }
    }
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod logging_tests;
