// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::indexing_slicing
    )
)]

pub mod backup;
pub mod logging;
pub mod operation;
pub mod rewrite;
pub mod user_config;
pub mod utils;

// Re-export commonly used types
pub use backup::{BackupError, BackupGuard};
pub use operation::{retag, retag_with_timestamp, RetagError, RetagOptions, RetagOutcome, WriteMode};
pub use rewrite::{rewrite_lines, MatchPolicy, RewriteError, RewriteRequest, RewriteResult};
pub use user_config::{load_user_config, CliOverrides, UserConfig, UserConfigError};
