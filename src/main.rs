// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(clippy::panic, clippy::unwrap_used, clippy::expect_used)
)]

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::Result;
use envtag::logging::{init_logging, level_from_verbosity, parse_rotation, LogConfig};
use envtag::utils::format_display_path;
use envtag::{
    load_user_config, retag, CliOverrides, RetagError, RetagOutcome, RewriteRequest, UserConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;

/// envtag - switch the tag of a KEY=VALUE/TAG entry in an env file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Enable JSON log format
    #[arg(long, env = "ENVTAG_LOG_JSON", default_value = "false", global = true)]
    log_json: bool,

    /// Also write logs to envtag.log in this directory
    #[arg(long, env = "ENVTAG_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    /// Log file rotation period: daily, hourly, or never
    #[arg(long, env = "ENVTAG_LOG_ROTATION", default_value = "never", global = true)]
    log_rotation: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replaces the tag in the env files
    #[command(
        name = "r",
        long_about = "Quickly switch the tag of an environment entry, e.g. the image version \
                      used by a deployment. Lines look like KEY=VALUE/TAG."
    )]
    Replace(ReplaceArgs),
}

#[derive(clap::Args, Debug)]
struct ReplaceArgs {
    /// Key of the entry to update
    key: String,

    /// New tag value
    #[arg(allow_hyphen_values = true)]
    tag: String,

    /// The path to the file [default: ./.env]
    #[arg(short, long, env = "ENVTAG_PATH")]
    path: Option<PathBuf>,

    /// Create a backup of the file before replacing [default: true]
    #[arg(
        short,
        long,
        env = "ENVTAG_BACKUP",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    bkp: Option<bool>,

    /// Replace the file through a temp file and rename instead of rewriting it in place
    #[arg(long)]
    atomic: bool,

    /// Only rewrite the first line that matches the key
    #[arg(long)]
    first_only: bool,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let args = Args::parse();

    let log_config = LogConfig {
        log_dir: args.log_dir,
        log_level: level_from_verbosity(args.verbose),
        json_format: args.log_json,
        rotation: parse_rotation(&args.log_rotation),
    };
    if let Err(e) = init_logging(log_config) {
        eprintln!("Error: Failed to initialize logging: {e}");
        return Err(e);
    }

    // Load user-level config (~/.envtag/config.toml); file is optional.
    let user_cfg = load_user_config().unwrap_or_else(|e| {
        warn!("Failed to load user config, using defaults: {e}");
        UserConfig::default()
    });

    let Command::Replace(replace) = args.command;
    let key = replace.key.trim().to_string();
    let result = run_replace(replace, &user_cfg);
    match &result {
        Ok(outcome) => report_outcome(outcome, &key),
        Err(e) => eprintln!("Error: {e}"),
    }
    Ok(ExitCode::from(exit_status(&result)))
}

fn run_replace(args: ReplaceArgs, user_cfg: &UserConfig) -> Result<RetagOutcome, RetagError> {
    let options = user_cfg.retag_options(CliOverrides {
        path: args.path,
        backup: args.bkp,
        atomic: args.atomic,
        first_only: args.first_only,
    });

    let request = RewriteRequest::new(&args.key, &args.tag)?;
    retag(&request, &options)
}

/// Process status for a finished run. Usage errors from clap exit with 2 before
/// reaching here.
fn exit_status(result: &Result<RetagOutcome, RetagError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

#[allow(clippy::print_stdout)]
fn report_outcome(outcome: &RetagOutcome, key: &str) {
    let display_path = format_display_path(&outcome.path);
    if let Some(stale) = &outcome.stale_backup {
        eprintln!("Warning: could not remove backup {}", format_display_path(stale));
    }
    if !outcome.changed() {
        println!("File not updated! No entry for {key} in {display_path}");
        return;
    }

    println!("File updated! {display_path}");
    if let Some(backup) = &outcome.backup {
        println!("Backup: {}", format_display_path(backup));
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
