use color_eyre::eyre::Result;
use std::path::Path;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};
use super::{LogConfig, LOG_FILENAME};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the logging system with the given configuration.
///
/// Events go to stderr so they never mix with the command's own output. When
/// a log directory is configured they are also appended to [`LOG_FILENAME`]
/// there. `RUST_LOG` overrides the configured level.
pub fn init_logging(config: LogConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("envtag={}", config.log_level)));

    let mut layers = vec![stderr_layer(config.json_format)];
    if let Some(log_dir) = &config.log_dir {
        std::fs::create_dir_all(log_dir)?;
        layers.push(file_layer(log_dir, config.rotation, config.json_format));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}

fn stderr_layer(json_format: bool) -> BoxedLayer {
    if json_format {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(true) // Colors for terminal
            .boxed()
    }
}

fn file_layer(log_dir: &Path, rotation: Rotation, json_format: bool) -> BoxedLayer {
    let file_appender = RollingFileAppender::new(rotation, log_dir, LOG_FILENAME);
    if json_format {
        fmt::layer()
            .json()
            .with_writer(file_appender)
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(file_appender)
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_ansi(false) // No ANSI colors in files
            .boxed()
    }
}

/// Parse rotation period from string.
pub fn parse_rotation(s: &str) -> Rotation {
    match s.to_lowercase().as_str() {
        "hourly" => Rotation::HOURLY,
        "daily" => Rotation::DAILY,
        _ => Rotation::NEVER,
    }
}

/// Map repeated `-v` flags to a default log level.
#[must_use]
pub fn level_from_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}
