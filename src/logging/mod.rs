//! Application logging functionality
//!
//! Diagnostics always go to stderr so standard output stays reserved for
//! the artifact. File logging adds daily rolling files under
//! ~/.config/fontasm/logs/.

use crate::core::config_file::ConfigFile;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Prefix of the daily log files
const LOG_FILE_PREFIX: &str = "fontasm.log";

/// How much to log and where
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Number of `-v` flags
    pub verbose: u8,
    pub quiet: bool,
    pub log_file: bool,
}

impl LogOptions {
    /// Filter used when `RUST_LOG` is not set
    pub fn default_directive(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn,fontasm=info",
            1 => "warn,fontasm=debug",
            _ => "trace",
        }
    }
}

/// Install the global subscriber
///
/// The returned guard flushes the file log when dropped, so it has to live
/// until the program ends.
pub fn init(options: LogOptions) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.default_directive()));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let (file_layer, guard) = if options.log_file {
        let logs_dir = ConfigFile::logs_dir();
        fs::create_dir_all(&logs_dir)?;
        let appender = tracing_appender::rolling::daily(&logs_dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer().with_ansi(false).with_writer(writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        let options = |verbose, quiet| LogOptions {
            verbose,
            quiet,
            log_file: false,
        };
        assert_eq!(options(0, false).default_directive(), "warn,fontasm=info");
        assert_eq!(options(1, false).default_directive(), "warn,fontasm=debug");
        assert_eq!(options(3, false).default_directive(), "trace");
        assert_eq!(options(0, true).default_directive(), "error");
    }
}
