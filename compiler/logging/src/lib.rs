#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Logging setup for the compiler.
//!
//! Installs a `tracing` fmt subscriber writing to stderr, or to a log file when one
//! is configured. `RUST_LOG` takes precedence over the configured level.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The level is not a valid filter directive.
    #[error("invalid log level `{level}`: {source}")]
    InvalidLevel {
        /// Level as given
        level: String,
        /// Parser error
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    /// The log file could not be opened.
    #[error("failed to open log file: {0}")]
    File(#[from] std::io::Error),
}

/// Build the filter for `level`, letting `RUST_LOG` override it.
pub fn filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level)
        .map_err(|source| LoggingError::InvalidLevel { level: level.to_string(), source })
}

/// Install the global subscriber. Later calls keep the first subscriber.
pub fn init(level: &str, file: Option<&Path>) -> Result<(), LoggingError> {
    let filter = filter(level)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    // try_init only fails when a subscriber is already installed.
    let _ = match file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_rejected() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let err = filter("protoweave=loudest").expect_err("bad directive");
        assert!(err.to_string().contains("invalid log level"));
    }

    #[test]
    fn test_init_with_file_is_repeatable() {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let log = dir.path().join("protoweave.log");
        init("debug", Some(&log)).expect("first init");
        init("info", None).expect("second init keeps the first subscriber");
        tracing::info!("logged");
        assert!(log.exists());
    }
}
