//! Process-wide logging setup.
//!
//! Everything goes through one `tracing_subscriber::fmt` pipeline on stderr:
//! level filter, RFC 3339 timestamps, target names. Records emitted through
//! the `log` facade are bridged into the same pipeline.

use std::io::IsTerminal;

use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LEVEL: &str = "INFO";

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Unknown log level: {0}")]
    UnknownLevel(String),

    #[error("Failed to install logger: {0}")]
    Init(String),
}

/// Parses a level name, case-insensitively.
///
/// Besides the `tracing` names this accepts `WARNING` and `CRITICAL`
/// (mapped to warn and error).
pub fn parse_level(name: &str) -> Result<Level, LoggingError> {
    match name.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Ok(Level::TRACE),
        "DEBUG" => Ok(Level::DEBUG),
        "INFO" => Ok(Level::INFO),
        "WARN" | "WARNING" => Ok(Level::WARN),
        "ERROR" | "CRITICAL" => Ok(Level::ERROR),
        _ => Err(LoggingError::UnknownLevel(name.to_string())),
    }
}

/// Filter with `level` as the default directive; `RUST_LOG` directives are added on top.
pub fn build_filter(level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy()
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Fails on an unknown level name, or when a subscriber is already installed.
pub fn setup_logging(level: &str) -> Result<(), LoggingError> {
    let level = parse_level(level)?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_names() {
        assert_eq!(parse_level("INFO").unwrap(), Level::INFO);
        assert_eq!(parse_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_level("Warning").unwrap(), Level::WARN);
        assert_eq!(parse_level("CRITICAL").unwrap(), Level::ERROR);
        assert_eq!(parse_level(DEFAULT_LEVEL).unwrap(), Level::INFO);
    }

    #[test]
    fn test_parse_level_rejects_unknown() {
        let err = parse_level("loud").unwrap_err();
        assert_eq!(err.to_string(), "Unknown log level: loud");
    }

    #[test]
    fn test_setup_rejects_unknown_level() {
        assert!(matches!(
            setup_logging("verbose"),
            Err(LoggingError::UnknownLevel(_))
        ));
    }
}
