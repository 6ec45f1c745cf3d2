//! Error types for the control unit.
//!
//! Gear command misuse is never an error: it is reported as a rejection
//! event. Errors here cover startup and the operator shell.

use std::path::PathBuf;

use lgcs_common::config::ConfigError;
use thiserror::Error;

/// Event log file failure.
#[derive(Debug, Error)]
pub enum LogSinkError {
    /// The log file could not be created or truncated.
    #[error("failed to open event log {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header block could not be written.
    #[error("failed to write event log header to {path}: {source}")]
    Header {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level error of the `lgcs_control_unit` binary.
#[derive(Debug, Error)]
pub enum LgcsError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    LogSink(#[from] LogSinkError),

    /// Operator console read/write failure.
    #[error("operator console I/O: {0}")]
    Console(#[from] std::io::Error),

    /// Ctrl-C handler installation failure.
    #[error("signal handler: {0}")]
    Signal(#[from] ctrlc::Error),
}
