//! Event sinks for the operator shell.
//!
//! - [`TracingSink`] - structured `tracing` events, level by severity
//! - [`LogFileSink`] - console echo plus a truncated-at-startup log file
//!
//! Write failures are logged and swallowed: the gear machine never depends
//! on its observers.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use lgcs_common::config::{EventFormat, LogConfig};
use lgcs_common::gear::event::{EventSink, GearEvent, Severity};
use tracing::{error, info, warn};

use crate::error::LogSinkError;

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&mut self, event: &GearEvent) {
        let state = event.position.label();
        let kind = &event.kind;
        match event.kind.severity() {
            Severity::Info => info!(state, ?kind, "{}", event.message()),
            Severity::Warning => warn!(state, ?kind, "{}", event.message()),
            Severity::Alert => error!(state, ?kind, "{}", event.message()),
        }
    }
}

/// Console + file event log.
pub struct LogFileSink {
    path: PathBuf,
    file: File,
    format: EventFormat,
    console: Option<Box<dyn Write + Send>>,
    write_failed: bool,
}

impl std::fmt::Debug for LogFileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogFileSink")
            .field("path", &self.path)
            .field("format", &self.format)
            .field("console", &self.console.is_some())
            .finish()
    }
}

impl LogFileSink {
    /// Create (truncate) the log file and write its header block.
    ///
    /// Echoes to stdout when `config.console` is set.
    pub fn create(config: &LogConfig) -> Result<Self, LogSinkError> {
        let sink = Self::open(&config.file, config.format)?;
        Ok(if config.console {
            sink.with_console(std::io::stdout())
        } else {
            sink
        })
    }

    /// Create the log file without console echo.
    pub fn open(path: &Path, format: EventFormat) -> Result<Self, LogSinkError> {
        let mut file = File::create(path).map_err(|source| LogSinkError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        if format == EventFormat::Text {
            write_header(&mut file).map_err(|source| LogSinkError::Header {
                path: path.to_path_buf(),
                source,
            })?;
        }

        info!("Event log: {} ({:?})", path.display(), format);
        Ok(Self {
            path: path.to_path_buf(),
            file,
            format,
            console: None,
            write_failed: false,
        })
    }

    /// Echo rendered lines to `out` as well.
    pub fn with_console(mut self, out: impl Write + Send + 'static) -> Self {
        self.console = Some(Box::new(out));
        self
    }

    fn render(&self, event: &GearEvent) -> String {
        match self.format {
            EventFormat::Text => event.to_string(),
            EventFormat::Json => event.to_json_line(),
        }
    }
}

fn write_header(file: &mut File) -> std::io::Result<()> {
    writeln!(file, "=== Landing Gear System Log ===")?;
    writeln!(
        file,
        "Log started: {}",
        Local::now().format("%d-%m-%Y %H:%M:%S")
    )?;
    writeln!(file, "{}", "=".repeat(30))?;
    writeln!(file)?;
    file.flush()
}

impl EventSink for LogFileSink {
    fn record(&mut self, event: &GearEvent) {
        let line = self.render(event);

        if let Some(console) = self.console.as_mut() {
            // Console is best effort.
            let _ = writeln!(console, "{}", event).and_then(|_| console.flush());
        }

        let result = writeln!(self.file, "{line}").and_then(|_| self.file.flush());
        match result {
            Ok(()) => self.write_failed = false,
            Err(e) if !self.write_failed => {
                warn!("Event log write to {} failed: {e}", self.path.display());
                self.write_failed = true;
            }
            Err(_) => {}
        }
    }
}
