//! Structured logging to the browser console.
//!
//! Installs a `tracing-subscriber` fmt layer whose writer forwards every
//! formatted event to `console.error`/`warn`/`info`/`debug` according to its
//! level. Timestamps are disabled because `wasm32-unknown-unknown` has no
//! system clock.

use std::io::{self, Write};

use tracing::{Level, Metadata};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use wasm_bindgen::JsValue;

/// Logging configuration options.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Maximum level for our crates. Dependencies log at `warn`.
    pub level: Level,
    /// Whether to include the target module in log lines.
    pub include_target: bool,
    /// Whether to include file/line info in log lines.
    pub include_file_line: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl LoggingConfig {
    /// Verbose logging for development builds.
    #[must_use]
    pub const fn development() -> Self {
        Self {
            level: Level::DEBUG,
            include_target: true,
            include_file_line: true,
        }
    }

    /// Quiet logging for release builds.
    #[must_use]
    pub const fn production() -> Self {
        Self {
            level: Level::WARN,
            include_target: false,
            include_file_line: false,
        }
    }

    /// Detect configuration based on build type.
    #[must_use]
    pub const fn auto() -> Self {
        if cfg!(debug_assertions) {
            Self::development()
        } else {
            Self::production()
        }
    }

    /// Set the level for our crates.
    #[must_use]
    pub const fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Filter directive for this configuration.
    pub fn directive(&self) -> String {
        let level = level_to_directive(self.level);
        format!("warn,musicrec_core={level},musicrec_ui={level}")
    }
}

/// Errors that can occur during logging initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The filter directive could not be parsed.
    #[error("Invalid log filter {directive}: {reason}")]
    InvalidFilter {
        /// The rejected directive.
        directive: String,
        /// Parser message.
        reason: String,
    },
    /// A global subscriber is already installed.
    #[error("Logging already initialized")]
    AlreadyInitialized,
}

/// Initialize console logging with the given configuration.
///
/// Calling this twice returns [`LoggingError::AlreadyInitialized`] and leaves
/// the first subscriber in place.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = parse_filter(&config.directive())?;

    let console_layer = fmt::layer()
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .with_target(config.include_target)
        .with_file(config.include_file_line)
        .with_line_number(config.include_file_line)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)
}

/// Initialize logging with automatic configuration detection.
pub fn init_auto() -> Result<(), LoggingError> {
    init(&LoggingConfig::auto())
}

fn parse_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directive).map_err(|e| LoggingError::InvalidFilter {
        directive: directive.to_string(),
        reason: e.to_string(),
    })
}

const fn level_to_directive(level: Level) -> &'static str {
    match level {
        Level::TRACE => "trace",
        Level::DEBUG => "debug",
        Level::INFO => "info",
        Level::WARN => "warn",
        _ => "error",
    }
}

/// Creates a [`ConsoleWriter`] per event, remembering the event's level.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event and emits it to the console when flushed or dropped.
#[derive(Debug)]
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    const fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&self.buffer);
        let message = JsValue::from_str(line.trim_end());
        match self.level {
            Level::ERROR => web_sys::console::error_1(&message),
            Level::WARN => web_sys::console::warn_1(&message),
            Level::INFO => web_sys::console::info_1(&message),
            _ => web_sys::console::debug_1(&message),
        }
        self.buffer.clear();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_production() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::WARN);
        assert!(!config.include_target);
    }

    #[test]
    fn test_development_config() {
        let config = LoggingConfig::development();
        assert_eq!(config.level, Level::DEBUG);
        assert!(config.include_file_line);
    }

    #[test]
    fn test_config_builder() {
        let config = LoggingConfig::production().with_level(Level::TRACE);
        assert_eq!(config.level, Level::TRACE);
    }

    #[test]
    fn test_directive_scopes_our_crates() {
        let config = LoggingConfig::development();
        assert_eq!(
            config.directive(),
            "warn,musicrec_core=debug,musicrec_ui=debug"
        );
        assert!(parse_filter(&config.directive()).is_ok());
    }

    #[test]
    fn test_invalid_directive_reported() {
        let err = parse_filter("musicrec_ui=loud").unwrap_err();
        match &err {
            LoggingError::InvalidFilter { directive, .. } => {
                assert_eq!(directive, "musicrec_ui=loud");
            }
            LoggingError::AlreadyInitialized => panic!("unexpected error: {err}"),
        }
        assert!(err.to_string().starts_with("Invalid log filter musicrec_ui=loud"));
    }
}
