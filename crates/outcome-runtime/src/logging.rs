//! Logging setup on `tracing-subscriber`.
//!
//! Library code in this workspace only emits `tracing` events; nothing is
//! printed until an application installs a subscriber. This module builds
//! one from configuration or by hand.
//!
//! # Configuration-Based Initialization
//!
//! ```rust,ignore
//! use outcome_runtime::config::load_config;
//! use outcome_runtime::logging;
//!
//! let config = load_config()?;
//! logging::init_from_config(&config.logging)?;
//! ```
//!
//! # Manual Initialization
//!
//! ```rust,ignore
//! use outcome_runtime::logging::{LoggingBuilder, SpanEvents};
//!
//! LoggingBuilder::new()
//!     .directive("outcome_core=trace")
//!     .span_events(SpanEvents::LIFECYCLE)
//!     .try_init()?;
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{LogFormat, LogOutput, LoggingConfig, SpanEventConfig};

/// File name used when the configured log path has none.
const DEFAULT_LOG_FILE: &str = "outcome.log";

/// Errors that can occur while installing the subscriber.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// The log file or its directory could not be created.
    #[error("Failed to open log file: {0}")]
    Appender(#[from] InitError),

    /// A global subscriber is installed already.
    #[error("Failed to install subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Result type for logging setup.
pub type LoggingResult<T> = Result<T, LoggingError>;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Span lifecycle events to log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanEvents {
    /// Log when a span is created.
    pub new: bool,
    /// Log when a span is entered.
    pub enter: bool,
    /// Log when a span is exited.
    pub exit: bool,
    /// Log when a span is closed.
    pub close: bool,
}

impl SpanEvents {
    /// No span events.
    pub const NONE: Self = Self {
        new: false,
        enter: false,
        exit: false,
        close: false,
    };

    /// Creation and close only.
    pub const LIFECYCLE: Self = Self {
        new: true,
        enter: false,
        exit: false,
        close: true,
    };

    /// Every span event.
    pub const FULL: Self = Self {
        new: true,
        enter: true,
        exit: true,
        close: true,
    };

    fn to_fmt_span(self) -> fmt::format::FmtSpan {
        let mut span = fmt::format::FmtSpan::NONE;
        if self.new {
            span |= fmt::format::FmtSpan::NEW;
        }
        if self.enter {
            span |= fmt::format::FmtSpan::ENTER;
        }
        if self.exit {
            span |= fmt::format::FmtSpan::EXIT;
        }
        if self.close {
            span |= fmt::format::FmtSpan::CLOSE;
        }
        span
    }
}

impl From<&SpanEventConfig> for SpanEvents {
    fn from(config: &SpanEventConfig) -> Self {
        Self {
            new: config.new,
            enter: config.enter,
            exit: config.exit,
            close: config.close,
        }
    }
}

/// Initializes logging from a [`LoggingConfig`].
///
/// An already installed global subscriber is left in place.
///
/// # Errors
///
/// Fails if file output is configured and the log file cannot be opened.
pub fn init_from_config(config: &LoggingConfig) -> LoggingResult<()> {
    match LoggingBuilder::from_config(config).try_init() {
        Err(LoggingError::Init(err)) => {
            debug!(error = %err, "Keeping existing global subscriber");
            Ok(())
        }
        result => result,
    }
}

/// A builder for the global `tracing` subscriber.
#[derive(Debug, Default)]
pub struct LoggingBuilder {
    directives: Vec<String>,
    level: Option<tracing::Level>,
    span_events: SpanEvents,
    format: LogFormat,
    output: LogOutput,
    thread_ids: bool,
    file_location: bool,
    file_path: Option<PathBuf>,
}

impl LoggingBuilder {
    /// Creates a builder logging compact lines to stdout.
    pub fn new() -> Self {
        Self {
            format: LogFormat::Compact,
            output: LogOutput::Stdout,
            ..Default::default()
        }
    }

    /// Creates a builder from a [`LoggingConfig`].
    pub fn from_config(config: &LoggingConfig) -> Self {
        let mut filters: Vec<_> = config.filters.iter().collect();
        filters.sort_by(|a, b| a.0.cmp(b.0));

        Self {
            directives: filters
                .into_iter()
                .map(|(module, level)| format!("{module}={level}"))
                .collect(),
            level: Some(config.level.to_tracing_level()),
            span_events: SpanEvents::from(&config.span_events),
            format: config.format,
            output: config.output,
            thread_ids: config.thread_ids,
            file_location: config.file_location,
            file_path: config.file_path.clone(),
        }
    }

    /// Adds a filter directive such as `outcome_core=trace`.
    pub fn directive(mut self, directive: &str) -> Self {
        self.directives.push(directive.to_string());
        self
    }

    /// Sets which span events are logged.
    pub fn span_events(mut self, events: SpanEvents) -> Self {
        self.span_events = events;
        self
    }

    /// Sets the output format.
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the output destination.
    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Builds the filter. `RUST_LOG` takes precedence over the base level.
    fn build_filter(&self) -> EnvFilter {
        let base_level = self.level.unwrap_or(tracing::Level::INFO);
        let mut filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(base_level.to_string().to_lowercase()));

        for directive in &self.directives {
            match directive.parse() {
                Ok(d) => filter = filter.add_directive(d),
                Err(err) => warn!(%directive, error = %err, "Ignoring invalid log directive"),
            }
        }

        filter
    }

    fn build_writer(&self) -> LoggingResult<BoxMakeWriter> {
        let writer = match (self.output, self.file_path.as_deref()) {
            (LogOutput::Stdout, _) => BoxMakeWriter::new(std::io::stdout),
            (LogOutput::Stderr, _) => BoxMakeWriter::new(std::io::stderr),
            (LogOutput::File, Some(path)) => BoxMakeWriter::new(open_log_file(path)?),
            (LogOutput::File, None) => {
                warn!("File output requested but no file path configured, falling back to stdout");
                BoxMakeWriter::new(std::io::stdout)
            }
        };
        Ok(writer)
    }

    fn build_layer(&self, writer: BoxMakeWriter) -> BoxedLayer {
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(self.output != LogOutput::File)
            .with_span_events(self.span_events.to_fmt_span())
            .with_thread_ids(self.thread_ids)
            .with_file(self.file_location)
            .with_line_number(self.file_location);

        match self.format {
            LogFormat::Compact => layer.compact().boxed(),
            LogFormat::Pretty => layer.pretty().boxed(),
            LogFormat::Full => layer.boxed(),
            #[cfg(feature = "json-log")]
            LogFormat::Json => layer.json().boxed(),
            #[cfg(not(feature = "json-log"))]
            LogFormat::Json => {
                warn!("JSON logging needs the `json-log` feature, using the full format");
                layer.boxed()
            }
        }
    }

    /// Installs the subscriber.
    ///
    /// The log file, if any, is opened before anything is installed.
    ///
    /// # Errors
    ///
    /// - [`LoggingError::Appender`] if the log file cannot be opened.
    /// - [`LoggingError::Init`] if a global subscriber is installed already.
    pub fn try_init(self) -> LoggingResult<()> {
        let writer = self.build_writer()?;
        let layer = self.build_layer(writer);

        tracing_subscriber::registry()
            .with(layer)
            .with(self.build_filter())
            .try_init()?;
        Ok(())
    }
}

fn open_log_file(path: &Path) -> LoggingResult<RollingFileAppender> {
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map_or_else(|| DEFAULT_LOG_FILE.to_string(), |name| name.to_string_lossy().into_owned());

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)?;
    Ok(appender)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    fn unwritable_log_path() -> PathBuf {
        // The parent is a regular file, so no directory can be created there.
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("Cargo.toml")
            .join("outcome.log")
    }

    #[test]
    fn test_span_events_to_fmt_span() {
        assert_eq!(SpanEvents::NONE.to_fmt_span(), fmt::format::FmtSpan::NONE);
        assert_eq!(
            SpanEvents::LIFECYCLE.to_fmt_span(),
            fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE
        );
        assert_eq!(SpanEvents::FULL.to_fmt_span(), fmt::format::FmtSpan::FULL);
    }

    #[test]
    fn test_builder_from_config() {
        let mut config = LoggingConfig {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            output: LogOutput::Stderr,
            thread_ids: true,
            file_location: true,
            ..Default::default()
        };
        config
            .filters
            .insert("outcome_core".to_string(), LogLevel::Trace);
        config
            .filters
            .insert("outcome_runtime".to_string(), LogLevel::Warn);

        let builder = LoggingBuilder::from_config(&config);
        assert_eq!(builder.level, Some(tracing::Level::DEBUG));
        assert_eq!(builder.format, LogFormat::Pretty);
        assert_eq!(builder.output, LogOutput::Stderr);
        assert!(builder.thread_ids);
        assert!(builder.file_location);
        assert_eq!(
            builder.directives,
            vec!["outcome_core=trace".to_string(), "outcome_runtime=warn".to_string()]
        );
    }

    #[test]
    fn test_unopenable_log_file_is_an_error() {
        let config = LoggingConfig {
            output: LogOutput::File,
            file_path: Some(unwritable_log_path()),
            ..Default::default()
        };

        let result = LoggingBuilder::from_config(&config).try_init();
        assert!(matches!(result, Err(LoggingError::Appender(_))), "{result:?}");
        assert!(matches!(init_from_config(&config), Err(LoggingError::Appender(_))));
    }

    #[test]
    fn test_init_is_idempotent() {
        init_from_config(&LoggingConfig::default()).unwrap();
        init_from_config(&LoggingConfig::default()).unwrap();
        assert!(matches!(
            LoggingBuilder::new().try_init(),
            Err(LoggingError::Init(_))
        ));
    }
}
