//! Logging for graft.
//!
//! The registry emits structured `tracing` events for every resolve,
//! registration, preload and release. Fields used throughout:
//!
//! - `registry` - the configured registry name
//! - `key` - the requested type name
//! - `source` - where an instance came from (`cache`, `builder`, `default`)
//!
//! Nothing is printed until a subscriber is installed. [`LogConfig`] installs
//! one writing to STDERR through a non-blocking writer.
//!
//! # Examples
//!
//! ```no_run
//! use graft_core::logging::*;
//!
//! let _guard = LogConfig::new()
//!     .level(LogLevel::Debug)
//!     .format(LogFormat::Pretty)
//!     .init();
//!
//! info!("Registry logging enabled");
//! ```
//!
//! # Environment Variables
//!
//! - `GRAFT_LOG_LEVEL=trace|debug|info|warn|error`
//! - `GRAFT_LOG_FORMAT=json|plain|pretty|compact`
//! - `RUST_LOG` - overrides the level when no explicit filter is set

use std::io;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

pub use tracing::{debug, error, info, trace, warn};

/// Log level for filtering messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert to tracing Level
    pub fn to_tracing_level(&self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured, machine-readable (default)
    Json,
    Plain,
    /// Multi-line, for development
    Pretty,
    Compact,
}

impl LogFormat {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "plain" => Some(LogFormat::Plain),
            "pretty" => Some(LogFormat::Pretty),
            "compact" => Some(LogFormat::Compact),
            _ => None,
        }
    }
}

/// Subscriber configuration.
///
/// ```
/// # use graft_core::logging::*;
/// let config = LogConfig::new()
///     .level(LogLevel::Trace)
///     .with_env_filter("graft_core=trace");
/// ```
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    /// Include target (module path)
    pub targets: bool,
    pub thread_ids: bool,
    /// Enable ANSI colors (ignored for JSON)
    pub colors: bool,
    /// Custom environment filter (overrides level if set)
    pub env_filter: Option<String>,
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `GRAFT_LOG_LEVEL` and `GRAFT_LOG_FORMAT`.
    ///
    /// Unrecognized values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(level) = lookup("GRAFT_LOG_LEVEL").and_then(|s| LogLevel::from_str(&s)) {
            config.level = level;
        }
        if let Some(format) = lookup("GRAFT_LOG_FORMAT").and_then(|s| LogFormat::from_str(&s)) {
            config.format = format;
        }
        config
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_targets(mut self, enable: bool) -> Self {
        self.targets = enable;
        self
    }

    pub fn with_thread_ids(mut self, enable: bool) -> Self {
        self.thread_ids = enable;
        self
    }

    pub fn with_colors(mut self, enable: bool) -> Self {
        self.colors = enable;
        self
    }

    /// Filter directives such as `"graft_core=trace,my_app=info"`.
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    fn build_filter(&self) -> EnvFilter {
        match &self.env_filter {
            Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|_| self.level_filter()),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| self.level_filter()),
        }
    }

    /// Filter admitting everything at `level` and above.
    fn level_filter(&self) -> EnvFilter {
        let level = LevelFilter::from_level(self.level.to_tracing_level());
        EnvFilter::default().add_directive(level.into())
    }

    /// Install the global subscriber.
    ///
    /// Returns the writer guard, which must be kept alive to flush output.
    /// Returns `None` when a global subscriber is already installed.
    pub fn init(self) -> Option<WorkerGuard> {
        let (writer, guard) = tracing_appender::non_blocking(io::stderr());
        let filter = self.build_filter();

        let installed = match self.format {
            LogFormat::Json => tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(writer)
                        .with_target(self.targets)
                        .with_thread_ids(self.thread_ids),
                )
                .try_init(),
            LogFormat::Plain => tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(writer)
                        .with_target(self.targets)
                        .with_thread_ids(self.thread_ids)
                        .with_ansi(self.colors),
                )
                .try_init(),
            LogFormat::Pretty => tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .pretty()
                        .with_writer(writer)
                        .with_target(self.targets)
                        .with_thread_ids(self.thread_ids)
                        .with_ansi(self.colors),
                )
                .try_init(),
            LogFormat::Compact => tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .compact()
                        .with_writer(writer)
                        .with_target(self.targets)
                        .with_thread_ids(self.thread_ids)
                        .with_ansi(self.colors),
                )
                .try_init(),
        };

        installed.ok().map(|()| guard)
    }
}

/// Run `f` under a plain-text subscriber at `level` and return what it logged.
#[cfg(test)]
pub(crate) fn capture_logs<F: FnOnce()>(level: Level, f: F) -> String {
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(level)
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = captured.0.lock();
    String::from_utf8_lossy(&bytes).into_owned()
}

impl Default for LogConfig {
    /// JSON to STDERR at INFO level
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Json,
            targets: true,
            thread_ids: false,
            colors: false,
            env_filter: None,
        }
    }
}
