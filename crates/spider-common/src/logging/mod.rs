//! Logging Setup
//!
//! Builds the news spider logging pipeline on top of `tracing`:
//!
//! - a file sink rotating at local midnight (INFO and up), always attached
//! - a console sink on stderr (DEBUG and up), attached per platform policy
//! - one fixed record format shared by both sinks
//!
//! Record names map to tracing targets; dispatching by target is the
//! tracing registry's concern, the way name-based logger caching was the
//! old logging system's.
//!
//! Setup failures are fatal: there is no fallback output and no retry.

mod format;
mod path;
mod rotate;

pub use format::{LocalTime, RecordFormat};
pub use path::{default_log_path, resolve_log_path, LOG_FILE_NAME, LOG_FOLDER_NAME};

use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rotate::LocalDailyWriter;
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::writer::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Errors raised while setting up the logging pipeline.
#[derive(Debug, Error)]
pub enum LogSetupError {
    #[error("failed to locate the application root directory")]
    AppRoot(#[source] io::Error),

    #[error("failed to create log directory {path:?}")]
    CreateLogDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("log file path {0:?} has no usable file name")]
    InvalidFilePath(PathBuf),

    #[error("failed to open log file {path:?}")]
    OpenLogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Whether the console sink is attached alongside the file sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMode {
    /// Decide from the host platform, see [`ConsoleMode::default_for_platform`].
    Auto,
    Enabled,
    Disabled,
}

impl ConsoleMode {
    /// Platform default: console output on Windows (the interactive,
    /// development family), file-only on Linux (the deployment family).
    ///
    /// Unrecognized platforms get file-only output. That is a documented
    /// configuration default, not an error.
    pub fn default_for_platform(os: &str) -> bool {
        os.eq_ignore_ascii_case("windows")
    }

    fn attach_console(self) -> bool {
        match self {
            ConsoleMode::Auto => Self::default_for_platform(std::env::consts::OS),
            ConsoleMode::Enabled => true,
            ConsoleMode::Disabled => false,
        }
    }
}

/// Handle to the installed logging pipeline.
pub struct Logger {
    file_base: PathBuf,
}

impl Logger {
    pub fn builder() -> Builder {
        Builder {
            file: None,
            console: ConsoleMode::Auto,
        }
    }

    /// Install the pipeline with defaults: the resolved spider log path and
    /// the platform console policy.
    pub fn init() -> Result<Self, LogSetupError> {
        Self::builder().init()
    }

    /// Base path of the rotating sink. The active segment lives next to it
    /// with the local date appended, e.g. `news_spider.log.2024-01-15`.
    pub fn file_base_path(&self) -> &Path {
        &self.file_base
    }
}

pub struct Builder {
    file: Option<PathBuf>,
    console: ConsoleMode,
}

impl Builder {
    /// Log file to write to. Defaults to [`default_log_path`].
    pub fn file(mut self, file_path: impl Into<PathBuf>) -> Self {
        self.file = Some(file_path.into());
        self
    }

    pub fn console(mut self, mode: ConsoleMode) -> Self {
        self.console = mode;
        self
    }

    /// Build the subscriber and install it as the global default.
    ///
    /// Installing when a global subscriber is already set is a no-op; the
    /// existing pipeline stays in place.
    pub fn init(self) -> Result<Logger, LogSetupError> {
        let file_base = match self.file {
            Some(file_base) => file_base,
            None => path::default_log_path()?,
        };
        let writer = file_writer(&file_base)?;
        let console = self.console.attach_console();

        // RUST_LOG overrides; otherwise admit everything the attached
        // sinks can use. The file sink filters at INFO on its own.
        let default_directive = if console { "debug" } else { "info" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        let subscriber = make_subscriber(
            filter,
            Mutex::new(writer),
            console.then(|| io::stderr as fn() -> io::Stderr),
            LocalTime,
        );

        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            install_panic_hook();
        }

        Ok(Logger { file_base })
    }
}

/// Layer stack: global filter, file sink at INFO, optional console sink at
/// DEBUG. Generic over the writers and the clock so tests can inject both.
fn make_subscriber<FW, CW, T>(
    filter: EnvFilter,
    file_writer: FW,
    console_writer: Option<CW>,
    timer: T,
) -> impl tracing::Subscriber + Send + Sync
where
    FW: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    CW: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    T: FormatTime + Clone + Send + Sync + 'static,
{
    let file_layer = fmt::layer()
        .event_format(RecordFormat::with_timer(timer.clone()))
        .with_ansi(false)
        .with_writer(file_writer)
        .with_filter(LevelFilter::INFO);

    let console_layer = console_writer.map(|writer| {
        fmt::layer()
            .event_format(RecordFormat::with_timer(timer))
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(LevelFilter::DEBUG)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
}

fn file_writer(file_base: &Path) -> Result<LocalDailyWriter, LogSetupError> {
    let directory = file_base
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .ok_or_else(|| LogSetupError::InvalidFilePath(file_base.to_path_buf()))?;
    let prefix = file_base
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| LogSetupError::InvalidFilePath(file_base.to_path_buf()))?;

    LocalDailyWriter::new(directory, prefix).map_err(|source| LogSetupError::OpenLogFile {
        path: file_base.to_path_buf(),
        source,
    })
}

/// Log panics through the pipeline before handing off to the previous hook.
fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let message = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str));

        match (message, info.location()) {
            (Some(message), Some(location)) => tracing::error!(
                "panic '{}' at {}:{}",
                message,
                location.file(),
                location.line(),
            ),
            (Some(message), None) => tracing::error!("panic '{}'", message),
            (None, Some(location)) => {
                tracing::error!("panic at {}:{}", location.file(), location.line())
            }
            (None, None) => tracing::error!("panic"),
        }

        previous(info);
    }));
}
