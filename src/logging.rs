use std::io::Write;

/// Log levels, ordered from quietest to noisiest
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Nothing = 0,
    User = 1,
    Error = 2,
    Warning = 3,
    Info = 4,
    Debug = 5,
    All = 6,
}

impl LogLevel {
    /// Create a LogLevel from an integer
    pub fn from_i32(level: i32) -> Self {
        match level {
            0 => LogLevel::Nothing,
            1 => LogLevel::User,
            2 => LogLevel::Error,
            3 => LogLevel::Warning,
            4 => LogLevel::Info,
            5 => LogLevel::Debug,
            6 => LogLevel::All,
            _ => LogLevel::Info,
        }
    }

    /// Get the integer representation
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    /// Matching `log` filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Nothing => log::LevelFilter::Off,
            LogLevel::User | LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::All => log::LevelFilter::Trace,
        }
    }

    fn to_level(self) -> Option<log::Level> {
        match self {
            LogLevel::Nothing => None,
            LogLevel::User | LogLevel::Error => Some(log::Level::Error),
            LogLevel::Warning => Some(log::Level::Warn),
            LogLevel::Info => Some(log::Level::Info),
            LogLevel::Debug => Some(log::Level::Debug),
            LogLevel::All => Some(log::Level::Trace),
        }
    }
}

/// Logger writing `[level] target: message` lines to stderr
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let _ = writeln!(
            std::io::stderr().lock(),
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

/// Install the stderr logger at `level`.
///
/// Returns false when another logger was installed first; the level is
/// applied either way.
pub fn log_init(level: LogLevel) -> bool {
    let installed = log::set_logger(&LOGGER).is_ok();
    log::set_max_level(level.to_level_filter());
    installed
}

/// Add a log entry
pub fn log_add(level: LogLevel, message: &str) {
    if let Some(level) = level.to_level() {
        log::log!(target: "subtitle_system", level, "{}", message);
    }
}

/// Convenience macro for fatal errors
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)*) => {
        $crate::logging::log_add($crate::logging::LogLevel::User, &format!($($arg)*))
    };
}

/// Convenience macro for errors
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logging::log_add($crate::logging::LogLevel::Error, &format!($($arg)*))
    };
}

/// Convenience macro for warnings
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::logging::log_add($crate::logging::LogLevel::Warning, &format!($($arg)*))
    };
}

/// Convenience macro for info messages
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logging::log_add($crate::logging::LogLevel::Info, &format!($($arg)*))
    };
}

/// Convenience macro for debug messages
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logging::log_add($crate::logging::LogLevel::Debug, &format!($($arg)*))
    };
}
