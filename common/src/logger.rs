use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
}

pub struct Logger {
    prefix: Option<String>,
    min_level: LogLevel,
}

impl Logger {
    fn new(prefix: Option<String>, verbose: bool) -> Self {
        let min_level = if verbose { LogLevel::Debug } else { LogLevel::Info };
        Self { prefix, min_level }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn log(&self, level: LogLevel, location: &str, message: &str) {
        if !self.enabled(level) {
            return;
        }
        println!("{}", self.format(location, message));
    }

    fn format(&self, location: &str, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        match self.prefix {
            Some(ref prefix) => format!("[{}][{}][{}] {}", timestamp, prefix, location, message),
            None => format!("[{}][{}] {}", timestamp, location, message),
        }
    }
}

/// First call wins; later calls are ignored.
pub fn init_logger(prefix: Option<String>, verbose: bool) {
    LOGGER.get_or_init(|| Logger::new(prefix, verbose));
}

/// Messages before `init_logger` are dropped, so library code and tests can
/// log freely.
pub fn log(level: LogLevel, file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(level, &format!("{}:{}", file, line), message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(
            $crate::logger::LogLevel::Info,
            file!(),
            line!(),
            &format!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::logger::log(
            $crate::logger::LogLevel::Debug,
            file!(),
            line!(),
            &format!($($arg)*),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_enables_debug() {
        let quiet = Logger::new(None, false);
        assert!(!quiet.enabled(LogLevel::Debug));
        assert!(quiet.enabled(LogLevel::Info));

        let verbose = Logger::new(None, true);
        assert!(verbose.enabled(LogLevel::Debug));
    }

    #[test]
    fn test_format_includes_prefix_and_location() {
        let logger = Logger::new(Some("arena".to_string()), false);
        let line = logger.format("board.rs:10", "round started");
        assert!(line.contains("[arena][board.rs:10] round started"));

        let plain = Logger::new(None, false).format("board.rs:10", "round started");
        assert!(plain.ends_with("[board.rs:10] round started"));
    }
}
