use chrono::Utc;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone)]
enum LogLevel {
    Info(Color),
    Warn,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
    White,
}

impl Color {
    fn to_ansi_code(self) -> &'static str {
        match self {
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Blue => "\x1b[34m",
            Color::Yellow => "\x1b[33m",
            Color::Cyan => "\x1b[36m",
            Color::Magenta => "\x1b[35m",
            Color::White => "\x1b[37m",
        }
    }
}

/// Appends timestamped lines to a session log file, optionally echoing a
/// colored copy to stdout.
#[derive(Debug, Clone)]
pub struct Logger {
    log_file: PathBuf,
}

impl Logger {
    /// Creates a new `Logger` instance.
    ///
    /// # Parameters
    /// - `log_dir`: Directory where the log file lives. Created if missing.
    /// - `session`: Name of the log file, without extension.
    ///
    /// # Returns
    /// A new `Logger` writing to `<log_dir>/<session>.log`. An existing file
    /// with that name is truncated.
    pub fn new(log_dir: &Path, session: &str) -> Result<Self, LoggerError> {
        if log_dir.exists() && !log_dir.is_dir() {
            return Err(LoggerError::InvalidPath(format!(
                "{} is not a directory",
                log_dir.display()
            )));
        }
        std::fs::create_dir_all(log_dir)?;

        let sanitized = session.replace([':', '/', '\\'], "_");
        let log_file = log_dir.join(format!("{}.log", sanitized));

        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&log_file)?;

        Ok(Logger { log_file })
    }

    /// Path of the file this logger appends to.
    pub fn path(&self) -> &Path {
        &self.log_file
    }

    fn log(&self, level: LogLevel, message: &str, to_console: bool) -> Result<(), LoggerError> {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();
        let log_message = match &level {
            LogLevel::Info(_) => format!("[INFO] [{}]: {}\n", timestamp, message),
            LogLevel::Warn => format!("[WARN] [{}]: {}\n", timestamp, message),
            LogLevel::Error => format!("[ERROR] [{}]: {}\n", timestamp, message),
        };

        if to_console {
            let colored_message = match &level {
                LogLevel::Info(color) => format!("{}{}\x1b[0m", color.to_ansi_code(), log_message),
                LogLevel::Warn => format!("\x1b[93m{}\x1b[0m", log_message), // Bright Yellow
                LogLevel::Error => format!("\x1b[91m{}\x1b[0m", log_message), // Bright Red
            };
            print!("{}", colored_message);
            io::stdout().flush()?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)?;
        file.write_all(log_message.as_bytes())?;
        file.flush()?;

        Ok(())
    }

    /// Logs an informational message.
    ///
    /// # Parameters
    /// - `message`: The informational message to log.
    /// - `color`: The color to use for the console output.
    /// - `to_console`: Whether to log the message to the console as well.
    pub fn info(&self, message: &str, color: Color, to_console: bool) -> Result<(), LoggerError> {
        self.log(LogLevel::Info(color), message, to_console)
    }

    /// Logs a warning message.
    pub fn warn(&self, message: &str, to_console: bool) -> Result<(), LoggerError> {
        self.log(LogLevel::Warn, message, to_console)
    }

    /// Logs an error message.
    pub fn error(&self, message: &str, to_console: bool) -> Result<(), LoggerError> {
        self.log(LogLevel::Error, message, to_console)
    }
}

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("I/O Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid Path: {0}")]
    InvalidPath(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("logger_{}_{}", name, std::process::id()))
    }

    #[test]
    fn test_logger_creation_and_logging() {
        let log_dir = scratch_dir("levels");

        let logger = Logger::new(&log_dir, "session").expect("Failed to create logger");

        logger
            .info("Flight departed.", Color::Green, false)
            .expect("Failed to log info");
        logger.warn("Route skipped.", false).expect("Failed to log warn");
        logger.error("Speech failed.", false).expect("Failed to log error");

        let log_contents = fs::read_to_string(log_dir.join("session.log")).expect("Failed to read log file");

        assert!(log_contents.contains("[INFO]"), "INFO level missing in log");
        assert!(log_contents.contains("Flight departed."));
        assert!(log_contents.contains("[WARN]"));
        assert!(log_contents.contains("[ERROR]"));
        assert_eq!(log_contents.lines().count(), 3);

        fs::remove_dir_all(&log_dir).expect("Failed to remove test directory");
    }

    #[test]
    fn test_missing_directory_is_created() {
        let log_dir = scratch_dir("nested").join("deeper");

        let logger = Logger::new(&log_dir, "run:1").expect("Failed to create logger");

        assert!(logger.path().ends_with("run_1.log"));
        assert!(logger.path().exists());

        fs::remove_dir_all(log_dir.parent().unwrap_or(&log_dir)).ok();
    }

    #[test]
    fn test_file_as_directory_is_rejected() {
        let file_path = scratch_dir("plain_file");
        fs::write(&file_path, "not a directory").expect("Failed to create file");

        let result = Logger::new(&file_path, "session");
        assert!(matches!(result, Err(LoggerError::InvalidPath(_))));

        fs::remove_file(&file_path).ok();
    }
}
