use std::path::Path;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use logger::{Color, Logger};

use super::sim_error::SimError;

/// Simulation-facing handle over the session `Logger`.
///
/// Logging never interrupts the simulation: a failed write is reported on
/// stderr the first time it happens and ignored afterwards.
#[derive(Debug, Clone)]
pub struct EventLog {
    logger: Option<Logger>,
    to_console: bool,
    failed: Arc<AtomicBool>,
}

impl EventLog {
    pub fn open(log_dir: &Path, session: &str, to_console: bool) -> Result<Self, SimError> {
        Ok(EventLog {
            logger: Some(Logger::new(log_dir, session)?),
            to_console,
            failed: Arc::new(AtomicBool::new(false)),
        })
    }

    /// A log that drops everything.
    pub fn disabled() -> Self {
        EventLog {
            logger: None,
            to_console: false,
            failed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn info(&self, message: &str, color: Color) {
        if let Some(logger) = &self.logger {
            self.report(logger.info(message, color, self.to_console));
        }
    }

    pub fn warn(&self, message: &str) {
        if let Some(logger) = &self.logger {
            self.report(logger.warn(message, self.to_console));
        }
    }

    pub fn error(&self, message: &str) {
        if let Some(logger) = &self.logger {
            self.report(logger.error(message, self.to_console));
        }
    }

    fn report(&self, result: Result<(), logger::LoggerError>) {
        if let Err(e) = result {
            if !self.failed.swap(true, Ordering::SeqCst) {
                eprintln!("Logging disabled after write failure: {}", e);
            }
        }
    }
}
