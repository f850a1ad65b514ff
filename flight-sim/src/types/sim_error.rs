use logger::LoggerError;
use thiserror::Error;

/// Represents errors that can occur in the flight announcer.
#[derive(Debug, Error)]
pub enum SimError {
    /// The great-circle distance between the two points is undefined.
    #[error("Cannot build a route from {origin} to {destination}")]
    InvalidRoute { origin: String, destination: String },
    #[error("No destinations configured")]
    NoDestinations,
    #[error("No origins configured")]
    NoOrigins,
    /// A city name is missing from the coordinate tables.
    #[error("Unknown location: {0}")]
    UnknownLocation(String),
    #[error("Invalid status weights: {0}")]
    InvalidWeights(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("Timer start error: {0}")]
    TimerStartError(String),
    #[error("Timer lock error: {0}")]
    TimerLockError(String),
    #[error("Speech error: {0}")]
    SpeechError(String),
    #[error("{0}")]
    Other(String),
    #[error("Event channel closed")]
    ChannelClosed,
    #[error("Logger error: {0}")]
    Logger(#[from] LoggerError),
}
