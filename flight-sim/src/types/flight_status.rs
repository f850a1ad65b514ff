use std::fmt;

use super::sim_error::SimError;

/// Represents the various statuses a generated flight can have.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum FlightStatus {
    OnTime,
    Delayed,
    Boarding,
    Cancelled,
}

impl FlightStatus {
    pub const ALL: [FlightStatus; 4] = [
        FlightStatus::OnTime,
        FlightStatus::Delayed,
        FlightStatus::Boarding,
        FlightStatus::Cancelled,
    ];

    /// Converts the `FlightStatus` variant to its corresponding string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::OnTime => "on time",
            FlightStatus::Delayed => "delayed",
            FlightStatus::Boarding => "boarding",
            FlightStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative weights used when drawing the status of a new flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusWeights {
    pub on_time: u32,
    pub delayed: u32,
    pub boarding: u32,
    pub cancelled: u32,
}

impl StatusWeights {
    /// Weights in the same order as `FlightStatus::ALL`.
    pub fn as_array(&self) -> [u32; 4] {
        [self.on_time, self.delayed, self.boarding, self.cancelled]
    }

    pub fn total(&self) -> u32 {
        self.as_array().iter().sum()
    }

    /// Parses `on_time,delayed,boarding,cancelled`, e.g. `90,3,2,5`.
    pub fn parse(weights: &str) -> Result<Self, SimError> {
        let values = weights
            .split(',')
            .map(|w| w.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SimError::InvalidWeights(format!("{}: {}", weights, e)))?;

        match values.as_slice() {
            [on_time, delayed, boarding, cancelled] => Ok(StatusWeights {
                on_time: *on_time,
                delayed: *delayed,
                boarding: *boarding,
                cancelled: *cancelled,
            }),
            _ => Err(SimError::InvalidWeights(format!(
                "expected four comma-separated weights, got {}",
                weights
            ))),
        }
    }
}

impl Default for StatusWeights {
    fn default() -> Self {
        StatusWeights {
            on_time: 90,
            delayed: 3,
            boarding: 2,
            cancelled: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(FlightStatus::OnTime.to_string(), "on time");
        assert_eq!(FlightStatus::Cancelled.to_string(), "cancelled");
        assert_eq!(FlightStatus::ALL.len(), 4);
    }

    #[test]
    fn test_weights_parse() {
        let weights = StatusWeights::parse("80, 10,5,5").expect("valid weights");
        assert_eq!(weights.as_array(), [80, 10, 5, 5]);
        assert_eq!(weights.total(), 100);

        assert!(StatusWeights::parse("1,2,3").is_err());
        assert!(StatusWeights::parse("a,b,c,d").is_err());
    }
}
