use std::path::PathBuf;

use clap::Parser;

use super::{flight_status::StatusWeights, sim_error::SimError};

/// Runtime settings. Defaults reproduce the stock simulation.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "flight-announcer",
    about = "Simulated air traffic with spoken departure, arrival and cancellation announcements"
)]
pub struct SimConfig {
    /// Real time between simulation ticks, in milliseconds.
    #[arg(long, default_value_t = 4000)]
    pub tick_millis: u64,

    /// Simulated minutes that pass on each tick.
    #[arg(long, default_value_t = 1)]
    pub tick_advance_minutes: i64,

    /// Chance of a new flight on each tick.
    #[arg(long, default_value_t = 0.96)]
    pub spawn_probability: f64,

    /// Segments per great-circle route; routes hold one more waypoint than this.
    #[arg(long, default_value_t = 30)]
    pub route_points: usize,

    /// Locale passed to the speech engine.
    #[arg(long, default_value = "en-US")]
    pub locale: String,

    #[arg(long, default_value_t = 160)]
    pub words_per_minute: u32,

    /// Worker threads available to the speech engine.
    #[arg(long, default_value_t = 2)]
    pub speech_workers: usize,

    #[arg(long, default_value_t = 10)]
    pub landed_capacity: usize,

    /// Zoom used when the map follows a departure or a landing.
    #[arg(long, default_value_t = 10)]
    pub recenter_zoom: u8,

    /// Zoom used when focusing a flight from the panel.
    #[arg(long, default_value_t = 13)]
    pub focus_zoom: u8,

    /// Status weights as on_time,delayed,boarding,cancelled.
    #[arg(long, default_value = "90,3,2,5", value_parser = StatusWeights::parse)]
    pub status_weights: StatusWeights,

    /// Seed for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,

    /// Echo log lines to the terminal.
    #[arg(long)]
    pub verbose: bool,

    /// Ring the terminal bell for audio cues.
    #[arg(long)]
    pub bell: bool,
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        if self.tick_millis == 0 {
            return Err(SimError::InvalidConfig("tick period must be positive".to_string()));
        }
        if self.tick_advance_minutes <= 0 || self.tick_advance_minutes > 10000 {
            return Err(SimError::InvalidConfig(format!(
                "tick advance out of range: {}",
                self.tick_advance_minutes
            )));
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(SimError::InvalidConfig(format!(
                "spawn probability must be within [0, 1], got {}",
                self.spawn_probability
            )));
        }
        if self.route_points == 0 {
            return Err(SimError::InvalidConfig("routes need at least one segment".to_string()));
        }
        if self.words_per_minute == 0 || self.speech_workers == 0 {
            return Err(SimError::InvalidConfig(
                "speech pace and workers must be positive".to_string(),
            ));
        }
        if self.status_weights.total() == 0 {
            return Err(SimError::InvalidWeights("weights sum to zero".to_string()));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig::parse_from(["flight-announcer"])
    }
}
