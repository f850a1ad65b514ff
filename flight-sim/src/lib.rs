pub mod types;

pub use types::{
    config::SimConfig,
    flight::{Flight, FlightId},
    sequencer::{AnnouncementSequencer, AnnouncementTask},
    sim_error::SimError,
    simulation::Simulation,
};
