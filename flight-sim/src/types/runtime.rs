use std::sync::mpsc::Receiver;

use super::{
    event::{Command, Event},
    services::{AudioCues, MapView},
    simulation::Simulation,
    sim_error::SimError,
    speech::SpeechEngine,
};

/// Clock controls the event loop needs; implemented by `Timer`.
pub trait Clock {
    fn pause(&self);
    fn resume(&self);
    fn is_paused(&self) -> bool;
    fn set_tick_advance(&self, minutes: i64) -> Result<(), SimError>;
}

impl Clock for super::timer::Timer {
    fn pause(&self) {
        super::timer::Timer::pause(self);
    }

    fn resume(&self) {
        super::timer::Timer::resume(self);
    }

    fn is_paused(&self) -> bool {
        super::timer::Timer::is_paused(self)
    }

    fn set_tick_advance(&self, minutes: i64) -> Result<(), SimError> {
        super::timer::Timer::set_tick_advance(self, minutes)
    }
}

/// Why the event loop returned.
#[derive(Debug, PartialEq, Eq)]
pub enum Shutdown {
    Requested,
    SendersGone,
}

/// Handles events one at a time until `exit` is requested or every sender
/// is dropped. `on_change` runs after each event that may have changed what
/// is on screen.
pub fn run_event_loop<S, M, A, C, F>(
    sim: &mut Simulation<S, M, A>,
    events: &Receiver<Event>,
    clock: &C,
    mut on_change: F,
) -> Result<Shutdown, SimError>
where
    S: SpeechEngine,
    M: MapView,
    A: AudioCues,
    C: Clock,
    F: FnMut(&mut Simulation<S, M, A>, bool) -> Result<(), SimError>,
{
    for event in events.iter() {
        match event {
            Event::Tick { time, .. } => {
                sim.tick(time);
            }
            Event::NarrationFinished { ticket, outcome } => {
                sim.narration_finished(ticket, outcome);
            }
            Event::Command(Command::Focus(number)) => {
                if !number.checked_sub(1).is_some_and(|index| sim.focus(index)) {
                    eprintln!("Flight {} cannot be focused.", number);
                }
            }
            Event::Command(Command::Speed(minutes)) => {
                if let Err(e) = clock.set_tick_advance(minutes) {
                    eprintln!("{}", e);
                    continue;
                }
            }
            Event::Command(Command::Pause) => clock.pause(),
            Event::Command(Command::Resume) => clock.resume(),
            Event::Command(Command::Help) => {
                print_help();
                continue;
            }
            Event::Command(Command::Exit) => return Ok(Shutdown::Requested),
        }
        on_change(sim, clock.is_paused())?;
    }
    Ok(Shutdown::SendersGone)
}

pub fn print_help() {
    println!("Available commands:");
    println!("  focus <n>");
    println!("    Centres the map on the n-th flight of the panel.");
    println!("  speed <minutes>");
    println!("    Sets how many simulated minutes pass per tick (1 to 10000).");
    println!("  pause");
    println!("    Pauses the simulation clock.");
    println!("  resume");
    println!("    Resumes the simulation clock.");
    println!("  exit");
    println!("    Closes this application.");
}
