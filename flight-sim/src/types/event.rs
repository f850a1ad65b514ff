use chrono::NaiveDateTime;

use super::sim_error::SimError;

/// Identifies one started narration. Completions carry it back so a
/// sequencer can tell the current narration from a stale one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NarrationTicket(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrationOutcome {
    Spoken,
    Failed(String),
}

/// User requests read from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Recenter the map on the n-th flight of the panel (1-based).
    Focus(usize),
    /// Simulated minutes the clock advances per tick.
    Speed(i64),
    Pause,
    Resume,
    Help,
    Exit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, SimError> {
        let args: Vec<&str> = line.split_whitespace().collect();
        match args.as_slice() {
            ["focus", index] => index
                .parse::<usize>()
                .ok()
                .filter(|index| *index > 0)
                .map(Command::Focus)
                .ok_or_else(|| SimError::InvalidCommand(format!("invalid flight number: {}", index))),
            ["speed", minutes] => minutes
                .parse::<i64>()
                .map(Command::Speed)
                .map_err(|_| SimError::InvalidCommand(format!("invalid minutes per tick: {}", minutes))),
            ["pause"] => Ok(Command::Pause),
            ["resume"] => Ok(Command::Resume),
            ["-h"] | ["help"] => Ok(Command::Help),
            ["exit"] | ["q"] => Ok(Command::Exit),
            _ => Err(SimError::InvalidCommand(line.trim().to_string())),
        }
    }
}

/// Everything the event loop reacts to, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Tick { time: NaiveDateTime, count: usize },
    NarrationFinished {
        ticket: NarrationTicket,
        outcome: NarrationOutcome,
    },
    Command(Command),
}
