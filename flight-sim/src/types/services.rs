use std::io::{self, Write};

use logger::Color;

use super::{airport::GeoPoint, event_log::EventLog, flight::FlightId};

/// What the map draws for one active flight.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightMarker {
    pub flight_id: FlightId,
    pub label: String,
    pub position: GeoPoint,
    pub heading: f64,
    pub route: Vec<GeoPoint>,
    pub route_index: usize,
    pub cancelled: bool,
    /// Announced flights get a permanent tooltip.
    pub announced: bool,
    pub tooltip: String,
}

/// Map collaborator. Both calls are fire-and-forget.
pub trait MapView {
    fn fly_to(&mut self, target: GeoPoint, zoom: u8);
    fn render(&mut self, markers: &[FlightMarker]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioClip {
    Flyby,
    Departure,
    Landing,
}

impl AudioClip {
    pub fn file_name(&self) -> &'static str {
        match self {
            AudioClip::Flyby => "flyby.mp3",
            AudioClip::Departure => "departure.mp3",
            AudioClip::Landing => "landing.mp3",
        }
    }
}

/// Audio-cue collaborator.
pub trait AudioCues {
    fn play(&mut self, clip: AudioClip);
}

/// Text rendition of the map: remembers the last recenter and keeps one
/// line per marker for the dashboard to print.
pub struct ConsoleMap {
    center: Option<(GeoPoint, u8)>,
    frame: Vec<String>,
    log: EventLog,
}

impl ConsoleMap {
    pub fn new(log: EventLog) -> Self {
        ConsoleMap {
            center: None,
            frame: Vec::new(),
            log,
        }
    }

    pub fn center(&self) -> Option<(GeoPoint, u8)> {
        self.center
    }

    pub fn frame(&self) -> &[String] {
        &self.frame
    }
}

impl MapView for ConsoleMap {
    fn fly_to(&mut self, target: GeoPoint, zoom: u8) {
        self.log
            .info(&format!("Map centred on {} at zoom {}", target, zoom), Color::Blue);
        self.center = Some((target, zoom));
    }

    fn render(&mut self, markers: &[FlightMarker]) {
        self.frame = markers
            .iter()
            .map(|marker| {
                let glyph = if marker.cancelled { 'x' } else { '>' };
                let mut line = format!(
                    "{} {:<32} {} hdg {:03.0} [{}/{}]",
                    glyph,
                    marker.label,
                    marker.position,
                    marker.heading,
                    marker.route_index + 1,
                    marker.route.len()
                );
                if marker.announced {
                    line.push_str(&format!("  << {}", marker.tooltip));
                }
                line
            })
            .collect();
    }
}

pub struct ConsoleAudio {
    bell: bool,
    log: EventLog,
}

impl ConsoleAudio {
    pub fn new(bell: bool, log: EventLog) -> Self {
        ConsoleAudio { bell, log }
    }
}

impl AudioCues for ConsoleAudio {
    fn play(&mut self, clip: AudioClip) {
        self.log
            .info(&format!("Playing {}", clip.file_name()), Color::Cyan);
        if self.bell {
            print!("\x07");
            io::stdout().flush().ok();
        }
    }
}
