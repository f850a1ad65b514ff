use chrono::NaiveDateTime;
use logger::Color;
use rand::Rng;

use super::{
    board::FlightBoard,
    config::SimConfig,
    event::{NarrationOutcome, NarrationTicket},
    event_log::EventLog,
    flight::{Flight, FlightId, Progress},
    generator::FlightGenerator,
    presentation::{self, DashboardView},
    reference::ReferenceData,
    sequencer::{AnnouncementSequencer, AnnouncementTask},
    services::{AudioClip, AudioCues, MapView},
    sim_error::SimError,
    speech::SpeechEngine,
};

/// What a single tick did.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TickReport {
    pub moved: usize,
    pub landed: Vec<FlightId>,
    pub cancellations_announced: Vec<FlightId>,
    pub departed: Option<FlightId>,
}

/// Manages the overall state of the simulation.
///
/// Owns the flight board, the announcement sequencer and the collaborators
/// they drive. Every method runs on the event loop; nothing here is shared
/// across threads.
pub struct Simulation<S: SpeechEngine, M: MapView, A: AudioCues> {
    board: FlightBoard,
    sequencer: AnnouncementSequencer<S>,
    generator: FlightGenerator,
    map: M,
    audio: A,
    log: EventLog,
    spawn_probability: f64,
    recenter_zoom: u8,
    focus_zoom: u8,
    last_id: FlightId,
}

impl<S: SpeechEngine, M: MapView, A: AudioCues> Simulation<S, M, A> {
    /// Create a new simulation
    pub fn new(
        config: &SimConfig,
        reference: ReferenceData,
        speech: S,
        map: M,
        audio: A,
        log: EventLog,
    ) -> Result<Self, SimError> {
        config.validate()?;
        let generator = FlightGenerator::with_seed(
            config.seed,
            reference,
            config.status_weights,
            config.route_points,
        )?;

        Ok(Simulation {
            board: FlightBoard::new(config.landed_capacity),
            sequencer: AnnouncementSequencer::new(speech, &config.locale, log.clone()),
            generator,
            map,
            audio,
            log,
            spawn_probability: config.spawn_probability,
            recenter_zoom: config.recenter_zoom,
            focus_zoom: config.focus_zoom,
            last_id: 0,
        })
    }

    /// Advances every active flight one waypoint, lands the ones past the
    /// end of their route, queues cancellation notices, and maybe launches a
    /// new flight. Announcements queued here start draining at the end of
    /// the tick.
    pub fn tick(&mut self, time: NaiveDateTime) -> TickReport {
        let mut report = TickReport::default();
        let mut cancellations = Vec::new();
        let mut landed = Vec::new();

        let flights = self.board.take_flights();
        let mut remaining = Vec::with_capacity(flights.len());
        for mut flight in flights {
            if flight.is_cancelled() {
                if !flight.cancellation_announced {
                    flight.cancellation_announced = true;
                    let id = flight.id;
                    cancellations.push(
                        AnnouncementTask::new(Some(id), flight.cancellation_announcement())
                            .on_complete(move |board| {
                                board.remove(id);
                            }),
                    );
                    report.cancellations_announced.push(id);
                }
                remaining.push(flight);
                continue;
            }

            match flight.advance() {
                Progress::Moved => {
                    report.moved += 1;
                    remaining.push(flight);
                }
                Progress::Landed => landed.push(flight),
            }
        }
        self.board.set_flights(remaining);

        for task in cancellations {
            self.sequencer.enqueue_cancellation(task);
        }
        for flight in landed {
            report.landed.push(flight.id);
            self.land(flight);
        }

        let spawn_probability = self.spawn_probability;
        if self.generator.rng().gen_bool(spawn_probability) {
            report.departed = self.depart(time);
        }

        self.sequencer.drain(&mut self.board);
        report
    }

    fn land(&mut self, flight: Flight) {
        self.audio.play(AudioClip::Landing);
        match self.generator.reference().destination_coordinates(&flight.destination) {
            Ok(position) => self.map.fly_to(position, self.recenter_zoom),
            Err(e) => self.log.warn(&format!("{}, not recentering on landing", e)),
        }

        self.log.info(
            &format!("Flight {} landed in {}", flight.id, flight.destination),
            Color::Green,
        );
        self.sequencer.enqueue_normal(AnnouncementTask::new(
            Some(flight.id),
            flight.welcome_announcement(),
        ));
        self.board.record_landing(flight);
    }

    fn depart(&mut self, time: NaiveDateTime) -> Option<FlightId> {
        let id = self.next_id(time);
        let flight = match self.generator.generate(id) {
            Ok(flight) => flight,
            Err(e) => {
                self.log.warn(&format!("Skipping new flight this tick: {}", e));
                return None;
            }
        };

        self.audio.play(AudioClip::Flyby);
        self.audio.play(AudioClip::Departure);

        let reference = self.generator.reference();
        let origin = reference.origin_coordinates(&flight.origin);
        let destination = reference.destination_coordinates(&flight.destination);
        match &origin {
            Ok(position) => self.map.fly_to(*position, self.recenter_zoom),
            Err(e) => self.log.warn(&format!("{}, not recentering on departure", e)),
        }

        self.log.info(
            &format!(
                "Flight {} {} → {} ({}, {})",
                flight.id, flight.origin, flight.destination, flight.carrier, flight.status
            ),
            Color::Cyan,
        );

        if !flight.is_cancelled() {
            let minutes = match (origin, destination) {
                (Ok(origin), Ok(destination)) => flight.estimated_minutes(origin, destination),
                _ => 0,
            };
            self.sequencer.enqueue_normal(AnnouncementTask::new(
                Some(flight.id),
                flight.departure_announcement(minutes),
            ));
        }

        self.board.push_front(flight);
        Some(id)
    }

    /// Millisecond timestamp of `time`, bumped past the previous id if needed.
    fn next_id(&mut self, time: NaiveDateTime) -> FlightId {
        let stamp = time.and_utc().timestamp_millis().max(0) as FlightId;
        let id = stamp.max(self.last_id + 1);
        self.last_id = id;
        id
    }

    /// Continuation for a finished narration.
    pub fn narration_finished(&mut self, ticket: NarrationTicket, outcome: NarrationOutcome) {
        self.sequencer
            .narration_finished(&mut self.board, ticket, outcome);
    }

    /// Recenters the map on the `index`-th flight of the panel (0-based).
    pub fn focus(&mut self, index: usize) -> bool {
        presentation::focus_flight(&self.board, index, &mut self.map, self.focus_zoom).is_some()
    }

    /// Pushes the current markers to the map.
    pub fn render_map(&mut self) {
        let markers = presentation::markers(&self.board, self.sequencer.current_flight(), &self.log);
        self.map.render(&markers);
    }

    pub fn dashboard(&self, map_frame: &[String], paused: bool) -> String {
        let view = DashboardView {
            announced: self.sequencer.current_flight(),
            now_announcing: self.sequencer.current_text(),
            pending: self.sequencer.pending(),
            map_frame,
            paused,
        };
        presentation::render_dashboard(&self.board, &view)
    }

    pub fn board(&self) -> &FlightBoard {
        &self.board
    }

    /// Direct board access, for seeding flights.
    pub fn board_mut(&mut self) -> &mut FlightBoard {
        &mut self.board
    }

    pub fn sequencer(&self) -> &AnnouncementSequencer<S> {
        &self.sequencer
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }
}
