use std::collections::VecDeque;
use std::fmt;

use logger::Color;

use super::{
    board::FlightBoard,
    event::{NarrationOutcome, NarrationTicket},
    event_log::EventLog,
    flight::FlightId,
    speech::SpeechEngine,
};

/// Runs once the task's narration has finished, spoken or not.
pub type Completion = Box<dyn FnOnce(&mut FlightBoard)>;

/// One unit of narration work.
pub struct AnnouncementTask {
    pub flight_id: Option<FlightId>,
    pub text: String,
    on_complete: Option<Completion>,
}

impl AnnouncementTask {
    pub fn new(flight_id: Option<FlightId>, text: impl Into<String>) -> Self {
        AnnouncementTask {
            flight_id,
            text: text.into(),
            on_complete: None,
        }
    }

    pub fn on_complete(mut self, completion: impl FnOnce(&mut FlightBoard) + 'static) -> Self {
        self.on_complete = Some(Box::new(completion));
        self
    }

    fn complete(self, board: &mut FlightBoard) {
        if let Some(completion) = self.on_complete {
            completion(board);
        }
    }
}

impl fmt::Debug for AnnouncementTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnouncementTask")
            .field("flight_id", &self.flight_id)
            .field("text", &self.text)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

struct InFlight {
    ticket: NarrationTicket,
    task: AnnouncementTask,
}

/// Serializes narration: one utterance at a time, cancellations before
/// anything else.
///
/// Enqueueing only appends. Draining starts with `drain`, which the owner
/// calls once it has finished enqueueing for the current turn; tasks queued
/// in the same turn are therefore ordered by priority before the first one
/// is spoken. A narration already being spoken is never interrupted.
pub struct AnnouncementSequencer<S: SpeechEngine> {
    cancellations: VecDeque<AnnouncementTask>,
    normal: VecDeque<AnnouncementTask>,
    draining: bool,
    current_flight: Option<FlightId>,
    in_flight: Option<InFlight>,
    next_ticket: u64,
    speech: S,
    locale: String,
    log: EventLog,
}

impl<S: SpeechEngine> AnnouncementSequencer<S> {
    pub fn new(speech: S, locale: &str, log: EventLog) -> Self {
        AnnouncementSequencer {
            cancellations: VecDeque::new(),
            normal: VecDeque::new(),
            draining: false,
            current_flight: None,
            in_flight: None,
            next_ticket: 0,
            speech,
            locale: locale.to_string(),
            log,
        }
    }

    pub fn enqueue_cancellation(&mut self, task: AnnouncementTask) {
        self.cancellations.push_back(task);
    }

    pub fn enqueue_normal(&mut self, task: AnnouncementTask) {
        self.normal.push_back(task);
    }

    /// Starts draining if idle. While a narration is in progress this does
    /// nothing; the queues are picked up again when it finishes.
    pub fn drain(&mut self, board: &mut FlightBoard) {
        if self.draining {
            return;
        }
        self.draining = true;
        self.next(board);
    }

    /// Continuation for the narration identified by `ticket`. Completions
    /// for any other ticket are ignored.
    pub fn narration_finished(
        &mut self,
        board: &mut FlightBoard,
        ticket: NarrationTicket,
        outcome: NarrationOutcome,
    ) {
        let in_flight = match self.in_flight.take() {
            Some(in_flight) if in_flight.ticket == ticket => in_flight,
            other => {
                self.in_flight = other;
                self.log
                    .warn(&format!("Ignoring completion for stale narration {:?}", ticket));
                return;
            }
        };

        match outcome {
            NarrationOutcome::Spoken => self.log.info(
                &format!("Finished announcement {:?}", in_flight.ticket),
                Color::White,
            ),
            NarrationOutcome::Failed(reason) => self.log.warn(&format!(
                "Announcement {:?} failed: {}",
                in_flight.ticket, reason
            )),
        }

        in_flight.task.complete(board);
        self.next(board);
    }

    fn next(&mut self, board: &mut FlightBoard) {
        loop {
            let task = match self
                .cancellations
                .pop_front()
                .or_else(|| self.normal.pop_front())
            {
                Some(task) => task,
                None => {
                    self.current_flight = None;
                    self.draining = false;
                    return;
                }
            };

            self.current_flight = task.flight_id;
            if let Some(flight_id) = task.flight_id {
                board.move_to_front(flight_id);
            }

            let ticket = NarrationTicket(self.next_ticket);
            self.next_ticket += 1;

            match self.speech.speak(ticket, &task.text, &self.locale) {
                Ok(()) => {
                    self.log.info(
                        &format!("Announcing {:?} for flight {:?}", ticket, task.flight_id),
                        Color::Yellow,
                    );
                    self.in_flight = Some(InFlight { ticket, task });
                    return;
                }
                Err(e) => {
                    self.log
                        .warn(&format!("Could not start announcement {:?}: {}", ticket, e));
                    task.complete(board);
                }
            }
        }
    }

    pub fn is_draining(&self) -> bool {
        self.draining
    }

    /// The flight being narrated right now, if any.
    pub fn current_flight(&self) -> Option<FlightId> {
        self.current_flight
    }

    pub fn current_text(&self) -> Option<&str> {
        self.in_flight
            .as_ref()
            .map(|in_flight| in_flight.task.text.as_str())
    }

    pub fn current_ticket(&self) -> Option<NarrationTicket> {
        self.in_flight.as_ref().map(|in_flight| in_flight.ticket)
    }

    /// Queued tasks as `(cancellations, normal)`, excluding the one being spoken.
    pub fn pending(&self) -> (usize, usize) {
        (self.cancellations.len(), self.normal.len())
    }

    pub fn speech(&self) -> &S {
        &self.speech
    }
}
