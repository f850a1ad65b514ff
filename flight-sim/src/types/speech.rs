use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use logger::Color;
use threadpool::ThreadPool;

use super::{
    event::{Event, NarrationOutcome, NarrationTicket},
    event_log::EventLog,
    sim_error::SimError,
};

/// Speech output. `speak` returns as soon as the utterance is started; the
/// engine later reports exactly one `Event::NarrationFinished` for the ticket,
/// whether the utterance was spoken or not.
pub trait SpeechEngine {
    fn speak(&mut self, ticket: NarrationTicket, text: &str, locale: &str) -> Result<(), SimError>;
}

/// Reads utterances out into the session log, paced like speech, on a
/// worker pool.
pub struct ConsoleSpeech {
    pool: ThreadPool,
    events: Sender<Event>,
    words_per_minute: u32,
    log: EventLog,
}

impl ConsoleSpeech {
    pub fn new(pool: ThreadPool, events: Sender<Event>, words_per_minute: u32, log: EventLog) -> Self {
        ConsoleSpeech {
            pool,
            events,
            words_per_minute,
            log,
        }
    }

    /// Waits for utterances already started to finish.
    pub fn join(&self) {
        self.pool.join();
    }
}

impl SpeechEngine for ConsoleSpeech {
    fn speak(&mut self, ticket: NarrationTicket, text: &str, locale: &str) -> Result<(), SimError> {
        if text.trim().is_empty() {
            return Err(SimError::SpeechError("nothing to say".to_string()));
        }

        let events = self.events.clone();
        let log = self.log.clone();
        let text = text.to_string();
        let locale = locale.to_string();
        let duration = utterance_duration(&text, self.words_per_minute);

        self.pool.execute(move || {
            let outcome = match panic::catch_unwind(AssertUnwindSafe(|| {
                log.info(&format!("[{}] {}", locale, text), Color::Magenta);
                thread::sleep(duration);
            })) {
                Ok(()) => NarrationOutcome::Spoken,
                Err(_) => NarrationOutcome::Failed("speech worker panicked".to_string()),
            };

            if events
                .send(Event::NarrationFinished { ticket, outcome })
                .is_err()
            {
                log.warn(&format!("Narration {:?} finished after the event loop closed", ticket));
            }
        });

        Ok(())
    }
}

/// How long `text` takes to say at the given pace.
pub fn utterance_duration(text: &str, words_per_minute: u32) -> Duration {
    let words = text.split_whitespace().count() as u64;
    Duration::from_millis(words * 60_000 / u64::from(words_per_minute.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_utterance_duration() {
        assert_eq!(utterance_duration("one two three", 60), Duration::from_secs(3));
        assert_eq!(utterance_duration("", 160), Duration::ZERO);
        // a zero pace is clamped rather than dividing by zero
        assert_eq!(utterance_duration("word", 0), Duration::from_secs(60));
    }

    #[test]
    fn test_console_speech_reports_completion() {
        let (tx, rx) = mpsc::channel();
        let mut speech = ConsoleSpeech::new(ThreadPool::new(1), tx, 60_000, EventLog::disabled());

        speech
            .speak(NarrationTicket(7), "Welcome to Lima.", "en-US")
            .expect("speech should start");

        let event = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("completion should arrive");
        assert_eq!(
            event,
            Event::NarrationFinished {
                ticket: NarrationTicket(7),
                outcome: NarrationOutcome::Spoken,
            }
        );
    }

    #[test]
    fn test_join_waits_for_started_utterances() {
        let (tx, rx) = mpsc::channel();
        let mut speech = ConsoleSpeech::new(ThreadPool::new(2), tx, 600, EventLog::disabled());

        speech
            .speak(NarrationTicket(1), "Flight to Lima departing.", "en-US")
            .expect("speech should start");
        speech
            .speak(NarrationTicket(2), "Welcome to Tokyo.", "en-US")
            .expect("speech should start");
        speech.join();

        let mut tickets: Vec<u64> = rx.try_iter().map(|event| match event {
            Event::NarrationFinished { ticket, .. } => ticket.0,
            other => panic!("unexpected event: {:?}", other),
        }).collect();
        tickets.sort_unstable();
        assert_eq!(tickets, vec![1, 2]);
    }

    #[test]
    fn test_blank_utterance_is_refused() {
        let (tx, _rx) = mpsc::channel();
        let mut speech = ConsoleSpeech::new(ThreadPool::new(1), tx, 160, EventLog::disabled());

        assert!(speech.speak(NarrationTicket(1), "   ", "en-US").is_err());
    }
}
