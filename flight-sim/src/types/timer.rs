use chrono::{Duration, NaiveDateTime};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, RwLock,
    },
    thread::{self, JoinHandle},
    time::{Duration as StdDuration, Instant},
};

use super::sim_error::SimError;

/// A timer for driving the simulation clock, with support for pausing and
/// resuming.
///
/// The `Timer` tracks the current simulation time, advances it on each tick,
/// and hands the new time to a callback running on the timer thread.
pub struct Timer {
    pub current_time: Mutex<NaiveDateTime>,
    pub tick_advance: RwLock<Duration>,
    period: StdDuration,
    pub running: AtomicBool,
    pub paused: AtomicBool,
}

impl Timer {
    /// Creates new timer
    pub fn new(start_time: NaiveDateTime, tick_advance_minutes: i64, period: StdDuration) -> Arc<Self> {
        Arc::new(Self {
            current_time: Mutex::new(start_time),
            tick_advance: RwLock::new(Duration::minutes(tick_advance_minutes)),
            period,
            running: AtomicBool::new(true),
            paused: AtomicBool::new(false),
        })
    }

    /// Changes the value of time advanced per tick
    pub fn set_tick_advance(&self, new_tick_advance_minutes: i64) -> Result<(), SimError> {
        if new_tick_advance_minutes <= 0 || new_tick_advance_minutes > 10000 {
            return Err(SimError::InvalidConfig(format!(
                "invalid tick advance: {}",
                new_tick_advance_minutes
            )));
        }

        let mut tick_advance_lock = self.tick_advance.write().map_err(|_| {
            SimError::TimerLockError("Failed to acquire write lock for tick_advance.".to_string())
        })?;
        *tick_advance_lock = Duration::minutes(new_tick_advance_minutes);
        Ok(())
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Starts the timer thread, calling `tick_callback` once per period with
    /// the advanced time and the tick count. An error from the callback
    /// stops the timer.
    pub fn start(
        self: Arc<Self>,
        tick_callback: impl Fn(NaiveDateTime, usize) -> Result<(), SimError> + Send + 'static,
    ) -> Result<JoinHandle<()>, SimError> {
        thread::Builder::new()
            .name("timer-thread".to_string())
            .spawn(move || {
                let mut tick_count = 0;
                while self.running.load(Ordering::SeqCst) {
                    if self.paused.load(Ordering::SeqCst) {
                        thread::sleep(StdDuration::from_millis(100)); // Polling interval during pause
                        continue;
                    }

                    let now = Instant::now();

                    let current_time;
                    {
                        let mut time_lock = match self.current_time.lock() {
                            Ok(lock) => lock,
                            Err(_) => {
                                eprintln!("Failed to acquire lock on current_time. Stopping timer.");
                                break;
                            }
                        };

                        let tick_advance = match self.tick_advance.read() {
                            Ok(duration) => *duration,
                            Err(_) => {
                                eprintln!("Failed to acquire read lock on tick_advance. Stopping timer.");
                                break;
                            }
                        };

                        *time_lock += tick_advance;
                        current_time = *time_lock;
                    }

                    tick_count += 1;

                    if tick_callback(current_time, tick_count).is_err() {
                        self.stop();
                        break;
                    }

                    let sleep_duration = self.period.saturating_sub(now.elapsed());
                    thread::sleep(sleep_duration);
                }
            })
            .map_err(|_| SimError::TimerStartError("Failed to start the timer thread.".to_string()))
    }
}
