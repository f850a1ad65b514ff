use std::{
    io::{self, BufRead, Write},
    sync::{mpsc, Arc},
    thread,
    time::Duration,
};

use chrono::{NaiveDateTime, Utc};
use clap::Parser;
use flight_announcer::types::{
    config::SimConfig,
    event::{Command, Event},
    event_log::EventLog,
    reference::ReferenceData,
    runtime::{print_help, run_event_loop},
    services::{ConsoleAudio, ConsoleMap},
    sim_error::SimError,
    simulation::Simulation,
    speech::ConsoleSpeech,
    timer::Timer,
};
use logger::Color;
use threadpool::ThreadPool;

fn clean_scr() {
    print!("\x1B[2J\x1B[1;1H");
}

/// Reads commands from stdin and forwards them to the event loop.
fn spawn_command_reader(tx: mpsc::Sender<Event>) -> Result<(), SimError> {
    thread::Builder::new()
        .name("command-reader".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match Command::parse(&line) {
                    Ok(command) => {
                        if tx.send(Event::Command(command)).is_err() {
                            break;
                        }
                    }
                    Err(e) => eprintln!("{}. Use -h for help.", e),
                }
            }
        })
        .map(|_| ())
        .map_err(|_| SimError::Other("Failed to start the command reader.".to_string()))
}

fn main() -> Result<(), SimError> {
    let config = SimConfig::parse();
    config.validate()?;

    let now: NaiveDateTime = Utc::now().naive_utc();
    let session = format!("session_{}", now.format("%Y%m%d_%H%M%S"));
    let log = EventLog::open(&config.log_dir, &session, config.verbose)?;
    log.info("Starting flight announcer", Color::White);

    let (tx, rx) = mpsc::channel();

    let speech = ConsoleSpeech::new(
        ThreadPool::new(config.speech_workers),
        tx.clone(),
        config.words_per_minute,
        log.clone(),
    );
    let map = ConsoleMap::new(log.clone());
    let audio = ConsoleAudio::new(config.bell, log.clone());

    let mut sim = Simulation::new(&config, ReferenceData::default(), speech, map, audio, log.clone())?;

    let timer = Timer::new(
        now,
        config.tick_advance_minutes,
        Duration::from_millis(config.tick_millis),
    );
    let tick_tx = tx.clone();
    Arc::clone(&timer).start(move |time, count| {
        tick_tx
            .send(Event::Tick { time, count })
            .map_err(|_| SimError::ChannelClosed)
    })?;

    spawn_command_reader(tx)?;
    print_help();

    let shutdown = run_event_loop(&mut sim, &rx, &*timer, |sim, paused| {
        sim.render_map();
        let dashboard = sim.dashboard(sim.map().frame(), paused);
        clean_scr();
        print!("{}", dashboard);
        io::stdout()
            .flush()
            .map_err(|e| SimError::Other(e.to_string()))
    });

    timer.stop();
    sim.sequencer().speech().join();
    log.info(&format!("Stopped: {:?}", shutdown), Color::White);
    shutdown.map(|_| ())
}
