pub mod airport;

pub mod board;

pub mod config;

pub mod event;

pub mod event_log;

pub mod flight;

pub mod flight_status;

pub mod generator;

pub mod presentation;

pub mod reference;

pub mod route;

pub mod runtime;

pub mod sequencer;

pub mod services;

pub mod sim_error;

pub mod simulation;

pub mod speech;

pub mod timer;
