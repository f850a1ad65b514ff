use std::collections::VecDeque;

use super::flight::{Flight, FlightId};

pub const DEFAULT_LANDED_CAPACITY: usize = 10;

/// The flights on display: the active ones in panel order and a bounded
/// history of recent arrivals.
#[derive(Debug, Clone)]
pub struct FlightBoard {
    flights: Vec<Flight>,
    landed: VecDeque<Flight>,
    landed_capacity: usize,
}

impl FlightBoard {
    pub fn new(landed_capacity: usize) -> Self {
        FlightBoard {
            flights: Vec::new(),
            landed: VecDeque::with_capacity(landed_capacity),
            landed_capacity,
        }
    }

    /// Active flights, first to last as shown on the panel.
    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn get(&self, id: FlightId) -> Option<&Flight> {
        self.flights.iter().find(|flight| flight.id == id)
    }

    pub fn contains(&self, id: FlightId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    pub fn push_front(&mut self, flight: Flight) {
        self.flights.insert(0, flight);
    }

    pub fn remove(&mut self, id: FlightId) -> Option<Flight> {
        let index = self.flights.iter().position(|flight| flight.id == id)?;
        Some(self.flights.remove(index))
    }

    /// Moves a flight to the top of the panel, keeping the relative order of
    /// the others. Returns false if the flight is no longer active.
    pub fn move_to_front(&mut self, id: FlightId) -> bool {
        match self.flights.iter().position(|flight| flight.id == id) {
            Some(index) => {
                self.flights[..=index].rotate_right(1);
                true
            }
            None => false,
        }
    }

    /// Hands the active flights out for a rebuild; the board is left empty
    /// until `set_flights` puts the survivors back.
    pub(crate) fn take_flights(&mut self) -> Vec<Flight> {
        std::mem::take(&mut self.flights)
    }

    pub(crate) fn set_flights(&mut self, flights: Vec<Flight>) {
        self.flights = flights;
    }

    /// Appends to the landed history, evicting the oldest entries past capacity.
    pub fn record_landing(&mut self, flight: Flight) {
        if self.landed_capacity == 0 {
            return;
        }
        while self.landed.len() >= self.landed_capacity {
            self.landed.pop_front();
        }
        self.landed.push_back(flight);
    }

    /// Landed flights, oldest first.
    pub fn landed(&self) -> impl Iterator<Item = &Flight> {
        self.landed.iter()
    }

    pub fn last_landed(&self) -> Option<&Flight> {
        self.landed.back()
    }
}

impl Default for FlightBoard {
    fn default() -> Self {
        FlightBoard::new(DEFAULT_LANDED_CAPACITY)
    }
}
