use std::collections::BTreeMap;

use super::{
    airport::{Airport, GeoPoint},
    sim_error::SimError,
};

/// Cities served by the simulation, grouped by region.
const CITIES: [(&str, f64, f64); 25] = [
    // Mexico
    ("Mexico City", 19.4326, -99.1332),
    ("Cancun", 21.1619, -86.8515),
    ("Monterrey", 25.6866, -100.3161),
    ("Guadalajara", 20.6597, -103.3496),
    ("Tijuana", 32.5149, -117.0382),
    ("Merida", 20.9674, -89.5926),
    // South America
    ("Lima", -12.0464, -77.0428),
    ("Bogota", 4.7110, -74.0721),
    ("Buenos Aires", -34.6037, -58.3816),
    ("Santiago", -33.4489, -70.6693),
    // US / Canada
    ("New York", 40.7128, -74.0060),
    ("Vancouver", 49.2827, -123.1207),
    ("Montreal", 45.5017, -73.5673),
    // Asia
    ("Tokyo", 35.6895, 139.6917),
    ("Seoul", 37.5665, 126.9780),
    ("Shanghai", 31.2304, 121.4737),
    ("Dubai", 25.2048, 55.2708),
    // Europe
    ("Madrid", 40.4168, -3.7038),
    ("Paris", 48.8566, 2.3522),
    ("Berlin", 52.5200, 13.4050),
    ("Rome", 41.9028, 12.4964),
    ("London", 51.5072, -0.1276),
    // Africa
    ("Cairo", 30.0444, 31.2357),
    // Brazil
    ("Sao Paulo", -23.5505, -46.6333),
    ("Rio de Janeiro", -22.9068, -43.1729),
];

pub const CANCELLATION_REASONS: [&str; 10] = [
    "Aircraft maintenance",
    "Adverse weather conditions",
    "Technical problems with the aircraft",
    "Crew scheduling problems",
    "Airport security issues",
    "Mechanical failure",
    "Air traffic disruption",
    "Protests or demonstrations",
    "Airport staff strike",
    "Reservation system incident",
];

pub const CARRIERS: [&str; 6] = [
    "Aeromexico",
    "Volaris",
    "VivaAerobus",
    "Delta",
    "United",
    "Copa Airlines",
];

pub const GATES: [&str; 6] = ["A1", "B2", "C3", "D4", "E5", "F6"];

/// Static tables the generator draws from. Read-only once built.
#[derive(Clone, Debug)]
pub struct ReferenceData {
    pub origins: Vec<Airport>,
    pub destinations: BTreeMap<String, GeoPoint>,
    pub cancellation_reasons: Vec<String>,
    pub carriers: Vec<String>,
    pub gates: Vec<String>,
}

impl ReferenceData {
    pub fn new(
        origins: Vec<Airport>,
        destinations: BTreeMap<String, GeoPoint>,
        cancellation_reasons: Vec<String>,
        carriers: Vec<String>,
        gates: Vec<String>,
    ) -> Self {
        ReferenceData {
            origins,
            destinations,
            cancellation_reasons,
            carriers,
            gates,
        }
    }

    /// Coordinates of an origin city.
    pub fn origin_coordinates(&self, name: &str) -> Result<GeoPoint, SimError> {
        self.origins
            .iter()
            .find(|airport| airport.name == name)
            .map(|airport| airport.position)
            .ok_or_else(|| SimError::UnknownLocation(name.to_string()))
    }

    pub fn destination_coordinates(&self, name: &str) -> Result<GeoPoint, SimError> {
        self.destinations
            .get(name)
            .copied()
            .ok_or_else(|| SimError::UnknownLocation(name.to_string()))
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        let origins = CITIES
            .iter()
            .map(|(name, lat, lon)| Airport::new(name, *lat, *lon))
            .collect();
        let destinations = CITIES
            .iter()
            .map(|(name, lat, lon)| (name.to_string(), GeoPoint::new(*lat, *lon)))
            .collect();

        ReferenceData::new(
            origins,
            destinations,
            CANCELLATION_REASONS.iter().map(|r| r.to_string()).collect(),
            CARRIERS.iter().map(|c| c.to_string()).collect(),
            GATES.iter().map(|g| g.to_string()).collect(),
        )
    }
}
