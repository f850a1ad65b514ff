use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::{
    flight::{Flight, FlightId},
    flight_status::{FlightStatus, StatusWeights},
    reference::ReferenceData,
    route::great_circle_route,
    sim_error::SimError,
};

const ALTITUDE_RANGE_FT: std::ops::Range<i32> = 5000..35000;
const SPEED_RANGE_KMH: std::ops::Range<i32> = 400..600;

/// Draws random flights from the reference tables.
pub struct FlightGenerator<R: Rng = StdRng> {
    rng: R,
    reference: ReferenceData,
    statuses: WeightedIndex<u32>,
    route_points: usize,
}

impl FlightGenerator<StdRng> {
    /// Seeded generators replay the same sequence of flights.
    pub fn with_seed(
        seed: Option<u64>,
        reference: ReferenceData,
        weights: StatusWeights,
        route_points: usize,
    ) -> Result<Self, SimError> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        FlightGenerator::new(rng, reference, weights, route_points)
    }
}

impl<R: Rng> FlightGenerator<R> {
    pub fn new(
        rng: R,
        reference: ReferenceData,
        mut weights: StatusWeights,
        route_points: usize,
    ) -> Result<Self, SimError> {
        // a cancelled flight always carries a reason
        if reference.cancellation_reasons.is_empty() {
            weights.cancelled = 0;
        }
        let statuses = WeightedIndex::new(weights.as_array())
            .map_err(|e| SimError::InvalidWeights(e.to_string()))?;

        Ok(FlightGenerator {
            rng,
            reference,
            statuses,
            route_points,
        })
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Shared access to the generator's randomness, so one seed drives the whole run.
    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Builds a new flight with the given id.
    ///
    /// Fails without side effects on the flight collection when the tables
    /// are empty or the chosen pair has no defined great-circle route.
    pub fn generate(&mut self, id: FlightId) -> Result<Flight, SimError> {
        let origin = self
            .reference
            .origins
            .choose(&mut self.rng)
            .ok_or(SimError::NoOrigins)?
            .clone();

        if self.reference.destinations.is_empty() {
            return Err(SimError::NoDestinations);
        }
        let pick = self.rng.gen_range(0..self.reference.destinations.len());
        let (destination, destination_position) = self
            .reference
            .destinations
            .iter()
            .nth(pick)
            .map(|(name, position)| (name.clone(), *position))
            .ok_or(SimError::NoDestinations)?;

        let status = FlightStatus::ALL[self.statuses.sample(&mut self.rng)];
        let cancellation_reason = match status {
            FlightStatus::Cancelled => self.reference.cancellation_reasons.choose(&mut self.rng).cloned(),
            _ => None,
        };

        let route = great_circle_route(origin.position, destination_position, self.route_points);
        if route.is_empty() {
            return Err(SimError::InvalidRoute {
                origin: origin.name,
                destination,
            });
        }

        let altitude = self.rng.gen_range(ALTITUDE_RANGE_FT);
        let speed = self.rng.gen_range(SPEED_RANGE_KMH);
        let carrier = self
            .reference
            .carriers
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default();
        let gate = self
            .reference
            .gates
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default();

        Ok(Flight {
            id,
            origin: origin.name,
            destination,
            route,
            route_index: 0,
            altitude,
            speed,
            carrier,
            status,
            cancellation_reason,
            gate,
            cancellation_announced: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::airport::{Airport, GeoPoint};
    use std::collections::BTreeMap;

    fn seeded(weights: StatusWeights) -> FlightGenerator {
        FlightGenerator::with_seed(Some(7), ReferenceData::default(), weights, 30)
            .expect("valid generator")
    }

    fn single_city(name: &str, lat: f64, lon: f64) -> ReferenceData {
        let mut data = ReferenceData::default();
        data.origins = vec![Airport::new(name, lat, lon)];
        data.destinations = BTreeMap::from([(name.to_string(), GeoPoint::new(lat, lon))]);
        data
    }

    #[test]
    fn test_generated_flight_is_well_formed() {
        let mut generator = seeded(StatusWeights::default());
        let data = ReferenceData::default();

        let mut produced = 0;
        for id in 0..200 {
            let flight = match generator.generate(id) {
                Ok(flight) => flight,
                // same origin and destination drawn
                Err(SimError::InvalidRoute { origin, destination }) => {
                    assert_eq!(origin, destination);
                    continue;
                }
                Err(e) => panic!("unexpected error: {}", e),
            };
            produced += 1;

            assert_eq!(flight.id, id);
            assert_eq!(flight.route.len(), 31);
            assert_eq!(flight.route_index, 0);
            assert!(ALTITUDE_RANGE_FT.contains(&flight.altitude));
            assert!(SPEED_RANGE_KMH.contains(&flight.speed));
            assert!(data.carriers.contains(&flight.carrier));
            assert!(data.gates.contains(&flight.gate));
            assert!(data.destinations.contains_key(&flight.destination));
            assert_eq!(flight.cancellation_reason.is_some(), flight.is_cancelled());
            assert!(!flight.cancellation_announced);
        }
        assert!(produced > 150);
    }

    #[test]
    fn test_same_seed_same_flights() {
        let mut first = seeded(StatusWeights::default());
        let mut second = seeded(StatusWeights::default());

        for id in 0..20 {
            assert_eq!(first.generate(id).ok(), second.generate(id).ok());
        }
    }

    #[test]
    fn test_cancelled_only_weights_attach_reason() {
        let weights = StatusWeights {
            on_time: 0,
            delayed: 0,
            boarding: 0,
            cancelled: 1,
        };
        let mut generator =
            FlightGenerator::with_seed(Some(3), single_city_pair(), weights, 30).expect("valid generator");

        let flight = generator.generate(1).expect("route is valid");
        assert_eq!(flight.status, FlightStatus::Cancelled);
        let reason = flight.cancellation_reason.expect("cancelled flights carry a reason");
        assert!(ReferenceData::default().cancellation_reasons.contains(&reason));
    }

    fn single_city_pair() -> ReferenceData {
        let mut data = ReferenceData::default();
        data.origins = vec![Airport::new("Lima", -12.0464, -77.0428)];
        data.destinations = BTreeMap::from([("Tokyo".to_string(), GeoPoint::new(35.6895, 139.6917))]);
        data
    }

    #[test]
    fn test_degenerate_route_fails_generation() {
        let mut generator = FlightGenerator::with_seed(
            Some(1),
            single_city("Lima", -12.0464, -77.0428),
            StatusWeights::default(),
            30,
        )
        .expect("valid generator");

        assert!(matches!(generator.generate(1), Err(SimError::InvalidRoute { .. })));
    }

    #[test]
    fn test_empty_tables_fail_generation() {
        let mut no_destinations = ReferenceData::default();
        no_destinations.destinations.clear();
        let mut generator =
            FlightGenerator::with_seed(Some(1), no_destinations, StatusWeights::default(), 30)
                .expect("valid generator");
        assert!(matches!(generator.generate(1), Err(SimError::NoDestinations)));

        let mut no_origins = ReferenceData::default();
        no_origins.origins.clear();
        let mut generator = FlightGenerator::with_seed(Some(1), no_origins, StatusWeights::default(), 30)
            .expect("valid generator");
        assert!(matches!(generator.generate(1), Err(SimError::NoOrigins)));
    }

    #[test]
    fn test_no_reasons_means_no_cancellations() {
        let mut data = ReferenceData::default();
        data.cancellation_reasons.clear();
        let weights = StatusWeights {
            on_time: 1,
            delayed: 0,
            boarding: 0,
            cancelled: 1000,
        };
        let mut generator = FlightGenerator::with_seed(Some(9), data, weights, 30).expect("valid generator");

        for id in 0..100 {
            if let Ok(flight) = generator.generate(id) {
                assert_eq!(flight.status, FlightStatus::OnTime);
                assert!(flight.cancellation_reason.is_none());
            }
        }

        let mut data = ReferenceData::default();
        data.cancellation_reasons.clear();
        let cancelled_only = StatusWeights {
            on_time: 0,
            delayed: 0,
            boarding: 0,
            cancelled: 1,
        };
        let result = FlightGenerator::with_seed(Some(9), data, cancelled_only, 30);
        assert!(matches!(result, Err(SimError::InvalidWeights(_))));
    }

    #[test]
    fn test_zero_weights_are_rejected() {
        let weights = StatusWeights {
            on_time: 0,
            delayed: 0,
            boarding: 0,
            cancelled: 0,
        };
        let result = FlightGenerator::with_seed(Some(1), ReferenceData::default(), weights, 30);
        assert!(matches!(result, Err(SimError::InvalidWeights(_))));
    }
}
