use super::{
    airport::GeoPoint,
    flight_status::FlightStatus,
    route::{bearing, haversine_distance},
};

/// Creation timestamp in milliseconds, kept strictly increasing.
pub type FlightId = u64;

const UNSPECIFIED_REASON: &str = "Not specified";

/// Represents a simulated flight: its route, position along it, and the
/// metadata shown on the panel and read out in announcements.
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    pub id: FlightId,
    pub origin: String,
    pub destination: String,
    pub route: Vec<GeoPoint>,
    pub route_index: usize,
    pub altitude: i32,
    pub speed: i32,
    pub carrier: String,
    pub status: FlightStatus,
    pub cancellation_reason: Option<String>,
    pub gate: String,
    pub cancellation_announced: bool,
}

/// Outcome of moving a flight one step along its route.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Progress {
    Moved,
    Landed,
}

impl Flight {
    pub fn is_cancelled(&self) -> bool {
        self.status == FlightStatus::Cancelled
    }

    /// Moves one waypoint forward. Stepping past the last waypoint lands the
    /// flight and leaves the index on the last valid point.
    pub fn advance(&mut self) -> Progress {
        let next = self.route_index + 1;
        if next >= self.route.len() {
            Progress::Landed
        } else {
            self.route_index = next;
            Progress::Moved
        }
    }

    pub fn current_position(&self) -> Option<GeoPoint> {
        self.route.get(self.route_index).copied()
    }

    /// Heading towards the next waypoint, 0 at the end of the route.
    pub fn heading(&self) -> f64 {
        match (
            self.route.get(self.route_index),
            self.route.get(self.route_index + 1),
        ) {
            (Some(current), Some(next)) => bearing(*current, *next),
            _ => 0.0,
        }
    }

    pub fn reason(&self) -> &str {
        self.cancellation_reason
            .as_deref()
            .unwrap_or(UNSPECIFIED_REASON)
    }

    /// Estimated flight time in whole minutes at the assigned speed.
    pub fn estimated_minutes(&self, origin: GeoPoint, destination: GeoPoint) -> i64 {
        if self.speed <= 0 {
            return 0;
        }
        let distance_km = haversine_distance(origin, destination);
        (distance_km / self.speed as f64 * 60.0).round() as i64
    }

    pub fn departure_announcement(&self, minutes: i64) -> String {
        format!(
            "Flight to {} has departed. Please keep your seat belts fastened during the flight. \
             We wish you a pleasant journey with {}. Estimated altitude: {} feet. \
             Speed: {} km/h. Duration: {} minutes.",
            self.destination, self.carrier, self.altitude, self.speed, minutes
        )
    }

    pub fn cancellation_announcement(&self) -> String {
        format!(
            "Flight to {} has been cancelled. Reason: {}.",
            self.destination,
            self.reason()
        )
    }

    pub fn welcome_announcement(&self) -> String {
        format!(
            "Welcome to {}. Please remain seated until the aircraft reaches its final position.",
            self.destination
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::route::great_circle_route;

    pub(crate) fn sample_flight(id: FlightId, status: FlightStatus) -> Flight {
        Flight {
            id,
            origin: "Mexico City".to_string(),
            destination: "Madrid".to_string(),
            route: great_circle_route(
                GeoPoint::new(19.4326, -99.1332),
                GeoPoint::new(40.4168, -3.7038),
                30,
            ),
            route_index: 0,
            altitude: 30000,
            speed: 500,
            carrier: "Volaris".to_string(),
            status,
            cancellation_reason: (status == FlightStatus::Cancelled)
                .then(|| "Mechanical failure".to_string()),
            gate: "A1".to_string(),
            cancellation_announced: false,
        }
    }

    #[test]
    fn test_flight_lands_after_last_waypoint() {
        let mut flight = sample_flight(1, FlightStatus::OnTime);
        assert_eq!(flight.route.len(), 31);

        for expected in 1..=30 {
            assert_eq!(flight.advance(), Progress::Moved);
            assert_eq!(flight.route_index, expected);
        }

        assert_eq!(flight.advance(), Progress::Landed);
        assert_eq!(flight.route_index, 30);
    }

    #[test]
    fn test_heading_points_along_route() {
        let mut flight = sample_flight(1, FlightStatus::OnTime);
        let heading = flight.heading();
        assert!(heading > 0.0 && heading < 90.0, "heading {}", heading);

        flight.route_index = 30;
        assert_eq!(flight.heading(), 0.0);
    }

    #[test]
    fn test_estimated_minutes() {
        let mut flight = sample_flight(1, FlightStatus::OnTime);
        flight.speed = 600;
        let minutes = flight.estimated_minutes(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 90.0));
        // 10007.5 km at 600 km/h
        assert_eq!(minutes, 1001);

        flight.speed = 0;
        assert_eq!(flight.estimated_minutes(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 90.0)), 0);
    }

    #[test]
    fn test_announcement_texts() {
        let cancelled = sample_flight(1, FlightStatus::Cancelled);
        assert_eq!(
            cancelled.cancellation_announcement(),
            "Flight to Madrid has been cancelled. Reason: Mechanical failure."
        );

        let mut unexplained = cancelled.clone();
        unexplained.cancellation_reason = None;
        assert!(unexplained.cancellation_announcement().contains("Not specified"));

        let flight = sample_flight(2, FlightStatus::OnTime);
        assert!(flight.welcome_announcement().starts_with("Welcome to Madrid."));
        let departure = flight.departure_announcement(615);
        assert!(departure.contains("with Volaris"));
        assert!(departure.contains("Duration: 615 minutes."));
    }
}
