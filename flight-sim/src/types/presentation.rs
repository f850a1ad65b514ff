use std::fmt::Write;

use super::{
    airport::GeoPoint,
    board::FlightBoard,
    event_log::EventLog,
    flight::{Flight, FlightId},
    services::{FlightMarker, MapView},
};

/// Everything the dashboard shows besides the board itself.
pub struct DashboardView<'a> {
    pub announced: Option<FlightId>,
    pub now_announcing: Option<&'a str>,
    pub pending: (usize, usize),
    pub map_frame: &'a [String],
    pub paused: bool,
}

/// One text card per active flight, in panel order.
pub fn render_panel(board: &FlightBoard, announced: Option<FlightId>) -> String {
    let mut panel = String::from("Flight Panel\n");
    if board.is_empty() {
        panel.push_str("  No flights available.\n");
        return panel;
    }

    for (number, flight) in board.flights().iter().enumerate() {
        let marker = if Some(flight.id) == announced { "*" } else { " " };
        let _ = writeln!(
            panel,
            "{}{:>3}. {} → {}  [{}]",
            marker,
            number + 1,
            flight.origin,
            flight.destination,
            flight.carrier
        );
        let _ = write!(
            panel,
            "       Alt: {} ft · Speed: {} km/h · Gate {} · {}",
            flight.altitude, flight.speed, flight.gate, flight.status
        );
        if flight.is_cancelled() {
            let _ = write!(panel, " ({})", flight.reason());
        }
        panel.push('\n');
    }
    panel
}

/// Summary card for the most recent arrival.
pub fn render_last_landing(board: &FlightBoard) -> Option<String> {
    let flight = board.last_landed()?;
    let mut card = format!(
        "Last Landing\n  {} → {}\n  {}\n  Altitude: {} ft | Speed: {} km/h | Gate: {} | Status: {}",
        flight.origin,
        flight.destination,
        flight.carrier,
        flight.altitude,
        flight.speed,
        flight.gate,
        flight.status
    );
    if flight.is_cancelled() {
        let _ = write!(card, " | Reason: {}", flight.reason());
    }
    Some(card)
}

fn tooltip(flight: &Flight) -> String {
    let mut text = format!(
        "{} → {} Alt: {} ft - Speed: {} km/h",
        flight.origin, flight.destination, flight.altitude, flight.speed
    );
    if flight.is_cancelled() {
        let _ = write!(text, " Cancelled: {}", flight.reason());
    }
    text
}

/// Map markers for every flight with a usable position. Flights whose
/// current waypoint is missing or not finite are skipped.
pub fn markers(board: &FlightBoard, announced: Option<FlightId>, log: &EventLog) -> Vec<FlightMarker> {
    board
        .flights()
        .iter()
        .filter_map(|flight| {
            let position = match flight.current_position() {
                Some(position) if position.is_finite() => position,
                other => {
                    log.warn(&format!(
                        "Skipping marker for flight {} with invalid position {:?}",
                        flight.id, other
                    ));
                    return None;
                }
            };

            Some(FlightMarker {
                flight_id: flight.id,
                label: format!("{} → {}", flight.origin, flight.destination),
                position,
                heading: flight.heading(),
                route: flight.route.clone(),
                route_index: flight.route_index,
                cancelled: flight.is_cancelled(),
                announced: Some(flight.id) == announced,
                tooltip: tooltip(flight),
            })
        })
        .collect()
}

/// Recenters the map on the flight at `index` in panel order. Cancelled
/// flights and flights without a usable position are ignored.
pub fn focus_flight<M: MapView>(board: &FlightBoard, index: usize, map: &mut M, zoom: u8) -> Option<GeoPoint> {
    let flight = board.flights().get(index)?;
    if flight.is_cancelled() {
        return None;
    }
    let position = flight.current_position().filter(GeoPoint::is_finite)?;
    map.fly_to(position, zoom);
    Some(position)
}

pub fn render_dashboard(board: &FlightBoard, view: &DashboardView) -> String {
    let mut out = render_panel(board, view.announced);

    out.push_str("\nMap\n");
    if view.map_frame.is_empty() {
        out.push_str("  (empty sky)\n");
    }
    for line in view.map_frame {
        let _ = writeln!(out, "  {}", line);
    }

    out.push('\n');
    match view.now_announcing {
        Some(text) => {
            let _ = writeln!(out, "Now announcing: {}", text);
        }
        None => out.push_str("Now announcing: -\n"),
    }
    let _ = writeln!(
        out,
        "Queued: {} cancellation(s), {} other",
        view.pending.0, view.pending.1
    );

    if let Some(card) = render_last_landing(board) {
        out.push('\n');
        out.push_str(&card);
        out.push('\n');
    }

    if view.paused {
        out.push_str("\n[paused]\n");
    }
    out.push_str("\nCommands: focus <n> | speed <minutes> | pause | resume | help | exit\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::flight::tests::sample_flight;
    use crate::types::flight_status::FlightStatus;

    #[derive(Default)]
    struct RecordingMap {
        centred: Vec<(GeoPoint, u8)>,
    }

    impl MapView for RecordingMap {
        fn fly_to(&mut self, target: GeoPoint, zoom: u8) {
            self.centred.push((target, zoom));
        }

        fn render(&mut self, _markers: &[FlightMarker]) {}
    }

    fn board() -> FlightBoard {
        let mut board = FlightBoard::default();
        board.push_front(sample_flight(1, FlightStatus::OnTime));
        board.push_front(sample_flight(2, FlightStatus::Cancelled));
        board
    }

    #[test]
    fn test_panel_lists_flights_in_order() {
        let panel = render_panel(&board(), Some(1));
        let lines: Vec<&str> = panel.lines().collect();

        assert_eq!(lines[0], "Flight Panel");
        assert!(lines[1].starts_with("   1. Mexico City → Madrid"));
        assert!(lines[2].contains("cancelled (Mechanical failure)"));
        assert!(lines[3].starts_with("*  2."));
    }

    #[test]
    fn test_empty_panel() {
        let panel = render_panel(&FlightBoard::default(), None);
        assert!(panel.contains("No flights available."));
    }

    #[test]
    fn test_last_landing_card() {
        let mut board = board();
        assert!(render_last_landing(&board).is_none());

        board.record_landing(sample_flight(9, FlightStatus::Delayed));
        let card = render_last_landing(&board).expect("a flight has landed");
        assert!(card.contains("Mexico City → Madrid"));
        assert!(card.contains("Status: delayed"));
    }

    #[test]
    fn test_markers_skip_invalid_positions() {
        let mut board = board();
        let mut broken = sample_flight(3, FlightStatus::OnTime);
        broken.route[0] = GeoPoint::new(f64::NAN, 0.0);
        board.push_front(broken);
        let mut empty = sample_flight(4, FlightStatus::OnTime);
        empty.route.clear();
        board.push_front(empty);

        let markers = markers(&board, Some(2), &EventLog::disabled());

        let ids: Vec<FlightId> = markers.iter().map(|marker| marker.flight_id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert!(markers[0].announced && markers[0].cancelled);
        assert!(markers[0].tooltip.contains("Cancelled: Mechanical failure"));
        assert!(!markers[1].announced);
    }

    #[test]
    fn test_focus_flight() {
        let board = board();
        let mut map = RecordingMap::default();

        // index 0 is the cancelled flight
        assert!(focus_flight(&board, 0, &mut map, 13).is_none());
        assert!(focus_flight(&board, 5, &mut map, 13).is_none());

        let position = focus_flight(&board, 1, &mut map, 13).expect("flight 1 is focusable");
        assert_eq!(map.centred, vec![(position, 13)]);
    }

    #[test]
    fn test_dashboard_sections() {
        let board = board();
        let frame = vec!["> Mexico City → Madrid".to_string()];
        let view = DashboardView {
            announced: Some(2),
            now_announcing: Some("Flight to Madrid has been cancelled."),
            pending: (0, 1),
            map_frame: &frame,
            paused: true,
        };

        let dashboard = render_dashboard(&board, &view);
        assert!(dashboard.contains("Now announcing: Flight to Madrid has been cancelled."));
        assert!(dashboard.contains("Queued: 0 cancellation(s), 1 other"));
        assert!(dashboard.contains("  > Mexico City → Madrid"));
        assert!(dashboard.contains("[paused]"));
    }
}
