// ==========================================
// Presenter - views and export document on an overbooked flight
// ==========================================

mod helpers;

use flight_roster::engine::RosterAssembler;
use flight_roster::presenter::{self, seat_map, tabular};
use flight_roster::Roster;
use helpers::test_data_builder::{economy_singletons, minimal_crew, FlightBuilder};

/// 4 economy seats, 5 passengers
fn overbooked() -> Roster {
    let flight = FlightBuilder::new("TK4242").cabin("2-2", 4, 0).build();
    RosterAssembler::new()
        .assemble(&flight, &minimal_crew("Airbus A320"), &economy_singletons(5))
        .unwrap()
        .roster
}

#[test]
fn test_unassigned_passenger_is_exported_with_null_seat() {
    let json = presenter::to_json(&overbooked()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let passengers = value["passengers"].as_array().unwrap();
    assert_eq!(passengers.len(), 5);

    let last = &passengers[4];
    assert_eq!(last["id"], "E005");
    assert!(last["seatNumber"].is_null());
    assert_eq!(last["seatStatus"], "unassigned");

    assert_eq!(passengers[0]["seatNumber"], "1A");
    assert_eq!(passengers[0]["seatStatus"], "assigned");
    assert_eq!(value["flightInfo"]["flightNumber"], "TK4242");
}

#[test]
fn test_views_report_unassigned_passengers() {
    let roster = overbooked();

    let map = seat_map::render(&roster);
    assert!(map.contains("Unassigned: E005"));
    assert!(map.contains("== Cockpit =="));

    let table = tabular::render(&roster);
    let line = table.lines().find(|l| l.contains("E005")).unwrap();
    assert!(line.ends_with("UNASSIGNED"));
}
