// ==========================================
// Flight Roster - Presentation layer
// ==========================================
// Consumes a finished Roster only; never re-runs assembly.
// ==========================================

pub mod export;
pub mod extended;
pub mod seat_map;
pub mod tabular;

pub use export::{export_file, to_json, ExportError};

use crate::domain::roster::Roster;

/// "Flight TK1234  IST → JFK  2024-01-15 14:30  Boeing 777-300ER"
fn flight_header(roster: &Roster) -> String {
    let flight = roster.flight_info();
    format!(
        "Flight {}  {}  {}  {}",
        flight.flight_number,
        flight.route_label(),
        flight.scheduled_at.format("%Y-%m-%d %H:%M"),
        flight.aircraft_type
    )
}
