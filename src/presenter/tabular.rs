// ==========================================
// Flight Roster - Tabular view
// ==========================================
// One line per person: Name | ID | Type | Seat/Position
// ==========================================

use crate::domain::roster::{Roster, RosterPassenger};
use crate::domain::seat::SeatAssignment;
use std::fmt::Write;

const NAME_WIDTH: usize = 32;
const ID_WIDTH: usize = 8;
const TYPE_WIDTH: usize = 24;

/// Renders the roster as a plain-text table
pub fn render(roster: &Roster) -> String {
    let mut out = String::new();
    out.push_str(&super::flight_header(roster));
    out.push('\n');

    let _ = writeln!(
        out,
        "{:<NAME_WIDTH$} {:<ID_WIDTH$} {:<TYPE_WIDTH$} {}",
        "Name", "ID", "Type", "Seat/Position"
    );
    let _ = writeln!(out, "{}", "-".repeat(NAME_WIDTH + ID_WIDTH + TYPE_WIDTH + 16));

    for pilot in roster.flight_crew() {
        line(&mut out, &pilot.info.name, &pilot.id, &format!("Pilot ({})", pilot.seniority), "Cockpit");
    }
    for attendant in roster.cabin_crew() {
        line(
            &mut out,
            &attendant.info.name,
            &attendant.id,
            &format!("Cabin Crew ({})", attendant.kind),
            "Cabin",
        );
    }
    for passenger in roster.passengers() {
        line(
            &mut out,
            &passenger.info.name,
            &passenger.id,
            &format!("Passenger ({})", passenger.seat_type),
            &seat_label(passenger),
        );
    }

    out
}

fn line(out: &mut String, name: &str, id: &str, kind: &str, position: &str) {
    let _ = writeln!(
        out,
        "{:<NAME_WIDTH$} {:<ID_WIDTH$} {:<TYPE_WIDTH$} {}",
        truncate(name, NAME_WIDTH),
        id,
        kind,
        position
    );
}

/// Seat text, lap infants point at the parent
pub(crate) fn seat_label(passenger: &RosterPassenger) -> String {
    match (&passenger.seat, &passenger.parent_id) {
        (SeatAssignment::LapInfant, Some(parent)) => format!("LAP ({})", parent),
        (seat, _) => seat.to_string(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width - 1).collect();
        format!("{}…", cut)
    }
}
