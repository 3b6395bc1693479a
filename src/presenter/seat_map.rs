// ==========================================
// Flight Roster - Seat map view
// ==========================================
// Cockpit, cabin crew stations, then the cabin grid:
//   occupied seat -> passenger initials, free seat -> its identifier
//   aisles follow the seating plan blocks, business rows marked "B"
// ==========================================

use crate::domain::roster::Roster;
use crate::domain::seat::{CabinLayout, SeatAssignment, SeatIdentifier};
use crate::domain::types::CabinSection;
use std::collections::HashMap;
use std::fmt::Write;

const CELL_WIDTH: usize = 4;
const AISLE: &str = "  ";

/// Renders the seat map; an invalid seating plan yields only the crew part
pub fn render(roster: &Roster) -> String {
    let mut out = String::new();
    out.push_str(&super::flight_header(roster));
    out.push('\n');

    out.push_str("== Cockpit ==\n");
    for pilot in roster.flight_crew() {
        let _ = writeln!(out, "  {} {} ({})", pilot.id, pilot.info.name, pilot.seniority);
    }

    out.push_str("== Cabin crew ==\n");
    for attendant in roster.cabin_crew() {
        let _ = writeln!(out, "  {} {} ({})", attendant.id, attendant.info.name, attendant.kind);
    }

    let layout = match roster.flight_info().cabin_layout() {
        Ok(layout) => layout,
        Err(e) => {
            let _ = writeln!(out, "== Seats ==\n  (unavailable: {})", e);
            return out;
        }
    };

    let occupants: HashMap<SeatIdentifier, String> = roster
        .passengers()
        .iter()
        .filter_map(|p| p.seat.seat().map(|s| (s, p.info.initials())))
        .collect();

    out.push_str("== Seats ==\n");
    header_row(&mut out, &layout);
    for row in 1..=layout.row_count() {
        let marker = match layout.section_of(row) {
            CabinSection::Business => 'B',
            CabinSection::Economy => ' ',
        };
        let _ = write!(out, "{:>3} {} ", row, marker);
        for seat in layout.row_seats(row) {
            let label = occupants
                .get(&seat)
                .map(|initials| initials.chars().take(CELL_WIDTH - 1).collect::<String>())
                .unwrap_or_else(|| seat.to_string().to_lowercase());
            let _ = write!(out, "{:<CELL_WIDTH$}", label);
            if layout.aisle_after(seat.column_index()) {
                out.push_str(AISLE);
            }
        }
        out.push('\n');
    }

    let unassigned: Vec<&str> = roster.unassigned_passengers().map(|p| p.id.as_str()).collect();
    if !unassigned.is_empty() {
        let _ = writeln!(out, "Unassigned: {}", unassigned.join(", "));
    }

    let lap: Vec<String> = roster
        .passengers()
        .iter()
        .filter(|p| p.seat == SeatAssignment::LapInfant)
        .map(|p| format!("{} {}", p.id, super::tabular::seat_label(p)))
        .collect();
    if !lap.is_empty() {
        let _ = writeln!(out, "Lap infants: {}", lap.join(", "));
    }

    out
}

fn header_row(out: &mut String, layout: &CabinLayout) {
    out.push_str("      ");
    for col in 0..layout.seats_per_row() {
        let _ = write!(out, "{:<CELL_WIDTH$}", CabinLayout::column_letter(col));
        if layout.aisle_after(col) {
            out.push_str(AISLE);
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RosterAssembler;
    use crate::repository::InMemoryRosterRepository;

    #[test]
    fn test_seat_map_marks_occupants_and_aisles() {
        let repo = InMemoryRosterRepository::demo();
        let outcome = RosterAssembler::new()
            .assemble(repo.flight("TK5678").unwrap(), repo.crew(), repo.passengers("TK5678"))
            .unwrap();

        let text = render(&outcome.roster);
        assert!(text.contains("FC003 Captain Ahmed Yilmaz (Senior)"));

        // P101 James Smith pre-assigned 1B
        let row1 = text.lines().find(|l| l.starts_with("  1 B")).unwrap();
        assert!(row1.contains("JS"));
        assert!(row1.contains("1a"));
        assert!(!row1.contains("1b"));
        assert!(row1.contains(AISLE));

        assert_eq!(text.lines().filter(|l| l.starts_with(" 30")).count(), 1);
        assert!(!text.contains("Unassigned:"));
    }
}
