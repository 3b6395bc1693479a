// ==========================================
// Flight Roster - Extended view
// ==========================================
// Full personal details per person
// ==========================================

use crate::domain::crew::PersonalInfo;
use crate::domain::roster::Roster;
use std::fmt::Write;

pub fn render(roster: &Roster) -> String {
    let flight = roster.flight_info();
    let mut out = String::new();
    out.push_str(&super::flight_header(roster));
    out.push('\n');

    let _ = writeln!(
        out,
        "From: {} ({}), {}, {}",
        flight.source.airport, flight.source.code, flight.source.city, flight.source.country
    );
    let _ = writeln!(
        out,
        "To:   {} ({}), {}, {}",
        flight.destination.airport, flight.destination.code, flight.destination.city, flight.destination.country
    );
    let _ = writeln!(
        out,
        "Duration: {}  Distance: {} km  Seats: {} ({})",
        flight.duration_label(),
        flight.distance_km,
        flight.total_seats,
        flight.seating_plan
    );
    if !flight.standard_menu.is_empty() {
        let _ = writeln!(out, "Menu: {}", flight.standard_menu.join(", "));
    }

    out.push_str("\n== Flight crew ==\n");
    for pilot in roster.flight_crew() {
        let _ = writeln!(out, "[{}] {}", pilot.id, pilot.info.name);
        person(&mut out, &pilot.info);
        let _ = writeln!(out, "    Seniority: {}", pilot.seniority);
        let _ = writeln!(out, "    Aircraft: {}", pilot.vehicle_restriction);
        let _ = writeln!(out, "    Range: {} km", pilot.allowed_range);
    }

    out.push_str("\n== Cabin crew ==\n");
    for attendant in roster.cabin_crew() {
        let _ = writeln!(out, "[{}] {} ({})", attendant.id, attendant.info.name, attendant.kind);
        person(&mut out, &attendant.info);
        let _ = writeln!(out, "    Aircraft: {}", attendant.vehicle_restrictions.join(", "));
        let recipes = attendant.kind.recipes();
        if !recipes.is_empty() {
            let _ = writeln!(out, "    Recipes: {}", recipes.join(", "));
        }
    }

    out.push_str("\n== Passengers ==\n");
    for passenger in roster.passengers() {
        let _ = writeln!(
            out,
            "[{}] {} - {} - {}",
            passenger.id,
            passenger.info.name,
            passenger.seat_type,
            super::tabular::seat_label(passenger)
        );
        person(&mut out, &passenger.info);
        if let Some(parent) = &passenger.parent_id {
            let _ = writeln!(out, "    Parent: {}", parent);
        }
        if !passenger.affiliated_passengers.is_empty() {
            let _ = writeln!(out, "    Travels with: {}", passenger.affiliated_passengers.join(", "));
        }
    }

    out
}

fn person(out: &mut String, info: &PersonalInfo) {
    let _ = writeln!(out, "    Age: {}  Gender: {}  Nationality: {}", info.age, info.gender, info.nationality);
    if !info.languages.is_empty() {
        let _ = writeln!(out, "    Languages: {}", info.languages.join(", "));
    }
}
