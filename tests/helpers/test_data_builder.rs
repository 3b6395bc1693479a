// ==========================================
// Test data builders - flights, crew, passengers
// ==========================================

use chrono::NaiveDate;
use flight_roster::domain::crew::{CabinCrewKind, CabinCrewMember, CrewCandidate, FlightCrewMember, PersonalInfo};
use flight_roster::domain::flight::{Endpoint, FlightProfile};
use flight_roster::domain::passenger::PassengerCandidate;
use flight_roster::domain::types::{SeatClass, Seniority};

// ==========================================
// FlightProfile builder
// ==========================================

pub struct FlightBuilder {
    flight_number: String,
    aircraft_type: String,
    distance_km: f64,
    total_seats: u32,
    seating_plan: String,
    business_rows: u32,
}

impl FlightBuilder {
    pub fn new(flight_number: &str) -> Self {
        Self {
            flight_number: flight_number.to_string(),
            aircraft_type: "Airbus A320".to_string(),
            distance_km: 2500.0,
            total_seats: 180,
            seating_plan: "3-3".to_string(),
            business_rows: 3,
        }
    }

    pub fn aircraft(mut self, aircraft_type: &str) -> Self {
        self.aircraft_type = aircraft_type.to_string();
        self
    }

    pub fn distance(mut self, km: f64) -> Self {
        self.distance_km = km;
        self
    }

    pub fn cabin(mut self, seating_plan: &str, total_seats: u32, business_rows: u32) -> Self {
        self.seating_plan = seating_plan.to_string();
        self.total_seats = total_seats;
        self.business_rows = business_rows;
        self
    }

    pub fn build(self) -> FlightProfile {
        FlightProfile {
            flight_number: self.flight_number,
            scheduled_at: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            duration_minutes: 180,
            distance_km: self.distance_km,
            source: Endpoint::new("Turkey", "Istanbul", "Istanbul Airport", "IST"),
            destination: Endpoint::new("Germany", "Berlin", "Berlin Brandenburg Airport", "BER"),
            aircraft_type: self.aircraft_type,
            total_seats: self.total_seats,
            seating_plan: self.seating_plan,
            business_rows: self.business_rows,
            standard_menu: vec!["Snacks".to_string()],
        }
    }
}

// ==========================================
// Crew builders
// ==========================================

pub fn pilot(id: &str, seniority: Seniority, restriction: &str, range: f64) -> CrewCandidate {
    CrewCandidate::FlightCrew(FlightCrewMember {
        id: id.to_string(),
        info: PersonalInfo::new(&format!("Pilot {}", id), 40, "Male", "Turkish", &["Turkish", "English"]),
        seniority,
        vehicle_restriction: restriction.to_string(),
        allowed_range: range,
    })
}

pub fn attendant(id: &str, kind: CabinCrewKind, restrictions: &[&str]) -> CrewCandidate {
    CrewCandidate::CabinCrew(CabinCrewMember {
        id: id.to_string(),
        info: PersonalInfo::new(&format!("Attendant {}", id), 30, "Female", "Turkish", &["Turkish"]),
        kind,
        vehicle_restrictions: restrictions.iter().map(|r| r.to_string()).collect(),
    })
}

/// Senior pilot + regular attendant, both qualified for `aircraft`
pub fn minimal_crew(aircraft: &str) -> Vec<CrewCandidate> {
    vec![
        pilot("FC900", Seniority::Senior, aircraft, 20000.0),
        attendant("CC900", CabinCrewKind::Regular, &[aircraft]),
    ]
}

// ==========================================
// PassengerCandidate builder
// ==========================================

pub struct PassengerBuilder {
    inner: PassengerCandidate,
}

impl PassengerBuilder {
    pub fn new(id: &str, seat_type: SeatClass) -> Self {
        Self {
            inner: PassengerCandidate {
                id: id.to_string(),
                info: PersonalInfo::new(&format!("Passenger {}", id), 35, "Female", "German", &["German"]),
                seat_type,
                seat_number: None,
                parent_id: None,
                affiliated_passengers: vec![],
            },
        }
    }

    pub fn economy(id: &str) -> Self {
        Self::new(id, SeatClass::Economy)
    }

    pub fn business(id: &str) -> Self {
        Self::new(id, SeatClass::Business)
    }

    pub fn infant_of(id: &str, parent_id: &str) -> Self {
        let mut builder = Self::new(id, SeatClass::Infant);
        builder.inner.info.age = 1;
        builder.inner.parent_id = Some(parent_id.to_string());
        builder
    }

    pub fn seat(mut self, seat: &str) -> Self {
        self.inner.seat_number = Some(seat.parse().unwrap());
        self
    }

    pub fn with(mut self, affiliates: &[&str]) -> Self {
        self.inner.affiliated_passengers = affiliates.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn build(self) -> PassengerCandidate {
        self.inner
    }
}

/// `n` economy singletons E001..En
pub fn economy_singletons(n: usize) -> Vec<PassengerCandidate> {
    (1..=n)
        .map(|i| PassengerBuilder::economy(&format!("E{:03}", i)).build())
        .collect()
}
