// ==========================================
// Flight Roster - In-memory roster repository
// ==========================================
// Owns an injected snapshot. `demo()` builds the demo fleet:
//   TK1234 IST→JFK Boeing 777-300ER, TK5678 IST→LHR Airbus A320
// ==========================================

use crate::domain::crew::{CabinCrewKind, CabinCrewMember, CrewCandidate, FlightCrewMember, PersonalInfo};
use crate::domain::flight::{Endpoint, FlightProfile};
use crate::domain::passenger::{PassengerBooking, PassengerCandidate};
use crate::domain::types::{SeatClass, Seniority};
use crate::repository::crew_filter::CrewFilter;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::roster_repo_trait::RosterRepository;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct InMemoryRosterRepository {
    flights: BTreeMap<String, FlightProfile>,
    crew: Vec<CrewCandidate>,
    passengers: BTreeMap<String, Vec<PassengerCandidate>>,
}

impl InMemoryRosterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flight(mut self, flight: FlightProfile, passengers: Vec<PassengerCandidate>) -> Self {
        self.passengers.insert(flight.flight_number.clone(), passengers);
        self.flights.insert(flight.flight_number.clone(), flight);
        self
    }

    pub fn with_crew(mut self, crew: Vec<CrewCandidate>) -> Self {
        self.crew.extend(crew);
        self
    }

    pub fn flight(&self, flight_number: &str) -> Option<&FlightProfile> {
        self.flights.get(flight_number)
    }

    pub fn flights(&self) -> impl Iterator<Item = &FlightProfile> {
        self.flights.values()
    }

    pub fn crew(&self) -> &[CrewCandidate] {
        &self.crew
    }

    pub fn passengers(&self, flight_number: &str) -> &[PassengerCandidate] {
        self.passengers
            .get(flight_number)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Demo fixture set
    pub fn demo() -> Self {
        Self::new()
            .with_crew(demo_crew())
            .with_flight(demo_tk1234(), demo_tk1234_passengers())
            .with_flight(demo_tk5678(), demo_tk5678_passengers())
    }
}

#[async_trait]
impl RosterRepository for InMemoryRosterRepository {
    async fn fetch_flight(&self, flight_number: &str) -> RepositoryResult<FlightProfile> {
        self.flight(flight_number)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "Flight".to_string(),
                id: flight_number.to_string(),
            })
    }

    async fn fetch_crew_pool(&self) -> RepositoryResult<Vec<CrewCandidate>> {
        Ok(self.crew.clone())
    }

    async fn fetch_passenger_pool(&self, flight_number: &str) -> RepositoryResult<Vec<PassengerCandidate>> {
        Ok(self.passengers(flight_number).to_vec())
    }

    async fn list_flights(&self) -> RepositoryResult<Vec<String>> {
        Ok(self.flights.keys().cloned().collect())
    }

    async fn fetch_crew(&self, filter: &CrewFilter) -> RepositoryResult<Vec<CrewCandidate>> {
        Ok(self.crew.iter().filter(|c| filter.matches(c)).cloned().collect())
    }

    async fn fetch_crew_member(&self, crew_id: &str) -> RepositoryResult<CrewCandidate> {
        self.crew
            .iter()
            .find(|c| c.id() == crew_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "CrewMember".to_string(),
                id: crew_id.to_string(),
            })
    }

    async fn fetch_passenger(&self, passenger_id: &str) -> RepositoryResult<PassengerBooking> {
        self.passengers
            .iter()
            .find_map(|(flight_number, pool)| {
                pool.iter().find(|p| p.id == passenger_id).map(|p| PassengerBooking {
                    flight_number: flight_number.clone(),
                    passenger: p.clone(),
                })
            })
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "Passenger".to_string(),
                id: passenger_id.to_string(),
            })
    }
}

// ==========================================
// Demo fixtures
// ==========================================

fn istanbul() -> Endpoint {
    Endpoint::new("Turkey", "Istanbul", "Istanbul Airport", "IST")
}

fn schedule(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(hh, mm, 0))
        .unwrap_or_default()
}

fn demo_tk1234() -> FlightProfile {
    FlightProfile {
        flight_number: "TK1234".to_string(),
        scheduled_at: schedule(2024, 1, 15, 14, 30),
        duration_minutes: 8 * 60 + 45,
        distance_km: 8000.0,
        source: istanbul(),
        destination: Endpoint::new(
            "United States",
            "New York",
            "John F. Kennedy International Airport",
            "JFK",
        ),
        aircraft_type: "Boeing 777-300ER".to_string(),
        total_seats: 396,
        seating_plan: "3-4-3".to_string(),
        business_rows: 4,
        standard_menu: vec![
            "Turkish Breakfast".to_string(),
            "International Cuisine".to_string(),
            "Vegetarian Options".to_string(),
        ],
    }
}

fn demo_tk5678() -> FlightProfile {
    FlightProfile {
        flight_number: "TK5678".to_string(),
        scheduled_at: schedule(2024, 1, 16, 10, 15),
        duration_minutes: 4 * 60 + 20,
        distance_km: 2500.0,
        source: istanbul(),
        destination: Endpoint::new("United Kingdom", "London", "Heathrow Airport", "LHR"),
        aircraft_type: "Airbus A320".to_string(),
        total_seats: 180,
        seating_plan: "3-3".to_string(),
        business_rows: 3,
        standard_menu: vec![
            "Light Meal".to_string(),
            "Snacks".to_string(),
            "Beverages".to_string(),
        ],
    }
}

fn pilot(
    id: &str,
    info: PersonalInfo,
    seniority: Seniority,
    restriction: &str,
    range: f64,
) -> CrewCandidate {
    CrewCandidate::FlightCrew(FlightCrewMember {
        id: id.to_string(),
        info,
        seniority,
        vehicle_restriction: restriction.to_string(),
        allowed_range: range,
    })
}

fn attendant(id: &str, info: PersonalInfo, kind: CabinCrewKind, restrictions: &[&str]) -> CrewCandidate {
    CrewCandidate::CabinCrew(CabinCrewMember {
        id: id.to_string(),
        info,
        kind,
        vehicle_restrictions: restrictions.iter().map(|r| r.to_string()).collect(),
    })
}

fn recipes(items: &[&str]) -> CabinCrewKind {
    CabinCrewKind::Chef {
        recipes: items.iter().map(|r| r.to_string()).collect(),
    }
}

fn demo_crew() -> Vec<CrewCandidate> {
    vec![
        pilot(
            "FC001",
            PersonalInfo::new("Captain John Smith", 45, "Male", "Turkish", &["Turkish", "English", "German"]),
            Seniority::Senior,
            "Boeing 777",
            15000.0,
        ),
        pilot(
            "FC002",
            PersonalInfo::new("First Officer Sarah Johnson", 32, "Female", "American", &["English", "Spanish"]),
            Seniority::Junior,
            "Boeing 777",
            12000.0,
        ),
        pilot(
            "FC003",
            PersonalInfo::new("Captain Ahmed Yilmaz", 52, "Male", "Turkish", &["Turkish", "English", "Arabic"]),
            Seniority::Senior,
            "Airbus A320",
            8000.0,
        ),
        pilot(
            "FC004",
            PersonalInfo::new("Trainee Pilot Mark Davis", 25, "Male", "Canadian", &["English"]),
            Seniority::Trainee,
            "Boeing 737",
            4000.0,
        ),
        attendant(
            "CC001",
            PersonalInfo::new("Maria Rodriguez", 35, "Female", "Spanish", &["Spanish", "English", "Turkish"]),
            CabinCrewKind::Chief,
            &["Boeing 777", "Airbus A320"],
        ),
        attendant(
            "CC002",
            PersonalInfo::new("Ahmed Hassan", 28, "Male", "Turkish", &["Turkish", "Arabic", "English"]),
            CabinCrewKind::Regular,
            &["Boeing 777", "Airbus A320"],
        ),
        attendant(
            "CC003",
            PersonalInfo::new("Chef Pierre Dubois", 42, "Male", "French", &["French", "English"]),
            recipes(&["Coq au Vin", "Beef Bourguignon", "Ratatouille", "French Onion Soup"]),
            &["Boeing 777"],
        ),
        attendant(
            "CC004",
            PersonalInfo::new("Lisa Chen", 26, "Female", "Chinese", &["Chinese", "English"]),
            CabinCrewKind::Regular,
            &["Boeing 777", "Airbus A320"],
        ),
        attendant(
            "CC005",
            PersonalInfo::new("Chef Marco Rossi", 38, "Male", "Italian", &["Italian", "English"]),
            recipes(&["Risotto Milanese", "Osso Buco", "Tiramisu"]),
            &["Boeing 777", "Airbus A320"],
        ),
    ]
}

fn booked(
    id: &str,
    info: PersonalInfo,
    seat_type: SeatClass,
    seat_number: Option<&str>,
) -> PassengerCandidate {
    PassengerCandidate {
        id: id.to_string(),
        info,
        seat_type,
        seat_number: seat_number.and_then(|s| s.parse().ok()),
        parent_id: None,
        affiliated_passengers: vec![],
    }
}

fn demo_tk1234_passengers() -> Vec<PassengerCandidate> {
    let mut infant = booked(
        "P004",
        PersonalInfo::new("Baby Emma Brown", 1, "Female", "Canadian", &[]),
        SeatClass::Infant,
        None,
    );
    infant.parent_id = Some("P003".to_string());

    let mut anna = booked(
        "P005",
        PersonalInfo::new("Anna Wilson", 31, "Female", "German", &["German", "English"]),
        SeatClass::Economy,
        None,
    );
    anna.affiliated_passengers = vec!["P006".to_string()];

    let mut thomas = booked(
        "P006",
        PersonalInfo::new("Thomas Wilson", 33, "Male", "German", &["German"]),
        SeatClass::Economy,
        None,
    );
    thomas.affiliated_passengers = vec!["P005".to_string()];

    vec![
        booked(
            "P001",
            PersonalInfo::new("Robert Johnson", 35, "Male", "American", &["English"]),
            SeatClass::Business,
            Some("1A"),
        ),
        booked(
            "P002",
            PersonalInfo::new("Emily Davis", 28, "Female", "British", &["English"]),
            SeatClass::Economy,
            Some("12F"),
        ),
        booked(
            "P003",
            PersonalInfo::new("Michael Brown", 42, "Male", "Canadian", &["English", "French"]),
            SeatClass::Business,
            Some("2C"),
        ),
        infant,
        anna,
        thomas,
    ]
}

fn demo_tk5678_passengers() -> Vec<PassengerCandidate> {
    vec![
        booked(
            "P101",
            PersonalInfo::new("James Smith", 45, "Male", "British", &["English"]),
            SeatClass::Business,
            Some("1B"),
        ),
        booked(
            "P102",
            PersonalInfo::new("Sophie Martin", 29, "Female", "French", &["French", "English"]),
            SeatClass::Economy,
            Some("15A"),
        ),
    ]
}
