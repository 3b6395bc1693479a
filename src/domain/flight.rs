// ==========================================
// Flight Roster - Flight profile
// ==========================================
// Immutable for the duration of one roster assembly run.
// Serialized as the roster document's `flightInfo`.
// ==========================================

use crate::domain::seat::{CabinLayout, LayoutError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// Endpoint - origin / destination airport
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub country: String,
    pub city: String,
    pub airport: String,
    /// IATA 3-letter code
    pub code: String,
}

impl Endpoint {
    pub fn new(country: &str, city: &str, airport: &str, code: &str) -> Self {
        Self {
            country: country.to_string(),
            city: city.to_string(),
            airport: airport.to_string(),
            code: code.to_string(),
        }
    }
}

// ==========================================
// FlightProfile
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightProfile {
    // ===== Identity =====
    pub flight_number: String,

    // ===== Schedule =====
    #[serde(rename = "date")]
    pub scheduled_at: NaiveDateTime,
    pub duration_minutes: u32,
    /// Great-circle distance (km), same unit as pilot range
    pub distance_km: f64,

    // ===== Route =====
    pub source: Endpoint,
    pub destination: Endpoint,

    // ===== Aircraft =====
    pub aircraft_type: String,
    pub total_seats: u32,
    /// Seats per block separated by aisles, e.g. "3-4-3"
    pub seating_plan: String,
    /// Rows 1..=business_rows form the business section
    #[serde(default)]
    pub business_rows: u32,
    #[serde(default)]
    pub standard_menu: Vec<String>,
}

impl FlightProfile {
    /// Derives the cabin layout (validates the seating plan)
    pub fn cabin_layout(&self) -> Result<CabinLayout, LayoutError> {
        CabinLayout::parse(&self.seating_plan, self.total_seats, self.business_rows)
    }

    /// Human-readable duration, e.g. "8h 45m"
    pub fn duration_label(&self) -> String {
        format!("{}h {}m", self.duration_minutes / 60, self.duration_minutes % 60)
    }

    /// Route label, e.g. "IST → JFK"
    pub fn route_label(&self) -> String {
        format!("{} → {}", self.source.code, self.destination.code)
    }
}
