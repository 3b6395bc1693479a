// ==========================================
// Flight Roster - Passenger candidates
// ==========================================

use crate::domain::crew::PersonalInfo;
use crate::domain::seat::SeatIdentifier;
use crate::domain::types::SeatClass;
use serde::{Deserialize, Serialize};

// ==========================================
// PassengerCandidate
// ==========================================
// parent_id: required for infants (infant rides on the parent's seat)
// affiliated_passengers: symmetric "travel together" relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerCandidate {
    pub id: String,
    #[serde(flatten)]
    pub info: PersonalInfo,
    pub seat_type: SeatClass,
    /// Pre-assigned seat, kept unconditionally
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat_number: Option<SeatIdentifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affiliated_passengers: Vec<String>,
}

impl PassengerCandidate {
    pub fn is_infant(&self) -> bool {
        self.seat_type == SeatClass::Infant
    }

    pub fn consumes_seat(&self) -> bool {
        self.seat_type.consumes_seat()
    }
}

// ==========================================
// PassengerBooking - passenger looked up across flights
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerBooking {
    pub flight_number: String,
    #[serde(flatten)]
    pub passenger: PassengerCandidate,
}
