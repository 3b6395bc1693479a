// ==========================================
// Flight Roster - Roster document
// ==========================================
// Produced once per assembly run, never mutated afterwards.
// Document shape: flightInfo / flightCrew / cabinCrew / passengers
// ==========================================

use crate::domain::crew::{CabinCrewMember, FlightCrewMember, PersonalInfo};
use crate::domain::flight::FlightProfile;
use crate::domain::passenger::PassengerCandidate;
use crate::domain::seat::{SeatAssignment, SeatIdentifier};
use crate::domain::types::SeatClass;
use serde::{Deserialize, Serialize};

// ==========================================
// RosterPassenger - passenger entry with resolved seat
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterPassenger {
    pub id: String,
    #[serde(flatten)]
    pub info: PersonalInfo,
    pub seat_type: SeatClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affiliated_passengers: Vec<String>,
    #[serde(flatten)]
    pub seat: SeatAssignment,
}

impl RosterPassenger {
    pub fn from_candidate(candidate: &PassengerCandidate, seat: SeatAssignment) -> Self {
        Self {
            id: candidate.id.clone(),
            info: candidate.info.clone(),
            seat_type: candidate.seat_type,
            parent_id: candidate.parent_id.clone(),
            affiliated_passengers: candidate.affiliated_passengers.clone(),
            seat,
        }
    }
}

// ==========================================
// Roster
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roster {
    flight_info: FlightProfile,
    flight_crew: Vec<FlightCrewMember>,
    cabin_crew: Vec<CabinCrewMember>,
    passengers: Vec<RosterPassenger>,
}

impl Roster {
    pub(crate) fn new(
        flight_info: FlightProfile,
        flight_crew: Vec<FlightCrewMember>,
        cabin_crew: Vec<CabinCrewMember>,
        passengers: Vec<RosterPassenger>,
    ) -> Self {
        Self {
            flight_info,
            flight_crew,
            cabin_crew,
            passengers,
        }
    }

    pub fn flight_info(&self) -> &FlightProfile {
        &self.flight_info
    }

    pub fn flight_crew(&self) -> &[FlightCrewMember] {
        &self.flight_crew
    }

    pub fn cabin_crew(&self) -> &[CabinCrewMember] {
        &self.cabin_crew
    }

    pub fn passengers(&self) -> &[RosterPassenger] {
        &self.passengers
    }

    pub fn passenger(&self, passenger_id: &str) -> Option<&RosterPassenger> {
        self.passengers.iter().find(|p| p.id == passenger_id)
    }

    /// Seat held by a passenger (None for unassigned / lap infants / unknown ids)
    pub fn seat_of(&self, passenger_id: &str) -> Option<SeatIdentifier> {
        self.passenger(passenger_id).and_then(|p| p.seat.seat())
    }

    pub fn unassigned_passengers(&self) -> impl Iterator<Item = &RosterPassenger> {
        self.passengers.iter().filter(|p| p.seat.is_unassigned())
    }

    pub fn occupied_seat_count(&self) -> usize {
        self.passengers.iter().filter(|p| p.seat.seat().is_some()).count()
    }

    pub fn chief(&self) -> Option<&CabinCrewMember> {
        self.cabin_crew.iter().find(|c| c.kind.is_chief())
    }
}
