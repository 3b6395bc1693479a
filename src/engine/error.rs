// ==========================================
// Flight Roster - Engine error and warning types
// ==========================================
// Fatal: AssemblyError (returned to the caller, never masked)
// Recoverable: RosterWarning (recorded, assembly still succeeds)
// Tool: thiserror derive
// ==========================================

use crate::domain::types::{CabinSection, CrewRole};
use crate::domain::seat::{LayoutError, SeatIdentifier};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Fatal roster assembly failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyError {
    #[error("insufficient crew: flight={flight_number}, no eligible {role}")]
    InsufficientCrew { flight_number: String, role: String },

    #[error("seat conflict: flight={flight_number}, seat={seat} pre-assigned to both {first} and {second}")]
    SeatConflict {
        flight_number: String,
        seat: SeatIdentifier,
        first: String,
        second: String,
    },

    #[error("duplicate passenger id: flight={flight_number}, passenger_id={passenger_id}")]
    DuplicatePassenger {
        flight_number: String,
        passenger_id: String,
    },

    #[error("invalid flight profile: flight={flight_number}: {source}")]
    InvalidFlightProfile {
        flight_number: String,
        #[source]
        source: LayoutError,
    },
}

impl AssemblyError {
    pub fn insufficient_crew(flight_number: &str, role: CrewRole) -> Self {
        AssemblyError::InsufficientCrew {
            flight_number: flight_number.to_string(),
            role: role.to_string(),
        }
    }
}

/// Engine Result alias
pub type AssemblyResult<T> = Result<T, AssemblyError>;

// ==========================================
// RosterWarning
// ==========================================

/// Kind of reference that could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceKind {
    Affiliate,
    Parent,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Affiliate => write!(f, "affiliate"),
            ReferenceKind::Parent => write!(f, "parent"),
        }
    }
}

/// Recoverable conditions found while assembling a roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RosterWarning {
    /// Reference to a passenger not in the pool; the link is dropped
    DanglingReference {
        passenger_id: String,
        missing_id: String,
        reference: ReferenceKind,
    },
    /// Infant with no resolvable parent; left unassigned
    InfantWithoutParent { passenger_id: String },
    /// Pre-assigned seat outside the cabin layout; passenger re-allocated
    InvalidPreassignedSeat { passenger_id: String, seat: String },
    /// Additional Chief candidates not retained on the roster
    SurplusChief { crew_id: String, retained_chief: String },
    /// No eligible Senior flight crew
    NoSeniorPilot,
    /// Demand exceeded the section's free seats
    CapacityExceeded {
        section: CabinSection,
        unassigned: Vec<String>,
    },
}

impl fmt::Display for RosterWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterWarning::DanglingReference {
                passenger_id,
                missing_id,
                reference,
            } => write!(
                f,
                "DANGLING_REFERENCE: passenger={} {}={} not found",
                passenger_id, reference, missing_id
            ),
            RosterWarning::InfantWithoutParent { passenger_id } => {
                write!(f, "INFANT_WITHOUT_PARENT: passenger={}", passenger_id)
            }
            RosterWarning::InvalidPreassignedSeat { passenger_id, seat } => write!(
                f,
                "INVALID_PREASSIGNED_SEAT: passenger={} seat={}",
                passenger_id, seat
            ),
            RosterWarning::SurplusChief {
                crew_id,
                retained_chief,
            } => write!(
                f,
                "SURPLUS_CHIEF: crew={} not retained (chief={})",
                crew_id, retained_chief
            ),
            RosterWarning::NoSeniorPilot => write!(f, "NO_SENIOR_PILOT"),
            RosterWarning::CapacityExceeded {
                section,
                unassigned,
            } => write!(
                f,
                "CAPACITY_EXCEEDED: section={} unassigned=[{}]",
                section,
                unassigned.join(",")
            ),
        }
    }
}
