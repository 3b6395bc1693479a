// ==========================================
// Flight Roster - Domain type definitions
// ==========================================
// Enumerations shared by crew, passenger and roster records.
// Serialized names match the roster document format.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// Seniority (flight crew)
// ==========================================
// Order: Trainee < Junior < Senior
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Seniority {
    Trainee,
    Junior,
    Senior,
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seniority::Trainee => write!(f, "Trainee"),
            Seniority::Junior => write!(f, "Junior"),
            Seniority::Senior => write!(f, "Senior"),
        }
    }
}

impl FromStr for Seniority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trainee" => Ok(Seniority::Trainee),
            "junior" => Ok(Seniority::Junior),
            "senior" => Ok(Seniority::Senior),
            other => Err(format!("unknown seniority: {}", other)),
        }
    }
}

// ==========================================
// Seat class (passenger)
// ==========================================
// Serialized lowercase: business / economy / infant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatClass {
    Business,
    Economy,
    Infant,
}

impl SeatClass {
    /// Whether passengers of this class occupy an allocator seat
    pub fn consumes_seat(&self) -> bool {
        !matches!(self, SeatClass::Infant)
    }
}

impl fmt::Display for SeatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeatClass::Business => write!(f, "business"),
            SeatClass::Economy => write!(f, "economy"),
            SeatClass::Infant => write!(f, "infant"),
        }
    }
}

impl FromStr for SeatClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "business" => Ok(SeatClass::Business),
            "economy" => Ok(SeatClass::Economy),
            "infant" => Ok(SeatClass::Infant),
            other => Err(format!("unknown seat class: {}", other)),
        }
    }
}

// ==========================================
// Cabin section
// ==========================================
// Business rows come first, economy rows follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CabinSection {
    Business,
    Economy,
}

impl fmt::Display for CabinSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CabinSection::Business => write!(f, "business"),
            CabinSection::Economy => write!(f, "economy"),
        }
    }
}

// ==========================================
// Crew role
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrewRole {
    FlightCrew,
    CabinCrew,
}

impl fmt::Display for CrewRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrewRole::FlightCrew => write!(f, "FlightCrew"),
            CrewRole::CabinCrew => write!(f, "CabinCrew"),
        }
    }
}
