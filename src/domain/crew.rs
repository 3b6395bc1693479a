// ==========================================
// Flight Roster - Crew candidates
// ==========================================
// CrewCandidate = FlightCrew | CabinCrew (tagged variant)
// Chef recipes exist only on the Chef variant.
// ==========================================

use crate::domain::types::{CrewRole, Seniority};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// PersonalInfo - shared personal attributes
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub age: u8,
    pub gender: String,
    pub nationality: String,
    /// Language of declaration first
    #[serde(default)]
    pub languages: Vec<String>,
}

impl PersonalInfo {
    pub fn new(name: &str, age: u8, gender: &str, nationality: &str, languages: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            age,
            gender: gender.to_string(),
            nationality: nationality.to_string(),
            languages: languages.iter().map(|l| l.to_string()).collect(),
        }
    }

    /// Initials used by the seat map, e.g. "Captain John Smith" -> "CJS"
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

// ==========================================
// FlightCrewMember (pilot)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightCrewMember {
    pub id: String,
    #[serde(flatten)]
    pub info: PersonalInfo,
    pub seniority: Seniority,
    /// Single aircraft type (family) the pilot may fly
    pub vehicle_restriction: String,
    /// Maximum range (km)
    pub allowed_range: f64,
}

// ==========================================
// CabinCrewKind
// ==========================================
// Flattened into the member as `type` (+ `recipes` for Chef).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CabinCrewKind {
    Regular,
    Chief,
    Chef {
        #[serde(default)]
        recipes: Vec<String>,
    },
}

impl CabinCrewKind {
    pub fn is_chief(&self) -> bool {
        matches!(self, CabinCrewKind::Chief)
    }

    pub fn recipes(&self) -> &[String] {
        match self {
            CabinCrewKind::Chef { recipes } => recipes,
            _ => &[],
        }
    }
}

impl fmt::Display for CabinCrewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CabinCrewKind::Regular => write!(f, "Regular"),
            CabinCrewKind::Chief => write!(f, "Chief"),
            CabinCrewKind::Chef { .. } => write!(f, "Chef"),
        }
    }
}

// ==========================================
// CabinCrewMember (attendant)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CabinCrewMember {
    pub id: String,
    #[serde(flatten)]
    pub info: PersonalInfo,
    #[serde(flatten)]
    pub kind: CabinCrewKind,
    /// Aircraft types (families) the attendant may serve
    pub vehicle_restrictions: Vec<String>,
}

// ==========================================
// CrewCandidate
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum CrewCandidate {
    FlightCrew(FlightCrewMember),
    CabinCrew(CabinCrewMember),
}

impl CrewCandidate {
    pub fn id(&self) -> &str {
        match self {
            CrewCandidate::FlightCrew(c) => &c.id,
            CrewCandidate::CabinCrew(c) => &c.id,
        }
    }

    pub fn role(&self) -> CrewRole {
        match self {
            CrewCandidate::FlightCrew(_) => CrewRole::FlightCrew,
            CrewCandidate::CabinCrew(_) => CrewRole::CabinCrew,
        }
    }

    pub fn info(&self) -> &PersonalInfo {
        match self {
            CrewCandidate::FlightCrew(c) => &c.info,
            CrewCandidate::CabinCrew(c) => &c.info,
        }
    }
}

impl From<FlightCrewMember> for CrewCandidate {
    fn from(member: FlightCrewMember) -> Self {
        CrewCandidate::FlightCrew(member)
    }
}

impl From<CabinCrewMember> for CrewCandidate {
    fn from(member: CabinCrewMember) -> Self {
        CrewCandidate::CabinCrew(member)
    }
}
