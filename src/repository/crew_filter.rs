// ==========================================
// Flight Roster - Crew query filter
// ==========================================
// Lookup filter for crew listings, not an eligibility check:
// aircraft type is a case-insensitive substring of a restriction.
// ==========================================

use crate::domain::crew::CrewCandidate;
use crate::domain::types::CrewRole;

/// Every set field must hold. A field only one role carries
/// (`min_range` for pilots, `cabin_kind` for attendants) excludes the
/// other role.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrewFilter {
    pub role: Option<CrewRole>,
    pub aircraft_type: Option<String>,
    /// Pilot allowed range at least this many km
    pub min_range: Option<f64>,
    /// Regular / Chief / Chef, case-insensitive
    pub cabin_kind: Option<String>,
}

impl CrewFilter {
    pub fn role(mut self, role: CrewRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn aircraft_type(mut self, aircraft_type: impl Into<String>) -> Self {
        self.aircraft_type = Some(aircraft_type.into());
        self
    }

    pub fn min_range(mut self, km: f64) -> Self {
        self.min_range = Some(km);
        self
    }

    pub fn cabin_kind(mut self, kind: impl Into<String>) -> Self {
        self.cabin_kind = Some(kind.into());
        self
    }

    /// Whether members of `role` can match at all
    pub fn admits_role(&self, role: CrewRole) -> bool {
        if self.role.is_some_and(|r| r != role) {
            return false;
        }
        match role {
            CrewRole::FlightCrew => self.cabin_kind.is_none(),
            CrewRole::CabinCrew => self.min_range.is_none(),
        }
    }

    pub fn matches(&self, candidate: &CrewCandidate) -> bool {
        if !self.admits_role(candidate.role()) {
            return false;
        }
        match candidate {
            CrewCandidate::FlightCrew(pilot) => {
                self.min_range.map_or(true, |km| pilot.allowed_range >= km)
                    && self.type_matches(&pilot.vehicle_restriction)
            }
            CrewCandidate::CabinCrew(attendant) => {
                self.cabin_kind
                    .as_deref()
                    .map_or(true, |kind| attendant.kind.to_string().eq_ignore_ascii_case(kind.trim()))
                    && (self.aircraft_type.is_none()
                        || attendant.vehicle_restrictions.iter().any(|r| self.type_matches(r)))
            }
        }
    }

    fn type_matches(&self, restriction: &str) -> bool {
        match self.aircraft_type.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(wanted) => restriction.to_lowercase().contains(&wanted.to_lowercase()),
        }
    }
}
