// ==========================================
// Flight Roster - Eligibility rules
// ==========================================
// FlightCrew: restriction matches aircraft type AND range >= distance
// CabinCrew: aircraft type matches one of the restrictions
// Stateless, no side effects, never fails: missing data = ineligible
// ==========================================

use crate::domain::crew::{CabinCrewMember, CrewCandidate, FlightCrewMember};
use crate::domain::flight::FlightProfile;
use tracing::{debug, instrument};

// ==========================================
// EligibilityResult - pool split by role
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct EligibilityResult {
    /// Eligible pilots, pool order
    pub flight_crew: Vec<FlightCrewMember>,
    /// Eligible attendants, pool order
    pub cabin_crew: Vec<CabinCrewMember>,
    /// (crew_id, reason)
    pub rejected: Vec<(String, String)>,
}

// ==========================================
// EligibilityRules - pure functions
// ==========================================
pub struct EligibilityRules;

impl EligibilityRules {
    /// Whether a crew restriction covers an aircraft type
    ///
    /// # Rules
    /// - comparison is case-insensitive, surrounding whitespace ignored
    /// - exact match, or the aircraft type extends the restriction after a
    ///   non-alphanumeric boundary ("Boeing 777" covers "Boeing 777-300ER")
    /// - empty restriction never matches
    pub fn aircraft_type_matches(restriction: &str, aircraft_type: &str) -> bool {
        let restriction = restriction.trim().to_lowercase();
        let aircraft_type = aircraft_type.trim().to_lowercase();

        if restriction.is_empty() || aircraft_type.is_empty() {
            return false;
        }
        if aircraft_type == restriction {
            return true;
        }

        match aircraft_type.strip_prefix(&restriction) {
            Some(rest) => rest
                .chars()
                .next()
                .map(|c| !c.is_alphanumeric())
                .unwrap_or(false),
            None => false,
        }
    }

    /// Evaluates a pilot against the flight
    ///
    /// # Returns
    /// - (eligible, reasons)
    pub fn evaluate_flight_crew(member: &FlightCrewMember, flight: &FlightProfile) -> (bool, Vec<String>) {
        let mut reasons = Vec::new();

        if !Self::aircraft_type_matches(&member.vehicle_restriction, &flight.aircraft_type) {
            reasons.push(format!(
                "TYPE_MISMATCH: restriction={}, aircraft={}",
                member.vehicle_restriction, flight.aircraft_type
            ));
        }

        let range_known = member.allowed_range.is_finite() && flight.distance_km.is_finite();
        if !range_known || member.allowed_range < flight.distance_km {
            reasons.push(format!(
                "RANGE_EXCEEDED: allowed_range={}, distance={}",
                member.allowed_range, flight.distance_km
            ));
        }

        (reasons.is_empty(), reasons)
    }

    /// Evaluates an attendant against the flight
    pub fn evaluate_cabin_crew(member: &CabinCrewMember, flight: &FlightProfile) -> (bool, Vec<String>) {
        let covered = member
            .vehicle_restrictions
            .iter()
            .any(|r| Self::aircraft_type_matches(r, &flight.aircraft_type));

        if covered {
            (true, Vec::new())
        } else {
            (
                false,
                vec![format!(
                    "TYPE_MISMATCH: restrictions=[{}], aircraft={}",
                    member.vehicle_restrictions.join(","),
                    flight.aircraft_type
                )],
            )
        }
    }

    /// IsEligible(candidate, flight)
    pub fn is_eligible(candidate: &CrewCandidate, flight: &FlightProfile) -> bool {
        match candidate {
            CrewCandidate::FlightCrew(member) => Self::evaluate_flight_crew(member, flight).0,
            CrewCandidate::CabinCrew(member) => Self::evaluate_cabin_crew(member, flight).0,
        }
    }

    /// Splits a crew pool into eligible pilots / attendants, keeping pool order
    #[instrument(skip(pool, flight), fields(flight_number = %flight.flight_number, pool_size = pool.len()))]
    pub fn filter_eligible(pool: &[CrewCandidate], flight: &FlightProfile) -> EligibilityResult {
        let mut result = EligibilityResult::default();

        for candidate in pool {
            let (eligible, reasons) = match candidate {
                CrewCandidate::FlightCrew(member) => Self::evaluate_flight_crew(member, flight),
                CrewCandidate::CabinCrew(member) => Self::evaluate_cabin_crew(member, flight),
            };

            if !eligible {
                debug!(crew_id = candidate.id(), reasons = %reasons.join("; "), "crew rejected");
                result
                    .rejected
                    .push((candidate.id().to_string(), reasons.join("; ")));
                continue;
            }

            match candidate {
                CrewCandidate::FlightCrew(member) => result.flight_crew.push(member.clone()),
                CrewCandidate::CabinCrew(member) => result.cabin_crew.push(member.clone()),
            }
        }

        result
    }
}
