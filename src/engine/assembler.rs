// ==========================================
// Flight Roster - Roster assembler
// ==========================================
// Orchestrates: eligibility -> crew selection -> affiliation -> seats
// Pure: no I/O, no shared state, same inputs -> same roster
// ==========================================

use crate::domain::crew::{CabinCrewMember, CrewCandidate, FlightCrewMember};
use crate::domain::flight::FlightProfile;
use crate::domain::passenger::PassengerCandidate;
use crate::domain::roster::{Roster, RosterPassenger};
use crate::domain::types::{CrewRole, Seniority};
use crate::engine::affiliation::AffiliationResolver;
use crate::engine::eligibility::EligibilityRules;
use crate::engine::error::{AssemblyError, AssemblyResult, RosterWarning};
use crate::engine::seat_allocator::SeatAllocator;
use tracing::{debug, info, instrument, warn};

// ==========================================
// AssemblyPolicy
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssemblyPolicy {
    /// Fail when no eligible Senior pilot exists (otherwise only warn)
    pub require_senior_pilot: bool,
}

// ==========================================
// AssemblyOutcome - roster + recoverable warnings
// ==========================================
#[derive(Debug, Clone)]
pub struct AssemblyOutcome {
    pub roster: Roster,
    pub warnings: Vec<RosterWarning>,
}

impl AssemblyOutcome {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

// ==========================================
// RosterAssembler
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct RosterAssembler {
    policy: AssemblyPolicy,
}

impl RosterAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: AssemblyPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> AssemblyPolicy {
        self.policy
    }

    /// Assembles the roster of one flight
    ///
    /// # Steps
    /// 1) validate the cabin layout
    /// 2) filter crew by eligibility, both roles required
    /// 3) keep every eligible pilot, at most one Chief among attendants
    /// 4) resolve affiliation groups
    /// 5) allocate seats
    /// 6) compose the roster in pool order
    ///
    /// # Errors
    /// - InvalidFlightProfile / InsufficientCrew / DuplicatePassenger / SeatConflict
    #[instrument(skip(self, flight, crew_pool, passenger_pool), fields(
        flight_number = %flight.flight_number,
        crew_pool = crew_pool.len(),
        passenger_pool = passenger_pool.len()
    ))]
    pub fn assemble(
        &self,
        flight: &FlightProfile,
        crew_pool: &[CrewCandidate],
        passenger_pool: &[PassengerCandidate],
    ) -> AssemblyResult<AssemblyOutcome> {
        let flight_number = flight.flight_number.as_str();

        // ==========================================
        // Step 1: layout
        // ==========================================
        let layout = flight
            .cabin_layout()
            .map_err(|source| AssemblyError::InvalidFlightProfile {
                flight_number: flight_number.to_string(),
                source,
            })?;

        // ==========================================
        // Step 2-3: crew
        // ==========================================
        debug!("step 2: crew eligibility");
        let eligible = EligibilityRules::filter_eligible(crew_pool, flight);
        if eligible.flight_crew.is_empty() {
            return Err(AssemblyError::insufficient_crew(flight_number, CrewRole::FlightCrew));
        }
        if eligible.cabin_crew.is_empty() {
            return Err(AssemblyError::insufficient_crew(flight_number, CrewRole::CabinCrew));
        }

        let mut warnings = Vec::new();
        self.check_seniority(flight_number, &eligible.flight_crew, &mut warnings)?;
        let flight_crew = eligible.flight_crew;
        let cabin_crew = Self::select_cabin_crew(eligible.cabin_crew, &mut warnings);

        // ==========================================
        // Step 4-5: passengers
        // ==========================================
        debug!("step 4: affiliation groups");
        let resolution = AffiliationResolver::resolve(flight_number, passenger_pool)?;
        warnings.extend(resolution.warnings.iter().cloned());

        debug!("step 5: seat allocation");
        let allocation = SeatAllocator::allocate(flight_number, &layout, passenger_pool, &resolution)?;
        warnings.extend(allocation.warnings.iter().cloned());

        // ==========================================
        // Step 6: compose
        // ==========================================
        let passengers: Vec<RosterPassenger> = passenger_pool
            .iter()
            .map(|p| RosterPassenger::from_candidate(p, allocation.assignment_of(&p.id)))
            .collect();

        let roster = Roster::new(flight.clone(), flight_crew, cabin_crew, passengers);

        info!(
            flight_crew = roster.flight_crew().len(),
            cabin_crew = roster.cabin_crew().len(),
            passengers = roster.passengers().len(),
            seated = roster.occupied_seat_count(),
            unassigned = roster.unassigned_passengers().count(),
            warnings = warnings.len(),
            "roster assembled"
        );

        Ok(AssemblyOutcome { roster, warnings })
    }

    fn check_seniority(
        &self,
        flight_number: &str,
        flight_crew: &[FlightCrewMember],
        warnings: &mut Vec<RosterWarning>,
    ) -> AssemblyResult<()> {
        if flight_crew.iter().any(|c| c.seniority == Seniority::Senior) {
            return Ok(());
        }
        if self.policy.require_senior_pilot {
            return Err(AssemblyError::InsufficientCrew {
                flight_number: flight_number.to_string(),
                role: format!("{} {}", Seniority::Senior, CrewRole::FlightCrew),
            });
        }
        warn!("no eligible senior pilot");
        warnings.push(RosterWarning::NoSeniorPilot);
        Ok(())
    }

    /// Keeps pool order; only the Chief with the smallest id survives
    fn select_cabin_crew(
        cabin_crew: Vec<CabinCrewMember>,
        warnings: &mut Vec<RosterWarning>,
    ) -> Vec<CabinCrewMember> {
        let retained = cabin_crew
            .iter()
            .filter(|c| c.kind.is_chief())
            .map(|c| c.id.clone())
            .min();

        let Some(retained) = retained else {
            return cabin_crew;
        };

        cabin_crew
            .into_iter()
            .filter(|c| {
                if c.kind.is_chief() && c.id != retained {
                    warn!(crew_id = %c.id, retained_chief = %retained, "surplus chief not retained");
                    warnings.push(RosterWarning::SurplusChief {
                        crew_id: c.id.clone(),
                        retained_chief: retained.clone(),
                    });
                    false
                } else {
                    true
                }
            })
            .collect()
    }
}
