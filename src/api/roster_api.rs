// ==========================================
// Flight Roster - Roster API
// ==========================================
// Use case: fetch -> assemble -> present / export
// The engine receives resolved snapshots only; all I/O happens here.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::RosterConfigReader;
use crate::domain::crew::CrewCandidate;
use crate::domain::flight::FlightProfile;
use crate::domain::passenger::{PassengerBooking, PassengerCandidate};
use crate::domain::roster::Roster;
use crate::engine::{AssemblyOutcome, AssemblyPolicy, RosterAssembler};
use crate::generator::PassengerGenerator;
use crate::presenter;
use crate::repository::{CrewFilter, RosterRepository};
use chrono::NaiveDate;
use futures::future::join_all;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

// ==========================================
// RosterView
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RosterView {
    #[default]
    Tabular,
    SeatMap,
    Extended,
}

impl FromStr for RosterView {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tabular" | "table" => Ok(RosterView::Tabular),
            "seat-map" | "seatmap" | "plane" => Ok(RosterView::SeatMap),
            "extended" => Ok(RosterView::Extended),
            other => Err(ApiError::InvalidInput(format!("unknown view: {}", other))),
        }
    }
}

impl fmt::Display for RosterView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterView::Tabular => write!(f, "tabular"),
            RosterView::SeatMap => write!(f, "seat-map"),
            RosterView::Extended => write!(f, "extended"),
        }
    }
}

// ==========================================
// RosterApi
// ==========================================
pub struct RosterApi<R, C>
where
    R: RosterRepository,
    C: RosterConfigReader,
{
    repository: Arc<R>,
    config: Arc<C>,
}

impl<R, C> RosterApi<R, C>
where
    R: RosterRepository,
    C: RosterConfigReader,
{
    pub fn new(repository: Arc<R>, config: Arc<C>) -> Self {
        Self { repository, config }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Generates the roster of one flight from stored pools
    ///
    /// # Errors
    /// - InvalidInput: malformed flight number
    /// - FlightNotFound
    /// - InsufficientCrew / SeatConflict / DataIntegrity / InvalidFlightProfile
    #[instrument(skip(self), fields(run_id = %uuid::Uuid::new_v4()))]
    pub async fn generate_roster(&self, flight_number: &str) -> ApiResult<AssemblyOutcome> {
        let flight_number = validate_flight_number(flight_number)?;
        let flight = self.repository.fetch_flight(&flight_number).await?;
        let passengers = self.repository.fetch_passenger_pool(&flight_number).await?;
        self.assemble(&flight, &passengers).await
    }

    /// Generates a roster with a freshly generated demo passenger pool
    #[instrument(skip(self), fields(run_id = %uuid::Uuid::new_v4()))]
    pub async fn generate_demo_roster(&self, flight_number: &str) -> ApiResult<AssemblyOutcome> {
        let flight_number = validate_flight_number(flight_number)?;
        let flight = self.repository.fetch_flight(&flight_number).await?;
        let settings = self
            .config
            .get_generator_settings()
            .await
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        let passengers = PassengerGenerator::from_settings(settings).generate(&flight);
        self.assemble(&flight, &passengers).await
    }

    /// Generates rosters for several flights concurrently, results in input order
    pub async fn generate_rosters(&self, flight_numbers: &[&str]) -> Vec<ApiResult<AssemblyOutcome>> {
        join_all(flight_numbers.iter().map(|f| self.generate_roster(f))).await
    }

    pub async fn list_flights(&self) -> ApiResult<Vec<String>> {
        Ok(self.repository.list_flights().await?)
    }

    // ==========================================
    // Lookups
    // ==========================================

    /// Crew listing, e.g. pilots able to fly a type over a distance
    ///
    /// # Errors
    /// - InvalidInput: negative or non-finite `min_range`
    pub async fn find_crew(&self, filter: CrewFilter) -> ApiResult<Vec<CrewCandidate>> {
        if filter.min_range.is_some_and(|km| !km.is_finite() || km < 0.0) {
            return Err(ApiError::InvalidInput(format!("invalid minimum range: {:?}", filter.min_range)));
        }
        let crew = self.repository.fetch_crew(&filter).await?;
        debug!(?filter, matched = crew.len(), "crew query");
        Ok(crew)
    }

    /// One crew member (pilot or attendant) by id
    pub async fn crew_member(&self, crew_id: &str) -> ApiResult<CrewCandidate> {
        let crew_id = validate_id(crew_id, "crew id")?;
        Ok(self.repository.fetch_crew_member(&crew_id).await?)
    }

    /// A passenger by id with the flight it is booked on
    pub async fn find_passenger(&self, passenger_id: &str) -> ApiResult<PassengerBooking> {
        let passenger_id = validate_id(passenger_id, "passenger id")?;
        Ok(self.repository.fetch_passenger(&passenger_id).await?)
    }

    /// Renders a roster in the requested view
    pub fn render(&self, roster: &Roster, view: RosterView) -> String {
        match view {
            RosterView::Tabular => presenter::tabular::render(roster),
            RosterView::SeatMap => presenter::seat_map::render(roster),
            RosterView::Extended => presenter::extended::render(roster),
        }
    }

    /// Exports the roster JSON into the configured directory
    pub async fn export(&self, roster: &Roster, date: NaiveDate) -> ApiResult<PathBuf> {
        let dir = self
            .config
            .get_export_directory()
            .await
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        Ok(presenter::export_file(roster, &PathBuf::from(dir), date)?)
    }

    async fn assemble(&self, flight: &FlightProfile, passengers: &[PassengerCandidate]) -> ApiResult<AssemblyOutcome> {
        let crew = self.repository.fetch_crew_pool().await?;
        let policy = AssemblyPolicy {
            require_senior_pilot: self
                .config
                .get_require_senior_pilot()
                .await
                .map_err(|e| ApiError::ConfigError(e.to_string()))?,
        };

        let outcome = RosterAssembler::with_policy(policy).assemble(flight, &crew, passengers)?;
        for warning in &outcome.warnings {
            warn!(flight_number = %flight.flight_number, %warning, "roster warning");
        }
        info!(
            flight_number = %flight.flight_number,
            warnings = outcome.warnings.len(),
            "roster generated"
        );
        Ok(outcome)
    }
}

/// Trims and upper-cases; only ASCII letters and digits are accepted
fn validate_flight_number(raw: &str) -> ApiResult<String> {
    validate_id(raw, "flight number")
}

fn validate_id(raw: &str, what: &str) -> ApiResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput(format!("{} is empty", what)));
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ApiError::InvalidInput(format!("invalid {}: {}", what, raw)));
    }
    Ok(trimmed.to_ascii_uppercase())
}
