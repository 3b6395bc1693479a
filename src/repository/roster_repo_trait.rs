// ==========================================
// Flight Roster - Roster data-access trait
// ==========================================
// The engine never sees this trait: the api layer fetches through it and
// hands already-resolved snapshots to the assembler.
// Implementors: SqliteRosterRepository, InMemoryRosterRepository
// ==========================================

use crate::domain::crew::CrewCandidate;
use crate::domain::flight::FlightProfile;
use crate::domain::passenger::{PassengerBooking, PassengerCandidate};
use crate::repository::crew_filter::CrewFilter;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Flight profile by flight number
    ///
    /// # Returns
    /// - Err(NotFound) when the flight does not exist
    async fn fetch_flight(&self, flight_number: &str) -> RepositoryResult<FlightProfile>;

    /// Every known crew member, both roles, not pre-filtered
    async fn fetch_crew_pool(&self) -> RepositoryResult<Vec<CrewCandidate>>;

    /// Passengers booked on a flight (empty for unknown flights)
    async fn fetch_passenger_pool(&self, flight_number: &str) -> RepositoryResult<Vec<PassengerCandidate>>;

    /// Flight numbers, ascending
    async fn list_flights(&self) -> RepositoryResult<Vec<String>>;

    /// Crew matching a filter, in pool order
    async fn fetch_crew(&self, filter: &CrewFilter) -> RepositoryResult<Vec<CrewCandidate>>;

    /// One crew member by id, either role
    ///
    /// # Returns
    /// - Err(NotFound) with entity "CrewMember"
    async fn fetch_crew_member(&self, crew_id: &str) -> RepositoryResult<CrewCandidate>;

    /// A passenger by id, searched across all flights
    ///
    /// # Returns
    /// - the booking on the smallest flight number when the id is booked twice
    /// - Err(NotFound) with entity "Passenger"
    async fn fetch_passenger(&self, passenger_id: &str) -> RepositoryResult<PassengerBooking>;
}
