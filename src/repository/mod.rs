// ==========================================
// Flight Roster - Data access layer
// ==========================================
// Supplies flight profiles and candidate pools to the api layer.
// Rule: no roster rules here, parameterized SQL only
// ==========================================

pub mod crew_filter;
pub mod error;
pub mod memory_roster_repo;
pub mod roster_repo_trait;
pub mod sqlite_roster_repo;

pub use crew_filter::CrewFilter;
pub use error::{RepositoryError, RepositoryResult};
pub use memory_roster_repo::InMemoryRosterRepository;
pub use roster_repo_trait::RosterRepository;
pub use sqlite_roster_repo::SqliteRosterRepository;
