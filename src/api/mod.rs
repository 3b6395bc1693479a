// ==========================================
// Flight Roster - API layer
// ==========================================
// Business interface for the binaries: validate input, call the
// repository, hand snapshots to the engine, map errors.
// ==========================================

pub mod error;
pub mod roster_api;

pub use error::{ApiError, ApiResult};
pub use roster_api::{RosterApi, RosterView};
