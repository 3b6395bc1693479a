// ==========================================
// Flight Roster - Core library
// ==========================================
// Assembles a flight roster: eligible crew, grouped passengers,
// deterministic seat map.
// ==========================================

// ==========================================
// Modules
// ==========================================

// Domain layer - entities and value types
pub mod domain;

// Engine layer - eligibility, affiliation, seating, assembly
pub mod engine;

// Data access layer
pub mod repository;

// Importer - CSV candidate pools
pub mod importer;

// Configuration
pub mod config;

// Demo data
pub mod generator;

// Roster views and JSON export
pub mod presenter;

// Database infrastructure (connection / PRAGMA / schema)
pub mod db;

// Logging
pub mod logging;

// API layer
pub mod api;

// Application wiring
pub mod app;

// ==========================================
// Re-exports
// ==========================================

pub use domain::{
    CabinCrewMember, CabinLayout, CrewCandidate, FlightCrewMember, FlightProfile, PassengerCandidate, Roster,
    RosterPassenger, SeatAssignment, SeatIdentifier,
};

pub use engine::{AssemblyError, AssemblyOutcome, AssemblyPolicy, RosterAssembler, RosterWarning};

pub use api::{ApiError, RosterApi, RosterView};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Flight Roster";
