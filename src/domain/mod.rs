// ==========================================
// Flight Roster - Domain layer
// ==========================================
// Records and tagged variants only.
// No data access, no engine logic.
// ==========================================

pub mod crew;
pub mod flight;
pub mod passenger;
pub mod roster;
pub mod seat;
pub mod types;

pub use crew::{CabinCrewKind, CabinCrewMember, CrewCandidate, FlightCrewMember, PersonalInfo};
pub use flight::{Endpoint, FlightProfile};
pub use passenger::{PassengerBooking, PassengerCandidate};
pub use roster::{Roster, RosterPassenger};
pub use seat::{CabinLayout, LayoutError, SeatAssignment, SeatIdentifier, SeatStatus};
pub use types::{CabinSection, CrewRole, SeatClass, Seniority};
