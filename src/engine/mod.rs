// ==========================================
// Flight Roster - Engine layer
// ==========================================
// Components, leaves first:
//   eligibility -> affiliation -> seat_allocator -> assembler
// Rule: synchronous and deterministic, no data access here
// ==========================================

pub mod affiliation;
pub mod assembler;
pub mod eligibility;
pub mod error;
pub mod seat_allocator;

pub use affiliation::{AffiliationGroup, AffiliationResolution, AffiliationResolver};
pub use assembler::{AssemblyOutcome, AssemblyPolicy, RosterAssembler};
pub use eligibility::{EligibilityResult, EligibilityRules};
pub use error::{AssemblyError, AssemblyResult, ReferenceKind, RosterWarning};
pub use seat_allocator::{SeatAllocation, SeatAllocator};
