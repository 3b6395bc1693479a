// ==========================================
// Seat allocator - integration tests
// ==========================================
// Capacity boundary, class separation, pre-assignment, infants
// ==========================================

mod helpers;

use std::collections::HashSet;

use flight_roster::domain::passenger::PassengerCandidate;
use flight_roster::domain::seat::{CabinLayout, SeatAssignment};
use flight_roster::domain::types::CabinSection;
use flight_roster::engine::{AffiliationResolver, RosterWarning, SeatAllocation, SeatAllocator};
use helpers::test_data_builder::{economy_singletons, PassengerBuilder};

fn allocate(layout: &CabinLayout, pool: &[PassengerCandidate]) -> SeatAllocation {
    let resolution = AffiliationResolver::resolve("TEST1", pool).unwrap();
    SeatAllocator::allocate("TEST1", layout, pool, &resolution).unwrap()
}

fn seat(s: &str) -> SeatAssignment {
    SeatAssignment::Assigned(s.parse().unwrap())
}

#[test]
fn test_capacity_boundary_n_plus_one() {
    // N = 12 economy seats
    let layout = CabinLayout::parse("3-3", 12, 0).unwrap();
    let pool = economy_singletons(13);

    let allocation = allocate(&layout, &pool);

    let unassigned: Vec<&String> = allocation
        .assignments
        .iter()
        .filter(|(_, a)| a.is_unassigned())
        .map(|(id, _)| id)
        .collect();
    assert_eq!(unassigned, vec!["E013"]);

    let seats: Vec<_> = allocation.assignments.values().filter_map(|a| a.seat()).collect();
    assert_eq!(seats.len(), 12);
    let distinct: HashSet<_> = seats.iter().collect();
    assert_eq!(distinct.len(), 12);
    assert!(seats.iter().all(|s| layout.contains(s)));

    assert_eq!(
        allocation.warnings,
        vec![RosterWarning::CapacityExceeded {
            section: CabinSection::Economy,
            unassigned: vec!["E013".to_string()],
        }]
    );
}

#[test]
fn test_exact_capacity_has_no_warning() {
    let layout = CabinLayout::parse("3-3", 12, 0).unwrap();
    let allocation = allocate(&layout, &economy_singletons(12));
    assert!(allocation.assignments.values().all(|a| a.seat().is_some()));
    assert!(allocation.warnings.is_empty());
}

#[test]
fn test_group_crosses_aisle_when_block_too_small() {
    let layout = CabinLayout::parse("2-2", 8, 0).unwrap();
    let pool = vec![
        PassengerBuilder::economy("G1").with(&["G2", "G3"]).build(),
        PassengerBuilder::economy("G2").build(),
        PassengerBuilder::economy("G3").build(),
    ];

    let allocation = allocate(&layout, &pool);
    assert_eq!(allocation.assignment_of("G1"), seat("1A"));
    assert_eq!(allocation.assignment_of("G2"), seat("1B"));
    assert_eq!(allocation.assignment_of("G3"), seat("1C"));
}

#[test]
fn test_groups_are_placed_before_singletons() {
    // singleton S0 sorts first by id but the pair still gets 1A-1B
    let layout = CabinLayout::parse("2", 4, 0).unwrap();
    let pool = vec![
        PassengerBuilder::economy("S0").build(),
        PassengerBuilder::economy("T1").with(&["T2"]).build(),
        PassengerBuilder::economy("T2").build(),
    ];

    let allocation = allocate(&layout, &pool);
    assert_eq!(allocation.assignment_of("T1"), seat("1A"));
    assert_eq!(allocation.assignment_of("T2"), seat("1B"));
    assert_eq!(allocation.assignment_of("S0"), seat("2A"));
}

#[test]
fn test_mixed_class_group_is_split_by_section() {
    let layout = CabinLayout::parse("2-2", 8, 1).unwrap();
    let pool = vec![
        PassengerBuilder::business("B1").with(&["E1"]).build(),
        PassengerBuilder::economy("E1").build(),
    ];

    let allocation = allocate(&layout, &pool);
    assert_eq!(allocation.assignment_of("B1"), seat("1A"));
    assert_eq!(allocation.assignment_of("E1"), seat("2A"));
}

#[test]
fn test_preassigned_seat_wins_across_sections() {
    let layout = CabinLayout::parse("2-2", 8, 1).unwrap();
    let pool = vec![
        PassengerBuilder::economy("E1").seat("1A").build(),
        PassengerBuilder::business("B1").build(),
    ];

    let allocation = allocate(&layout, &pool);
    assert_eq!(allocation.assignment_of("E1"), seat("1A"));
    assert_eq!(allocation.assignment_of("B1"), seat("1B"));
}

#[test]
fn test_group_gathers_around_preassigned_member() {
    let layout = CabinLayout::parse("3-3", 30, 0).unwrap();
    let pool = vec![
        PassengerBuilder::economy("G1").seat("5F").with(&["G2", "G3"]).build(),
        PassengerBuilder::economy("G2").build(),
        PassengerBuilder::economy("G3").build(),
        PassengerBuilder::economy("S1").build(),
    ];

    let allocation = allocate(&layout, &pool);
    assert_eq!(allocation.assignment_of("G1"), seat("5F"));
    assert_eq!(allocation.assignment_of("G2"), seat("5E"));
    assert_eq!(allocation.assignment_of("G3"), seat("5D"));
    assert_eq!(allocation.assignment_of("S1"), seat("1A"));
}

#[test]
fn test_mixed_class_fragment_ranks_by_whole_group_size() {
    // the four-member group outranks the business pair even though only
    // one of its members flies business
    let layout = CabinLayout::parse("2-2", 16, 1).unwrap();
    let pool = vec![
        PassengerBuilder::business("B1").with(&["B2"]).build(),
        PassengerBuilder::business("B2").build(),
        PassengerBuilder::business("M1").with(&["M2", "M3", "M4"]).build(),
        PassengerBuilder::economy("M2").build(),
        PassengerBuilder::economy("M3").build(),
        PassengerBuilder::economy("M4").build(),
    ];

    let allocation = allocate(&layout, &pool);
    assert_eq!(allocation.assignment_of("M1"), seat("1A"));
    assert_eq!(allocation.assignment_of("B1"), seat("1C"));
    assert_eq!(allocation.assignment_of("B2"), seat("1D"));
    assert!(allocation.warnings.is_empty());
}

#[test]
fn test_invalid_preassigned_seat_is_reallocated() {
    let layout = CabinLayout::parse("2-2", 8, 0).unwrap();
    let pool = vec![PassengerBuilder::economy("E1").seat("99A").build()];

    let allocation = allocate(&layout, &pool);
    assert_eq!(allocation.assignment_of("E1"), seat("1A"));
    assert_eq!(
        allocation.warnings,
        vec![RosterWarning::InvalidPreassignedSeat {
            passenger_id: "E1".to_string(),
            seat: "99A".to_string(),
        }]
    );
}

#[test]
fn test_infant_follows_unseated_parent() {
    // no business rows: the business parent cannot be seated
    let layout = CabinLayout::parse("2", 2, 0).unwrap();
    let pool = vec![
        PassengerBuilder::business("P1").build(),
        PassengerBuilder::infant_of("I1", "P1").build(),
    ];

    let allocation = allocate(&layout, &pool);
    assert_eq!(allocation.assignment_of("P1"), SeatAssignment::Unassigned);
    assert_eq!(allocation.assignment_of("I1"), SeatAssignment::Unassigned);
    assert_eq!(
        allocation.warnings,
        vec![RosterWarning::CapacityExceeded {
            section: CabinSection::Business,
            unassigned: vec!["P1".to_string()],
        }]
    );
}
