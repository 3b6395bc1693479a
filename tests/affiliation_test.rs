// ==========================================
// Affiliation resolver - integration tests
// ==========================================

mod helpers;

use flight_roster::engine::{AffiliationResolver, AssemblyError, ReferenceKind, RosterWarning};
use flight_roster::repository::InMemoryRosterRepository;
use helpers::test_data_builder::PassengerBuilder;

#[test]
fn test_transitive_closure() {
    // A-B declared on A, B-C declared on C
    let pool = vec![
        PassengerBuilder::economy("A").with(&["B"]).build(),
        PassengerBuilder::economy("B").build(),
        PassengerBuilder::economy("D").build(),
        PassengerBuilder::economy("C").with(&["B"]).build(),
    ];

    let resolution = AffiliationResolver::resolve("TEST1", &pool).unwrap();
    assert_eq!(resolution.groups.len(), 2);

    let abc = resolution.group_of("C").unwrap();
    assert_eq!(abc.lead_id, "A");
    assert_eq!(abc.members, vec!["A", "B", "C"]);
    assert_eq!(abc.economy_seats, 3);

    assert!(resolution.group_of("D").unwrap().is_singleton());
    assert!(resolution.warnings.is_empty());
}

#[test]
fn test_demo_tk1234_groups() {
    let repo = InMemoryRosterRepository::demo();
    let resolution = AffiliationResolver::resolve("TK1234", repo.passengers("TK1234")).unwrap();

    let family = resolution.group_of("P004").unwrap();
    assert_eq!(family.members, vec!["P003", "P004"]);
    assert_eq!(family.business_seats, 1);
    assert_eq!(family.lap_infants, 1);
    assert_eq!(family.seat_demand(), 1);

    let couple = resolution.group_of("P005").unwrap();
    assert_eq!(couple.members, vec!["P005", "P006"]);
    assert_eq!(resolution.lap_parents.get("P004").map(String::as_str), Some("P003"));
    assert_eq!(resolution.groups.len(), 4);
}

#[test]
fn test_dangling_references_are_dropped() {
    let pool = vec![
        PassengerBuilder::economy("P1").with(&["GHOST", "P1"]).build(),
        PassengerBuilder::infant_of("I1", "NOBODY").build(),
    ];

    let resolution = AffiliationResolver::resolve("TEST1", &pool).unwrap();
    assert!(resolution.group_of("P1").unwrap().is_singleton());
    assert!(resolution.lap_parents.is_empty());
    assert_eq!(
        resolution.warnings,
        vec![
            RosterWarning::DanglingReference {
                passenger_id: "P1".to_string(),
                missing_id: "GHOST".to_string(),
                reference: ReferenceKind::Affiliate,
            },
            RosterWarning::DanglingReference {
                passenger_id: "I1".to_string(),
                missing_id: "NOBODY".to_string(),
                reference: ReferenceKind::Parent,
            },
            RosterWarning::InfantWithoutParent {
                passenger_id: "I1".to_string(),
            },
        ]
    );
}

#[test]
fn test_duplicate_passenger_is_fatal() {
    let pool = vec![
        PassengerBuilder::economy("P1").build(),
        PassengerBuilder::business("P1").build(),
    ];
    let err = AffiliationResolver::resolve("TEST1", &pool).unwrap_err();
    assert_eq!(
        err,
        AssemblyError::DuplicatePassenger {
            flight_number: "TEST1".to_string(),
            passenger_id: "P1".to_string(),
        }
    );
}
