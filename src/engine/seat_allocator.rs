// ==========================================
// Flight Roster - Seat allocator
// ==========================================
// Input: cabin layout + passenger pool + affiliation groups
// Output: passenger id -> SeatAssignment for every pool entry
// Hard rule: business passengers only in business rows, economy only in
// economy rows. Pre-assigned seats are kept unconditionally.
// ==========================================

use crate::domain::passenger::PassengerCandidate;
use crate::domain::seat::{CabinLayout, SeatAssignment, SeatIdentifier};
use crate::domain::types::{CabinSection, SeatClass};
use crate::engine::affiliation::AffiliationResolution;
use crate::engine::error::{AssemblyError, AssemblyResult, RosterWarning};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument, warn};

// ==========================================
// SeatAllocation - allocator output
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct SeatAllocation {
    /// One entry per pool passenger
    pub assignments: BTreeMap<String, SeatAssignment>,
    pub warnings: Vec<RosterWarning>,
}

impl SeatAllocation {
    pub fn assignment_of(&self, passenger_id: &str) -> SeatAssignment {
        self.assignments
            .get(passenger_id)
            .copied()
            .unwrap_or(SeatAssignment::Unassigned)
    }
}

// ==========================================
// PlacementUnit - members of one group placed in one section
// ==========================================
#[derive(Debug, Clone)]
struct PlacementUnit {
    section: CabinSection,
    lead_id: String,
    /// Size of the originating group, before the class split
    group_size: usize,
    /// Pool order
    members: Vec<String>,
    /// Pre-assigned seats of fellow group members inside this section
    anchors: Vec<SeatIdentifier>,
}

impl PlacementUnit {
    fn sort_key(&self) -> (bool, Reverse<usize>, &str) {
        (self.group_size == 1, Reverse(self.group_size), self.lead_id.as_str())
    }
}

// ==========================================
// SeatGrid - free/occupied state per seat
// ==========================================
struct SeatGrid<'a> {
    layout: &'a CabinLayout,
    /// occupied[row - 1][column_index]
    occupied: Vec<Vec<bool>>,
}

impl<'a> SeatGrid<'a> {
    fn new(layout: &'a CabinLayout) -> Self {
        let occupied = (1..=layout.row_count())
            .map(|row| vec![false; layout.row_len(row) as usize])
            .collect();
        Self { layout, occupied }
    }

    fn is_free(&self, row: u32, column_index: u32) -> bool {
        self.occupied
            .get((row - 1) as usize)
            .and_then(|r| r.get(column_index as usize))
            .map(|taken| !taken)
            .unwrap_or(false)
    }

    fn occupy(&mut self, seat: &SeatIdentifier) {
        if let Some(slot) = self
            .occupied
            .get_mut((seat.row - 1) as usize)
            .and_then(|r| r.get_mut(seat.column_index() as usize))
        {
            *slot = true;
        }
    }

    fn free_seats_in_row(&self, row: u32) -> Vec<SeatIdentifier> {
        (0..self.layout.row_len(row))
            .filter(|&col| self.is_free(row, col))
            .map(|col| SeatIdentifier::new(row, CabinLayout::column_letter(col)))
            .collect()
    }

    /// First run of `k` free seats in `row` between columns [start, end)
    fn run_in_range(&self, row: u32, start: u32, end: u32, k: usize) -> Option<Vec<SeatIdentifier>> {
        let mut run_start = start;
        let mut run_len = 0usize;
        for col in start..end {
            if self.is_free(row, col) {
                if run_len == 0 {
                    run_start = col;
                }
                run_len += 1;
                if run_len == k {
                    return Some(
                        (run_start..run_start + k as u32)
                            .map(|c| SeatIdentifier::new(row, CabinLayout::column_letter(c)))
                            .collect(),
                    );
                }
            } else {
                run_len = 0;
            }
        }
        None
    }

    /// Contiguous free seats inside one seat block (no aisle crossed)
    fn run_within_block(&self, row: u32, k: usize) -> Option<Vec<SeatIdentifier>> {
        let row_len = self.layout.row_len(row);
        let mut start = 0;
        for size in self.layout.blocks() {
            let end = (start + size).min(row_len);
            if start < end {
                if let Some(run) = self.run_in_range(row, start, end, k) {
                    return Some(run);
                }
            }
            start += size;
        }
        None
    }

    /// Consecutive free seats of a row, aisles crossed
    fn run_across_aisles(&self, row: u32, k: usize) -> Option<Vec<SeatIdentifier>> {
        self.run_in_range(row, 0, self.layout.row_len(row), k)
    }

    /// `k` free seats closest to any anchor: same row and block first,
    /// then the rest of the row, then the nearest rows
    fn nearest_to(&self, rows: &[u32], anchors: &[SeatIdentifier], k: usize) -> Vec<SeatIdentifier> {
        let mut free: Vec<SeatIdentifier> = rows.iter().flat_map(|&row| self.free_seats_in_row(row)).collect();
        free.sort_by_key(|seat| {
            let closest = anchors.iter().map(|anchor| self.distance(anchor, seat)).min();
            (closest, seat.row, seat.column)
        });
        free.truncate(k);
        free
    }

    fn distance(&self, from: &SeatIdentifier, to: &SeatIdentifier) -> (u32, bool, u32) {
        let (a, b) = (from.column_index(), to.column_index());
        (
            from.row.abs_diff(to.row),
            self.layout.block_of(a) != self.layout.block_of(b),
            a.abs_diff(b),
        )
    }

    /// Fewest consecutive rows (earliest on ties) holding `k` free seats
    fn row_window(&self, rows: &[u32], k: usize) -> Option<Vec<SeatIdentifier>> {
        let free: Vec<Vec<SeatIdentifier>> = rows.iter().map(|&r| self.free_seats_in_row(r)).collect();

        for span in 1..=rows.len() {
            for start in 0..=(rows.len() - span) {
                let window = &free[start..start + span];
                let total: usize = window.iter().map(Vec::len).sum();
                if total >= k {
                    return Some(window.iter().flatten().take(k).copied().collect());
                }
            }
        }
        None
    }
}

// ==========================================
// SeatAllocator
// ==========================================
pub struct SeatAllocator;

impl SeatAllocator {
    /// Assigns a seat (or an explicit marker) to every pool passenger
    ///
    /// # Rules
    /// - valid pre-assigned seats are kept and leave the free pool first
    /// - a pre-assigned seat outside the layout is ignored with a warning
    /// - groups before singletons, larger groups first (size before the
    ///   class split), ties by lead id
    /// - members whose companions hold pre-assigned seats in the same
    ///   section sit as close to those seats as the free seats allow
    /// - other units: same block, then same row, then fewest consecutive
    ///   rows, then whatever is left
    /// - members left without a seat become Unassigned
    /// - infants ride on the parent's seat (LapInfant) and follow the
    ///   parent to Unassigned when the parent gets no seat
    ///
    /// # Errors
    /// - SeatConflict: two passengers pre-assigned the same seat
    #[instrument(skip(layout, pool, resolution), fields(pool_size = pool.len(), groups = resolution.groups.len()))]
    pub fn allocate(
        flight_number: &str,
        layout: &CabinLayout,
        pool: &[PassengerCandidate],
        resolution: &AffiliationResolution,
    ) -> AssemblyResult<SeatAllocation> {
        let mut grid = SeatGrid::new(layout);
        let mut assignments: BTreeMap<String, SeatAssignment> = BTreeMap::new();
        let mut warnings = Vec::new();

        // ===== 1. pre-assigned seats =====
        let mut holders: HashMap<SeatIdentifier, &str> = HashMap::new();
        for passenger in pool {
            let Some(seat) = passenger.seat_number else {
                continue;
            };
            if !layout.contains(&seat) {
                warn!(passenger_id = %passenger.id, seat = %seat, "pre-assigned seat outside layout");
                warnings.push(RosterWarning::InvalidPreassignedSeat {
                    passenger_id: passenger.id.clone(),
                    seat: seat.to_string(),
                });
                continue;
            }
            if let Some(first) = holders.get(&seat) {
                return Err(AssemblyError::SeatConflict {
                    flight_number: flight_number.to_string(),
                    seat,
                    first: first.to_string(),
                    second: passenger.id.clone(),
                });
            }
            holders.insert(seat, passenger.id.as_str());
            grid.occupy(&seat);
            assignments.insert(passenger.id.clone(), SeatAssignment::Assigned(seat));
        }

        // ===== 2. placement units =====
        let classes: HashMap<&str, SeatClass> = pool.iter().map(|p| (p.id.as_str(), p.seat_type)).collect();
        let mut units = Vec::new();
        for group in &resolution.groups {
            for section in [CabinSection::Business, CabinSection::Economy] {
                let members: Vec<String> = group
                    .members
                    .iter()
                    .filter(|id| !assignments.contains_key(id.as_str()))
                    .filter(|id| section_for(classes.get(id.as_str()).copied()) == Some(section))
                    .cloned()
                    .collect();
                if !members.is_empty() {
                    let anchors = group
                        .members
                        .iter()
                        .filter_map(|id| assignments.get(id.as_str()).and_then(SeatAssignment::seat))
                        .filter(|seat| layout.section_of(seat.row) == section)
                        .collect();
                    units.push(PlacementUnit {
                        section,
                        lead_id: group.lead_id.clone(),
                        group_size: group.size(),
                        members,
                        anchors,
                    });
                }
            }
        }
        units.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        // ===== 3. place units =====
        let mut overflow: BTreeMap<CabinSection, Vec<String>> = BTreeMap::new();
        for unit in &units {
            let rows: Vec<u32> = layout.section_rows(unit.section).collect();
            let seats = if unit.anchors.is_empty() {
                Self::place_unit(&grid, &rows, unit.members.len())
            } else {
                grid.nearest_to(&rows, &unit.anchors, unit.members.len())
            };
            debug!(
                lead_id = %unit.lead_id,
                section = %unit.section,
                anchored = !unit.anchors.is_empty(),
                wanted = unit.members.len(),
                placed = seats.len(),
                "unit placed"
            );

            let mut seats = seats.into_iter();
            for member in &unit.members {
                match seats.next() {
                    Some(seat) => {
                        grid.occupy(&seat);
                        assignments.insert(member.clone(), SeatAssignment::Assigned(seat));
                    }
                    None => {
                        assignments.insert(member.clone(), SeatAssignment::Unassigned);
                        overflow.entry(unit.section).or_default().push(member.clone());
                    }
                }
            }
        }

        for (section, unassigned) in overflow {
            warn!(section = %section, count = unassigned.len(), "section capacity exceeded");
            warnings.push(RosterWarning::CapacityExceeded { section, unassigned });
        }

        // ===== 4. infants =====
        for passenger in pool.iter().filter(|p| p.is_infant()) {
            if assignments.contains_key(&passenger.id) {
                continue;
            }
            let parent_seated = resolution
                .lap_parents
                .get(&passenger.id)
                .and_then(|parent| assignments.get(parent))
                .map(|a| a.seat().is_some())
                .unwrap_or(false);
            let assignment = if parent_seated {
                SeatAssignment::LapInfant
            } else {
                SeatAssignment::Unassigned
            };
            assignments.insert(passenger.id.clone(), assignment);
        }

        Ok(SeatAllocation { assignments, warnings })
    }

    /// Seats for one unit, best strategy first; may return fewer than `k`
    fn place_unit(grid: &SeatGrid<'_>, rows: &[u32], k: usize) -> Vec<SeatIdentifier> {
        if k == 0 || rows.is_empty() {
            return Vec::new();
        }

        if let Some(run) = rows.iter().find_map(|&row| grid.run_within_block(row, k)) {
            return run;
        }
        if let Some(run) = rows.iter().find_map(|&row| grid.run_across_aisles(row, k)) {
            return run;
        }
        if let Some(window) = grid.row_window(rows, k) {
            return window;
        }

        // section exhausted: seat what fits
        rows.iter()
            .flat_map(|&row| grid.free_seats_in_row(row))
            .take(k)
            .collect()
    }
}

/// Section a passenger class draws seats from; infants draw none
fn section_for(class: Option<SeatClass>) -> Option<CabinSection> {
    match class {
        Some(SeatClass::Business) => Some(CabinSection::Business),
        Some(SeatClass::Economy) => Some(CabinSection::Economy),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::crew::PersonalInfo;
    use crate::engine::affiliation::AffiliationResolver;

    fn passenger(id: &str, seat_type: SeatClass) -> PassengerCandidate {
        PassengerCandidate {
            id: id.to_string(),
            info: PersonalInfo::new(id, 30, "Male", "French", &[]),
            seat_type,
            seat_number: None,
            parent_id: None,
            affiliated_passengers: vec![],
        }
    }

    fn allocate(layout: &CabinLayout, pool: &[PassengerCandidate]) -> AssemblyResult<SeatAllocation> {
        let resolution = AffiliationResolver::resolve("TEST1", pool)?;
        SeatAllocator::allocate("TEST1", layout, pool, &resolution)
    }

    fn seat(s: &str) -> SeatAssignment {
        SeatAssignment::Assigned(s.parse().unwrap())
    }

    #[test]
    fn test_singletons_fill_row_major() {
        let layout = CabinLayout::parse("2-2", 8, 0).unwrap();
        let pool = vec![
            passenger("P2", SeatClass::Economy),
            passenger("P1", SeatClass::Economy),
            passenger("P3", SeatClass::Economy),
        ];
        let allocation = allocate(&layout, &pool).unwrap();
        assert_eq!(allocation.assignment_of("P1"), seat("1A"));
        assert_eq!(allocation.assignment_of("P2"), seat("1B"));
        assert_eq!(allocation.assignment_of("P3"), seat("1C"));
        assert!(allocation.warnings.is_empty());
    }

    #[test]
    fn test_group_stays_inside_block() {
        // 1A taken → pair cannot sit 1B-1C across the aisle, takes 1C-1D
        let layout = CabinLayout::parse("2-2", 8, 0).unwrap();
        let mut first = passenger("P0", SeatClass::Economy);
        first.seat_number = Some("1A".parse().unwrap());
        let mut a = passenger("P5", SeatClass::Economy);
        a.affiliated_passengers = vec!["P6".to_string()];
        let b = passenger("P6", SeatClass::Economy);

        let allocation = allocate(&layout, &[first, a, b]).unwrap();
        assert_eq!(allocation.assignment_of("P5"), seat("1C"));
        assert_eq!(allocation.assignment_of("P6"), seat("1D"));
    }

    #[test]
    fn test_class_separation_leaves_economy_unassigned() {
        // 1 business row of 2, 1 economy row of 2
        let layout = CabinLayout::parse("2", 4, 1).unwrap();
        let pool = vec![
            passenger("E1", SeatClass::Economy),
            passenger("E2", SeatClass::Economy),
            passenger("E3", SeatClass::Economy),
        ];
        let allocation = allocate(&layout, &pool).unwrap();
        assert_eq!(allocation.assignment_of("E1"), seat("2A"));
        assert_eq!(allocation.assignment_of("E2"), seat("2B"));
        assert_eq!(allocation.assignment_of("E3"), SeatAssignment::Unassigned);
        assert_eq!(
            allocation.warnings,
            vec![RosterWarning::CapacityExceeded {
                section: CabinSection::Economy,
                unassigned: vec!["E3".to_string()],
            }]
        );
    }

    #[test]
    fn test_large_group_spans_fewest_rows() {
        let layout = CabinLayout::parse("3", 9, 0).unwrap();
        let mut lead = passenger("G1", SeatClass::Economy);
        lead.affiliated_passengers = vec!["G2".into(), "G3".into(), "G4".into()];
        let pool = vec![
            lead,
            passenger("G2", SeatClass::Economy),
            passenger("G3", SeatClass::Economy),
            passenger("G4", SeatClass::Economy),
        ];
        let allocation = allocate(&layout, &pool).unwrap();
        assert_eq!(allocation.assignment_of("G1"), seat("1A"));
        assert_eq!(allocation.assignment_of("G3"), seat("1C"));
        assert_eq!(allocation.assignment_of("G4"), seat("2A"));
    }

    #[test]
    fn test_companion_sits_next_to_preassigned_member() {
        let layout = CabinLayout::parse("3-3", 24, 0).unwrap();
        let mut anna = passenger("P005", SeatClass::Economy);
        anna.seat_number = Some("3A".parse().unwrap());
        anna.affiliated_passengers = vec!["P006".to_string()];
        let thomas = passenger("P006", SeatClass::Economy);

        let allocation = allocate(&layout, &[anna, thomas]).unwrap();
        assert_eq!(allocation.assignment_of("P005"), seat("3A"));
        assert_eq!(allocation.assignment_of("P006"), seat("3B"));
    }

    #[test]
    fn test_companion_prefers_anchor_row_over_neighbour_rows() {
        // anchor block 3A-3C full: across the aisle beats rows 2 and 4
        let layout = CabinLayout::parse("3-3", 24, 0).unwrap();
        let mut lead = passenger("G1", SeatClass::Economy);
        lead.seat_number = Some("3A".parse().unwrap());
        lead.affiliated_passengers = vec!["G2".to_string()];
        let mut x = passenger("X1", SeatClass::Economy);
        x.seat_number = Some("3B".parse().unwrap());
        let mut y = passenger("X2", SeatClass::Economy);
        y.seat_number = Some("3C".parse().unwrap());

        let allocation = allocate(&layout, &[lead, passenger("G2", SeatClass::Economy), x, y]).unwrap();
        assert_eq!(allocation.assignment_of("G2"), seat("3D"));
    }

    #[test]
    fn test_preassigned_conflict_is_fatal() {
        let layout = CabinLayout::parse("3-3", 12, 0).unwrap();
        let mut a = passenger("P002", SeatClass::Economy);
        a.seat_number = Some("2B".parse().unwrap());
        let mut b = passenger("P009", SeatClass::Economy);
        b.seat_number = Some("2B".parse().unwrap());

        let err = allocate(&layout, &[a, b]).unwrap_err();
        match err {
            AssemblyError::SeatConflict { seat, first, second, .. } => {
                assert_eq!(seat.to_string(), "2B");
                assert_eq!(first, "P002");
                assert_eq!(second, "P009");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_preassigned_seat_is_reallocated() {
        let layout = CabinLayout::parse("3-3", 12, 0).unwrap();
        let mut a = passenger("P1", SeatClass::Economy);
        a.seat_number = Some("9Z".parse().unwrap());

        let allocation = allocate(&layout, &[a]).unwrap();
        assert_eq!(allocation.assignment_of("P1"), seat("1A"));
        assert!(matches!(
            allocation.warnings[0],
            RosterWarning::InvalidPreassignedSeat { .. }
        ));
    }

    #[test]
    fn test_infant_follows_parent() {
        let layout = CabinLayout::parse("2", 2, 1).unwrap();
        let parent = passenger("P3", SeatClass::Business);
        let mut infant = passenger("P4", SeatClass::Infant);
        infant.parent_id = Some("P3".to_string());
        // economy section has no rows at all
        let stranded = passenger("P7", SeatClass::Economy);
        let mut stranded_infant = passenger("P8", SeatClass::Infant);
        stranded_infant.parent_id = Some("P7".to_string());

        let allocation = allocate(&layout, &[parent, infant, stranded, stranded_infant]).unwrap();
        assert_eq!(allocation.assignment_of("P3"), seat("1A"));
        assert_eq!(allocation.assignment_of("P4"), SeatAssignment::LapInfant);
        assert_eq!(allocation.assignment_of("P7"), SeatAssignment::Unassigned);
        assert_eq!(allocation.assignment_of("P8"), SeatAssignment::Unassigned);
    }
}
