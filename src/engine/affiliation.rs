// ==========================================
// Flight Roster - Affiliation resolver
// ==========================================
// Partitions the passenger pool into "must sit together" groups.
// Edges: every affiliate pair (symmetric) + every infant -> parent link
// Dangling references are dropped with a warning, never fatal.
// ==========================================

use crate::domain::passenger::PassengerCandidate;
use crate::domain::types::SeatClass;
use crate::engine::error::{AssemblyError, AssemblyResult, ReferenceKind, RosterWarning};
use std::collections::{BTreeMap, HashMap};
use tracing::{instrument, warn};

// ==========================================
// AffiliationGroup
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliationGroup {
    /// Lexicographically smallest member id
    pub lead_id: String,
    /// Member ids in pool order (lap infants included)
    pub members: Vec<String>,
    /// Members needing a business seat
    pub business_seats: usize,
    /// Members needing an economy seat
    pub economy_seats: usize,
    /// Infants riding on a member's seat
    pub lap_infants: usize,
}

impl AffiliationGroup {
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Seat-consuming members
    pub fn seat_demand(&self) -> usize {
        self.business_seats + self.economy_seats
    }

    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }
}

// ==========================================
// AffiliationResolution
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct AffiliationResolution {
    /// Disjoint groups, ordered by lead id
    pub groups: Vec<AffiliationGroup>,
    /// infant id -> parent id, only for resolvable parents
    pub lap_parents: BTreeMap<String, String>,
    pub warnings: Vec<RosterWarning>,
}

impl AffiliationResolution {
    pub fn group_of(&self, passenger_id: &str) -> Option<&AffiliationGroup> {
        self.groups
            .iter()
            .find(|g| g.members.iter().any(|m| m == passenger_id))
    }
}

// ==========================================
// DisjointSet - union-find over pool indices
// ==========================================
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // path compression
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

// ==========================================
// AffiliationResolver
// ==========================================
pub struct AffiliationResolver;

impl AffiliationResolver {
    /// Resolves affiliation groups for a flight's passenger pool
    ///
    /// # Rules
    /// - affiliate links are symmetric, infant -> parent links join the same group
    /// - a reference to an unknown id is dropped (DanglingReference warning)
    /// - self references are ignored
    /// - an infant without a resolvable non-infant parent is reported (InfantWithoutParent)
    ///
    /// # Errors
    /// - DuplicatePassenger: two pool entries share an id
    #[instrument(skip(pool), fields(pool_size = pool.len()))]
    pub fn resolve(flight_number: &str, pool: &[PassengerCandidate]) -> AssemblyResult<AffiliationResolution> {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(pool.len());
        for (idx, passenger) in pool.iter().enumerate() {
            if index.insert(passenger.id.as_str(), idx).is_some() {
                return Err(AssemblyError::DuplicatePassenger {
                    flight_number: flight_number.to_string(),
                    passenger_id: passenger.id.clone(),
                });
            }
        }

        let mut sets = DisjointSet::new(pool.len());
        let mut warnings = Vec::new();
        let mut lap_parents = BTreeMap::new();

        for (idx, passenger) in pool.iter().enumerate() {
            // ===== affiliates =====
            for affiliate_id in &passenger.affiliated_passengers {
                if affiliate_id == &passenger.id {
                    continue;
                }
                match index.get(affiliate_id.as_str()) {
                    Some(&other) => sets.union(idx, other),
                    None => {
                        warn!(passenger_id = %passenger.id, missing_id = %affiliate_id, "affiliate reference dropped");
                        warnings.push(RosterWarning::DanglingReference {
                            passenger_id: passenger.id.clone(),
                            missing_id: affiliate_id.clone(),
                            reference: ReferenceKind::Affiliate,
                        });
                    }
                }
            }

            // ===== parent =====
            let parent_idx = match passenger.parent_id.as_deref() {
                Some(parent_id) if parent_id != passenger.id => match index.get(parent_id) {
                    Some(&parent_idx) => {
                        sets.union(idx, parent_idx);
                        Some(parent_idx)
                    }
                    None => {
                        warn!(passenger_id = %passenger.id, missing_id = %parent_id, "parent reference dropped");
                        warnings.push(RosterWarning::DanglingReference {
                            passenger_id: passenger.id.clone(),
                            missing_id: parent_id.to_string(),
                            reference: ReferenceKind::Parent,
                        });
                        None
                    }
                },
                _ => None,
            };

            if passenger.is_infant() {
                match parent_idx.filter(|&p| !pool[p].is_infant()) {
                    Some(p) => {
                        lap_parents.insert(passenger.id.clone(), pool[p].id.clone());
                    }
                    None => {
                        warn!(passenger_id = %passenger.id, "infant without resolvable parent");
                        warnings.push(RosterWarning::InfantWithoutParent {
                            passenger_id: passenger.id.clone(),
                        });
                    }
                }
            }
        }

        // ===== collect groups (members keep pool order) =====
        let mut by_root: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for idx in 0..pool.len() {
            let root = sets.find(idx);
            by_root.entry(root).or_default().push(idx);
        }

        let mut groups: Vec<AffiliationGroup> = by_root
            .into_values()
            .map(|indices| {
                let mut group = AffiliationGroup {
                    lead_id: String::new(),
                    members: Vec::with_capacity(indices.len()),
                    business_seats: 0,
                    economy_seats: 0,
                    lap_infants: 0,
                };
                for idx in indices {
                    let member = &pool[idx];
                    match member.seat_type {
                        SeatClass::Business => group.business_seats += 1,
                        SeatClass::Economy => group.economy_seats += 1,
                        SeatClass::Infant => {
                            if lap_parents.contains_key(&member.id) {
                                group.lap_infants += 1;
                            }
                        }
                    }
                    group.members.push(member.id.clone());
                }
                group.lead_id = group.members.iter().min().cloned().unwrap_or_default();
                group
            })
            .collect();

        groups.sort_by(|a, b| a.lead_id.cmp(&b.lead_id));

        Ok(AffiliationResolution {
            groups,
            lap_parents,
            warnings,
        })
    }
}
