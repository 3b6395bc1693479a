// ==========================================
// Flight Roster - Demo passenger generator
// ==========================================
// Seedable: same seed + same flight -> identical pool.
// Lives outside the engine; its output is just another passenger pool.
// Generated passengers never carry pre-assigned seats.
// ==========================================

use crate::config::GeneratorSettings;
use crate::domain::crew::PersonalInfo;
use crate::domain::flight::FlightProfile;
use crate::domain::passenger::PassengerCandidate;
use crate::domain::types::{CabinSection, SeatClass};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{info, instrument};

const FIRST_NAMES: &[&str] = &[
    "John", "Sarah", "Michael", "Emma", "David", "Lisa", "Robert", "Anna", "James", "Maria",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez", "Martinez",
];

/// (nationality, first language)
const NATIONALITIES: &[(&str, &str)] = &[
    ("American", "English"),
    ("British", "English"),
    ("German", "German"),
    ("French", "French"),
    ("Turkish", "Turkish"),
    ("Spanish", "Spanish"),
    ("Italian", "Italian"),
    ("Chinese", "Chinese"),
    ("Japanese", "Japanese"),
    ("Canadian", "English"),
];

/// Chance that a passenger books together with the next one
const COMPANION_PROBABILITY: f64 = 0.1;
/// Chance that an adult travels with an infant
const INFANT_PROBABILITY: f64 = 0.03;

pub struct PassengerGenerator {
    seed: u64,
    occupancy_ratio: f64,
    business_ratio: f64,
}

impl PassengerGenerator {
    /// Ratios are clamped to [0, 1]
    pub fn new(seed: u64, occupancy_ratio: f64, business_ratio: f64) -> Self {
        Self {
            seed,
            occupancy_ratio: clamp_ratio(occupancy_ratio),
            business_ratio: clamp_ratio(business_ratio),
        }
    }

    pub fn from_settings(settings: GeneratorSettings) -> Self {
        Self::new(settings.seed, settings.occupancy_ratio, settings.business_ratio)
    }

    /// Number of seat-consuming passengers generated for a flight
    pub fn seated_count(&self, flight: &FlightProfile) -> usize {
        (flight.total_seats as f64 * self.occupancy_ratio).floor() as usize
    }

    /// Generates a passenger pool for `flight`
    ///
    /// # Rules
    /// - floor(total_seats × occupancy) adult passengers, ids P001, P002, …
    /// - companions are pairs of consecutive adults of the same class
    /// - infants are extra entries (not counted toward occupancy) right
    ///   after their parent
    /// - neither class is booked beyond its cabin section; a draw for a
    ///   full class falls back to the other one
    #[instrument(skip(self, flight), fields(flight_number = %flight.flight_number, seed = self.seed))]
    pub fn generate(&self, flight: &FlightProfile) -> Vec<PassengerCandidate> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let target = self.seated_count(flight);

        let mut pool: Vec<PassengerCandidate> = Vec::with_capacity(target + target / 10);
        let mut next_id = 1usize;
        let mut adults = 0usize;
        let mut seats = SectionSeats::of(flight);

        while adults < target {
            let wants_business = rng.gen_bool(self.business_ratio);
            let seat_type = if (wants_business && seats.business > 0) || seats.economy == 0 {
                SeatClass::Business
            } else {
                SeatClass::Economy
            };

            let first = self.adult(&mut rng, &mut next_id, seat_type);
            let first_idx = pool.len();
            pool.push(first);
            seats.take(seat_type);
            adults += 1;

            if adults < target && rng.gen_bool(COMPANION_PROBABILITY) && seats.left(seat_type) > 0 {
                let companion = self.adult(&mut rng, &mut next_id, seat_type);
                let companion_id = companion.id.clone();
                pool[first_idx].affiliated_passengers.push(companion_id);
                let lead_id = pool[first_idx].id.clone();
                pool.push(companion);
                if let Some(last) = pool.last_mut() {
                    last.affiliated_passengers.push(lead_id);
                }
                seats.take(seat_type);
                adults += 1;
            }

            if rng.gen_bool(INFANT_PROBABILITY) {
                let parent = &pool[first_idx];
                let infant = PassengerCandidate {
                    id: passenger_id(&mut next_id),
                    info: PersonalInfo {
                        name: format!("Baby {}", parent.info.name),
                        age: rng.gen_range(0..=1),
                        gender: random_gender(&mut rng).to_string(),
                        nationality: parent.info.nationality.clone(),
                        languages: vec![],
                    },
                    seat_type: SeatClass::Infant,
                    seat_number: None,
                    parent_id: Some(parent.id.clone()),
                    affiliated_passengers: vec![],
                };
                pool.push(infant);
            }
        }

        info!(
            passengers = pool.len(),
            seated = adults,
            infants = pool.len() - adults,
            "passenger pool generated"
        );
        pool
    }

    fn adult(&self, rng: &mut StdRng, next_id: &mut usize, seat_type: SeatClass) -> PassengerCandidate {
        let first = FIRST_NAMES.choose(rng).copied().unwrap_or("John");
        let last = LAST_NAMES.choose(rng).copied().unwrap_or("Smith");
        let (nationality, language) = NATIONALITIES.choose(rng).copied().unwrap_or(("Turkish", "Turkish"));

        PassengerCandidate {
            id: passenger_id(next_id),
            info: PersonalInfo {
                name: format!("{} {}", first, last),
                age: rng.gen_range(18..=87),
                gender: random_gender(rng).to_string(),
                nationality: nationality.to_string(),
                languages: vec![language.to_string()],
            },
            seat_type,
            seat_number: None,
            parent_id: None,
            affiliated_passengers: vec![],
        }
    }
}

/// Free seats per cabin section while generating
struct SectionSeats {
    business: usize,
    economy: usize,
}

impl SectionSeats {
    /// An unparsable layout books everybody into economy
    fn of(flight: &FlightProfile) -> Self {
        let business = flight
            .cabin_layout()
            .map(|layout| layout.section_capacity(CabinSection::Business) as usize)
            .unwrap_or(0);
        Self {
            business,
            economy: (flight.total_seats as usize).saturating_sub(business),
        }
    }

    fn left(&self, seat_type: SeatClass) -> usize {
        match seat_type {
            SeatClass::Business => self.business,
            SeatClass::Economy => self.economy,
            SeatClass::Infant => 0,
        }
    }

    fn take(&mut self, seat_type: SeatClass) {
        match seat_type {
            SeatClass::Business => self.business = self.business.saturating_sub(1),
            SeatClass::Economy => self.economy = self.economy.saturating_sub(1),
            SeatClass::Infant => {}
        }
    }
}

fn passenger_id(next_id: &mut usize) -> String {
    let id = format!("P{:03}", *next_id);
    *next_id += 1;
    id
}

fn random_gender(rng: &mut StdRng) -> &'static str {
    if rng.gen_bool(0.5) {
        "Male"
    } else {
        "Female"
    }
}

fn clamp_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRosterRepository;

    fn tk5678() -> FlightProfile {
        InMemoryRosterRepository::demo().flight("TK5678").unwrap().clone()
    }

    #[test]
    fn test_same_seed_same_pool() {
        let flight = tk5678();
        let a = PassengerGenerator::new(7, 0.85, 0.2).generate(&flight);
        let b = PassengerGenerator::new(7, 0.85, 0.2).generate(&flight);
        assert_eq!(a, b);

        let c = PassengerGenerator::new(8, 0.85, 0.2).generate(&flight);
        assert_ne!(a, c);
    }

    #[test]
    fn test_occupancy_counts_seated_passengers_only() {
        let flight = tk5678();
        let generator = PassengerGenerator::new(42, 0.85, 0.2);
        let pool = generator.generate(&flight);

        let seated = pool.iter().filter(|p| p.consumes_seat()).count();
        assert_eq!(seated, 153);
        assert!(pool.iter().all(|p| p.seat_number.is_none()));
        assert!(pool.iter().all(|p| p.is_infant() || (18..=87).contains(&p.info.age)));
        assert!(pool
            .iter()
            .filter(|p| p.is_infant())
            .all(|p| p.parent_id.is_some()));
    }

    #[test]
    fn test_ids_unique_and_companions_symmetric() {
        let pool = PassengerGenerator::new(3, 1.0, 0.5).generate(&tk5678());
        let mut ids: Vec<&str> = pool.iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), pool.len());

        for p in &pool {
            for other_id in &p.affiliated_passengers {
                let other = pool.iter().find(|o| &o.id == other_id).unwrap();
                assert!(other.affiliated_passengers.contains(&p.id));
                assert_eq!(other.seat_type, p.seat_type);
            }
        }
    }

    #[test]
    fn test_classes_stay_within_sections() {
        // 3 business rows of 6 seats
        let flight = tk5678();
        let pool = PassengerGenerator::new(11, 1.0, 0.5).generate(&flight);
        let business = pool.iter().filter(|p| p.seat_type == SeatClass::Business).count();
        let economy = pool.iter().filter(|p| p.seat_type == SeatClass::Economy).count();
        assert_eq!(business, 18);
        assert_eq!(economy, 162);
    }

    #[test]
    fn test_zero_occupancy() {
        assert!(PassengerGenerator::new(1, 0.0, 0.2).generate(&tk5678()).is_empty());
    }
}
