// ==========================================
// Flight Roster - SQLite roster repository
// ==========================================
// Tables: flight / flight_crew / cabin_crew / passenger (see db::init_schema)
// List-valued columns are stored as JSON text.
// Rule: data access only, no roster rules here
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::crew::{CabinCrewKind, CabinCrewMember, CrewCandidate, FlightCrewMember, PersonalInfo};
use crate::domain::flight::{Endpoint, FlightProfile};
use crate::domain::passenger::{PassengerBooking, PassengerCandidate};
use crate::domain::seat::SeatIdentifier;
use crate::domain::types::{CrewRole, SeatClass, Seniority};
use crate::repository::crew_filter::CrewFilter;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::roster_repo_trait::RosterRepository;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument};

/// Storage format of `flight.scheduled_at`
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// ==========================================
// SqliteRosterRepository
// ==========================================
pub struct SqliteRosterRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRosterRepository {
    /// Opens (and initializes) the database at `db_path`
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(format!("{}: {}", db_path, e)))?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Shares an existing connection (schema assumed present)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // Writes (seeding / import)
    // ==========================================

    /// Inserts or updates a flight; its passengers are left in place
    pub fn upsert_flight(&self, flight: &FlightProfile) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO flight (
                flight_number, scheduled_at, duration_min, distance_km,
                source_json, dest_json, aircraft_type, total_seats,
                seating_plan, business_rows, menu_json
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ON CONFLICT(flight_number) DO UPDATE SET
                scheduled_at = excluded.scheduled_at,
                duration_min = excluded.duration_min,
                distance_km = excluded.distance_km,
                source_json = excluded.source_json,
                dest_json = excluded.dest_json,
                aircraft_type = excluded.aircraft_type,
                total_seats = excluded.total_seats,
                seating_plan = excluded.seating_plan,
                business_rows = excluded.business_rows,
                menu_json = excluded.menu_json
            "#,
            params![
                flight.flight_number,
                flight.scheduled_at.format(DATETIME_FORMAT).to_string(),
                flight.duration_minutes,
                flight.distance_km,
                serde_json::to_string(&flight.source)?,
                serde_json::to_string(&flight.destination)?,
                flight.aircraft_type,
                flight.total_seats,
                flight.seating_plan,
                flight.business_rows,
                serde_json::to_string(&flight.standard_menu)?,
            ],
        )?;
        Ok(())
    }

    /// Inserts or replaces crew members; pool order follows the slice
    ///
    /// # Returns
    /// - Ok(usize): rows written (single transaction)
    pub fn insert_crew(&self, crew: &[CrewCandidate]) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction().map_err(transaction_failed)?;

        let base: i64 = tx.query_row(
            "SELECT (SELECT COUNT(*) FROM flight_crew) + (SELECT COUNT(*) FROM cabin_crew)",
            [],
            |row| row.get(0),
        )?;

        for (offset, candidate) in crew.iter().enumerate() {
            let seq = base + offset as i64;
            match candidate {
                CrewCandidate::FlightCrew(m) => {
                    tx.execute(
                        r#"
                        INSERT OR REPLACE INTO flight_crew (
                            crew_id, name, age, gender, nationality, languages_json,
                            seniority, vehicle_restriction, allowed_range, seq
                        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                        "#,
                        params![
                            m.id,
                            m.info.name,
                            m.info.age,
                            m.info.gender,
                            m.info.nationality,
                            serde_json::to_string(&m.info.languages)?,
                            m.seniority.to_string(),
                            m.vehicle_restriction,
                            m.allowed_range,
                            seq,
                        ],
                    )?;
                }
                CrewCandidate::CabinCrew(m) => {
                    tx.execute(
                        r#"
                        INSERT OR REPLACE INTO cabin_crew (
                            crew_id, name, age, gender, nationality, languages_json,
                            crew_type, recipes_json, restrictions_json, seq
                        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                        "#,
                        params![
                            m.id,
                            m.info.name,
                            m.info.age,
                            m.info.gender,
                            m.info.nationality,
                            serde_json::to_string(&m.info.languages)?,
                            m.kind.to_string(),
                            serde_json::to_string(m.kind.recipes())?,
                            serde_json::to_string(&m.vehicle_restrictions)?,
                            seq,
                        ],
                    )?;
                }
            }
        }

        tx.commit().map_err(transaction_failed)?;
        debug!(count = crew.len(), "crew written");
        Ok(crew.len())
    }

    /// Inserts or replaces a flight's passengers; pool order follows the slice
    pub fn insert_passengers(
        &self,
        flight_number: &str,
        passengers: &[PassengerCandidate],
    ) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction().map_err(transaction_failed)?;

        let base: i64 = tx.query_row(
            "SELECT COUNT(*) FROM passenger WHERE flight_number = ?1",
            params![flight_number],
            |row| row.get(0),
        )?;

        for (offset, p) in passengers.iter().enumerate() {
            tx.execute(
                r#"
                INSERT OR REPLACE INTO passenger (
                    flight_number, passenger_id, name, age, gender, nationality,
                    languages_json, seat_type, seat_number, parent_id,
                    affiliates_json, seq
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                "#,
                params![
                    flight_number,
                    p.id,
                    p.info.name,
                    p.info.age,
                    p.info.gender,
                    p.info.nationality,
                    serde_json::to_string(&p.info.languages)?,
                    p.seat_type.to_string(),
                    p.seat_number.map(|s| s.to_string()),
                    p.parent_id,
                    serde_json::to_string(&p.affiliated_passengers)?,
                    base + offset as i64,
                ],
            )?;
        }

        tx.commit().map_err(transaction_failed)?;
        debug!(flight_number, count = passengers.len(), "passengers written");
        Ok(passengers.len())
    }

    /// Removes a flight's passengers (used before re-seeding a generated pool)
    pub fn clear_passengers(&self, flight_number: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let removed = conn.execute(
            "DELETE FROM passenger WHERE flight_number = ?1",
            params![flight_number],
        )?;
        Ok(removed)
    }

    // ==========================================
    // Reads
    // ==========================================

    pub fn find_flight(&self, flight_number: &str) -> RepositoryResult<Option<FlightProfile>> {
        let conn = self.get_conn()?;
        let raw = conn
            .query_row(
                r#"
                SELECT flight_number, scheduled_at, duration_min, distance_km,
                       source_json, dest_json, aircraft_type, total_seats,
                       seating_plan, business_rows, menu_json
                FROM flight WHERE flight_number = ?1
                "#,
                params![flight_number],
                FlightRow::from_row,
            )
            .optional()?;

        raw.map(FlightRow::into_profile).transpose()
    }

    pub fn find_crew_pool(&self) -> RepositoryResult<Vec<CrewCandidate>> {
        self.find_crew(&CrewFilter::default())
    }

    /// Crew matching `filter`; tables the filter rules out are not read
    pub fn find_crew(&self, filter: &CrewFilter) -> RepositoryResult<Vec<CrewCandidate>> {
        let conn = self.get_conn()?;
        let aircraft_type = filter.aircraft_type.as_deref().map(str::trim).filter(|t| !t.is_empty());
        let mut pool = Vec::new();

        if filter.admits_role(CrewRole::FlightCrew) {
            let mut stmt = conn.prepare(
                r#"
                SELECT crew_id, name, age, gender, nationality, languages_json,
                       seniority, vehicle_restriction, allowed_range
                FROM flight_crew
                WHERE (?1 IS NULL OR allowed_range >= ?1)
                  AND (?2 IS NULL OR instr(lower(vehicle_restriction), lower(?2)) > 0)
                ORDER BY seq, crew_id
                "#,
            )?;
            let rows = stmt.query_map(params![filter.min_range, aircraft_type], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    personal_info(row, 1)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, String>(7)?,
                    row.get::<_, f64>(8)?,
                ))
            })?;
            for row in rows {
                let (id, info, seniority, vehicle_restriction, allowed_range) = row?;
                let info = info.into_info()?;
                let seniority: Seniority = seniority
                    .parse()
                    .map_err(|e: String| RepositoryError::field("seniority", e))?;
                pool.push(CrewCandidate::FlightCrew(FlightCrewMember {
                    id,
                    info,
                    seniority,
                    vehicle_restriction,
                    allowed_range,
                }));
            }
        }

        if filter.admits_role(CrewRole::CabinCrew) {
            let cabin_kind = filter.cabin_kind.as_deref().map(str::trim);
            let mut stmt = conn.prepare(
                r#"
                SELECT crew_id, name, age, gender, nationality, languages_json,
                       crew_type, recipes_json, restrictions_json
                FROM cabin_crew
                WHERE (?1 IS NULL OR lower(crew_type) = lower(?1))
                ORDER BY seq, crew_id
                "#,
            )?;
            let rows = stmt.query_map(params![cabin_kind], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    personal_info(row, 1)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, String>(7)?,
                    row.get::<_, String>(8)?,
                ))
            })?;
            for row in rows {
                let (id, info, crew_type, recipes_json, restrictions_json) = row?;
                let info = info.into_info()?;
                let kind = parse_cabin_kind(&crew_type, &recipes_json)?;
                let vehicle_restrictions: Vec<String> = serde_json::from_str(&restrictions_json)?;
                pool.push(CrewCandidate::CabinCrew(CabinCrewMember {
                    id,
                    info,
                    kind,
                    vehicle_restrictions,
                }));
            }
        }

        // restriction lists are JSON text: the aircraft filter finishes here
        pool.retain(|c| filter.matches(c));
        Ok(pool)
    }

    pub fn find_crew_member(&self, crew_id: &str) -> RepositoryResult<Option<CrewCandidate>> {
        Ok(self
            .find_crew(&CrewFilter::default())?
            .into_iter()
            .find(|c| c.id() == crew_id))
    }

    pub fn find_passenger_pool(&self, flight_number: &str) -> RepositoryResult<Vec<PassengerCandidate>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT passenger_id, name, age, gender, nationality, languages_json,
                   seat_type, seat_number, parent_id, affiliates_json
            FROM passenger WHERE flight_number = ?1 ORDER BY seq, passenger_id
            "#,
        )?;
        let rows = stmt.query_map(params![flight_number], |row| PassengerRow::from_row(row, 0))?;

        let mut pool = Vec::new();
        for row in rows {
            pool.push(row?.into_candidate()?);
        }
        Ok(pool)
    }

    /// First booking of a passenger id, by flight number
    pub fn find_passenger(&self, passenger_id: &str) -> RepositoryResult<Option<PassengerBooking>> {
        let conn = self.get_conn()?;
        let raw = conn
            .query_row(
                r#"
                SELECT flight_number, passenger_id, name, age, gender, nationality,
                       languages_json, seat_type, seat_number, parent_id, affiliates_json
                FROM passenger WHERE passenger_id = ?1
                ORDER BY flight_number LIMIT 1
                "#,
                params![passenger_id],
                |row| Ok((row.get::<_, String>(0)?, PassengerRow::from_row(row, 1)?)),
            )
            .optional()?;

        match raw {
            Some((flight_number, row)) => Ok(Some(PassengerBooking {
                flight_number,
                passenger: row.into_candidate()?,
            })),
            None => Ok(None),
        }
    }

    pub fn find_flight_numbers(&self) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT flight_number FROM flight ORDER BY flight_number")?;
        let numbers = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(numbers)
    }
}

#[async_trait]
impl RosterRepository for SqliteRosterRepository {
    #[instrument(skip(self))]
    async fn fetch_flight(&self, flight_number: &str) -> RepositoryResult<FlightProfile> {
        self.find_flight(flight_number)?
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "Flight".to_string(),
                id: flight_number.to_string(),
            })
    }

    async fn fetch_crew_pool(&self) -> RepositoryResult<Vec<CrewCandidate>> {
        self.find_crew_pool()
    }

    async fn fetch_passenger_pool(&self, flight_number: &str) -> RepositoryResult<Vec<PassengerCandidate>> {
        self.find_passenger_pool(flight_number)
    }

    async fn list_flights(&self) -> RepositoryResult<Vec<String>> {
        self.find_flight_numbers()
    }

    #[instrument(skip(self))]
    async fn fetch_crew(&self, filter: &CrewFilter) -> RepositoryResult<Vec<CrewCandidate>> {
        self.find_crew(filter)
    }

    async fn fetch_crew_member(&self, crew_id: &str) -> RepositoryResult<CrewCandidate> {
        self.find_crew_member(crew_id)?.ok_or_else(|| RepositoryError::NotFound {
            entity: "CrewMember".to_string(),
            id: crew_id.to_string(),
        })
    }

    async fn fetch_passenger(&self, passenger_id: &str) -> RepositoryResult<PassengerBooking> {
        self.find_passenger(passenger_id)?
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "Passenger".to_string(),
                id: passenger_id.to_string(),
            })
    }
}

// ==========================================
// Row helpers
// ==========================================

struct FlightRow {
    flight_number: String,
    scheduled_at: String,
    duration_minutes: u32,
    distance_km: f64,
    source_json: String,
    dest_json: String,
    aircraft_type: String,
    total_seats: u32,
    seating_plan: String,
    business_rows: u32,
    menu_json: String,
}

impl FlightRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            flight_number: row.get(0)?,
            scheduled_at: row.get(1)?,
            duration_minutes: row.get(2)?,
            distance_km: row.get(3)?,
            source_json: row.get(4)?,
            dest_json: row.get(5)?,
            aircraft_type: row.get(6)?,
            total_seats: row.get(7)?,
            seating_plan: row.get(8)?,
            business_rows: row.get(9)?,
            menu_json: row.get(10)?,
        })
    }

    fn into_profile(self) -> RepositoryResult<FlightProfile> {
        let scheduled_at = NaiveDateTime::parse_from_str(&self.scheduled_at, DATETIME_FORMAT)
            .map_err(|e| RepositoryError::field("scheduled_at", e.to_string()))?;
        let source: Endpoint = serde_json::from_str(&self.source_json)?;
        let destination: Endpoint = serde_json::from_str(&self.dest_json)?;

        Ok(FlightProfile {
            flight_number: self.flight_number,
            scheduled_at,
            duration_minutes: self.duration_minutes,
            distance_km: self.distance_km,
            source,
            destination,
            aircraft_type: self.aircraft_type,
            total_seats: self.total_seats,
            seating_plan: self.seating_plan,
            business_rows: self.business_rows,
            standard_menu: serde_json::from_str(&self.menu_json)?,
        })
    }
}

/// Personal columns as stored; languages still JSON text
struct PersonalRow {
    name: String,
    age: u8,
    gender: String,
    nationality: String,
    languages_json: String,
}

impl PersonalRow {
    fn into_info(self) -> RepositoryResult<PersonalInfo> {
        Ok(PersonalInfo {
            name: self.name,
            age: self.age,
            gender: self.gender,
            nationality: self.nationality,
            languages: serde_json::from_str(&self.languages_json)?,
        })
    }
}

/// Reads name/age/gender/nationality/languages_json starting at `first`
fn personal_info(row: &Row<'_>, first: usize) -> rusqlite::Result<PersonalRow> {
    Ok(PersonalRow {
        name: row.get(first)?,
        age: row.get(first + 1)?,
        gender: row.get(first + 2)?,
        nationality: row.get(first + 3)?,
        languages_json: row.get(first + 4)?,
    })
}

/// Passenger columns from `first`: id, personal columns, seat_type,
/// seat_number, parent_id, affiliates_json
struct PassengerRow {
    id: String,
    personal: PersonalRow,
    seat_type: String,
    seat_number: Option<String>,
    parent_id: Option<String>,
    affiliates_json: String,
}

impl PassengerRow {
    fn from_row(row: &Row<'_>, first: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(first)?,
            personal: personal_info(row, first + 1)?,
            seat_type: row.get(first + 6)?,
            seat_number: row.get(first + 7)?,
            parent_id: row.get(first + 8)?,
            affiliates_json: row.get(first + 9)?,
        })
    }

    fn into_candidate(self) -> RepositoryResult<PassengerCandidate> {
        let seat_type: SeatClass = self
            .seat_type
            .parse()
            .map_err(|e: String| RepositoryError::field("seat_type", e))?;
        let seat_number = self
            .seat_number
            .map(|s| s.parse::<SeatIdentifier>())
            .transpose()
            .map_err(|e| RepositoryError::field("seat_number", e.to_string()))?;
        Ok(PassengerCandidate {
            id: self.id,
            info: self.personal.into_info()?,
            seat_type,
            seat_number,
            parent_id: self.parent_id,
            affiliated_passengers: serde_json::from_str(&self.affiliates_json)?,
        })
    }
}

fn transaction_failed(err: rusqlite::Error) -> RepositoryError {
    RepositoryError::DatabaseTransactionError(err.to_string())
}

fn parse_cabin_kind(crew_type: &str, recipes_json: &str) -> RepositoryResult<CabinCrewKind> {
    match crew_type {
        "Regular" => Ok(CabinCrewKind::Regular),
        "Chief" => Ok(CabinCrewKind::Chief),
        "Chef" => Ok(CabinCrewKind::Chef {
            recipes: serde_json::from_str(recipes_json)?,
        }),
        other => Err(RepositoryError::field("crew_type", format!("unknown cabin crew type: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory_roster_repo::InMemoryRosterRepository;

    fn repo() -> SqliteRosterRepository {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        SqliteRosterRepository::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_flight_roundtrip() {
        let repo = repo();
        let demo = InMemoryRosterRepository::demo();
        let flight = demo.flight("TK1234").unwrap().clone();

        repo.upsert_flight(&flight).unwrap();
        assert_eq!(repo.find_flight("TK1234").unwrap(), Some(flight));
        assert_eq!(repo.find_flight("XX0000").unwrap(), None);
    }

    #[test]
    fn test_crew_pool_keeps_insert_order() {
        let repo = repo();
        let demo = InMemoryRosterRepository::demo();
        repo.insert_crew(demo.crew()).unwrap();

        let pool = repo.find_crew_pool().unwrap();
        assert_eq!(pool.len(), demo.crew().len());
        assert!(pool.iter().any(|c| matches!(
            c,
            CrewCandidate::CabinCrew(m) if matches!(m.kind, CabinCrewKind::Chef { ref recipes } if !recipes.is_empty())
        )));
    }

    #[test]
    fn test_passenger_pool_preserves_links() {
        let repo = repo();
        let demo = InMemoryRosterRepository::demo();
        let flight = demo.flight("TK1234").unwrap().clone();
        repo.upsert_flight(&flight).unwrap();
        repo.insert_passengers("TK1234", demo.passengers("TK1234")).unwrap();

        let pool = repo.find_passenger_pool("TK1234").unwrap();
        assert_eq!(pool, demo.passengers("TK1234").to_vec());
        let infant = pool.iter().find(|p| p.id == "P004").unwrap();
        assert_eq!(infant.parent_id.as_deref(), Some("P003"));
    }

    #[test]
    fn test_crew_filter_in_sql() {
        let repo = repo();
        repo.insert_crew(InMemoryRosterRepository::demo().crew()).unwrap();
        let ids = |filter: CrewFilter| -> Vec<String> {
            repo.find_crew(&filter).unwrap().iter().map(|c| c.id().to_string()).collect()
        };

        assert_eq!(ids(CrewFilter::default().aircraft_type("A320")), vec!["FC003", "CC001", "CC002", "CC004", "CC005"]);
        assert_eq!(ids(CrewFilter::default().min_range(12000.0)), vec!["FC001", "FC002"]);
        assert_eq!(ids(CrewFilter::default().cabin_kind("chief")), vec!["CC001"]);
        assert_eq!(
            ids(CrewFilter::default().role(CrewRole::CabinCrew).aircraft_type("777").cabin_kind("Chef")),
            vec!["CC003", "CC005"]
        );
        assert!(repo.find_crew_member("FC004").unwrap().is_some());
        assert!(repo.find_crew_member("FC404").unwrap().is_none());
    }

    #[test]
    fn test_find_passenger_takes_first_flight() {
        let repo = repo();
        let demo = InMemoryRosterRepository::demo();
        for flight in demo.flights() {
            repo.upsert_flight(flight).unwrap();
            repo.insert_passengers(&flight.flight_number, demo.passengers(&flight.flight_number))
                .unwrap();
        }
        // same id booked on the later flight too
        let mut twin = demo.passengers("TK1234")[0].clone();
        twin.seat_number = None;
        repo.insert_passengers("TK5678", &[twin]).unwrap();

        let booking = repo.find_passenger("P001").unwrap().unwrap();
        assert_eq!(booking.flight_number, "TK1234");
        assert_eq!(booking.passenger, demo.passengers("TK1234")[0]);

        let infant = repo.find_passenger("P004").unwrap().unwrap();
        assert_eq!(infant.passenger.parent_id.as_deref(), Some("P003"));
        assert!(repo.find_passenger("P999").unwrap().is_none());
    }

    #[test]
    fn test_open_failure_is_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("roster.db");

        let err = SqliteRosterRepository::new(path.to_str().unwrap()).err().unwrap();
        assert!(matches!(err, RepositoryError::DatabaseConnectionError(ref msg) if msg.contains("roster.db")));
    }

    #[test]
    fn test_nested_transaction_is_transaction_error() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        let shared = Arc::new(Mutex::new(conn));
        shared.lock().unwrap().execute_batch("BEGIN").unwrap();

        let repo = SqliteRosterRepository::from_connection(shared);
        let demo = InMemoryRosterRepository::demo();
        let err = repo.insert_crew(demo.crew()).unwrap_err();
        assert!(matches!(err, RepositoryError::DatabaseTransactionError(_)));
    }
}
