// ==========================================
// Flight Roster - SQLite connection setup
// ==========================================
// Every Connection::open goes through here so PRAGMAs and the schema
// are identical for the CLI, the seeder and the tests.
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// Default busy_timeout (ms)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// schema_version written by `init_schema`
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version     INTEGER PRIMARY KEY,
    applied_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS config_kv (
    scope_id    TEXT NOT NULL,
    key         TEXT NOT NULL,
    value       TEXT NOT NULL,
    updated_at  TEXT NOT NULL DEFAULT (datetime('now')),
    PRIMARY KEY (scope_id, key)
);

CREATE TABLE IF NOT EXISTS flight (
    flight_number   TEXT PRIMARY KEY,
    scheduled_at    TEXT NOT NULL,
    duration_min    INTEGER NOT NULL,
    distance_km     REAL NOT NULL,
    source_json     TEXT NOT NULL,
    dest_json       TEXT NOT NULL,
    aircraft_type   TEXT NOT NULL,
    total_seats     INTEGER NOT NULL,
    seating_plan    TEXT NOT NULL,
    business_rows   INTEGER NOT NULL DEFAULT 0,
    menu_json       TEXT NOT NULL DEFAULT '[]'
);

CREATE TABLE IF NOT EXISTS flight_crew (
    crew_id             TEXT PRIMARY KEY,
    name                TEXT NOT NULL,
    age                 INTEGER NOT NULL,
    gender              TEXT NOT NULL,
    nationality         TEXT NOT NULL,
    languages_json      TEXT NOT NULL DEFAULT '[]',
    seniority           TEXT NOT NULL,
    vehicle_restriction TEXT NOT NULL,
    allowed_range       REAL NOT NULL,
    seq                 INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS cabin_crew (
    crew_id             TEXT PRIMARY KEY,
    name                TEXT NOT NULL,
    age                 INTEGER NOT NULL,
    gender              TEXT NOT NULL,
    nationality         TEXT NOT NULL,
    languages_json      TEXT NOT NULL DEFAULT '[]',
    crew_type           TEXT NOT NULL,
    recipes_json        TEXT NOT NULL DEFAULT '[]',
    restrictions_json   TEXT NOT NULL DEFAULT '[]',
    seq                 INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS passenger (
    flight_number       TEXT NOT NULL REFERENCES flight(flight_number) ON DELETE CASCADE,
    passenger_id        TEXT NOT NULL,
    name                TEXT NOT NULL,
    age                 INTEGER NOT NULL,
    gender              TEXT NOT NULL,
    nationality         TEXT NOT NULL,
    languages_json      TEXT NOT NULL DEFAULT '[]',
    seat_type           TEXT NOT NULL,
    seat_number         TEXT,
    parent_id           TEXT,
    affiliates_json     TEXT NOT NULL DEFAULT '[]',
    seq                 INTEGER NOT NULL,
    PRIMARY KEY (flight_number, passenger_id)
);
"#;

/// Applies the shared PRAGMAs
///
/// foreign_keys and busy_timeout are per-connection settings.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Opens a connection with the shared configuration
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Creates missing tables and records the schema version (idempotent)
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// Reads schema_version (None when the table does not exist)
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
