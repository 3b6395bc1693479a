// ==========================================
// Flight Roster - Application state
// ==========================================
// Wires repository + config + api over one shared connection
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::RosterApi;
use crate::config::ConfigManager;
use crate::db::{init_schema, open_sqlite_connection};
use crate::repository::SqliteRosterRepository;

pub type SqliteRosterApi = RosterApi<SqliteRosterRepository, ConfigManager>;

/// Application state
///
/// Shared by both binaries; every component uses the same connection.
pub struct AppState {
    /// Database path
    pub db_path: String,

    pub roster_repo: Arc<SqliteRosterRepository>,

    pub config_manager: Arc<ConfigManager>,

    /// Roster API
    pub roster_api: Arc<SqliteRosterApi>,
}

impl AppState {
    /// Opens `db_path`, creates missing tables and builds the API
    ///
    /// # Errors
    /// Err(String) when the database cannot be opened or initialized
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!(db_path = %db_path, "initializing AppState");

        let conn = open_sqlite_connection(&db_path).map_err(|e| format!("cannot open database: {}", e))?;
        init_schema(&conn).map_err(|e| format!("cannot initialize schema: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        let roster_repo = Arc::new(SqliteRosterRepository::from_connection(conn.clone()));
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn).map_err(|e| format!("cannot create ConfigManager: {}", e))?,
        );
        let roster_api = Arc::new(RosterApi::new(roster_repo.clone(), config_manager.clone()));

        tracing::info!("AppState ready");
        Ok(Self {
            db_path,
            roster_repo,
            config_manager,
            roster_api,
        })
    }
}

/// Default database path
///
/// `FLIGHT_ROSTER_DB_PATH` wins when set; otherwise the user data
/// directory, falling back to the working directory.
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("FLIGHT_ROSTER_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./flight_roster.db");
    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("flight-roster");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("flight_roster.db");
        }
    }

    path.to_string_lossy().to_string()
}
