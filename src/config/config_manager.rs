// ==========================================
// Flight Roster - Configuration manager
// ==========================================
// Storage: config_kv table (scope_id='global')
// Missing keys -> defaults; unparsable values -> defaults + warning
// ==========================================

use crate::config::roster_config_trait::{ConfigResult, GeneratorSettings, RosterConfigReader};
use crate::db::open_sqlite_connection;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::warn;

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// Opens its own connection to `db_path`
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Shares an existing connection; PRAGMAs are re-applied (idempotent)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let guard = conn.lock().map_err(|e| format!("lock failed: {}", e))?;
            crate::db::configure_sqlite_connection(&guard)?;
        }
        Ok(Self { conn })
    }

    fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.conn.lock().map_err(|e| format!("lock failed: {}", e))?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Reads a global value (None when unset)
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        self.get_config_value(key)
    }

    /// Inserts or overwrites a global value
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.conn.lock().map_err(|e| format!("lock failed: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// Reads a value and parses it; falls back to `default` on absence or
    /// on a value rejected by `parse`
    fn get_parsed_or_default<T, F>(&self, key: &str, default: T, parse: F) -> ConfigResult<T>
    where
        T: std::fmt::Debug,
        F: Fn(&str) -> Option<T>,
    {
        let Some(raw) = self.get_config_value(key)? else {
            return Ok(default);
        };
        match parse(raw.trim()) {
            Some(value) => Ok(value),
            None => {
                warn!(config_key = key, value = %raw, fallback = ?default, "invalid config value, using default");
                Ok(default)
            }
        }
    }

    /// All global keys (defaults filled in) as a JSON object string
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let mut snapshot: BTreeMap<String, String> = defaults::all()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let conn = self.conn.lock().map_err(|e| format!("lock failed: {}", e))?;
        let mut stmt = conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;
        for row in rows {
            let (key, value) = row?;
            snapshot.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(snapshot))?)
    }
}

#[async_trait]
impl RosterConfigReader for ConfigManager {
    async fn get_require_senior_pilot(&self) -> ConfigResult<bool> {
        self.get_parsed_or_default(config_keys::REQUIRE_SENIOR_PILOT, false, parse_bool)
    }

    async fn get_export_directory(&self) -> ConfigResult<String> {
        self.get_parsed_or_default(config_keys::EXPORT_DIRECTORY, defaults::EXPORT_DIRECTORY.to_string(), |s| {
            (!s.is_empty()).then(|| s.to_string())
        })
    }

    async fn get_generator_settings(&self) -> ConfigResult<GeneratorSettings> {
        let fallback = GeneratorSettings::default();
        Ok(GeneratorSettings {
            seed: self.get_parsed_or_default(config_keys::GENERATOR_SEED, fallback.seed, |s| s.parse().ok())?,
            occupancy_ratio: self.get_parsed_or_default(
                config_keys::GENERATOR_OCCUPANCY_RATIO,
                fallback.occupancy_ratio,
                parse_ratio,
            )?,
            business_ratio: self.get_parsed_or_default(
                config_keys::GENERATOR_BUSINESS_RATIO,
                fallback.business_ratio,
                parse_ratio,
            )?,
        })
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn parse_ratio(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|r| (0.0..=1.0).contains(r))
}

// ==========================================
// Config keys
// ==========================================
pub mod config_keys {
    // roster assembly
    pub const REQUIRE_SENIOR_PILOT: &str = "roster/require_senior_pilot";

    // export
    pub const EXPORT_DIRECTORY: &str = "export/directory";

    // demo passenger generator
    pub const GENERATOR_OCCUPANCY_RATIO: &str = "generator/occupancy_ratio";
    pub const GENERATOR_BUSINESS_RATIO: &str = "generator/business_ratio";
    pub const GENERATOR_SEED: &str = "generator/seed";
}

mod defaults {
    use super::config_keys;

    pub const EXPORT_DIRECTORY: &str = "exports";

    pub fn all() -> [(&'static str, &'static str); 5] {
        [
            (config_keys::REQUIRE_SENIOR_PILOT, "false"),
            (config_keys::EXPORT_DIRECTORY, EXPORT_DIRECTORY),
            (config_keys::GENERATOR_OCCUPANCY_RATIO, "0.85"),
            (config_keys::GENERATOR_BUSINESS_RATIO, "0.2"),
            (config_keys::GENERATOR_SEED, "42"),
        ]
    }
}
