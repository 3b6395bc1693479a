// ==========================================
// Flight Roster - JSON export
// ==========================================
// Document: { flightInfo, flightCrew, cabinCrew, passengers }
// Format: pretty JSON, 2-space indentation
// File name: roster_<flight>_<YYYY-MM-DD>.json
// ==========================================

use crate::domain::roster::Roster;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("write failed ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Serializes the roster document
pub fn to_json(roster: &Roster) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(roster)?)
}

pub fn file_name(roster: &Roster, date: NaiveDate) -> String {
    format!(
        "roster_{}_{}.json",
        roster.flight_info().flight_number,
        date.format("%Y-%m-%d")
    )
}

/// Writes the roster into `dir` (created when missing) and returns the path
pub fn export_file(roster: &Roster, dir: &Path, date: NaiveDate) -> Result<PathBuf, ExportError> {
    let json = to_json(roster)?;
    let io_err = |path: &Path, source| ExportError::Io {
        path: path.display().to_string(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    let path = dir.join(file_name(roster, date));
    std::fs::write(&path, json).map_err(|e| io_err(&path, e))?;

    info!(path = %path.display(), "roster exported");
    Ok(path)
}
