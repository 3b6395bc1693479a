// ==========================================
// Flight Roster - API error types
// ==========================================
// Maps repository / engine / export errors into user-facing messages.
// Every message carries its context (flight, role, seat, field).
// ==========================================

use crate::engine::error::AssemblyError;
use crate::presenter::export::ExportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // Roster assembly
    // ==========================================
    #[error("insufficient crew: {0}")]
    InsufficientCrew(String),

    #[error("seat conflict: {0}")]
    SeatConflict(String),

    #[error("passenger data integrity: {0}")]
    DataIntegrity(String),

    #[error("invalid flight profile: {0}")]
    InvalidFlightProfile(String),

    // ==========================================
    // Input / lookup
    // ==========================================
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("flight not found: {0}")]
    FlightNotFound(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("business rule violated: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // Data access
    // ==========================================
    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    #[error("database transaction failed: {0}")]
    DatabaseTransactionError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    // ==========================================
    // Export
    // ==========================================
    #[error("export failed: {0}")]
    ExportError(String),

    // ==========================================
    // Generic
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } if entity == "Flight" => ApiError::FlightNotFound(id),
            RepositoryError::NotFound { entity, id } => ApiError::NotFound(format!("{}(id={})", entity, id)),
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::DatabaseTransactionError(msg) => ApiError::DatabaseTransactionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("database lock failed: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("unique constraint violated: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("foreign key violated: {}", msg))
            }
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("field {}: {}", field, message))
            }
            RepositoryError::Serialization(msg) => ApiError::DatabaseError(format!("stored JSON unreadable: {}", msg)),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

impl From<AssemblyError> for ApiError {
    fn from(err: AssemblyError) -> Self {
        match &err {
            AssemblyError::InsufficientCrew { flight_number, role } => ApiError::InsufficientCrew(format!(
                "flight {} has no eligible {} candidate",
                flight_number, role
            )),
            AssemblyError::SeatConflict {
                flight_number,
                seat,
                first,
                second,
            } => ApiError::SeatConflict(format!(
                "flight {}: seat {} is pre-assigned to both {} and {}",
                flight_number, seat, first, second
            )),
            AssemblyError::DuplicatePassenger {
                flight_number,
                passenger_id,
            } => ApiError::DataIntegrity(format!(
                "flight {}: passenger id {} appears more than once",
                flight_number, passenger_id
            )),
            AssemblyError::InvalidFlightProfile { .. } => ApiError::InvalidFlightProfile(err.to_string()),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

/// Result alias
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CrewRole;

    #[test]
    fn test_flight_not_found_mapping() {
        let err: ApiError = RepositoryError::NotFound {
            entity: "Flight".to_string(),
            id: "XX0000".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::FlightNotFound(ref id) if id == "XX0000"));
    }

    #[test]
    fn test_transaction_failure_mapping() {
        let err: ApiError = RepositoryError::DatabaseTransactionError("cannot start a transaction".to_string()).into();
        assert!(matches!(err, ApiError::DatabaseTransactionError(_)));
        assert!(err.to_string().starts_with("database transaction failed"));
    }

    #[test]
    fn test_assembly_error_mapping_keeps_context() {
        let err: ApiError = AssemblyError::insufficient_crew("TK1234", CrewRole::FlightCrew).into();
        let msg = err.to_string();
        assert!(msg.contains("TK1234"));
        assert!(msg.contains("FlightCrew"));
    }
}
