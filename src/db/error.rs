use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database not configured")]
    NotConfigured,

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[cfg(any(feature = "database-sqlite", feature = "database-postgres"))]
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Message returned when a write references a missing category row.
pub const UNKNOWN_CATEGORY: &str = "The specified category does not exist";

/// Map constraint violations raised by tool writes onto client-facing errors.
#[cfg(any(feature = "database-sqlite", feature = "database-postgres"))]
pub(crate) fn map_tool_write_error(err: sqlx::Error) -> DbError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            DbError::Validation(UNKNOWN_CATEGORY.into())
        }
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            DbError::Conflict("A tool with these values already exists".into())
        }
        sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
            DbError::Validation(format!("Constraint violated: {}", db_err.message()))
        }
        _ => DbError::from(err),
    }
}
