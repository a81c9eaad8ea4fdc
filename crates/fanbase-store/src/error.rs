//! Store errors

use thiserror::Error;

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLx error
    #[error("store error: {0}")]
    Sqlx(sqlx::Error),

    /// Unique constraint violation (e.g. a second active entitlement for the
    /// same (subscriber, creator) pair)
    #[error("conflict: unique constraint violated")]
    Conflict,

    /// Record not found
    #[error("record not found")]
    NotFound,

    /// A stored row holds a value the domain cannot represent
    #[error("malformed row: {0}")]
    Malformed(String),
}

/// Postgres error code for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound,
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Self::Conflict
            }
            _ => Self::Sqlx(err),
        }
    }
}

impl StoreError {
    /// Whether the error indicates a uniqueness conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict)
    }

    /// Whether the error indicates a missing record
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(err.is_not_found());
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_conflict_helpers() {
        assert!(StoreError::Conflict.is_conflict());
        assert!(!StoreError::Conflict.is_not_found());
        assert!(!StoreError::Malformed("tier".to_string()).is_conflict());
    }
}
