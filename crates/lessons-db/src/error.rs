//! Store-level error classification.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a single store operation.
///
/// Constraint violations are lifted out of the driver error so the resource
/// managers can map them to `409 Conflict` / `404 Not Found` without knowing
/// anything about Postgres.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("unique constraint violated: {constraint}")]
    DuplicateKey { constraint: String },

    /// A foreign key constraint rejected the write.
    #[error("foreign key constraint violated: {constraint}")]
    ForeignKey { constraint: String },

    /// The targeted row does not exist.
    #[error("row not found")]
    NotFound,

    /// Anything else. Propagated as an unclassified failure.
    #[error(transparent)]
    Database(sqlx::Error),
}

impl StoreError {
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StoreError::DuplicateKey { .. })
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateKey {
                    constraint: db_err.constraint().unwrap_or_default().to_string(),
                }
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                StoreError::ForeignKey {
                    constraint: db_err.constraint().unwrap_or_default().to_string(),
                }
            }
            _ => StoreError::Database(err),
        }
    }
}
