use sea_orm::TransactionError;
use thiserror::Error;

/// Error types for the domain module. Every variant is terminal for the
/// current operation: nothing is retried internally and a failed
/// operation leaves no partial effect behind.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Malformed or out-of-range input, rejected before any mutation
    #[error("Validation error: {0}")]
    Validation(String),

    /// The acting user is not the owning trainer of the target
    #[error("Operation forbidden for the acting user")]
    Forbidden,

    /// The session roster is full
    #[error("Training session {session_id} is full ({max_participants} participants)")]
    CapacityExceeded {
        session_id: i32,
        max_participants: i32,
    },

    /// An attendance status outside registered/present/absent/late
    #[error("Invalid attendance status: {0}")]
    InvalidStatus(String),

    /// A referenced entity does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Deleting this user would remove the final administrator
    #[error("Cannot delete the last remaining admin")]
    LastAdminProtected,

    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl DomainError {
    /// Collapse sea-orm's transaction wrapper back into a plain domain
    /// error so callers see one error type regardless of whether the
    /// failure happened inside or around the transaction.
    pub fn from_txn(err: TransactionError<DomainError>) -> Self {
        match err {
            TransactionError::Connection(e) => DomainError::Database(e),
            TransactionError::Transaction(e) => e,
        }
    }
}

/// Type alias for Result with DomainError
pub type Result<T> = std::result::Result<T, DomainError>;
