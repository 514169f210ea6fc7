//! Message store error types

use thiserror::Error;

/// Errors that can occur in the message store
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite rejected a statement or could not open the database
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// I/O operation failed (creating the data directory)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Lock acquisition failed
    #[error("Lock error: {0}")]
    Lock(String),

    /// The blocking task running the query was cancelled or panicked
    #[error("Task error: {0}")]
    Task(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::Task("cancelled".to_string());
        assert_eq!(err.to_string(), "Task error: cancelled");

        let err = StoreError::Lock("poisoned".to_string());
        assert_eq!(err.to_string(), "Lock error: poisoned");
    }
}
