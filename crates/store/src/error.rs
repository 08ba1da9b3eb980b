//! Store error model.

use thiserror::Error;

/// A failed store operation.
///
/// Carries the name of the operation that failed alongside the driver
/// error, so the API layer can log the cause instead of suppressing it
/// before flattening the response to the wire contract's empty 500.
#[derive(Debug, Error)]
#[error("store operation `{operation}` failed: {source}")]
pub struct StoreError {
    operation: &'static str,
    #[source]
    source: sqlx::Error,
}

impl StoreError {
    pub(crate) fn new(operation: &'static str, source: sqlx::Error) -> Self {
        Self { operation, source }
    }

    /// Name of the store operation that failed.
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Whether the failure is a uniqueness-constraint violation.
    ///
    /// Uniqueness is normally rejected by a lookup before insert; this only
    /// fires when two inserts race, and is still surfaced as a store
    /// failure rather than a conflict.
    pub fn is_unique_violation(&self) -> bool {
        match &self.source {
            sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_operation() {
        let err = StoreError::new("fetch_student", sqlx::Error::RowNotFound);
        assert!(err.to_string().contains("fetch_student"));
        assert_eq!(err.operation(), "fetch_student");
        assert!(!err.is_unique_violation());
    }
}
