//! Diesel and pool error mapping for the enrollment repository.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::EnrollmentRepositoryError;

use super::pool::PoolError;

/// Map pool failures onto connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> EnrollmentRepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    EnrollmentRepositoryError::connection(message)
}

/// Map Diesel failures onto query or connection errors, keeping the database
/// message so it reaches the caller.
pub(crate) fn map_diesel_error(error: DieselError) -> EnrollmentRepositoryError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            debug!(message = info.message(), "database connection closed");
            EnrollmentRepositoryError::connection(info.message())
        }
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "database operation failed");
            EnrollmentRepositoryError::query(info.message())
        }
        other => {
            debug!(error = %other, "diesel operation failed");
            EnrollmentRepositoryError::query(other.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, EnrollmentRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn other_diesel_errors_become_query_errors() {
        let mapped = map_diesel_error(DieselError::NotFound);
        assert!(matches!(mapped, EnrollmentRepositoryError::Query { .. }));
    }
}
