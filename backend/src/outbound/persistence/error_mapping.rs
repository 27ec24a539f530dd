//! Shared Diesel error mapping for the SQLite repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    debug!(%message, "connection pool checkout failed");
    connection(message)
}

/// Map Diesel failures into repository query or connection errors.
///
/// Details are logged at debug level and replaced by a generic message so
/// driver text never reaches clients.
pub(crate) fn map_diesel_error<E>(
    error: &DieselError,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// Whether the failure is a uniqueness constraint violation.
pub(crate) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Convert a pagination window bound into an SQL `LIMIT`/`OFFSET` value.
///
/// Bounds past `i64::MAX` saturate; no table holds that many rows, so the
/// window is simply empty.
pub(crate) fn sql_bound(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Whether the failure is a foreign key violation.
pub(crate) fn is_foreign_key_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
    )
}

/// Convert an SQL `COUNT(*)` back into a collection size.
pub(crate) fn sql_count(value: i64) -> Result<usize, DieselError> {
    usize::try_from(value).map_err(|err| DieselError::DeserializationError(Box::new(err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(&'static str),
    }

    #[rstest]
    fn not_found_maps_to_query() {
        let mapped = map_diesel_error(&DieselError::NotFound, Mapped::Query, Mapped::Connection);
        assert_eq!(mapped, Mapped::Query("record not found"));
    }

    #[rstest]
    fn closed_connection_maps_to_connection() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("closed".to_owned()),
        );
        let mapped = map_diesel_error(&error, Mapped::Query, Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("database connection error"));
    }

    #[rstest]
    fn unique_violation_is_detected() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("UNIQUE constraint failed: users.email".to_owned()),
        );
        assert!(is_unique_violation(&error));
        assert!(!is_unique_violation(&DieselError::NotFound));
    }

    #[rstest]
    fn pool_errors_keep_message() {
        let mapped = map_pool_error(PoolError::checkout("timed out"), |m| m);
        assert_eq!(mapped, "timed out");
    }

    #[rstest]
    fn window_bounds_convert() {
        assert_eq!(sql_bound(50), 50);
        assert_eq!(sql_count(3).ok(), Some(3));
        assert!(sql_count(-1).is_err());
    }

    #[rstest]
    #[case(usize::MAX)]
    #[case(usize::try_from(i64::MAX).expect("64-bit usize") + 1)]
    fn oversized_bounds_saturate(#[case] value: usize) {
        assert_eq!(sql_bound(value), i64::MAX);
    }

    #[rstest]
    fn foreign_key_violation_is_detected() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("FOREIGN KEY constraint failed".to_owned()),
        );
        assert!(is_foreign_key_violation(&error));
        assert!(!is_foreign_key_violation(&DieselError::NotFound));
    }
}
