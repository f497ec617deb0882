//! Error handling for gematria-store
//!
//! Maps rusqlite failures onto the core taxonomy so callers can tell a
//! dead database from a missing table from a duplicate phrase.

use gematria_core::errors::{ExError, ExErrorKind};
use rusqlite::ErrorCode;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Classify a rusqlite error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = classify(&err);
    ExError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Classify a rusqlite error, attaching the phrase when it is a
/// uniqueness conflict
pub fn from_rusqlite_for_phrase(err: rusqlite::Error, phrase: &str) -> ExError {
    let ex = from_rusqlite(err);
    if ex.kind() == ExErrorKind::Conflict {
        ex.with_phrase(phrase).with_message("Phrase already exists")
    } else {
        ex
    }
}

fn classify(err: &rusqlite::Error) -> ExErrorKind {
    let rusqlite::Error::SqliteFailure(failure, message) = err else {
        return ExErrorKind::Persistence;
    };

    match failure.code {
        ErrorCode::ConstraintViolation
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            ExErrorKind::Conflict
        }
        ErrorCode::CannotOpen
        | ErrorCode::DatabaseBusy
        | ErrorCode::DatabaseLocked
        | ErrorCode::SystemIoFailure
        | ErrorCode::PermissionDenied
        | ErrorCode::NotADatabase
        | ErrorCode::FileLockingProtocolFailed => ExErrorKind::StoreUnavailable,
        _ if message
            .as_deref()
            .is_some_and(|m| m.starts_with("no such table")) =>
        {
            ExErrorKind::SchemaMissing
        }
        _ => ExErrorKind::Persistence,
    }
}

/// Create a seed parsing error
pub fn seed_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("seed_parse")
        .with_message(reason.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_missing_table_is_schema_missing() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn
            .query_row("SELECT COUNT(*) FROM gematria_entries", [], |r| {
                r.get::<_, i64>(0)
            })
            .unwrap_err();

        assert_eq!(from_rusqlite(err).kind(), ExErrorKind::SchemaMissing);
    }

    #[test]
    fn test_unique_violation_is_conflict() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (phrase TEXT NOT NULL UNIQUE); INSERT INTO t VALUES ('א');")
            .unwrap();
        let err = conn
            .execute("INSERT INTO t VALUES ('א')", [])
            .unwrap_err();

        let ex = from_rusqlite_for_phrase(err, "א");
        assert_eq!(ex.kind(), ExErrorKind::Conflict);
        assert_eq!(ex.phrase(), Some("א"));
    }

    #[test]
    fn test_not_null_violation_is_persistence() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (phrase TEXT NOT NULL)").unwrap();
        let err = conn
            .execute("INSERT INTO t VALUES (NULL)", [])
            .unwrap_err();

        assert_eq!(from_rusqlite(err).kind(), ExErrorKind::Persistence);
    }

    #[test]
    fn test_unopenable_path_is_unavailable() {
        let err = Connection::open("/nonexistent-dir-for-gematria/x/y.db").unwrap_err();
        assert_eq!(from_rusqlite(err).kind(), ExErrorKind::StoreUnavailable);
    }
}
