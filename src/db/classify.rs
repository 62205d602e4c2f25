//! Maps SQLite constraint failures onto the store's typed outcomes.
//!
//! Writes are attempted optimistically and the driver's rejection is
//! classified afterwards. The typed `ErrorKind` reported by sqlx is checked
//! first; the SQLite message text is the fallback for drivers that leave the
//! kind as `Other`.

use sqlx::error::ErrorKind;

use crate::error::TeaError;

const UNIQUE_MARKER: &str = "UNIQUE constraint failed";
const FOREIGN_KEY_MARKER: &str = "FOREIGN KEY constraint failed";
const CHECK_MARKER: &str = "CHECK constraint failed";

/// Reported when a name column's CHECK rule rejects a blank value.
pub const EMPTY_NAME: &str = "name must not be empty";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Unique,
    ForeignKey,
    Check,
}

pub fn violation(err: &sqlx::Error) -> Option<Violation> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    match db_err.kind() {
        ErrorKind::UniqueViolation => Some(Violation::Unique),
        ErrorKind::ForeignKeyViolation => Some(Violation::ForeignKey),
        ErrorKind::CheckViolation => Some(Violation::Check),
        _ => {
            let msg = db_err.message();
            if msg.contains(UNIQUE_MARKER) {
                Some(Violation::Unique)
            } else if msg.contains(FOREIGN_KEY_MARKER) {
                Some(Violation::ForeignKey)
            } else if msg.contains(CHECK_MARKER) {
                Some(Violation::Check)
            } else {
                None
            }
        }
    }
}

/// Classify a failed INSERT. A duplicate key is a conflict; an unresolved
/// foreign key is an invalid reference; a blank name is a bad request.
pub fn on_insert(err: sqlx::Error, conflict: &str, invalid_reference: &str) -> TeaError {
    match violation(&err) {
        Some(Violation::Unique) => TeaError::Conflict(conflict.to_string()),
        Some(Violation::ForeignKey) => TeaError::InvalidReference(invalid_reference.to_string()),
        Some(Violation::Check) => TeaError::BadRequest(EMPTY_NAME.to_string()),
        None => TeaError::Database(err),
    }
}

/// Classify a failed DELETE. The RESTRICT rule fires as a foreign-key
/// violation while dependent rows remain.
pub fn on_delete(err: sqlx::Error, still_referenced: &str) -> TeaError {
    match violation(&err) {
        Some(Violation::ForeignKey) => TeaError::Conflict(still_referenced.to_string()),
        _ => TeaError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_pass_through() {
        assert_eq!(violation(&sqlx::Error::RowNotFound), None);
        assert!(matches!(
            on_insert(sqlx::Error::PoolTimedOut, "dup", "missing"),
            TeaError::Database(sqlx::Error::PoolTimedOut)
        ));
        assert!(matches!(
            on_delete(sqlx::Error::PoolTimedOut, "in use"),
            TeaError::Database(_)
        ));
    }
}
