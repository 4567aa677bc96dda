//! Error conversions - From implementations for persistence errors
//!
//! Maps storage failures onto [`AppError`] so the caller can decide on retries.

#[cfg(feature = "sqlx")]
use super::{app_error::AppError, kind::ErrorKind};

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Kind and message for a Postgres SQLSTATE
///
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
#[cfg(feature = "sqlx")]
fn classify_sqlstate(code: Option<&str>) -> (ErrorKind, &'static str) {
    match code {
        // Class 23: unique and FK constraints back the username and
        // single-active-game rules
        Some("23505") => (ErrorKind::Conflict, "Record already exists"),
        Some("23503") => (ErrorKind::Conflict, "Referenced record does not exist"),
        Some("23502" | "23514") => (ErrorKind::BadRequest, "Stored value rejected"),
        // Class 08, 53, 57: connection, resources, operator intervention
        Some(c) if c.starts_with("08") || c.starts_with("53") || c.starts_with("57") => {
            (ErrorKind::ServiceUnavailable, "Database unavailable")
        }
        _ => (ErrorKind::InternalServerError, "Database error"),
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let (kind, message) = match &err {
            sqlx::Error::RowNotFound => (ErrorKind::NotFound, "Record not found"),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                (ErrorKind::ServiceUnavailable, "Database unavailable")
            }
            sqlx::Error::Database(db_err) => classify_sqlstate(db_err.code().as_deref()),
            _ => (ErrorKind::InternalServerError, "Database error"),
        };
        AppError::new(kind, message).with_source(err)
    }
}
