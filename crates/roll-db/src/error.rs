//! Error types for roll-db.
//!
//! `DatabaseError` covers the storage layer; `RosterError` is the typed
//! outcome of roster and attendance operations. Per-candidate failures in
//! bulk operations never surface as `RosterError`; they are recovered into
//! skip records inside the batch result.

use thiserror::Error;

use roll_core::errors::CoreError;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors from single-item roster and attendance operations.
///
/// Single-item operations fail the whole call with one of these instead of
/// returning a skip record, since there is no batch to partially succeed.
#[derive(Debug, Error)]
pub enum RosterError {
    /// An active enrollment already exists for this (section, student) pair.
    #[error("Student {student_id} is already enrolled in section {section_id}")]
    AlreadyEnrolled {
        section_id: String,
        student_id: String,
    },

    /// No active enrollment exists to remove. Repeating a removal is an
    /// error, not a silent success.
    #[error("Student {student_id} is not enrolled in section {section_id}")]
    NotEnrolled {
        section_id: String,
        student_id: String,
    },

    /// The identifier does not resolve to a real student in the directory.
    #[error("Unknown student: {0}")]
    UnknownStudent(String),

    /// The target section does not exist.
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    /// Storage-layer failure, surfaced verbatim.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Student-directory failure, surfaced verbatim.
    #[error(transparent)]
    Directory(#[from] CoreError),
}

impl From<libsql::Error> for RosterError {
    fn from(e: libsql::Error) -> Self {
        Self::Database(DatabaseError::from(e))
    }
}

/// Whether a libSQL error is a UNIQUE constraint violation.
///
/// The partial index on active enrollments reports conflicts this way; the
/// reconciler maps them to `AlreadyEnrolled`.
pub(crate) fn is_unique_violation(e: &libsql::Error) -> bool {
    e.to_string().contains("UNIQUE constraint failed")
}
