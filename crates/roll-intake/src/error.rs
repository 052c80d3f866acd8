//! Intake error types.

use thiserror::Error;

/// Errors from normalizing raw enrollment input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    /// Nothing survived normalization. Surfaced to the user as
    /// "no valid records", never silently ignored.
    #[error("No valid records found in input")]
    EmptyBatch,

    /// A required header column is absent from a roster CSV.
    #[error("Missing required column '{0}' in header row")]
    MissingColumn(&'static str),
}
