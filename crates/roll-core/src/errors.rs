//! Cross-cutting error types for Rollcall.
//!
//! Domain-specific errors (`DatabaseError`, `RosterError`, `IntakeError`) live
//! in their respective crates; `CoreError` covers failures that can originate
//! from any collaborator behind a trait seam, such as the student directory.

use thiserror::Error;

/// Errors that can be raised by any Rollcall crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity} {id}")]
    NotFound { entity: String, id: String },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A boundary call (directory, transport) failed outright.
    ///
    /// Surfaced verbatim to the caller; never retried by this core.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
