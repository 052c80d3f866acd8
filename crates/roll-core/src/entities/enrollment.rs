use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SkipReason;

/// One student's membership in one section.
///
/// A row is active while `removed_at` is `NULL`. Removal deactivates the row
/// rather than deleting it; re-enrolling afterwards creates a fresh row with
/// a new `id`, so enrollment IDs are never reused.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Enrollment {
    pub id: String,
    pub section_id: String,
    pub student_id: String,
    pub enrolled_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl Enrollment {
    /// Whether this enrollment is part of the current roster.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.removed_at.is_none()
    }
}

/// One candidate that did not result in an enrollment, and why.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SkippedCandidate {
    pub student_id: String,
    pub reason: SkipReason,
}

/// Outcome of one bulk-enroll invocation. Transient: returned to the caller,
/// never persisted. `enrolled` and `skipped` both follow input order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BulkEnrollResult {
    pub enrolled: Vec<String>,
    pub skipped: Vec<SkippedCandidate>,
    pub timestamp: DateTime<Utc>,
}

impl BulkEnrollResult {
    /// Total number of candidates accounted for (accepted + skipped).
    #[must_use]
    pub fn total(&self) -> usize {
        self.enrolled.len() + self.skipped.len()
    }
}
