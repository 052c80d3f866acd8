//! Action, status, and skip-reason enums for Rollcall.
//!
//! `AuditAction` and `AttendanceStatus` use `snake_case` serialization via
//! `#[serde(rename_all = "snake_case")]`; their values travel as `"enrolled"`,
//! `"present"`, etc. `SkipReason` keeps its PascalCase variant names on the
//! wire (`"AlreadyEnrolled"`, `"NotFound"`) for compatibility with existing
//! report consumers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Roster-mutating action recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Enrolled,
    Removed,
}

impl AuditAction {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enrolled => "enrolled",
            Self::Removed => "removed",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AttendanceStatus
// ---------------------------------------------------------------------------

/// One student's attendance status for one class day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Late => "late",
            Self::Excused => "excused",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SkipReason
// ---------------------------------------------------------------------------

/// Why one candidate in a bulk-enroll batch did not result in an enrollment.
///
/// Per-candidate failures are recovered into a skip record rather than
/// aborting the batch, so a bulk result enumerates exactly one outcome per
/// distinct candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum SkipReason {
    /// An active enrollment already exists for this student in this section.
    AlreadyEnrolled,
    /// The candidate does not resolve to a real student in the directory.
    NotFound,
}

impl SkipReason {
    /// Return the string representation used on the wire and in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyEnrolled => "AlreadyEnrolled",
            Self::NotFound => "NotFound",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
