use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AttendanceStatus;

/// One student's attendance status for one section on one calendar day.
///
/// At most one record exists per `(section_id, date, student_id)`; re-marking
/// the same day overwrites the prior status. Records are independent of the
/// roster; removing a student later does not alter their attendance history.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub section_id: String,
    pub date: NaiveDate,
    pub student_id: String,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
    pub marked_at: DateTime<Utc>,
}

/// One entry in a `mark_attendance` submission.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AttendanceMark {
    pub student_id: String,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

/// Aggregate attendance statistics for a section or a single student.
///
/// `percentage = round(present / total * 100)`, defined as `0` when
/// `total == 0`. The zero policy is load-bearing for comparability with
/// historical reports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AttendanceStats {
    pub total: i64,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub percentage: i64,
}

impl AttendanceStats {
    /// Derive stats from raw counts, applying the zero-total policy.
    #[must_use]
    pub fn from_counts(total: i64, present: i64, absent: i64, late: i64) -> Self {
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
        let percentage = if total == 0 {
            0
        } else {
            (present as f64 / total as f64 * 100.0).round() as i64
        };
        Self {
            total,
            present,
            absent,
            late,
            percentage,
        }
    }
}
