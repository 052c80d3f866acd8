//! Entity structs for the Rollcall roster domain.
//!
//! Each persisted entity maps to a table in the libSQL database. All structs
//! derive `Serialize`, `Deserialize`, and `JsonSchema`; field names are the
//! wire names consumed by the presentation layer (`performed_by`, `enrolled`,
//! `skipped[].reason`, …) and must not change.

mod attendance;
mod audit;
mod enrollment;
mod section;
mod student;

pub use attendance::{AttendanceMark, AttendanceRecord, AttendanceStats};
pub use audit::AuditEntry;
pub use enrollment::{BulkEnrollResult, Enrollment, SkippedCandidate};
pub use section::Section;
pub use student::StudentRecord;
