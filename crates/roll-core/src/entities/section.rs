use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A section: the scope of one roster. Created and destroyed by external
/// course-management code; the reconciliation core reads its identity and
/// keeps `student_count` equal to the cardinality of the active roster.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub name: String,
    pub class_name: Option<String>,
    pub teacher_id: String,
    pub student_count: i64,
    pub created_at: DateTime<Utc>,
}
