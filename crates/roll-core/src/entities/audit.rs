use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AuditAction;

/// An append-only audit log entry recording one roster mutation.
///
/// Entries are never mutated or deleted, and are ordered by `created_at`
/// (ties broken by `id` assignment order at append time).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditEntry {
    pub id: String,
    pub action: AuditAction,
    pub performed_by: String,
    pub student_id: String,
    pub section_id: String,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}
