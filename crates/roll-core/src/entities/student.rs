use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A directory record for one student.
///
/// The institutional `username` is the identifier that appears in enrollment
/// batches and roster rows; the reconciler resolves candidates against it via
/// the `StudentDirectory` trait.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudentRecord {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub department: Option<String>,
}
