//! The student-directory seam.
//!
//! The institution's student directory is an external collaborator: the
//! reconciler only needs to resolve a candidate identifier to a directory
//! record (or establish that none exists). `roll-db` provides a DB-backed
//! implementation; tests use an in-memory map.

use std::collections::HashMap;

use crate::entities::StudentRecord;
use crate::errors::CoreError;

/// Read-only lookup of students by institutional username.
pub trait StudentDirectory: Send + Sync {
    /// Resolve a candidate identifier to a directory record.
    ///
    /// Returns `Ok(None)` when the identifier does not belong to any student.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` when the directory itself cannot be reached; that
    /// failure surfaces verbatim to the caller and is never retried here.
    fn resolve(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<StudentRecord>, CoreError>> + Send;
}

/// In-memory directory over a fixed set of records. Used by tests and by
/// callers that already hold pre-validated records.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    records: HashMap<String, StudentRecord>,
}

impl StaticDirectory {
    #[must_use]
    pub fn new(records: impl IntoIterator<Item = StudentRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|r| (r.username.clone(), r))
                .collect(),
        }
    }

    pub fn insert(&mut self, record: StudentRecord) {
        self.records.insert(record.username.clone(), record);
    }
}

impl StudentDirectory for StaticDirectory {
    async fn resolve(&self, username: &str) -> Result<Option<StudentRecord>, CoreError> {
        Ok(self.records.get(username).cloned())
    }
}
