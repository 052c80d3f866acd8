//! Service layer orchestrating roster mutations.
//!
//! `RollService` wraps `RollDb` (raw database access) and an injected
//! `StudentDirectory` (candidate validation). All repo methods are
//! implemented as `impl RollService` blocks in the `repos` modules.
//!
//! Every roster mutation follows this protocol:
//! 1. Validate the candidate (active-enrollment check, directory lookup)
//! 2. Execute the SQL mutation and append the audit entry in one transaction
//! 3. Return the authoritative post-mutation state

use roll_core::directory::StudentDirectory;

use crate::RollDb;
use crate::error::DatabaseError;
use crate::repos::student::DbStudentDirectory;

/// Orchestrates roster, audit, and attendance operations over one database.
pub struct RollService<D: StudentDirectory> {
    db: RollDb,
    directory: D,
}

impl RollService<DbStudentDirectory> {
    /// Open a local database and wire the directory to its `students` table.
    ///
    /// This is the production constructor: the institution's directory is
    /// mirrored into the same database by the admin import flows.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = RollDb::open_local(db_path).await?;
        let directory = DbStudentDirectory::new(db.conn().clone());
        Ok(Self { db, directory })
    }
}

impl<D: StudentDirectory> RollService<D> {
    /// Create a service from an existing database and an explicit directory
    /// implementation (tests inject an in-memory directory here).
    #[must_use]
    pub const fn with_directory(db: RollDb, directory: D) -> Self {
        Self { db, directory }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &RollDb {
        &self.db
    }

    /// Access the injected student directory.
    #[must_use]
    pub const fn directory(&self) -> &D {
        &self.directory
    }
}
