//! # roll-db
//!
//! libSQL persistence for Rollcall: the roster store, audit log, attendance
//! ledger, and the directory tables backing them.
//!
//! `RollDb` is the raw database handle (open, migrate, generate IDs).
//! `RollService` layers the domain operations on top and is where the
//! reconciliation logic lives; see the `repos` modules.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

use error::DatabaseError;
use libsql::Builder;

/// Raw database handle for Rollcall state.
///
/// Wraps a libSQL database and connection, and provides prefixed ID
/// generation for rows minted by this system.
pub struct RollDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl RollDb {
    /// Open a local-only database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let roll_db = Self { db, conn };
        roll_db.run_migrations().await?;
        Ok(roll_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"enr-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> RollDb {
        RollDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "students",
            "sections",
            "enrollments",
            "audit_log",
            "attendance_records",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("enr").await.unwrap();
        assert!(id.starts_with("enr-"), "ID should start with 'enr-': {id}");
        assert_eq!(
            id.len(),
            12,
            "ID should be 12 chars (3 prefix + 1 dash + 8 hex): {id}"
        );

        let hex_part = &id[4..];
        assert!(
            hex_part.chars().all(|c| c.is_ascii_hexdigit()),
            "Random part should be hex: {hex_part}"
        );
    }

    #[tokio::test]
    async fn generate_id_all_prefixes() {
        let db = test_db().await;
        for prefix in roll_core::ids::ALL_PREFIXES {
            let id = db.generate_id(prefix).await.unwrap();
            assert!(id.starts_with(&format!("{prefix}-")));
        }
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("tst").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        // Run migrations again; should not fail
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn active_enrollment_index_rejects_duplicates() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO sections (id, name, teacher_id) VALUES ('sec-1', 'A', 't-1')",
                (),
            )
            .await
            .unwrap();
        db.conn()
            .execute(
                "INSERT INTO enrollments (id, section_id, student_id, enrolled_at)
                 VALUES ('enr-1', 'sec-1', 's1', '2026-01-01T00:00:00+00:00')",
                (),
            )
            .await
            .unwrap();

        // Second active row for the same (section, student) violates the partial index
        let dup = db
            .conn()
            .execute(
                "INSERT INTO enrollments (id, section_id, student_id, enrolled_at)
                 VALUES ('enr-2', 'sec-1', 's1', '2026-01-01T00:00:01+00:00')",
                (),
            )
            .await;
        assert!(dup.is_err(), "duplicate active enrollment should be rejected");

        // A removed row does not block a fresh enrollment
        db.conn()
            .execute(
                "UPDATE enrollments SET removed_at = '2026-01-02T00:00:00+00:00' WHERE id = 'enr-1'",
                (),
            )
            .await
            .unwrap();
        db.conn()
            .execute(
                "INSERT INTO enrollments (id, section_id, student_id, enrolled_at)
                 VALUES ('enr-3', 'sec-1', 's1', '2026-01-03T00:00:00+00:00')",
                (),
            )
            .await
            .unwrap();
    }
}
