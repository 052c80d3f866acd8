//! Student directory repository.
//!
//! The `students` table mirrors the institution's directory; admin import
//! flows upsert into it and `DbStudentDirectory` resolves candidates from it.

use roll_core::directory::StudentDirectory;
use roll_core::entities::StudentRecord;
use roll_core::errors::CoreError;

use crate::error::DatabaseError;
use crate::helpers::get_opt_string;
use crate::service::RollService;

/// `StudentDirectory` backed by the `students` table.
#[derive(Clone)]
pub struct DbStudentDirectory {
    conn: libsql::Connection,
}

impl DbStudentDirectory {
    #[must_use]
    pub const fn new(conn: libsql::Connection) -> Self {
        Self { conn }
    }
}

impl StudentDirectory for DbStudentDirectory {
    async fn resolve(&self, username: &str) -> Result<Option<StudentRecord>, CoreError> {
        let mut rows = self
            .conn
            .query(
                "SELECT username, email, full_name, department
                 FROM students WHERE username = ?1",
                [username],
            )
            .await
            .map_err(|e| CoreError::Transport(e.to_string()))?;

        let Some(row) = rows
            .next()
            .await
            .map_err(|e| CoreError::Transport(e.to_string()))?
        else {
            return Ok(None);
        };

        let record = StudentRecord {
            username: row
                .get::<String>(0)
                .map_err(|e| CoreError::Validation(e.to_string()))?,
            email: row
                .get::<String>(1)
                .map_err(|e| CoreError::Validation(e.to_string()))?,
            full_name: row
                .get::<String>(2)
                .map_err(|e| CoreError::Validation(e.to_string()))?,
            department: row
                .get::<Option<String>>(3)
                .map_err(|e| CoreError::Validation(e.to_string()))?,
        };
        Ok(Some(record))
    }
}

impl<D: StudentDirectory> RollService<D> {
    /// Insert or update one directory record, keyed by username.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the upsert fails.
    pub async fn upsert_student(&self, record: &StudentRecord) -> Result<(), DatabaseError> {
        self.db()
            .conn()
            .execute(
                "INSERT INTO students (username, email, full_name, department)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(username) DO UPDATE SET
                     email = excluded.email,
                     full_name = excluded.full_name,
                     department = excluded.department",
                libsql::params![
                    record.username.as_str(),
                    record.email.as_str(),
                    record.full_name.as_str(),
                    record.department.as_deref()
                ],
            )
            .await?;
        Ok(())
    }

    /// Fetch one directory record by username.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_student(
        &self,
        username: &str,
    ) -> Result<Option<StudentRecord>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT username, email, full_name, department
                 FROM students WHERE username = ?1",
                [username],
            )
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };
        Ok(Some(StudentRecord {
            username: row.get::<String>(0)?,
            email: row.get::<String>(1)?,
            full_name: row.get::<String>(2)?,
            department: get_opt_string(&row, 3)?,
        }))
    }

    /// List directory records, ordered by username.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_students(&self, limit: u32) -> Result<Vec<StudentRecord>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT username, email, full_name, department
                 FROM students ORDER BY username LIMIT ?1",
                [i64::from(limit)],
            )
            .await?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(StudentRecord {
                username: row.get::<String>(0)?,
                email: row.get::<String>(1)?,
                full_name: row.get::<String>(2)?,
                department: get_opt_string(&row, 3)?,
            });
        }
        Ok(records)
    }
}
