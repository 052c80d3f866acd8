//! Roster store queries.
//!
//! The active roster of a section is the set of enrollment rows with
//! `removed_at IS NULL`. Mutation happens only through the enrollment
//! reconciler (`repos::enrollment`); this module is read-only.

use roll_core::directory::StudentDirectory;
use roll_core::entities::{Enrollment, StudentRecord};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_optional_datetime};
use crate::service::RollService;

pub(crate) fn enrollment_from_row(row: &libsql::Row) -> Result<Enrollment, DatabaseError> {
    Ok(Enrollment {
        id: row.get::<String>(0)?,
        section_id: row.get::<String>(1)?,
        student_id: row.get::<String>(2)?,
        enrolled_at: parse_datetime(&row.get::<String>(3)?)?,
        removed_at: parse_optional_datetime(get_opt_string(row, 4)?.as_deref())?,
    })
}

impl<D: StudentDirectory> RollService<D> {
    /// Active enrollments for a section, ordered by enrollment time.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn roster(&self, section_id: &str) -> Result<Vec<Enrollment>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, section_id, student_id, enrolled_at, removed_at
                 FROM enrollments
                 WHERE section_id = ?1 AND removed_at IS NULL
                 ORDER BY enrolled_at, id",
                [section_id],
            )
            .await?;
        let mut enrollments = Vec::new();
        while let Some(row) = rows.next().await? {
            enrollments.push(enrollment_from_row(&row)?);
        }
        Ok(enrollments)
    }

    /// Directory records for the active roster, for display.
    ///
    /// Students enrolled through a directory that is not mirrored into the
    /// `students` table are omitted here; `roster` is the authoritative list.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn roster_students(
        &self,
        section_id: &str,
    ) -> Result<Vec<StudentRecord>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT st.username, st.email, st.full_name, st.department
                 FROM enrollments e
                 JOIN students st ON st.username = e.student_id
                 WHERE e.section_id = ?1 AND e.removed_at IS NULL
                 ORDER BY e.enrolled_at, e.id",
                [section_id],
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

    /// Cardinality of the active roster.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn student_count(&self, section_id: &str) -> Result<i64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COUNT(*) FROM enrollments
                 WHERE section_id = ?1 AND removed_at IS NULL",
                [section_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }

    /// Whether an active enrollment exists for this (section, student) pair.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn is_enrolled(
        &self,
        section_id: &str,
        student_id: &str,
    ) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT 1 FROM enrollments
                 WHERE section_id = ?1 AND student_id = ?2 AND removed_at IS NULL",
                [section_id, student_id],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }
}
