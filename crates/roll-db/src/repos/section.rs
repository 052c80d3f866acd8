//! Section directory repository.
//!
//! Sections are created and destroyed by course-management flows; the
//! reconciliation core reads their identity and derives `student_count`
//! from the active roster.

use chrono::Utc;

use roll_core::directory::StudentDirectory;
use roll_core::entities::Section;
use roll_core::ids::PREFIX_SECTION;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::service::RollService;

const SECTION_COLUMNS: &str = "s.id, s.name, s.class_name, s.teacher_id, s.created_at,
     (SELECT COUNT(*) FROM enrollments e
      WHERE e.section_id = s.id AND e.removed_at IS NULL) AS student_count";

fn section_from_row(row: &libsql::Row) -> Result<Section, DatabaseError> {
    Ok(Section {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        class_name: get_opt_string(row, 2)?,
        teacher_id: row.get::<String>(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        student_count: row.get::<i64>(5)?,
    })
}

impl<D: StudentDirectory> RollService<D> {
    /// Create a section with an empty roster.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails.
    pub async fn create_section(
        &self,
        name: &str,
        class_name: Option<&str>,
        teacher_id: &str,
    ) -> Result<Section, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_SECTION).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO sections (id, name, class_name, teacher_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![id.as_str(), name, class_name, teacher_id, now.to_rfc3339()],
            )
            .await?;
        Ok(Section {
            id,
            name: name.to_string(),
            class_name: class_name.map(ToString::to_string),
            teacher_id: teacher_id.to_string(),
            student_count: 0,
            created_at: now,
        })
    }

    /// Fetch a section with its current roster cardinality.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the section does not exist.
    pub async fn get_section(&self, section_id: &str) -> Result<Section, DatabaseError> {
        let sql = format!("SELECT {SECTION_COLUMNS} FROM sections s WHERE s.id = ?1");
        let mut rows = self.db().conn().query(&sql, [section_id]).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        section_from_row(&row)
    }

    /// Whether a section exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn section_exists(&self, section_id: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT 1 FROM sections WHERE id = ?1", [section_id])
            .await?;
        Ok(rows.next().await?.is_some())
    }

    /// List sections ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_sections(&self, limit: u32) -> Result<Vec<Section>, DatabaseError> {
        let sql = format!(
            "SELECT {SECTION_COLUMNS} FROM sections s ORDER BY s.created_at, s.id LIMIT ?1"
        );
        let mut rows = self.db().conn().query(&sql, [i64::from(limit)]).await?;
        let mut sections = Vec::new();
        while let Some(row) = rows.next().await? {
            sections.push(section_from_row(&row)?);
        }
        Ok(sections)
    }
}
