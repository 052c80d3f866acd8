//! Attendance ledger repository.
//!
//! Per-section, per-day attendance records with derived statistics.
//! Marking a day is a full replace for the supplied students: each mark
//! upserts its `(section, date, student)` row. There is no delete operation;
//! correcting a mistake means resubmitting the day with corrected statuses.
//! Records are kept independent of the roster; removing a student later
//! never rewrites attendance history.

use chrono::{NaiveDate, Utc};

use roll_core::directory::StudentDirectory;
use roll_core::entities::{AttendanceMark, AttendanceRecord, AttendanceStats};

use crate::error::{DatabaseError, RosterError};
use crate::helpers::{get_opt_string, parse_date, parse_datetime, parse_enum};
use crate::service::RollService;

fn record_from_row(row: &libsql::Row) -> Result<AttendanceRecord, DatabaseError> {
    Ok(AttendanceRecord {
        section_id: row.get::<String>(0)?,
        date: parse_date(&row.get::<String>(1)?)?,
        student_id: row.get::<String>(2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        notes: get_opt_string(row, 4)?,
        marked_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl<D: StudentDirectory> RollService<D> {
    /// Record attendance for one section and day.
    ///
    /// Every supplied mark overwrites any existing record for its student on
    /// that day; students omitted from `marks` keep whatever predates the
    /// call. The calling UI submits one mark per currently-enrolled student,
    /// defaulting unmarked students to `present`.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::SectionNotFound` if the section does not exist,
    /// or a storage error. The whole submission is one transaction.
    pub async fn mark_attendance(
        &self,
        section_id: &str,
        date: NaiveDate,
        marks: &[AttendanceMark],
    ) -> Result<Vec<AttendanceRecord>, RosterError> {
        if !self.section_exists(section_id).await? {
            return Err(RosterError::SectionNotFound(section_id.to_string()));
        }

        let now = Utc::now();
        let day = date.format("%Y-%m-%d").to_string();
        let tx = self
            .db()
            .conn()
            .transaction()
            .await
            .map_err(DatabaseError::from)?;
        for mark in marks {
            tx.execute(
                "INSERT INTO attendance_records (section_id, date, student_id, status, notes, marked_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(section_id, date, student_id) DO UPDATE SET
                     status = excluded.status,
                     notes = excluded.notes,
                     marked_at = excluded.marked_at",
                libsql::params![
                    section_id,
                    day.as_str(),
                    mark.student_id.as_str(),
                    mark.status.as_str(),
                    mark.notes.as_deref(),
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(DatabaseError::from)?;
        }
        tx.commit().await.map_err(DatabaseError::from)?;

        tracing::debug!(section_id, %date, marks = marks.len(), "attendance recorded");
        Ok(marks
            .iter()
            .map(|mark| AttendanceRecord {
                section_id: section_id.to_string(),
                date,
                student_id: mark.student_id.clone(),
                status: mark.status,
                notes: mark.notes.clone(),
                marked_at: now,
            })
            .collect())
    }

    /// All records for one section and day, ordered by student.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn attendance_for_date(
        &self,
        section_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, DatabaseError> {
        let day = date.format("%Y-%m-%d").to_string();
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT section_id, date, student_id, status, notes, marked_at
                 FROM attendance_records
                 WHERE section_id = ?1 AND date = ?2
                 ORDER BY student_id",
                [section_id, day.as_str()],
            )
            .await?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(record_from_row(&row)?);
        }
        Ok(records)
    }

    /// Aggregate attendance statistics for a section, or for one student
    /// within it when `student_id` is given.
    ///
    /// `percentage = round(present / total * 100)`, `0` when no records
    /// exist. The zero policy matches historical reports and must not become
    /// an error or NaN.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn attendance_stats(
        &self,
        section_id: &str,
        student_id: Option<&str>,
    ) -> Result<AttendanceStats, DatabaseError> {
        let (sql, params) = match student_id {
            Some(student) => (
                "SELECT COUNT(*),
                        COALESCE(SUM(status = 'present'), 0),
                        COALESCE(SUM(status = 'absent'), 0),
                        COALESCE(SUM(status = 'late'), 0)
                 FROM attendance_records
                 WHERE section_id = ?1 AND student_id = ?2",
                vec![section_id.to_string(), student.to_string()],
            ),
            None => (
                "SELECT COUNT(*),
                        COALESCE(SUM(status = 'present'), 0),
                        COALESCE(SUM(status = 'absent'), 0),
                        COALESCE(SUM(status = 'late'), 0)
                 FROM attendance_records
                 WHERE section_id = ?1",
                vec![section_id.to_string()],
            ),
        };

        let mut rows = self
            .db()
            .conn()
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(AttendanceStats::from_counts(
            row.get::<i64>(0)?,
            row.get::<i64>(1)?,
            row.get::<i64>(2)?,
            row.get::<i64>(3)?,
        ))
    }
}
