//! Enrollment reconciler.
//!
//! Turns a batch of normalized candidates into roster mutations. Each
//! candidate is reconciled independently: one failure becomes a skip record
//! and never aborts the rest of the batch. Single-item operations fail the
//! whole call instead.
//!
//! The "check active enrollment, then insert" step for one
//! `(section, student)` pair runs inside one transaction, and the partial
//! UNIQUE index on active rows backs the invariant at the schema level: a
//! constraint violation surfaces as `AlreadyEnrolled`, never as a second
//! active row.

use chrono::Utc;

use roll_core::directory::StudentDirectory;
use roll_core::entities::{BulkEnrollResult, Enrollment, SkippedCandidate, StudentRecord};
use roll_core::enums::{AuditAction, SkipReason};
use roll_core::ids::{PREFIX_AUDIT, PREFIX_ENROLLMENT};

use crate::error::{DatabaseError, RosterError, is_unique_violation};
use crate::repos::roster::enrollment_from_row;
use crate::service::RollService;

impl<D: StudentDirectory> RollService<D> {
    /// Enroll a batch of candidates into a section.
    ///
    /// `candidates` is expected to be the output of intake normalization:
    /// trimmed, non-empty, distinct, in first-seen order. For each candidate,
    /// in order: skip with `AlreadyEnrolled` if an active enrollment exists,
    /// skip with `NotFound` if the directory cannot resolve it, otherwise
    /// commit the enrollment and its `enrolled` audit entry. Audit entries
    /// land in input order, so identical submissions produce identical audit
    /// sequences.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::SectionNotFound` if the section does not exist,
    /// or a storage/directory error. Per-candidate outcomes never error.
    pub async fn bulk_enroll(
        &self,
        section_id: &str,
        candidates: &[String],
        actor: &str,
    ) -> Result<BulkEnrollResult, RosterError> {
        if !self.section_exists(section_id).await? {
            return Err(RosterError::SectionNotFound(section_id.to_string()));
        }

        let mut enrolled = Vec::new();
        let mut skipped = Vec::new();
        for candidate in candidates {
            if self.is_enrolled(section_id, candidate).await? {
                skipped.push(SkippedCandidate {
                    student_id: candidate.clone(),
                    reason: SkipReason::AlreadyEnrolled,
                });
                continue;
            }
            if self.directory().resolve(candidate).await?.is_none() {
                skipped.push(SkippedCandidate {
                    student_id: candidate.clone(),
                    reason: SkipReason::NotFound,
                });
                continue;
            }
            match self.commit_enrollment(section_id, candidate, actor).await {
                Ok(_) => enrolled.push(candidate.clone()),
                // Lost the race between check and insert, same outcome as
                // finding the active row up front.
                Err(RosterError::AlreadyEnrolled { .. }) => skipped.push(SkippedCandidate {
                    student_id: candidate.clone(),
                    reason: SkipReason::AlreadyEnrolled,
                }),
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            section_id,
            enrolled = enrolled.len(),
            skipped = skipped.len(),
            "bulk enrollment reconciled"
        );
        Ok(BulkEnrollResult {
            enrolled,
            skipped,
            timestamp: Utc::now(),
        })
    }

    /// Enroll pre-validated roster records (manual-entry upload flow).
    ///
    /// Each record is upserted into the directory store first (the record is
    /// self-describing, so directory lookup cannot produce `NotFound` here)
    /// and then enrolled through the same per-candidate logic.
    /// `AlreadyEnrolled` still applies.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::SectionNotFound` if the section does not exist,
    /// or a storage error.
    pub async fn bulk_enroll_records(
        &self,
        section_id: &str,
        records: &[StudentRecord],
        actor: &str,
    ) -> Result<BulkEnrollResult, RosterError> {
        if !self.section_exists(section_id).await? {
            return Err(RosterError::SectionNotFound(section_id.to_string()));
        }

        let mut enrolled = Vec::new();
        let mut skipped = Vec::new();
        for record in records {
            self.upsert_student(record).await?;
            if self.is_enrolled(section_id, &record.username).await? {
                skipped.push(SkippedCandidate {
                    student_id: record.username.clone(),
                    reason: SkipReason::AlreadyEnrolled,
                });
                continue;
            }
            match self
                .commit_enrollment(section_id, &record.username, actor)
                .await
            {
                Ok(_) => enrolled.push(record.username.clone()),
                Err(RosterError::AlreadyEnrolled { .. }) => skipped.push(SkippedCandidate {
                    student_id: record.username.clone(),
                    reason: SkipReason::AlreadyEnrolled,
                }),
                Err(e) => return Err(e),
            }
        }

        Ok(BulkEnrollResult {
            enrolled,
            skipped,
            timestamp: Utc::now(),
        })
    }

    /// Enroll one student.
    ///
    /// Unlike the bulk path there is no batch to partially succeed, so an
    /// already-enrolled or unknown student fails the whole call.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::AlreadyEnrolled`, `RosterError::UnknownStudent`,
    /// or `RosterError::SectionNotFound`.
    pub async fn enroll_student(
        &self,
        section_id: &str,
        student_id: &str,
        actor: &str,
    ) -> Result<Enrollment, RosterError> {
        if !self.section_exists(section_id).await? {
            return Err(RosterError::SectionNotFound(section_id.to_string()));
        }
        if self.is_enrolled(section_id, student_id).await? {
            return Err(RosterError::AlreadyEnrolled {
                section_id: section_id.to_string(),
                student_id: student_id.to_string(),
            });
        }
        if self.directory().resolve(student_id).await?.is_none() {
            return Err(RosterError::UnknownStudent(student_id.to_string()));
        }
        self.commit_enrollment(section_id, student_id, actor).await
    }

    /// Remove a student from a section's roster.
    ///
    /// Deactivates the enrollment row (it persists for audit purposes) and
    /// appends a `removed` audit entry carrying the optional reason.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::NotEnrolled` when no active enrollment exists,
    /// including when the student was already removed.
    pub async fn remove_student(
        &self,
        section_id: &str,
        student_id: &str,
        actor: &str,
        reason: Option<&str>,
    ) -> Result<Enrollment, RosterError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, section_id, student_id, enrolled_at, removed_at
                 FROM enrollments
                 WHERE section_id = ?1 AND student_id = ?2 AND removed_at IS NULL",
                [section_id, student_id],
            )
            .await
            .map_err(DatabaseError::from)?;
        let Some(row) = rows.next().await.map_err(DatabaseError::from)? else {
            return Err(RosterError::NotEnrolled {
                section_id: section_id.to_string(),
                student_id: student_id.to_string(),
            });
        };
        let current = enrollment_from_row(&row)?;
        drop(rows);

        let now = Utc::now();
        let audit_id = self.db().generate_id(PREFIX_AUDIT).await?;
        let tx = self
            .db()
            .conn()
            .transaction()
            .await
            .map_err(DatabaseError::from)?;
        tx.execute(
            "UPDATE enrollments SET removed_at = ?1 WHERE id = ?2 AND removed_at IS NULL",
            libsql::params![now.to_rfc3339(), current.id.as_str()],
        )
        .await
        .map_err(DatabaseError::from)?;
        tx.execute(
            "INSERT INTO audit_log (id, action, performed_by, student_id, section_id, reason, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            libsql::params![
                audit_id.as_str(),
                AuditAction::Removed.as_str(),
                actor,
                student_id,
                section_id,
                reason,
                now.to_rfc3339()
            ],
        )
        .await
        .map_err(DatabaseError::from)?;
        tx.commit().await.map_err(DatabaseError::from)?;

        tracing::info!(section_id, student_id, actor, "student removed from roster");
        Ok(Enrollment {
            removed_at: Some(now),
            ..current
        })
    }

    /// Commit one accepted candidate: new enrollment row plus its `enrolled`
    /// audit entry, in one transaction.
    async fn commit_enrollment(
        &self,
        section_id: &str,
        student_id: &str,
        actor: &str,
    ) -> Result<Enrollment, RosterError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_ENROLLMENT).await?;
        let audit_id = self.db().generate_id(PREFIX_AUDIT).await?;

        let tx = self
            .db()
            .conn()
            .transaction()
            .await
            .map_err(DatabaseError::from)?;
        let insert = tx
            .execute(
                "INSERT INTO enrollments (id, section_id, student_id, enrolled_at)
                 VALUES (?1, ?2, ?3, ?4)",
                libsql::params![id.as_str(), section_id, student_id, now.to_rfc3339()],
            )
            .await;
        if let Err(e) = insert {
            if is_unique_violation(&e) {
                return Err(RosterError::AlreadyEnrolled {
                    section_id: section_id.to_string(),
                    student_id: student_id.to_string(),
                });
            }
            return Err(DatabaseError::from(e).into());
        }
        tx.execute(
            "INSERT INTO audit_log (id, action, performed_by, student_id, section_id, reason, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, NULL, ?6)",
            libsql::params![
                audit_id.as_str(),
                AuditAction::Enrolled.as_str(),
                actor,
                student_id,
                section_id,
                now.to_rfc3339()
            ],
        )
        .await
        .map_err(DatabaseError::from)?;
        tx.commit().await.map_err(DatabaseError::from)?;

        tracing::debug!(section_id, student_id, enrollment_id = %id, "enrollment committed");
        Ok(Enrollment {
            id,
            section_id: section_id.to_string(),
            student_id: student_id.to_string(),
            enrolled_at: now,
            removed_at: None,
        })
    }
}
