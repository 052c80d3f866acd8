//! Audit log repository.
//!
//! Append-only entries recording every roster mutation. Entries are written
//! inside the mutating transaction (see `repos::enrollment`) and queried
//! here with dynamic filtering and stable pagination.

use roll_core::directory::StudentDirectory;
use roll_core::entities::AuditEntry;
use roll_core::enums::AuditAction;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum};
use crate::service::RollService;

/// Filter criteria for audit queries.
#[derive(Debug, Default)]
pub struct AuditFilter {
    pub section_id: Option<String>,
    pub student_id: Option<String>,
    pub action: Option<AuditAction>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

fn entry_from_row(row: &libsql::Row) -> Result<AuditEntry, DatabaseError> {
    Ok(AuditEntry {
        id: row.get::<String>(0)?,
        action: parse_enum(&row.get::<String>(1)?)?,
        performed_by: row.get::<String>(2)?,
        student_id: row.get::<String>(3)?,
        section_id: row.get::<String>(4)?,
        reason: get_opt_string(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl<D: StudentDirectory> RollService<D> {
    /// Append an audit entry. Called by every roster mutation.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn append_audit(&self, entry: &AuditEntry) -> Result<(), DatabaseError> {
        self.db()
            .conn()
            .execute(
                "INSERT INTO audit_log (id, action, performed_by, student_id, section_id, reason, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    entry.id.as_str(),
                    entry.action.as_str(),
                    entry.performed_by.as_str(),
                    entry.student_id.as_str(),
                    entry.section_id.as_str(),
                    entry.reason.as_deref(),
                    entry.created_at.to_rfc3339()
                ],
            )
            .await?;
        Ok(())
    }

    /// Query audit entries with optional filters.
    ///
    /// Entries come back oldest first, ordered by `(created_at, id)` so the
    /// sequence is stable under pagination even when several entries share a
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn query_audit(
        &self,
        filter: &AuditFilter,
    ) -> Result<Vec<AuditEntry>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref sid) = filter.section_id {
            params.push(libsql::Value::Text(sid.clone()));
            conditions.push(format!("section_id = ?{}", params.len()));
        }
        if let Some(ref stu) = filter.student_id {
            params.push(libsql::Value::Text(stu.clone()));
            conditions.push(format!("student_id = ?{}", params.len()));
        }
        if let Some(ref action) = filter.action {
            params.push(libsql::Value::Text(action.as_str().to_string()));
            conditions.push(format!("action = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit = filter.limit.unwrap_or(100);
        let offset = filter.offset.unwrap_or(0);
        let sql = format!(
            "SELECT id, action, performed_by, student_id, section_id, reason, created_at
             FROM audit_log {where_clause}
             ORDER BY created_at, id LIMIT {limit} OFFSET {offset}"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(entry_from_row(&row)?);
        }
        Ok(entries)
    }

    /// Chronological audit history for one section.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn section_audit(
        &self,
        section_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<AuditEntry>, DatabaseError> {
        self.query_audit(&AuditFilter {
            section_id: Some(section_id.to_string()),
            limit: Some(limit),
            offset: Some(offset),
            ..AuditFilter::default()
        })
        .await
    }
}
