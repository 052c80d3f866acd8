//! # roll-intake
//!
//! Enrollment input normalization for Rollcall.
//!
//! Two intake paths feed the reconciler:
//! - [`normalize_batch`]: free-text identifier lists (paste box or the
//!   decoded text of an uploaded file), split on newline/comma, trimmed,
//!   de-duplicated in first-seen order.
//! - [`parse_roster_csv`]: header-addressed roster uploads carrying
//!   `username`, `email`, `full_name` (or `name`), and optionally
//!   `department` columns, producing pre-validated directory records.
//!
//! The two paths deliberately report differently: the identifier path
//! surfaces `EmptyBatch` and leaves per-candidate accounting to the
//! reconciler, while the CSV path silently excludes malformed rows:
//! formatting noise in a spreadsheet export is not an actionable entity.

mod error;

pub use error::IntakeError;

use roll_core::entities::StudentRecord;

/// Normalize a raw identifier batch into distinct, ordered candidates.
///
/// Splits on newline and comma (either acts as a separator), trims each
/// candidate, drops empties, and de-duplicates preserving the order of first
/// occurrence. Folding duplicates here, before the reconciler sees the
/// batch, keeps skip-reason accounting at exactly one outcome per distinct
/// candidate.
///
/// # Errors
///
/// Returns [`IntakeError::EmptyBatch`] when zero candidates remain.
pub fn normalize_batch(raw: &str) -> Result<Vec<String>, IntakeError> {
    let mut seen: Vec<String> = Vec::new();
    for candidate in raw.split(['\n', ',']) {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            continue;
        }
        if !seen.iter().any(|s| s == candidate) {
            seen.push(candidate.to_string());
        }
    }
    if seen.is_empty() {
        return Err(IntakeError::EmptyBatch);
    }
    Ok(seen)
}

/// Parse a roster CSV with a header row into pre-validated student records.
///
/// Row 1 is a case-insensitive header; column positions are resolved by name,
/// with `full_name` and `name` accepted interchangeably. A data row yields a
/// record only when `username`, `email`, and `full_name` are all non-empty
/// after per-field trimming; rows failing that are excluded without a
/// per-row report. `department` is optional both as a column and per row.
///
/// # Errors
///
/// Returns [`IntakeError::MissingColumn`] when a required header column is
/// absent, and [`IntakeError::EmptyBatch`] when no data row survives.
pub fn parse_roster_csv(content: &str) -> Result<Vec<StudentRecord>, IntakeError> {
    let mut lines = content.lines();
    let header = lines.next().unwrap_or("");
    let columns: Vec<String> = header
        .split(',')
        .map(|c| c.trim().to_ascii_lowercase())
        .collect();

    let position = |names: &[&str]| columns.iter().position(|c| names.contains(&c.as_str()));

    let username_idx = position(&["username"]).ok_or(IntakeError::MissingColumn("username"))?;
    let email_idx = position(&["email"]).ok_or(IntakeError::MissingColumn("email"))?;
    let full_name_idx =
        position(&["full_name", "name"]).ok_or(IntakeError::MissingColumn("full_name"))?;
    let department_idx = position(&["department"]);

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let field = |idx: usize| fields.get(idx).copied().unwrap_or("");

        let username = field(username_idx);
        let email = field(email_idx);
        let full_name = field(full_name_idx);
        if username.is_empty() || email.is_empty() || full_name.is_empty() {
            dropped += 1;
            continue;
        }

        let department = department_idx
            .map(|idx| field(idx))
            .filter(|d| !d.is_empty())
            .map(ToString::to_string);

        records.push(StudentRecord {
            username: username.to_string(),
            email: email.to_string(),
            full_name: full_name.to_string(),
            department,
        });
    }

    if dropped > 0 {
        tracing::debug!(dropped, "excluded malformed roster rows");
    }
    if records.is_empty() {
        return Err(IntakeError::EmptyBatch);
    }
    Ok(records)
}
