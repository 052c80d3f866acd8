//! Enrollment commands: single, bulk identifier batches, roster CSV upload,
//! and removal.

use anyhow::Context;

use roll_db::repos::student::DbStudentDirectory;
use roll_db::service::RollService;
use roll_intake::{normalize_batch, parse_roster_csv};

use crate::cli::OutputFormat;
use crate::output;

pub async fn single(
    svc: &RollService<DbStudentDirectory>,
    section_id: &str,
    student_id: &str,
    actor: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let enrollment = svc
        .enroll_student(section_id, student_id, actor)
        .await
        .with_context(|| format!("failed to enroll '{student_id}' into '{section_id}'"))?;
    output::output(&enrollment, format)
}

pub async fn bulk(
    svc: &RollService<DbStudentDirectory>,
    section_id: &str,
    ids: Option<&str>,
    file: Option<&str>,
    actor: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let raw = match (ids, file) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read '{path}'"))?,
        (None, None) => anyhow::bail!("provide --ids or --file"),
    };

    let candidates = normalize_batch(&raw).context("no valid records")?;
    let result = svc
        .bulk_enroll(section_id, &candidates, actor)
        .await
        .context("bulk enrollment failed")?;
    output::output(&result, format)
}

pub async fn upload(
    svc: &RollService<DbStudentDirectory>,
    section_id: &str,
    file: &str,
    actor: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let content =
        std::fs::read_to_string(file).with_context(|| format!("failed to read '{file}'"))?;
    let records = parse_roster_csv(&content).context("no valid records")?;
    let result = svc
        .bulk_enroll_records(section_id, &records, actor)
        .await
        .context("roster upload failed")?;
    output::output(&result, format)
}

pub async fn remove(
    svc: &RollService<DbStudentDirectory>,
    section_id: &str,
    student_id: &str,
    reason: Option<&str>,
    actor: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let enrollment = svc
        .remove_student(section_id, student_id, actor, reason)
        .await
        .with_context(|| format!("failed to remove '{student_id}' from '{section_id}'"))?;
    output::output(&enrollment, format)
}
