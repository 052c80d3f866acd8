//! Audit history command.

use anyhow::Context;

use roll_db::repos::student::DbStudentDirectory;
use roll_db::service::RollService;

use crate::cli::OutputFormat;
use crate::output;

pub async fn handle(
    svc: &RollService<DbStudentDirectory>,
    section_id: &str,
    limit: u32,
    offset: u32,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let entries = svc
        .section_audit(section_id, limit, offset)
        .await
        .context("failed to load audit history")?;
    output::output(&entries, format)
}
