//! Roster display command.

use anyhow::Context;

use roll_db::repos::student::DbStudentDirectory;
use roll_db::service::RollService;

use crate::cli::OutputFormat;
use crate::output;

pub async fn handle(
    svc: &RollService<DbStudentDirectory>,
    section_id: &str,
    students: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if students {
        let records = svc
            .roster_students(section_id)
            .await
            .context("failed to load roster")?;
        output::output(&records, format)
    } else {
        let enrollments = svc
            .roster(section_id)
            .await
            .context("failed to load roster")?;
        output::output(&enrollments, format)
    }
}
