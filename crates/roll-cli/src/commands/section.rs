//! Section administration commands.

use anyhow::Context;

use roll_db::repos::student::DbStudentDirectory;
use roll_db::service::RollService;

use crate::cli::{OutputFormat, SectionCommand};
use crate::output;

pub async fn handle(
    svc: &RollService<DbStudentDirectory>,
    command: &SectionCommand,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        SectionCommand::Create {
            name,
            class_name,
            teacher_id,
        } => {
            let section = svc
                .create_section(name, class_name.as_deref(), teacher_id)
                .await
                .context("failed to create section")?;
            output::output(&section, format)
        }
        SectionCommand::List => {
            let sections = svc
                .list_sections(500)
                .await
                .context("failed to list sections")?;
            output::output(&sections, format)
        }
        SectionCommand::Show { section_id } => {
            let section = svc
                .get_section(section_id)
                .await
                .with_context(|| format!("section '{section_id}' not found"))?;
            output::output(&section, format)
        }
    }
}
