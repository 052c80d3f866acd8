//! Student directory administration commands.

use anyhow::Context;

use roll_core::entities::StudentRecord;
use roll_db::repos::student::DbStudentDirectory;
use roll_db::service::RollService;

use crate::cli::{OutputFormat, StudentCommand};
use crate::output;

pub async fn handle(
    svc: &RollService<DbStudentDirectory>,
    command: &StudentCommand,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        StudentCommand::Add {
            username,
            email,
            full_name,
            department,
        } => {
            let record = StudentRecord {
                username: username.clone(),
                email: email.clone(),
                full_name: full_name.clone(),
                department: department.clone(),
            };
            svc.upsert_student(&record)
                .await
                .context("failed to upsert student")?;
            output::output(&record, format)
        }
        StudentCommand::List => {
            let students = svc
                .list_students(1000)
                .await
                .context("failed to list students")?;
            output::output(&students, format)
        }
    }
}
