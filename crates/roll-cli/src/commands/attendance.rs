//! Attendance commands: mark a day, show a day, show statistics.

use anyhow::Context;
use chrono::NaiveDate;

use roll_core::entities::AttendanceMark;
use roll_core::enums::AttendanceStatus;
use roll_db::repos::student::DbStudentDirectory;
use roll_db::service::RollService;

use crate::cli::{AttendanceCommand, OutputFormat};
use crate::output;

pub async fn handle(
    svc: &RollService<DbStudentDirectory>,
    command: &AttendanceCommand,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        AttendanceCommand::Mark {
            section_id,
            date,
            marks,
        } => {
            let date = parse_day(date)?;
            let marks = marks
                .iter()
                .map(|m| parse_mark(m))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let records = svc
                .mark_attendance(section_id, date, &marks)
                .await
                .context("failed to mark attendance")?;
            output::output(&records, format)
        }
        AttendanceCommand::Show { section_id, date } => {
            let date = parse_day(date)?;
            let records = svc
                .attendance_for_date(section_id, date)
                .await
                .context("failed to load attendance")?;
            output::output(&records, format)
        }
        AttendanceCommand::Stats {
            section_id,
            student,
        } => {
            let stats = svc
                .attendance_stats(section_id, student.as_deref())
                .await
                .context("failed to compute attendance stats")?;
            output::output(&stats, format)
        }
    }
}

fn parse_day(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

/// Parse one `student=status` pair. A bare `student` defaults to present,
/// the convention for unmarked students.
fn parse_mark(raw: &str) -> anyhow::Result<AttendanceMark> {
    let (student, status) = match raw.split_once('=') {
        Some((student, status)) => (student, parse_status(status)?),
        None => (raw, AttendanceStatus::Present),
    };
    if student.trim().is_empty() {
        anyhow::bail!("empty student identifier in mark '{raw}'");
    }
    Ok(AttendanceMark {
        student_id: student.trim().to_string(),
        status,
        notes: None,
    })
}

fn parse_status(s: &str) -> anyhow::Result<AttendanceStatus> {
    match s.trim().to_ascii_lowercase().as_str() {
        "present" => Ok(AttendanceStatus::Present),
        "absent" => Ok(AttendanceStatus::Absent),
        "late" => Ok(AttendanceStatus::Late),
        "excused" => Ok(AttendanceStatus::Excused),
        other => anyhow::bail!("unknown attendance status '{other}'"),
    }
}
