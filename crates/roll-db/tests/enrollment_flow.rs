//! Enrollment reconciliation integration tests.
//!
//! Covers:
//! - Bulk enroll: partial success, skip accounting, input ordering
//! - Single enroll: whole-call failures
//! - Removal: deactivation, double-removal rejection, re-enrollment
//! - Audit log: ordering stable under pagination
//! - Manual-entry record flow and the DB-backed directory

use pretty_assertions::assert_eq;

use roll_core::directory::{StaticDirectory, StudentDirectory};
use roll_core::entities::StudentRecord;
use roll_core::enums::{AuditAction, SkipReason};
use roll_db::RollDb;
use roll_db::error::RosterError;
use roll_db::repos::audit::AuditFilter;
use roll_db::service::RollService;

fn record(username: &str) -> StudentRecord {
    StudentRecord {
        username: username.to_string(),
        email: format!("{username}@example.edu"),
        full_name: format!("Student {username}"),
        department: Some("Mathematics".to_string()),
    }
}

/// In-memory service whose directory knows s1..s5.
async fn test_service() -> RollService<StaticDirectory> {
    let db = RollDb::open_local(":memory:").await.unwrap();
    let directory = StaticDirectory::new(["s1", "s2", "s3", "s4", "s5"].map(record));
    RollService::with_directory(db, directory)
}

async fn test_section(svc: &RollService<StaticDirectory>) -> String {
    svc.create_section("CS 101 Section A", Some("Intro CS"), "t-1")
        .await
        .unwrap()
        .id
}

fn batch(ids: &[&str]) -> Vec<String> {
    ids.iter().map(ToString::to_string).collect()
}

// ---------------------------------------------------------------------------
// Bulk enrollment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bulk_enroll_partial_success() {
    let svc = test_service().await;
    let section = test_section(&svc).await;

    svc.enroll_student(&section, "s2", "admin").await.unwrap();

    let result = svc
        .bulk_enroll(&section, &batch(&["s1", "s2", "s3"]), "admin")
        .await
        .unwrap();
    assert_eq!(result.enrolled, vec!["s1", "s3"]);
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].student_id, "s2");
    assert_eq!(result.skipped[0].reason, SkipReason::AlreadyEnrolled);
    assert_eq!(result.total(), 3);
}

#[tokio::test]
async fn bulk_enroll_unknown_candidate_is_skipped_not_fatal() {
    let svc = test_service().await;
    let section = test_section(&svc).await;

    let result = svc
        .bulk_enroll(&section, &batch(&["s1", "ghost", "s2"]), "admin")
        .await
        .unwrap();
    assert_eq!(result.enrolled, vec!["s1", "s2"]);
    assert_eq!(result.skipped[0].student_id, "ghost");
    assert_eq!(result.skipped[0].reason, SkipReason::NotFound);
}

#[tokio::test]
async fn bulk_enroll_preserves_input_order() {
    let svc = test_service().await;
    let section = test_section(&svc).await;

    let result = svc
        .bulk_enroll(&section, &batch(&["s3", "s1", "s2"]), "admin")
        .await
        .unwrap();
    assert_eq!(result.enrolled, vec!["s3", "s1", "s2"]);

    let roster = svc.roster(&section).await.unwrap();
    let students: Vec<&str> = roster.iter().map(|e| e.student_id.as_str()).collect();
    assert_eq!(students, vec!["s3", "s1", "s2"]);
}

#[tokio::test]
async fn bulk_enroll_into_missing_section_fails_whole_call() {
    let svc = test_service().await;
    let err = svc
        .bulk_enroll("sec-missing", &batch(&["s1"]), "admin")
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::SectionNotFound(_)));
}

// ---------------------------------------------------------------------------
// Single enrollment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn enroll_student_rejects_duplicate() {
    let svc = test_service().await;
    let section = test_section(&svc).await;

    svc.enroll_student(&section, "s1", "admin").await.unwrap();
    let err = svc.enroll_student(&section, "s1", "admin").await.unwrap_err();
    assert!(matches!(err, RosterError::AlreadyEnrolled { .. }));
}

#[tokio::test]
async fn enroll_student_rejects_unknown() {
    let svc = test_service().await;
    let section = test_section(&svc).await;

    let err = svc
        .enroll_student(&section, "ghost", "admin")
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::UnknownStudent(_)));
}

#[tokio::test]
async fn enrollment_updates_section_count() {
    let svc = test_service().await;
    let section = test_section(&svc).await;

    svc.bulk_enroll(&section, &batch(&["s1", "s2"]), "admin")
        .await
        .unwrap();
    assert_eq!(svc.student_count(&section).await.unwrap(), 2);
    assert_eq!(svc.get_section(&section).await.unwrap().student_count, 2);

    svc.remove_student(&section, "s1", "admin", None)
        .await
        .unwrap();
    assert_eq!(svc.get_section(&section).await.unwrap().student_count, 1);
}

// ---------------------------------------------------------------------------
// Removal & re-enrollment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remove_student_deactivates_but_keeps_row() {
    let svc = test_service().await;
    let section = test_section(&svc).await;

    let enrollment = svc.enroll_student(&section, "s1", "admin").await.unwrap();
    let removed = svc
        .remove_student(&section, "s1", "admin", Some("transferred out"))
        .await
        .unwrap();
    assert_eq!(removed.id, enrollment.id);
    assert!(removed.removed_at.is_some());
    assert!(!removed.is_active());

    // The row persists for audit even though the roster no longer shows it
    assert!(svc.roster(&section).await.unwrap().is_empty());
    let mut rows = svc
        .db()
        .conn()
        .query(
            "SELECT COUNT(*) FROM enrollments WHERE section_id = ?1",
            [section.as_str()],
        )
        .await
        .unwrap();
    let row = rows.next().await.unwrap().unwrap();
    assert_eq!(row.get::<i64>(0).unwrap(), 1);
}

#[tokio::test]
async fn double_removal_is_an_error() {
    let svc = test_service().await;
    let section = test_section(&svc).await;

    svc.enroll_student(&section, "s1", "admin").await.unwrap();
    svc.remove_student(&section, "s1", "admin", None)
        .await
        .unwrap();
    let err = svc
        .remove_student(&section, "s1", "admin", None)
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::NotEnrolled { .. }));
}

#[tokio::test]
async fn re_enrollment_after_removal_gets_fresh_id() {
    let svc = test_service().await;
    let section = test_section(&svc).await;

    let first = svc.enroll_student(&section, "s1", "admin").await.unwrap();
    svc.remove_student(&section, "s1", "admin", None)
        .await
        .unwrap();

    let result = svc
        .bulk_enroll(&section, &batch(&["s1"]), "admin")
        .await
        .unwrap();
    assert_eq!(result.enrolled, vec!["s1"]);

    let roster = svc.roster(&section).await.unwrap();
    assert_eq!(roster.len(), 1);
    assert_ne!(roster[0].id, first.id, "enrollment IDs are never reused");
}

// ---------------------------------------------------------------------------
// Audit log
// ---------------------------------------------------------------------------

#[tokio::test]
async fn audit_records_chronological_history() {
    let svc = test_service().await;
    let section = test_section(&svc).await;

    svc.enroll_student(&section, "s1", "admin").await.unwrap();
    svc.enroll_student(&section, "s2", "admin").await.unwrap();
    svc.remove_student(&section, "s1", "teacher-1", Some("dropped"))
        .await
        .unwrap();

    let entries = svc.section_audit(&section, 100, 0).await.unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].student_id, "s1");
    assert_eq!(entries[0].action, AuditAction::Enrolled);
    assert_eq!(entries[1].student_id, "s2");
    assert_eq!(entries[1].action, AuditAction::Enrolled);
    assert_eq!(entries[2].student_id, "s1");
    assert_eq!(entries[2].action, AuditAction::Removed);
    assert_eq!(entries[2].performed_by, "teacher-1");
    assert_eq!(entries[2].reason.as_deref(), Some("dropped"));
}

#[tokio::test]
async fn audit_ordering_stable_under_pagination() {
    let svc = test_service().await;
    let section = test_section(&svc).await;

    svc.bulk_enroll(&section, &batch(&["s1", "s2", "s3", "s4", "s5"]), "admin")
        .await
        .unwrap();

    let all = svc.section_audit(&section, 100, 0).await.unwrap();
    let mut paged = Vec::new();
    for offset in (0..5).step_by(2) {
        paged.extend(svc.section_audit(&section, 2, offset).await.unwrap());
    }
    assert_eq!(paged, all);

    let students: Vec<&str> = all.iter().map(|e| e.student_id.as_str()).collect();
    assert_eq!(students, vec!["s1", "s2", "s3", "s4", "s5"]);
}

#[tokio::test]
async fn audit_filter_by_action_and_student() {
    let svc = test_service().await;
    let section = test_section(&svc).await;

    svc.bulk_enroll(&section, &batch(&["s1", "s2"]), "admin")
        .await
        .unwrap();
    svc.remove_student(&section, "s1", "admin", None)
        .await
        .unwrap();

    let removed = svc
        .query_audit(&AuditFilter {
            section_id: Some(section.clone()),
            action: Some(AuditAction::Removed),
            ..AuditFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].student_id, "s1");

    let s1_history = svc
        .query_audit(&AuditFilter {
            section_id: Some(section),
            student_id: Some("s1".to_string()),
            ..AuditFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(s1_history.len(), 2);
}

#[tokio::test]
async fn append_audit_accepts_externally_built_entries() {
    use chrono::Utc;
    use roll_core::entities::AuditEntry;

    let svc = test_service().await;
    let section = test_section(&svc).await;

    svc.append_audit(&AuditEntry {
        id: "aud-backfill".to_string(),
        action: AuditAction::Enrolled,
        performed_by: "importer".to_string(),
        student_id: "s1".to_string(),
        section_id: section.clone(),
        reason: Some("migrated from legacy roster".to_string()),
        created_at: Utc::now(),
    })
    .await
    .unwrap();

    let entries = svc.section_audit(&section, 10, 0).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].performed_by, "importer");
}

#[tokio::test]
async fn skipped_candidates_leave_no_audit_entries() {
    let svc = test_service().await;
    let section = test_section(&svc).await;

    svc.enroll_student(&section, "s1", "admin").await.unwrap();
    svc.bulk_enroll(&section, &batch(&["s1", "ghost"]), "admin")
        .await
        .unwrap();

    // Only the original single enrollment is on record
    let entries = svc.section_audit(&section, 100, 0).await.unwrap();
    assert_eq!(entries.len(), 1);
}

// ---------------------------------------------------------------------------
// Manual-entry records & DB-backed directory
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bulk_enroll_records_upserts_directory_and_enrolls() {
    let svc = test_service().await;
    let section = test_section(&svc).await;

    let records = vec![record("newcomer"), record("s1")];
    let result = svc
        .bulk_enroll_records(&section, &records, "admin")
        .await
        .unwrap();
    assert_eq!(result.enrolled, vec!["newcomer", "s1"]);
    assert!(result.skipped.is_empty());

    // The record landed in the students table
    let stored = svc.get_student("newcomer").await.unwrap().unwrap();
    assert_eq!(stored.email, "newcomer@example.edu");

    // Re-submitting the same rows skips everyone as already enrolled
    let again = svc
        .bulk_enroll_records(&section, &records, "admin")
        .await
        .unwrap();
    assert!(again.enrolled.is_empty());
    assert_eq!(again.skipped.len(), 2);
    assert!(
        again
            .skipped
            .iter()
            .all(|s| s.reason == SkipReason::AlreadyEnrolled)
    );
}

#[tokio::test]
async fn roster_survives_reopen_of_file_backed_db() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("rollcall.db");
    let path = path.to_str().unwrap();

    let section = {
        let svc = RollService::new_local(path).await.unwrap();
        let section = svc
            .create_section("Night class", None, "t-9")
            .await
            .unwrap()
            .id;
        svc.upsert_student(&record("jdoe")).await.unwrap();
        svc.enroll_student(&section, "jdoe", "admin").await.unwrap();
        section
    };

    let svc = RollService::new_local(path).await.unwrap();
    let roster = svc.roster(&section).await.unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].student_id, "jdoe");
    assert_eq!(svc.section_audit(&section, 10, 0).await.unwrap().len(), 1);
}

#[tokio::test]
async fn db_backed_directory_resolves_students_table() {
    let svc = RollService::new_local(":memory:").await.unwrap();
    let section = svc
        .create_section("Bio 201", None, "t-2")
        .await
        .unwrap()
        .id;

    svc.upsert_student(&record("jdoe")).await.unwrap();
    assert!(svc.directory().resolve("jdoe").await.unwrap().is_some());
    assert!(svc.directory().resolve("ghost").await.unwrap().is_none());

    let result = svc
        .bulk_enroll(&section, &batch(&["jdoe", "ghost"]), "admin")
        .await
        .unwrap();
    assert_eq!(result.enrolled, vec!["jdoe"]);
    assert_eq!(result.skipped[0].reason, SkipReason::NotFound);

    // roster_students joins the mirrored directory rows
    let students = svc.roster_students(&section).await.unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].username, "jdoe");
    assert_eq!(students[0].full_name, "Student jdoe");
}
