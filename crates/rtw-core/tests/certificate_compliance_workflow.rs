//! Certificate chase lifecycle driven through the public sync service: a case moves from
//! having no certificate, to an expiring one, to a renewed one, and the chase action follows.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use rtw_core::clinical::certificates::{
    ActionPriority, ActionStatus, CaseRef, CertificateComplianceEngine,
    CertificateComplianceSync, ComplianceStatus, InMemoryCaseStore, MedicalCertificate,
    SyncOutcome, WorkCapacity,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).expect("valid date")
}

fn certificate(start: i64, end: i64) -> MedicalCertificate {
    MedicalCertificate {
        start_date: today() + Duration::days(start),
        end_date: today() + Duration::days(end),
        capacity: WorkCapacity::Partial,
        source: "Northside Medical".to_string(),
        notes: Some("Modified duties, 4 hours per day".to_string()),
    }
}

#[test]
fn chase_action_follows_the_certificate_lifecycle() {
    let store = Arc::new(InMemoryCaseStore::new());
    let case = CaseRef::new("case-310", "org-acme");
    let sync = CertificateComplianceSync::new(
        CertificateComplianceEngine::default(),
        store.clone(),
        store.clone(),
    );

    let first = sync.sync(&case, today()).expect("sync with no certificate");
    assert_eq!(first.compliance.status, ComplianceStatus::NoCertificate);
    let urgent = match first.outcome {
        SyncOutcome::Scheduled { action } => action,
        other => panic!("expected a scheduled chase, got {other:?}"),
    };
    assert_eq!(urgent.priority, ActionPriority::Urgent);
    assert_eq!(urgent.due_date, today());

    store
        .put_certificates(case.clone(), vec![certificate(-20, 5)])
        .expect("store certificate");
    let second = sync.sync(&case, today()).expect("sync expiring certificate");
    assert_eq!(second.compliance.status, ComplianceStatus::CertificateExpiringSoon);
    let normal = match second.outcome {
        SyncOutcome::Scheduled { action } => action,
        other => panic!("expected a rescheduled chase, got {other:?}"),
    };
    assert_eq!(normal.id, urgent.id);
    assert_eq!(normal.priority, ActionPriority::Normal);
    assert_eq!(normal.due_date, today() + Duration::days(2));

    store
        .put_certificates(case.clone(), vec![certificate(-20, 5), certificate(4, 40)])
        .expect("store renewal");
    let renewed_day = today() + Duration::days(4);
    let third = sync.sync(&case, renewed_day).expect("sync renewed certificate");
    assert_eq!(third.compliance.status, ComplianceStatus::Compliant);
    assert_eq!(third.outcome, SyncOutcome::Resolved { closed: 1 });

    let actions = store.actions().expect("list actions");
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].status, ActionStatus::Done);

    let fourth = sync.sync(&case, renewed_day).expect("sync again");
    assert_eq!(fourth.outcome, SyncOutcome::Unchanged);
}

#[test]
fn compliance_json_is_shaped_for_case_dashboards() {
    let engine = CertificateComplianceEngine::default();
    let compliance = engine.evaluate(&[certificate(-30, -4)], today());

    let json = serde_json::to_value(&compliance).expect("serializes");

    assert_eq!(json["status"], "certificate_expired");
    assert_eq!(json["days_since_expiry"], 4);
    assert_eq!(json["message"], "Certificate expired 4 days ago");
    assert!(json["active_certificate"].is_null());
    assert_eq!(json["newest_certificate"]["source"], "Northside Medical");
}
