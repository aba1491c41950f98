use std::sync::Arc;

use super::common::*;
use crate::clinical::certificates::compliance::CertificateComplianceEngine;
use crate::clinical::certificates::domain::ComplianceStatus;
use crate::clinical::certificates::sync::{
    ActionKind, ActionPriority, ActionStatus, CaseAction, CaseActionId, CaseActionStore,
    CaseRef, CertificateComplianceSync, InMemoryCaseStore, SyncOutcome,
};

fn case() -> CaseRef {
    CaseRef::new("case-42", "org-7")
}

fn sync_with(
    store: &Arc<InMemoryCaseStore>,
) -> CertificateComplianceSync<InMemoryCaseStore, InMemoryCaseStore> {
    CertificateComplianceSync::new(
        CertificateComplianceEngine::default(),
        store.clone(),
        store.clone(),
    )
}

fn pending_chase(id: &str) -> CaseAction {
    CaseAction {
        id: CaseActionId(id.to_string()),
        case: case(),
        kind: ActionKind::ChaseCertificate,
        status: ActionStatus::Pending,
        priority: ActionPriority::Urgent,
        due_date: days(-2),
        description: "Chase updated medical certificate".to_string(),
    }
}

#[test]
fn expiring_certificate_schedules_chase_three_days_before_expiry() {
    let store = Arc::new(InMemoryCaseStore::new());
    store
        .put_certificates(case(), vec![certificate(-10, 6, "GP")])
        .expect("store certificates");

    let report = sync_with(&store).sync(&case(), today()).expect("sync succeeds");

    assert_eq!(report.compliance.status, ComplianceStatus::CertificateExpiringSoon);
    match report.outcome {
        SyncOutcome::Scheduled { action } => {
            assert_eq!(action.priority, ActionPriority::Normal);
            assert_eq!(action.due_date, days(3));
            assert_eq!(action.status, ActionStatus::Pending);
        }
        other => panic!("expected scheduled chase, got {other:?}"),
    }
}

#[test]
fn chase_due_date_is_clamped_to_today() {
    let store = Arc::new(InMemoryCaseStore::new());
    store
        .put_certificates(case(), vec![certificate(-10, 1, "GP")])
        .expect("store certificates");

    let report = sync_with(&store).sync(&case(), today()).expect("sync succeeds");

    match report.outcome {
        SyncOutcome::Scheduled { action } => assert_eq!(action.due_date, today()),
        other => panic!("expected scheduled chase, got {other:?}"),
    }
}

#[test]
fn missing_certificate_schedules_urgent_chase_and_reuses_pending_action() {
    let store = Arc::new(InMemoryCaseStore::new());
    store.upsert(pending_chase("act-existing")).expect("seed action");

    let report = sync_with(&store).sync(&case(), today()).expect("sync succeeds");

    match report.outcome {
        SyncOutcome::Scheduled { action } => {
            assert_eq!(action.id, CaseActionId("act-existing".to_string()));
            assert_eq!(action.priority, ActionPriority::Urgent);
            assert_eq!(action.due_date, today());
        }
        other => panic!("expected scheduled chase, got {other:?}"),
    }
    assert_eq!(store.actions().expect("actions").len(), 1);
}

#[test]
fn compliant_case_resolves_every_pending_chase() {
    let store = Arc::new(InMemoryCaseStore::new());
    store
        .put_certificates(case(), vec![certificate(-2, 28, "GP")])
        .expect("store certificates");
    store.upsert(pending_chase("act-1")).expect("seed first");
    store.upsert(pending_chase("act-2")).expect("seed second");

    let report = sync_with(&store).sync(&case(), today()).expect("sync succeeds");

    assert_eq!(report.outcome, SyncOutcome::Resolved { closed: 2 });
    assert!(store
        .actions()
        .expect("actions")
        .iter()
        .all(|action| action.status == ActionStatus::Done));
}

#[test]
fn compliant_case_without_pending_actions_is_unchanged() {
    let store = Arc::new(InMemoryCaseStore::new());
    store
        .put_certificates(case(), vec![certificate(-2, 28, "GP")])
        .expect("store certificates");

    let report = sync_with(&store).sync(&case(), today()).expect("sync succeeds");

    assert_eq!(report.outcome, SyncOutcome::Unchanged);
}

#[test]
fn certificates_are_scoped_by_organization() {
    let store = Arc::new(InMemoryCaseStore::new());
    store
        .put_certificates(
            CaseRef::new("case-42", "org-other"),
            vec![certificate(-2, 28, "GP")],
        )
        .expect("store certificates");

    let report = sync_with(&store).sync(&case(), today()).expect("sync succeeds");

    assert_eq!(report.compliance.status, ComplianceStatus::NoCertificate);
}
