//! Keeps the "chase certificate" action for a case in step with its compliance status.
//!
//! Each sync reads the current pending actions and then upserts or resolves them, so two
//! concurrent syncs for the same case race with last-writer-wins semantics. Callers must
//! serialize syncs per case (e.g. a webhook and a scheduled job firing together).

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::compliance::CertificateComplianceEngine;
use super::domain::{CertificateCompliance, ComplianceStatus, MedicalCertificate};

/// Case and owning organization; certificates are always scoped by both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CaseRef {
    pub case_id: String,
    pub organization_id: String,
}

impl CaseRef {
    pub fn new(case_id: impl Into<String>, organization_id: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            organization_id: organization_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CaseActionId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    ChaseCertificate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPriority {
    Normal,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Pending,
    Done,
}

/// Coordinator-facing task persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseAction {
    pub id: CaseActionId,
    pub case: CaseRef,
    pub kind: ActionKind,
    pub status: ActionStatus,
    pub priority: ActionPriority,
    pub due_date: NaiveDate,
    pub description: String,
}

/// Read side for certificates held by the persistence collaborator.
pub trait CertificateSource: Send + Sync {
    fn certificates(&self, case: &CaseRef) -> Result<Vec<MedicalCertificate>, StoreError>;
}

/// Storage abstraction for case actions so the sync can be exercised in isolation.
pub trait CaseActionStore: Send + Sync {
    fn pending(&self, case: &CaseRef, kind: ActionKind) -> Result<Vec<CaseAction>, StoreError>;
    fn upsert(&self, action: CaseAction) -> Result<CaseAction, StoreError>;
    fn mark_done(&self, id: &CaseActionId) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("action not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What the sync did to the case's chase actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    Scheduled { action: CaseAction },
    Resolved { closed: usize },
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub compliance: CertificateCompliance,
    pub outcome: SyncOutcome,
}

static ACTION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_action_id() -> CaseActionId {
    let id = ACTION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CaseActionId(format!("act-{id:06}"))
}

/// Service composing the compliance engine with certificate and action storage.
pub struct CertificateComplianceSync<C, S> {
    engine: Arc<CertificateComplianceEngine>,
    certificates: Arc<C>,
    actions: Arc<S>,
}

impl<C, S> CertificateComplianceSync<C, S>
where
    C: CertificateSource + 'static,
    S: CaseActionStore + 'static,
{
    pub fn new(engine: CertificateComplianceEngine, certificates: Arc<C>, actions: Arc<S>) -> Self {
        Self {
            engine: Arc::new(engine),
            certificates,
            actions,
        }
    }

    /// Recompute compliance for a case and bring its chase action in line.
    pub fn sync(&self, case: &CaseRef, today: NaiveDate) -> Result<SyncReport, SyncError> {
        let certificates = self.certificates.certificates(case)?;
        let compliance = self.engine.evaluate(&certificates, today);
        let pending = self.actions.pending(case, ActionKind::ChaseCertificate)?;

        let outcome = match compliance.status {
            ComplianceStatus::Compliant => {
                for action in &pending {
                    self.actions.mark_done(&action.id)?;
                }
                if pending.is_empty() {
                    SyncOutcome::Unchanged
                } else {
                    SyncOutcome::Resolved {
                        closed: pending.len(),
                    }
                }
            }
            ComplianceStatus::CertificateExpiringSoon
            | ComplianceStatus::CertificateExpired
            | ComplianceStatus::NoCertificate => {
                if pending.len() > 1 {
                    warn!(
                        case_id = %case.case_id,
                        pending = pending.len(),
                        "multiple pending certificate chases; updating the first"
                    );
                }
                let (priority, due_date) = self.schedule_for(&compliance, today);
                let id = pending
                    .first()
                    .map(|action| action.id.clone())
                    .unwrap_or_else(next_action_id);
                let action = self.actions.upsert(CaseAction {
                    id,
                    case: case.clone(),
                    kind: ActionKind::ChaseCertificate,
                    status: ActionStatus::Pending,
                    priority,
                    due_date,
                    description: format!("Chase updated medical certificate: {}", compliance.message),
                })?;
                SyncOutcome::Scheduled { action }
            }
        };

        info!(
            case_id = %case.case_id,
            status = compliance.status.label(),
            ?outcome,
            "certificate compliance synced"
        );

        Ok(SyncReport {
            compliance,
            outcome,
        })
    }

    fn schedule_for(
        &self,
        compliance: &CertificateCompliance,
        today: NaiveDate,
    ) -> (ActionPriority, NaiveDate) {
        match (compliance.status, &compliance.active_certificate) {
            (ComplianceStatus::CertificateExpiringSoon, Some(active)) => {
                let lead = Duration::days(self.engine.policy().chase_lead_days);
                (ActionPriority::Normal, (active.end_date - lead).max(today))
            }
            _ => (ActionPriority::Urgent, today),
        }
    }
}

/// In-process store backing tests and the CLI.
#[derive(Debug, Default)]
pub struct InMemoryCaseStore {
    certificates: Mutex<BTreeMap<CaseRef, Vec<MedicalCertificate>>>,
    actions: Mutex<BTreeMap<CaseActionId, CaseAction>>,
}

impl InMemoryCaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_certificates(
        &self,
        case: CaseRef,
        certificates: Vec<MedicalCertificate>,
    ) -> Result<(), StoreError> {
        self.certificates
            .lock()
            .map_err(|_| StoreError::Unavailable("certificate lock poisoned".to_string()))?
            .insert(case, certificates);
        Ok(())
    }

    pub fn actions(&self) -> Result<Vec<CaseAction>, StoreError> {
        let actions = self
            .actions
            .lock()
            .map_err(|_| StoreError::Unavailable("action lock poisoned".to_string()))?;
        Ok(actions.values().cloned().collect())
    }
}

impl CertificateSource for InMemoryCaseStore {
    fn certificates(&self, case: &CaseRef) -> Result<Vec<MedicalCertificate>, StoreError> {
        let certificates = self
            .certificates
            .lock()
            .map_err(|_| StoreError::Unavailable("certificate lock poisoned".to_string()))?;
        Ok(certificates.get(case).cloned().unwrap_or_default())
    }
}

impl CaseActionStore for InMemoryCaseStore {
    fn pending(&self, case: &CaseRef, kind: ActionKind) -> Result<Vec<CaseAction>, StoreError> {
        let actions = self
            .actions
            .lock()
            .map_err(|_| StoreError::Unavailable("action lock poisoned".to_string()))?;
        Ok(actions
            .values()
            .filter(|action| {
                &action.case == case && action.kind == kind && action.status == ActionStatus::Pending
            })
            .cloned()
            .collect())
    }

    fn upsert(&self, action: CaseAction) -> Result<CaseAction, StoreError> {
        let mut actions = self
            .actions
            .lock()
            .map_err(|_| StoreError::Unavailable("action lock poisoned".to_string()))?;
        actions.insert(action.id.clone(), action.clone());
        Ok(action)
    }

    fn mark_done(&self, id: &CaseActionId) -> Result<(), StoreError> {
        let mut actions = self
            .actions
            .lock()
            .map_err(|_| StoreError::Unavailable("action lock poisoned".to_string()))?;
        let action = actions.get_mut(id).ok_or(StoreError::NotFound)?;
        action.status = ActionStatus::Done;
        Ok(())
    }
}
