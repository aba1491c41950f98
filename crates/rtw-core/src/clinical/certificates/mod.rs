//! Medical certificate lifecycle: compliance classification and chase-action sync.

mod compliance;
pub mod domain;
pub mod sync;

#[cfg(test)]
mod tests;

pub use compliance::{evaluate_compliance, CertificateComplianceEngine, CompliancePolicy};
pub use domain::{CertificateCompliance, ComplianceStatus, MedicalCertificate, WorkCapacity};
pub use sync::{
    ActionKind, ActionPriority, ActionStatus, CaseAction, CaseActionId, CaseActionStore,
    CaseRef, CertificateComplianceSync, CertificateSource, InMemoryCaseStore, StoreError,
    SyncError, SyncOutcome, SyncReport,
};
