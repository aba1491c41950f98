use chrono::{Duration, NaiveDate};

use crate::clinical::certificates::domain::{MedicalCertificate, WorkCapacity};
use crate::clinical::evidence::domain::{
    CaseSnapshot, MedicalConstraints, RiskLevel, RtwPlanStatus, SpecialistStatus, WorkStatus,
    WorkerComplianceStatus,
};
use crate::clinical::evidence::{evaluate_case, ClinicalEvidenceEvaluation, FlagCode};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 16).expect("valid date")
}

pub(super) fn days(offset: i64) -> NaiveDate {
    today() + Duration::days(offset)
}

pub(super) fn certificate(start: i64, end: i64, capacity: WorkCapacity) -> MedicalCertificate {
    MedicalCertificate {
        start_date: days(start),
        end_date: days(end),
        capacity,
        source: "Dr Patel".to_string(),
        notes: None,
    }
}

/// A case with current evidence, a working plan and recent contact: raises no flags.
pub(super) fn steady_case() -> CaseSnapshot {
    let mut case = CaseSnapshot::new("case-1", "Alex Morgan");
    case.date_of_injury = Some(days(-60));
    case.risk_level = Some(RiskLevel::Medium);
    case.work_status = Some(WorkStatus::AtWork);
    case.compliance_status = Some(WorkerComplianceStatus::Compliant);
    case.rtw_plan_status = Some(RtwPlanStatus::WorkingWell);
    case.specialist_status = Some(SpecialistStatus::None);
    case.medical_constraints = Some(MedicalConstraints {
        lifting_limit_kg: Some(10.0),
        ..MedicalConstraints::default()
    });
    case.certificates = vec![certificate(-10, 20, WorkCapacity::Partial)];
    case.next_follow_up_date = Some(days(5));
    case.contact.last_worker_contact = Some(days(-3));
    case
}

pub(super) fn evaluate(case: &CaseSnapshot) -> ClinicalEvidenceEvaluation {
    evaluate_case(case, today())
}

pub(super) fn codes(evaluation: &ClinicalEvidenceEvaluation) -> Vec<FlagCode> {
    evaluation.flags.iter().map(|flag| flag.code).collect()
}
