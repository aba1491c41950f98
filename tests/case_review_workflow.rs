use chrono::{Duration, NaiveDate};
use rtw_core::clinical::certificates::{
    CertificateComplianceEngine, ComplianceStatus, MedicalCertificate, WorkCapacity,
};
use rtw_core::clinical::evidence::{
    CaseSnapshot, ClinicalEvidenceEvaluator, DutySafetyStatus, FlagCode, MedicalConstraints,
    RtwPlanStatus, WorkerComplianceStatus,
};
use rtw_core::config::RulesConfig;

fn review_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 4).expect("valid review date")
}

fn long_running_certificate() -> MedicalCertificate {
    MedicalCertificate {
        start_date: review_date() - Duration::days(50),
        end_date: review_date() + Duration::days(20),
        capacity: WorkCapacity::Partial,
        source: "Harbour Clinic".to_string(),
        notes: None,
    }
}

fn case_with(certificates: Vec<MedicalCertificate>) -> CaseSnapshot {
    let mut case = CaseSnapshot::new("case-88", "Casey Tran");
    case.date_of_injury = Some(review_date() - Duration::days(70));
    case.compliance_status = Some(WorkerComplianceStatus::Compliant);
    case.rtw_plan_status = Some(RtwPlanStatus::WorkingWell);
    case.medical_constraints = Some(MedicalConstraints {
        no_ladders: true,
        ..MedicalConstraints::default()
    });
    case.certificates = certificates;
    case.contact.last_worker_contact = Some(review_date() - Duration::days(6));
    case
}

#[test]
fn certificate_can_be_compliant_yet_too_old_as_clinical_evidence() {
    let rules = RulesConfig::default();
    let certificates = vec![long_running_certificate()];

    let compliance = CertificateComplianceEngine::new(rules.compliance.clone())
        .evaluate(&certificates, review_date());
    let evaluation = ClinicalEvidenceEvaluator::new(rules.evidence.clone())
        .evaluate(&case_with(certificates), review_date());

    assert_eq!(compliance.status, ComplianceStatus::Compliant);
    assert!(!evaluation.has_current_certificate);
    assert!(evaluation.has_flag(FlagCode::CertificateOutOfDate));
    assert_eq!(evaluation.duty_safety_status, DutySafetyStatus::Unknown);
    assert_eq!(
        evaluation.recommended_actions[0].id,
        "case-88:request_updated_certificate:GP"
    );
}

#[test]
fn renewed_certificate_restores_safe_duties() {
    let rules = RulesConfig::default();
    let renewal = MedicalCertificate {
        start_date: review_date() - Duration::days(2),
        end_date: review_date() + Duration::days(26),
        ..long_running_certificate()
    };

    let evaluation = ClinicalEvidenceEvaluator::new(rules.evidence)
        .evaluate(&case_with(vec![long_running_certificate(), renewal]), review_date());

    assert!(evaluation.flags.is_empty(), "{:?}", evaluation.flags);
    assert_eq!(evaluation.duty_safety_status, DutySafetyStatus::Safe);
}
