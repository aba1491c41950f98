//! Clinical evidence review for a single case.
//!
//! Flags are recomputed from the snapshot on every call; nothing is accumulated between
//! evaluations. The duty safety status is its own aggregation rule and is not derived from the
//! highest flag severity.

mod actions;
pub mod domain;
mod flags;
mod policy;
mod rules;
mod safety;
mod templates;

#[cfg(test)]
mod tests;

pub use actions::{
    actions_for, build_recommended_actions, ActionTarget, ActionType,
    ClinicalActionRecommendation,
};
pub use domain::{
    CaseSnapshot, ContactHistory, FunctionalCapacity, MedicalConstraints, RiskLevel,
    RtwPlanStatus, SpecialistReport, SpecialistStatus, WorkStatus, WorkerComplianceStatus,
};
pub use flags::{ClinicalEvidenceFlag, FlagCode, FlagSeverity};
pub use policy::EvidencePolicy;
pub use rules::PSYCHOSOCIAL_KEYWORDS;
pub use safety::DutySafetyStatus;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless evaluator applying the evidence policy to case snapshots.
#[derive(Debug, Clone, Default)]
pub struct ClinicalEvidenceEvaluator {
    policy: EvidencePolicy,
}

impl ClinicalEvidenceEvaluator {
    pub fn new(policy: EvidencePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &EvidencePolicy {
        &self.policy
    }

    pub fn evaluate(&self, case: &CaseSnapshot, today: NaiveDate) -> ClinicalEvidenceEvaluation {
        let (flags, signals) = rules::collect_flags(case, today, &self.policy);
        let duty_safety_status = safety::decide_duty_safety(case, &flags, &signals);
        let recommended_actions =
            build_recommended_actions(&case.case_id, &case.worker_name, &flags);

        debug!(
            case_id = %case.case_id,
            flag_count = flags.len(),
            duty_safety = duty_safety_status.label(),
            "clinical evidence evaluated"
        );

        ClinicalEvidenceEvaluation {
            case_id: case.case_id.clone(),
            evaluated_on: today,
            flags,
            duty_safety_status,
            has_current_certificate: signals.has_current_certificate,
            has_treatment_plan: signals.has_treatment_plan,
            has_current_specialist_report: signals.has_current_specialist_report,
            is_improving_on_expected_timeline: signals.is_improving,
            recommended_actions,
        }
    }
}

/// Evaluate with the default thresholds.
pub fn evaluate_case(case: &CaseSnapshot, today: NaiveDate) -> ClinicalEvidenceEvaluation {
    ClinicalEvidenceEvaluator::default().evaluate(case, today)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalEvidenceEvaluation {
    pub case_id: String,
    pub evaluated_on: NaiveDate,
    pub flags: Vec<ClinicalEvidenceFlag>,
    pub duty_safety_status: DutySafetyStatus,
    pub has_current_certificate: bool,
    pub has_treatment_plan: bool,
    pub has_current_specialist_report: bool,
    /// `None` when the RTW plan says nothing either way.
    pub is_improving_on_expected_timeline: Option<bool>,
    pub recommended_actions: Vec<ClinicalActionRecommendation>,
}

impl ClinicalEvidenceEvaluation {
    pub fn has_flag(&self, code: FlagCode) -> bool {
        self.flags.iter().any(|flag| flag.code == code)
    }

    pub fn flag(&self, code: FlagCode) -> Option<&ClinicalEvidenceFlag> {
        self.flags.iter().find(|flag| flag.code == code)
    }

    pub fn high_risk_count(&self) -> usize {
        self.flags.iter().filter(|flag| flag.is_high_risk()).count()
    }
}
