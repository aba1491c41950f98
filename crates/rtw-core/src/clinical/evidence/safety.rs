use serde::{Deserialize, Serialize};

use super::domain::{CaseSnapshot, RiskLevel, RtwPlanStatus, WorkerComplianceStatus};
use super::flags::ClinicalEvidenceFlag;
use super::rules::EvidenceSignals;

/// Whether the current duties can be considered safe on the evidence held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutySafetyStatus {
    Safe,
    Unsafe,
    Unknown,
}

impl DutySafetyStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Unsafe => "unsafe",
            Self::Unknown => "unknown",
        }
    }
}

/// Unsafe needs both a warning sign and something that makes it matter (stated constraints or
/// a high-risk case). Safe needs every piece of positive evidence. Everything else is unknown.
pub(crate) fn decide_duty_safety(
    case: &CaseSnapshot,
    flags: &[ClinicalEvidenceFlag],
    signals: &EvidenceSignals,
) -> DutySafetyStatus {
    let non_compliant = case.compliance_status == Some(WorkerComplianceStatus::NonCompliant);
    let plan_failing = case.rtw_plan_status == Some(RtwPlanStatus::Failing);
    let any_high_risk = flags.iter().any(ClinicalEvidenceFlag::is_high_risk);

    let warning_sign = non_compliant || plan_failing || any_high_risk;
    let exposure = case.has_medical_constraints() || case.risk_level == Some(RiskLevel::High);

    if warning_sign && exposure {
        return DutySafetyStatus::Unsafe;
    }

    let plan_working = case.rtw_plan_status == Some(RtwPlanStatus::WorkingWell);
    if signals.has_current_certificate
        && signals.has_treatment_plan
        && !any_high_risk
        && plan_working
        && !non_compliant
    {
        return DutySafetyStatus::Safe;
    }

    DutySafetyStatus::Unknown
}
