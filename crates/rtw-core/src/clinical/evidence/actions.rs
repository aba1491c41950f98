//! Turns evidence flags into deduplicated, templated follow-up actions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::flags::{ClinicalEvidenceFlag, FlagCode};
use super::templates::{draft_for, Draft};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    RequestTreatmentPlan,
    RequestUpdatedCertificate,
    RequestDelayExplanation,
    ReviewRtwPlan,
    DiscussNonCompliance,
    NotifyInsurer,
    ChaseSpecialistAppointment,
    RequestSpecialistReport,
    ScheduleFollowUp,
    CheckInWithWorker,
    RequestFunctionalAssessment,
    ConsiderPsychologicalSupport,
}

impl ActionType {
    pub const fn code(self) -> &'static str {
        match self {
            Self::RequestTreatmentPlan => "request_treatment_plan",
            Self::RequestUpdatedCertificate => "request_updated_certificate",
            Self::RequestDelayExplanation => "request_delay_explanation",
            Self::ReviewRtwPlan => "review_rtw_plan",
            Self::DiscussNonCompliance => "discuss_non_compliance",
            Self::NotifyInsurer => "notify_insurer",
            Self::ChaseSpecialistAppointment => "chase_specialist_appointment",
            Self::RequestSpecialistReport => "request_specialist_report",
            Self::ScheduleFollowUp => "schedule_follow_up",
            Self::CheckInWithWorker => "check_in_with_worker",
            Self::RequestFunctionalAssessment => "request_functional_assessment",
            Self::ConsiderPsychologicalSupport => "consider_psychological_support",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::RequestTreatmentPlan => "Request a treatment plan from the GP",
            Self::RequestUpdatedCertificate => "Request an updated certificate from the GP",
            Self::RequestDelayExplanation => "Ask the GP to explain the delayed recovery",
            Self::ReviewRtwPlan => "Review the RTW plan with the supervisor",
            Self::DiscussNonCompliance => "Discuss plan compliance with the worker",
            Self::NotifyInsurer => "Notify the insurer case manager",
            Self::ChaseSpecialistAppointment => "Chase the specialist appointment",
            Self::RequestSpecialistReport => "Request the specialist report",
            Self::ScheduleFollowUp => "Schedule the overdue follow-up",
            Self::CheckInWithWorker => "Check in with the worker",
            Self::RequestFunctionalAssessment => "Arrange a functional capacity assessment",
            Self::ConsiderPsychologicalSupport => "Consider psychological support options",
        }
    }
}

/// Who the action is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionTarget {
    Worker,
    EmployerInternal,
    Gp,
    Physiotherapist,
    Specialist,
    Insurer,
}

impl ActionTarget {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Worker => "WORKER",
            Self::EmployerInternal => "EMPLOYER_INTERNAL",
            Self::Gp => "GP",
            Self::Physiotherapist => "PHYSIOTHERAPIST",
            Self::Specialist => "SPECIALIST",
            Self::Insurer => "INSURER",
        }
    }

    /// Written correspondence rather than a conversation.
    pub const fn is_written(self) -> bool {
        matches!(
            self,
            Self::Gp | Self::Physiotherapist | Self::Specialist | Self::Insurer
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalActionRecommendation {
    /// `caseId:action_type:TARGET`, stable across evaluations of the same case.
    pub id: String,
    pub action_type: ActionType,
    pub target: ActionTarget,
    pub label: String,
    pub explanation: String,
    pub related_flag_codes: Vec<FlagCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_script: Option<String>,
}

/// Actions each flag calls for, in the order they are offered.
pub fn actions_for(code: FlagCode) -> &'static [(ActionType, ActionTarget)] {
    use ActionTarget as T;
    use ActionType as A;

    match code {
        FlagCode::MissingTreatmentPlan => &[(A::RequestTreatmentPlan, T::Gp)],
        FlagCode::CertificateOutOfDate | FlagCode::CertificateExpiringSoon => {
            &[(A::RequestUpdatedCertificate, T::Gp)]
        }
        FlagCode::NotImproving => &[(A::RequestDelayExplanation, T::Gp)],
        FlagCode::RtwPlanFailing => &[
            (A::RequestDelayExplanation, T::Gp),
            (A::ReviewRtwPlan, T::EmployerInternal),
        ],
        FlagCode::WorkerNonCompliant => &[
            (A::DiscussNonCompliance, T::Worker),
            (A::NotifyInsurer, T::Insurer),
        ],
        FlagCode::SpecialistReferredNoAppointment | FlagCode::SpecialistAppointmentOverdue => {
            &[(A::ChaseSpecialistAppointment, T::Specialist)]
        }
        FlagCode::SpecialistReportPending | FlagCode::SpecialistReportOutdated => {
            &[(A::RequestSpecialistReport, T::Specialist)]
        }
        FlagCode::OverdueFollowUp => &[(A::ScheduleFollowUp, T::Worker)],
        FlagCode::WorkerDisengaged => &[(A::CheckInWithWorker, T::Worker)],
        FlagCode::LongTailCase => &[
            (A::NotifyInsurer, T::Insurer),
            (A::RequestFunctionalAssessment, T::Physiotherapist),
        ],
        FlagCode::PsychologicalInjuryMarker => {
            &[(A::ConsiderPsychologicalSupport, T::EmployerInternal)]
        }
    }
}

/// Map flags to recommendations, keeping the first occurrence of each `(type, target)` pair.
///
/// The explanation and related flag code come from the flag that first produced the pair; later
/// flags asking for the same action are dropped rather than merged.
pub fn build_recommended_actions(
    case_id: &str,
    worker_name: &str,
    flags: &[ClinicalEvidenceFlag],
) -> Vec<ClinicalActionRecommendation> {
    let mut seen: HashSet<(ActionType, ActionTarget)> = HashSet::new();
    let mut actions = Vec::new();

    for flag in flags {
        for &(action_type, target) in actions_for(flag.code) {
            if !seen.insert((action_type, target)) {
                continue;
            }
            actions.push(recommendation(case_id, worker_name, flag, action_type, target));
        }
    }

    debug!(
        case_id,
        flag_count = flags.len(),
        action_count = actions.len(),
        "recommended actions built"
    );
    actions
}

fn recommendation(
    case_id: &str,
    worker_name: &str,
    flag: &ClinicalEvidenceFlag,
    action_type: ActionType,
    target: ActionTarget,
) -> ClinicalActionRecommendation {
    let mut action = ClinicalActionRecommendation {
        id: format!("{case_id}:{}:{}", action_type.code(), target.code()),
        action_type,
        target,
        label: action_type.label().to_string(),
        explanation: flag.message.clone(),
        related_flag_codes: vec![flag.code],
        suggested_subject: None,
        suggested_body: None,
        suggested_script: None,
    };

    match draft_for(action_type, target, worker_name) {
        Draft::Written { subject, body } => {
            action.suggested_subject = Some(subject);
            action.suggested_body = Some(body);
        }
        Draft::Script(script) => action.suggested_script = Some(script),
    }

    action
}
