use serde::{Deserialize, Serialize};

/// Closed vocabulary of evidence findings consumed by case dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlagCode {
    MissingTreatmentPlan,
    CertificateOutOfDate,
    CertificateExpiringSoon,
    NotImproving,
    RtwPlanFailing,
    WorkerNonCompliant,
    SpecialistReferredNoAppointment,
    SpecialistAppointmentOverdue,
    SpecialistReportPending,
    SpecialistReportOutdated,
    OverdueFollowUp,
    WorkerDisengaged,
    LongTailCase,
    PsychologicalInjuryMarker,
}

impl FlagCode {
    pub const fn code(self) -> &'static str {
        match self {
            Self::MissingTreatmentPlan => "MISSING_TREATMENT_PLAN",
            Self::CertificateOutOfDate => "CERTIFICATE_OUT_OF_DATE",
            Self::CertificateExpiringSoon => "CERTIFICATE_EXPIRING_SOON",
            Self::NotImproving => "NOT_IMPROVING",
            Self::RtwPlanFailing => "RTW_PLAN_FAILING",
            Self::WorkerNonCompliant => "WORKER_NON_COMPLIANT",
            Self::SpecialistReferredNoAppointment => "SPECIALIST_REFERRED_NO_APPOINTMENT",
            Self::SpecialistAppointmentOverdue => "SPECIALIST_APPOINTMENT_OVERDUE",
            Self::SpecialistReportPending => "SPECIALIST_REPORT_PENDING",
            Self::SpecialistReportOutdated => "SPECIALIST_REPORT_OUTDATED",
            Self::OverdueFollowUp => "OVERDUE_FOLLOW_UP",
            Self::WorkerDisengaged => "WORKER_DISENGAGED",
            Self::LongTailCase => "LONG_TAIL_CASE",
            Self::PsychologicalInjuryMarker => "PSYCHOLOGICAL_INJURY_MARKER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagSeverity {
    Info,
    Warning,
    HighRisk,
}

impl FlagSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::HighRisk => "high risk",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalEvidenceFlag {
    pub code: FlagCode,
    pub severity: FlagSeverity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ClinicalEvidenceFlag {
    pub fn new(code: FlagCode, severity: FlagSeverity, message: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn is_high_risk(&self) -> bool {
        self.severity == FlagSeverity::HighRisk
    }
}
