use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::clinical::certificates::MedicalCertificate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[serde(alias = "Low")]
    Low,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "High")]
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    #[serde(alias = "At work")]
    AtWork,
    #[serde(alias = "Off work")]
    OffWork,
}

/// Whether the worker is following the treatment and RTW plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerComplianceStatus {
    Compliant,
    PartiallyCompliant,
    NonCompliant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RtwPlanStatus {
    NotPlanned,
    PlanningInProgress,
    PlanAgreed,
    InProgress,
    WorkingWell,
    Failing,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialistStatus {
    None,
    Referred,
    AppointmentBooked,
    SeenWaitingReport,
    ReportReceived,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialistReport {
    pub functional_summary: Option<String>,
    pub recommendations: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub received_on: Option<NaiveDate>,
}

impl SpecialistReport {
    pub fn has_functional_summary(&self) -> bool {
        has_text(&self.functional_summary)
    }
}

/// Restrictions written on certificates or by the treating practitioner.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicalConstraints {
    pub lifting_limit_kg: Option<f64>,
    pub no_bending: bool,
    pub no_twisting: bool,
    pub no_prolonged_standing: bool,
    pub no_prolonged_sitting: bool,
    pub no_driving: bool,
    pub no_ladders: bool,
    pub other: Option<String>,
}

impl MedicalConstraints {
    /// True when at least one constraint is actually stated.
    pub fn has_any(&self) -> bool {
        has_amount(self.lifting_limit_kg)
            || self.no_bending
            || self.no_twisting
            || self.no_prolonged_standing
            || self.no_prolonged_sitting
            || self.no_driving
            || self.no_ladders
            || has_text(&self.other)
    }
}

/// Capacity summary from a functional assessment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionalCapacity {
    pub max_hours_per_day: Option<f64>,
    pub max_days_per_week: Option<u8>,
    pub lifting_kg: Option<f64>,
    pub sitting_tolerance_minutes: Option<u32>,
    pub standing_tolerance_minutes: Option<u32>,
    pub notes: Option<String>,
}

impl FunctionalCapacity {
    pub fn has_any(&self) -> bool {
        has_amount(self.max_hours_per_day)
            || self.max_days_per_week.is_some_and(|days| days > 0)
            || has_amount(self.lifting_kg)
            || self.sitting_tolerance_minutes.is_some_and(|minutes| minutes > 0)
            || self.standing_tolerance_minutes.is_some_and(|minutes| minutes > 0)
            || has_text(&self.notes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactHistory {
    #[serde(deserialize_with = "lenient_date")]
    pub last_worker_contact: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_date")]
    pub last_employer_contact: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_date")]
    pub last_clinician_contact: Option<NaiveDate>,
}

/// Aggregate case facts gathered by the caller for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSnapshot {
    pub case_id: String,
    pub worker_name: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date_of_injury: Option<NaiveDate>,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub work_status: Option<WorkStatus>,
    #[serde(default)]
    pub compliance_status: Option<WorkerComplianceStatus>,
    #[serde(default)]
    pub rtw_plan_status: Option<RtwPlanStatus>,
    #[serde(default)]
    pub specialist_status: Option<SpecialistStatus>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub specialist_appointment_date: Option<NaiveDate>,
    #[serde(default)]
    pub specialist_report: Option<SpecialistReport>,
    #[serde(default)]
    pub medical_constraints: Option<MedicalConstraints>,
    #[serde(default)]
    pub functional_capacity: Option<FunctionalCapacity>,
    #[serde(default)]
    pub certificates: Vec<MedicalCertificate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub next_follow_up_date: Option<NaiveDate>,
    #[serde(default)]
    pub contact: ContactHistory,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub injury_description: Option<String>,
    #[serde(default)]
    pub clinical_notes: Option<String>,
}

impl CaseSnapshot {
    /// Empty snapshot for a case; callers fill in what the store holds.
    pub fn new(case_id: impl Into<String>, worker_name: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            worker_name: worker_name.into(),
            date_of_injury: None,
            risk_level: None,
            work_status: None,
            compliance_status: None,
            rtw_plan_status: None,
            specialist_status: None,
            specialist_appointment_date: None,
            specialist_report: None,
            medical_constraints: None,
            functional_capacity: None,
            certificates: Vec::new(),
            next_follow_up_date: None,
            contact: ContactHistory::default(),
            summary: None,
            injury_description: None,
            clinical_notes: None,
        }
    }

    pub fn has_medical_constraints(&self) -> bool {
        self.medical_constraints
            .as_ref()
            .is_some_and(MedicalConstraints::has_any)
    }

    /// Free-text fields scanned for psychosocial markers.
    pub fn free_text(&self) -> impl Iterator<Item = &str> {
        [&self.summary, &self.injury_description, &self.clinical_notes]
            .into_iter()
            .filter_map(|field| field.as_deref())
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|text| !text.trim().is_empty())
}

fn has_amount(value: Option<f64>) -> bool {
    value.is_some_and(|amount| amount > 0.0)
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`; anything else
/// becomes `None` so the rule depending on it is skipped rather than failing the snapshot.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.date_naive());
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|timestamp| timestamp.date())
}
