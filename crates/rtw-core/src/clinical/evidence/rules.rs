use chrono::NaiveDate;

use super::domain::{
    CaseSnapshot, RtwPlanStatus, SpecialistStatus, WorkStatus, WorkerComplianceStatus,
};
use super::flags::{ClinicalEvidenceFlag, FlagCode, FlagSeverity};
use super::policy::EvidencePolicy;
use crate::clinical::certificates::domain::{newest, MedicalCertificate};
use crate::dates::{days_since, days_until, is_within};

/// Matched case-insensitively as substrings of the free-text case fields.
pub const PSYCHOSOCIAL_KEYWORDS: [&str; 10] = [
    "anxiety",
    "depression",
    "stress",
    "ptsd",
    "post-traumatic",
    "psychological",
    "mental health",
    "bullying",
    "harassment",
    "panic",
];

/// Facts the safety decision needs beyond the flag list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EvidenceSignals {
    pub has_treatment_plan: bool,
    pub has_current_certificate: bool,
    pub has_current_specialist_report: bool,
    pub is_improving: Option<bool>,
}

pub(crate) fn collect_flags(
    case: &CaseSnapshot,
    today: NaiveDate,
    policy: &EvidencePolicy,
) -> (Vec<ClinicalEvidenceFlag>, EvidenceSignals) {
    let mut flags = Vec::new();

    let has_treatment_plan = has_meaningful_treatment_plan(case);
    if !has_treatment_plan && case.date_of_injury.is_some() {
        flags.push(ClinicalEvidenceFlag::new(
            FlagCode::MissingTreatmentPlan,
            FlagSeverity::Warning,
            "No treatment plan, functional capacity or specialist summary on file",
        ));
    }

    let has_current_certificate =
        certificate_currency(&case.certificates, today, policy, &mut flags);
    certificate_expiring(&case.certificates, today, policy, &mut flags);
    capacity_trend(&case.certificates, &mut flags);
    let is_improving = rtw_plan(case, &mut flags);

    if case.compliance_status == Some(WorkerComplianceStatus::NonCompliant) {
        flags.push(ClinicalEvidenceFlag::new(
            FlagCode::WorkerNonCompliant,
            FlagSeverity::HighRisk,
            "Worker is not complying with the treatment or RTW plan",
        ));
    }

    let has_current_specialist_report = specialist(case, today, policy, &mut flags);
    follow_up(case, today, policy, &mut flags);
    disengagement(case, today, policy, &mut flags);
    long_tail(case, today, policy, &mut flags);
    psychosocial_markers(case, &mut flags);

    let signals = EvidenceSignals {
        has_treatment_plan,
        has_current_certificate,
        has_current_specialist_report,
        is_improving,
    };

    (flags, signals)
}

pub(crate) fn has_meaningful_treatment_plan(case: &CaseSnapshot) -> bool {
    case.has_medical_constraints()
        || case
            .functional_capacity
            .as_ref()
            .is_some_and(|capacity| capacity.has_any())
        || case
            .specialist_report
            .as_ref()
            .is_some_and(|report| report.has_functional_summary())
}

fn certificate_currency(
    certificates: &[MedicalCertificate],
    today: NaiveDate,
    policy: &EvidencePolicy,
    flags: &mut Vec<ClinicalEvidenceFlag>,
) -> bool {
    let Some(latest) = newest(certificates) else {
        flags.push(ClinicalEvidenceFlag::new(
            FlagCode::CertificateOutOfDate,
            FlagSeverity::Warning,
            "No medical certificate on file",
        ));
        return false;
    };

    let issued_days_ago = days_since(latest.start_date, today);
    if latest.end_date < today {
        flags.push(
            ClinicalEvidenceFlag::new(
                FlagCode::CertificateOutOfDate,
                FlagSeverity::Warning,
                format!(
                    "Latest certificate expired {} days ago",
                    days_since(latest.end_date, today)
                ),
            )
            .with_details(format!("Issued by {} on {}", latest.source, latest.start_date)),
        );
        return false;
    }

    if issued_days_ago > policy.certificate_currency_days {
        flags.push(
            ClinicalEvidenceFlag::new(
                FlagCode::CertificateOutOfDate,
                FlagSeverity::Warning,
                format!(
                    "Latest certificate was issued {issued_days_ago} days ago (limit {} days)",
                    policy.certificate_currency_days
                ),
            )
            .with_details(format!("Issued by {} on {}", latest.source, latest.start_date)),
        );
        return false;
    }

    true
}

fn certificate_expiring(
    certificates: &[MedicalCertificate],
    today: NaiveDate,
    policy: &EvidencePolicy,
    flags: &mut Vec<ClinicalEvidenceFlag>,
) {
    let active = newest(
        certificates
            .iter()
            .filter(|certificate| is_within(today, certificate.start_date, certificate.end_date)),
    );

    if let Some(active) = active {
        let remaining = days_until(active.end_date, today);
        if (0..=policy.expiring_soon_days).contains(&remaining) {
            let message = match remaining {
                0 => "Current certificate expires today".to_string(),
                1 => "Current certificate expires tomorrow".to_string(),
                n => format!("Current certificate expires in {n} days"),
            };
            flags.push(ClinicalEvidenceFlag::new(
                FlagCode::CertificateExpiringSoon,
                FlagSeverity::Warning,
                message,
            ));
        }
    }
}

fn capacity_trend(certificates: &[MedicalCertificate], flags: &mut Vec<ClinicalEvidenceFlag>) {
    let mut ranked: Vec<(&MedicalCertificate, u8)> = certificates
        .iter()
        .filter_map(|certificate| certificate.capacity.rank().map(|rank| (certificate, rank)))
        .collect();
    // Stable, so equal start dates keep input order.
    ranked.sort_by(|(left, _), (right, _)| right.start_date.cmp(&left.start_date));

    if let [(latest, latest_rank), (previous, previous_rank), ..] = ranked.as_slice() {
        if latest_rank < previous_rank {
            flags.push(
                ClinicalEvidenceFlag::new(
                    FlagCode::NotImproving,
                    FlagSeverity::Warning,
                    format!(
                        "Work capacity has declined from {} to {}",
                        previous.capacity.label(),
                        latest.capacity.label()
                    ),
                )
                .with_details(format!(
                    "Certificates from {} and {}",
                    previous.start_date, latest.start_date
                )),
            );
        }
    }
}

fn rtw_plan(case: &CaseSnapshot, flags: &mut Vec<ClinicalEvidenceFlag>) -> Option<bool> {
    match case.rtw_plan_status {
        Some(RtwPlanStatus::Failing) => {
            flags.push(ClinicalEvidenceFlag::new(
                FlagCode::RtwPlanFailing,
                FlagSeverity::HighRisk,
                "Return to work plan is failing",
            ));
            Some(false)
        }
        Some(RtwPlanStatus::WorkingWell) => Some(true),
        _ => None,
    }
}

/// Returns whether a current specialist report is on file.
fn specialist(
    case: &CaseSnapshot,
    today: NaiveDate,
    policy: &EvidencePolicy,
    flags: &mut Vec<ClinicalEvidenceFlag>,
) -> bool {
    let appointment = case.specialist_appointment_date;

    match case.specialist_status {
        Some(SpecialistStatus::Referred) => {
            flags.push(ClinicalEvidenceFlag::new(
                FlagCode::SpecialistReferredNoAppointment,
                FlagSeverity::Warning,
                "Worker has been referred to a specialist but no appointment is booked",
            ));
            false
        }
        Some(SpecialistStatus::AppointmentBooked) => {
            if let Some(date) = appointment.filter(|date| *date < today) {
                flags.push(ClinicalEvidenceFlag::new(
                    FlagCode::SpecialistAppointmentOverdue,
                    FlagSeverity::Warning,
                    format!("Specialist appointment on {date} has passed with no update recorded"),
                ));
            }
            false
        }
        Some(SpecialistStatus::SeenWaitingReport) => {
            let has_summary = case
                .specialist_report
                .as_ref()
                .is_some_and(|report| report.has_functional_summary());
            if !has_summary {
                flags.push(ClinicalEvidenceFlag::new(
                    FlagCode::SpecialistReportPending,
                    FlagSeverity::Warning,
                    "Worker has seen the specialist but the report has not been received",
                ));
            }
            false
        }
        Some(SpecialistStatus::ReportReceived) => match appointment {
            Some(date) if days_since(date, today) > policy.specialist_report_currency_days => {
                flags.push(ClinicalEvidenceFlag::new(
                    FlagCode::SpecialistReportOutdated,
                    FlagSeverity::Warning,
                    format!(
                        "Specialist report is based on an appointment {} days ago",
                        days_since(date, today)
                    ),
                ));
                false
            }
            _ => true,
        },
        Some(SpecialistStatus::None) | None => false,
    }
}

fn follow_up(
    case: &CaseSnapshot,
    today: NaiveDate,
    policy: &EvidencePolicy,
    flags: &mut Vec<ClinicalEvidenceFlag>,
) {
    let Some(due) = case.next_follow_up_date else {
        return;
    };

    let overdue = days_since(due, today);
    if overdue <= 0 {
        return;
    }

    let severity = if overdue > policy.follow_up_escalation_days {
        FlagSeverity::HighRisk
    } else {
        FlagSeverity::Warning
    };
    flags.push(ClinicalEvidenceFlag::new(
        FlagCode::OverdueFollowUp,
        severity,
        format!("Follow-up was due {overdue} days ago on {due}"),
    ));
}

fn disengagement(
    case: &CaseSnapshot,
    today: NaiveDate,
    policy: &EvidencePolicy,
    flags: &mut Vec<ClinicalEvidenceFlag>,
) {
    let Some(last_contact) = case.contact.last_worker_contact else {
        return;
    };

    let silent_days = days_since(last_contact, today);
    if silent_days < policy.disengaged_days {
        return;
    }

    let severity = if silent_days > policy.disengaged_escalation_days {
        FlagSeverity::HighRisk
    } else {
        FlagSeverity::Warning
    };
    flags.push(ClinicalEvidenceFlag::new(
        FlagCode::WorkerDisengaged,
        severity,
        format!("No contact with the worker for {silent_days} days"),
    ));
}

fn long_tail(
    case: &CaseSnapshot,
    today: NaiveDate,
    policy: &EvidencePolicy,
    flags: &mut Vec<ClinicalEvidenceFlag>,
) {
    let Some(injured_on) = case.date_of_injury else {
        return;
    };
    if case.work_status != Some(WorkStatus::OffWork) {
        return;
    }

    let open_days = days_since(injured_on, today);
    if open_days >= policy.long_tail_days {
        flags.push(ClinicalEvidenceFlag::new(
            FlagCode::LongTailCase,
            FlagSeverity::HighRisk,
            format!("Worker remains off work {open_days} days after injury"),
        ));
    }
}

/// Surfaces wording worth a human look; this is never a diagnosis.
fn psychosocial_markers(case: &CaseSnapshot, flags: &mut Vec<ClinicalEvidenceFlag>) {
    let text: Vec<String> = case.free_text().map(str::to_lowercase).collect();
    let matched: Vec<&str> = PSYCHOSOCIAL_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| text.iter().any(|field| field.contains(keyword)))
        .collect();

    if matched.is_empty() {
        return;
    }

    flags.push(
        ClinicalEvidenceFlag::new(
            FlagCode::PsychologicalInjuryMarker,
            FlagSeverity::Info,
            "Case notes mention possible psychosocial factors; consider whether support is needed",
        )
        .with_details(format!("Matched terms: {}", matched.join(", "))),
    );
}
