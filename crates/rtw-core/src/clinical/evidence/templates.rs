use super::actions::{ActionTarget, ActionType};

/// Suggested wording for a case manager to adapt before sending or calling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Draft {
    Written { subject: String, body: String },
    Script(String),
}

pub(crate) fn draft_for(action_type: ActionType, target: ActionTarget, worker_name: &str) -> Draft {
    let worker = display_name(worker_name);
    if target.is_written() {
        let (subject, body) = letter(action_type, &worker);
        Draft::Written { subject, body }
    } else {
        Draft::Script(script(action_type, &worker))
    }
}

fn display_name(worker_name: &str) -> String {
    let trimmed = worker_name.trim();
    if trimmed.is_empty() {
        "the worker".to_string()
    } else {
        trimmed.to_string()
    }
}

fn letter(action_type: ActionType, worker: &str) -> (String, String) {
    match action_type {
        ActionType::RequestTreatmentPlan => (
            format!("Treatment plan request for {worker}"),
            format!(
                "We are supporting {worker} with their return to work and do not yet hold a \
                 treatment plan. Could you please outline the planned treatment, current \
                 functional limitations and expected timeframes so we can offer suitable duties?"
            ),
        ),
        ActionType::RequestUpdatedCertificate => (
            format!("Updated certificate of capacity for {worker}"),
            format!(
                "Our records show the certificate of capacity for {worker} is expired or about \
                 to expire. Please provide an updated certificate at the next consultation, \
                 including any changes to restrictions or hours."
            ),
        ),
        ActionType::RequestDelayExplanation => (
            format!("Recovery progress for {worker}"),
            format!(
                "Recovery for {worker} appears slower than expected. Could you let us know \
                 whether anything is delaying progress and whether the treatment plan or \
                 restrictions should change?"
            ),
        ),
        ActionType::NotifyInsurer => (
            format!("Case update: {worker}"),
            format!(
                "We are flagging the claim for {worker} for your attention. Current evidence \
                 indicates the case needs additional support or review. Please advise on next \
                 steps or any assessments you would like arranged."
            ),
        ),
        ActionType::ChaseSpecialistAppointment => (
            format!("Specialist appointment for {worker}"),
            format!(
                "{worker} was referred for a specialist opinion. Could you confirm the \
                 appointment date, or advise if the referral has not been received?"
            ),
        ),
        ActionType::RequestSpecialistReport => (
            format!("Specialist report for {worker}"),
            format!(
                "Thank you for seeing {worker}. Could you please forward your report, including \
                 functional capacity and work recommendations, so we can update the RTW plan?"
            ),
        ),
        ActionType::RequestFunctionalAssessment => (
            format!("Functional capacity assessment for {worker}"),
            format!(
                "We would like to arrange a functional capacity assessment for {worker} to \
                 guide suitable duties and the next stage of the RTW plan. Please advise your \
                 earliest availability."
            ),
        ),
        other => (
            format!("{} for {worker}", other.label()),
            format!("Regarding {worker}: {}.", other.label()),
        ),
    }
}

fn script(action_type: ActionType, worker: &str) -> String {
    match action_type {
        ActionType::ReviewRtwPlan => format!(
            "Meet with the supervisor to review how the RTW plan for {worker} is going. Ask \
             which duties are causing difficulty, whether hours or tasks need adjusting, and \
             agree a revised plan and review date."
        ),
        ActionType::DiscussNonCompliance => format!(
            "Hi {worker}, I wanted to check in about your treatment and return to work plan. \
             It looks like some appointments or agreed steps have been missed. Is anything \
             making it hard to keep up, and how can we help?"
        ),
        ActionType::ScheduleFollowUp => format!(
            "Hi {worker}, we were due to catch up about your recovery. When is a good time \
             this week to go through how you are going and any changes from your doctor?"
        ),
        ActionType::CheckInWithWorker => format!(
            "Hi {worker}, it has been a while since we spoke. How are you going with your \
             recovery, and is there anything you need from us at the moment?"
        ),
        ActionType::ConsiderPsychologicalSupport => format!(
            "Review recent notes for {worker} with the injury management lead. Consider \
             offering EAP or other support services and check that workload and team \
             arrangements are appropriate. Do not treat the notes as a diagnosis."
        ),
        other => format!("Speak with {worker}: {}.", other.label()),
    }
}
