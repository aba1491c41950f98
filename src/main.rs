use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use rtw_core::clinical::certificates::{
    CaseRef, CertificateComplianceEngine, CertificateComplianceSync, InMemoryCaseStore,
    MedicalCertificate, SyncError, SyncOutcome, SyncReport,
};
use rtw_core::clinical::evidence::{
    CaseSnapshot, ClinicalEvidenceEvaluation, ClinicalEvidenceEvaluator,
};
use rtw_core::clinical::suitability::{
    rank_duties, Duty, DutyCatalog, FunctionalRestrictions, SuitabilityCalculator,
    SuitabilityResult,
};
use rtw_core::config::AppConfig;
use rtw_core::error::AppError;
use rtw_core::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "rtw-advisor",
    about = "Run return-to-work compliance, suitability and evidence checks from the command line",
    version
)]
struct Cli {
    /// Print the serialized result instead of the text report
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify certificate compliance and show the chase action it implies
    Compliance(ComplianceArgs),
    /// Rank catalog duties against a worker's functional restrictions
    Suitability(SuitabilityArgs),
    /// Review the clinical evidence held for a case
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug)]
struct ComplianceArgs {
    /// JSON array of medical certificates
    #[arg(long)]
    certificates: PathBuf,
    /// Case identifier used for the chase action
    #[arg(long, default_value = "case")]
    case_id: String,
    /// Organization owning the case
    #[arg(long, default_value = "default")]
    organization_id: String,
    /// Evaluation date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct SuitabilityArgs {
    /// Duty catalog CSV
    #[arg(long)]
    duties: PathBuf,
    /// JSON functional restrictions; omitted means nothing has been assessed
    #[arg(long)]
    restrictions: Option<PathBuf>,
    /// Only consider duties for this role
    #[arg(long)]
    role: Option<String>,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// JSON case snapshot
    #[arg(long = "case")]
    case_path: PathBuf,
    /// Evaluation date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(environment = ?config.environment, "rtw advisor starting");

    let output = match cli.command {
        Command::Compliance(args) => run_compliance(&config, args, cli.json)?,
        Command::Suitability(args) => run_suitability(&config, args, cli.json)?,
        Command::Evaluate(args) => run_evaluate(&config, args, cli.json)?,
    };

    println!("{output}");
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn run_compliance(
    config: &AppConfig,
    args: ComplianceArgs,
    json: bool,
) -> Result<String, AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let certificates: Vec<MedicalCertificate> = read_json(&args.certificates)?;
    let case = CaseRef::new(args.case_id, args.organization_id);

    let store = Arc::new(InMemoryCaseStore::new());
    store
        .put_certificates(case.clone(), certificates)
        .map_err(SyncError::from)?;
    let sync = CertificateComplianceSync::new(
        CertificateComplianceEngine::new(config.rules.compliance.clone()),
        store.clone(),
        store,
    );
    let report = sync.sync(&case, today)?;

    if json {
        to_json(&report)
    } else {
        Ok(render_compliance(&case, &report, today))
    }
}

fn run_suitability(
    config: &AppConfig,
    args: SuitabilityArgs,
    json: bool,
) -> Result<String, AppError> {
    let catalog = DutyCatalog::from_path(&args.duties)?;
    let restrictions: Option<FunctionalRestrictions> = match &args.restrictions {
        Some(path) => Some(read_json(path)?),
        None => None,
    };

    let calculator = SuitabilityCalculator::new(config.rules.suitability.clone());
    let ranked = match &args.role {
        Some(role) => rank_duties(&calculator, catalog.for_role(role), restrictions.as_ref()),
        None => rank_duties(&calculator, catalog.duties(), restrictions.as_ref()),
    };
    info!(
        catalog = catalog.duties().len(),
        workable = ranked.len(),
        "duties ranked"
    );

    if json {
        let rows: Vec<RankedDuty<'_>> = ranked
            .iter()
            .map(|(duty, result)| RankedDuty { duty, result })
            .collect();
        to_json(&rows)
    } else {
        Ok(render_suitability(&ranked, args.role.as_deref()))
    }
}

#[derive(Debug, Serialize)]
struct RankedDuty<'a> {
    duty: &'a Duty,
    result: &'a SuitabilityResult,
}

fn run_evaluate(config: &AppConfig, args: EvaluateArgs, json: bool) -> Result<String, AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let case: CaseSnapshot = read_json(&args.case_path)?;

    let evaluator = ClinicalEvidenceEvaluator::new(config.rules.evidence.clone());
    let evaluation = evaluator.evaluate(&case, today);

    if json {
        to_json(&evaluation)
    } else {
        Ok(render_evaluation(&case, &evaluation))
    }
}

fn render_compliance(case: &CaseRef, report: &SyncReport, today: NaiveDate) -> String {
    let compliance = &report.compliance;
    let mut lines = vec![
        "Certificate compliance".to_string(),
        format!("Case {} (evaluated {})", case.case_id, today),
        format!("Status: {} - {}", compliance.status.label(), compliance.message),
    ];

    if let Some(active) = &compliance.active_certificate {
        lines.push(format!(
            "Active certificate: {} -> {} from {} ({})",
            active.start_date,
            active.end_date,
            active.source,
            active.capacity.label()
        ));
    }

    match &report.outcome {
        SyncOutcome::Scheduled { action } => lines.push(format!(
            "Chase action {}: {:?} priority, due {}",
            action.id.0, action.priority, action.due_date
        )),
        SyncOutcome::Resolved { closed } => {
            lines.push(format!("Closed {closed} pending chase action(s)"))
        }
        SyncOutcome::Unchanged => lines.push("No chase action needed".to_string()),
    }

    lines.join("\n")
}

fn render_suitability(ranked: &[(&Duty, SuitabilityResult)], role: Option<&str>) -> String {
    let heading = match role {
        Some(role) => format!("Suitable duties for role {role}"),
        None => "Suitable duties".to_string(),
    };
    let mut lines = vec![heading];

    if ranked.is_empty() {
        lines.push("- none of the catalog duties fit the current restrictions".to_string());
        return lines.join("\n");
    }

    for (duty, result) in ranked {
        lines.push(format!(
            "- {} ({}): {}, confidence {:.0}%",
            duty.name,
            duty.id,
            result.summary(),
            result.confidence * 100.0
        ));
        for modification in &result.suggested_modifications {
            lines.push(format!("    * {modification}"));
        }
        for warning in &result.warnings {
            lines.push(format!("    ! {warning}"));
        }
    }

    lines.join("\n")
}

fn render_evaluation(case: &CaseSnapshot, evaluation: &ClinicalEvidenceEvaluation) -> String {
    let improving = match evaluation.is_improving_on_expected_timeline {
        Some(true) => "yes",
        Some(false) => "no",
        None => "unknown",
    };

    let mut lines = vec![
        "Clinical evidence review".to_string(),
        format!(
            "Case {} for {} (evaluated {})",
            evaluation.case_id, case.worker_name, evaluation.evaluated_on
        ),
        format!("Duty safety: {}", evaluation.duty_safety_status.label()),
        format!(
            "Current certificate: {}, treatment plan: {}, current specialist report: {}, improving: {}",
            yes_no(evaluation.has_current_certificate),
            yes_no(evaluation.has_treatment_plan),
            yes_no(evaluation.has_current_specialist_report),
            improving
        ),
    ];

    if evaluation.flags.is_empty() {
        lines.push("\nFlags: none".to_string());
    } else {
        lines.push("\nFlags".to_string());
        for flag in &evaluation.flags {
            let details = flag
                .details
                .as_deref()
                .map(|details| format!(" ({details})"))
                .unwrap_or_default();
            lines.push(format!(
                "- [{}] {}: {}{}",
                flag.severity.label(),
                flag.code.code(),
                flag.message,
                details
            ));
        }
    }

    if evaluation.recommended_actions.is_empty() {
        lines.push("\nRecommended actions: none".to_string());
    } else {
        lines.push("\nRecommended actions".to_string());
        for action in &evaluation.recommended_actions {
            lines.push(format!(
                "- {} [{}]: {}",
                action.label,
                action.target.code(),
                action.explanation
            ));
        }
    }

    lines.join("\n")
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rtw_core::clinical::certificates::WorkCapacity;
    use rtw_core::clinical::evidence::evaluate_case;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 16).expect("valid date")
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert_eq!(parse_date(" 2025-06-16 "), Ok(today()));
        assert!(parse_date("16/06/2025").is_err());
    }

    #[test]
    fn compliance_report_shows_the_scheduled_chase() {
        let case = CaseRef::new("case-5", "org-1");
        let store = Arc::new(InMemoryCaseStore::new());
        store
            .put_certificates(
                case.clone(),
                vec![MedicalCertificate {
                    start_date: today() - Duration::days(20),
                    end_date: today() + Duration::days(2),
                    capacity: WorkCapacity::Partial,
                    source: "Dr Wu".to_string(),
                    notes: None,
                }],
            )
            .expect("store certificates");
        let sync = CertificateComplianceSync::new(
            CertificateComplianceEngine::default(),
            store.clone(),
            store,
        );

        let report = sync.sync(&case, today()).expect("sync");
        let text = render_compliance(&case, &report, today());

        assert!(text.contains("Status: Certificate expiring soon - Certificate expires in 2 days"));
        assert!(text.contains("Normal priority, due 2025-06-16"));
    }

    #[test]
    fn evaluation_report_lists_flags_and_actions() {
        let mut case = CaseSnapshot::new("case-8", "Robin Hale");
        case.date_of_injury = Some(today() - Duration::days(30));

        let evaluation = evaluate_case(&case, today());
        let text = render_evaluation(&case, &evaluation);

        assert!(text.contains("Case case-8 for Robin Hale"));
        assert!(text.contains("Duty safety: unknown"));
        assert!(text.contains("- [warning] MISSING_TREATMENT_PLAN"));
        assert!(text.contains("[GP]"));
    }

    #[test]
    fn empty_ranking_says_so() {
        let text = render_suitability(&[], Some("Warehouse"));

        assert_eq!(
            text,
            "Suitable duties for role Warehouse\n- none of the catalog duties fit the current restrictions"
        );
    }
}
