use super::common::*;
use crate::clinical::certificates::compliance::{
    evaluate_compliance, CertificateComplianceEngine, CompliancePolicy,
};
use crate::clinical::certificates::domain::ComplianceStatus;

#[test]
fn empty_list_has_no_certificate() {
    let compliance = evaluate_compliance(&[], today());

    assert_eq!(compliance.status, ComplianceStatus::NoCertificate);
    assert!(compliance.active_certificate.is_none());
    assert!(compliance.newest_certificate.is_none());
    assert_eq!(compliance.message, "No medical certificate on file");
}

#[test]
fn active_certificate_ending_in_five_days_is_expiring_soon() {
    let compliance = evaluate_compliance(&[certificate(-20, 5, "GP")], today());

    assert_eq!(compliance.status, ComplianceStatus::CertificateExpiringSoon);
    assert_eq!(compliance.days_until_expiry, Some(5));
    assert_eq!(compliance.message, "Certificate expires in 5 days");
}

#[test]
fn certificate_ending_today_expires_today() {
    let compliance = evaluate_compliance(&[certificate(-14, 0, "GP")], today());

    assert_eq!(compliance.status, ComplianceStatus::CertificateExpiringSoon);
    assert_eq!(compliance.days_until_expiry, Some(0));
    assert_eq!(compliance.message, "Certificate expires today");
}

#[test]
fn seven_days_is_still_expiring_soon_and_eight_is_compliant() {
    let seven = evaluate_compliance(&[certificate(-1, 7, "GP")], today());
    let eight = evaluate_compliance(&[certificate(-1, 8, "GP")], today());

    assert_eq!(seven.status, ComplianceStatus::CertificateExpiringSoon);
    assert_eq!(eight.status, ComplianceStatus::Compliant);
    assert_eq!(eight.days_until_expiry, Some(8));
    assert!(eight.message.contains(&days(8).to_string()));
}

#[test]
fn lapsed_certificate_is_expired_with_days_since() {
    let compliance = evaluate_compliance(&[certificate(-40, -10, "GP")], today());

    assert_eq!(compliance.status, ComplianceStatus::CertificateExpired);
    assert_eq!(compliance.days_since_expiry, Some(10));
    assert!(compliance.active_certificate.is_none());
    assert_eq!(compliance.message, "Certificate expired 10 days ago");
}

#[test]
fn unsorted_overlapping_certificates_pick_newest_active() {
    let certificates = vec![
        certificate(-10, 30, "Specialist"),
        certificate(-60, -30, "GP"),
        certificate(-3, 4, "GP"),
    ];

    let compliance = evaluate_compliance(&certificates, today());

    let active = compliance.active_certificate.expect("active certificate");
    assert_eq!(active.start_date, days(-3));
    assert_eq!(compliance.status, ComplianceStatus::CertificateExpiringSoon);
    assert_eq!(compliance.days_until_expiry, Some(4));
}

#[test]
fn exact_start_date_ties_keep_first_certificate() {
    let certificates = vec![certificate(-5, 20, "First"), certificate(-5, 3, "Second")];

    let compliance = evaluate_compliance(&certificates, today());

    assert_eq!(
        compliance.newest_certificate.expect("newest").source,
        "First"
    );
    assert_eq!(
        compliance.active_certificate.expect("active").source,
        "First"
    );
    assert_eq!(compliance.status, ComplianceStatus::Compliant);
}

#[test]
fn future_dated_certificate_without_active_cover_counts_as_expired() {
    let compliance = evaluate_compliance(&[certificate(3, 20, "GP")], today());

    assert_eq!(compliance.status, ComplianceStatus::CertificateExpired);
    assert_eq!(compliance.days_since_expiry, Some(20));
}

#[test]
fn custom_window_changes_expiring_threshold() {
    let engine = CertificateComplianceEngine::new(CompliancePolicy::new(14, 3));

    let compliance = engine.evaluate(&[certificate(-2, 10, "GP")], today());

    assert_eq!(compliance.status, ComplianceStatus::CertificateExpiringSoon);
}

#[test]
fn negative_thresholds_fall_back_to_defaults() {
    assert_eq!(CompliancePolicy::new(-1, -4), CompliancePolicy::default());
}
