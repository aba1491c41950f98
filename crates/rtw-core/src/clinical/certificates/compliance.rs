use chrono::NaiveDate;
use tracing::debug;

use super::domain::{newest, CertificateCompliance, ComplianceStatus, MedicalCertificate};
use crate::dates::{days_between, days_until, is_within};

const DEFAULT_EXPIRING_SOON_DAYS: i64 = 7;
const DEFAULT_CHASE_LEAD_DAYS: i64 = 3;

/// Thresholds for certificate compliance and the chase actions it drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompliancePolicy {
    /// An active certificate this close to its end date counts as expiring soon.
    pub expiring_soon_days: i64,
    /// How long before expiry a chase action falls due.
    pub chase_lead_days: i64,
}

impl CompliancePolicy {
    pub fn new(expiring_soon_days: i64, chase_lead_days: i64) -> Self {
        Self {
            expiring_soon_days: if expiring_soon_days >= 0 {
                expiring_soon_days
            } else {
                DEFAULT_EXPIRING_SOON_DAYS
            },
            chase_lead_days: if chase_lead_days >= 0 {
                chase_lead_days
            } else {
                DEFAULT_CHASE_LEAD_DAYS
            },
        }
    }
}

impl Default for CompliancePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_EXPIRING_SOON_DAYS, DEFAULT_CHASE_LEAD_DAYS)
    }
}

/// Stateless classifier turning a certificate list into a compliance status.
#[derive(Debug, Clone, Default)]
pub struct CertificateComplianceEngine {
    policy: CompliancePolicy,
}

impl CertificateComplianceEngine {
    pub fn new(policy: CompliancePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &CompliancePolicy {
        &self.policy
    }

    pub fn evaluate(
        &self,
        certificates: &[MedicalCertificate],
        today: NaiveDate,
    ) -> CertificateCompliance {
        if certificates.is_empty() {
            return no_certificate();
        }

        let newest_certificate = newest(certificates);
        let active_certificate = newest(
            certificates
                .iter()
                .filter(|certificate| is_within(today, certificate.start_date, certificate.end_date)),
        );

        let compliance = match (active_certificate, newest_certificate) {
            (Some(active), _) => {
                let days_until_expiry = days_until(active.end_date, today);
                let (status, message) = if days_until_expiry <= self.policy.expiring_soon_days {
                    let message = if days_until_expiry <= 0 {
                        "Certificate expires today".to_string()
                    } else {
                        format!("Certificate expires in {days_until_expiry} days")
                    };
                    (ComplianceStatus::CertificateExpiringSoon, message)
                } else {
                    (
                        ComplianceStatus::Compliant,
                        format!("Certificate valid until {}", active.end_date),
                    )
                };

                CertificateCompliance {
                    status,
                    active_certificate: Some(active.clone()),
                    newest_certificate: newest_certificate.cloned(),
                    days_until_expiry: Some(days_until_expiry),
                    days_since_expiry: None,
                    message,
                }
            }
            (None, Some(latest)) => {
                // A newest certificate that has not started yet also lands here.
                let days_since_expiry = days_between(latest.end_date, today).abs();
                CertificateCompliance {
                    status: ComplianceStatus::CertificateExpired,
                    active_certificate: None,
                    newest_certificate: Some(latest.clone()),
                    days_until_expiry: None,
                    days_since_expiry: Some(days_since_expiry),
                    message: format!("Certificate expired {days_since_expiry} days ago"),
                }
            }
            (None, None) => no_certificate(),
        };

        debug!(
            status = compliance.status.label(),
            certificates = certificates.len(),
            "certificate compliance evaluated"
        );

        compliance
    }
}

/// Classify with the default thresholds.
pub fn evaluate_compliance(
    certificates: &[MedicalCertificate],
    today: NaiveDate,
) -> CertificateCompliance {
    CertificateComplianceEngine::default().evaluate(certificates, today)
}

fn no_certificate() -> CertificateCompliance {
    CertificateCompliance {
        status: ComplianceStatus::NoCertificate,
        active_certificate: None,
        newest_certificate: None,
        days_until_expiry: None,
        days_since_expiry: None,
        message: "No medical certificate on file".to_string(),
    }
}
