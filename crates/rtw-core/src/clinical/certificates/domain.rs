use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Work capacity stated on a medical certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkCapacity {
    Fit,
    Partial,
    Unfit,
    #[default]
    Unknown,
}

impl WorkCapacity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fit => "fit for full duties",
            Self::Partial => "partial capacity",
            Self::Unfit => "unfit for work",
            Self::Unknown => "capacity not stated",
        }
    }

    /// Ordering used for capacity trends; `Unknown` has no rank.
    pub const fn rank(self) -> Option<u8> {
        match self {
            Self::Unfit => Some(0),
            Self::Partial => Some(1),
            Self::Fit => Some(2),
            Self::Unknown => None,
        }
    }
}

/// Certificate of capacity as supplied by the persistence layer. Lists may arrive unsorted and
/// with overlapping periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalCertificate {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub capacity: WorkCapacity,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Picks the certificate with the latest start date. Exact ties keep the earlier entry.
pub(crate) fn newest<'a, I>(certificates: I) -> Option<&'a MedicalCertificate>
where
    I: IntoIterator<Item = &'a MedicalCertificate>,
{
    certificates
        .into_iter()
        .fold(None, |best: Option<&MedicalCertificate>, candidate| match best {
            Some(current) if candidate.start_date <= current.start_date => Some(current),
            _ => Some(candidate),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    NoCertificate,
    CertificateExpiringSoon,
    CertificateExpired,
    Compliant,
}

impl ComplianceStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoCertificate => "No certificate",
            Self::CertificateExpiringSoon => "Certificate expiring soon",
            Self::CertificateExpired => "Certificate expired",
            Self::Compliant => "Compliant",
        }
    }

    /// Statuses that call for someone to chase a fresh certificate.
    pub const fn needs_chase(self) -> bool {
        !matches!(self, Self::Compliant)
    }
}

/// Derived, never stored: recomputed from the certificate list on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateCompliance {
    pub status: ComplianceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_certificate: Option<MedicalCertificate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest_certificate: Option<MedicalCertificate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until_expiry: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_since_expiry: Option<i64>,
    pub message: String,
}
