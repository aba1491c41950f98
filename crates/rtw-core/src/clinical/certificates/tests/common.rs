use chrono::{Duration, NaiveDate};

use crate::clinical::certificates::domain::{MedicalCertificate, WorkCapacity};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 16).expect("valid date")
}

pub(super) fn days(offset: i64) -> NaiveDate {
    today() + Duration::days(offset)
}

pub(super) fn certificate(start: i64, end: i64, source: &str) -> MedicalCertificate {
    MedicalCertificate {
        start_date: days(start),
        end_date: days(end),
        capacity: WorkCapacity::Partial,
        source: source.to_string(),
        notes: None,
    }
}
