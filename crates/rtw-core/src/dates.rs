//! Day-granularity arithmetic shared by every rule that counts days.
//!
//! All engines work on `NaiveDate`, so "today" always means the whole calendar day and the
//! start-of-day/end-of-day normalization is identical everywhere.

use chrono::NaiveDate;

/// Signed number of whole days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Days remaining until `target`; zero on the day itself, negative once passed.
pub fn days_until(target: NaiveDate, today: NaiveDate) -> i64 {
    days_between(today, target)
}

/// Days elapsed since `past`; negative when `past` is still in the future.
pub fn days_since(past: NaiveDate, today: NaiveDate) -> i64 {
    days_between(past, today)
}

/// Inclusive range check on both ends.
pub fn is_within(today: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    start <= today && today <= end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn counts_whole_days_in_both_directions() {
        let today = date(2025, 3, 10);
        assert_eq!(days_until(date(2025, 3, 15), today), 5);
        assert_eq!(days_until(today, today), 0);
        assert_eq!(days_since(date(2025, 2, 28), today), 10);
        assert_eq!(days_since(date(2025, 3, 12), today), -2);
    }

    #[test]
    fn range_check_is_inclusive() {
        let start = date(2025, 3, 1);
        let end = date(2025, 3, 31);
        assert!(is_within(start, start, end));
        assert!(is_within(end, start, end));
        assert!(!is_within(date(2025, 4, 1), start, end));
    }
}
