//! Urgency classification for inbound packages.
//!
//! The tier is a pure function of the expected-arrival date and the current
//! date. It is recomputed on every read and never read back from the store,
//! since the elapsed business-day count changes daily.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, Weekday};

/// Urgency tier derived from how long a package has been sitting past its
/// expected arrival, counted in business days.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusTier {
    Ok,
    Warning,
    Critical,
}

impl StatusTier {
    pub fn label(&self) -> &'static str {
        match self {
            StatusTier::Ok => "OK",
            StatusTier::Warning => "WARNING",
            StatusTier::Critical => "CRITICAL",
        }
    }

    /// Case-insensitive parse, used by the tier filter dropdown.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "OK" => Some(StatusTier::Ok),
            "WARNING" => Some(StatusTier::Warning),
            "CRITICAL" => Some(StatusTier::Critical),
            _ => None,
        }
    }
}

/// Counts Monday–Friday days from `expected` through `today`, both endpoints
/// inclusive. An expected date in the future yields 0.
pub fn business_days_elapsed(expected: Date, today: Date) -> u32 {
    let mut count = 0;
    let mut day = expected;
    while day <= today {
        if !matches!(day.weekday(), Weekday::Saturday | Weekday::Sunday) {
            count += 1;
        }
        day = match day.next_day() {
            Some(next) => next,
            None => break,
        };
    }
    count
}

/// Maps the elapsed business-day count onto a tier: up to 3 days is fine,
/// 4–5 warrants a nudge, 6 or more is overdue.
pub fn classify(expected: Date, today: Date) -> StatusTier {
    match business_days_elapsed(expected, today) {
        0..=3 => StatusTier::Ok,
        4..=5 => StatusTier::Warning,
        _ => StatusTier::Critical,
    }
}

/// The machine-local calendar date, falling back to UTC when the local
/// offset cannot be determined.
pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    // 2025-06-02 is a Monday.

    #[test]
    fn same_weekday_counts_one_business_day() {
        assert_eq!(
            business_days_elapsed(date!(2025 - 06 - 02), date!(2025 - 06 - 02)),
            1
        );
    }

    #[test]
    fn future_expected_date_counts_zero() {
        assert_eq!(
            business_days_elapsed(date!(2025 - 06 - 10), date!(2025 - 06 - 09)),
            0
        );
        assert_eq!(
            classify(date!(2025 - 06 - 10), date!(2025 - 06 - 09)),
            StatusTier::Ok
        );
    }

    #[test]
    fn weekend_endpoints_do_not_count() {
        // Saturday through Sunday: no business days at all.
        assert_eq!(
            business_days_elapsed(date!(2025 - 06 - 07), date!(2025 - 06 - 08)),
            0
        );
        // Saturday through the following Monday: only the Monday counts.
        assert_eq!(
            business_days_elapsed(date!(2025 - 06 - 07), date!(2025 - 06 - 09)),
            1
        );
    }

    #[test]
    fn tier_boundaries() {
        let expected = date!(2025 - 06 - 02); // Monday
        assert_eq!(classify(expected, date!(2025 - 06 - 04)), StatusTier::Ok); // 3 days
        assert_eq!(
            classify(expected, date!(2025 - 06 - 05)),
            StatusTier::Warning
        ); // 4 days
        assert_eq!(
            classify(expected, date!(2025 - 06 - 06)),
            StatusTier::Warning
        ); // 5 days
        assert_eq!(
            classify(expected, date!(2025 - 06 - 09)),
            StatusTier::Critical
        ); // 6 days
    }

    #[test]
    fn golden_monday_to_following_monday() {
        // One full week later: five weekdays of the first week plus the
        // second Monday, with the weekend skipped.
        let expected = date!(2025 - 06 - 02);
        let today = date!(2025 - 06 - 09);
        assert_eq!(business_days_elapsed(expected, today), 6);
        assert_eq!(classify(expected, today), StatusTier::Critical);
    }

    #[test]
    fn count_is_monotonic_as_expected_moves_earlier() {
        let today = date!(2025 - 06 - 20);
        let mut previous = business_days_elapsed(date!(2025 - 06 - 20), today);
        let mut day = date!(2025 - 06 - 19);
        while day >= date!(2025 - 05 - 01) {
            let count = business_days_elapsed(day, today);
            assert!(
                count >= previous,
                "count shrank moving expected date back to {day}"
            );
            previous = count;
            day = day.previous_day().expect("valid calendar date");
        }
    }

    #[test]
    fn tier_parse_is_case_insensitive() {
        assert_eq!(StatusTier::parse("critical"), Some(StatusTier::Critical));
        assert_eq!(StatusTier::parse(" Warning "), Some(StatusTier::Warning));
        assert_eq!(StatusTier::parse(""), None);
        assert_eq!(StatusTier::parse("unknown"), None);
    }
}
