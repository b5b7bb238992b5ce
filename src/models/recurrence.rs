//! Recurring transaction rules
//!
//! A rule describes how often a standing order repeats and when it stops.
//! Occurrence dates are always computed from the original start date, so a
//! series starting on the 31st lands on the last day of short months and
//! returns to the 31st afterwards.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

/// Occurrence cap applied when a rule has neither an end date nor a count
pub const DEFAULT_RECURRENCE_CAP: u32 = 120;

/// How often a recurring transaction repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Monthly,
    Yearly,
}

impl Frequency {
    fn months_per_step(&self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Yearly => 12,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "Monthly"),
            Self::Yearly => write!(f, "Yearly"),
        }
    }
}

impl FromStr for Frequency {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" | "m" => Ok(Self::Monthly),
            "yearly" | "year" | "annual" | "y" => Ok(Self::Yearly),
            other => Err(LedgerError::validation(format!(
                "Unknown frequency '{}', expected monthly or yearly",
                other
            ))),
        }
    }
}

/// Repetition rule for a standing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// Last allowed occurrence date (inclusive)
    pub until: Option<NaiveDate>,
    /// Maximum number of occurrences after the start date
    pub count: Option<u32>,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            until: None,
            count: None,
        }
    }

    pub fn monthly() -> Self {
        Self::new(Frequency::Monthly)
    }

    pub fn yearly() -> Self {
        Self::new(Frequency::Yearly)
    }

    pub fn until(mut self, date: NaiveDate) -> Self {
        self.until = Some(date);
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Whether the rule carries an explicit end
    pub fn is_bounded(&self) -> bool {
        self.until.is_some() || self.count.is_some()
    }

    /// Lazily yield the occurrence dates following `start`
    ///
    /// `cap` only applies to unbounded rules.
    pub fn occurrences_after(&self, start: NaiveDate, cap: u32) -> Occurrences {
        let limit = match (self.count, self.is_bounded()) {
            (Some(count), _) => Some(count),
            (None, false) => Some(cap),
            (None, true) => None,
        };
        Occurrences {
            start,
            step: self.frequency.months_per_step(),
            until: self.until,
            limit,
            next_index: 1,
            done: false,
        }
    }
}

/// Iterator over the occurrence dates of a [`RecurrenceRule`]
#[derive(Debug, Clone)]
pub struct Occurrences {
    start: NaiveDate,
    step: u32,
    until: Option<NaiveDate>,
    limit: Option<u32>,
    next_index: u32,
    done: bool,
}

impl Iterator for Occurrences {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.done {
            return None;
        }
        if self.limit.is_some_and(|limit| self.next_index > limit) {
            self.done = true;
            return None;
        }

        let date = self
            .next_index
            .checked_mul(self.step)
            .and_then(|months| self.start.checked_add_months(Months::new(months)));
        let Some(date) = date else {
            self.done = true;
            return None;
        };
        if self.until.is_some_and(|until| date > until) {
            self.done = true;
            return None;
        }

        self.next_index += 1;
        Some(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_unbounded_rule_stops_at_cap() {
        let rule = RecurrenceRule::monthly();
        let dates: Vec<_> = rule.occurrences_after(date(2025, 1, 1), 120).collect();
        assert_eq!(dates.len(), 120);
        assert_eq!(dates[0], date(2025, 2, 1));
        assert_eq!(dates[119], date(2035, 1, 1));
    }

    #[test]
    fn test_count_wins_over_cap() {
        let rule = RecurrenceRule::monthly().count(3);
        let dates: Vec<_> = rule.occurrences_after(date(2025, 1, 10), 2).collect();
        assert_eq!(
            dates,
            vec![date(2025, 2, 10), date(2025, 3, 10), date(2025, 4, 10)]
        );
    }

    #[test]
    fn test_zero_count_yields_nothing() {
        let rule = RecurrenceRule::yearly().count(0);
        assert_eq!(rule.occurrences_after(date(2025, 1, 1), 120).count(), 0);
    }

    #[test]
    fn test_until_is_inclusive() {
        let rule = RecurrenceRule::monthly().until(date(2025, 4, 15));
        let dates: Vec<_> = rule.occurrences_after(date(2025, 1, 15), 120).collect();
        assert_eq!(
            dates,
            vec![date(2025, 2, 15), date(2025, 3, 15), date(2025, 4, 15)]
        );
    }

    #[test]
    fn test_until_and_count_whichever_first() {
        let rule = RecurrenceRule::monthly().until(date(2025, 12, 31)).count(2);
        assert_eq!(rule.occurrences_after(date(2025, 1, 1), 120).count(), 2);

        let rule = RecurrenceRule::monthly().until(date(2025, 3, 1)).count(10);
        assert_eq!(rule.occurrences_after(date(2025, 1, 1), 120).count(), 2);
    }

    #[test]
    fn test_month_end_clamps_without_drift() {
        let rule = RecurrenceRule::monthly().count(3);
        let dates: Vec<_> = rule.occurrences_after(date(2024, 1, 31), 120).collect();
        assert_eq!(
            dates,
            vec![date(2024, 2, 29), date(2024, 3, 31), date(2024, 4, 30)]
        );
    }

    #[test]
    fn test_yearly_leap_day() {
        let rule = RecurrenceRule::yearly().count(4);
        let dates: Vec<_> = rule.occurrences_after(date(2024, 2, 29), 120).collect();
        assert_eq!(
            dates,
            vec![
                date(2025, 2, 28),
                date(2026, 2, 28),
                date(2027, 2, 28),
                date(2028, 2, 29)
            ]
        );
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!("monthly".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert_eq!("Yearly".parse::<Frequency>().unwrap(), Frequency::Yearly);
        assert!("weekly".parse::<Frequency>().is_err());
    }
}
