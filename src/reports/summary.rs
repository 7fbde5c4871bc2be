//! Summary screen composition
//!
//! The summary always shows the month-to-date total. The list beneath it is
//! the current month when no filter is active, or the filtered full snapshot
//! otherwise.

use chrono::NaiveDate;

use super::filter::{filter_expenses, FilterCriteria};
use super::monthly::{month_to_date, MonthAggregate};
use crate::models::{Expense, Money};

/// What the summary screen displays
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSummary {
    /// Current-month subset and total
    pub month: MonthAggregate,
    /// Rows to list
    pub shown: Vec<Expense>,
    /// Sum of `shown`
    pub shown_total: Money,
    /// Whether `shown` came from an active filter
    pub filtered: bool,
}

/// Build the summary for a snapshot already sorted newest first
pub fn summarize(
    snapshot: &[Expense],
    criteria: &FilterCriteria,
    today: NaiveDate,
) -> ExpenseSummary {
    let month = month_to_date(snapshot, today);

    if criteria.is_empty() {
        return ExpenseSummary {
            shown: month.expenses.clone(),
            shown_total: month.total,
            filtered: false,
            month,
        };
    }

    let result = filter_expenses(snapshot, criteria);
    ExpenseSummary {
        month,
        shown: result.expenses,
        shown_total: result.total,
        filtered: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn snapshot() -> Vec<Expense> {
        let user = UserId::new();
        vec![
            Expense::new(user, "Taxi", Money::from_cents(2000), ymd(2024, 5, 31)),
            Expense::new(user, "Market", Money::from_cents(1000), ymd(2024, 5, 1)),
            Expense::new(user, "Taxi", Money::from_cents(700), ymd(2024, 4, 12)),
        ]
    }

    #[test]
    fn test_no_filter_shows_current_month() {
        let summary = summarize(&snapshot(), &FilterCriteria::new(), ymd(2024, 5, 15));
        assert!(!summary.filtered);
        assert_eq!(summary.shown.len(), 2);
        assert_eq!(summary.shown_total, Money::from_cents(3000));
        assert_eq!(summary.month.total, Money::from_cents(3000));
    }

    #[test]
    fn test_filter_searches_whole_snapshot() {
        let summary = summarize(
            &snapshot(),
            &FilterCriteria::new().name("taxi"),
            ymd(2024, 5, 15),
        );
        assert!(summary.filtered);
        assert_eq!(summary.shown.len(), 2);
        assert_eq!(summary.shown_total, Money::from_cents(2700));
        // Month total is unaffected by the filter
        assert_eq!(summary.month.total, Money::from_cents(3000));
    }

    #[test]
    fn test_empty_snapshot() {
        let summary = summarize(&[], &FilterCriteria::new(), ymd(2024, 5, 15));
        assert!(summary.shown.is_empty());
        assert_eq!(summary.shown_total, Money::zero());
    }
}
