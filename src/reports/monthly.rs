//! Month-to-date aggregation
//!
//! Selects the expenses in the reference date's calendar month. The
//! reference date is always passed in; nothing here reads the clock.

use chrono::{Datelike, NaiveDate};

use crate::models::{Expense, Money};

/// Expenses of one calendar month and their sum
#[derive(Debug, Clone, PartialEq)]
pub struct MonthAggregate {
    pub year: i32,
    pub month: u32,
    pub expenses: Vec<Expense>,
    pub total: Money,
}

impl MonthAggregate {
    /// Label such as "May 2024"
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| format!("{}-{:02}", self.year, self.month))
    }
}

/// Expenses whose calendar month and year equal `reference`'s
pub fn month_to_date(expenses: &[Expense], reference: NaiveDate) -> MonthAggregate {
    let (year, month) = (reference.year(), reference.month());
    let in_month: Vec<Expense> = expenses
        .iter()
        .filter(|e| e.is_in_month(year, month))
        .cloned()
        .collect();
    let total = in_month.iter().map(|e| e.amount).sum();

    MonthAggregate {
        year,
        month,
        expenses: in_month,
        total,
    }
}
