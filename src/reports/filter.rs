//! Expense filter engine
//!
//! Applies a [`FilterCriteria`] to a snapshot of expenses. All constraints
//! are combined with AND; absent constraints do not filter anything. The
//! engine knows nothing about default scopes such as "current month", see
//! [`super::summary`] for that policy.

use chrono::NaiveDate;

use crate::models::{Expense, Money};

/// Optional constraints applied to a snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the expense name
    pub name_pattern: Option<String>,
    /// Inclusive lower amount bound
    pub min_amount: Option<Money>,
    /// Inclusive upper amount bound
    pub max_amount: Option<Money>,
    /// Inclusive first day
    pub start_date: Option<NaiveDate>,
    /// Inclusive last day (the whole day is covered)
    pub end_date: Option<NaiveDate>,
}

impl FilterCriteria {
    /// Create an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by name substring
    pub fn name(mut self, pattern: impl Into<String>) -> Self {
        self.name_pattern = Some(pattern.into());
        self
    }

    /// Filter by minimum amount
    pub fn min_amount(mut self, amount: Money) -> Self {
        self.min_amount = Some(amount);
        self
    }

    /// Filter by maximum amount
    pub fn max_amount(mut self, amount: Money) -> Self {
        self.max_amount = Some(amount);
        self
    }

    /// Filter by first day
    pub fn from_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Filter by last day
    pub fn to_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// True when no constraint is active
    pub fn is_empty(&self) -> bool {
        self.name_pattern.is_none()
            && self.min_amount.is_none()
            && self.max_amount.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    /// Check a single expense against every active constraint
    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(pattern) = &self.name_pattern {
            if !expense
                .name
                .to_lowercase()
                .contains(&pattern.to_lowercase())
            {
                return false;
            }
        }
        if let Some(min) = self.min_amount {
            if expense.amount < min {
                return false;
            }
        }
        if let Some(max) = self.max_amount {
            if expense.amount > max {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if expense.date < start {
                return false;
            }
        }
        // Dates carry no time of day, so `<=` covers the entire end day
        if let Some(end) = self.end_date {
            if expense.date > end {
                return false;
            }
        }
        true
    }
}

/// Filter values as typed by the user
///
/// Parsing is lenient: blank or unparsable values become "no constraint"
/// and never produce an error.
#[derive(Debug, Clone, Default)]
pub struct RawFilter {
    pub name: Option<String>,
    pub min_amount: Option<String>,
    pub max_amount: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl RawFilter {
    /// Convert to typed criteria, dropping anything that does not parse
    pub fn parse(&self) -> FilterCriteria {
        FilterCriteria {
            name_pattern: self
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(String::from),
            min_amount: self
                .min_amount
                .as_deref()
                .and_then(|raw| Money::parse_ceil(raw).ok()),
            max_amount: self
                .max_amount
                .as_deref()
                .and_then(|raw| Money::parse_floor(raw).ok()),
            start_date: self.start_date.as_deref().and_then(parse_date),
            end_date: self.end_date.as_deref().and_then(parse_date),
        }
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .ok()
}

/// Filtered subset of a snapshot and its sum
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterResult {
    pub expenses: Vec<Expense>,
    pub total: Money,
}

/// Keep the expenses matching every active constraint, in input order
pub fn filter_expenses(expenses: &[Expense], criteria: &FilterCriteria) -> FilterResult {
    let matched: Vec<Expense> = expenses
        .iter()
        .filter(|e| criteria.matches(e))
        .cloned()
        .collect();
    let total = matched.iter().map(|e| e.amount).sum();

    FilterResult {
        expenses: matched,
        total,
    }
}
