//! Expense model
//!
//! An expense is a single spending event owned by one user. The backend owns
//! the authoritative row; the client only holds snapshots.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::date;
use super::ids::{ExpenseId, UserId};
use super::money::{self, Money};

/// A spending record as stored in the `expenses` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Owner of the expense
    pub user_id: UserId,

    /// Display label
    pub name: String,

    /// Amount spent (always positive)
    #[serde(with = "money::decimal")]
    pub amount: Money,

    /// Day the money was spent
    #[serde(with = "date::stored")]
    pub date: NaiveDate,

    /// Optional free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// When the row was created on the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Expense {
    /// Build an expense locally (used by the in-memory repository and tests)
    pub fn new(user_id: UserId, name: impl Into<String>, amount: Money, date: NaiveDate) -> Self {
        Self {
            id: ExpenseId::new(),
            user_id,
            name: name.into(),
            amount,
            date,
            description: None,
            created_at: Some(Utc::now()),
        }
    }

    /// Check whether the expense falls in the given calendar month
    pub fn is_in_month(&self, year: i32, month: u32) -> bool {
        use chrono::Datelike;
        self.date.year() == year && self.date.month() == month
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.name,
            self.amount
        )
    }
}

/// Payload for inserting a new expense
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExpense {
    pub user_id: UserId,
    pub name: String,
    #[serde(with = "money::decimal")]
    pub amount: Money,
    #[serde(with = "date::stored")]
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for updating an existing expense
///
/// Name, amount and date are always sent together, matching the edit form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseChanges {
    pub name: String,
    #[serde(with = "money::decimal")]
    pub amount: Money,
    #[serde(with = "date::stored")]
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl ExpenseChanges {
    /// Apply these changes to a local copy of an expense
    pub fn apply_to(&self, expense: &mut Expense) {
        expense.name = self.name.clone();
        expense.amount = self.amount;
        expense.date = self.date;
        expense.description = self.description.clone();
    }
}

/// Sort a snapshot newest first, the order every screen shows
pub fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}
