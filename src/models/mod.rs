//! Core data models for the expense tracker
//!
//! This module contains the data structures exchanged with the backend:
//! expenses, profiles and sessions, plus the money and date value types.

pub mod date;
pub mod expense;
pub mod ids;
pub mod money;
pub mod profile;
pub mod session;

pub use expense::{Expense, ExpenseChanges, NewExpense};
pub use ids::{ExpenseId, UserId};
pub use money::Money;
pub use profile::{Profile, ProfileRow, ProfileUpsert};
pub use session::{Session, SessionUser, UserMetadata};
