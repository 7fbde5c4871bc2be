//! Storage seams for the expense tracker
//!
//! Expenses and profiles live on the backend. Services talk to them through
//! the [`ExpenseRepository`] and [`ProfileRepository`] traits so the HTTP
//! client and the in-memory fakes are interchangeable. The only data kept
//! on local disk is the settings file and the persisted session.

pub mod file_io;
pub mod memory;
pub mod session;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TrackerResult;
use crate::models::{Expense, ExpenseChanges, ExpenseId, NewExpense, ProfileRow, Session, UserId};

pub use file_io::{read_json_optional, read_json_required, write_json_atomic};
pub use memory::{InMemoryExpenseRepository, InMemoryProfileRepository, InMemoryRepositories};
pub use session::SessionStore;

/// Access to the `expenses` table
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// All expenses owned by `user_id`, newest first
    async fn list_by_user(&self, user_id: UserId) -> TrackerResult<Vec<Expense>>;

    /// Insert a new expense and return the stored row
    async fn create(&self, expense: NewExpense) -> TrackerResult<Expense>;

    /// Overwrite name, amount, date and description of an expense
    async fn update(&self, id: ExpenseId, changes: ExpenseChanges) -> TrackerResult<()>;

    /// Remove an expense
    async fn delete(&self, id: ExpenseId) -> TrackerResult<()>;
}

/// Access to the `profiles` table
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// The profile row for `user_id`, if one exists
    async fn get(&self, user_id: UserId) -> TrackerResult<Option<ProfileRow>>;

    /// Insert or update the display name for `user_id`
    async fn upsert(&self, user_id: UserId, full_name: &str) -> TrackerResult<ProfileRow>;
}

/// Opens repositories acting on behalf of a signed-in session
pub trait RepositoryProvider: Send + Sync {
    fn expenses(&self, session: &Session) -> Arc<dyn ExpenseRepository>;
    fn profiles(&self, session: &Session) -> Arc<dyn ProfileRepository>;
}
