//! In-memory repositories
//!
//! Used by service tests and anywhere a backend is not wanted. State is
//! guarded by `RwLock` so the repositories are `Send + Sync` like the
//! remote ones.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use super::{ExpenseRepository, ProfileRepository, RepositoryProvider};
use crate::error::{TrackerError, TrackerResult};
use crate::models::expense::sort_newest_first;
use crate::models::{
    Expense, ExpenseChanges, ExpenseId, NewExpense, ProfileRow, Session, UserId,
};

fn lock_error<E: std::fmt::Display>(e: E) -> TrackerError {
    TrackerError::Storage(format!("Failed to acquire lock: {}", e))
}

/// Expense repository backed by a map
#[derive(Default)]
pub struct InMemoryExpenseRepository {
    data: RwLock<HashMap<ExpenseId, Expense>>,
}

impl InMemoryExpenseRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the given expenses
    pub fn with_expenses(expenses: impl IntoIterator<Item = Expense>) -> Self {
        let data = expenses.into_iter().map(|e| (e.id, e)).collect();
        Self {
            data: RwLock::new(data),
        }
    }

    /// Look up a stored expense directly
    pub fn get(&self, id: ExpenseId) -> TrackerResult<Option<Expense>> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Number of stored expenses across all users
    pub fn count(&self) -> TrackerResult<usize> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}

#[async_trait]
impl ExpenseRepository for InMemoryExpenseRepository {
    async fn list_by_user(&self, user_id: UserId) -> TrackerResult<Vec<Expense>> {
        let data = self.data.read().map_err(lock_error)?;
        let mut expenses: Vec<Expense> = data
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        sort_newest_first(&mut expenses);
        Ok(expenses)
    }

    async fn create(&self, expense: NewExpense) -> TrackerResult<Expense> {
        let stored = Expense {
            id: ExpenseId::new(),
            user_id: expense.user_id,
            name: expense.name,
            amount: expense.amount,
            date: expense.date,
            description: expense.description,
            created_at: Some(Utc::now()),
        };

        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: ExpenseId, changes: ExpenseChanges) -> TrackerResult<()> {
        let mut data = self.data.write().map_err(lock_error)?;
        let expense = data
            .get_mut(&id)
            .ok_or_else(|| TrackerError::expense_not_found(id.to_string()))?;
        changes.apply_to(expense);
        Ok(())
    }

    async fn delete(&self, id: ExpenseId) -> TrackerResult<()> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.remove(&id)
            .map(|_| ())
            .ok_or_else(|| TrackerError::expense_not_found(id.to_string()))
    }
}

/// Profile repository backed by a map
#[derive(Default)]
pub struct InMemoryProfileRepository {
    data: RwLock<HashMap<UserId, ProfileRow>>,
}

impl InMemoryProfileRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn get(&self, user_id: UserId) -> TrackerResult<Option<ProfileRow>> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&user_id).cloned())
    }

    async fn upsert(&self, user_id: UserId, full_name: &str) -> TrackerResult<ProfileRow> {
        let mut data = self.data.write().map_err(lock_error)?;
        let row = data.entry(user_id).or_insert_with(|| ProfileRow {
            id: Some(user_id),
            full_name: None,
            created_at: Some(Utc::now()),
        });
        row.full_name = Some(full_name.to_string());
        Ok(row.clone())
    }
}

/// Shared in-memory repositories handed out for every session
#[derive(Clone, Default)]
pub struct InMemoryRepositories {
    pub expenses: Arc<InMemoryExpenseRepository>,
    pub profiles: Arc<InMemoryProfileRepository>,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositories {
    fn expenses(&self, _session: &Session) -> Arc<dyn ExpenseRepository> {
        self.expenses.clone()
    }

    fn profiles(&self, _session: &Session) -> Arc<dyn ProfileRepository> {
        self.profiles.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_expense(user_id: UserId, name: &str, date: NaiveDate) -> NewExpense {
        NewExpense {
            user_id,
            name: name.to_string(),
            amount: Money::from_cents(1250),
            date,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_newest_first() {
        let repo = InMemoryExpenseRepository::new();
        let user = UserId::new();

        repo.create(new_expense(user, "Older", ymd(2024, 5, 1)))
            .await
            .unwrap();
        repo.create(new_expense(user, "Newer", ymd(2024, 5, 20)))
            .await
            .unwrap();
        repo.create(new_expense(UserId::new(), "Someone else", ymd(2024, 5, 10)))
            .await
            .unwrap();

        let list = repo.list_by_user(user).await.unwrap();
        let names: Vec<_> = list.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Newer", "Older"]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = InMemoryExpenseRepository::new();
        let user = UserId::new();
        let created = repo
            .create(new_expense(user, "Lunch", ymd(2024, 5, 1)))
            .await
            .unwrap();

        repo.update(
            created.id,
            ExpenseChanges {
                name: "Dinner".into(),
                amount: Money::from_cents(3000),
                date: ymd(2024, 5, 2),
                description: Some("with friends".into()),
            },
        )
        .await
        .unwrap();

        let stored = repo.get(created.id).unwrap().unwrap();
        assert_eq!(stored.name, "Dinner");
        assert_eq!(stored.amount, Money::from_cents(3000));
        assert_eq!(stored.description.as_deref(), Some("with friends"));

        repo.delete(created.id).await.unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_expense_is_not_found() {
        let repo = InMemoryExpenseRepository::new();
        let err = repo.delete(ExpenseId::new()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_profile_upsert_inserts_then_updates() {
        let repo = InMemoryProfileRepository::new();
        let user = UserId::new();
        assert!(repo.get(user).await.unwrap().is_none());

        repo.upsert(user, "Ana Souza").await.unwrap();
        let row = repo.upsert(user, "Ana Lima").await.unwrap();
        assert_eq!(row.full_name.as_deref(), Some("Ana Lima"));
        assert_eq!(
            repo.get(user).await.unwrap().unwrap().full_name.as_deref(),
            Some("Ana Lima")
        );
    }
}
