//! Expense table client

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;
use zeroize::Zeroizing;

use super::client::BackendClient;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Expense, ExpenseChanges, ExpenseId, NewExpense, UserId};
use crate::storage::ExpenseRepository;

const TABLE: &str = "/rest/v1/expenses";

/// Expense repository over the table API, acting as one signed-in user
///
/// Row-level security on the backend limits every call to the token's
/// owner, so an id belonging to someone else looks the same as a missing
/// one.
pub struct RemoteExpenseRepository {
    client: BackendClient,
    access_token: Zeroizing<String>,
}

impl RemoteExpenseRepository {
    pub fn new(client: BackendClient, access_token: &str) -> Self {
        Self {
            client,
            access_token: Zeroizing::new(access_token.to_string()),
        }
    }

    fn request(&self, method: Method) -> reqwest::RequestBuilder {
        self.client
            .request(method, TABLE, Some(self.access_token.as_str()))
    }
}

#[async_trait]
impl ExpenseRepository for RemoteExpenseRepository {
    async fn list_by_user(&self, user_id: UserId) -> TrackerResult<Vec<Expense>> {
        let request = self.request(Method::GET).query(&[
            ("user_id", format!("eq.{}", user_id)),
            ("order", "date.desc".to_string()),
            ("select", "*".to_string()),
        ]);
        let expenses: Vec<Expense> = self.client.send_json(request).await?;
        debug!(count = expenses.len(), "fetched expenses");
        Ok(expenses)
    }

    async fn create(&self, expense: NewExpense) -> TrackerResult<Expense> {
        let request = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(&expense);
        let rows: Vec<Expense> = self.client.send_json(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| TrackerError::Json("Backend returned no row for the new expense".into()))
    }

    async fn update(&self, id: ExpenseId, changes: ExpenseChanges) -> TrackerResult<()> {
        let request = self
            .request(Method::PATCH)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(&changes);
        let rows: Vec<Expense> = self.client.send_json(request).await?;
        if rows.is_empty() {
            return Err(TrackerError::expense_not_found(id.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: ExpenseId) -> TrackerResult<()> {
        let request = self
            .request(Method::DELETE)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation");
        let rows: Vec<Expense> = self.client.send_json(request).await?;
        if rows.is_empty() {
            return Err(TrackerError::expense_not_found(id.to_string()));
        }
        Ok(())
    }
}
