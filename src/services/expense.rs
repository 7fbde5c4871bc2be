//! Expense service
//!
//! Validates forms, forwards writes to the repository and builds the
//! summary view from a fresh snapshot.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{TrackerError, TrackerResult};
use crate::models::expense::sort_newest_first;
use crate::models::{Expense, ExpenseChanges, ExpenseId, NewExpense, UserId};
use crate::reports::{summarize, ExpenseSummary, RawFilter};
use crate::storage::ExpenseRepository;
use crate::validation::{validate_expense, ExpenseForm, FormMode};

/// Service for expense management
pub struct ExpenseService<'a> {
    repo: &'a dyn ExpenseRepository,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(repo: &'a dyn ExpenseRepository) -> Self {
        Self { repo }
    }

    /// Fetch the user's expenses, newest first
    pub async fn snapshot(&self, user_id: UserId) -> TrackerResult<Vec<Expense>> {
        let mut expenses = self.repo.list_by_user(user_id).await?;
        sort_newest_first(&mut expenses);
        Ok(expenses)
    }

    /// Validate and store a new expense
    pub async fn add(
        &self,
        user_id: UserId,
        form: &ExpenseForm,
        today: NaiveDate,
    ) -> TrackerResult<Expense> {
        let valid = validate_expense(form, FormMode::Create, today)?;
        let created = self
            .repo
            .create(NewExpense {
                user_id,
                name: valid.name,
                amount: valid.amount,
                date: valid.date,
                description: valid.description,
            })
            .await?;

        info!(expense = %created.id, "expense added");
        Ok(created)
    }

    /// Validate and apply an edit
    pub async fn edit(
        &self,
        id: ExpenseId,
        form: &ExpenseForm,
        today: NaiveDate,
    ) -> TrackerResult<ExpenseChanges> {
        let valid = validate_expense(form, FormMode::Edit, today)?;
        let changes = ExpenseChanges {
            name: valid.name,
            amount: valid.amount,
            date: valid.date,
            description: valid.description,
        };
        self.repo.update(id, changes.clone()).await?;

        info!(expense = %id, "expense updated");
        Ok(changes)
    }

    /// Delete an expense
    pub async fn remove(&self, id: ExpenseId) -> TrackerResult<()> {
        self.repo.delete(id).await?;
        info!(expense = %id, "expense deleted");
        Ok(())
    }

    /// Build the summary view for `today`
    pub async fn summary(
        &self,
        user_id: UserId,
        filter: &RawFilter,
        today: NaiveDate,
    ) -> TrackerResult<ExpenseSummary> {
        let snapshot = self.snapshot(user_id).await?;
        let criteria = filter.parse();
        debug!(?criteria, rows = snapshot.len(), "building summary");
        Ok(summarize(&snapshot, &criteria, today))
    }

    /// Find one of the user's expenses by full id or short prefix
    pub async fn find(&self, user_id: UserId, id_prefix: &str) -> TrackerResult<Expense> {
        let mut matches: Vec<Expense> = self
            .snapshot(user_id)
            .await?
            .into_iter()
            .filter(|e| e.id.matches(id_prefix))
            .collect();

        match matches.len() {
            0 => Err(TrackerError::expense_not_found(id_prefix)),
            1 => Ok(matches.remove(0)),
            n => Err(TrackerError::Validation(format!(
                "'{}' matches {} expenses; use more characters",
                id_prefix, n
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::storage::InMemoryExpenseRepository;
    use crate::validation::Field;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn form(name: &str, amount: &str, date: Option<&str>) -> ExpenseForm {
        ExpenseForm {
            name: name.into(),
            amount: amount.into(),
            date: date.map(String::from),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_add_then_snapshot() {
        let repo = InMemoryExpenseRepository::new();
        let service = ExpenseService::new(&repo);
        let user = UserId::new();
        let today = ymd(2024, 5, 20);

        service
            .add(user, &form("Coffee", "4,50", None), today)
            .await
            .unwrap();
        service
            .add(user, &form("Books", "32.00", Some("02/05/2024")), today)
            .await
            .unwrap();

        let snapshot = service.snapshot(user).await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].name, "Coffee");
        assert_eq!(snapshot[0].date, today);
        assert_eq!(snapshot[0].amount, Money::from_cents(450));
        assert_eq!(snapshot[1].date, ymd(2024, 5, 2));
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_form() {
        let repo = InMemoryExpenseRepository::new();
        let service = ExpenseService::new(&repo);

        let err = service
            .add(UserId::new(), &form("ab", "0", Some("2099-01-01")), ymd(2024, 5, 20))
            .await
            .unwrap_err();
        match err {
            TrackerError::InvalidForm(errors) => {
                assert!(errors.has(Field::Name));
                assert!(errors.has(Field::Amount));
                assert!(errors.has(Field::Date));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_edit_requires_strict_date() {
        let repo = InMemoryExpenseRepository::new();
        let service = ExpenseService::new(&repo);
        let user = UserId::new();
        let today = ymd(2024, 5, 20);
        let created = service
            .add(user, &form("Coffee", "4.50", None), today)
            .await
            .unwrap();

        let err = service
            .edit(created.id, &form("Coffee", "5", Some("20/05/2024")), today)
            .await
            .unwrap_err();
        assert!(err.is_validation());

        service
            .edit(created.id, &form("Espresso", "5", Some("2024-05-19")), today)
            .await
            .unwrap();
        let stored = repo.get(created.id).unwrap().unwrap();
        assert_eq!(stored.name, "Espresso");
        assert_eq!(stored.date, ymd(2024, 5, 19));
    }

    #[tokio::test]
    async fn test_remove() {
        let repo = InMemoryExpenseRepository::new();
        let service = ExpenseService::new(&repo);
        let created = service
            .add(UserId::new(), &form("Coffee", "4.50", None), ymd(2024, 5, 20))
            .await
            .unwrap();

        service.remove(created.id).await.unwrap();
        assert!(service.remove(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_summary_defaults_to_current_month() {
        let user = UserId::new();
        let repo = InMemoryExpenseRepository::with_expenses(vec![
            Expense::new(user, "Rent", Money::from_cents(90000), ymd(2024, 4, 1)),
            Expense::new(user, "Market", Money::from_cents(5000), ymd(2024, 5, 3)),
        ]);
        let service = ExpenseService::new(&repo);
        let today = ymd(2024, 5, 20);

        let summary = service
            .summary(user, &RawFilter::default(), today)
            .await
            .unwrap();
        assert!(!summary.filtered);
        assert_eq!(summary.shown_total, Money::from_cents(5000));

        let filter = RawFilter {
            min_amount: Some("100".into()),
            ..RawFilter::default()
        };
        let summary = service.summary(user, &filter, today).await.unwrap();
        assert!(summary.filtered);
        assert_eq!(summary.shown.len(), 1);
        assert_eq!(summary.shown[0].name, "Rent");
        assert_eq!(summary.month.total, Money::from_cents(5000));
    }

    #[tokio::test]
    async fn test_find_by_prefix() {
        let user = UserId::new();
        let expense = Expense::new(user, "Rent", Money::from_cents(90000), ymd(2024, 4, 1));
        let short = expense.id.short();
        let repo = InMemoryExpenseRepository::with_expenses(vec![expense.clone()]);
        let service = ExpenseService::new(&repo);

        assert_eq!(service.find(user, &short).await.unwrap(), expense);
        assert!(service.find(user, "exp-zzzz").await.unwrap_err().is_not_found());
        assert!(service
            .find(UserId::new(), &short)
            .await
            .unwrap_err()
            .is_not_found());
    }
}
