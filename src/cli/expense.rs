//! Expense CLI commands

use clap::Subcommand;

use super::{today, AppContext};
use crate::display::{format_expense_details, format_expense_table};
use crate::error::TrackerResult;
use crate::models::{Expense, Money};
use crate::services::ExpenseService;
use crate::storage::RepositoryProvider;
use crate::validation::ExpenseForm;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add a new expense
    Add {
        /// What the money was spent on
        name: String,
        /// Amount, e.g. "12.50" or "12,50"
        amount: String,
        /// Date (YYYY-MM-DD or DD/MM/YYYY), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Notes
        #[arg(long)]
        description: Option<String>,
    },
    /// List recent expenses
    List {
        /// Number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show expense details
    Show {
        /// Expense ID (full or short form)
        id: String,
    },
    /// Edit an expense
    Edit {
        /// Expense ID (full or short form)
        id: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New notes (empty to clear)
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID (full or short form)
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle an expense command
pub async fn handle_expense_command(ctx: &AppContext, cmd: ExpenseCommands) -> TrackerResult<()> {
    let (backend, session) = ctx.require_session().await?;
    let repo = backend.repositories.expenses(&session);
    let service = ExpenseService::new(repo.as_ref());
    let user_id = session.user_id();
    let settings = &ctx.settings;

    match cmd {
        ExpenseCommands::Add {
            name,
            amount,
            date,
            description,
        } => {
            let form = ExpenseForm {
                name,
                amount,
                date,
                description,
            };
            let expense = service.add(user_id, &form, today()).await?;
            println!("Added expense:");
            print!("{}", format_expense_details(&expense, settings));
        }

        ExpenseCommands::List { limit } => {
            let expenses = service.snapshot(user_id).await?;
            let limit = limit.unwrap_or(settings.list_limit);
            let shown: Vec<Expense> = expenses.iter().take(limit).cloned().collect();

            print!("{}", format_expense_table(&shown, settings));
            if !expenses.is_empty() {
                println!("\nShowing {} of {} expenses", shown.len(), expenses.len());
            }
        }

        ExpenseCommands::Show { id } => {
            let expense = service.find(user_id, &id).await?;
            print!("{}", format_expense_details(&expense, settings));
        }

        ExpenseCommands::Edit {
            id,
            name,
            amount,
            date,
            description,
        } => {
            if name.is_none() && amount.is_none() && date.is_none() && description.is_none() {
                println!("Nothing to change. Pass --name, --amount, --date or --description.");
                return Ok(());
            }

            let existing = service.find(user_id, &id).await?;
            let form = edit_form(&existing, name, amount, date, description);
            let changes = service.edit(existing.id, &form, today()).await?;

            let mut updated = existing;
            changes.apply_to(&mut updated);
            println!("Updated expense:");
            print!("{}", format_expense_details(&updated, settings));
        }

        ExpenseCommands::Delete { id, force } => {
            let expense = service.find(user_id, &id).await?;

            if !force {
                println!("About to delete expense:");
                print!("{}", format_expense_details(&expense, settings));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            service.remove(expense.id).await?;
            println!("Deleted expense {} ({})", expense.id.short(), expense.name);
        }
    }

    Ok(())
}

/// Fill the edit form from the stored expense, overriding given fields
fn edit_form(
    existing: &Expense,
    name: Option<String>,
    amount: Option<String>,
    date: Option<String>,
    description: Option<String>,
) -> ExpenseForm {
    ExpenseForm {
        name: name.unwrap_or_else(|| existing.name.clone()),
        amount: amount.unwrap_or_else(|| plain_amount(existing.amount)),
        date: Some(date.unwrap_or_else(|| existing.date.format("%Y-%m-%d").to_string())),
        description: description.or_else(|| existing.description.clone()),
    }
}

/// Amount as form text without symbol or grouping
fn plain_amount(amount: Money) -> String {
    format!("{}.{:02}", amount.dollars(), amount.cents_part())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;
    use chrono::NaiveDate;

    fn stored() -> Expense {
        let mut expense = Expense::new(
            UserId::new(),
            "Groceries",
            Money::from_cents(123405),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        );
        expense.description = Some("weekly".into());
        expense
    }

    #[test]
    fn test_edit_form_keeps_unchanged_fields() {
        let form = edit_form(&stored(), None, Some("10".into()), None, None);
        assert_eq!(form.name, "Groceries");
        assert_eq!(form.amount, "10");
        assert_eq!(form.date.as_deref(), Some("2024-05-01"));
        assert_eq!(form.description.as_deref(), Some("weekly"));
    }

    #[test]
    fn test_edit_form_can_clear_description() {
        let form = edit_form(&stored(), None, None, None, Some(String::new()));
        assert_eq!(form.amount, "1234.05");
        assert_eq!(form.description.as_deref(), Some(""));
    }
}
