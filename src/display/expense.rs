//! Expense display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::format::{format_date_with, format_money, truncate};
use crate::config::Settings;
use crate::models::Expense;
use crate::reports::ExpenseSummary;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format expenses as a table
pub fn format_expense_table(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.short(),
        date: format_date_with(e.date, &settings.date_format),
        name: truncate(&e.name, 30),
        amount: format_money(e.amount, &settings.currency_symbol),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id.short()));
    output.push_str(&format!("Name:        {}\n", expense.name));
    output.push_str(&format!(
        "Amount:      {}\n",
        format_money(expense.amount, &settings.currency_symbol)
    ));
    output.push_str(&format!(
        "Date:        {}\n",
        format_date_with(expense.date, &settings.date_format)
    ));
    if let Some(description) = &expense.description {
        output.push_str(&format!("Description: {}\n", description));
    }
    if let Some(created) = expense.created_at {
        output.push_str(&format!(
            "Created:     {}\n",
            created.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    output
}

/// Format the summary screen
pub fn format_summary(summary: &ExpenseSummary, settings: &Settings) -> String {
    let symbol = &settings.currency_symbol;
    let mut output = String::new();

    output.push_str(&format!(
        "Spent in {}: {} ({} expense{})\n\n",
        summary.month.label(),
        format_money(summary.month.total, symbol),
        summary.month.expenses.len(),
        if summary.month.expenses.len() == 1 { "" } else { "s" }
    ));

    if summary.filtered {
        output.push_str("Filtered expenses\n");
    } else {
        output.push_str("This month\n");
    }
    output.push_str(&format_expense_table(&summary.shown, settings));

    if summary.filtered {
        output.push_str(&format!(
            "\nFiltered total: {}\n",
            format_money(summary.shown_total, symbol)
        ));
    }

    output
}
