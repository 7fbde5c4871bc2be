//! Expense entry and edit form rules

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{Field, FieldError, ValidationErrors};
use crate::models::money::MoneyParseError;
use crate::models::Money;

/// Minimum number of characters in an expense name
pub const MIN_NAME_LENGTH: usize = 3;

static STRICT_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern compiles"));

/// Which screen the form comes from
///
/// The edit path receives the date as free text and must match `YYYY-MM-DD`
/// exactly; the create path is more forgiving and defaults to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Raw expense form input
#[derive(Debug, Clone, Default)]
pub struct ExpenseForm {
    pub name: String,
    pub amount: String,
    pub date: Option<String>,
    pub description: Option<String>,
}

/// Expense form after all rules passed
#[derive(Debug, Clone, PartialEq)]
pub struct ValidExpense {
    pub name: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub description: Option<String>,
}

/// Validate an expense form against `today`
pub fn validate_expense(
    form: &ExpenseForm,
    mode: FormMode,
    today: NaiveDate,
) -> Result<ValidExpense, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = errors.check(validate_name(&form.name));
    let amount = errors.check(validate_amount(&form.amount));
    let date = errors.check(validate_date(form.date.as_deref(), mode, today));

    match (name, amount, date) {
        (Some(name), Some(amount), Some(date)) if errors.is_empty() => Ok(ValidExpense {
            name,
            amount,
            date,
            description: normalize_description(form.description.as_deref()),
        }),
        _ => Err(errors),
    }
}

/// Name: non-empty after trimming, at least three characters
pub fn validate_name(name: &str) -> Result<String, FieldError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(Field::Name, "Name is required"));
    }
    if trimmed.chars().count() < MIN_NAME_LENGTH {
        return Err(FieldError::new(
            Field::Name,
            format!("Name must be at least {} characters", MIN_NAME_LENGTH),
        ));
    }
    Ok(trimmed.to_string())
}

/// Amount: a number (`.` or `,` as decimal separator) strictly above zero
pub fn validate_amount(amount: &str) -> Result<Money, FieldError> {
    if amount.trim().is_empty() {
        return Err(FieldError::new(Field::Amount, "Amount is required"));
    }
    let parsed = Money::parse(amount).map_err(|e| match e {
        MoneyParseError::TooManyDecimals(_) => {
            FieldError::new(Field::Amount, "Amount can have at most two decimal places")
        }
        _ => FieldError::new(Field::Amount, "Amount must be a number"),
    })?;
    if !parsed.is_positive() {
        return Err(FieldError::new(
            Field::Amount,
            "Amount must be greater than zero",
        ));
    }
    Ok(parsed)
}

/// Date: not after today; strict `YYYY-MM-DD` on the edit path
pub fn validate_date(
    date: Option<&str>,
    mode: FormMode,
    today: NaiveDate,
) -> Result<NaiveDate, FieldError> {
    let raw = date.map(str::trim).filter(|d| !d.is_empty());

    let parsed = match (raw, mode) {
        (None, FormMode::Create) => today,
        (None, FormMode::Edit) => {
            return Err(FieldError::new(Field::Date, "Date is required"));
        }
        (Some(text), FormMode::Edit) => {
            if !STRICT_DATE.is_match(text) {
                return Err(FieldError::new(
                    Field::Date,
                    "Date must use the YYYY-MM-DD format",
                ));
            }
            NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| {
                FieldError::new(Field::Date, "Date is not a valid calendar date")
            })?
        }
        (Some(text), FormMode::Create) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(text, "%d/%m/%Y"))
            .map_err(|_| {
                FieldError::new(Field::Date, "Date must be YYYY-MM-DD or DD/MM/YYYY")
            })?,
    };

    if parsed > today {
        return Err(FieldError::new(Field::Date, "Date cannot be in the future"));
    }
    Ok(parsed)
}

fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from)
}
