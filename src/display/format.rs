//! Money and date formatting
//!
//! Dates are shown as `dd/mm/yyyy` unless the settings say otherwise.

use chrono::NaiveDate;

use crate::models::date::parse_stored_date;
use crate::models::Money;

/// Default display layout for dates
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Format an amount with the given currency prefix, e.g. `$1,234.50`
pub fn format_money(amount: Money, symbol: &str) -> String {
    amount.format_with_symbol(symbol)
}

/// Format a date as `dd/mm/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Format a date with a strftime layout
pub fn format_date_with(date: NaiveDate, layout: &str) -> String {
    date.format(layout).to_string()
}

/// Format a stored date string (`YYYY-MM-DD` or a timestamp) as `dd/mm/yyyy`
///
/// Anything that does not parse is returned unchanged.
pub fn format_date_str(value: &str) -> String {
    match parse_stored_date(value) {
        Some(date) => format_date(date),
        None => value.to_string(),
    }
}

/// Truncate to `max_chars` characters, marking the cut with "..."
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars <= 3 {
        return ".".repeat(max_chars);
    }
    let kept: String = s.chars().take(max_chars - 3).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Money::from_cents(123450), "$"), "$1,234.50");
        assert_eq!(format_money(Money::from_cents(5), "R$"), "R$0.05");
        assert_eq!(format_money(Money::from_cents(-123450), "$"), "-$1,234.50");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(format_date(date), "01/05/2024");
        assert_eq!(format_date_with(date, "%Y-%m-%d"), "2024-05-01");
    }

    #[test]
    fn test_format_date_str() {
        assert_eq!(format_date_str("2024-05-01"), "01/05/2024");
        assert_eq!(format_date_str("2024-05-01T00:00:00+00:00"), "01/05/2024");
        assert_eq!(format_date_str("not a date"), "not a date");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Short", 10), "Short");
        assert_eq!(truncate("A very long string", 10), "A very ...");
        assert_eq!(truncate("Café com leite", 6), "Caf...");
    }
}
