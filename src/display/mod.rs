//! Display formatting for terminal output
//!
//! Every function returns a `String`; printing is left to the CLI.

pub mod expense;
pub mod format;
pub mod profile;

pub use expense::{format_expense_details, format_expense_table, format_summary};
pub use format::{format_date, format_date_str, format_money, truncate};
pub use profile::{format_about, format_profile};
