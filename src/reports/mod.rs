//! Reports over expense snapshots
//!
//! Pure functions only: filtering, month-to-date aggregation and the
//! summary composition that combines them.

pub mod filter;
pub mod monthly;
pub mod summary;

pub use filter::{filter_expenses, FilterCriteria, FilterResult, RawFilter};
pub use monthly::{month_to_date, MonthAggregate};
pub use summary::{summarize, ExpenseSummary};
