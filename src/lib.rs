//! Expense Tracker - a client for recording and reviewing personal expenses
//!
//! Expenses, profiles and authentication live in a hosted backend (a
//! PostgREST table API plus a GoTrue auth API). This crate holds the client
//! side: the filter engine and month aggregation, money and date formatting,
//! form validation, the HTTP clients, and the `expenses` command-line tool.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths and user settings
//! - `error`: Custom error types
//! - `models`: Expenses, profiles, sessions, money and ids
//! - `validation`: Form rules for expenses, registration and profile
//! - `reports`: Filtering, month-to-date totals and the summary view
//! - `storage`: Repository traits, in-memory fakes and the session file
//! - `auth`: Auth gateway trait and the biometric prompt
//! - `remote`: HTTP clients for the backend
//! - `services`: Operations behind each command
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::reports::{filter_expenses, FilterCriteria};
//!
//! let result = filter_expenses(&snapshot, &FilterCriteria::new().name("taxi"));
//! println!("{} expenses, {}", result.expenses.len(), result.total);
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod remote;
pub mod reports;
pub mod services;
pub mod storage;
pub mod validation;

pub use error::{TrackerError, TrackerResult};
