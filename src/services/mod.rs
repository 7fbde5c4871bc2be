//! Service layer for the expense tracker
//!
//! Services combine validation, repositories and the pure report functions
//! into the operations each command performs. They borrow their
//! dependencies, so tests hand in in-memory fakes and the CLI hands in the
//! HTTP clients.

pub mod expense;
pub mod profile;
pub mod session;

pub use expense::ExpenseService;
pub use profile::ProfileService;
pub use session::SessionService;
