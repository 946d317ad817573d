//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer:
//! validated writes, spending summaries and budget warnings.

pub mod manager;
pub mod warning;

pub use manager::ExpenseManager;
pub use warning::{BudgetWarning, Overspend};
