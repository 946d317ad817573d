//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses and budgets for terminal
//! display, including tables and over-budget markers.

pub mod budget;
pub mod expense;

pub use budget::format_budget_details;
pub use expense::format_expense_list;
