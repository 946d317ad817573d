//! Core data models for the expense tracker
//!
//! This module contains the data structures of the domain: money amounts,
//! expenses, monthly budgets and the periods they cover.

pub mod budget;
pub mod expense;
pub mod money;
pub mod period;

pub use budget::Budget;
pub use expense::{Expense, MAX_DESCRIPTION_LEN};
pub use money::{Money, MoneyParseError};
pub use period::{MonthPeriod, PeriodFilter};
