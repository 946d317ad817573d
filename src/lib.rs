//! Expense Tracker - personal expense tracking from the command line
//!
//! Records expenses, tracks monthly and per-category budgets, computes
//! summaries and exports to CSV. All state lives in two JSON documents.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Validated data models (money, expenses, budgets, periods)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic (summaries, budget warnings)
//! - `audit`: Append-only audit log of every mutation
//! - `export`: CSV export
//! - `display`: Terminal formatting helpers
//! - `cli`: Command handlers bridging clap and the service layer
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::TrackerPaths;
//! use expense_tracker::models::Money;
//! use expense_tracker::services::ExpenseManager;
//! use expense_tracker::storage::Storage;
//!
//! let storage = Storage::new(TrackerPaths::new(None)?)?;
//! let manager = ExpenseManager::new(&storage);
//! let (id, warning) = manager.add_expense("Coffee", Money::parse("4.50")?, "food")?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
