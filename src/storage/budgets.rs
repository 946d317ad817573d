//! Budget repository for JSON storage
//!
//! Budgets are keyed by (month, year). Setting a budget replaces any record
//! with the same key and appends the new one.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::ExpenseError;
use crate::models::Budget;

use super::file_io::{ensure_json_array, read_json, write_json_atomic};

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty document if none exists
    pub fn initialize(&self) -> Result<bool, ExpenseError> {
        ensure_json_array(&self.path)
    }

    /// Insert or replace the budget for its (month, year)
    ///
    /// Returns the budget that was replaced, if any.
    pub fn upsert(&self, budget: &Budget) -> Result<Option<Budget>, ExpenseError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut budgets = self.load()?;

        let replaced = budgets
            .iter()
            .position(|b| b.is_for(budget.month(), budget.year()))
            .map(|idx| budgets[idx].clone());
        budgets.retain(|b| !b.is_for(budget.month(), budget.year()));
        budgets.push(budget.clone());

        write_json_atomic(&self.path, &budgets)?;
        Ok(replaced)
    }

    /// Get the budget for a month, or `None` if unset
    pub fn get(&self, month: u32, year: i32) -> Result<Option<Budget>, ExpenseError> {
        Ok(self.load()?.into_iter().find(|b| b.is_for(month, year)))
    }

    /// Get all budgets in file order
    pub fn get_all(&self) -> Result<Vec<Budget>, ExpenseError> {
        self.load()
    }

    /// Count stored budgets
    pub fn count(&self) -> Result<usize, ExpenseError> {
        Ok(self.load()?.len())
    }

    fn load(&self) -> Result<Vec<Budget>, ExpenseError> {
        let budgets: Vec<Budget> =
            read_json(&self.path).map_err(|e| e.context("Failed to load budgets"))?;

        for budget in &budgets {
            budget.validate().map_err(|e| {
                ExpenseError::Storage(format!(
                    "Failed to load budgets: invalid budget for {}: {}",
                    budget.period(),
                    e
                ))
            })?;
        }

        Ok(budgets)
    }
}
