//! Expense repository for JSON storage
//!
//! The expense document is a JSON array in insertion order. Every operation
//! reloads it from disk; writes rewrite the whole array.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::ExpenseError;
use crate::models::Expense;

use super::file_io::{ensure_json_array, read_json, write_json_atomic};

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    /// Held across read-modify-write within this process
    write_lock: Mutex<()>,
}

impl ExpenseRepository {
    /// Create a new expense repository
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

    /// Append an expense and return its newly assigned id
    ///
    /// The id is one more than the largest id already stored.
    pub fn add(&self, expense: &Expense) -> Result<Expense, ExpenseError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut expenses = self.load()?;
        let id = next_id(&expenses);
        let stored = expense.with_id(id);

        expenses.push(stored.clone());
        write_json_atomic(&self.path, &expenses)?;

        Ok(stored)
    }

    /// Get all expenses in file order
    pub fn get_all(&self) -> Result<Vec<Expense>, ExpenseError> {
        self.load()
    }

    fn load(&self) -> Result<Vec<Expense>, ExpenseError> {
        let expenses: Vec<Expense> =
            read_json(&self.path).map_err(|e| e.context("Failed to load expenses"))?;

        for expense in &expenses {
            expense.validate().map_err(|e| {
                ExpenseError::Storage(format!(
                    "Failed to load expenses: invalid record #{}: {}",
                    expense.id().unwrap_or_default(),
                    e
                ))
            })?;
        }

        Ok(expenses)
    }
}

/// One more than the largest stored id, starting from 1
fn next_id(expenses: &[Expense]) -> u64 {
    expenses.iter().filter_map(Expense::id).max().unwrap_or(0) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        let repo = ExpenseRepository::new(path);
        repo.initialize().unwrap();
        (temp_dir, repo)
    }

    fn test_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn expense(description: &str, cents: i64) -> Expense {
        Expense::new(description, Money::from_cents(cents), "groceries", test_date()).unwrap()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_add_and_get_all() {
        let (_temp_dir, repo) = create_test_repo();

        let stored = repo.add(&expense("Test expense", 5000)).unwrap();
        assert_eq!(stored.id(), Some(1));

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].description(), "Test expense");
        assert_eq!(all[0].amount(), Money::from_cents(5000));
        assert_eq!(all[0].id(), Some(1));
    }

    #[test]
    fn test_ids_follow_max_not_count() {
        let (_temp_dir, repo) = create_test_repo();

        // A document with a gap in its ids
        std::fs::write(
            repo.path(),
            r#"[
                {"id": 1, "date": "2024-01-01T00:00:00", "description": "a", "amount": "1.00", "category": "x"},
                {"id": 5, "date": "2024-01-02T00:00:00", "description": "b", "amount": "2.00", "category": "x"}
            ]"#,
        )
        .unwrap();

        let stored = repo.add(&expense("c", 300)).unwrap();
        assert_eq!(stored.id(), Some(6));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let (_temp_dir, repo) = create_test_repo();

        for (i, name) in ["first", "second", "third"].iter().enumerate() {
            repo.add(&expense(name, 100 * (i as i64 + 1))).unwrap();
        }

        let names: Vec<_> = repo
            .get_all()
            .unwrap()
            .iter()
            .map(|e| e.description().to_string())
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_malformed_document_is_storage_error() {
        let (_temp_dir, repo) = create_test_repo();
        std::fs::write(repo.path(), "{ broken").unwrap();

        let err = repo.get_all().unwrap_err();
        assert!(err.is_storage());
        assert!(err.to_string().contains("Failed to load expenses"));

        // The failed read must not have been followed by a write
        assert!(repo.add(&expense("x", 100)).is_err());
        assert_eq!(std::fs::read_to_string(repo.path()).unwrap(), "{ broken");
    }

    #[test]
    fn test_invalid_record_is_storage_error() {
        let (_temp_dir, repo) = create_test_repo();
        std::fs::write(
            repo.path(),
            r#"[{"id": 1, "date": "2024-01-01T00:00:00", "description": "", "amount": "1.00", "category": "x"}]"#,
        )
        .unwrap();

        assert!(repo.get_all().unwrap_err().is_storage());
    }
}
