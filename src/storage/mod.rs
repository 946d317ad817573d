//! Storage layer for the expense tracker
//!
//! Two independent JSON documents hold the expense and budget collections.
//! Every operation reloads its document and writes replace it atomically.
//!
//! Only one process is expected to write at a time. A per-repository mutex
//! serializes read-modify-write inside a process; separate processes
//! writing concurrently can still lose updates.

pub mod budgets;
pub mod expenses;
pub mod file_io;

pub use budgets::BudgetRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::TrackerPaths;
use crate::error::ExpenseError;
use crate::models::{Budget, Expense};

/// Main storage coordinator that provides access to both repositories
pub struct Storage {
    paths: TrackerPaths,
    pub expenses: ExpenseRepository,
    pub budgets: BudgetRepository,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create a new Storage instance and make sure both documents exist
    pub fn new(paths: TrackerPaths) -> Result<Self, ExpenseError> {
        let storage = Self {
            expenses: ExpenseRepository::new(paths.expenses_file().to_path_buf()),
            budgets: BudgetRepository::new(paths.budgets_file().to_path_buf()),
            audit: Some(AuditLogger::new(paths.audit_log())),
            paths,
        };
        storage.initialize()?;
        Ok(storage)
    }

    /// Enable or disable audit logging
    pub fn with_audit(mut self, enabled: bool) -> Self {
        self.audit = enabled.then(|| AuditLogger::new(self.paths.audit_log()));
        self
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }

    /// Get the audit logger, if auditing is enabled
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Create missing directories and empty documents
    ///
    /// Idempotent: existing documents are left untouched.
    pub fn initialize(&self) -> Result<(), ExpenseError> {
        self.paths
            .ensure_directories()
            .and_then(|_| self.expenses.initialize())
            .and_then(|_| self.budgets.initialize())
            .map(|_| ())
            .map_err(|e| e.context("Failed to initialize storage"))
    }

    /// Persist a new expense and return its assigned id
    pub fn add_expense(&self, expense: &Expense) -> Result<u64, ExpenseError> {
        let stored = self
            .expenses
            .add(expense)
            .map_err(|e| e.context("Failed to save expense"))?;
        let id = stored.id().unwrap_or_default();

        self.log_entry(AuditEntry::create(
            EntityType::Expense,
            id.to_string(),
            Some(stored.description().to_string()),
            &stored,
        ));

        Ok(id)
    }

    /// Get every stored expense in insertion order
    pub fn get_all_expenses(&self) -> Result<Vec<Expense>, ExpenseError> {
        self.expenses.get_all()
    }

    /// Insert or replace the budget for its month
    ///
    /// Returns the budget that was replaced, if any.
    pub fn set_budget(&self, budget: &Budget) -> Result<Option<Budget>, ExpenseError> {
        let replaced = self
            .budgets
            .upsert(budget)
            .map_err(|e| e.context("Failed to save budget"))?;

        let key = budget.period().to_string();
        let entry = match &replaced {
            Some(before) => {
                let diff = match (serde_json::to_value(before), serde_json::to_value(budget)) {
                    (Ok(b), Ok(a)) => generate_diff(&b, &a),
                    _ => None,
                };
                AuditEntry::update(EntityType::Budget, key, None, before, budget, diff)
            }
            None => AuditEntry::create(EntityType::Budget, key, None, budget),
        };
        self.log_entry(entry);

        Ok(replaced)
    }

    /// Get the budget for a month, or `None` if none is set
    pub fn get_budget(&self, month: u32, year: i32) -> Result<Option<Budget>, ExpenseError> {
        self.budgets.get(month, year)
    }

    /// Get every stored budget
    pub fn get_all_budgets(&self) -> Result<Vec<Budget>, ExpenseError> {
        self.budgets.get_all()
    }

    /// Number of stored budgets
    pub fn budget_count(&self) -> Result<usize, ExpenseError> {
        self.budgets.count()
    }

    /// Record a committed mutation
    ///
    /// The document is already rewritten at this point, so a failed append is
    /// reported on stderr instead of failing the operation.
    fn log_entry(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                eprintln!("Warning: audit log not updated: {}", e);
            }
        }
    }
}
