//! Path management for the expense tracker
//!
//! All file locations are carried by an explicit [`TrackerPaths`] value that
//! is handed to storage; nothing reads a module-level default.
//!
//! ## Path Resolution Order
//!
//! 1. `--data-dir` flag / `EXPENSE_TRACKER_DATA_DIR` environment variable
//! 2. Platform data directory (`directories::ProjectDirs`), e.g.
//!    `~/.local/share/expense-tracker` on Linux

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::ExpenseError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "EXPENSE_TRACKER_DATA_DIR";

/// Manages all paths used by the expense tracker
#[derive(Debug, Clone)]
pub struct TrackerPaths {
    /// Base directory for settings and the audit log
    base_dir: PathBuf,
    /// Expense collection document
    expenses_file: PathBuf,
    /// Budget collection document
    budgets_file: PathBuf,
}

impl TrackerPaths {
    /// Resolve paths, preferring an explicit base directory when given
    ///
    /// # Errors
    ///
    /// Returns an error if no override is given and the platform data
    /// directory cannot be determined.
    pub fn new(override_dir: Option<PathBuf>) -> Result<Self, ExpenseError> {
        let base_dir = match override_dir {
            Some(dir) => dir,
            None => match std::env::var(DATA_DIR_ENV) {
                Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
                _ => resolve_default_path()?,
            },
        };

        Ok(Self::with_base_dir(base_dir))
    }

    /// Create paths under a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        let data_dir = base_dir.join("data");
        Self {
            expenses_file: data_dir.join("expenses.json"),
            budgets_file: data_dir.join("budgets.json"),
            base_dir,
        }
    }

    /// Create paths with explicit document locations
    ///
    /// The two documents may live in different directories; settings and
    /// the audit log stay under `base_dir`.
    pub fn with_files(base_dir: PathBuf, expenses_file: PathBuf, budgets_file: PathBuf) -> Self {
        Self {
            base_dir,
            expenses_file,
            budgets_file,
        }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the default data directory (`<base>/data`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the expense document
    pub fn expenses_file(&self) -> &Path {
        &self.expenses_file
    }

    /// Get the path to the budget document
    pub fn budgets_file(&self) -> &Path {
        &self.budgets_file
    }

    /// Ensure the base directory and each document's parent directory exist
    pub fn ensure_directories(&self) -> Result<(), ExpenseError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            ExpenseError::Storage(format!("Failed to create base directory: {}", e))
        })?;

        for file in [&self.expenses_file, &self.budgets_file] {
            if let Some(parent) = file.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ExpenseError::Storage(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(())
    }
}

/// Resolve the platform data directory
fn resolve_default_path() -> Result<PathBuf, ExpenseError> {
    ProjectDirs::from("", "", "expense-tracker")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ExpenseError::Config("Could not determine a data directory".into()))
}
