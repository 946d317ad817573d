//! Custom error types for the expense tracker
//!
//! Every failure the library can produce is one variant of [`ExpenseError`].
//! The three domain kinds (validation, budget, storage) are what the CLI
//! boundary reports with a kind-specific prefix.

use thiserror::Error;

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Malformed user-supplied entity data or CLI input
    #[error("Validation Error: {0}")]
    Validation(String),

    /// Budget invariant violations
    #[error("Budget Error: {0}")]
    Budget(String),

    /// Failure initializing, reading, writing or exporting persisted state
    #[error("Storage Error: {0}")]
    Storage(String),

    /// Path resolution or settings errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExpenseError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a budget error
    pub fn is_budget(&self) -> bool {
        matches!(self, Self::Budget(_))
    }

    /// Check if this is a storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Whether the CLI reports this error with its own prefix rather than
    /// the generic "unexpected" message
    pub fn is_domain(&self) -> bool {
        !matches!(self, Self::Config(_))
    }

    /// Prefix the message with context, keeping the error kind
    pub fn context(self, context: &str) -> Self {
        match self {
            Self::Validation(msg) => Self::Validation(format!("{}: {}", context, msg)),
            Self::Budget(msg) => Self::Budget(format!("{}: {}", context, msg)),
            Self::Storage(msg) => Self::Storage(format!("{}: {}", context, msg)),
            Self::Config(msg) => Self::Config(format!("{}: {}", context, msg)),
        }
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<csv::Error> for ExpenseError {
    fn from(err: csv::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;
