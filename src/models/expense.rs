//! Expense model
//!
//! An expense is validated when it is constructed and never changes after
//! storage assigns its id. Fields are private so an invalid expense cannot
//! be assembled by hand.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use crate::error::{ExpenseError, ExpenseResult};

/// Maximum description length, in characters
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// A single recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Assigned by storage on insert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<u64>,

    /// When the expense happened (local time)
    date: NaiveDateTime,

    description: String,

    amount: Money,

    category: String,
}

impl Expense {
    /// Create and validate a new, not yet persisted expense
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        date: NaiveDateTime,
    ) -> ExpenseResult<Self> {
        let expense = Self {
            id: None,
            date,
            description: description.into(),
            amount,
            category: category.into(),
        };
        expense.validate()?;
        Ok(expense)
    }

    /// Check the expense invariants
    pub fn validate(&self) -> ExpenseResult<()> {
        if self.description.trim().is_empty() {
            return Err(ExpenseError::Validation(
                "Description cannot be empty".into(),
            ));
        }

        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ExpenseError::Validation(format!(
                "Description must be less than {} characters",
                MAX_DESCRIPTION_LEN
            )));
        }

        if !self.amount.is_positive() {
            return Err(ExpenseError::Validation(
                "Amount must be greater than 0".into(),
            ));
        }

        if self.amount > Money::max_amount() {
            return Err(ExpenseError::Validation(format!(
                "Amount cannot exceed {}",
                Money::max_amount()
            )));
        }

        if self.category.trim().is_empty() {
            return Err(ExpenseError::Validation("Category is required".into()));
        }

        Ok(())
    }

    /// Copy of this expense carrying the storage-assigned id
    pub(crate) fn with_id(&self, id: u64) -> Self {
        Self {
            id: Some(id),
            ..self.clone()
        }
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.category,
            self.amount
        )
    }
}
