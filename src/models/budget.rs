//! Monthly budget model
//!
//! A budget caps total spending for one (month, year) and may split part of
//! that cap into per-category limits.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::money::Money;
use super::period::MonthPeriod;
use crate::error::{ExpenseError, ExpenseResult};

/// A spending ceiling for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    month: u32,
    year: i32,
    amount: Money,
    #[serde(default)]
    category_limits: BTreeMap<String, Money>,
}

impl Budget {
    /// Create and validate a budget
    pub fn new(
        month: u32,
        year: i32,
        amount: Money,
        category_limits: Option<BTreeMap<String, Money>>,
    ) -> ExpenseResult<Self> {
        let budget = Self {
            month,
            year,
            amount,
            category_limits: category_limits.unwrap_or_default(),
        };
        budget.validate()?;
        Ok(budget)
    }

    /// Check the budget invariants
    pub fn validate(&self) -> ExpenseResult<()> {
        if !(1..=12).contains(&self.month) {
            return Err(ExpenseError::Budget("Invalid month".into()));
        }

        if !self.amount.is_positive() {
            return Err(ExpenseError::Budget(
                "Budget amount must be greater than 0".into(),
            ));
        }

        if self.amount > Money::max_amount() {
            return Err(ExpenseError::Budget(format!(
                "Budget amount cannot exceed {}",
                Money::max_amount()
            )));
        }

        if let Some((name, _)) = self
            .category_limits
            .iter()
            .find(|(_, limit)| **limit > Money::max_amount())
        {
            return Err(ExpenseError::Budget(format!(
                "Category budget for '{}' cannot exceed {}",
                name,
                Money::max_amount()
            )));
        }

        let total_limits = self.total_category_limits().map_err(|_| {
            ExpenseError::Budget("Sum of category budgets exceeds total budget".into())
        })?;

        if total_limits > self.amount {
            return Err(ExpenseError::Budget(
                "Sum of category budgets exceeds total budget".into(),
            ));
        }

        Ok(())
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn period(&self) -> MonthPeriod {
        MonthPeriod::new(self.year, self.month)
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn category_limits(&self) -> &BTreeMap<String, Money> {
        &self.category_limits
    }

    /// Get the limit for a category, if one is set
    pub fn category_limit(&self, category: &str) -> Option<Money> {
        self.category_limits.get(category).copied()
    }

    /// Sum of all per-category limits
    pub fn total_category_limits(&self) -> ExpenseResult<Money> {
        Money::checked_sum(self.category_limits.values().copied())
    }

    /// Whether this budget is keyed by the given month and year
    pub fn is_for(&self, month: u32, year: i32) -> bool {
        self.month == month && self.year == year
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} budget: {}", self.period(), self.amount)?;
        if !self.category_limits.is_empty() {
            let limits: Vec<String> = self
                .category_limits
                .iter()
                .map(|(name, limit)| format!("{}: {}", name, limit))
                .collect();
            write!(f, " ({})", limits.join(", "))?;
        }
        Ok(())
    }
}
