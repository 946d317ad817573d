//! Budget warnings raised after an expense is recorded

use std::fmt;

use crate::models::{Money, MonthPeriod};

/// A single overspending condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overspend {
    /// The month's total spending is above the budget amount
    Total { budget: Money, spent: Money },
    /// One category's spending is above its limit
    Category {
        category: String,
        limit: Money,
        spent: Money,
    },
}

impl Overspend {
    /// Message text with amounts shown in the given currency symbol
    pub fn message(&self, symbol: &str) -> String {
        match self {
            Self::Total { budget, spent } => format!(
                "Monthly budget exceeded! Budget: {}, Spent: {}",
                budget.format_with_symbol(symbol),
                spent.format_with_symbol(symbol)
            ),
            Self::Category {
                category,
                limit,
                spent,
            } => format!(
                "Category '{}' budget exceeded! Limit: {}, Spent: {}",
                category,
                limit.format_with_symbol(symbol),
                spent.format_with_symbol(symbol)
            ),
        }
    }
}

impl fmt::Display for Overspend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message("$"))
    }
}

/// Every overspending condition triggered by one expense
///
/// Displays as the individual messages joined by a single space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetWarning {
    pub period: MonthPeriod,
    pub conditions: Vec<Overspend>,
}

impl BudgetWarning {
    /// Whether the monthly total was exceeded
    pub fn total_exceeded(&self) -> bool {
        self.conditions
            .iter()
            .any(|c| matches!(c, Overspend::Total { .. }))
    }

    /// Whether a category limit was exceeded
    pub fn category_exceeded(&self) -> bool {
        self.conditions
            .iter()
            .any(|c| matches!(c, Overspend::Category { .. }))
    }
}

impl BudgetWarning {
    /// All messages joined by a space, amounts in the given currency symbol
    pub fn message(&self, symbol: &str) -> String {
        self.conditions
            .iter()
            .map(|c| c.message(symbol))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for BudgetWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message("$"))
    }
}
