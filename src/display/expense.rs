//! Expense display formatting
//!
//! Formats expenses for terminal output as a table.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::config::settings::Settings;
use crate::error::ExpenseResult;
use crate::models::{Expense, Money};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl ExpenseRow {
    fn new(expense: &Expense, settings: &Settings) -> Self {
        Self {
            id: expense.id().map(|id| id.to_string()).unwrap_or_default(),
            date: format_date(expense.date(), &settings.date_format),
            description: truncate(expense.description(), 40),
            category: expense.category().to_string(),
            amount: expense.amount().format_with_symbol(&settings.currency_symbol),
        }
    }
}

/// Format a list of expenses as a table followed by their total
pub fn format_expense_list(expenses: &[Expense], settings: &Settings) -> ExpenseResult<String> {
    if expenses.is_empty() {
        return Ok("No expenses found.".to_string());
    }

    let rows: Vec<ExpenseRow> = expenses
        .iter()
        .map(|e| ExpenseRow::new(e, settings))
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::last()).with(Alignment::right()));

    let total = Money::checked_sum(expenses.iter().map(Expense::amount))?;

    Ok(format!(
        "{}\n\n{} expense(s), total {}",
        table,
        expenses.len(),
        total.format_with_symbol(&settings.currency_symbol)
    ))
}

/// Format a timestamp with a user-supplied strftime pattern
///
/// Falls back to `YYYY-MM-DD` when the pattern is not valid.
fn format_date(date: NaiveDateTime, pattern: &str) -> String {
    if StrftimeItems::new(pattern).any(|item| item == Item::Error) {
        date.format("%Y-%m-%d").to_string()
    } else {
        date.format(pattern).to_string()
    }
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
