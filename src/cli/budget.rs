//! Budget CLI commands
//!
//! Setting a month's budget with optional per-category limits, and showing it
//! against the month's spending.

use std::collections::BTreeMap;

use clap::Args;

use super::expense::parse_amount;
use crate::config::settings::Settings;
use crate::display::format_budget_details;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Money, MonthPeriod};
use crate::services::ExpenseManager;
use crate::storage::Storage;

const CATEGORY_LIMITS_USAGE: &str =
    "Invalid category limits format. Use 'category1:amount1,category2:amount2'";

/// Arguments for `set-budget`
#[derive(Args, Debug)]
pub struct SetBudgetArgs {
    /// Budget month (1-12)
    #[arg(long)]
    pub month: u32,
    /// Budget year
    #[arg(long)]
    pub year: i32,
    /// Total amount for the month
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,
    /// Per-category limits, e.g. "groceries:300,fun:100"
    #[arg(long)]
    pub category_limits: Option<String>,
}

/// Arguments for `show-budget`
#[derive(Args, Debug)]
pub struct ShowBudgetArgs {
    /// Budget month (1-12)
    #[arg(long)]
    pub month: u32,
    /// Budget year
    #[arg(long)]
    pub year: i32,
}

/// Parse `name:amount` pairs separated by commas
///
/// An empty string yields no limits. Names and amounts are trimmed.
pub fn parse_category_limits(input: &str) -> ExpenseResult<BTreeMap<String, Money>> {
    let mut limits = BTreeMap::new();

    if input.trim().is_empty() {
        return Ok(limits);
    }

    for pair in input.split(',') {
        let mut parts = pair.split(':');
        let (name, amount) = match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(amount), None) => (name.trim(), amount.trim()),
            _ => return Err(ExpenseError::Validation(CATEGORY_LIMITS_USAGE.to_string())),
        };

        let amount = Money::parse(amount)
            .map_err(|_| ExpenseError::Validation(CATEGORY_LIMITS_USAGE.to_string()))?;
        limits.insert(name.to_string(), amount);
    }

    Ok(limits)
}

/// Handle `set-budget`
pub fn handle_set_budget(storage: &Storage, args: SetBudgetArgs) -> ExpenseResult<()> {
    let manager = ExpenseManager::new(storage);
    let amount = parse_amount(&args.amount)?;
    let limits = args
        .category_limits
        .as_deref()
        .map(parse_category_limits)
        .transpose()?;

    let budget = manager.set_budget(args.month, args.year, amount, limits)?;

    println!("Budget set successfully for {}", budget.period());
    Ok(())
}

/// Handle `show-budget`
pub fn handle_show_budget(
    storage: &Storage,
    settings: &Settings,
    args: ShowBudgetArgs,
) -> ExpenseResult<()> {
    let manager = ExpenseManager::new(storage);

    match manager.get_budget(args.month, args.year)? {
        Some(budget) => {
            let spent = manager.category_breakdown(budget.period())?;
            print!("{}", format_budget_details(&budget, &spent, settings)?);
        }
        None => {
            println!(
                "No budget set for {}",
                MonthPeriod::new(args.year, args.month)
            );
        }
    }

    Ok(())
}
