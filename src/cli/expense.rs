//! Expense CLI commands
//!
//! Recording expenses, listing them and summarizing spending.

use chrono::{Local, NaiveDate};
use clap::Args;

use crate::config::settings::Settings;
use crate::display::format_expense_list;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Money, MonthPeriod, PeriodFilter};
use crate::services::ExpenseManager;
use crate::storage::Storage;

/// Arguments for `add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// What the money was spent on
    #[arg(long)]
    pub description: String,
    /// Amount (e.g., "12" or "12.50")
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,
    /// Spending category
    #[arg(long)]
    pub category: String,
    /// Expense date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<String>,
}

/// Arguments for `list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only expenses in this month (1-12)
    #[arg(long)]
    pub month: Option<u32>,
    /// Only expenses in this year
    #[arg(long)]
    pub year: Option<i32>,
}

/// Arguments for `category-summary`
#[derive(Args, Debug)]
pub struct CategorySummaryArgs {
    /// Category to total
    #[arg(long)]
    pub category: String,
    /// Restrict to this month (1-12)
    #[arg(long)]
    pub month: Option<u32>,
    /// Restrict to this year
    #[arg(long)]
    pub year: Option<i32>,
}

/// Arguments for `monthly-summary`
#[derive(Args, Debug)]
pub struct MonthlySummaryArgs {
    /// Month to total (1-12)
    #[arg(long)]
    pub month: u32,
    /// Year, defaults to the current year
    #[arg(long)]
    pub year: Option<i32>,
}

/// Parse a user-entered amount
pub fn parse_amount(input: &str) -> ExpenseResult<Money> {
    Money::parse(input).map_err(|e| ExpenseError::Validation(e.to_string()))
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        ExpenseError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD", input))
    })
}

/// Handle `add`
pub fn handle_add(storage: &Storage, settings: &Settings, args: AddArgs) -> ExpenseResult<()> {
    let manager = ExpenseManager::new(storage);
    let amount = parse_amount(&args.amount)?;

    let (id, warning) = match args.date.as_deref() {
        Some(date) => {
            let date = parse_date(date)?.and_time(Local::now().time());
            manager.add_expense_at(&args.description, amount, &args.category, date)?
        }
        None => manager.add_expense(&args.description, amount, &args.category)?,
    };

    println!("Expense added successfully (ID: {})", id);
    if let Some(warning) = warning {
        println!("Warning: {}", warning.message(&settings.currency_symbol));
    }

    Ok(())
}

/// Handle `list`
pub fn handle_list(storage: &Storage, settings: &Settings, args: ListArgs) -> ExpenseResult<()> {
    let manager = ExpenseManager::new(storage);
    let expenses = manager.list_expenses(args.month, args.year)?;
    println!("{}", format_expense_list(&expenses, settings)?);
    Ok(())
}

/// Handle `category-summary`
pub fn handle_category_summary(
    storage: &Storage,
    settings: &Settings,
    args: CategorySummaryArgs,
) -> ExpenseResult<()> {
    let manager = ExpenseManager::new(storage);
    let total = manager.get_category_summary(&args.category, args.month, args.year)?;

    println!(
        "Total expenses for category '{}' {}: {}",
        args.category,
        PeriodFilter::new(args.month, args.year).describe(),
        total.format_with_symbol(&settings.currency_symbol)
    );
    Ok(())
}

/// Handle `monthly-summary`
pub fn handle_monthly_summary(
    storage: &Storage,
    settings: &Settings,
    args: MonthlySummaryArgs,
) -> ExpenseResult<()> {
    let manager = ExpenseManager::new(storage);
    let year = args.year.unwrap_or_else(|| MonthPeriod::current().year);
    let total = manager.get_monthly_summary(args.month, Some(year))?;

    println!(
        "Total expenses for {}: {}",
        MonthPeriod::new(year, args.month),
        total.format_with_symbol(&settings.currency_symbol)
    );
    Ok(())
}
