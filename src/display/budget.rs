//! Budget display formatting

use std::collections::{BTreeMap, BTreeSet};

use crate::config::settings::Settings;
use crate::error::ExpenseResult;
use crate::models::{Budget, Money};

/// Format a budget with its spending
///
/// `spent_by_category` is the month's spending per category. Categories with
/// spending but no limit are listed with `-` as their limit.
pub fn format_budget_details(
    budget: &Budget,
    spent_by_category: &BTreeMap<String, Money>,
    settings: &Settings,
) -> ExpenseResult<String> {
    let symbol = settings.currency_symbol.as_str();
    let spent = Money::checked_sum(spent_by_category.values().copied())?;
    let remaining = budget.amount() - spent;

    let mut output = String::new();
    output.push_str(&format!("Budget for {}\n", budget.period()));
    output.push_str(&format!(
        "  Total:      {:>12}\n",
        budget.amount().format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Spent:      {:>12}\n",
        spent.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Remaining:  {:>12}{}\n",
        remaining.format_with_symbol(symbol),
        if spent > budget.amount() { "  OVER BUDGET" } else { "" }
    ));

    let categories: BTreeSet<&String> = budget
        .category_limits()
        .keys()
        .chain(spent_by_category.keys())
        .collect();

    if categories.is_empty() {
        return Ok(output);
    }

    let name_width = categories
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    output.push('\n');
    output.push_str(&format!(
        "{:<name_width$}  {:>12}  {:>12}  {:>12}\n",
        "Category",
        "Limit",
        "Spent",
        "Remaining",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->12}  {:->12}  {:->12}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for category in categories {
        let spent = spent_by_category
            .get(category.as_str())
            .copied()
            .unwrap_or_default();

        let (limit, remaining) = match budget.category_limit(category) {
            Some(limit) => {
                let left = limit - spent;
                let mut remaining = left.format_with_symbol(symbol);
                if spent > limit {
                    remaining.push_str(" !");
                }
                (limit.format_with_symbol(symbol), remaining)
            }
            None => ("-".to_string(), "-".to_string()),
        };

        output.push_str(&format!(
            "{:<name_width$}  {:>12}  {:>12}  {:>12}\n",
            category,
            limit,
            spent.format_with_symbol(symbol),
            remaining,
            name_width = name_width,
        ));
    }

    Ok(output)
}
