//! Expense manager
//!
//! Orchestrates validated writes on top of storage, derives spending
//! summaries, and checks the month's budget after each new expense.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{Datelike, Local, NaiveDateTime};

use super::warning::{BudgetWarning, Overspend};
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::export_expenses_csv;
use crate::models::{Budget, Expense, Money, MonthPeriod, PeriodFilter};
use crate::storage::Storage;

/// Service for recording expenses and budgets
pub struct ExpenseManager<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseManager<'a> {
    /// Create a new manager over the given storage
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record an expense dated now
    ///
    /// Returns the assigned id and a warning if the expense pushed its month
    /// over budget.
    pub fn add_expense(
        &self,
        description: &str,
        amount: Money,
        category: &str,
    ) -> ExpenseResult<(u64, Option<BudgetWarning>)> {
        self.add_expense_at(description, amount, category, Local::now().naive_local())
    }

    /// Record an expense with an explicit timestamp
    pub fn add_expense_at(
        &self,
        description: &str,
        amount: Money,
        category: &str,
        date: NaiveDateTime,
    ) -> ExpenseResult<(u64, Option<BudgetWarning>)> {
        let expense = Expense::new(description, amount, category, date)?;
        let id = self.storage.add_expense(&expense)?;

        // Evaluated after the write so the new expense counts toward the totals
        let warning = self.check_budget(&expense)?;

        Ok((id, warning))
    }

    /// Set (or replace) the budget for a month
    pub fn set_budget(
        &self,
        month: u32,
        year: i32,
        amount: Money,
        category_limits: Option<BTreeMap<String, Money>>,
    ) -> ExpenseResult<Budget> {
        let budget = Budget::new(month, year, amount, category_limits)?;
        self.storage.set_budget(&budget)?;
        Ok(budget)
    }

    /// Get the budget for a month, if set
    pub fn get_budget(&self, month: u32, year: i32) -> ExpenseResult<Option<Budget>> {
        self.storage.get_budget(month, year)
    }

    /// Total spent in a month; the year defaults to the current year
    pub fn get_monthly_summary(&self, month: u32, year: Option<i32>) -> ExpenseResult<Money> {
        let year = year.unwrap_or_else(|| Local::now().year());
        let period = MonthPeriod::new(year, month);

        let expenses = self.storage.get_all_expenses()?;
        Money::checked_sum(
            expenses
                .iter()
                .filter(|e| period.contains(&e.date()))
                .map(Expense::amount),
        )
    }

    /// Total spent in a category, optionally restricted by month and/or year
    pub fn get_category_summary(
        &self,
        category: &str,
        month: Option<u32>,
        year: Option<i32>,
    ) -> ExpenseResult<Money> {
        let filter = PeriodFilter::new(month, year);

        let expenses = self.storage.get_all_expenses()?;
        Money::checked_sum(
            expenses
                .iter()
                .filter(|e| e.category() == category && filter.matches(&e.date()))
                .map(Expense::amount),
        )
    }

    /// Expenses in storage order, optionally restricted by month and/or year
    pub fn list_expenses(
        &self,
        month: Option<u32>,
        year: Option<i32>,
    ) -> ExpenseResult<Vec<Expense>> {
        let filter = PeriodFilter::new(month, year);

        Ok(self
            .storage
            .get_all_expenses()?
            .into_iter()
            .filter(|e| filter.matches(&e.date()))
            .collect())
    }

    /// Spending per category in a month
    pub fn category_breakdown(
        &self,
        period: MonthPeriod,
    ) -> ExpenseResult<BTreeMap<String, Money>> {
        let mut totals: BTreeMap<String, Money> = BTreeMap::new();
        for expense in self.storage.get_all_expenses()? {
            if period.contains(&expense.date()) {
                let total = totals
                    .entry(expense.category().to_string())
                    .or_insert_with(Money::zero);
                *total = Money::checked_sum([*total, expense.amount()])?;
            }
        }
        Ok(totals)
    }

    /// Write every expense to a CSV file and return the number of rows
    pub fn export_to_csv(&self, path: impl AsRef<Path>) -> ExpenseResult<usize> {
        let path = path.as_ref();
        let expenses = self.storage.get_all_expenses()?;

        let file = File::create(path).map_err(|e| {
            ExpenseError::Storage(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);

        export_expenses_csv(&expenses, &mut writer)
            .and_then(|_| writer.flush().map_err(ExpenseError::from))
            .map_err(|e| e.context(&format!("Failed to export to {}", path.display())))?;

        Ok(expenses.len())
    }

    /// Compare the expense's month against its budget
    fn check_budget(&self, expense: &Expense) -> ExpenseResult<Option<BudgetWarning>> {
        let period = MonthPeriod::containing(expense.date().date());

        let budget = match self.storage.get_budget(period.month, period.year)? {
            Some(budget) => budget,
            None => return Ok(None),
        };

        let in_period: Vec<Expense> = self
            .storage
            .get_all_expenses()?
            .into_iter()
            .filter(|e| period.contains(&e.date()))
            .collect();

        let monthly_total = Money::checked_sum(in_period.iter().map(Expense::amount))?;
        let category_total = Money::checked_sum(
            in_period
                .iter()
                .filter(|e| e.category() == expense.category())
                .map(Expense::amount),
        )?;

        let mut conditions = Vec::new();

        if monthly_total > budget.amount() {
            conditions.push(Overspend::Total {
                budget: budget.amount(),
                spent: monthly_total,
            });
        }

        if let Some(limit) = budget.category_limit(expense.category()) {
            if category_total > limit {
                conditions.push(Overspend::Category {
                    category: expense.category().to_string(),
                    limit,
                    spent: category_total,
                });
            }
        }

        if conditions.is_empty() {
            Ok(None)
        } else {
            Ok(Some(BudgetWarning { period, conditions }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TrackerPaths;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn money(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    fn limits(pairs: &[(&str, &str)]) -> Option<BTreeMap<String, Money>> {
        Some(
            pairs
                .iter()
                .map(|(name, amount)| (name.to_string(), money(amount)))
                .collect(),
        )
    }

    #[test]
    fn test_add_expense_persists_and_assigns_id() {
        let (_temp_dir, storage) = create_test_storage();
        let manager = ExpenseManager::new(&storage);

        let (first, warning) = manager
            .add_expense("Test expense", money("50.00"), "groceries")
            .unwrap();
        assert_eq!(first, 1);
        assert!(warning.is_none());

        let (second, _) = manager.add_expense("More", money("5"), "groceries").unwrap();
        assert_eq!(second, first + 1);

        let all = storage.get_all_expenses().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].description(), "Test expense");
        assert_eq!(all[0].amount(), money("50.00"));
    }

    #[test]
    fn test_invalid_expense_is_not_persisted() {
        let (_temp_dir, storage) = create_test_storage();
        let manager = ExpenseManager::new(&storage);

        let err = manager.add_expense("", money("10"), "food").unwrap_err();
        assert!(err.is_validation());

        let err = manager.add_expense("Refund", money("-1"), "food").unwrap_err();
        assert!(err.is_validation());

        assert!(storage.get_all_expenses().unwrap().is_empty());
    }

    #[test]
    fn test_warning_total_and_category_exceeded() {
        let (_temp_dir, storage) = create_test_storage();
        let manager = ExpenseManager::new(&storage);

        manager
            .set_budget(1, 2024, money("100.00"), limits(&[("groceries", "50.00")]))
            .unwrap();
        manager
            .add_expense_at("Big shop", money("90.00"), "groceries", at(2024, 1, 5))
            .unwrap();

        let (_, warning) = manager
            .add_expense_at("Top up", money("20.00"), "groceries", at(2024, 1, 20))
            .unwrap();

        let warning = warning.expect("expected a budget warning");
        assert!(warning.total_exceeded());
        assert!(warning.category_exceeded());

        let text = warning.to_string();
        assert!(text.contains("Monthly budget exceeded! Budget: $100.00, Spent: $110.00"));
        assert!(text.contains("Category 'groceries' budget exceeded! Limit: $50.00"));
    }

    #[test]
    fn test_warning_fires_on_the_expense_that_crosses() {
        let (_temp_dir, storage) = create_test_storage();
        let manager = ExpenseManager::new(&storage);

        manager.set_budget(3, 2024, money("100"), None).unwrap();

        let (_, warning) = manager
            .add_expense_at("Most of it", money("100"), "rent", at(2024, 3, 1))
            .unwrap();
        assert!(warning.is_none(), "spending equal to the budget is not over");

        let (_, warning) = manager
            .add_expense_at("One more", money("0.01"), "rent", at(2024, 3, 2))
            .unwrap();
        let warning = warning.unwrap();
        assert!(warning.total_exceeded());
        assert!(!warning.category_exceeded());
    }

    #[test]
    fn test_only_category_limit_exceeded() {
        let (_temp_dir, storage) = create_test_storage();
        let manager = ExpenseManager::new(&storage);

        manager
            .set_budget(2, 2024, money("1000"), limits(&[("dining", "30")]))
            .unwrap();

        let (_, warning) = manager
            .add_expense_at("Dinner", money("45"), "dining", at(2024, 2, 14))
            .unwrap();

        let warning = warning.unwrap();
        assert!(!warning.total_exceeded());
        assert!(warning.category_exceeded());
        assert_eq!(
            warning.to_string(),
            "Category 'dining' budget exceeded! Limit: $30.00, Spent: $45.00"
        );
    }

    #[test]
    fn test_other_months_do_not_count() {
        let (_temp_dir, storage) = create_test_storage();
        let manager = ExpenseManager::new(&storage);

        manager.set_budget(1, 2024, money("100"), None).unwrap();
        manager
            .add_expense_at("December", money("500"), "misc", at(2023, 12, 31))
            .unwrap();
        manager
            .add_expense_at("Last year", money("500"), "misc", at(2023, 1, 15))
            .unwrap();

        let (_, warning) = manager
            .add_expense_at("January", money("50"), "misc", at(2024, 1, 1))
            .unwrap();
        assert!(warning.is_none());
    }

    #[test]
    fn test_no_budget_no_warning() {
        let (_temp_dir, storage) = create_test_storage();
        let manager = ExpenseManager::new(&storage);

        let (_, warning) = manager
            .add_expense_at("Huge", money("99999"), "misc", at(2024, 7, 1))
            .unwrap();
        assert!(warning.is_none());
    }

    #[test]
    fn test_set_budget_validates_and_upserts() {
        let (_temp_dir, storage) = create_test_storage();
        let manager = ExpenseManager::new(&storage);

        let err = manager.set_budget(13, 2024, money("100"), None).unwrap_err();
        assert!(err.is_budget());

        let err = manager
            .set_budget(1, 2024, money("1000"), limits(&[("groceries", "1200")]))
            .unwrap_err();
        assert!(err.is_budget());
        assert!(storage.get_all_budgets().unwrap().is_empty());

        manager.set_budget(1, 2024, money("100"), None).unwrap();
        manager
            .set_budget(1, 2024, money("200"), limits(&[("food", "50")]))
            .unwrap();

        let budgets = storage.get_all_budgets().unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].amount(), money("200"));

        let fetched = manager.get_budget(1, 2024).unwrap().unwrap();
        assert_eq!(fetched.category_limit("food"), Some(money("50")));
    }

    #[test]
    fn test_oversized_amounts_never_reach_the_totals() {
        let (_temp_dir, storage) = create_test_storage();
        let manager = ExpenseManager::new(&storage);

        let huge = money("50000000000000000000000000000");
        let err = manager.add_expense("a", huge, "x").unwrap_err();
        assert!(err.is_validation());
        assert!(storage.get_all_expenses().unwrap().is_empty());

        manager.set_budget(1, 2024, money("100"), None).unwrap();
        manager
            .add_expense_at("a", Money::max_amount(), "x", at(2024, 1, 1))
            .unwrap();
        let (_, warning) = manager
            .add_expense_at("b", Money::max_amount(), "x", at(2024, 1, 2))
            .unwrap();
        assert!(warning.unwrap().total_exceeded());

        assert_eq!(
            manager.get_category_summary("x", None, None).unwrap(),
            money("2000000000000")
        );
    }

    #[test]
    fn test_oversized_stored_amounts_are_an_error() {
        let (_temp_dir, storage) = create_test_storage();
        let record = |id: u64| {
            serde_json::json!({
                "id": id,
                "date": "2024-01-01T12:00:00",
                "description": "a",
                "amount": "50000000000000000000000000000",
                "category": "x"
            })
        };
        std::fs::write(
            storage.paths().expenses_file(),
            serde_json::to_string(&vec![record(1), record(2)]).unwrap(),
        )
        .unwrap();

        let manager = ExpenseManager::new(&storage);
        let err = manager.get_category_summary("x", None, None).unwrap_err();
        assert!(err.is_storage());
        assert!(manager.get_monthly_summary(1, Some(2024)).is_err());
    }

    #[test]
    fn test_monthly_summary() {
        let (_temp_dir, storage) = create_test_storage();
        let manager = ExpenseManager::new(&storage);

        manager
            .add_expense_at("a", money("10.10"), "x", at(2024, 4, 1))
            .unwrap();
        manager
            .add_expense_at("b", money("0.20"), "y", at(2024, 4, 30))
            .unwrap();
        manager
            .add_expense_at("c", money("7"), "x", at(2024, 5, 1))
            .unwrap();

        assert_eq!(
            manager.get_monthly_summary(4, Some(2024)).unwrap(),
            money("10.30")
        );
        assert_eq!(manager.get_monthly_summary(6, Some(2024)).unwrap(), Money::zero());
    }

    #[test]
    fn test_monthly_summary_defaults_to_current_year() {
        let (_temp_dir, storage) = create_test_storage();
        let manager = ExpenseManager::new(&storage);

        let (_, _) = manager.add_expense("Now", money("3.50"), "misc").unwrap();
        let now = Local::now();

        assert_eq!(
            manager.get_monthly_summary(now.month(), None).unwrap(),
            money("3.50")
        );
    }

    #[test]
    fn test_category_summary_filters() {
        let (_temp_dir, storage) = create_test_storage();
        let manager = ExpenseManager::new(&storage);

        manager
            .add_expense_at("a", money("10"), "food", at(2024, 1, 3))
            .unwrap();
        manager
            .add_expense_at("b", money("20"), "food", at(2024, 2, 3))
            .unwrap();
        manager
            .add_expense_at("c", money("40"), "food", at(2023, 1, 3))
            .unwrap();
        manager
            .add_expense_at("d", money("80"), "rent", at(2024, 1, 3))
            .unwrap();

        assert_eq!(
            manager.get_category_summary("food", None, None).unwrap(),
            money("70")
        );
        assert_eq!(
            manager.get_category_summary("food", Some(1), Some(2024)).unwrap(),
            money("10")
        );
        assert_eq!(
            manager.get_category_summary("food", Some(1), None).unwrap(),
            money("50")
        );
        assert_eq!(
            manager.get_category_summary("food", None, Some(2024)).unwrap(),
            money("30")
        );
        assert_eq!(
            manager.get_category_summary("utilities", None, None).unwrap(),
            Money::zero()
        );
    }

    #[test]
    fn test_list_and_breakdown() {
        let (_temp_dir, storage) = create_test_storage();
        let manager = ExpenseManager::new(&storage);

        manager
            .add_expense_at("a", money("10"), "food", at(2024, 1, 3))
            .unwrap();
        manager
            .add_expense_at("b", money("5"), "food", at(2024, 1, 4))
            .unwrap();
        manager
            .add_expense_at("c", money("8"), "rent", at(2024, 2, 1))
            .unwrap();

        assert_eq!(manager.list_expenses(None, None).unwrap().len(), 3);
        assert_eq!(manager.list_expenses(Some(1), Some(2024)).unwrap().len(), 2);

        let breakdown = manager.category_breakdown(MonthPeriod::new(2024, 1)).unwrap();
        assert_eq!(breakdown.get("food"), Some(&money("15")));
        assert!(breakdown.get("rent").is_none());
    }

    #[test]
    fn test_export_to_csv() {
        let (temp_dir, storage) = create_test_storage();
        let manager = ExpenseManager::new(&storage);

        manager
            .add_expense_at("Coffee, large", money("4.50"), "food", at(2024, 1, 3))
            .unwrap();
        manager
            .add_expense_at("Rent", money("1200"), "housing", at(2024, 1, 1))
            .unwrap();

        let output = temp_dir.path().join("out.csv");
        let rows = manager.export_to_csv(&output).unwrap();
        assert_eq!(rows, 2);

        let contents = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "ID,Date,Description,Amount,Category");
        assert_eq!(lines[1], "1,2024-01-03,\"Coffee, large\",4.50,food");
        assert_eq!(lines[2], "2,2024-01-01,Rent,1200,housing");
    }

    #[test]
    fn test_export_to_unwritable_path_is_storage_error() {
        let (temp_dir, storage) = create_test_storage();
        let manager = ExpenseManager::new(&storage);

        let output = temp_dir.path().join("missing-dir").join("out.csv");
        let err = manager.export_to_csv(&output).unwrap_err();
        assert!(err.is_storage());
    }
}
