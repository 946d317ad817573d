//! CSV export
//!
//! Writes expenses as `ID,Date,Description,Amount,Category` rows. Dates are
//! `YYYY-MM-DD` and amounts are plain decimals without a currency symbol.

use std::io::Write;

use crate::error::ExpenseResult;
use crate::models::Expense;

/// Header row of the expense export
pub const EXPENSE_CSV_HEADER: [&str; 5] = ["ID", "Date", "Description", "Amount", "Category"];

/// Export expenses to CSV in the order given
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: &mut W) -> ExpenseResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(EXPENSE_CSV_HEADER)?;

    for expense in expenses {
        let id = expense.id().map(|id| id.to_string()).unwrap_or_default();
        let date = expense.date().format("%Y-%m-%d").to_string();
        let amount = expense.amount().to_plain_string();

        wtr.write_record([
            id.as_str(),
            date.as_str(),
            expense.description(),
            amount.as_str(),
            expense.category(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
