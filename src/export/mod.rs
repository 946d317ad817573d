//! Export module for the expense tracker
//!
//! Flat-file export of the expense collection (CSV, spreadsheet-compatible).

pub mod csv;

pub use self::csv::{export_expenses_csv, EXPENSE_CSV_HEADER};
