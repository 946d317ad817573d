//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod expense;
pub mod export;
pub mod history;

pub use budget::{
    handle_set_budget, handle_show_budget, parse_category_limits, SetBudgetArgs, ShowBudgetArgs,
};
pub use expense::{
    handle_add, handle_category_summary, handle_list, handle_monthly_summary, AddArgs,
    CategorySummaryArgs, ListArgs, MonthlySummaryArgs,
};
pub use export::{handle_export, ExportArgs};
pub use history::{handle_history, HistoryArgs};
