//! CLI command for CSV export

use std::path::PathBuf;

use clap::Args;

use crate::error::ExpenseResult;
use crate::services::ExpenseManager;
use crate::storage::Storage;

/// Arguments for `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output CSV file path
    #[arg(long)]
    pub output: PathBuf,
}

/// Handle `export`
pub fn handle_export(storage: &Storage, args: ExportArgs) -> ExpenseResult<()> {
    let manager = ExpenseManager::new(storage);
    manager.export_to_csv(&args.output)?;

    println!("Expenses exported successfully to {}", args.output.display());
    Ok(())
}
