//! CLI command for reading back the audit log

use clap::Args;

use crate::error::ExpenseResult;
use crate::storage::Storage;

/// Arguments for `history`
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Number of entries to show
    #[arg(short, long, default_value_t = 10)]
    pub count: usize,
}

/// Handle `history`
pub fn handle_history(storage: &Storage, args: HistoryArgs) -> ExpenseResult<()> {
    let logger = match storage.audit() {
        Some(logger) if logger.exists() => logger,
        Some(_) => {
            println!("No history recorded yet.");
            return Ok(());
        }
        None => {
            println!("Audit logging is disabled.");
            return Ok(());
        }
    };

    let entries = logger.read_recent(args.count)?;
    if entries.is_empty() {
        println!("No history recorded yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
