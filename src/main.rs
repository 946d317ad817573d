use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_tracker::cli::{
    handle_add, handle_category_summary, handle_export, handle_history, handle_list,
    handle_monthly_summary, handle_set_budget, handle_show_budget, AddArgs, CategorySummaryArgs,
    ExportArgs, HistoryArgs, ListArgs, MonthlySummaryArgs, SetBudgetArgs, ShowBudgetArgs,
};
use expense_tracker::config::{Settings, TrackerPaths};
use expense_tracker::storage::Storage;
use expense_tracker::ExpenseError;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Personal expense tracker",
    long_about = "Record expenses, set monthly budgets with per-category limits, \
                  and get warned when spending goes over them."
)]
struct Cli {
    /// Directory holding settings, the audit log and the data files
    #[arg(long, env = "EXPENSE_TRACKER_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new expense
    Add(AddArgs),

    /// Set the budget for a month
    SetBudget(SetBudgetArgs),

    /// Total spending in a category
    CategorySummary(CategorySummaryArgs),

    /// Total spending in a month
    MonthlySummary(MonthlySummaryArgs),

    /// List recorded expenses
    List(ListArgs),

    /// Show a month's budget against its spending
    ShowBudget(ShowBudgetArgs),

    /// Export all expenses to CSV
    Export(ExportArgs),

    /// Show recent changes from the audit log
    History(HistoryArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ExpenseError>() {
                Some(domain) if domain.is_domain() => eprintln!("{}", domain),
                _ => eprintln!("Unexpected error: {}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // Initialize paths and settings
    let paths = TrackerPaths::new(cli.data_dir)?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?.with_audit(settings.audit_enabled);

    match cli.command {
        Commands::Add(args) => handle_add(&storage, &settings, args)?,
        Commands::SetBudget(args) => handle_set_budget(&storage, args)?,
        Commands::CategorySummary(args) => handle_category_summary(&storage, &settings, args)?,
        Commands::MonthlySummary(args) => handle_monthly_summary(&storage, &settings, args)?,
        Commands::List(args) => handle_list(&storage, &settings, args)?,
        Commands::ShowBudget(args) => handle_show_budget(&storage, &settings, args)?,
        Commands::Export(args) => handle_export(&storage, args)?,
        Commands::History(args) => handle_history(&storage, args)?,
        Commands::Config => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Expenses file:    {}", paths.expenses_file().display());
            println!("Budgets file:     {}", paths.budgets_file().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Audit logging:   {}", settings.audit_enabled);
        }
    }

    Ok(())
}
