use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use finsight::cli::{handle_export_command, handle_summary_command, ExportCommands, SummaryArgs};
use finsight::config::{FinsightPaths, Settings};
use finsight::models::KNOWN_CATEGORIES;
use finsight::storage::{initialize_storage, needs_initialization, RecordStore};

#[derive(Parser)]
#[command(
    name = "finsight",
    version,
    about = "Income and expense analytics from the command line",
    long_about = "finsight filters your income and expense records, summarises them \
                  by month and category, and exports the filtered records or the \
                  summary for spreadsheets and documents."
)]
struct Cli {
    /// Income records (JSON array) to use instead of the data directory
    #[arg(long, global = true, env = "FINSIGHT_INCOME_FILE")]
    income: Option<PathBuf>,

    /// Expense records (JSON array) to use instead of the data directory
    #[arg(long, global = true, env = "FINSIGHT_EXPENSES_FILE")]
    expenses: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show totals, extremal months and top spending categories
    #[command(alias = "report")]
    Summary(SummaryArgs),

    /// Export filtered records or the summary report
    #[command(subcommand)]
    Export(ExportCommands),

    /// Create the data directory with empty record files
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_store(
    paths: &FinsightPaths,
    income: Option<PathBuf>,
    expenses: Option<PathBuf>,
) -> Result<RecordStore> {
    let income = income.unwrap_or_else(|| paths.income_file());
    let expenses = expenses.unwrap_or_else(|| paths.expenses_file());
    Ok(RecordStore::load_files(income, expenses)?)
}

fn main() -> Result<()> {
    let Cli {
        income,
        expenses,
        verbose,
        command,
    } = Cli::parse();
    init_tracing(verbose);

    let paths = FinsightPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match command {
        Some(Commands::Summary(args)) => {
            let store = load_store(&paths, income, expenses)?;
            handle_summary_command(&store, &settings, args)?;
        }
        Some(Commands::Export(cmd)) => {
            let store = load_store(&paths, income, expenses)?;
            handle_export_command(&store, &settings, &paths, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing finsight at: {}", paths.base_dir().display());
            if !needs_initialization(&paths) {
                println!("Record files already present; leaving them untouched.");
            }
            initialize_storage(&paths)?;
            let mut settings = settings;
            settings.setup_completed = true;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Place your records in:");
            println!("  {}", paths.income_file().display());
            println!("  {}", paths.expenses_file().display());
            println!();
            println!("Run 'finsight summary' to see the dashboard.");
        }
        Some(Commands::Config) => {
            println!("finsight Configuration");
            println!("======================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Data directory:    {}", paths.data_dir().display());
            println!("Exports directory: {}", paths.exports_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Top categories:      {}", settings.top_category_limit);
            println!(
                "  Spending threshold:  {}",
                settings.format_money(settings.spending_threshold)
            );
            println!(
                "  Page:                {} x {} (image width {}, margin {})",
                settings.page.page_width,
                settings.page.page_height,
                settings.page.image_width,
                settings.page.margin_left
            );
            println!();
            let categories: Vec<&str> = KNOWN_CATEGORIES
                .iter()
                .copied()
                .filter(|c| !c.is_empty())
                .collect();
            println!("Known categories: {}", categories.join(", "));
        }
        None => {
            println!("finsight - income and expense analytics");
            println!();
            println!("Run 'finsight --help' for usage information.");
            println!("Run 'finsight summary' to see the dashboard.");
        }
    }

    Ok(())
}
