//! Terminal front-end for recording and reviewing transactions.

use std::io::{self, Write as _};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::builder::{PossibleValuesParser, TypedValueParser as _};
use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, Table};
use fintrack_rs::display::{DEFAULT_PAGE_SIZE, Page, format_brl, format_date, paginate};
use fintrack_rs::ledger::{Ledger, NewTransaction};
use fintrack_rs::models::{
    DisplaySort, FilterType, FinancialSummary, NaiveDate, Transaction, TransactionKey, parse_date,
};
use fintrack_rs::storage::{FileStorage, Storage};
use owo_colors::OwoColorize;

/// Environment variable overriding the storage directory.
const DATA_DIR_ENV: &str = "FINTRACK_DATA_DIR";

/// Record income and expenses, and review totals.
#[derive(Debug, Parser)]
#[command(name = "fintrack", version, about)]
struct Cli {
    /// Override the storage directory (default: $FINTRACK_DATA_DIR, then
    /// the XDG data dir).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Record a new transaction. Negative amounts are expenses.
    Add(AddArgs),
    /// Delete a transaction by its key.
    Delete {
        /// Key shown in the `list` table.
        key: String,
    },
    /// Show totals and a page of transactions.
    List(ListArgs),
    /// Show income, expenses, balance and savings rate.
    Summary,
}

/// Arguments for the `add` subcommand.
#[derive(Debug, Args)]
struct AddArgs {
    /// What the money was for.
    #[arg(long)]
    description: String,
    /// Signed amount (e.g. 1500 or -49.90).
    #[arg(long, allow_negative_numbers = true)]
    amount: f64,
    /// Date (YYYY-MM-DD or DD/MM/YYYY).
    #[arg(long, value_parser = parse_date_arg)]
    date: NaiveDate,
}

/// Arguments for the `list` subcommand.
#[derive(Debug, Args)]
struct ListArgs {
    /// Only show income or only show expenses (`income` or `expense`).
    #[arg(long, value_parser = parse_filter_arg)]
    filter: Option<FilterType>,
    /// Table ordering.
    #[arg(
        long,
        default_value = "date",
        value_parser = PossibleValuesParser::new(DisplaySort::NAMES)
            .map(|name| DisplaySort::from_name(&name))
    )]
    sort: DisplaySort,
    /// Page to show (1-based).
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Rows per page.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
}

/// Parses a date argument for clap.
fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("invalid date `{s}` (expected YYYY-MM-DD or DD/MM/YYYY)"))
}

/// Parses a `--filter` value.
fn parse_filter_arg(s: &str) -> Result<FilterType, String> {
    FilterType::from_name(s).ok_or_else(|| {
        format!(
            "unknown filter `{s}` (expected one of: {})",
            FilterType::NAMES.join(", ")
        )
    })
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let _dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let storage = match create_storage(cli.data_dir) {
        Ok(storage) => storage,
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to initialize storage: {err}",
                "error:".red().bold()
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut ledger = match Ledger::open(storage) {
        Ok(ledger) => ledger,
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to load transactions: {err}",
                "error:".red().bold()
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    dispatch(&mut ledger, cli.command)
}

/// Resolves the storage directory: flag, then environment, then the
/// platform default.
fn resolve_data_dir(data_dir: Option<PathBuf>) -> fintrack_rs::error::Result<PathBuf> {
    if let Some(dir) = data_dir {
        return Ok(dir);
    }
    match std::env::var(DATA_DIR_ENV) {
        Ok(val) if !val.is_empty() => Ok(PathBuf::from(val)),
        _ => FileStorage::default_dir(),
    }
}

/// Creates the file storage backend.
fn create_storage(data_dir: Option<PathBuf>) -> fintrack_rs::error::Result<FileStorage> {
    FileStorage::new(resolve_data_dir(data_dir)?)
}

/// Dispatches to the appropriate subcommand handler.
fn dispatch<S: Storage>(ledger: &mut Ledger<S>, command: Command) -> io::Result<ExitCode> {
    match command {
        Command::Add(args) => cmd_add(ledger, args),
        Command::Delete { key } => cmd_delete(ledger, &TransactionKey::new(key)),
        Command::List(args) => cmd_list(ledger, &args),
        Command::Summary => cmd_summary(ledger),
    }
}

/// Executes the `add` subcommand.
fn cmd_add<S: Storage>(ledger: &mut Ledger<S>, args: AddArgs) -> io::Result<ExitCode> {
    let entry = NewTransaction::new(args.description, args.amount, Some(args.date));
    match ledger.add(entry) {
        Ok(tx) => {
            writeln!(
                io::stdout().lock(),
                "{} {} {}",
                "Transaction added!".green().bold(),
                tx.description,
                format_args!("(key {})", tx.key).dimmed()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => report_error("could not add transaction", &err),
    }
}

/// Executes the `delete` subcommand.
fn cmd_delete<S: Storage>(ledger: &mut Ledger<S>, key: &TransactionKey) -> io::Result<ExitCode> {
    match ledger.delete(key) {
        Ok(tx) => {
            writeln!(
                io::stdout().lock(),
                "{} {}",
                "Transaction deleted!".green().bold(),
                tx.description
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => report_error("could not delete transaction", &err),
    }
}

/// Executes the `list` subcommand: totals cards, then one table page.
fn cmd_list<S: Storage>(ledger: &Ledger<S>, args: &ListArgs) -> io::Result<ExitCode> {
    print_totals(&ledger.summary())?;
    let rows = ledger.view(args.filter, args.sort);
    let page = paginate(&rows, args.page, args.page_size);
    print_transactions_table(&page, args.sort)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `summary` subcommand.
fn cmd_summary<S: Storage>(ledger: &Ledger<S>) -> io::Result<ExitCode> {
    print_summary(&ledger.summary(), ledger.transactions().len())?;
    Ok(ExitCode::SUCCESS)
}

/// Prints a failed operation to stderr and returns a failure code.
fn report_error(context: &str, err: &fintrack_rs::error::FintrackError) -> io::Result<ExitCode> {
    writeln!(
        io::stderr().lock(),
        "{} {context}: {err}",
        "error:".red().bold()
    )?;
    Ok(ExitCode::FAILURE)
}

/// Colors an amount cell green for income and red for expenses.
fn amount_cell(amount: f64) -> Cell {
    let cell = Cell::new(format_brl(amount)).set_alignment(CellAlignment::Right);
    if amount >= 0.0_f64 {
        cell.fg(Color::Green)
    } else {
        cell.fg(Color::Red)
    }
}

/// Prints the income / expenses / balance cards.
fn print_totals(summary: &FinancialSummary) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Total income").fg(Color::Cyan),
        Cell::new("Total expenses").fg(Color::Cyan),
        Cell::new("Current balance").fg(Color::Cyan),
    ]);
    _ = table.add_row(vec![
        amount_cell(summary.income),
        amount_cell(-summary.expenses),
        amount_cell(summary.balance),
    ]);
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints one page of transactions in a table.
fn print_transactions_table(page: &Page<'_, Transaction>, sort: DisplaySort) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if page.total_items == 0 {
        writeln!(out, "{}", "No transactions found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Key").fg(Color::Cyan),
        Cell::new("Description").fg(Color::Cyan),
        Cell::new("Amount").fg(Color::Cyan),
        Cell::new("Date").fg(Color::Cyan),
    ]);

    for tx in page.items {
        _ = table.add_row(vec![
            Cell::new(&tx.key).fg(Color::DarkGrey),
            Cell::new(&tx.description),
            amount_cell(tx.amount),
            Cell::new(format_date(&tx.date)),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        "Transaction history".green().bold(),
        format_args!("(by {})", sort.field_name()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    writeln!(
        out,
        "{}",
        format_args!(
            "Page {} of {} ({} transactions)",
            page.number, page.total_pages, page.total_items
        )
        .dimmed()
    )?;
    Ok(())
}

/// Prints the summary figures.
fn print_summary(summary: &FinancialSummary, count: usize) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Figure").fg(Color::Cyan),
        Cell::new("Value").fg(Color::Cyan),
    ]);
    _ = table.add_row(vec![Cell::new("Income"), amount_cell(summary.income)]);
    _ = table.add_row(vec![Cell::new("Expenses"), amount_cell(-summary.expenses)]);
    _ = table.add_row(vec![Cell::new("Balance"), amount_cell(summary.balance)]);
    _ = table.add_row(vec![
        Cell::new("Savings rate"),
        Cell::new(format!("{:.2}%", summary.savings_rate)).set_alignment(CellAlignment::Right),
    ]);

    writeln!(
        out,
        "{} {}",
        "Summary".green().bold(),
        format_args!("({count} transactions)").dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Entry point.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            // Last-resort error output; if stderr itself failed there is
            // nothing left to do.
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}
