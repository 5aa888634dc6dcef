//! The command-line front end for the gastos_rs expense tracker.
//!
//! This binary is only the event-dispatch layer: it parses a command, drives
//! the session, and prints the structured values the library returns.

use std::{env, fs::OpenOptions, process::ExitCode, sync::{Arc, OnceLock}};

use clap::{Parser, Subcommand};
use numfmt::{Formatter, Precision};
use time::PrimitiveDateTime;
use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use gastos_rs::{
    AppState, Error,
    record::{
        CategoryFilter, EditedExpense, ExpenseRecord, MonthBucket, MonthKey, NewExpense,
        parse_display_date,
    },
    store::GoogleSheetsStore,
};

/// A personal expense tracker backed by a Google Sheets spreadsheet.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The ID of the spreadsheet that stores the expenses.
    #[arg(long)]
    spreadsheet_id: String,

    /// The name of the sheet tab that holds the expense rows.
    #[arg(long, default_value = "Gastos")]
    sheet_name: String,

    /// The canonical timezone that anchors the current-month views.
    #[arg(long, default_value = "America/Bogota")]
    timezone: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the current month's expenses with the running total.
    List {
        /// Only show expenses whose description contains this text.
        #[arg(long, default_value = "")]
        search: String,

        /// Only show expenses in this category.
        #[arg(long)]
        category: Option<String>,
    },

    /// Record a new expense dated now.
    Add {
        /// How much money was spent.
        #[arg(long)]
        amount: f64,

        /// The expense category.
        #[arg(long, default_value = gastos_rs::record::DEFAULT_CATEGORY)]
        category: String,

        /// What the money was spent on.
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Replace the expense stored at a row.
    Edit {
        /// The spreadsheet row of the expense to replace.
        #[arg(long)]
        row: u32,

        /// The new date and time, e.g. "31/01/2026 09:30".
        #[arg(long, value_parser = parse_date_arg)]
        date: PrimitiveDateTime,

        /// The new amount.
        #[arg(long)]
        amount: f64,

        /// The new category.
        #[arg(long)]
        category: String,

        /// The new description.
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete the expense stored at a row.
    Delete {
        /// The spreadsheet row of the expense to delete.
        #[arg(long)]
        row: u32,
    },

    /// Show past months grouped with their subtotals.
    History,

    /// Show the current month's spending per category.
    Categories,

    /// List the periods available for export.
    Periods,

    /// Print one month's expenses in report order, with the period total.
    Export {
        /// The year of the period to export.
        #[arg(long)]
        year: i32,

        /// The month of the period to export, 1 through 12.
        #[arg(long)]
        month: u8,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();

    let access_token = env::var("SHEETS_ACCESS_TOKEN")
        .expect("The environment variable 'SHEETS_ACCESS_TOKEN' must be set");

    let store = GoogleSheetsStore::new(&args.spreadsheet_id, &args.sheet_name, &access_token);
    let mut session = match AppState::new(store, &args.timezone) {
        Ok(session) => session,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    match run(&mut session, args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Unauthorized) => {
            eprintln!("The access token was rejected. Sign in again and retry.");
            ExitCode::FAILURE
        }
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(
    session: &mut AppState<GoogleSheetsStore>,
    command: Command,
) -> Result<(), Error> {
    session.reload().await?;

    match command {
        Command::List { search, category } => {
            let category = match category {
                Some(category) => CategoryFilter::Named(category),
                None => CategoryFilter::All,
            };
            let view = session.current_view(&search, category)?;

            print_records(&view.records);
            println!("Total: {}", currency(view.total));
        }
        Command::Add {
            amount,
            category,
            description,
        } => {
            session
                .add(NewExpense {
                    amount,
                    category,
                    description,
                })
                .await?;
            println!("Added. {} records on the sheet.", session.records().len());
        }
        Command::Edit {
            row,
            date,
            amount,
            category,
            description,
        } => {
            session
                .update(
                    row,
                    EditedExpense {
                        occurred_at: date,
                        amount,
                        category,
                        description,
                    },
                )
                .await?;
            println!("Updated row {row}.");
        }
        Command::Delete { row } => {
            session.delete(row).await?;
            println!("Deleted row {row}.");
        }
        Command::History => {
            let buckets = session.history_view()?;

            if buckets.is_empty() {
                println!("No expenses from earlier months.");
            }

            for bucket in &buckets {
                print_bucket(bucket);
            }
        }
        Command::Categories => {
            let view = session.current_view("", CategoryFilter::All)?;

            let mut totals: Vec<(&String, &f64)> = view.by_category.iter().collect();
            totals.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));

            for (category, total) in totals {
                println!("{category:<16} {}", currency(*total));
            }
        }
        Command::Periods => {
            for year in session.export_years()? {
                let months: Vec<String> = session
                    .export_months(year)
                    .into_iter()
                    .map(|month| format!("{month:02}"))
                    .collect();
                println!("{year}: {}", months.join(" "));
            }
        }
        Command::Export { year, month } => {
            let view = session.export_view(MonthKey { year, month });

            if view.records.is_empty() {
                println!("No expenses recorded for {}.", view.period);
                return Ok(());
            }

            println!("Period: {}", view.period);
            print_records(&view.records);
            println!("Total: {}", currency(view.total));
        }
    }

    Ok(())
}

fn print_records(records: &[ExpenseRecord]) {
    for record in records {
        println!(
            "{:>4}  {:<16}  {:<12}  {:<32}  {:>12}",
            record.row_position,
            record.display_date,
            record.category,
            record.description,
            currency(record.amount)
        );
    }
}

fn print_bucket(bucket: &MonthBucket) {
    println!("== {} ({})", bucket.key, currency(bucket.total));
    print_records(&bucket.records);
}

fn parse_date_arg(text: &str) -> Result<PrimitiveDateTime, String> {
    parse_display_date(text).ok_or_else(|| format!("could not read \"{text}\" as a date"))
}

/// Formats an amount in the COP style the sheet's owner expects: dollar
/// sign, thousands separators, no decimals.
fn currency(number: f64) -> String {
    static FMT: OnceLock<Formatter> = OnceLock::new();

    let fmt = FMT.get_or_init(|| {
        Formatter::currency("$")
            .unwrap()
            .precision(Precision::Decimals(0))
    });

    fmt.fmt_string(number)
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}
