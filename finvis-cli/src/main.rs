use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use finvis_core::{Transaction, time::today_in};
use finvis_finance::{
    Frequency, RecurringConfig, RecurringTemplate, SummationMode, build_chart, describe_schedule,
    expand, summarize,
};
use finvis_ingest::write_statement;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod import_cmd;
mod report;
mod state;

use config::{Config, init_config, load_config};
use state::{DataMode, Store};

#[derive(Parser, Debug)]
#[command(
    name = "finvis",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FINVIS_BUILD_SHA"), ")"),
    about = "Personal finance ledger: import bank statements, track recurring items, summarize"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import one or more bank CSV exports
    Import {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Add a transaction, optionally repeating on a schedule
    Add {
        /// Any supported date format; ISO is safest
        #[arg(long)]
        date: String,
        #[arg(long)]
        description: String,
        /// Negative for expenses
        #[arg(long, allow_hyphen_values = true)]
        amount: f64,
        #[arg(long)]
        category: Option<String>,
        /// weekly, bi-weekly or monthly (defaults to the configured frequency)
        #[arg(long)]
        every: Option<Frequency>,
        /// Number of occurrences, including the first
        #[arg(long)]
        periods: Option<u32>,
    },

    /// Remove a transaction; recurring transactions are removed with their whole series
    Remove { id: String },

    /// List transactions, newest first
    List {
        #[arg(long)]
        json: bool,
    },

    /// Income, expenses and net for the whole ledger
    Summary {
        #[arg(long, default_value_t = SummationMode::Total)]
        mode: SummationMode,
        #[arg(long)]
        json: bool,
    },

    /// Cumulative income/expense series by month
    Chart {
        #[arg(long)]
        json: bool,
    },

    /// Write the ledger as a statement that `import` reads back
    Export { path: PathBuf },

    /// Replace the ledger with generated sample data
    Demo,

    /// Empty the ledger
    Clear,

    /// Configuration file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let store = Store::from_env()?;
    let cfg = load_config(&store)?;
    let today = today_in(&cfg.timezone)?;

    match cli.command {
        Command::Import { files } => {
            let parser = cfg.parser(finvis_core::CSV_IMPORT_SOURCE)?;
            let outcomes = import_cmd::read_statements(&parser, files).await;
            let ledger = store.load_for_edit(today)?;
            let (ledger, summary) = import_cmd::merge(&ledger, outcomes)?;
            if summary.changes_ledger() {
                store.save(&ledger, DataMode::User)?;
            }

            println!(
                "Imported {} transactions from {} file(s); {} row(s) skipped",
                summary.imported, summary.files_ok, summary.skipped
            );
            if summary.ambiguous_dates > 0 {
                println!(
                    "{} date(s) could be read day-first or month-first; month-first was used",
                    summary.ambiguous_dates
                );
            }
            if summary.files_failed > 0 {
                bail!("{} file(s) could not be imported", summary.files_failed);
            }
        }

        Command::Add {
            date,
            description,
            amount,
            category,
            every,
            periods,
        } => {
            let date = cfg
                .date_formats()?
                .normalize(&date)
                .ok_or_else(|| anyhow!("unrecognized date '{date}'"))?
                .date;
            let added = build_added(&cfg, date, description, amount, category, every, periods)?;
            let count = added.transactions.len();
            let ledger = store
                .load_for_edit(today)?
                .with_transactions(added.transactions)?;
            store.save(&ledger, DataMode::User)?;
            if let Some(schedule) = &added.schedule {
                println!("Scheduled {}", describe_schedule(schedule));
            }
            println!("Added {count} transaction(s)");
        }

        Command::Remove { id } => {
            let (ledger, mode) = store.load(today)?;
            let removed = ledger.removal_targets(&id)?.len();
            let ledger = ledger.without(&id)?;
            store.save(&ledger, mode)?;
            println!("Removed {removed} transaction(s)");
        }

        Command::List { json } => {
            let (ledger, mode) = store.load(today)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&ledger.sorted_newest_first())?);
            } else {
                eprintln!("data mode: {mode}");
                print!("{}", report::render_list(&ledger));
            }
        }

        Command::Summary { mode, json } => {
            let (ledger, _) = store.load(today)?;
            let summary = summarize(ledger.transactions());
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", report::render_summary(&summary, mode));
            }
        }

        Command::Chart { json } => {
            let (ledger, _) = store.load(today)?;
            let series = build_chart(ledger.transactions(), today);
            if json {
                println!("{}", serde_json::to_string_pretty(&series)?);
            } else {
                print!("{}", report::render_chart(&series));
            }
        }

        Command::Export { path } => {
            let (ledger, _) = store.load(today)?;
            let file = std::fs::File::create(&path)
                .with_context(|| format!("create {}", path.display()))?;
            write_statement(ledger.transactions(), file)?;
            println!("Wrote {} transactions to {}", ledger.len(), path.display());
        }

        Command::Demo => {
            let ledger = store.reset_demo(today)?;
            println!("Loaded {} demo transactions", ledger.len());
        }

        Command::Clear => {
            store.clear()?;
            println!("Ledger cleared");
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => init_config(&store)?,
        },
    }

    Ok(())
}

/// Transactions produced by `add`, with the schedule when one was requested
#[derive(Debug)]
struct Added {
    transactions: Vec<Transaction>,
    schedule: Option<RecurringConfig>,
}

/// One transaction, or a full series when `--every` or `--periods` is given.
fn build_added(
    cfg: &Config,
    date: chrono::NaiveDate,
    description: String,
    amount: f64,
    category: Option<String>,
    every: Option<Frequency>,
    periods: Option<u32>,
) -> Result<Added> {
    if every.is_none() && periods.is_none() {
        if description.trim().is_empty() {
            bail!("description is required");
        }
        if !amount.is_finite() || amount == 0.0 {
            bail!("amount must be a non-zero number");
        }
        let mut txn = Transaction::new(date, description.trim(), amount);
        txn.category = category;
        return Ok(Added {
            transactions: vec![txn],
            schedule: None,
        });
    }

    let schedule = RecurringConfig::new(
        every.unwrap_or(cfg.recurring.default_frequency),
        periods.unwrap_or(1),
    );
    let mut template = RecurringTemplate::new(date, description, amount);
    template.category = category;
    Ok(Added {
        transactions: expand(&template, &schedule)?,
        schedule: Some(schedule),
    })
}
