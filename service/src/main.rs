#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout)]

use billwatch::{
    api::{BillsApi, DEFAULT_RECENT_LIMIT},
    config::Config,
    source::build_source,
    status::build_board,
    views::{AmendmentView, SummaryCard},
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Congressional bills, amendments and AI summaries from the bills API.
#[derive(Debug, Parser)]
#[command(name = "billwatch", version)]
struct Cli {
    /// Serve the bundled mock dataset regardless of configuration
    #[arg(long, global = true)]
    mock: bool,

    /// Path to the YAML configuration file
    #[arg(long, global = true, default_value = "billwatch.yaml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Most recently updated summaries
    Recent {
        #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
        limit: usize,
    },
    /// One bill with its amendments and summary
    Bill {
        congress: u32,
        bill_type: String,
        number: u32,
    },
    /// One amendment with its summary
    Amendment {
        congress: u32,
        amendment_type: String,
        number: u32,
    },
    /// Backend ingestion errors
    Errors,
    /// House / Senate / President status for recently summarized bills
    Board {
        #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
        limit: usize,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(api: &dyn BillsApi, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Recent { limit } => {
            let summaries = api.get_recent_summaries(limit).await?;
            let cards: Vec<_> = summaries.iter().map(SummaryCard::new).collect();
            print_json(&cards)
        }
        Command::Bill {
            congress,
            bill_type,
            number,
        } => print_json(&api.get_bill(congress, &bill_type, number).await?),
        Command::Amendment {
            congress,
            amendment_type,
            number,
        } => {
            let amendment = api.get_amendment(congress, &amendment_type, number).await?;
            print_json(&AmendmentView::new(&amendment))
        }
        Command::Errors => print_json(&api.get_processing_errors().await?),
        Command::Board { limit } => print_json(&build_board(api, limit).await?),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load and validate configuration first (fail-fast)
    let mut config = Config::load_from(&cli.config).map_err(|e| anyhow::anyhow!("{e}"))?;
    if cli.mock {
        config.api.mock_mode = true;
    }

    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.level)?)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        mock_mode = config.api.mock_mode,
        "billwatch starting up"
    );

    let api = build_source(&config)?;
    run(&*api, cli.command).await
}
