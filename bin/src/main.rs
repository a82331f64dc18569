//! quoteboard CLI - Terminal stock dashboard with moving-average charts.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::{Format, OhlcArg};

#[derive(Parser)]
#[command(name = "quoteboard")]
#[command(about = "Terminal stock dashboard with moving-average charts and live quotes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Backend base URL
    #[arg(long, global = true, env = "QUOTEBOARD_API_URL", default_value = quoteboard_lib::DEFAULT_BASE_URL)]
    api_url: String,

    /// WebSocket feed URL (derived from --api-url when omitted)
    #[arg(long, global = true, env = "QUOTEBOARD_WS_URL")]
    ws_url: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the quote snapshot once and print the summary cards
    Quotes {
        /// Write the snapshot to a file instead of printing cards
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format for --output
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,
    },

    /// Show a symbol's chart rows with the moving-average overlay and metrics
    Chart {
        /// Ticker symbol (e.g., PLTR, HII)
        symbol: String,

        /// History lookback (1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max)
        #[arg(short, long, default_value = "1mo")]
        period: String,

        /// Moving-average window in trading days
        #[arg(long, default_value_t = quoteboard_lib::DEFAULT_PERIOD)]
        ma_period: usize,

        /// How open/high/low are derived
        #[arg(long, value_enum, default_value = "synthetic")]
        ohlc: OhlcArg,

        /// Export the rows to a file instead of printing them
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format for --output
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,
    },

    /// Live dashboard fed by the push feed with a polling backstop
    Watch {
        /// Symbol to chart (defaults to the first watchlist entry)
        #[arg(short, long)]
        symbol: Option<String>,

        /// History lookback for the selected symbol
        #[arg(short, long, default_value = "1mo")]
        period: String,

        /// Moving-average window in trading days
        #[arg(long, default_value_t = quoteboard_lib::DEFAULT_PERIOD)]
        ma_period: usize,

        /// Seconds between backstop polls
        #[arg(long, default_value = "5")]
        poll_interval: u64,

        /// Seconds of push silence before polling starts
        #[arg(long, default_value = "10")]
        push_timeout: u64,

        /// Poll only; do not connect to the push feed
        #[arg(long)]
        no_push: bool,
    },

    /// List the watchlist
    List {
        /// Search pattern (symbol, name or sector)
        #[arg(short, long)]
        search: Option<String>,
    },
}

/// Installs the log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let endpoints = commands::Endpoints {
        api_url: cli.api_url,
        ws_url: cli.ws_url,
    };

    match command {
        Commands::Quotes { output, format } => {
            commands::quotes::quotes(&endpoints, output, format).await
        }
        Commands::Chart {
            symbol,
            period,
            ma_period,
            ohlc,
            output,
            format,
        } => {
            commands::chart::chart(
                &endpoints,
                &symbol,
                &period,
                ma_period,
                ohlc,
                output,
                format,
                cli.quiet,
            )
            .await
        }
        Commands::Watch {
            symbol,
            period,
            ma_period,
            poll_interval,
            push_timeout,
            no_push,
        } => {
            let options = commands::watch::WatchOptions {
                symbol,
                period,
                ma_period,
                poll_interval,
                push_timeout,
                push: !no_push,
            };
            commands::watch::watch(&endpoints, options).await
        }
        Commands::List { search } => commands::list::list_watchlist(search.as_deref()),
    }
}
