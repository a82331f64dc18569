//! Chart command implementation.
//!
//! Fetches a symbol's history and the quote snapshot, builds the chart rows
//! with the moving-average overlay, and prints or exports them.

use super::{Endpoints, parse_lookback, parse_symbol};
use crate::display::{Format, OhlcArg, print_chart, print_metrics, write_chart};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use quoteboard_lib::prelude::*;
use std::path::PathBuf;
use std::time::Duration;

/// Show or export one symbol's chart.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn chart(
    endpoints: &Endpoints,
    symbol: &str,
    period: &str,
    ma_period: usize,
    ohlc: OhlcArg,
    output: Option<PathBuf>,
    format: Format,
    quiet: bool,
) -> Result<()> {
    let symbol = parse_symbol(symbol)?;
    let lookback = parse_lookback(period)?;
    let builder = ChartBuilder::new()
        .with_period(ma_period)
        .with_policy(ohlc.into());

    let client = endpoints.client()?;

    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("Invalid progress template"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Fetching {symbol} ({lookback})"));
        pb
    };

    let (series, quotes) = tokio::join!(client.history(&symbol, lookback), client.quotes());
    let series = series.with_context(|| format!("Failed to fetch history for {symbol}"))?;
    // Market cap is optional; a failed snapshot only zeroes that card.
    let quotes = match quotes {
        Ok(quotes) => QuoteSnapshot::new(quotes, SnapshotSource::Poll),
        Err(e) => {
            tracing::warn!(error = %e, "quote snapshot unavailable");
            QuoteSnapshot::empty()
        }
    };

    spinner.finish_and_clear();

    let chart = builder.build(&series).context("Invalid moving-average period")?;

    if let Some(path) = output {
        write_chart(&chart, &path, format)?;
        if !quiet {
            println!("Output written to: {}", path.display());
        }
        return Ok(());
    }

    if chart.is_empty() {
        println!("No history for {symbol} over {lookback}.");
        return Ok(());
    }

    println!(
        "{symbol} {lookback}, {}-day MA, {} OHLC\n",
        chart.period, chart.policy
    );
    print_chart(&chart);

    if let Some(metrics) = PeriodMetrics::compute(&series, &quotes, symbol.as_str()) {
        println!();
        print_metrics(&metrics);
    }

    Ok(())
}
