//! Live dashboard command.

use super::{Endpoints, parse_lookback, parse_symbol};
use crate::display::{format_compact, print_metrics, print_quote_cards};
use anyhow::{Context, Result};
use quoteboard_lib::prelude::*;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

/// Options for the watch command.
pub(crate) struct WatchOptions {
    pub(crate) symbol: Option<String>,
    pub(crate) period: String,
    pub(crate) ma_period: usize,
    pub(crate) poll_interval: u64,
    pub(crate) push_timeout: u64,
    pub(crate) push: bool,
}

/// Number of trailing chart rows shown under the cards.
const RECENT_ROWS: usize = 5;

/// Run the live dashboard until Ctrl+C.
pub(crate) async fn watch(endpoints: &Endpoints, options: WatchOptions) -> Result<()> {
    let symbol = match options.symbol.as_deref() {
        Some(s) => parse_symbol(s)?,
        None => Watchlist::global()
            .first()
            .cloned()
            .context("Watchlist is empty")?,
    };
    let lookback = parse_lookback(&options.period)?;

    let client = Arc::new(endpoints.client()?);
    let channel_config = ChannelConfig::default()
        .with_poll_interval(Duration::from_secs(options.poll_interval.max(1)))
        .with_push_timeout(Duration::from_secs(options.push_timeout));

    let mut channel = UpdateChannel::polling(client.clone()).with_config(channel_config);
    if options.push {
        channel = channel.with_push(Arc::new(endpoints.feed()?));
    }
    let snapshots = channel.spawn(8);

    let view = ViewConfig::default()
        .with_lookback(lookback)
        .with_chart(ChartBuilder::new().with_period(options.ma_period));
    let handle = Dashboard::new(client, DashboardState::new(view)).spawn(snapshots);
    let mut updates = handle.subscribe();

    if !handle.select(symbol.clone()).await {
        anyhow::bail!("Dashboard stopped before {symbol} could be selected");
    }

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                render(&state)?;
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    handle.shutdown().await;
    Ok(())
}

fn render(state: &DashboardState) -> Result<()> {
    // Clear screen
    print!("\x1B[2J\x1B[1;1H");
    std::io::stdout().flush()?;

    let updated = state
        .updated_at()
        .map_or_else(|| "waiting for quotes".to_string(), |t| t.format("%H:%M:%S").to_string());
    println!(
        "quoteboard (updated {updated}, source {}, Ctrl+C to exit)\n",
        state.quotes().source
    );

    if !state.quotes().is_empty() {
        print_quote_cards(&state.quotes().quotes);
        println!();
    }

    let Some(symbol) = state.selected() else {
        return Ok(());
    };

    let status = if state.is_loading() {
        " (loading)"
    } else {
        ""
    };
    println!("{symbol} {}{status}", state.config().lookback);

    if let Some(error) = state.last_error() {
        println!("Last fetch failed: {error}");
    }

    if let Some(chart) = state.chart() {
        let skip = chart.len().saturating_sub(RECENT_ROWS);
        for bar in chart.bars.iter().skip(skip) {
            let ma = bar.ma.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
            println!(
                "  {:<12} close {:>10.2}  MA({}) {:>10}  vol {:>8}",
                bar.date,
                bar.close,
                chart.period,
                ma,
                format_compact(bar.volume)
            );
        }
    }

    if let Some(metrics) = state.metrics() {
        println!();
        print_metrics(metrics);
    }

    Ok(())
}
