//! Display utilities and output formatting for the quoteboard CLI.

use anyhow::{Context, Result};
use clap::ValueEnum;
use quoteboard_lib::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Output format for exported data.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
        }
    }
}

/// How open/high/low are derived for chart rows.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum OhlcArg {
    /// Open from the previous close, high/low from a fixed band around the close
    Synthetic,
    /// Real open/high/low when the backend supplies them
    Reported,
}

impl From<OhlcArg> for OhlcPolicy {
    fn from(arg: OhlcArg) -> Self {
        match arg {
            OhlcArg::Synthetic => Self::Synthetic,
            OhlcArg::Reported => Self::Reported,
        }
    }
}

/// Formats large counts with a T/B/M/K suffix (e.g., "13.20B").
pub(crate) fn format_compact(value: u64) -> String {
    const K: u64 = 1_000;
    const M: u64 = 1_000 * K;
    const B: u64 = 1_000 * M;
    const T: u64 = 1_000 * B;

    if value >= T {
        format!("{:.2}T", value as f64 / T as f64)
    } else if value >= B {
        format!("{:.2}B", value as f64 / B as f64)
    } else if value >= M {
        format!("{:.2}M", value as f64 / M as f64)
    } else if value >= K {
        format!("{:.2}K", value as f64 / K as f64)
    } else {
        value.to_string()
    }
}

/// Formats a signed change with an explicit sign.
pub(crate) fn format_change(change: f64, change_pct: f64) -> String {
    format!("{change:+.2} ({change_pct:+.2}%)")
}

/// Prints one summary card per quote.
pub(crate) fn print_quote_cards(quotes: &[Quote]) {
    println!(
        "{:<8} {:>10} {:>20} {:>10} {:>10} {:>8} {:>8}",
        "SYMBOL", "PRICE", "CHANGE", "VOLUME", "MKT CAP", "P/E", "EPS"
    );
    println!("{}", "-".repeat(80));

    for q in quotes {
        let arrow = if q.is_up() {
            "▲"
        } else if q.is_down() {
            "▼"
        } else {
            " "
        };
        println!(
            "{:<8} {:>10.2} {:>18} {} {:>10} {:>10} {:>8.2} {:>8.2}",
            q.symbol.as_str(),
            q.current_value,
            format_change(q.change, q.change_pct),
            arrow,
            format_compact(q.volume),
            format_compact(q.market_cap),
            q.pe_ratio,
            q.eps,
        );
    }
}

/// Prints the period metrics cards.
pub(crate) fn print_metrics(metrics: &PeriodMetrics) {
    println!(
        "Price range:    {:.2} - {:.2}",
        metrics.lowest_price, metrics.highest_price
    );
    println!(
        "Volume range:   {} - {}",
        format_compact(metrics.lowest_volume),
        format_compact(metrics.highest_volume)
    );
    println!("Average volume: {}", format_compact(metrics.average_volume));
    println!("Market cap:     {}", format_compact(metrics.current_market_cap));
}

/// Prints chart rows with the overlay column.
pub(crate) fn print_chart(chart: &ChartSeries) {
    println!(
        "{:<12} {:>10} {:>10} {:>10} {:>10} {:>12} {:>10}",
        "DATE", "OPEN", "HIGH", "LOW", "CLOSE", "VOLUME", "MA"
    );
    println!("{}", "-".repeat(80));

    for bar in &chart.bars {
        let ma = bar.ma.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
        println!(
            "{:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12} {:>10}",
            bar.date,
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            format_compact(bar.volume),
            ma
        );
    }
}

/// Writes chart rows to a file in the specified format.
pub(crate) fn write_chart(chart: &ChartSeries, output: &Path, format: Format) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    OutputFormat::from(format).write_chart(chart, BufWriter::new(file))?;
    Ok(())
}

/// Writes a quote snapshot to a file in the specified format.
pub(crate) fn write_quotes(quotes: &[Quote], output: &Path, format: Format) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    OutputFormat::from(format).write_quotes(quotes, BufWriter::new(file))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(950), "950");
        assert_eq!(format_compact(1_500), "1.50K");
        assert_eq!(format_compact(2_400_000), "2.40M");
        assert_eq!(format_compact(13_200_000_000), "13.20B");
        assert_eq!(format_compact(1_100_000_000_000), "1.10T");
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(2.5, 0.934), "+2.50 (+0.93%)");
        assert_eq!(format_change(-1.0, -0.5), "-1.00 (-0.50%)");
    }

    #[test]
    fn test_write_chart_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pltr.csv");
        let observations = [20.0, 21.0, 22.0]
            .iter()
            .enumerate()
            .map(|(i, &c)| Observation::new(format!("2024-04-0{}", i + 1), c, 1_000))
            .collect();
        let series = Series::new(Symbol::new("PLTR").unwrap(), observations);
        let chart = ChartBuilder::new().with_period(2).build(&series).unwrap();

        write_chart(&chart, &path, Format::Csv).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = written.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[3].ends_with(",21.5"));
    }

    #[test]
    fn test_write_quotes_ndjson() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.ndjson");
        let quotes: Vec<Quote> = ["HII", "GD"]
            .iter()
            .map(|s| Quote {
                symbol: Symbol::new(s).unwrap(),
                current_value: 100.0,
                previous_close: 99.0,
                change: 1.0,
                change_pct: 1.01,
                volume: 10,
                market_cap: 1_000,
                pe_ratio: 15.0,
                eps: 6.6,
            })
            .collect();

        write_quotes(&quotes, &path, Format::Ndjson).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 2);
    }
}
