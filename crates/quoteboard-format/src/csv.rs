//! CSV output format.

use quoteboard_aggregate::ChartSeries;
use quoteboard_types::Quote;
use std::borrow::Cow;
use std::io::Write;

use crate::{FormatError, Formatter};

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }

    /// Quotes a free-form field if it contains the delimiter, a quote or a newline.
    fn escape<'a>(&self, field: &'a str) -> Cow<'a, str> {
        if field.contains(self.delimiter) || field.contains(['"', '\n', '\r']) {
            Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
        } else {
            Cow::Borrowed(field)
        }
    }
}

impl Formatter for CsvFormatter {
    fn write_chart<W: Write + Send>(
        &self,
        chart: &ChartSeries,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "date{d}open{d}high{d}low{d}close{d}volume{d}ma")?;
        }

        for bar in &chart.bars {
            let ma = bar.ma.map(|v| v.to_string()).unwrap_or_default();
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                self.escape(&bar.date),
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.volume,
                ma
            )?;
        }

        Ok(())
    }

    fn write_quotes<W: Write + Send>(
        &self,
        quotes: &[Quote],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(
                writer,
                "symbol{d}current_value{d}previous_close{d}change{d}change_pct{d}volume{d}market_cap{d}pe_ratio{d}eps"
            )?;
        }

        for q in quotes {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                q.symbol,
                q.current_value,
                q.previous_close,
                q.change,
                q.change_pct,
                q.volume,
                q.market_cap,
                q.pe_ratio,
                q.eps
            )?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quoteboard_aggregate::ChartBuilder;
    use quoteboard_types::{Observation, Series, Symbol};
    use std::io::Cursor;

    fn create_test_chart() -> ChartSeries {
        let observations = [10.0, 12.0, 11.0]
            .iter()
            .enumerate()
            .map(|(i, &c)| Observation::new(format!("2024-01-0{}", i + 2), c, 1000))
            .collect();
        let series = Series::new(Symbol::new("HII").unwrap(), observations);
        ChartBuilder::new().with_period(2).build(&series).unwrap()
    }

    #[test]
    fn test_csv_chart() {
        let formatter = CsvFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter.write_chart(&create_test_chart(), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines[0], "date,open,high,low,close,volume,ma");
        assert!(lines[1].starts_with("2024-01-02,10,"));
        assert!(lines[1].ends_with(",1000,"));
        assert!(lines[2].ends_with(",1000,11"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_csv_no_header() {
        let formatter = CsvFormatter::new().with_header(false);
        let mut output = Cursor::new(Vec::new());

        formatter.write_chart(&create_test_chart(), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(!result.contains("date,open"));
    }

    #[test]
    fn test_tsv() {
        let formatter = CsvFormatter::tsv();
        let mut output = Cursor::new(Vec::new());

        formatter.write_chart(&create_test_chart(), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains("date\topen\thigh"));
    }

    #[test]
    fn test_escape_labels() {
        let formatter = CsvFormatter::new();
        assert_eq!(formatter.escape("2024-01-02"), "2024-01-02");
        assert_eq!(formatter.escape("Jan 2, 2024"), "\"Jan 2, 2024\"");
        assert_eq!(formatter.escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_csv_quotes() {
        let quote: Quote = serde_json::from_str(
            r#"{"symbol":"GD","currentValue":270.5,"previousClose":268.0,"change":2.5,
                "changePct":0.93,"volume":900000,"marketCap":74000000000,"peRatio":21.4,"eps":12.6}"#,
        )
        .unwrap();
        let mut output = Cursor::new(Vec::new());

        CsvFormatter::new().write_quotes(&[quote], &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.starts_with("symbol,current_value,"));
        assert!(result.contains("GD,270.5,268,2.5,0.93,900000,74000000000,21.4,12.6"));
    }
}
