//! Daily observations and per-symbol history series.

use serde::{Deserialize, Serialize};

use crate::{DataShapeError, Symbol};

/// Open, high and low as reported by the data source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportedRange {
    /// Opening price.
    pub open: f64,
    /// Highest price of the day.
    pub high: f64,
    /// Lowest price of the day.
    pub low: f64,
}

/// A single daily observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Opaque date label, unique within a series.
    pub date: String,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: u64,
    /// Reported OHLC fields, when the data source supplied them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported: Option<ReportedRange>,
}

impl Observation {
    /// Creates an observation without reported OHLC fields.
    #[must_use]
    pub fn new(date: impl Into<String>, close: f64, volume: u64) -> Self {
        Self {
            date: date.into(),
            close,
            volume,
            reported: None,
        }
    }

    /// Attaches reported OHLC fields.
    #[must_use]
    pub const fn with_reported(mut self, reported: ReportedRange) -> Self {
        self.reported = Some(reported);
        self
    }
}

/// Raw history payload as delivered by the chart endpoint.
///
/// Arrays are parallel and ordered most-recent-last. The `open`, `high` and
/// `low` arrays are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryPayload {
    /// Date labels (`YYYY-MM-DD`).
    pub dates: Vec<String>,
    /// Closing prices.
    pub prices: Vec<f64>,
    /// Daily volumes.
    pub volumes: Vec<u64>,
    /// Opening prices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<Vec<f64>>,
    /// Daily highs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<Vec<f64>>,
    /// Daily lows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<Vec<f64>>,
}

impl HistoryPayload {
    /// Checks that every present array has the same length.
    ///
    /// # Errors
    ///
    /// Returns the first shape violation found.
    pub fn validate(&self) -> Result<(), DataShapeError> {
        let expected = self.dates.len();
        if self.prices.len() != expected || self.volumes.len() != expected {
            return Err(DataShapeError::LengthMismatch {
                dates: expected,
                prices: self.prices.len(),
                volumes: self.volumes.len(),
            });
        }

        for (field, values) in [("open", &self.open), ("high", &self.high), ("low", &self.low)] {
            if let Some(values) = values
                && values.len() != expected
            {
                return Err(DataShapeError::FieldLength {
                    field,
                    len: values.len(),
                    expected,
                });
            }
        }

        if let Some(index) = self.prices.iter().position(|p| !p.is_finite()) {
            return Err(DataShapeError::NonFinitePrice { index });
        }

        Ok(())
    }

    fn reported_at(&self, index: usize) -> Option<ReportedRange> {
        match (&self.open, &self.high, &self.low) {
            (Some(open), Some(high), Some(low)) => Some(ReportedRange {
                open: open[index],
                high: high[index],
                low: low[index],
            }),
            _ => None,
        }
    }
}

/// Ordered daily history for one symbol.
///
/// A series is rebuilt in full from every history payload; it is never
/// patched incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    symbol: Symbol,
    observations: Vec<Observation>,
}

impl Series {
    /// Creates a series from already-zipped observations.
    #[must_use]
    pub const fn new(symbol: Symbol, observations: Vec<Observation>) -> Self {
        Self {
            symbol,
            observations,
        }
    }

    /// Creates an empty series for a symbol.
    #[must_use]
    pub const fn empty(symbol: Symbol) -> Self {
        Self::new(symbol, Vec::new())
    }

    /// Builds a series from a history payload.
    ///
    /// Reported OHLC fields are attached only when all three arrays are present.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload arrays differ in length or a close
    /// price is not finite.
    pub fn from_payload(symbol: Symbol, payload: &HistoryPayload) -> Result<Self, DataShapeError> {
        payload.validate()?;

        let observations = payload
            .dates
            .iter()
            .zip(&payload.prices)
            .zip(&payload.volumes)
            .enumerate()
            .map(|(i, ((date, &close), &volume))| Observation {
                date: date.clone(),
                close,
                volume,
                reported: payload.reported_at(i),
            })
            .collect();

        Ok(Self::new(symbol, observations))
    }

    /// Returns the symbol this series belongs to.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Returns the observations in order.
    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Returns the closing prices in order.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.close).collect()
    }

    /// Returns the volumes in order.
    pub fn volumes(&self) -> impl Iterator<Item = u64> + '_ {
        self.observations.iter().map(|o| o.volume)
    }

    /// Returns the most recent observation.
    #[must_use]
    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }
}
