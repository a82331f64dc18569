//! Open/high/low derivation policies.

use quoteboard_types::Observation;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Close multiplier giving the synthetic high (+0.2%).
pub const SYNTHETIC_HIGH_FACTOR: f64 = 1.002;

/// Close multiplier giving the synthetic low (-0.2%).
pub const SYNTHETIC_LOW_FACTOR: f64 = 0.998;

/// How per-day open, high and low are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OhlcPolicy {
    /// Derive from closes only: open is the previous close, high and low are
    /// the close scaled by a fixed ±0.2%. Matches existing displays.
    #[default]
    Synthetic,
    /// Use the source's reported fields, falling back to the synthetic
    /// derivation for observations that lack them.
    Reported,
}

impl OhlcPolicy {
    /// Returns `(open, high, low)` for `current`, given the close of the
    /// observation before it (`None` for the first one).
    #[must_use]
    pub fn derive(&self, previous_close: Option<f64>, current: &Observation) -> (f64, f64, f64) {
        match (self, current.reported) {
            (Self::Reported, Some(reported)) => (reported.open, reported.high, reported.low),
            _ => {
                let close = current.close;
                (
                    synthetic_open(previous_close, current),
                    close * SYNTHETIC_HIGH_FACTOR,
                    close * SYNTHETIC_LOW_FACTOR,
                )
            }
        }
    }

    /// Returns the policy name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Synthetic => "synthetic",
            Self::Reported => "reported",
        }
    }
}

impl std::fmt::Display for OhlcPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OhlcPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "synthetic" | "legacy" => Ok(Self::Synthetic),
            "reported" | "real" => Ok(Self::Reported),
            _ => Err(format!(
                "invalid OHLC policy '{s}', expected one of: synthetic, reported"
            )),
        }
    }
}

/// Synthetic open: the previous day's close, or the day's own close for the
/// first observation.
#[must_use]
pub fn synthetic_open(previous_close: Option<f64>, current: &Observation) -> f64 {
    previous_close.unwrap_or(current.close)
}
