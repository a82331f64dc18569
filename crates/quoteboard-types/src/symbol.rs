//! Ticker symbol representation.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::str::FromStr;
use thiserror::Error;

/// Longest ticker accepted, including exchange suffixes such as `.L`.
const MAX_SYMBOL_LEN: usize = 16;

/// A ticker symbol, normalized to upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Creates a symbol from user or wire input.
    ///
    /// Surrounding whitespace is trimmed and letters are upper-cased.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol is empty, too long, or contains
    /// characters other than ASCII alphanumerics, `.`, `-`, `^` and `=`.
    pub fn new(raw: &str) -> Result<Self, SymbolError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SymbolError::Empty);
        }
        if trimmed.len() > MAX_SYMBOL_LEN {
            return Err(SymbolError::TooLong(trimmed.to_string()));
        }
        if let Some(c) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=')))
        {
            return Err(SymbolError::InvalidChar {
                symbol: trimmed.to_string(),
                found: c,
            });
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = SymbolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Error returned when parsing an invalid ticker symbol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    /// The symbol was empty or whitespace.
    #[error("symbol must not be empty")]
    Empty,

    /// The symbol exceeded the maximum length.
    #[error("symbol '{0}' is longer than {max} characters", max = MAX_SYMBOL_LEN)]
    TooLong(String),

    /// The symbol contained a disallowed character.
    #[error("symbol '{symbol}' contains invalid character '{found}'")]
    InvalidChar {
        /// The rejected input.
        symbol: String,
        /// The first disallowed character.
        found: char,
    },
}
