//! Quotes command implementation.

use super::Endpoints;
use crate::display::{Format, print_quote_cards, write_quotes};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Fetch the quote snapshot once and print or export it.
pub(crate) async fn quotes(endpoints: &Endpoints, output: Option<PathBuf>, format: Format) -> Result<()> {
    let client = endpoints.client()?;
    let quotes = client
        .quotes()
        .await
        .with_context(|| format!("Failed to fetch quotes from {}", endpoints.api_url))?;

    match output {
        Some(path) => {
            write_quotes(&quotes, &path, format)?;
            println!("Output written to: {}", path.display());
        }
        None if quotes.is_empty() => println!("No quotes available."),
        None => print_quote_cards(&quotes),
    }

    Ok(())
}
