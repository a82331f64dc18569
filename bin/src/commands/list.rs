//! List command implementation.
//!
//! This module handles listing the watchlist with optional filtering.

use anyhow::Result;
use quoteboard_lib::prelude::*;

/// List watchlist entries, optionally filtered by a search pattern.
pub(crate) fn list_watchlist(search: Option<&str>) -> Result<()> {
    let watchlist = Watchlist::global();

    let entries: Vec<_> = match search {
        Some(pattern) => watchlist.search(pattern),
        None => watchlist.all().collect(),
    };

    if entries.is_empty() {
        println!("No symbols found.");
        return Ok(());
    }

    println!("{:<8} {:<36} {:<20}", "SYMBOL", "NAME", "SECTOR");
    println!("{}", "-".repeat(64));

    for entry in &entries {
        println!(
            "{:<8} {:<36} {:<20}",
            entry.symbol.as_str(),
            entry.name,
            entry.sector
        );
    }

    println!("\nTotal: {} symbols", entries.len());
    Ok(())
}
