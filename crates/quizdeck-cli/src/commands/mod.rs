//! Subcommand implementations.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizdeck_core::parser::{parse_cards, CsvColumns, ParsedDeck};
use quizdeck_providers::SheetClient;

pub mod init;
pub mod inspect;
pub mod quiz;
pub mod study;

/// Build the column spec from optional CLI overrides.
pub(crate) fn columns(term: Option<String>, definition: Option<String>) -> CsvColumns {
    let mut columns = CsvColumns::default();
    if let Some(term) = term {
        columns.term = term;
    }
    if let Some(definition) = definition {
        columns.definition = definition;
    }
    columns
}

/// Load a deck from a local file or a published sheet URL.
pub(crate) async fn load_deck(
    input: Option<PathBuf>,
    sheet_url: Option<String>,
    columns: &CsvColumns,
) -> Result<ParsedDeck> {
    let raw = match (input, sheet_url) {
        (Some(path), None) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, Some(url)) => SheetClient::default().fetch_csv(&url).await?,
        _ => anyhow::bail!("provide exactly one of --input or --sheet-url"),
    };

    let deck = parse_cards(&raw, columns)?;
    if deck.skipped_rows > 0 {
        tracing::info!(skipped = deck.skipped_rows, "some rows were skipped");
    }
    Ok(deck)
}
