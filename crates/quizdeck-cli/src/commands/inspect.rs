//! The `quizdeck inspect` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use quizdeck_core::parser::parse_cards;

pub fn execute(
    input: PathBuf,
    term_column: Option<String>,
    definition_column: Option<String>,
) -> Result<()> {
    let raw = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let columns = super::columns(term_column, definition_column);
    let deck = parse_cards(&raw, &columns)?;

    let mut table = Table::new();
    table.set_header(vec!["#", "Term", "Definition"]);
    for (i, card) in deck.cards.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&card.term),
            Cell::new(&card.definition),
        ]);
    }
    println!("{table}");

    println!(
        "\n{} card{} parsed ({} row{} skipped).",
        deck.cards.len(),
        plural(deck.cards.len()),
        deck.skipped_rows,
        plural(deck.skipped_rows)
    );

    Ok(())
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
