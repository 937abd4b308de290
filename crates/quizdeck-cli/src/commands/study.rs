//! The `quizdeck study` command.

use std::path::PathBuf;

use anyhow::Result;

pub async fn execute(
    input: Option<PathBuf>,
    sheet_url: Option<String>,
    term_column: Option<String>,
    definition_column: Option<String>,
) -> Result<()> {
    let columns = super::columns(term_column, definition_column);
    let deck = super::load_deck(input, sheet_url, &columns).await?;

    let total = deck.cards.len();
    for (i, card) in deck.cards.iter().enumerate() {
        println!("[{}/{}] {}", i + 1, total, card.term);
        println!("        {}", card.definition);
        println!();
    }

    Ok(())
}
