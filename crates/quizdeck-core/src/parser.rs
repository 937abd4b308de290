//! CSV ingestion parser.
//!
//! Converts raw delimited text (an uploaded file or a fetched spreadsheet
//! export) into a normalized pool of [`Card`]s.
//!
//! The field splitter is delimiter-aware — a comma only separates fields when
//! it is preceded by an even number of quote characters within the line — so
//! simple quoted-comma values survive. It is deliberately *not* a full CSV
//! implementation: doubled-quote escaping inside quoted fields is unsupported,
//! matching the upstream sheet exports this tool targets.

use uuid::Uuid;

use crate::error::ParseError;
use crate::model::Card;

/// Header names the parser looks for in the first row.
///
/// Defaults match the original study sheet: `공부내용` (term) and `뉴스요약`
/// (definition). When a name is absent from the header row the parser falls
/// back to a fixed positional index, which keeps renamed-but-positionally
/// -stable spreadsheets usable.
#[derive(Debug, Clone)]
pub struct CsvColumns {
    /// Header label of the term column.
    pub term: String,
    /// Header label of the definition column.
    pub definition: String,
}

/// Positional fallbacks when the named headers are absent (zero-indexed).
const TERM_FALLBACK_IDX: usize = 2;
const DEFINITION_FALLBACK_IDX: usize = 3;

impl Default for CsvColumns {
    fn default() -> Self {
        Self {
            term: "공부내용".to_string(),
            definition: "뉴스요약".to_string(),
        }
    }
}

/// The outcome of one ingestion.
#[derive(Debug, Clone)]
pub struct ParsedDeck {
    /// Accepted cards, in row order.
    pub cards: Vec<Card>,
    /// Data rows rejected during parsing, exposed for diagnostics.
    pub skipped_rows: usize,
}

/// Parse raw delimited text into a deck of cards.
///
/// Rows missing either target field are skipped silently (counted, logged at
/// debug); only the aggregate empty outcomes are surfaced as errors.
pub fn parse_cards(raw: &str, columns: &CsvColumns) -> Result<ParsedDeck, ParseError> {
    let lines: Vec<&str> = raw
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.len() < 2 {
        return Err(ParseError::MissingData);
    }

    let headers: Vec<String> = lines[0].split(',').map(clean_field).collect();
    let term_idx = headers
        .iter()
        .position(|h| *h == columns.term)
        .unwrap_or(TERM_FALLBACK_IDX);
    let definition_idx = headers
        .iter()
        .position(|h| *h == columns.definition)
        .unwrap_or(DEFINITION_FALLBACK_IDX);

    let mut cards = Vec::new();
    let mut skipped_rows = 0usize;

    for (row, line) in lines[1..].iter().enumerate() {
        let fields = split_row(line);
        let term = fields.get(term_idx).map(String::as_str).unwrap_or("");
        let definition = fields.get(definition_idx).map(String::as_str).unwrap_or("");

        // Guard against a re-embedded header row appearing mid-data, as seen
        // in spreadsheet re-exports.
        if term.is_empty() || definition.is_empty() || term == columns.term {
            tracing::debug!(row, "skipping unusable row");
            skipped_rows += 1;
            continue;
        }

        cards.push(Card {
            id: Uuid::new_v4(),
            term: term.to_string(),
            definition: definition.to_string(),
        });
    }

    if cards.is_empty() {
        return Err(ParseError::NoCards {
            term: columns.term.clone(),
            definition: columns.definition.clone(),
            skipped: skipped_rows,
        });
    }

    tracing::debug!(cards = cards.len(), skipped_rows, "parsed deck");
    Ok(ParsedDeck { cards, skipped_rows })
}

/// Split a data row on commas that sit outside quoted segments.
///
/// A comma separates fields only when an even number of `"` characters precede
/// it within the line. Embedded escaped quotes are not handled.
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut quotes = 0usize;

    for (i, c) in line.char_indices() {
        match c {
            '"' => quotes += 1,
            ',' if quotes % 2 == 0 => {
                fields.push(clean_field(&line[start..i]));
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(clean_field(&line[start..]));
    fields
}

/// Trim a field and strip a single pair of surrounding quotes, if present.
fn clean_field(field: &str) -> String {
    let trimmed = field.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<ParsedDeck, ParseError> {
        parse_cards(raw, &CsvColumns::default())
    }

    #[test]
    fn parses_named_columns() {
        let deck = parse("공부내용,뉴스요약\napple,사과\nbanana,바나나\n").unwrap();
        assert_eq!(deck.cards.len(), 2);
        assert_eq!(deck.cards[0].term, "apple");
        assert_eq!(deck.cards[0].definition, "사과");
        assert_eq!(deck.cards[1].term, "banana");
        assert_eq!(deck.cards[1].definition, "바나나");
        assert_eq!(deck.skipped_rows, 0);
    }

    #[test]
    fn preserves_row_order() {
        let deck = parse("공부내용,뉴스요약\na,1\nb,2\nc,3\n").unwrap();
        let terms: Vec<_> = deck.cards.iter().map(|c| c.term.as_str()).collect();
        assert_eq!(terms, vec!["a", "b", "c"]);
    }

    #[test]
    fn header_only_input_is_missing_data() {
        assert!(matches!(parse("공부내용,뉴스요약\n"), Err(ParseError::MissingData)));
        assert!(matches!(parse(""), Err(ParseError::MissingData)));
    }

    #[test]
    fn tolerates_crlf_and_blank_lines() {
        let deck = parse("공부내용,뉴스요약\r\n\r\napple,사과\r\n\n").unwrap();
        assert_eq!(deck.cards.len(), 1);
        assert_eq!(deck.cards[0].definition, "사과");
    }

    #[test]
    fn falls_back_to_positional_columns() {
        // Renamed headers: the named lookup fails, columns C and D are used.
        let deck = parse("date,topic,word,meaning\n1,news,apple,사과\n").unwrap();
        assert_eq!(deck.cards.len(), 1);
        assert_eq!(deck.cards[0].term, "apple");
        assert_eq!(deck.cards[0].definition, "사과");
    }

    #[test]
    fn skips_rows_missing_either_field() {
        let deck = parse("공부내용,뉴스요약\napple,사과\nbanana,\n,바나나\n").unwrap();
        assert_eq!(deck.cards.len(), 1);
        assert_eq!(deck.skipped_rows, 2);
    }

    #[test]
    fn rejects_reembedded_header_row() {
        let deck = parse("공부내용,뉴스요약\napple,사과\n공부내용,뉴스요약\nbanana,바나나\n").unwrap();
        assert_eq!(deck.cards.len(), 2);
        assert_eq!(deck.skipped_rows, 1);
        assert!(deck.cards.iter().all(|c| c.term != "공부내용"));
    }

    #[test]
    fn quoted_comma_is_one_field() {
        let deck = parse("공부내용,뉴스요약\n\"to, too\",또한\n").unwrap();
        assert_eq!(deck.cards.len(), 1);
        assert_eq!(deck.cards[0].term, "to, too");
    }

    #[test]
    fn quoted_definition_with_commas() {
        let deck = parse("공부내용,뉴스요약\nhowever,\"그러나, 하지만\"\n").unwrap();
        assert_eq!(deck.cards[0].definition, "그러나, 하지만");
    }

    #[test]
    fn dequotes_header_fields() {
        let deck = parse("\"공부내용\",\"뉴스요약\"\napple,사과\n").unwrap();
        assert_eq!(deck.cards.len(), 1);
    }

    #[test]
    fn all_rows_rejected_is_no_cards() {
        let err = parse("공부내용,뉴스요약\n,\n,\n").unwrap_err();
        match err {
            ParseError::NoCards { skipped, .. } => assert_eq!(skipped, 2),
            other => panic!("expected NoCards, got: {other}"),
        }
    }

    #[test]
    fn fresh_ids_per_card() {
        let deck = parse("공부내용,뉴스요약\napple,사과\nbanana,바나나\n").unwrap();
        assert_ne!(deck.cards[0].id, deck.cards[1].id);
    }
}
