//! Core data model types for quizdeck.
//!
//! These are the fundamental types the whole system uses to represent study
//! cards and generated quiz questions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The number of answer options every quiz question carries.
pub const OPTION_COUNT: usize = 4;

/// One term/definition study unit derived from ingested tabular data.
///
/// Cards are created once per ingestion and held as an immutable pool for the
/// session; re-ingesting replaces the pool wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier, stable for the session.
    pub id: Uuid,
    /// The source-language word. Non-empty after trimming/de-quoting.
    #[serde(rename = "word")]
    pub term: String,
    /// The target-language meaning. Non-empty after trimming/de-quoting.
    pub definition: String,
}

impl Card {
    /// Create a card with a freshly generated id.
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            term: term.into(),
            definition: definition.into(),
        }
    }
}

/// One generated multiple-choice question.
///
/// Questions are created per quiz session from a sampled subset of the card
/// pool and discarded when the quiz ends or restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// Unique identifier, always assigned locally.
    pub id: Uuid,
    /// The prompt word; equals some card's `term` in the originating pool.
    #[serde(rename = "word")]
    pub term: String,
    /// The definition of the prompted card.
    pub correct_answer: String,
    /// Exactly four distinct display strings including `correct_answer`.
    pub options: Vec<String>,
    /// Non-empty supporting text shown after answering.
    pub explanation: String,
}

impl QuizQuestion {
    /// Check the structural invariant: four distinct options, one of which is
    /// the correct answer, and a non-empty explanation.
    pub fn is_well_formed(&self) -> bool {
        if self.options.len() != OPTION_COUNT || self.explanation.trim().is_empty() {
            return false;
        }
        let mut seen = std::collections::HashSet::new();
        if !self.options.iter().all(|o| seen.insert(o.as_str())) {
            return false;
        }
        self.options.iter().any(|o| *o == self.correct_answer)
    }
}
