//! Quiz assembly.
//!
//! [`QuizAssembler`] samples a subset of the card pool, asks the configured
//! [`QuizGenerator`] for a multiple-choice quiz, validates the payload, and
//! deterministically falls back to a locally synthesized quiz when no
//! generator is configured or the generated payload is unusable. It never
//! fails: the only zero-length output is an empty input pool.

use std::sync::Arc;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::GeneratorError;
use crate::model::{Card, QuizQuestion, OPTION_COUNT};
use crate::traits::{extract_json_payload, QuizGenerator};

/// Maximum number of cards sampled into one quiz.
pub const QUIZ_SIZE: usize = 10;

/// Number of incorrect options per question.
pub const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;

/// Explanation attached to locally generated questions, so users can tell a
/// fallback quiz from an AI-generated one.
pub const FALLBACK_EXPLANATION: &str =
    "This question was generated locally; the AI quiz service was unavailable.";

/// Assembles quizzes from a card pool.
///
/// Holds an optional generator backend (absent when no credential is
/// configured) and an injected random source so sampling and shuffling are
/// seedable in tests.
pub struct QuizAssembler<R: Rng> {
    generator: Option<Arc<dyn QuizGenerator>>,
    rng: R,
    quiz_size: usize,
}

impl QuizAssembler<StdRng> {
    /// Create an assembler with an OS-seeded random source.
    pub fn new(generator: Option<Arc<dyn QuizGenerator>>) -> Self {
        Self::with_rng(generator, StdRng::from_os_rng())
    }
}

impl<R: Rng> QuizAssembler<R> {
    /// Create an assembler with an explicit random source.
    pub fn with_rng(generator: Option<Arc<dyn QuizGenerator>>, rng: R) -> Self {
        Self {
            generator,
            rng,
            quiz_size: QUIZ_SIZE,
        }
    }

    /// Override the maximum quiz length.
    pub fn with_quiz_size(mut self, quiz_size: usize) -> Self {
        self.quiz_size = quiz_size;
        self
    }

    /// Build a quiz from the pool.
    ///
    /// Samples `min(quiz_size, pool.len())` cards without replacement and
    /// returns one question per sampled card. Generator failures of any kind
    /// (transport, empty body, malformed or shape-violating payload) are
    /// absorbed into the local fallback path and never reach the caller.
    pub async fn build_quiz(&mut self, pool: &[Card]) -> Vec<QuizQuestion> {
        if pool.is_empty() {
            return Vec::new();
        }

        let selected = self.sample(pool);

        match &self.generator {
            Some(generator) => match generator.generate(&selected).await {
                Ok(body) => match validate_payload(&body, &selected) {
                    Ok(questions) => return questions,
                    Err(reason) => {
                        tracing::warn!(
                            generator = generator.name(),
                            %reason,
                            "discarding generated quiz payload"
                        );
                    }
                },
                Err(error) => {
                    let permanent = error
                        .downcast_ref::<GeneratorError>()
                        .is_some_and(GeneratorError::is_permanent);
                    tracing::warn!(
                        generator = generator.name(),
                        %error,
                        permanent,
                        "quiz generation failed"
                    );
                }
            },
            None => {
                tracing::debug!("no quiz generator configured, building local quiz");
            }
        }

        self.fallback_quiz(pool, &selected)
    }

    /// Uniformly sample up to `quiz_size` cards without replacement.
    fn sample(&mut self, pool: &[Card]) -> Vec<Card> {
        let mut cards = pool.to_vec();
        cards.shuffle(&mut self.rng);
        cards.truncate(self.quiz_size);
        cards
    }

    /// Synthesize one question per selected card from pool data alone.
    ///
    /// Distractors are the definitions of *other* pool cards (excluded by id,
    /// not position), padded with synthetic placeholders when the pool cannot
    /// supply three distinct ones.
    fn fallback_quiz(&mut self, pool: &[Card], selected: &[Card]) -> Vec<QuizQuestion> {
        selected
            .iter()
            .map(|card| {
                let mut candidates: Vec<&str> = pool
                    .iter()
                    .filter(|other| other.id != card.id)
                    .map(|other| other.definition.as_str())
                    .collect();
                candidates.shuffle(&mut self.rng);

                let mut distractors: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT);
                for candidate in candidates {
                    if distractors.len() == DISTRACTOR_COUNT {
                        break;
                    }
                    if candidate != card.definition && !distractors.iter().any(|d| d == candidate) {
                        distractors.push(candidate.to_string());
                    }
                }
                for n in distractors.len()..DISTRACTOR_COUNT {
                    distractors.push(format!("(placeholder answer {})", n + 1));
                }

                let mut options = distractors;
                options.push(card.definition.clone());
                options.shuffle(&mut self.rng);

                QuizQuestion {
                    id: Uuid::new_v4(),
                    term: card.term.clone(),
                    correct_answer: card.definition.clone(),
                    options,
                    explanation: FALLBACK_EXPLANATION.to_string(),
                }
            })
            .collect()
    }
}

/// Wire shape of one generated question.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    word: String,
    correct_answer: String,
    options: Vec<String>,
    explanation: String,
}

/// Validate and normalize a generated payload against the sampled cards.
///
/// Every question must reference a sampled card by term, carry that card's
/// definition as the correct answer, and offer four distinct options that
/// include it. Ids are assigned locally regardless of what the payload held.
fn validate_payload(body: &str, selected: &[Card]) -> Result<Vec<QuizQuestion>> {
    let payload = extract_json_payload(body);
    if payload.trim().is_empty() {
        anyhow::bail!("empty response body");
    }

    let raw: Vec<RawQuestion> = serde_json::from_str(&payload)?;
    if raw.is_empty() {
        anyhow::bail!("payload contained no questions");
    }

    raw.into_iter()
        .map(|q| {
            let card = selected
                .iter()
                .find(|c| c.term == q.word)
                .ok_or_else(|| anyhow::anyhow!("unknown word in payload: {}", q.word))?;
            if q.correct_answer != card.definition {
                anyhow::bail!("correct answer for '{}' does not match the card", q.word);
            }
            let question = QuizQuestion {
                id: Uuid::new_v4(),
                term: q.word,
                correct_answer: q.correct_answer,
                options: q.options,
                explanation: q.explanation,
            };
            if !question.is_well_formed() {
                anyhow::bail!("malformed options for '{}'", question.term);
            }
            Ok(question)
        })
        .collect()
}
