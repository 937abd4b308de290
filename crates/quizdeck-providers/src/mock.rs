//! Mock generator for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quizdeck_core::model::Card;
use quizdeck_core::traits::QuizGenerator;

enum Behavior {
    /// Build a valid quiz payload from whatever cards arrive.
    Echo,
    /// Return a fixed body regardless of input.
    Fixed(String),
    /// Fail every call.
    Fail(String),
}

/// A scripted `QuizGenerator` for exercising the assembler without real API
/// calls. Records call counts and the last card set received.
pub struct MockGenerator {
    behavior: Behavior,
    call_count: AtomicU32,
    last_cards: Mutex<Option<Vec<Card>>>,
}

impl MockGenerator {
    /// A mock that answers with a well-formed quiz for the received cards.
    pub fn valid() -> Self {
        Self::with_behavior(Behavior::Echo)
    }

    /// A mock that always returns the same body.
    pub fn with_payload(body: &str) -> Self {
        Self::with_behavior(Behavior::Fixed(body.to_string()))
    }

    /// A mock whose every call fails, like a dead network.
    pub fn failing(message: &str) -> Self {
        Self::with_behavior(Behavior::Fail(message.to_string()))
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            call_count: AtomicU32::new(0),
            last_cards: Mutex::new(None),
        }
    }

    /// Number of `generate` calls made against this mock.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The cards passed to the most recent call.
    pub fn last_cards(&self) -> Option<Vec<Card>> {
        self.last_cards.lock().unwrap().clone()
    }

    fn echo_payload(cards: &[Card]) -> String {
        let questions: Vec<serde_json::Value> = cards
            .iter()
            .map(|c| {
                serde_json::json!({
                    "word": c.term,
                    "correctAnswer": c.definition,
                    "options": [c.definition, "distractor 1", "distractor 2", "distractor 3"],
                    "explanation": format!("Example sentence using {}.", c.term),
                })
            })
            .collect();
        serde_json::Value::Array(questions).to_string()
    }
}

#[async_trait]
impl QuizGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, cards: &[Card]) -> anyhow::Result<String> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_cards.lock().unwrap() = Some(cards.to_vec());

        match &self.behavior {
            Behavior::Echo => Ok(Self::echo_payload(cards)),
            Behavior::Fixed(body) => Ok(body.clone()),
            Behavior::Fail(message) => anyhow::bail!("{message}"),
        }
    }
}
