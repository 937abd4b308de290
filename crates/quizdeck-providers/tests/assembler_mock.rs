//! Assembler + generator integration tests using the scripted mock.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use quizdeck_core::model::Card;
use quizdeck_core::quiz::{QuizAssembler, FALLBACK_EXPLANATION, QUIZ_SIZE};
use quizdeck_providers::config::{create_generator, QuizdeckConfig};
use quizdeck_providers::mock::MockGenerator;

fn pool(n: usize) -> Vec<Card> {
    (0..n)
        .map(|i| Card::new(format!("word{i}"), format!("definition {i}")))
        .collect()
}

fn assembler(mock: &Arc<MockGenerator>) -> QuizAssembler<StdRng> {
    QuizAssembler::with_rng(Some(mock.clone()), StdRng::seed_from_u64(11))
}

#[tokio::test]
async fn valid_payload_flows_through_once() {
    let mock = Arc::new(MockGenerator::valid());
    let cards = pool(15);

    let quiz = assembler(&mock).build_quiz(&cards).await;

    assert_eq!(mock.call_count(), 1);
    assert_eq!(quiz.len(), QUIZ_SIZE);
    // The generator saw exactly the sampled subset the quiz was built from.
    let sent = mock.last_cards().unwrap();
    assert_eq!(sent.len(), QUIZ_SIZE);
    for q in &quiz {
        assert!(q.is_well_formed());
        assert_ne!(q.explanation, FALLBACK_EXPLANATION);
        assert!(sent.iter().any(|c| c.term == q.term));
    }
}

#[tokio::test]
async fn transport_failure_resolves_to_fallback() {
    let mock = Arc::new(MockGenerator::failing("connection reset"));
    let cards = pool(4);

    let quiz = assembler(&mock).build_quiz(&cards).await;

    assert_eq!(mock.call_count(), 1);
    assert_eq!(quiz.len(), 4);
    assert!(quiz.iter().all(|q| q.explanation == FALLBACK_EXPLANATION));
    assert!(quiz.iter().all(|q| q.is_well_formed()));
}

#[tokio::test]
async fn malformed_payload_resolves_to_fallback() {
    let mock = Arc::new(MockGenerator::with_payload("{\"oops\": true"));
    let cards = pool(3);

    let quiz = assembler(&mock).build_quiz(&cards).await;

    assert_eq!(quiz.len(), 3);
    assert!(quiz.iter().all(|q| q.explanation == FALLBACK_EXPLANATION));
}

#[tokio::test]
async fn empty_pool_never_calls_the_generator() {
    let mock = Arc::new(MockGenerator::valid());

    let quiz = assembler(&mock).build_quiz(&[]).await;

    assert!(quiz.is_empty());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn unconfigured_credential_builds_local_quiz() {
    let config = QuizdeckConfig::default();
    let generator = create_generator(&config);
    assert!(generator.is_none());

    let cards = pool(2);
    let mut assembler = QuizAssembler::with_rng(generator, StdRng::seed_from_u64(3));
    let quiz = assembler.build_quiz(&cards).await;

    assert_eq!(quiz.len(), 2);
    for q in &quiz {
        assert!(q.is_well_formed());
        assert_eq!(q.explanation, FALLBACK_EXPLANATION);
    }
}
