//! The `quizdeck quiz` command.

use std::path::PathBuf;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizdeck_core::quiz::QuizAssembler;
use quizdeck_providers::{create_generator, load_config};

const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    input: Option<PathBuf>,
    sheet_url: Option<String>,
    term_column: Option<String>,
    definition_column: Option<String>,
    show_answers: bool,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let columns = super::columns(term_column, definition_column);
    let deck = super::load_deck(input, sheet_url, &columns).await?;

    let config = match config_path {
        Some(path) => quizdeck_providers::config::load_config_from(Some(&path))?,
        None => load_config()?,
    };
    let generator = create_generator(&config);

    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut assembler =
        QuizAssembler::with_rng(generator, rng).with_quiz_size(config.quiz_size);

    let quiz = assembler.build_quiz(&deck.cards).await;

    for (i, question) in quiz.iter().enumerate() {
        println!("{}. {}", i + 1, question.term);
        for (letter, option) in OPTION_LETTERS.iter().zip(&question.options) {
            println!("   {letter}) {option}");
        }
        if show_answers {
            println!("   Answer: {}", question.correct_answer);
            println!("   Note: {}", question.explanation);
        }
        println!();
    }

    println!("{} questions.", quiz.len());

    Ok(())
}
