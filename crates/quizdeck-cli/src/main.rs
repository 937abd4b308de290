//! quizdeck CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizdeck", version, about = "CSV flashcards and AI-generated quizzes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a CSV file and show the cards it produces
    Inspect {
        /// Path to a CSV file
        #[arg(long)]
        input: PathBuf,

        /// Header label of the term column
        #[arg(long)]
        term_column: Option<String>,

        /// Header label of the definition column
        #[arg(long)]
        definition_column: Option<String>,
    },

    /// Print flashcards for studying
    Study {
        /// Path to a CSV file
        #[arg(long)]
        input: Option<PathBuf>,

        /// Google Sheets URL to fetch instead of a local file
        #[arg(long)]
        sheet_url: Option<String>,

        /// Header label of the term column
        #[arg(long)]
        term_column: Option<String>,

        /// Header label of the definition column
        #[arg(long)]
        definition_column: Option<String>,
    },

    /// Build and print a multiple-choice quiz
    Quiz {
        /// Path to a CSV file
        #[arg(long)]
        input: Option<PathBuf>,

        /// Google Sheets URL to fetch instead of a local file
        #[arg(long)]
        sheet_url: Option<String>,

        /// Header label of the term column
        #[arg(long)]
        term_column: Option<String>,

        /// Header label of the definition column
        #[arg(long)]
        definition_column: Option<String>,

        /// Show correct answers and explanations
        #[arg(long)]
        show_answers: bool,

        /// Seed for deterministic sampling and shuffling
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizdeck=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect {
            input,
            term_column,
            definition_column,
        } => commands::inspect::execute(input, term_column, definition_column),
        Commands::Study {
            input,
            sheet_url,
            term_column,
            definition_column,
        } => commands::study::execute(input, sheet_url, term_column, definition_column).await,
        Commands::Quiz {
            input,
            sheet_url,
            term_column,
            definition_column,
            show_answers,
            seed,
            config,
        } => {
            commands::quiz::execute(
                input,
                sheet_url,
                term_column,
                definition_column,
                show_answers,
                seed,
                config,
            )
            .await
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
