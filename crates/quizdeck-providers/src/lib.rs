//! quizdeck-providers — external data and generation backends.
//!
//! Implements the `QuizGenerator` trait for the Gemini API, fetches published
//! Google-Sheets CSV exports, and loads quizdeck configuration.

pub mod config;
pub mod gemini;
pub mod mock;
pub mod sheets;

pub use config::{create_generator, load_config, QuizdeckConfig};
pub use gemini::GeminiGenerator;
pub use sheets::SheetClient;
