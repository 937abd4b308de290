//! The `quizdeck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizdeck.toml").exists() {
        println!("quizdeck.toml already exists, skipping.");
    } else {
        std::fs::write("quizdeck.toml", SAMPLE_CONFIG)?;
        println!("Created quizdeck.toml");
    }

    println!("\nNext steps:");
    println!("  1. Optionally set GEMINI_API_KEY for AI-generated quizzes");
    println!("  2. Run: quizdeck inspect --input cards.csv");
    println!("  3. Run: quizdeck quiz --input cards.csv");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizdeck configuration

# Gemini API key; leave unresolved to build quizzes locally without AI.
api_key = "${GEMINI_API_KEY}"
model = "gemini-3-flash-preview"

# Maximum questions per quiz.
quiz_size = 10
"#;
