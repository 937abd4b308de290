//! Configuration loading and the generator factory.
//!
//! The credential is an explicit configuration value handed to the assembler
//! at construction time; nothing in the core ever reads ambient global state.
//! A missing key is a normal configuration — the factory simply returns no
//! generator and quizzes come from the local fallback path.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizdeck_core::traits::QuizGenerator;

use crate::gemini::{GeminiGenerator, DEFAULT_MODEL};

/// Top-level quizdeck configuration.
///
/// Note: Custom Debug impl masks the API key to prevent accidental exposure
/// in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct QuizdeckConfig {
    /// Gemini API key. `${VAR}` references resolve from the environment.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model identifier sent to the generative API.
    #[serde(default = "default_model")]
    pub model: String,
    /// API base URL override (used by tests; normally unset).
    #[serde(default)]
    pub base_url: Option<String>,
    /// Maximum number of questions per quiz.
    #[serde(default = "default_quiz_size")]
    pub quiz_size: usize,
}

impl std::fmt::Debug for QuizdeckConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizdeckConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("quiz_size", &self.quiz_size)
            .finish()
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_quiz_size() -> usize {
    quizdeck_core::quiz::QUIZ_SIZE
}

impl Default for QuizdeckConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: None,
            quiz_size: default_quiz_size(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizdeck.toml` in the current directory
/// 2. `~/.config/quizdeck/config.toml`
///
/// The `GEMINI_API_KEY` environment variable overrides the configured key.
pub fn load_config() -> Result<QuizdeckConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizdeckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizdeck.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizdeckConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizdeckConfig::default(),
    };

    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        config.api_key = Some(key);
    }

    config.api_key = config
        .api_key
        .as_deref()
        .map(resolve_env_vars)
        .filter(|k| !k.trim().is_empty());
    config.base_url = config.base_url.as_deref().map(resolve_env_vars);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizdeck"))
}

/// Create a generator from the configuration.
///
/// Returns `None` when no credential is configured — an expected state, not
/// an error; the assembler then builds local fallback quizzes without
/// attempting any network access.
pub fn create_generator(config: &QuizdeckConfig) -> Option<Arc<dyn QuizGenerator>> {
    match config.api_key.as_deref() {
        Some(key) => Some(Arc::new(GeminiGenerator::new(
            key,
            config.base_url.clone(),
            Some(config.model.clone()),
        ))),
        None => {
            tracing::debug!("no API key configured, quizzes will be generated locally");
            None
        }
    }
}
