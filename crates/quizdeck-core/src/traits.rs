//! The quiz generator seam.
//!
//! Backends that can turn a set of cards into a multiple-choice quiz payload
//! implement [`QuizGenerator`]. The assembler owns validation of whatever
//! comes back, so implementations return the raw response body text.

use async_trait::async_trait;

use crate::model::Card;

/// Trait for backends that generate quiz payloads from cards.
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    /// Human-readable backend name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Generate a quiz payload for the given cards.
    ///
    /// The expected payload is a JSON array of objects with `word`,
    /// `correctAnswer`, `options` (exactly four strings including the correct
    /// answer) and `explanation` fields, possibly wrapped in code-fence
    /// markup. One round trip, no retry.
    async fn generate(&self, cards: &[Card]) -> anyhow::Result<String>;
}

/// Extract a JSON payload from a possibly fence-wrapped response.
///
/// Handles:
/// - A ```json``` block (first one wins)
/// - A generic ``` block (if no json-specific block found)
/// - Raw payloads with no fences (returned as-is)
/// - Truncated (unclosed) blocks
pub fn extract_json_payload(response: &str) -> String {
    let mut json_block: Option<String> = None;
    let mut generic_block: Option<String> = None;
    let mut in_block = false;
    let mut is_json_block = false;
    let mut current = String::new();

    for line in response.lines() {
        let trimmed = line.trim();

        if !in_block && trimmed.starts_with("```") {
            in_block = true;
            let lang = trimmed.trim_start_matches('`').trim().to_lowercase();
            is_json_block = lang == "json";
            current.clear();
            continue;
        }

        if in_block && trimmed == "```" {
            in_block = false;
            let slot = if is_json_block {
                &mut json_block
            } else {
                &mut generic_block
            };
            if slot.is_none() {
                *slot = Some(current.clone());
            }
            current.clear();
            continue;
        }

        if in_block {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }

    // Treat an unclosed block as complete; truncated transports still parse.
    if in_block && !current.is_empty() {
        let slot = if is_json_block {
            &mut json_block
        } else {
            &mut generic_block
        };
        if slot.is_none() {
            *slot = Some(current);
        }
    }

    if let Some(block) = json_block.or(generic_block) {
        return block;
    }

    response.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_payload_passes_through() {
        let input = r#"[{"word":"apple"}]"#;
        assert_eq!(extract_json_payload(input), input);
    }

    #[test]
    fn strips_json_fence() {
        let input = "```json\n[{\"word\":\"apple\"}]\n```";
        assert_eq!(extract_json_payload(input), r#"[{"word":"apple"}]"#);
    }

    #[test]
    fn strips_generic_fence() {
        let input = "```\n[1,2]\n```";
        assert_eq!(extract_json_payload(input), "[1,2]");
    }

    #[test]
    fn prefers_json_fence_over_generic() {
        let input = "```\nnot it\n```\n\n```json\n[true]\n```";
        assert_eq!(extract_json_payload(input), "[true]");
    }

    #[test]
    fn unclosed_fence_is_captured() {
        let input = "```json\n[{\"word\":\"apple\"}]";
        assert_eq!(extract_json_payload(input), r#"[{"word":"apple"}]"#);
    }

    #[test]
    fn surrounding_prose_is_dropped() {
        let input = "Here you go:\n\n```json\n[]\n```\nEnjoy!";
        assert_eq!(extract_json_payload(input), "[]");
    }
}
