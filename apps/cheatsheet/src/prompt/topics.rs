//! Topic list handling: reading a topics file and the optional LLM formatting pass.

use tracing::{debug, info};

use crate::errors::AppError;
use crate::llm_client::{Prompt, TextGenerator};
use crate::prompt::templates::{TOPIC_FORMATTER_SYSTEM, TOPIC_FORMATTER_TEMPLATE};

/// Splits a topics file into trimmed, non-empty lines without list markers.
pub fn parse_topic_list(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix('-')
                .or_else(|| line.strip_prefix('•'))
                .or_else(|| line.strip_prefix('*'))
                .map(str::trim_start)
                .unwrap_or(line)
        })
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Asks the generator to put raw topics into `ID: text` form, wording unchanged.
pub async fn format_topics(
    raw_topics: &str,
    generator: &dyn TextGenerator,
) -> Result<Vec<String>, AppError> {
    if raw_topics.trim().is_empty() {
        return Err(AppError::Validation("topic list is empty".to_string()));
    }

    let prompt = Prompt {
        system: TOPIC_FORMATTER_SYSTEM.to_string(),
        user: TOPIC_FORMATTER_TEMPLATE.replace("{raw_topics}", raw_topics.trim()),
    };
    let answer = generator.generate(&prompt).await?;
    debug!(chars = answer.len(), "topic formatter answered");

    let topics: Vec<String> = answer
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if topics.is_empty() {
        return Err(AppError::Validation(
            "topic formatter returned no topics".to_string(),
        ));
    }

    info!(count = topics.len(), "formatted topics");
    Ok(topics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Canned {
        answer: Result<String, u16>,
        seen: Mutex<Vec<Prompt>>,
    }

    impl Canned {
        fn ok(answer: &str) -> Self {
            Self {
                answer: Ok(answer.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for Canned {
        async fn generate(&self, prompt: &Prompt) -> Result<String, LlmError> {
            self.seen.lock().unwrap().push(prompt.clone());
            match &self.answer {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "boom".to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_parse_topic_list_strips_markers_and_blanks() {
        let text = "- A1: Scope\n\n• A2: Time\n  * B1: Risk  \nC1: Cost\n";
        assert_eq!(
            parse_topic_list(text),
            vec!["A1: Scope", "A2: Time", "B1: Risk", "C1: Cost"]
        );
    }

    #[test]
    fn test_parse_topic_list_empty() {
        assert!(parse_topic_list("\n  \n").is_empty());
    }

    #[tokio::test]
    async fn test_format_topics_returns_non_empty_lines() {
        let generator = Canned::ok("A1: Understand scope\n\nA2: Know risks\n");
        let topics = format_topics("scope\nrisks", &generator).await.unwrap();
        assert_eq!(topics, vec!["A1: Understand scope", "A2: Know risks"]);

        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen.len(), 1, "exactly one generator call");
        assert!(seen[0].user.contains("RAW TOPICS:\nscope\nrisks"));
    }

    #[tokio::test]
    async fn test_format_topics_rejects_empty_input_without_calling() {
        let generator = Canned::ok("A1: x");
        let err = format_topics("   ", &generator).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(generator.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_format_topics_propagates_llm_error() {
        let generator = Canned {
            answer: Err(529),
            seen: Mutex::new(Vec::new()),
        };
        let err = format_topics("scope", &generator).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(LlmError::Api { status: 529, .. })));
    }
}
