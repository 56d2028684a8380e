//! Prompt builder for cheat-sheet generation.
//!
//! `build_prompt` is a pure function: the same topics, lecture text and page budget
//! always give the same prompt pair.

pub mod templates;
pub mod topics;

use crate::layout::page::UNITS_PER_PAGE;
use crate::llm_client::Prompt;
use templates::{CHEATSHEET_SYSTEM, CHEATSHEET_USER_TEMPLATE};

pub use topics::{format_topics, parse_topic_list};

/// Minimum number of boxes requested, however few topics there are.
pub const MIN_BOX_COUNT: usize = 8;
/// Average words per box used in the content-length guide.
pub const WORDS_PER_BOX: usize = 180;

/// Builds the system/user prompt pair for one generation run.
pub fn build_prompt(topics: &[String], lecture_content: &str, max_pages: u32) -> Prompt {
    let topics_formatted = topics
        .iter()
        .map(|t| format!("- {t}"))
        .collect::<Vec<_>>()
        .join("\n");

    let box_count = topics.len().max(MIN_BOX_COUNT);
    let word_estimate = box_count * WORDS_PER_BOX;
    let unit_budget = max_pages * UNITS_PER_PAGE;

    // Lecture text goes in last so braces inside it are never treated as placeholders.
    let user = CHEATSHEET_USER_TEMPLATE
        .replace("{max_pages}", &max_pages.to_string())
        .replace("{unit_budget}", &unit_budget.to_string())
        .replace("{box_count}", &box_count.to_string())
        .replace("{word_estimate}", &word_estimate.to_string())
        .replace("{topics}", &topics_formatted)
        .replace("{lecture_content}", lecture_content);

    Prompt {
        system: CHEATSHEET_SYSTEM.to_string(),
        user,
    }
}
