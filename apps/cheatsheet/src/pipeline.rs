//! The two end-to-end entry points.
//!
//! `generate`: prompt builder → text generator → parser → renderer → file.
//! `render_from_text`: parser → renderer → file, for model output obtained elsewhere.
//! Each stage finishes before the next starts; any stage error ends the run.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::boxes::parse;
use crate::errors::AppError;
use crate::layout::page::PageConfig;
use crate::layout::placement::total_units;
use crate::llm_client::TextGenerator;
use crate::prompt::build_prompt;
use crate::render::render_with_report;

/// Built-in model output used by the `demo` command.
pub const SAMPLE_OUTPUT: &str = include_str!("../demos/sample_output.txt");

/// Summary of one finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    pub box_count: usize,
    pub pages_used: u32,
    pub output_path: PathBuf,
    /// Body lines that did not fit their box and were left out.
    pub clipped_lines: usize,
}

/// Full pipeline: lecture text and topics in, PDF file out.
pub async fn generate(
    lecture_content: &str,
    topics: &[String],
    generator: &dyn TextGenerator,
    config: &PageConfig,
    output_path: &Path,
) -> Result<GenerationReport, AppError> {
    if lecture_content.trim().is_empty() {
        return Err(AppError::Validation("lecture content is empty".to_string()));
    }
    if topics.is_empty() {
        return Err(AppError::Validation("no topics provided".to_string()));
    }

    let prompt = build_prompt(topics, lecture_content, config.max_pages);
    info!(
        topics = topics.len(),
        lecture_chars = lecture_content.len(),
        max_pages = config.max_pages,
        "requesting cheat sheet content"
    );

    let raw_text = generator.generate(&prompt).await?;
    info!(chars = raw_text.len(), "received model output");

    // Parsing and layout are CPU-bound; keep them off the async workers.
    let config = config.clone();
    let output_path = output_path.to_path_buf();
    tokio::task::spawn_blocking(move || render_from_text(&raw_text, &config, &output_path))
        .await
        .map_err(|e| AppError::Internal(e.into()))?
}

/// Parses already-obtained model output and writes the rendered PDF.
pub fn render_from_text(
    raw_text: &str,
    config: &PageConfig,
    output_path: &Path,
) -> Result<GenerationReport, AppError> {
    let boxes = parse(raw_text)?;
    if boxes.is_empty() {
        return Err(AppError::Validation(
            "no boxes found in model output; expected [BOX:<SIZE>] ... [/BOX] blocks".to_string(),
        ));
    }

    for (i, b) in boxes.iter().enumerate() {
        debug!(
            index = i,
            size_class = %b.size_class,
            page_fraction = b.size_class.page_fraction(),
            title = %b.title,
            lines = b.body.len(),
            first_line = b.body.first().map(|l| l.text()).unwrap_or_default(),
            "parsed box"
        );
    }
    debug!(
        units = total_units(&boxes),
        capacity = config.capacity_units(),
        "grid units requested"
    );

    let output = render_with_report(&boxes, config)?;
    std::fs::write(output_path, &output.bytes)?;

    let report = GenerationReport {
        box_count: boxes.len(),
        pages_used: output.pages,
        output_path: output_path.to_path_buf(),
        clipped_lines: output.clipped_lines,
    };
    info!(
        boxes = report.box_count,
        pages = report.pages_used,
        clipped_lines = report.clipped_lines,
        path = %report.output_path.display(),
        "cheat sheet written"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::SizeClass;
    use crate::layout::page::default_page_config;

    #[test]
    fn test_sample_output_fills_two_pages_exactly() {
        let boxes = parse(SAMPLE_OUTPUT).unwrap();
        assert_eq!(boxes.len(), 7);
        assert_eq!(total_units(&boxes), 16);
        assert_eq!(boxes[2].size_class, SizeClass::A5);
        assert!(boxes[3].page_break_before, "risk box follows a page break");
    }

    #[test]
    fn test_render_from_text_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.pdf");
        let report = render_from_text(SAMPLE_OUTPUT, &default_page_config(), &path).unwrap();
        assert_eq!(report.box_count, 7);
        assert_eq!(report.pages_used, 2);
        assert_eq!(report.output_path, path);
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_zero_boxes_is_rejected_and_nothing_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pdf");
        let err = render_from_text("Sorry, I cannot help.", &default_page_config(), &path)
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(!path.exists(), "no file on failure");
    }

    #[test]
    fn test_parse_error_is_propagated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.pdf");
        let err = render_from_text("[BOX:A6]\nno close", &default_page_config(), &path)
            .unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_capacity_error_is_propagated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.pdf");
        let config = default_page_config().with_max_pages(1);
        let err = render_from_text(SAMPLE_OUTPUT, &config, &path).unwrap_err();
        assert!(matches!(err, AppError::Capacity(ref e) if e.box_index == 3));
    }
}
