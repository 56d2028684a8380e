//! Box parser: turns the model's delimited text into `ContentBox` records.
//!
//! The format is line based:
//!
//! ```text
//! [BOX:A6]
//! [TITLE:Risk Assessment]
//! **Risk** = uncertain event affecting objectives
//! • Identify
//! 1. Analyze
//! [/BOX]
//! ```
//!
//! Parsing is one forward pass over the lines. Each line is classified from its first
//! characters only; lines between ```` ``` ```` fences are kept as code, untouched.
//! Malformed markup fails the whole document; there is no partial output.

use thiserror::Error;
use tracing::debug;

use crate::boxes::model::{ContentBox, ContentLine, SizeClass};

const OPEN_PREFIX: &str = "[BOX:";
const CLOSE_MARKER: &str = "[/BOX]";
const TITLE_PREFIX: &str = "[TITLE:";
const PAGE_BREAK_MARKER: &str = "[PAGEBREAK]";
const BOLD_MARKER: &str = "**";
const CODE_FENCE: &str = "```";

/// Leading glyph that marks a bullet item.
pub const BULLET_GLYPH: char = '•';

/// Structural error in box markup. `line` is 1-based, `offset` is the byte offset of
/// the start of that line in the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("box opened at line {line} (byte {offset}) is never closed")]
    UnterminatedBox { line: usize, offset: usize },

    #[error("unknown size class '{token}' at line {line} (byte {offset}), expected A4, A5, A6 or A7")]
    UnknownSizeClass {
        token: String,
        line: usize,
        offset: usize,
    },

    #[error("closing marker at line {line} (byte {offset}) has no open box")]
    UnexpectedClose { line: usize, offset: usize },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnterminatedBox { line, .. }
            | ParseError::UnknownSizeClass { line, .. }
            | ParseError::UnexpectedClose { line, .. } => *line,
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnterminatedBox { offset, .. }
            | ParseError::UnknownSizeClass { offset, .. }
            | ParseError::UnexpectedClose { offset, .. } => *offset,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document scan
// ────────────────────────────────────────────────────────────────────────────

/// A box whose closing marker has not been seen yet.
struct OpenBox {
    content: ContentBox,
    line: usize,
    offset: usize,
    title_seen: bool,
    blank_pending: bool,
    in_code: bool,
}

impl OpenBox {
    fn push_line(&mut self, line: &str) {
        let trimmed = line.trim();

        if trimmed.starts_with(CODE_FENCE) {
            self.in_code = !self.in_code;
            return;
        }
        if self.in_code {
            // Code is kept as written: no classification, blank lines included.
            self.content.body.push(ContentLine::Code(line.to_string()));
            return;
        }
        if trimmed.is_empty() {
            // Leading blank lines do not open a paragraph.
            self.blank_pending = !self.content.body.is_empty();
            return;
        }
        if !self.title_seen {
            if let Some(title) = title_text(trimmed) {
                self.content.title = title.to_string();
                self.title_seen = true;
                return;
            }
        }

        if self.blank_pending {
            self.content.paragraph_breaks.push(self.content.body.len());
            self.blank_pending = false;
        }
        self.content.body.push(classify_line(line));
    }
}

/// Parses every `[BOX:..] .. [/BOX]` block in `raw_text`, in order of appearance.
///
/// Text outside boxes is ignored apart from `[PAGEBREAK]`, which flags the next box.
pub fn parse(raw_text: &str) -> Result<Vec<ContentBox>, ParseError> {
    let mut boxes = Vec::new();
    let mut open: Option<OpenBox> = None;
    let mut break_next = false;
    let mut offset = 0usize;

    for (index, raw_line) in raw_text.split_inclusive('\n').enumerate() {
        let line_no = index + 1;
        let line_start = offset;
        offset += raw_line.len();

        let line = raw_line.trim_end();
        let marker = line.trim();

        if let Some(token) = open_marker_token(marker) {
            if let Some(current) = &open {
                return Err(ParseError::UnterminatedBox {
                    line: current.line,
                    offset: current.offset,
                });
            }
            let size_class =
                token
                    .parse::<SizeClass>()
                    .map_err(|e| ParseError::UnknownSizeClass {
                        token: e.0,
                        line: line_no,
                        offset: line_start,
                    })?;

            let mut content = ContentBox::new(size_class);
            content.page_break_before = std::mem::take(&mut break_next);
            open = Some(OpenBox {
                content,
                line: line_no,
                offset: line_start,
                title_seen: false,
                blank_pending: false,
                in_code: false,
            });
            continue;
        }

        if marker == CLOSE_MARKER {
            match open.take() {
                Some(done) => boxes.push(done.content),
                None => {
                    return Err(ParseError::UnexpectedClose {
                        line: line_no,
                        offset: line_start,
                    })
                }
            }
            continue;
        }

        match open.as_mut() {
            Some(current) => current.push_line(line),
            None if marker.eq_ignore_ascii_case(PAGE_BREAK_MARKER) => break_next = true,
            None => {}
        }
    }

    if let Some(current) = open {
        return Err(ParseError::UnterminatedBox {
            line: current.line,
            offset: current.offset,
        });
    }

    debug!(boxes = boxes.len(), bytes = raw_text.len(), "parsed box markup");
    Ok(boxes)
}

fn open_marker_token(marker: &str) -> Option<&str> {
    marker.strip_prefix(OPEN_PREFIX)?.strip_suffix(']')
}

fn title_text(trimmed: &str) -> Option<&str> {
    trimmed
        .strip_prefix(TITLE_PREFIX)?
        .strip_suffix(']')
        .map(str::trim)
}

// ────────────────────────────────────────────────────────────────────────────
// Line classification
// ────────────────────────────────────────────────────────────────────────────

/// Classifies one non-blank content line. Trailing whitespace must already be trimmed.
pub fn classify_line(line: &str) -> ContentLine {
    let (depth, rest) = split_indent(line);

    if let Some(text) = rest.strip_prefix(BULLET_GLYPH) {
        let text = text.trim_start();
        if !text.is_empty() {
            return ContentLine::Bullet {
                text: text.to_string(),
                depth,
            };
        }
    }

    if let Some((numeral, text)) = split_numbered(rest) {
        return ContentLine::Numbered {
            numeral: numeral.to_string(),
            text: text.to_string(),
        };
    }

    if let Some((term, explanation)) = split_bold_term(rest) {
        return ContentLine::BoldTerm {
            term: term.to_string(),
            explanation: explanation.to_string(),
        };
    }

    ContentLine::Text(line.to_string())
}

/// Returns the indentation depth (two spaces or one tab per level) and the rest of the line.
fn split_indent(line: &str) -> (u8, &str) {
    let rest = line.trim_start();
    let columns: usize = line[..line.len() - rest.len()]
        .chars()
        .map(|c| if c == '\t' { 2 } else { 1 })
        .sum();
    let depth = u8::try_from(columns / 2).unwrap_or(u8::MAX);
    (depth, rest)
}

/// `"3. step"` → `("3", "step")`. The numeral must be followed by `.` and whitespace.
fn split_numbered(rest: &str) -> Option<(&str, &str)> {
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let after = rest[digits..].strip_prefix('.')?;
    if !after.starts_with(char::is_whitespace) {
        return None;
    }
    let text = after.trim_start();
    if text.is_empty() {
        return None;
    }
    Some((&rest[..digits], text))
}

/// `"**Scope** = the work"` → `("Scope", "= the work")`.
fn split_bold_term(rest: &str) -> Option<(&str, &str)> {
    let inner = rest.strip_prefix(BOLD_MARKER)?;
    let close = inner.find(BOLD_MARKER)?;
    let term = inner[..close].trim();
    if term.is_empty() {
        return None;
    }
    let explanation = inner[close + BOLD_MARKER.len()..].trim_start();
    Some((term, explanation))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
