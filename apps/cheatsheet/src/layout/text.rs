//! Rich-text spans and greedy word wrapping for box content.
//!
//! Text is split into words at whitespace; a word may mix weights (e.g. `**Scope**:`
//! is a bold `Scope` glued to a regular `:`). Wrapping is greedy: add words to the line
//! until the next one would overflow.

use crate::layout::font_metrics::{get_metrics, FontWeight};

const BOLD_MARKER: &str = "**";

/// A run of text drawn in a single weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub weight: FontWeight,
}

impl Span {
    pub fn new(text: impl Into<String>, weight: FontWeight) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }

    pub fn width_pt(&self, size_pt: f32) -> f32 {
        get_metrics(self.weight).width_pt(&self.text, size_pt)
    }
}

/// One wrapped output line.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub runs: Vec<Span>,
    pub width_pt: f32,
}

impl WrappedLine {
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Splits inline `**bold**` markup into spans. An unmatched trailing `**` stays literal.
pub fn inline_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(BOLD_MARKER) {
        let after_open = &rest[open + BOLD_MARKER.len()..];
        let Some(close) = after_open.find(BOLD_MARKER) else {
            break;
        };
        if open > 0 {
            spans.push(Span::new(&rest[..open], FontWeight::Regular));
        }
        if close > 0 {
            spans.push(Span::new(&after_open[..close], FontWeight::Bold));
        }
        rest = &after_open[close + BOLD_MARKER.len()..];
    }
    if !rest.is_empty() {
        spans.push(Span::new(rest, FontWeight::Regular));
    }
    spans
}

// ────────────────────────────────────────────────────────────────────────────
// Wrapping
// ────────────────────────────────────────────────────────────────────────────

/// A whitespace-free fragment of one span.
struct Piece<'a> {
    text: &'a str,
    weight: FontWeight,
    /// True if whitespace separates this piece from the previous one.
    starts_word: bool,
}

fn split_pieces(spans: &[Span]) -> Vec<Piece<'_>> {
    let mut pieces: Vec<Piece<'_>> = Vec::new();
    let mut pending_space = false;

    for span in spans {
        let mut rest = span.text.as_str();
        loop {
            let trimmed = rest.trim_start();
            if trimmed.len() != rest.len() {
                pending_space = true;
            }
            if trimmed.is_empty() {
                break;
            }
            let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
            pieces.push(Piece {
                text: &trimmed[..end],
                weight: span.weight,
                starts_word: pending_space || pieces.is_empty(),
            });
            pending_space = false;
            rest = &trimmed[end..];
        }
    }
    pieces
}

/// Groups pieces into words: a word starts at every piece that follows whitespace.
fn group_words<'a>(pieces: &'a [Piece<'a>]) -> Vec<&'a [Piece<'a>]> {
    let mut words = Vec::new();
    let mut start = 0;
    for (i, piece) in pieces.iter().enumerate() {
        if piece.starts_word && i > start {
            words.push(&pieces[start..i]);
            start = i;
        }
    }
    if start < pieces.len() {
        words.push(&pieces[start..]);
    }
    words
}

fn push_text(runs: &mut Vec<Span>, text: &str, weight: FontWeight) {
    match runs.last_mut() {
        Some(last) if last.weight == weight => last.text.push_str(text),
        _ => runs.push(Span::new(text, weight)),
    }
}

/// Greedy word wrap of `spans` at `max_width_pt`. A single word wider than the line
/// gets a line of its own. Returns no lines for whitespace-only input.
pub fn wrap_spans(spans: &[Span], max_width_pt: f32, size_pt: f32) -> Vec<WrappedLine> {
    let pieces = split_pieces(spans);
    let words = group_words(&pieces);
    let space_w = get_metrics(FontWeight::Regular).space_width * size_pt;

    let mut lines = Vec::new();
    let mut current = WrappedLine {
        runs: Vec::new(),
        width_pt: 0.0,
    };

    for word in words {
        let word_w: f32 = word
            .iter()
            .map(|p| get_metrics(p.weight).width_pt(p.text, size_pt))
            .sum();
        let first_on_line = current.runs.is_empty();

        if !first_on_line && current.width_pt + space_w + word_w > max_width_pt {
            lines.push(std::mem::replace(
                &mut current,
                WrappedLine {
                    runs: Vec::new(),
                    width_pt: 0.0,
                },
            ));
        } else if !first_on_line {
            // The separating space joins the preceding run.
            let weight = current.runs.last().map(|r| r.weight).unwrap_or(FontWeight::Regular);
            push_text(&mut current.runs, " ", weight);
            current.width_pt += space_w;
        }

        for piece in word {
            push_text(&mut current.runs, piece.text, piece.weight);
        }
        current.width_pt += word_w;
    }

    if !current.runs.is_empty() {
        lines.push(current);
    }
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
