//! Box records produced by the parser and consumed by the renderer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Size class
// ────────────────────────────────────────────────────────────────────────────

/// Declared footprint of a box, named after ISO paper sizes.
///
/// Each step down halves the area: A4 fills the page, A5 half of it, A6 a quarter,
/// A7 an eighth. Ordering follows the enum value, so `A4 < A7` while A4 is the larger box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    A4,
    A5,
    A6,
    A7,
}

impl SizeClass {
    pub const ALL: [SizeClass; 4] = [SizeClass::A4, SizeClass::A5, SizeClass::A6, SizeClass::A7];

    /// Span on the page grid as `(columns, rows)`. The grid is 2 columns × 4 rows.
    pub fn grid_span(self) -> (u32, u32) {
        match self {
            SizeClass::A4 => (2, 4),
            SizeClass::A5 => (2, 2),
            SizeClass::A6 => (1, 2),
            SizeClass::A7 => (1, 1),
        }
    }

    /// Footprint in grid cells (A7 = 1 unit, a full page = 8 units).
    pub fn units(self) -> u32 {
        let (cols, rows) = self.grid_span();
        cols * rows
    }

    /// Fraction of a page this class occupies.
    pub fn page_fraction(self) -> f32 {
        self.units() as f32 / 8.0
    }

    pub fn token(self) -> &'static str {
        match self {
            SizeClass::A4 => "A4",
            SizeClass::A5 => "A5",
            SizeClass::A6 => "A6",
            SizeClass::A7 => "A7",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Returned when a size token is not one of A4–A7.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSizeToken(pub String);

impl FromStr for SizeClass {
    type Err = UnknownSizeToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        SizeClass::ALL
            .into_iter()
            .find(|class| class.token().eq_ignore_ascii_case(token))
            .ok_or_else(|| UnknownSizeToken(token.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Content lines
// ────────────────────────────────────────────────────────────────────────────

/// One classified line of box content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "line", rename_all = "snake_case")]
pub enum ContentLine {
    Text(String),
    /// `depth` counts indentation levels (two spaces or one tab each).
    Bullet { text: String, depth: u8 },
    /// `numeral` is kept exactly as written, e.g. `"3"` or `"03"`.
    Numbered { numeral: String, text: String },
    BoldTerm { term: String, explanation: String },
    /// A line inside a fenced code block, indentation included.
    Code(String),
}

impl ContentLine {
    /// The display text without any label (bullet glyph, numeral or term).
    pub fn text(&self) -> &str {
        match self {
            ContentLine::Text(text) => text,
            ContentLine::Bullet { text, .. } => text,
            ContentLine::Numbered { text, .. } => text,
            ContentLine::BoldTerm { explanation, .. } => explanation,
            ContentLine::Code(code) => code,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Box
// ────────────────────────────────────────────────────────────────────────────

/// A parsed cheat-sheet box. Never mutated after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBox {
    pub size_class: SizeClass,
    pub title: String,
    pub body: Vec<ContentLine>,
    /// Indices into `body` where a new paragraph starts after blank lines.
    pub paragraph_breaks: Vec<usize>,
    /// Set by a `[PAGEBREAK]` marker before the box.
    pub page_break_before: bool,
}

impl ContentBox {
    pub fn new(size_class: SizeClass) -> Self {
        Self {
            size_class,
            title: String::new(),
            body: Vec::new(),
            paragraph_breaks: Vec::new(),
            page_break_before: false,
        }
    }

    /// True if a paragraph break precedes `body[index]`.
    pub fn starts_paragraph(&self, index: usize) -> bool {
        self.paragraph_breaks.binary_search(&index).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_class_parses_case_insensitive() {
        assert_eq!("a6".parse::<SizeClass>(), Ok(SizeClass::A6));
        assert_eq!(" A5 ".parse::<SizeClass>(), Ok(SizeClass::A5));
    }

    #[test]
    fn test_size_class_rejects_unknown_token() {
        let err = "A1".parse::<SizeClass>().unwrap_err();
        assert_eq!(err, UnknownSizeToken("A1".to_string()));
    }

    #[test]
    fn test_units_halve_with_each_class() {
        assert_eq!(SizeClass::A4.units(), 8);
        assert_eq!(SizeClass::A5.units(), 4);
        assert_eq!(SizeClass::A6.units(), 2);
        assert_eq!(SizeClass::A7.units(), 1);
        assert!((SizeClass::A6.page_fraction() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_larger_enum_value_is_smaller_box() {
        assert!(SizeClass::A7 > SizeClass::A4);
        assert!(SizeClass::A7.units() < SizeClass::A4.units());
    }

    #[test]
    fn test_content_line_serializes_with_kind_tag() {
        let line = ContentLine::Numbered {
            numeral: "3".to_string(),
            text: "step".to_string(),
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["kind"], "numbered");
        assert_eq!(json["line"]["numeral"], "3");
    }
}
