//! Static font-metric tables for the PDF base fonts used on the sheet.
//!
//! Widths are in em units (relative to font size), taken from the Adobe AFM files for
//! Helvetica, Helvetica-Bold and Courier. All are standard Type1 fonts every PDF viewer ships,
//! so nothing is embedded and these tables are the exact advance widths the viewer uses.
//! Tables cover ASCII 0x20..=0x7E (95 printable characters); index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font weight
// ────────────────────────────────────────────────────────────────────────────

/// The faces used for box content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    /// Helvetica: body text and explanations.
    Regular,
    /// Helvetica-Bold: titles, bold terms and inline `**bold**` spans.
    Bold,
    /// Courier: fenced code, drawn verbatim.
    Mono,
}

impl FontWeight {
    /// PostScript name of the base font.
    pub fn base_font(self) -> &'static str {
        match self {
            FontWeight::Regular => "Helvetica",
            FontWeight::Bold => "Helvetica-Bold",
            FontWeight::Mono => "Courier",
        }
    }

    /// Name under which the font is registered in each page's resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontWeight::Regular => "F1",
            FontWeight::Bold => "F2",
            FontWeight::Mono => "F3",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one weight.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    pub weight: FontWeight,
    widths: [f32; 95],
    /// Fallback width for characters without a table entry.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Width of a string in points at `size_pt`.
    pub fn width_pt(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt
    }

    fn char_width(&self, c: char) -> f32 {
        if self.weight == FontWeight::Mono {
            return COURIER_ADVANCE;
        }
        let code = c as usize;
        if (32..=126).contains(&code) {
            return self.widths[code - 32];
        }
        let bold = self.weight == FontWeight::Bold;
        match c {
            '•' => 0.35,
            '–' => 0.556,
            '—' | '…' => 1.0,
            '‘' | '’' => if bold { 0.278 } else { 0.222 },
            '“' | '”' => if bold { 0.5 } else { 0.333 },
            '×' => 0.584,
            _ => self.average_char_width,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    weight: FontWeight::Regular,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.54,
    space_width: 0.278,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    weight: FontWeight::Bold,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.58,
    space_width: 0.278,
};

/// Every Courier glyph advances by the same width.
const COURIER_ADVANCE: f32 = 0.6;

static COURIER_TABLE: FontMetricTable = FontMetricTable {
    weight: FontWeight::Mono,
    widths: [COURIER_ADVANCE; 95],
    average_char_width: COURIER_ADVANCE,
    space_width: COURIER_ADVANCE,
};

/// Returns the static metric table for a given weight.
pub fn get_metrics(weight: FontWeight) -> &'static FontMetricTable {
    match weight {
        FontWeight::Regular => &HELVETICA_TABLE,
        FontWeight::Bold => &HELVETICA_BOLD_TABLE,
        FontWeight::Mono => &COURIER_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(FontWeight::Regular);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(FontWeight::Regular);
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = metrics.measure_str("Rust");
        assert!(
            (width - 2.056).abs() < 1e-3,
            "Rust width should be ~2.056, got {width}"
        );
    }

    #[test]
    fn test_bullet_glyph_has_known_width() {
        let metrics = get_metrics(FontWeight::Regular);
        assert!((metrics.measure_str("•") - 0.35).abs() < 1e-4);
    }

    #[test]
    fn test_non_table_char_falls_back_to_average() {
        let metrics = get_metrics(FontWeight::Regular);
        let width = metrics.measure_str("é");
        assert!(
            (width - metrics.average_char_width).abs() < 1e-4,
            "characters without an entry should use average_char_width"
        );
    }

    #[test]
    fn test_bold_is_never_narrower_than_regular() {
        let text = "Earned Value Management (EVM)";
        let regular = get_metrics(FontWeight::Regular).measure_str(text);
        let bold = get_metrics(FontWeight::Bold).measure_str(text);
        assert!(bold >= regular, "bold {bold} should be >= regular {regular}");
    }

    #[test]
    fn test_width_pt_scales_with_size() {
        let metrics = get_metrics(FontWeight::Bold);
        let at_10 = metrics.width_pt("Scope", 10.0);
        let at_5 = metrics.width_pt("Scope", 5.0);
        assert!((at_10 - 2.0 * at_5).abs() < 1e-4);
    }

    #[test]
    fn test_resource_names_are_distinct() {
        assert_ne!(
            FontWeight::Regular.resource_name(),
            FontWeight::Bold.resource_name()
        );
        assert_eq!(FontWeight::Bold.base_font(), "Helvetica-Bold");
    }

    #[test]
    fn test_courier_is_monospaced() {
        let metrics = get_metrics(FontWeight::Mono);
        assert_eq!(metrics.measure_str("iiii"), metrics.measure_str("WWWW"));
        assert!((metrics.measure_str("  x•") - 2.4).abs() < 1e-6);
        assert_eq!(FontWeight::Mono.base_font(), "Courier");
        assert_eq!(FontWeight::Mono.resource_name(), "F3");
    }
}
