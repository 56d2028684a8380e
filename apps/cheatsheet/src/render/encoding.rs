//! Text encoding for the standard Type1 fonts.
//!
//! Helvetica is addressed through WinAnsiEncoding (CP1252), so every string drawn on the
//! sheet goes through `to_winansi_bytes`. Symbols the encoding lacks but that show up in
//! study notes all the time (arrows, comparison operators) are spelled in ASCII first.

/// Replaces characters WinAnsi cannot show with an ASCII spelling.
pub fn normalize_symbols(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '→' | '⇒' | '⟶' => out.push_str("->"),
            '←' | '⇐' | '⟵' => out.push_str("<-"),
            '↔' | '⇔' => out.push_str("<->"),
            '≥' => out.push_str(">="),
            '≤' => out.push_str("<="),
            '≠' => out.push_str("!="),
            '≈' => out.push('~'),
            '\t' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

/// CP1252 code points 0x80..=0x9F that differ from Latin-1.
fn cp1252_special(c: char) -> Option<u8> {
    let byte = match c {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

/// Encodes text as WinAnsi bytes. Unencodable characters become `?`.
pub fn to_winansi_bytes(text: &str) -> Vec<u8> {
    normalize_symbols(text)
        .chars()
        .map(|c| {
            let code = c as u32;
            if let Some(b) = cp1252_special(c) {
                b
            } else if (0x20..0x7F).contains(&code) || (0xA0..=0xFF).contains(&code) {
                code as u8
            } else {
                b'?'
            }
        })
        .collect()
}
