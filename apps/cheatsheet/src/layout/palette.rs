//! Box colour palette.
//!
//! Five accent colours rotate by box position in the parsed sequence (`index % 5`), so
//! the same input always gets the same colours. The box body uses a light tint of its
//! accent; the header bar uses the accent itself.

/// An RGB colour with components in `0.0..=1.0`, as the PDF content stream expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const TEXT: Rgb = Rgb::new(0.12, 0.12, 0.12);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        )
    }

    /// Mixes the colour towards white; `amount = 1.0` is pure white.
    pub fn tint(self, amount: f32) -> Self {
        let mix = |c: f32| c + (1.0 - c) * amount;
        Self::new(mix(self.r), mix(self.g), mix(self.b))
    }
}

/// Accent colours: teal, navy, olive, purple, brick.
pub const ACCENTS: [u32; 5] = [0x0d7377, 0x1a5276, 0x7d6608, 0x6c3483, 0x922b21];

const BACKGROUND_TINT: f32 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxColors {
    pub accent: Rgb,
    pub background: Rgb,
}

pub fn colors_for(box_index: usize) -> BoxColors {
    let accent = Rgb::from_hex(ACCENTS[box_index % ACCENTS.len()]);
    BoxColors {
        accent,
        background: accent.tint(BACKGROUND_TINT),
    }
}
