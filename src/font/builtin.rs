//! Built-in (non-embedded) base-14 font used as the universal fallback.

/// Width table for Helvetica over WinAnsi bytes 0x20..=0xFF, in 1/1000 em.
///
/// Bytes WinAnsi leaves undefined carry the width of `?` and are never
/// produced by [`BuiltinFont::encode`].
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 224] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 556, // 'p'..0x7F
    556, 556, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 556, 611, 556, // 0x80..0x8F
    556, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 556, 500, 667, // 0x90..0x9F
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xA0..0xAF
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xB0..0xBF
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xC0..0xCF
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xD0..0xDF
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // 0xE0..0xEF
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // 0xF0..0xFF
];

/// Byte drawn in place of characters the encoding cannot express.
const REPLACEMENT: u8 = b'?';

/// WinAnsi byte for a character, if the encoding has one.
fn win_ansi_byte(c: char) -> Option<u8> {
    let byte = match c {
        ' '..='~' | '\u{A0}'..='\u{FF}' => c as u8,
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

/// A base-14 font that every PDF viewer provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFont {
    Helvetica,
}

impl BuiltinFont {
    /// PostScript name written as `/BaseFont`.
    pub fn base_font(self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
        }
    }

    /// Encode text as single WinAnsi bytes.
    ///
    /// Characters outside WinAnsi (Arabic among them) become `?`.
    pub fn encode(self, text: &str) -> Vec<u8> {
        text.chars()
            .map(|c| win_ansi_byte(c).unwrap_or(REPLACEMENT))
            .collect()
    }

    /// Advance width of an encoded byte, in 1/1000 em.
    pub fn byte_width(self, byte: u8) -> u16 {
        match byte {
            0x20..=0xFF => HELVETICA_WIDTHS[(byte - 0x20) as usize],
            _ => HELVETICA_WIDTHS[(REPLACEMENT - 0x20) as usize],
        }
    }

    /// Width of `text` at `font_size`, measured on exactly the bytes that
    /// [`encode`](Self::encode) produces.
    pub fn measure(self, text: &str, font_size: f32) -> f32 {
        let units: u32 = self
            .encode(text)
            .into_iter()
            .map(|b| u32::from(self.byte_width(b)))
            .sum();
        units as f32 * font_size / 1000.0
    }
}
