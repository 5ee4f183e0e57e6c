//! Embedded TrueType fonts.
//!
//! The font program is kept as raw bytes and embedded whole into the output.
//! Glyph lookups and advance widths go through `ttf-parser`, so the widths
//! used for measuring are exactly the widths written into the PDF `/W` array.

use std::sync::Arc;

use ttf_parser::{Face, GlyphId};

use crate::error::{Error, Result};

/// A glyph resolved for drawing: id plus advance in font units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub id: u16,
    pub advance: u16,
}

/// A parsed TrueType/OpenType font.
#[derive(Debug, Clone)]
pub struct TrueTypeFont {
    data: Arc<[u8]>,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    cap_height: i16,
    bbox: [i16; 4],
}

impl TrueTypeFont {
    /// Parse a font program.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let data: Arc<[u8]> = data.into();
        let face = Face::parse(&data, 0).map_err(|e| Error::FontParse(e.to_string()))?;

        let rect = face.global_bounding_box();
        let font = Self {
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
            cap_height: face.capital_height().unwrap_or_else(|| face.ascender()),
            bbox: [rect.x_min, rect.y_min, rect.x_max, rect.y_max],
            data: Arc::clone(&data),
        };
        Ok(font)
    }

    fn face(&self) -> Option<Face<'_>> {
        Face::parse(&self.data, 0).ok()
    }

    /// Raw font program bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Font design units per em.
    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Resolve every character of `text` to a glyph.
    ///
    /// Characters missing from the font map to glyph 0 (`.notdef`).
    pub fn glyphs(&self, text: &str) -> Vec<Glyph> {
        let Some(face) = self.face() else {
            return Vec::new();
        };
        text.chars()
            .map(|c| {
                let id = face.glyph_index(c).unwrap_or(GlyphId(0));
                Glyph {
                    id: id.0,
                    advance: face.glyph_hor_advance(id).unwrap_or(0),
                }
            })
            .collect()
    }

    /// Width of `text` at `font_size`.
    pub fn measure(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = self
            .glyphs(text)
            .iter()
            .map(|g| u32::from(g.advance))
            .sum();
        units as f32 * font_size / f32::from(self.units_per_em.max(1))
    }

    /// Convert a value in font units to PDF glyph space (1/1000 em).
    pub fn to_glyph_space(&self, units: i32) -> f32 {
        units as f32 * 1000.0 / f32::from(self.units_per_em.max(1))
    }

    /// Ascender in font units.
    pub fn ascender(&self) -> i16 {
        self.ascender
    }

    /// Descender in font units (usually negative).
    pub fn descender(&self) -> i16 {
        self.descender
    }

    /// Capital height in font units.
    pub fn cap_height(&self) -> i16 {
        self.cap_height
    }

    /// Bounding box `[x_min, y_min, x_max, y_max]` in font units.
    pub fn bbox(&self) -> [i16; 4] {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_garbage() {
        let result = TrueTypeFont::from_bytes(b"definitely not a font".to_vec());
        assert!(matches!(result, Err(Error::FontParse(_))));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(TrueTypeFont::from_bytes(Vec::new()).is_err());
    }
}
