//! Page-level types.

use serde::{Deserialize, Serialize};

/// A single output page.
///
/// Coordinates use the PDF convention: origin at the bottom-left corner,
/// y growing upwards, units in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Lines drawn on the page, top to bottom
    pub lines: Vec<PlacedLine>,
}

impl Page {
    /// Create a new page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            lines: Vec::new(),
        }
    }

    /// Create a new page with standard A4 size (210 x 297 mm).
    pub fn a4(number: u32) -> Self {
        Self::new(number, 595.0, 842.0)
    }

    /// Record a drawn line.
    pub fn add_line(&mut self, line: PlacedLine) {
        self.lines.push(line);
    }

    /// Number of drawn lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if nothing was drawn on the page.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get page dimensions as (width, height) tuple.
    pub fn dimensions(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Shaped text of the page, one drawn line per text line.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A glyph run drawn at a fixed position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLine {
    /// Shaped, visually ordered text
    pub text: String,

    /// Left edge of the run
    pub x: f32,

    /// Baseline
    pub y: f32,

    /// Measured width of the run
    pub width: f32,
}

impl PlacedLine {
    /// Create a placed line.
    pub fn new(text: impl Into<String>, x: f32, y: f32, width: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
        }
    }

    /// Right edge of the run.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}
