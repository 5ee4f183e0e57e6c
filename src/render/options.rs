//! Layout options and configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::font::FALLBACK_FONT;

/// A4 width in points.
pub const A4_WIDTH: f32 = 595.0;

/// A4 height in points.
pub const A4_HEIGHT: f32 = 842.0;

/// Options for laying out right-to-left text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Page width in points
    pub page_width: f32,

    /// Page height in points
    pub page_height: f32,

    /// Top margin; the first line of every page is drawn here
    pub margin_top: f32,

    /// Bottom margin; no line is drawn below it
    pub margin_bottom: f32,

    /// Left margin, only used when wrapping
    pub margin_left: f32,

    /// Right margin; lines are aligned against it
    pub margin_right: f32,

    /// Name of the registered font to draw with
    pub font_name: String,

    /// Font size in points
    pub font_size: f32,

    /// Fixed distance between baselines, independent of font metrics
    pub line_height: f32,

    /// Break lines wider than the text area at word boundaries
    pub wrap: bool,
}

impl LayoutOptions {
    /// Create layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Set all four margins.
    pub fn with_margins(mut self, margin: f32) -> Self {
        self.margin_top = margin;
        self.margin_bottom = margin;
        self.margin_left = margin;
        self.margin_right = margin;
        self
    }

    /// Set the top margin.
    pub fn with_margin_top(mut self, margin: f32) -> Self {
        self.margin_top = margin;
        self
    }

    /// Set the bottom margin.
    pub fn with_margin_bottom(mut self, margin: f32) -> Self {
        self.margin_bottom = margin;
        self
    }

    /// Set the right margin.
    pub fn with_margin_right(mut self, margin: f32) -> Self {
        self.margin_right = margin;
        self
    }

    /// Set the font by registered name.
    pub fn with_font(mut self, name: impl Into<String>) -> Self {
        self.font_name = name.into();
        self
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the line height.
    pub fn with_line_height(mut self, height: f32) -> Self {
        self.line_height = height;
        self
    }

    /// Enable or disable word wrapping.
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Baseline of the first line on a page.
    pub fn top_y(&self) -> f32 {
        self.page_height - self.margin_top
    }

    /// Right edge lines are aligned to.
    pub fn right_edge(&self) -> f32 {
        self.page_width - self.margin_right
    }

    /// Horizontal space available for a line.
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Check that the geometry can hold at least one line.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.page_width,
            self.page_height,
            self.margin_top,
            self.margin_bottom,
            self.margin_left,
            self.margin_right,
            self.font_size,
            self.line_height,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(Error::InvalidLayout("values must be finite".to_string()));
        }
        if self.page_width <= 0.0 || self.page_height <= 0.0 {
            return Err(Error::InvalidLayout(format!(
                "page size {}x{} must be positive",
                self.page_width, self.page_height
            )));
        }
        if self.font_size <= 0.0 {
            return Err(Error::InvalidLayout(format!(
                "font size {} must be positive",
                self.font_size
            )));
        }
        if self.line_height <= 0.0 {
            return Err(Error::InvalidLayout(format!(
                "line height {} must be positive",
                self.line_height
            )));
        }
        if self.top_y() < self.margin_bottom {
            return Err(Error::InvalidLayout(format!(
                "margins {} + {} leave no room on a page of height {}",
                self.margin_top, self.margin_bottom, self.page_height
            )));
        }
        if self.content_width() <= 0.0 {
            return Err(Error::InvalidLayout(format!(
                "margins {} + {} leave no room on a page of width {}",
                self.margin_left, self.margin_right, self.page_width
            )));
        }
        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
            margin_top: 50.0,
            margin_bottom: 50.0,
            margin_left: 50.0,
            margin_right: 50.0,
            font_name: FALLBACK_FONT.to_string(),
            font_size: 12.0,
            line_height: 20.0,
            wrap: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LayoutOptions::default();
        assert_eq!(options.page_width, 595.0);
        assert_eq!(options.page_height, 842.0);
        assert_eq!(options.font_size, 12.0);
        assert_eq!(options.line_height, 20.0);
        assert_eq!(options.top_y(), 792.0);
        assert_eq!(options.right_edge(), 545.0);
        assert_eq!(options.content_width(), 495.0);
        assert_eq!(options.font_name, "Helvetica");
        assert!(!options.wrap);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let options = LayoutOptions::new()
            .with_page_size(612.0, 792.0)
            .with_margins(36.0)
            .with_margin_right(72.0)
            .with_font("ArabicFont")
            .with_font_size(14.0)
            .with_line_height(24.0)
            .with_wrap(true);

        assert_eq!(options.top_y(), 756.0);
        assert_eq!(options.right_edge(), 540.0);
        assert_eq!(options.font_name, "ArabicFont");
        assert_eq!(options.font_size, 14.0);
        assert_eq!(options.line_height, 24.0);
        assert!(options.wrap);
    }

    #[test]
    fn test_validate_rejects_bad_geometry() {
        let cases = [
            LayoutOptions::new().with_page_size(0.0, 842.0),
            LayoutOptions::new().with_font_size(0.0),
            LayoutOptions::new().with_line_height(-1.0),
            LayoutOptions::new().with_margins(500.0),
            LayoutOptions::new().with_font_size(f32::NAN),
        ];
        for options in cases {
            assert!(matches!(options.validate(), Err(Error::InvalidLayout(_))));
        }
    }
}
