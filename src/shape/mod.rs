//! Text shaping for right-to-left output.
//!
//! A logical line goes through two steps before it can be drawn with plain
//! left-to-right glyph placement:
//!
//! 1. **Reshaping** ([`arabic`]): letters become their joined presentation
//!    forms based on their neighbours.
//! 2. **Reordering** ([`bidi`]): the Unicode Bidirectional Algorithm turns
//!    logical order into visual order.
//!
//! # Example
//!
//! ```
//! use rtlpdf::shape::TextShaper;
//!
//! let shaper = TextShaper::new();
//! // Latin and digits pass through untouched
//! assert_eq!(shaper.shape("Invoice 42"), "Invoice 42");
//! ```

pub mod arabic;
pub mod bidi;

use unicode_normalization::UnicodeNormalization;

pub use arabic::{ArabicReshaper, JoiningType, PositionalForm};
pub use bidi::reorder_visual;

/// Options controlling the reshaping step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapingOptions {
    /// Drop Arabic diacritics (harakat) from the output
    pub delete_harakat: bool,

    /// Drop tatweel (kashida) from the output
    pub delete_tatweel: bool,

    /// Fold lam + alef into ligature forms
    pub support_ligatures: bool,
}

impl ShapingOptions {
    /// Create shaping options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep or drop diacritics.
    pub fn with_harakat(mut self, keep: bool) -> Self {
        self.delete_harakat = !keep;
        self
    }

    /// Keep or drop tatweel.
    pub fn with_tatweel(mut self, keep: bool) -> Self {
        self.delete_tatweel = !keep;
        self
    }

    /// Enable or disable lam-alef ligatures.
    pub fn with_ligatures(mut self, enabled: bool) -> Self {
        self.support_ligatures = enabled;
        self
    }
}

impl Default for ShapingOptions {
    fn default() -> Self {
        Self {
            delete_harakat: true,
            delete_tatweel: false,
            support_ligatures: true,
        }
    }
}

/// Converts logical lines into visually ordered, reshaped glyph strings.
#[derive(Debug, Clone, Default)]
pub struct TextShaper {
    reshaper: ArabicReshaper,
}

impl TextShaper {
    /// Create a shaper with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shaper with custom options.
    pub fn with_options(options: ShapingOptions) -> Self {
        Self {
            reshaper: ArabicReshaper {
                delete_harakat: options.delete_harakat,
                delete_tatweel: options.delete_tatweel,
                support_ligatures: options.support_ligatures,
            },
        }
    }

    /// Shape one logical line.
    ///
    /// The result can be drawn left to right and reads correctly right to
    /// left. Lines without Arabic script are returned as-is.
    pub fn shape(&self, line: &str) -> String {
        if !line.chars().any(arabic::is_arabic) {
            return bidi::reorder_visual(line);
        }

        // Compose decomposed sequences (alef + madda above, ...) first so the
        // reshaper sees the precomposed letters it has forms for.
        let composed: String = line.nfc().collect();
        let reshaped = self.reshaper.reshape(&composed);
        bidi::reorder_visual(&reshaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_ltr_identity() {
        let shaper = TextShaper::new();
        for line in ["Hello", "2024-01-15", "Total: 1,250.00 (net)", "  padded  "] {
            assert_eq!(shaper.shape(line), line);
        }
    }

    #[test]
    fn test_arabic_word_shaped_and_reversed() {
        let shaper = TextShaper::new();
        // beh + seen + meem, shaped then reversed for display
        assert_eq!(shaper.shape("بسم"), "\u{FEE2}\u{FEB4}\u{FE91}");
    }

    #[test]
    fn test_decomposed_input_composed() {
        let shaper = TextShaper::new();
        // alef + madda above composes to alef with madda (U+0622)
        assert_eq!(shaper.shape("\u{0627}\u{0653}"), "\u{FE81}");
    }

    #[test]
    fn test_mixed_line_keeps_latin_run() {
        let shaper = TextShaper::new();
        let shaped = shaper.shape("بسم PDF");
        assert!(shaped.starts_with("PDF"));
        assert!(shaped.ends_with('\u{FE91}'));
    }

    #[test]
    fn test_paragraph_separator_not_moved() {
        let shaper = TextShaper::new();
        assert_eq!(shaper.shape("ب\u{2029}ت"), "\u{FE8F}\u{2029}\u{FE95}");
    }

    #[test]
    fn test_options_builder() {
        let options = ShapingOptions::new()
            .with_harakat(true)
            .with_tatweel(false)
            .with_ligatures(false);
        assert!(!options.delete_harakat);
        assert!(options.delete_tatweel);
        assert!(!options.support_ligatures);

        let shaper = TextShaper::with_options(options);
        assert_eq!(shaper.shape("لا"), "\u{FE8E}\u{FEDF}");
    }
}
