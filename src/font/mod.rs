//! Font registration and line measurement.
//!
//! Fonts are registered once at startup into a [`FontRegistry`], which is
//! then treated as immutable and shared (usually behind an `Arc`) by every
//! render call. The registry always contains the built-in
//! [`FALLBACK_FONT`], so rendering never fails because a font is missing.
//!
//! # Example
//!
//! ```no_run
//! use rtlpdf::font::FontSource;
//!
//! // Falls back to Helvetica (with a warning) if Amiri.ttf is missing
//! let (fonts, font_name) = FontSource::default().resolve();
//! let width = fonts.measure_width("Hello", &font_name, 12.0);
//! ```

mod builtin;
mod truetype;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub use builtin::BuiltinFont;
pub use truetype::{Glyph, TrueTypeFont};

/// Name of the built-in font every registry provides.
pub const FALLBACK_FONT: &str = "Helvetica";

/// Default font file looked up at startup.
pub const DEFAULT_FONT_FILE: &str = "Amiri.ttf";

/// Default name the font file is registered under.
pub const DEFAULT_FONT_NAME: &str = "ArabicFont";

/// A font available for rendering.
#[derive(Debug, Clone)]
pub enum RegisteredFont {
    /// Base-14 font, not embedded
    Builtin(BuiltinFont),
    /// Embedded TrueType font
    TrueType(TrueTypeFont),
}

impl RegisteredFont {
    /// Width of `text` at `font_size`, in points.
    pub fn measure(&self, text: &str, font_size: f32) -> f32 {
        match self {
            RegisteredFont::Builtin(font) => font.measure(text, font_size),
            RegisteredFont::TrueType(font) => font.measure(text, font_size),
        }
    }

    /// Whether the font is embedded into the output.
    pub fn is_embedded(&self) -> bool {
        matches!(self, RegisteredFont::TrueType(_))
    }
}

/// Write-once set of fonts, keyed by registration name.
#[derive(Debug, Clone)]
pub struct FontRegistry {
    fonts: HashMap<String, RegisteredFont>,
}

impl FontRegistry {
    /// Create a registry holding only the built-in fallback font.
    pub fn new() -> Self {
        let mut fonts = HashMap::new();
        fonts.insert(
            FALLBACK_FONT.to_string(),
            RegisteredFont::Builtin(BuiltinFont::Helvetica),
        );
        Self { fonts }
    }

    /// Register a TrueType font file under `name`.
    pub fn register_file<P: AsRef<Path>>(&mut self, name: &str, path: P) -> Result<()> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::FontNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        self.register_bytes(name, data)?;
        log::debug!("Registered font '{}' from {}", name, path.display());
        Ok(())
    }

    /// Register a TrueType font program under `name`.
    pub fn register_bytes(&mut self, name: &str, data: Vec<u8>) -> Result<()> {
        let font = TrueTypeFont::from_bytes(data)?;
        self.fonts
            .insert(name.to_string(), RegisteredFont::TrueType(font));
        Ok(())
    }

    /// Look up a font by name.
    pub fn get(&self, name: &str) -> Option<&RegisteredFont> {
        self.fonts.get(name)
    }

    /// Check if a font is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    /// Look up a font, substituting the fallback for unknown names.
    pub fn resolve(&self, name: &str) -> &RegisteredFont {
        self.fonts
            .get(name)
            .or_else(|| self.fonts.get(FALLBACK_FONT))
            .unwrap_or(&RegisteredFont::Builtin(BuiltinFont::Helvetica))
    }

    /// Measure the rendered width of a shaped line.
    pub fn measure_width(&self, shaped: &str, font_name: &str, font_size: f32) -> f32 {
        self.resolve(font_name).measure(shaped, font_size)
    }

    /// Registered font names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fonts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Measure the width of a shaped line with a registry.
pub fn measure_width(fonts: &FontRegistry, shaped: &str, font_name: &str, font_size: f32) -> f32 {
    fonts.measure_width(shaped, font_name, font_size)
}

/// Font file configured for startup registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSource {
    /// Path to the TrueType font file
    pub path: PathBuf,

    /// Name to register the font under
    pub name: String,
}

impl FontSource {
    /// Create a font source.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Register the configured font, falling back to the built-in font.
    ///
    /// Returns the registry and the name render calls should use. A font
    /// that cannot be registered is logged and replaced by
    /// [`FALLBACK_FONT`]; startup never fails because of it.
    pub fn resolve(&self) -> (FontRegistry, String) {
        let mut registry = FontRegistry::new();
        match registry.register_file(&self.name, &self.path) {
            Ok(()) => (registry, self.name.clone()),
            Err(e) => {
                log::warn!(
                    "Could not register font '{}' ({}); using {}",
                    self.path.display(),
                    e,
                    FALLBACK_FONT
                );
                (registry, FALLBACK_FONT.to_string())
            }
        }
    }
}

impl Default for FontSource {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_FILE, DEFAULT_FONT_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_registry_has_fallback() {
        let registry = FontRegistry::new();
        assert!(registry.contains(FALLBACK_FONT));
        assert_eq!(registry.names(), vec![FALLBACK_FONT]);
        assert!(!registry.resolve(FALLBACK_FONT).is_embedded());
    }

    #[test]
    fn test_unknown_font_uses_fallback_metrics() {
        let registry = FontRegistry::new();
        let known = registry.measure_width("Hello", FALLBACK_FONT, 12.0);
        let unknown = registry.measure_width("Hello", "NoSuchFont", 12.0);
        assert_eq!(known, unknown);
        assert_eq!(measure_width(&registry, "Hello", "NoSuchFont", 12.0), known);
    }

    #[test]
    fn test_register_missing_file() {
        let mut registry = FontRegistry::new();
        let result = registry.register_file("ArabicFont", "/nonexistent/Amiri.ttf");
        assert!(matches!(result, Err(Error::FontNotFound(_))));
        assert!(!registry.contains("ArabicFont"));
    }

    #[test]
    fn test_register_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not a font").unwrap();

        let mut registry = FontRegistry::new();
        let result = registry.register_file("Broken", file.path());
        assert!(matches!(result, Err(Error::FontParse(_))));
    }

    #[test]
    fn test_font_source_falls_back() {
        let source = FontSource::new("/nonexistent/Amiri.ttf", "ArabicFont");
        let (registry, name) = source.resolve();
        assert_eq!(name, FALLBACK_FONT);
        assert!(registry.contains(FALLBACK_FONT));
    }

    #[test]
    fn test_font_source_default() {
        let source = FontSource::default();
        assert_eq!(source.path, PathBuf::from("Amiri.ttf"));
        assert_eq!(source.name, "ArabicFont");
    }
}
