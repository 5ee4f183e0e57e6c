//! # rtlpdf
//!
//! Translate PDF documents and render the result as right-to-left PDF.
//!
//! The library extracts the text layer of a PDF, sends it through a
//! translation service in size-limited chunks, and lays the translated text
//! out as right-aligned, shaped and bidi-ordered lines on A4 pages.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use rtlpdf::font::FontSource;
//! use rtlpdf::render::ArabicDocumentRenderer;
//!
//! fn main() -> rtlpdf::Result<()> {
//!     // Register Amiri.ttf, or fall back to Helvetica
//!     let (fonts, font_name) = FontSource::default().resolve();
//!
//!     let renderer = ArabicDocumentRenderer::new(Arc::new(fonts))
//!         .with_options(rtlpdf::LayoutOptions::default().with_font(font_name));
//!     let pdf = renderer.render("مرحبا بالعالم")?;
//!     std::fs::write("out.pdf", pdf)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`shape`]: Arabic contextual reshaping and bidi reordering
//! - [`font`]: font registry, fallback and line measurement
//! - [`render`]: page layout and PDF output
//! - [`parser`]: per-page text extraction
//! - [`translate`]: translation backends and chunking
//! - [`pipeline`]: extract, translate and render in one call

pub mod detect;
pub mod error;
pub mod font;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod shape;
pub mod translate;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, PdfFormat};
pub use error::{Error, Result};
pub use font::{FontRegistry, FontSource, FALLBACK_FONT};
pub use model::{Document, Metadata, Page, PlacedLine};
pub use parser::{ErrorMode, PageSelection, ParseOptions, PdfTextExtractor};
pub use pipeline::{output_file_name, TranslationPipeline};
pub use render::{render_arabic_pdf, ArabicDocumentRenderer, LayoutOptions};
pub use shape::{ShapingOptions, TextShaper};
pub use translate::{chunk_text, TranslateOptions, TranslateStrategy, Translator};

#[cfg(feature = "google")]
pub use translate::GoogleTranslator;

use std::path::Path;

/// Extract the text of every page of a PDF file, in page order.
///
/// # Example
///
/// ```no_run
/// let pages = rtlpdf::extract_pages("document.pdf").unwrap();
/// println!("{} pages", pages.len());
/// ```
pub fn extract_pages<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    PdfTextExtractor::open(path)?.extract_pages()
}

/// Extract the text of a PDF file with custom options.
pub fn extract_pages_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<Vec<String>> {
    PdfTextExtractor::open_with_options(path, options)?.extract_pages()
}

/// Extract plain text from a PDF file.
///
/// # Example
///
/// ```no_run
/// let text = rtlpdf::extract_text("document.pdf").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    PdfTextExtractor::open(path)?.extract_text()
}

/// Shape one logical line for left-to-right glyph placement.
///
/// # Example
///
/// ```
/// assert_eq!(rtlpdf::shape_line("v1.2 (beta)"), "v1.2 (beta)");
/// ```
pub fn shape_line(line: &str) -> String {
    TextShaper::new().shape(line)
}

/// Get the library version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
