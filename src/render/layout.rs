//! Right-to-left page layout.

use std::sync::Arc;

use crate::error::Result;
use crate::font::{FontRegistry, FALLBACK_FONT};
use crate::model::{Document, Metadata, Page, PlacedLine};
use crate::shape::{ShapingOptions, TextShaper};

use super::cursor::PageCursor;
use super::options::LayoutOptions;
use super::pdf;

/// Lays translated text out as right-aligned lines and writes the PDF.
///
/// The renderer holds only read-only configuration, so one instance can
/// serve any number of calls; each call builds its own document and cursor.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use rtlpdf::font::FontRegistry;
/// use rtlpdf::render::ArabicDocumentRenderer;
///
/// let renderer = ArabicDocumentRenderer::new(Arc::new(FontRegistry::new()));
/// let doc = renderer.layout("first line\n\nsecond line").unwrap();
/// assert_eq!(doc.line_count(), 2);
///
/// let bytes = renderer.render("first line").unwrap();
/// assert!(bytes.starts_with(b"%PDF-"));
/// ```
#[derive(Debug, Clone)]
pub struct ArabicDocumentRenderer {
    fonts: Arc<FontRegistry>,
    options: LayoutOptions,
    shaper: TextShaper,
    metadata: Metadata,
}

impl ArabicDocumentRenderer {
    /// Create a renderer with default layout.
    pub fn new(fonts: Arc<FontRegistry>) -> Self {
        Self {
            fonts,
            options: LayoutOptions::default(),
            shaper: TextShaper::new(),
            metadata: Metadata::default(),
        }
    }

    /// Set layout options.
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Set shaping options.
    pub fn with_shaping(mut self, shaping: ShapingOptions) -> Self {
        self.shaper = TextShaper::with_options(shaping);
        self
    }

    /// Set document metadata written to the Info dictionary.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Layout options in use.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Font registry in use.
    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    /// Render `text` into PDF bytes.
    pub fn render(&self, text: &str) -> Result<Vec<u8>> {
        self.write(&self.layout(text)?)
    }

    /// Serialize a document produced by [`layout`](Self::layout).
    pub fn write(&self, document: &Document) -> Result<Vec<u8>> {
        pdf::write_document(
            document,
            &self.fonts,
            &self.options.font_name,
            self.options.font_size,
        )
    }

    /// Place every line of `text` without serializing.
    pub fn layout(&self, text: &str) -> Result<Document> {
        self.options.validate()?;
        if !self.fonts.contains(&self.options.font_name) {
            log::warn!(
                "Font '{}' is not registered; measuring with {}",
                self.options.font_name,
                FALLBACK_FONT
            );
        }

        let options = &self.options;
        let mut document = Document::with_metadata(self.metadata.clone());
        let mut page = self.new_page(1);
        let mut cursor = PageCursor::new(options);

        for line in text.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.trim().is_empty() {
                continue;
            }

            for segment in self.segments(line) {
                let shaped = self.shaper.shape(&segment);
                let width = self
                    .fonts
                    .measure_width(&shaped, &options.font_name, options.font_size);

                let placement = cursor.advance();
                if placement.needs_new_page {
                    let next = self.new_page(page.number + 1);
                    document.add_page(std::mem::replace(&mut page, next));
                    log::debug!("Page break: starting page {}", page.number);
                }

                let x = options.right_edge() - width;
                page.add_line(PlacedLine::new(shaped, x, placement.y, width));
            }
        }
        document.add_page(page);

        log::debug!(
            "Laid out {} lines on {} pages",
            document.line_count(),
            document.page_count()
        );
        Ok(document)
    }

    fn new_page(&self, number: u32) -> Page {
        Page::new(number, self.options.page_width, self.options.page_height)
    }

    /// Split a logical line into pieces that fit the text area.
    ///
    /// Without wrapping the line is returned whole. A single word wider than
    /// the text area gets a line of its own.
    fn segments(&self, line: &str) -> Vec<String> {
        let options = &self.options;
        if !options.wrap {
            return vec![line.to_string()];
        }

        let max_width = options.content_width();
        let fits = |candidate: &str| {
            let shaped = self.shaper.shape(candidate);
            self.fonts
                .measure_width(&shaped, &options.font_name, options.font_size)
                <= max_width
        };

        let mut segments = Vec::new();
        let mut current = String::new();
        for word in line.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{} {}", current, word);
            if fits(&candidate) {
                current = candidate;
            } else {
                segments.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

/// Render `text` with the given font and size, using default page geometry.
///
/// `font_name` should be a name registered in `fonts`; unknown names are
/// drawn with the fallback font.
pub fn render_arabic_pdf(
    fonts: Arc<FontRegistry>,
    text: &str,
    font_name: &str,
    font_size: f32,
) -> Result<Vec<u8>> {
    let options = LayoutOptions::default()
        .with_font(font_name)
        .with_font_size(font_size);
    ArabicDocumentRenderer::new(fonts)
        .with_options(options)
        .render(text)
}
