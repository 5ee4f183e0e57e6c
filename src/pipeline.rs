//! Extract, translate and render in one call.

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::font::FontRegistry;
use crate::model::Metadata;
use crate::parser::{ParseOptions, PdfTextExtractor};
use crate::render::{ArabicDocumentRenderer, LayoutOptions};
use crate::translate::{translate_pages, TranslateOptions, Translator};

/// Turns a source PDF into a translated right-to-left PDF.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use rtlpdf::font::FontSource;
/// use rtlpdf::render::LayoutOptions;
/// use rtlpdf::translate::GoogleTranslator;
/// use rtlpdf::TranslationPipeline;
///
/// let (fonts, font_name) = FontSource::default().resolve();
/// let pipeline = TranslationPipeline::new(Arc::new(GoogleTranslator::new()?), Arc::new(fonts))
///     .with_layout(LayoutOptions::default().with_font(font_name));
///
/// let pdf = pipeline.translate_pdf_file("report.pdf")?;
/// std::fs::write(rtlpdf::pipeline::output_file_name("report.pdf", "ar"), pdf)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct TranslationPipeline {
    translator: Arc<dyn Translator>,
    fonts: Arc<FontRegistry>,
    parse_options: ParseOptions,
    translate_options: TranslateOptions,
    layout: LayoutOptions,
    metadata: Metadata,
}

impl TranslationPipeline {
    /// Create a pipeline with default options.
    pub fn new(translator: Arc<dyn Translator>, fonts: Arc<FontRegistry>) -> Self {
        Self {
            translator,
            fonts,
            parse_options: ParseOptions::default(),
            translate_options: TranslateOptions::default(),
            layout: LayoutOptions::default(),
            metadata: Metadata::default(),
        }
    }

    /// Set extraction options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Set translation options.
    pub fn with_translate_options(mut self, options: TranslateOptions) -> Self {
        self.translate_options = options;
        self
    }

    /// Set layout options.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Set metadata for the output document.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Translation options in use.
    pub fn translate_options(&self) -> &TranslateOptions {
        &self.translate_options
    }

    /// Translate a PDF held in memory.
    pub fn translate_pdf_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.translate_pdf_bytes_with_progress(data, |_, _| {})
    }

    /// Translate a PDF held in memory, reporting translation progress.
    ///
    /// `progress` receives finished and total request counts.
    pub fn translate_pdf_bytes_with_progress<F>(&self, data: &[u8], progress: F) -> Result<Vec<u8>>
    where
        F: FnMut(usize, usize),
    {
        let extractor = PdfTextExtractor::from_bytes_with_options(data, self.parse_options.clone())?;
        let pages = extractor.extract_pages()?;
        log::info!("Extracted {} pages", pages.len());

        let translated = translate_pages(
            self.translator.as_ref(),
            &pages,
            &self.translate_options,
            progress,
        )?;
        log::info!("Translated into {} chars", translated.chars().count());

        self.render(&translated)
    }

    /// Translate a PDF file.
    pub fn translate_pdf_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<u8>> {
        let data = std::fs::read(path.as_ref())?;
        self.translate_pdf_bytes(&data)
    }

    /// Render already translated text.
    pub fn render(&self, translated: &str) -> Result<Vec<u8>> {
        let bytes = ArabicDocumentRenderer::new(Arc::clone(&self.fonts))
            .with_options(self.layout.clone())
            .with_metadata(self.metadata.clone())
            .render(translated)?;
        log::info!("Rendered {} bytes", bytes.len());
        Ok(bytes)
    }
}

/// Name for the translated copy of `input_name`.
///
/// `"report.pdf"` becomes `"report_ar.pdf"` for target `"ar"`. Directory
/// components are dropped.
pub fn output_file_name(input_name: &str, target_lang: &str) -> String {
    let stem = Path::new(input_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("translated");
    format!("{}_{}.pdf", stem, target_lang)
}
