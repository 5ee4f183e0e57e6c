//! Translation of extracted text.
//!
//! Translation services limit the size of a single request, so long text is
//! split into chunks with [`chunk_text`], translated chunk by chunk, and the
//! results concatenated in order. Chunks are cut on character boundaries
//! only; a chunk seam can fall inside a word.
//!
//! # Example
//!
//! ```
//! use rtlpdf::translate::{translate_chunked, TranslateOptions, Translator};
//!
//! struct Upper;
//!
//! impl Translator for Upper {
//!     fn name(&self) -> &str {
//!         "upper"
//!     }
//!
//!     fn translate(&self, text: &str, _source: &str, _target: &str) -> rtlpdf::Result<String> {
//!         Ok(text.to_uppercase())
//!     }
//! }
//!
//! let options = TranslateOptions::new().with_chunk_size(4);
//! let out = translate_chunked(&Upper, "abcdefgh", &options).unwrap();
//! assert_eq!(out, "ABCDEFGH");
//! ```

#[cfg(feature = "google")]
mod google;

#[cfg(feature = "google")]
pub use google::GoogleTranslator;

use crate::error::{Error, Result};

/// Largest number of characters sent in one request by default.
pub const DEFAULT_CHUNK_SIZE: usize = 4900;

/// A text translation backend.
pub trait Translator: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Translate `text` from `source` to `target` language codes.
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;
}

/// How extracted pages are grouped into requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslateStrategy {
    /// Join all pages with newlines, then chunk the whole text
    #[default]
    Chunked,
    /// Translate each non-blank page on its own, separated by blank lines
    PerPage,
}

/// Options for translating extracted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Source language code
    pub source_lang: String,

    /// Target language code
    pub target_lang: String,

    /// Maximum characters per request
    pub chunk_size: usize,

    /// Page grouping
    pub strategy: TranslateStrategy,
}

impl TranslateOptions {
    /// Create translate options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source language.
    pub fn with_source(mut self, lang: impl Into<String>) -> Self {
        self.source_lang = lang.into();
        self
    }

    /// Set the target language.
    pub fn with_target(mut self, lang: impl Into<String>) -> Self {
        self.target_lang = lang.into();
        self
    }

    /// Set the maximum characters per request.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    /// Set the page grouping strategy.
    pub fn with_strategy(mut self, strategy: TranslateStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Translate page by page.
    pub fn per_page(mut self) -> Self {
        self.strategy = TranslateStrategy::PerPage;
        self
    }
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            source_lang: "en".to_string(),
            target_lang: "ar".to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            strategy: TranslateStrategy::Chunked,
        }
    }
}

/// Split `text` into consecutive slices of at most `max_chars` characters.
///
/// Concatenating the slices gives back `text`.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in text.char_indices() {
        if count == max_chars {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

/// Translate `text` chunk by chunk and concatenate the results.
pub fn translate_chunked(
    translator: &dyn Translator,
    text: &str,
    options: &TranslateOptions,
) -> Result<String> {
    translate_pages(translator, &[text], options, |_, _| {})
}

/// Translate extracted pages according to `options.strategy`.
///
/// `progress` is called after each request with the number of finished
/// requests and the total. Whitespace-only chunks are not sent. Fails with
/// [`Error::EmptyTranslation`] when the combined result has no text.
pub fn translate_pages<S, F>(
    translator: &dyn Translator,
    pages: &[S],
    options: &TranslateOptions,
    mut progress: F,
) -> Result<String>
where
    S: AsRef<str>,
    F: FnMut(usize, usize),
{
    let pages: Vec<&str> = pages.iter().map(AsRef::<str>::as_ref).collect();
    // Each unit is translated as one piece of text and followed by `separator`
    let (units, separator): (Vec<String>, &str) = match options.strategy {
        TranslateStrategy::Chunked => (vec![pages.join("\n")], ""),
        TranslateStrategy::PerPage => (
            pages
                .iter()
                .filter(|p| !p.trim().is_empty())
                .map(|p| p.to_string())
                .collect(),
            "\n\n",
        ),
    };

    let plan: Vec<Vec<&str>> = units
        .iter()
        .map(|unit| {
            chunk_text(unit, options.chunk_size)
                .into_iter()
                .filter(|c| !c.trim().is_empty())
                .collect()
        })
        .collect();
    let total: usize = plan.iter().map(Vec::len).sum();
    log::info!(
        "Translating {} chunks ({} -> {}) with {}",
        total,
        options.source_lang,
        options.target_lang,
        translator.name()
    );

    let mut translated = String::new();
    let mut done = 0;
    for chunks in &plan {
        for chunk in chunks {
            let part = translator.translate(chunk, &options.source_lang, &options.target_lang)?;
            translated.push_str(&part);
            done += 1;
            progress(done, total);
        }
        translated.push_str(separator);
    }

    if translated.trim().is_empty() {
        return Err(Error::EmptyTranslation);
    }
    Ok(translated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every request and echoes it back in brackets.
    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl Translator for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn translate(&self, text: &str, _source: &str, _target: &str) -> Result<String> {
            self.calls.lock().unwrap().push(text.to_string());
            Ok(format!("[{}]", text))
        }
    }

    struct Failing;

    impl Translator for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn translate(&self, _text: &str, _source: &str, _target: &str) -> Result<String> {
            Err(Error::TranslationService("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_chunk_text_boundaries() {
        assert_eq!(chunk_text("abcdefg", 3), vec!["abc", "def", "g"]);
        assert_eq!(chunk_text("abc", 3), vec!["abc"]);
        assert!(chunk_text("", 3).is_empty());
    }

    #[test]
    fn test_chunk_text_multibyte() {
        let text = "مرحبا بالعالم";
        let chunks = chunk_text(text, 4);
        assert!(chunks.iter().all(|c| c.chars().count() <= 4));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_chunk_text_default_size() {
        let text = "a".repeat(10_000);
        let chunks = chunk_text(&text, DEFAULT_CHUNK_SIZE);
        let sizes: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![4900, 4900, 200]);
    }

    #[test]
    fn test_chunked_in_order() {
        let recorder = Recorder::default();
        let options = TranslateOptions::new().with_chunk_size(2);
        let out = translate_chunked(&recorder, "abcde", &options).unwrap();
        assert_eq!(out, "[ab][cd][e]");
        assert_eq!(*recorder.calls.lock().unwrap(), vec!["ab", "cd", "e"]);
    }

    #[test]
    fn test_whitespace_chunks_skipped() {
        let recorder = Recorder::default();
        let options = TranslateOptions::new().with_chunk_size(3);
        // chunks: "ab ", "   ", "cd"
        let out = translate_chunked(&recorder, "ab    cd", &options).unwrap();
        assert_eq!(out, "[ab ][cd]");
        assert_eq!(recorder.calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_pages_joined_for_chunked() {
        let recorder = Recorder::default();
        let pages = ["one", "two"];
        let out = translate_pages(&recorder, &pages, &TranslateOptions::new(), |_, _| {}).unwrap();
        assert_eq!(out, "[one\ntwo]");
    }

    #[test]
    fn test_per_page() {
        let recorder = Recorder::default();
        let pages = ["one", "  ", "two"];
        let mut reports = Vec::new();
        let options = TranslateOptions::new().per_page();
        let out = translate_pages(&recorder, &pages, &options, |done, total| {
            reports.push((done, total))
        })
        .unwrap();
        assert_eq!(out, "[one]\n\n[two]\n\n");
        assert_eq!(reports, vec![(1, 2), (2, 2)]);
    }

    #[test]
    fn test_empty_translation() {
        let recorder = Recorder::default();
        let result = translate_chunked(&recorder, "   \n ", &TranslateOptions::new());
        assert!(matches!(result, Err(Error::EmptyTranslation)));
        assert!(recorder.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_service_error_propagates() {
        let result = translate_chunked(&Failing, "hello", &TranslateOptions::new());
        assert!(matches!(result, Err(Error::TranslationService(_))));
    }

    #[test]
    fn test_options_builder() {
        let options = TranslateOptions::new()
            .with_source("fr")
            .with_target("fa")
            .with_chunk_size(0)
            .with_strategy(TranslateStrategy::PerPage);
        assert_eq!(options.source_lang, "fr");
        assert_eq!(options.target_lang, "fa");
        assert_eq!(options.chunk_size, 1);
        assert_eq!(options.strategy, TranslateStrategy::PerPage);
    }
}
