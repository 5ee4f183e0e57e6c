//! Error types for rtlpdf library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rtlpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting, translating or rendering.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text content from a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// The source document has no readable text layer (e.g. scanned pages).
    #[error("The PDF contains no readable text (it may consist of scanned images)")]
    EmptyExtractedText,

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// The translation service failed (network, quota, malformed reply).
    #[error("Translation service error: {0}")]
    TranslationService(String),

    /// The translation service returned nothing usable.
    #[error("Translation failed: the translated text is empty")]
    EmptyTranslation,

    /// A font file could not be found.
    #[error("Font file not found: {}", .0.display())]
    FontNotFound(PathBuf),

    /// A font file could not be parsed.
    #[error("Font parsing error: {0}")]
    FontParse(String),

    /// Layout configuration cannot produce a document.
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// Error while serializing the output PDF.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl Error {
    /// Whether a caller recovers from this error locally instead of failing
    /// the whole request.
    pub fn is_font_registration(&self) -> bool {
        matches!(self, Error::FontNotFound(_) | Error::FontParse(_))
    }
}
