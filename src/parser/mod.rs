//! PDF text extraction module.

mod extractor;
mod options;

pub use extractor::PdfTextExtractor;
pub use options::{ErrorMode, PageSelection, ParseOptions};
