//! Per-page text extraction using lopdf.

use std::io::Read;
use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::detect::{detect_format_from_bytes, detect_format_from_path};
use crate::error::{Error, Result};

use super::options::{ErrorMode, ParseOptions};

/// Extracts the text layer of a PDF, one string per page.
pub struct PdfTextExtractor {
    doc: LopdfDocument,
    options: ParseOptions,
}

impl PdfTextExtractor {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let format = detect_format_from_path(path)?;
        log::debug!("Opening {} ({})", path.display(), format);

        let doc = LopdfDocument::load(path).map_err(Error::from)?;
        Self::checked(doc, options)
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Load a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        detect_format_from_bytes(data)?;
        let doc = LopdfDocument::load_mem(data).map_err(Error::from)?;
        Self::checked(doc, options)
    }

    /// Open documents protected only by an owner password; anything that
    /// needs a user password is rejected.
    fn checked(mut doc: LopdfDocument, options: ParseOptions) -> Result<Self> {
        if doc.is_encrypted() {
            doc.decrypt("").map_err(|e| {
                log::debug!("Empty user password rejected: {}", e);
                Error::Encrypted
            })?;
            log::debug!("Decrypted with the empty user password");
        }
        Ok(Self { doc, options })
    }

    /// Load a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Load a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// PDF version from the header.
    pub fn version(&self) -> &str {
        &self.doc.version
    }

    /// Extract the text of every selected page, in page order.
    ///
    /// Fails with [`Error::EmptyExtractedText`] when no selected page has
    /// any non-whitespace text, as is the case for scanned documents.
    pub fn extract_pages(&self) -> Result<Vec<String>> {
        let pages = self.doc.get_pages();
        let total = pages.len() as u32;
        self.check_selection(total)?;

        let mut texts = Vec::new();
        for &page_num in pages.keys() {
            if !self.options.pages.includes(page_num) {
                continue;
            }
            match self.extract_page_text(page_num) {
                Ok(text) => texts.push(text),
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("Failed to extract text from page {}: {}", page_num, e);
                    texts.push(String::new());
                }
            }
        }

        if texts.iter().all(|t| t.trim().is_empty()) {
            return Err(Error::EmptyExtractedText);
        }
        log::info!("Extracted text from {} of {} pages", texts.len(), total);
        Ok(texts)
    }

    /// Extract the text of every selected page joined with newlines.
    pub fn extract_text(&self) -> Result<String> {
        Ok(self.extract_pages()?.join("\n"))
    }

    fn extract_page_text(&self, page_num: u32) -> Result<String> {
        self.doc
            .extract_text(&[page_num])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_num, e)))
    }

    /// Explicitly listed pages must exist.
    fn check_selection(&self, total: u32) -> Result<()> {
        if let Some(missing) = self.options.pages.first_beyond(total) {
            if self.options.error_mode == ErrorMode::Strict {
                return Err(Error::PageOutOfRange(missing, total));
            }
            log::warn!("Page {} requested but document has {} pages", missing, total);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::PageSelection;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Dictionary, Object, Stream, StringFormat};

    /// Build a PDF with one Helvetica page per entry; `None` pages have no text.
    fn fixture(pages: &[Option<&str>]) -> Vec<u8> {
        let mut doc = LopdfDocument::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = Vec::new();
        for text in pages {
            let operations = match text {
                Some(text) => vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
                None => vec![],
            };
            let content = Content { operations }.encode().unwrap();
            let content_id = doc.add_object(Stream::new(Dictionary::new(), content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    #[test]
    fn test_extract_pages_in_order() {
        let data = fixture(&[Some("First page"), Some("Second page")]);
        let extractor = PdfTextExtractor::from_bytes(&data).unwrap();
        assert_eq!(extractor.page_count(), 2);

        let pages = extractor.extract_pages().unwrap();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].contains("First page"));
        assert!(pages[1].contains("Second page"));
    }

    #[test]
    fn test_page_selection() {
        let data = fixture(&[Some("One"), Some("Two"), Some("Three")]);
        let options = ParseOptions::new().with_pages(PageSelection::Pages(vec![2]));
        let extractor = PdfTextExtractor::from_bytes_with_options(&data, options).unwrap();

        let pages = extractor.extract_pages().unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains("Two"));
    }

    #[test]
    fn test_page_out_of_range() {
        let data = fixture(&[Some("One")]);
        let options = ParseOptions::new().with_pages(PageSelection::Pages(vec![1, 5]));
        let extractor = PdfTextExtractor::from_bytes_with_options(&data, options).unwrap();
        assert!(matches!(
            extractor.extract_pages(),
            Err(Error::PageOutOfRange(5, 1))
        ));

        let options = ParseOptions::new()
            .lenient()
            .with_pages(PageSelection::Pages(vec![1, 5]));
        let extractor = PdfTextExtractor::from_bytes_with_options(&data, options).unwrap();
        assert_eq!(extractor.extract_pages().unwrap().len(), 1);
    }

    #[test]
    fn test_user_password_required() {
        let mut doc = LopdfDocument::load_mem(&fixture(&[Some("Secret")])).unwrap();
        let encrypt_id = doc.add_object(dictionary! {
            "Filter" => "Standard",
            "V" => 1,
            "R" => 2,
            "Length" => 40,
            "P" => -4,
            "O" => Object::String(vec![0x11; 32], StringFormat::Literal),
            "U" => Object::String(vec![0x22; 32], StringFormat::Literal),
        });
        doc.trailer.set("Encrypt", encrypt_id);
        doc.trailer.set(
            "ID",
            vec![
                Object::String(vec![0x33; 16], StringFormat::Hexadecimal),
                Object::String(vec![0x33; 16], StringFormat::Hexadecimal),
            ],
        );
        assert!(doc.is_encrypted());

        let result = PdfTextExtractor::checked(doc, ParseOptions::default());
        assert!(matches!(result, Err(Error::Encrypted)));
    }

    #[test]
    fn test_huge_parsed_range() {
        let data = fixture(&[Some("One"), Some("Two")]);
        let pages = PageSelection::parse("2,1-4294967295").unwrap();

        let options = ParseOptions::new().with_pages(pages.clone());
        let extractor = PdfTextExtractor::from_bytes_with_options(&data, options).unwrap();
        assert!(matches!(
            extractor.extract_pages(),
            Err(Error::PageOutOfRange(3, 2))
        ));

        let options = ParseOptions::new().lenient().with_pages(pages);
        let extractor = PdfTextExtractor::from_bytes_with_options(&data, options).unwrap();
        assert_eq!(extractor.extract_pages().unwrap().len(), 2);
    }

    #[test]
    fn test_blank_document_is_empty_text() {
        let data = fixture(&[None, None]);
        let extractor = PdfTextExtractor::from_bytes(&data).unwrap();
        assert!(matches!(
            extractor.extract_text(),
            Err(Error::EmptyExtractedText)
        ));
    }

    #[test]
    fn test_rejects_non_pdf() {
        let result = PdfTextExtractor::from_bytes(b"<html>not a pdf</html>");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_open_file() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(&fixture(&[Some("From disk")])).unwrap();

        let extractor = PdfTextExtractor::open(file.path()).unwrap();
        assert_eq!(extractor.version(), "1.5");
        assert!(extractor.extract_text().unwrap().contains("From disk"));
    }
}
