//! Integration tests for layout and PDF output.

use std::sync::Arc;

use lopdf::content::Content;
use rtlpdf::{
    render_arabic_pdf, ArabicDocumentRenderer, FontRegistry, LayoutOptions, Metadata,
    TextShaper, FALLBACK_FONT,
};

fn renderer() -> ArabicDocumentRenderer {
    ArabicDocumentRenderer::new(Arc::new(FontRegistry::new()))
}

/// Count text-show operators on every page of a rendered PDF.
fn tj_per_page(bytes: &[u8]) -> Vec<usize> {
    let mut doc = lopdf::Document::load_mem(bytes).unwrap();
    doc.decompress();
    doc.get_pages()
        .values()
        .map(|&id| {
            let content = doc.get_page_content(id).unwrap();
            Content::decode(&content)
                .unwrap()
                .operations
                .iter()
                .filter(|op| op.operator == "Tj")
                .count()
        })
        .collect()
}

#[test]
fn test_single_arabic_line() {
    let doc = renderer().layout("مرحبا").unwrap();
    assert_eq!(doc.page_count(), 1);

    let page = &doc.pages[0];
    assert_eq!(page.line_count(), 1);
    assert_eq!(page.lines[0].y, 792.0);
}

#[test]
fn test_blank_input_gives_one_empty_page() {
    let bytes = renderer().render("\n  \n\t\n").unwrap();
    assert_eq!(tj_per_page(&bytes), vec![0]);
}

#[test]
fn test_page_break_at_39th_line() {
    let text = (1..=39)
        .map(|i| format!("سطر {}", i))
        .collect::<Vec<_>>()
        .join("\n");
    let doc = renderer().layout(&text).unwrap();

    assert_eq!(doc.page_count(), 2);
    assert_eq!(doc.pages[0].line_count(), 38);
    assert_eq!(doc.pages[0].lines[37].y, 52.0);
    assert_eq!(doc.pages[1].line_count(), 1);
    assert_eq!(doc.pages[1].lines[0].y, 792.0);

    let bytes = renderer().render(&text).unwrap();
    assert_eq!(tj_per_page(&bytes), vec![38, 1]);
}

#[test]
fn test_cursor_strictly_decreasing() {
    let text = vec!["line"; 120].join("\n");
    let doc = renderer().layout(&text).unwrap();
    for page in &doc.pages {
        for pair in page.lines.windows(2) {
            assert_eq!(pair[0].y - pair[1].y, 20.0);
        }
        assert!(page.lines.iter().all(|l| l.y >= 50.0));
    }
}

#[test]
fn test_right_alignment() {
    let fonts = FontRegistry::new();
    let text = "قصير\nسطر أطول قليلا من الأول\nMixed سطر 42";
    let doc = renderer().layout(text).unwrap();
    let shaper = TextShaper::new();

    for (line, logical) in doc.pages[0].lines.iter().zip(text.lines()) {
        let width = fonts.measure_width(&shaper.shape(logical), FALLBACK_FONT, 12.0);
        assert_eq!(line.width, width);
        assert_eq!(line.x, 595.0 - 50.0 - width);
    }
}

#[test]
fn test_idempotent() {
    let text = "الفقرة الأولى\n\nالفقرة الثانية (2024)";
    let r = renderer();
    assert_eq!(r.layout(text).unwrap(), r.layout(text).unwrap());
    assert_eq!(r.render(text).unwrap(), r.render(text).unwrap());
}

#[test]
fn test_custom_geometry() {
    let options = LayoutOptions::new()
        .with_page_size(300.0, 200.0)
        .with_margins(20.0)
        .with_line_height(30.0);
    let text = vec!["x"; 10].join("\n");
    let doc = renderer().with_options(options).layout(&text).unwrap();

    // 180, 150, 120, 90, 60, 30 fit; the cursor then drops to 0 < 20
    assert_eq!(doc.pages[0].line_count(), 6);
    assert_eq!(doc.pages[1].lines[0].y, 180.0);
    assert_eq!(doc.pages[0].width, 300.0);
}

#[test]
fn test_render_arabic_pdf_unknown_font() {
    let fonts = Arc::new(FontRegistry::new());
    let bytes = render_arabic_pdf(fonts, "مرحبا\nعالم", "ArabicFont", 12.0).unwrap();
    assert_eq!(tj_per_page(&bytes), vec![2]);
}

#[test]
fn test_metadata_written() {
    let bytes = renderer()
        .with_metadata(Metadata::titled("Report"))
        .render("text")
        .unwrap();
    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let info = doc.get_dictionary(info_id).unwrap();
    assert_eq!(info.get(b"Title").unwrap().as_str().unwrap(), b"Report");
    assert!(info.get(b"Producer").is_ok());
}

#[test]
fn test_embedded_font_when_available() {
    let path = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";
    if !std::path::Path::new(path).exists() {
        return;
    }
    let mut fonts = FontRegistry::new();
    fonts.register_file("DejaVu", path).unwrap();
    let fonts = Arc::new(fonts);

    let bytes = render_arabic_pdf(Arc::clone(&fonts), "مرحبا بالعالم", "DejaVu", 12.0).unwrap();
    assert_eq!(tj_per_page(&bytes), vec![1]);

    // Embedded metrics differ from the fallback
    let embedded = fonts.measure_width("\u{FE8D}\u{FE91}", "DejaVu", 12.0);
    let builtin = fonts.measure_width("\u{FE8D}\u{FE91}", FALLBACK_FONT, 12.0);
    assert_ne!(embedded, builtin);
}
