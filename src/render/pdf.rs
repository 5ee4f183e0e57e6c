//! PDF serialization of laid-out documents using lopdf.

use std::collections::BTreeMap;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, ObjectId, Stream, StringFormat};

use crate::error::{Error, Result};
use crate::font::{BuiltinFont, FontRegistry, RegisteredFont, TrueTypeFont};
use crate::model::{format_pdf_date, Document, Metadata, Page};

/// Resource name every page uses for its font.
const FONT_RESOURCE: &str = "F1";

/// PDF version written into the header.
const PDF_VERSION: &str = "1.7";

/// ToUnicode `bfchar` blocks may hold at most 100 entries.
const BFCHAR_BLOCK: usize = 100;

/// Serialize a laid-out document.
///
/// Every page gets its own content stream that selects the font again, so
/// pages stay self-contained. Unknown font names are written with the
/// fallback font, matching how lines were measured.
pub fn write_document(
    document: &Document,
    fonts: &FontRegistry,
    font_name: &str,
    font_size: f32,
) -> Result<Vec<u8>> {
    let mut encoder = TextEncoder::new(fonts.resolve(font_name));
    let contents = document
        .pages
        .iter()
        .map(|page| page_content(page, &mut encoder, font_size))
        .collect::<Result<Vec<_>>>()?;

    let mut doc = lopdf::Document::with_version(PDF_VERSION);
    let pages_id = doc.new_object_id();

    let font_id = encoder.write_font(&mut doc, font_name);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { FONT_RESOURCE => font_id },
    });

    let mut kids = Vec::with_capacity(document.pages.len());
    for (page, content) in document.pages.iter().zip(contents) {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page.width.into(), page.height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
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
    let info_id = doc.add_object(info_dictionary(&document.metadata));
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    doc.compress();

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| Error::Render(format!("Failed to write PDF: {}", e)))?;

    log::debug!(
        "Wrote {} pages ({} bytes)",
        document.page_count(),
        output.len()
    );
    Ok(output)
}

/// Build the content stream of one page.
fn page_content(page: &Page, encoder: &mut TextEncoder<'_>, font_size: f32) -> Result<Vec<u8>> {
    let mut operations = Vec::with_capacity(page.lines.len() * 5);
    for line in &page.lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![Object::Name(FONT_RESOURCE.into()), font_size.into()],
        ));
        operations.push(Operation::new("Td", vec![line.x.into(), line.y.into()]));
        operations.push(Operation::new("Tj", vec![encoder.encode(&line.text)]));
        operations.push(Operation::new("ET", vec![]));
    }

    Content { operations }
        .encode()
        .map_err(|e| Error::Render(format!("Failed to encode page {}: {}", page.number, e)))
}

/// Turns shaped text into string operands and remembers used glyphs.
enum TextEncoder<'a> {
    Builtin(BuiltinFont),
    TrueType {
        font: &'a TrueTypeFont,
        /// glyph id -> (advance, first char drawn with it)
        used: BTreeMap<u16, (u16, char)>,
    },
}

impl<'a> TextEncoder<'a> {
    fn new(font: &'a RegisteredFont) -> Self {
        match font {
            RegisteredFont::Builtin(font) => TextEncoder::Builtin(*font),
            RegisteredFont::TrueType(font) => TextEncoder::TrueType {
                font,
                used: BTreeMap::new(),
            },
        }
    }

    fn encode(&mut self, text: &str) -> Object {
        match self {
            TextEncoder::Builtin(font) => Object::String(font.encode(text), StringFormat::Literal),
            TextEncoder::TrueType { font, used } => {
                let glyphs = font.glyphs(text);
                let mut bytes = Vec::with_capacity(glyphs.len() * 2);
                for (glyph, c) in glyphs.iter().zip(text.chars()) {
                    bytes.extend_from_slice(&glyph.id.to_be_bytes());
                    used.entry(glyph.id).or_insert((glyph.advance, c));
                }
                Object::String(bytes, StringFormat::Hexadecimal)
            }
        }
    }

    /// Add the font objects and return the id of the font dictionary.
    fn write_font(&self, doc: &mut lopdf::Document, font_name: &str) -> ObjectId {
        match self {
            TextEncoder::Builtin(font) => doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            }),
            TextEncoder::TrueType { font, used } => write_type0_font(doc, font, used, font_name),
        }
    }
}

/// Embed a TrueType font as a Type0 / CIDFontType2 font with Identity-H.
fn write_type0_font(
    doc: &mut lopdf::Document,
    font: &TrueTypeFont,
    used: &BTreeMap<u16, (u16, char)>,
    font_name: &str,
) -> ObjectId {
    let base_font = sanitize_font_name(font_name);
    let data = font.data().to_vec();
    let length = data.len() as i64;
    let font_file_id = doc.add_object(Stream::new(dictionary! { "Length1" => length }, data));

    let [x_min, y_min, x_max, y_max] = font.bbox();
    let scale = |v: i16| -> Object { font.to_glyph_space(i32::from(v)).round().into() };
    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => Object::Name(base_font.clone().into_bytes()),
        "Flags" => 4,
        "FontBBox" => vec![scale(x_min), scale(y_min), scale(x_max), scale(y_max)],
        "ItalicAngle" => 0,
        "Ascent" => scale(font.ascender()),
        "Descent" => scale(font.descender()),
        "CapHeight" => scale(font.cap_height()),
        "StemV" => 80,
        "FontFile2" => font_file_id,
    });

    let mut widths = Vec::with_capacity(used.len() * 2);
    for (gid, (advance, _)) in used {
        widths.push(Object::Integer(i64::from(*gid)));
        widths.push(Object::Array(vec![font
            .to_glyph_space(i32::from(*advance))
            .round()
            .into()]));
    }

    let cid_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => Object::Name(base_font.clone().into_bytes()),
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Identity"),
            "Supplement" => 0,
        },
        "FontDescriptor" => descriptor_id,
        "DW" => 1000,
        "W" => widths,
        "CIDToGIDMap" => "Identity",
    });

    let cmap = to_unicode_cmap(used);
    let to_unicode_id = doc.add_object(Stream::new(Dictionary::new(), cmap.into_bytes()));

    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => Object::Name(base_font.into_bytes()),
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![Object::Reference(cid_font_id)],
        "ToUnicode" => to_unicode_id,
    })
}

/// ToUnicode CMap so drawn glyphs can be copied back out as text.
fn to_unicode_cmap(used: &BTreeMap<u16, (u16, char)>) -> String {
    let entries: Vec<(u16, char)> = used
        .iter()
        .filter(|(gid, _)| **gid != 0)
        .map(|(gid, (_, c))| (*gid, *c))
        .collect();

    let mut out = String::new();
    out.push_str("/CIDInit /ProcSet findresource begin\n");
    out.push_str("12 dict begin\n");
    out.push_str("begincmap\n");
    out.push_str("/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
    out.push_str("/CMapName /Adobe-Identity-UCS def\n");
    out.push_str("/CMapType 2 def\n");
    out.push_str("1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n");

    for block in entries.chunks(BFCHAR_BLOCK) {
        out.push_str(&format!("{} beginbfchar\n", block.len()));
        for (gid, c) in block {
            let mut units = [0u16; 2];
            let hex: String = c
                .encode_utf16(&mut units)
                .iter()
                .map(|u| format!("{:04X}", u))
                .collect();
            out.push_str(&format!("<{:04X}> <{}>\n", gid, hex));
        }
        out.push_str("endbfchar\n");
    }

    out.push_str("endcmap\n");
    out.push_str("CMapName currentdict /CMap defineresource pop\n");
    out.push_str("end\nend\n");
    out
}

/// Document information dictionary.
fn info_dictionary(metadata: &Metadata) -> Dictionary {
    let mut info = dictionary! {
        "Producer" => text_string(&metadata.producer),
    };
    if let Some(title) = &metadata.title {
        info.set("Title", text_string(title));
    }
    if let Some(subject) = &metadata.subject {
        info.set("Subject", text_string(subject));
    }
    if let Some(creator) = &metadata.creator {
        info.set("Creator", text_string(creator));
    }
    if let Some(created) = &metadata.created {
        info.set("CreationDate", Object::string_literal(format_pdf_date(created)));
    }
    info
}

/// PDF text string: literal for ASCII, UTF-16BE with BOM otherwise.
fn text_string(s: &str) -> Object {
    if s.is_ascii() {
        return Object::string_literal(s);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in s.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Reduce a registration name to characters valid in a PDF name.
fn sanitize_font_name(name: &str) -> String {
    let cleaned: String = name.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if cleaned.is_empty() {
        "EmbeddedFont".to_string()
    } else {
        cleaned
    }
}
