//! Document model for laid-out right-to-left output.
//!
//! The model sits between layout and serialization: the renderer fills a
//! [`Document`] with [`Page`]s of [`PlacedLine`]s, and the PDF writer turns
//! the sealed document into bytes. Keeping the geometry in plain data makes
//! the layout inspectable without parsing the produced PDF.

mod document;
mod page;

pub(crate) use document::format_pdf_date;
pub use document::{Document, Metadata};
pub use page::{Page, PlacedLine};
