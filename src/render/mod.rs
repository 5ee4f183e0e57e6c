//! Right-to-left rendering: layout and PDF output.

mod cursor;
mod layout;
mod options;
pub mod pdf;

pub use cursor::{LinePlacement, PageCursor};
pub use layout::{render_arabic_pdf, ArabicDocumentRenderer};
pub use options::{LayoutOptions, A4_HEIGHT, A4_WIDTH};
