//! Downloadable representations of a generated recipe.
//!
//! - [`document`] turns recipe text into a structured [`RecipeDocument`]
//! - [`docx`] renders that document as a Word (.docx) file
//! - [`text`] covers plain-text downloads
//! - [`share`] builds the social sharing link

pub mod document;
pub mod docx;
pub mod share;
pub mod text;

pub use document::{build_document, Block, RecipeDocument, ATTRIBUTION};
pub use docx::{export_docx, render_docx, DOCX_FILENAME, DOCX_MIME};
pub use share::{share_text, share_url, SHARE_LIMIT};
pub use text::{saved_filename, TXT_FILENAME, TXT_MIME};
