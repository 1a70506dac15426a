//! `invoicehub-export`: printable invoice documents.
//!
//! [`ExportDocument`] is the formatted, layout-free view of a draft;
//! [`render_pdf`] lays it out on A4 pages.

pub mod document;
pub mod pdf;

pub use document::{ExportDocument, ExportLine};
pub use pdf::{ExportError, render_pdf};
