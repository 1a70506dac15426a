//! Invoicing domain module.
//!
//! This crate holds the invoice draft under composition and the read-only
//! records the remote API returns. Pure domain logic: no IO, no HTTP.

pub mod draft;
pub mod invoice;
pub mod payload;

pub use draft::{DEFAULT_TAX_RATE, InvoiceDraft, LineField, LineItem, UnknownLineField};
pub use invoice::{
    CatalogItem, Client, CreatedInvoice, DashboardStats, InvoiceDetail, InvoiceStatus,
    InvoiceSummary, PersistedLine, display_date, parse_api_date,
};
pub use payload::{CreateInvoiceItem, CreateInvoiceRequest};
