//! `invoicehub-gateway`
//!
//! **Responsibility:** talk to the invoicing REST API.
//!
//! The API is the authority for invoices, clients, catalog items and
//! dashboard aggregates. This crate only fetches them and submits new
//! invoices; it never retries on its own.

pub mod config;
pub mod error;
pub mod http;

use async_trait::async_trait;

use invoicehub_invoicing::{
    CatalogItem, Client, CreateInvoiceRequest, CreatedInvoice, DashboardStats, InvoiceDetail,
    InvoiceSummary,
};

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::HttpGateway;

/// Remote operations the client needs from the invoicing API.
#[async_trait]
pub trait InvoiceGateway: Send + Sync {
    /// `GET /dashboard`
    async fn dashboard(&self) -> Result<DashboardStats, GatewayError>;

    /// `GET /invoices` (most recent first).
    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, GatewayError>;

    /// `GET /invoices/{id}`
    async fn invoice(&self, id: i64) -> Result<InvoiceDetail, GatewayError>;

    /// `POST /invoices`
    async fn create_invoice(
        &self,
        request: &CreateInvoiceRequest,
    ) -> Result<CreatedInvoice, GatewayError>;

    /// `GET /clients`
    async fn clients(&self) -> Result<Vec<Client>, GatewayError>;

    /// `GET /items`
    async fn items(&self) -> Result<Vec<CatalogItem>, GatewayError>;
}
