//! `reqwest`-backed gateway.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;

use invoicehub_invoicing::{
    CatalogItem, Client, CreateInvoiceRequest, CreatedInvoice, DashboardStats, InvoiceDetail,
    InvoiceSummary,
};

use crate::InvoiceGateway;
use crate::config::GatewayConfig;
use crate::error::GatewayError;

const JSON: &str = "application/json";

/// HTTP client for the invoicing API.
///
/// Every request carries the configured timeout; a timeout surfaces as
/// [`GatewayError::Timeout`].
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let base_url = config.normalized_base_url()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        tracing::debug!(path, "GET");
        let resp = self
            .client
            .get(self.url(path))
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .send()
            .await?;
        Self::decode(path, resp).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        tracing::debug!(path, "POST");
        let resp = self
            .client
            .post(self.url(path))
            .header(ACCEPT, JSON)
            .json(body)
            .send()
            .await?;
        Self::decode(path, resp).await
    }

    async fn decode<T: DeserializeOwned>(
        path: &str,
        resp: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(path, status = status.as_u16(), "API request failed");
            return Err(GatewayError::Api(status.as_u16(), error_message(&body)));
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

/// Pull `{"error": "..."}` out of an error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl InvoiceGateway for HttpGateway {
    async fn dashboard(&self) -> Result<DashboardStats, GatewayError> {
        self.get("/dashboard").await
    }

    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, GatewayError> {
        self.get("/invoices").await
    }

    async fn invoice(&self, id: i64) -> Result<InvoiceDetail, GatewayError> {
        self.get(&format!("/invoices/{id}")).await
    }

    async fn create_invoice(
        &self,
        request: &CreateInvoiceRequest,
    ) -> Result<CreatedInvoice, GatewayError> {
        let created: CreatedInvoice = self.post("/invoices", request).await?;
        tracing::info!(invoice_number = %created.invoice_number, "invoice created");
        Ok(created)
    }

    async fn clients(&self) -> Result<Vec<Client>, GatewayError> {
        self.get("/clients").await
    }

    async fn items(&self) -> Result<Vec<CatalogItem>, GatewayError> {
        self.get("/items").await
    }
}
