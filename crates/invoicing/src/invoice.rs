//! Records owned by the invoicing API.
//!
//! These mirror the response shapes of the REST endpoints and are never
//! mutated here. Monetary fields accept JSON numbers or decimal strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Invoice status as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
    #[serde(other)]
    Unknown,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Unknown => "unknown",
        }
    }
}

impl core::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `GET /dashboard`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_invoices: u64,
    #[serde(default)]
    pub total_revenue: Decimal,
    #[serde(default)]
    pub pending_amount: Decimal,
}

/// One row of `GET /invoices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    pub id: i64,
    pub invoice_number: String,
    pub client_name: String,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Sum of pre-tax item totals, computed by the list query.
    #[serde(default)]
    pub items_total: Option<Decimal>,
    #[serde(default)]
    pub grand_total: Option<Decimal>,
    #[serde(default)]
    pub status: InvoiceStatus,
}

impl InvoiceSummary {
    /// Amount to show for this invoice.
    ///
    /// `grand_total` is authoritative; `items_total` only fills in when the
    /// list response omits it.
    pub fn amount(&self) -> Decimal {
        self.grand_total
            .or(self.items_total)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn created_on(&self) -> Option<NaiveDate> {
        self.created_at.as_deref().and_then(parse_api_date)
    }
}

/// A persisted invoice line as returned inside `GET /invoices/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedLine {
    #[serde(alias = "item_name")]
    pub name: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub gst_percentage: Decimal,
    pub item_total: Decimal,
    #[serde(default)]
    pub gst_amount: Option<Decimal>,
}

/// `GET /invoices/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDetail {
    #[serde(default)]
    pub id: Option<i64>,
    pub invoice_number: String,
    pub client_name: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
    #[serde(default)]
    pub total_gst: Option<Decimal>,
    pub grand_total: Decimal,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default)]
    pub items: Vec<PersistedLine>,
}

/// `POST /invoices` success body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedInvoice {
    #[serde(default)]
    pub id: Option<i64>,
    pub invoice_number: String,
    #[serde(default)]
    pub client_id: Option<i64>,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
    #[serde(default)]
    pub total_gst: Option<Decimal>,
    #[serde(default)]
    pub grand_total: Option<Decimal>,
}

/// One row of `GET /clients`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// One row of `GET /items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    pub gst_percentage: Decimal,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Calendar date of an API timestamp.
///
/// Accepts RFC 3339, RFC 2822 (`Fri, 19 Dec 2025 10:00:00 GMT`), SQL
/// `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD`.
pub fn parse_api_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
                .map(|dt| dt.date())
                .ok()
        })
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

/// `dd/mm/yyyy`, or the raw text when it is not a recognised timestamp.
pub fn display_date(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => parse_api_date(raw)
            .map(|date| date.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| raw.to_string()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn list_row_accepts_strings_and_numbers() {
        let row: InvoiceSummary = serde_json::from_value(serde_json::json!({
            "id": 7,
            "invoice_number": "INV-0007",
            "client_name": "Acme",
            "created_at": "Fri, 19 Dec 2025 10:30:00 GMT",
            "items_total": "200.00",
            "grand_total": 236.0,
            "status": "pending",
            "client_id": 3
        }))
        .unwrap();

        assert_eq!(row.items_total, Some(dec!(200)));
        assert_eq!(row.amount(), dec!(236));
        assert_eq!(row.status, InvoiceStatus::Pending);
        assert_eq!(row.created_on(), NaiveDate::from_ymd_opt(2025, 12, 19));
    }

    #[test]
    fn amount_falls_back_to_items_total() {
        let row: InvoiceSummary = serde_json::from_value(serde_json::json!({
            "id": 1,
            "invoice_number": "INV-0001",
            "client_name": "Acme",
            "items_total": 120.5,
            "status": "paid"
        }))
        .unwrap();
        assert_eq!(row.amount(), dec!(120.5));
        assert_eq!(row.status, InvoiceStatus::Paid);
        assert_eq!(row.created_on(), None);
    }

    #[test]
    fn unknown_status_does_not_fail_decoding() {
        let row: InvoiceSummary = serde_json::from_value(serde_json::json!({
            "id": 1,
            "invoice_number": "INV-0001",
            "client_name": "Acme",
            "grand_total": null,
            "status": "overdue"
        }))
        .unwrap();
        assert_eq!(row.status, InvoiceStatus::Unknown);
        assert_eq!(row.amount(), Decimal::ZERO);
    }

    #[test]
    fn detail_lines_accept_item_name() {
        let detail: InvoiceDetail = serde_json::from_value(serde_json::json!({
            "id": 7,
            "invoice_number": "INV-0007",
            "client_name": "Acme",
            "grand_total": "236.00",
            "items": [{
                "item_name": "Widget",
                "quantity": "2.00",
                "unit_price": "100.00",
                "gst_percentage": "18.00",
                "item_total": "200.00"
            }]
        }))
        .unwrap();

        assert_eq!(detail.grand_total, dec!(236));
        assert_eq!(detail.items.len(), 1);
        assert_eq!(detail.items[0].name, "Widget");
        assert_eq!(detail.items[0].gst_amount, None);
    }

    #[test]
    fn dates_render_as_day_month_year() {
        assert_eq!(display_date(Some("2025-12-19T10:30:00Z")), "19/12/2025");
        assert_eq!(display_date(Some("2025-12-19 10:30:00")), "19/12/2025");
        assert_eq!(display_date(Some("2025-12-19")), "19/12/2025");
        assert_eq!(display_date(Some("yesterday")), "yesterday");
        assert_eq!(display_date(None), "");
    }
}
