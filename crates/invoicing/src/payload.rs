//! Create-invoice request body (`POST /invoices`).
//!
//! Amounts travel as JSON numbers, the shape the invoicing API accepts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    pub client_name: String,
    pub items: Vec<CreateInvoiceItem>,
}

/// One valid draft line, priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInvoiceItem {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub gst_percentage: Decimal,
    /// Pre-tax line amount (`quantity × unit_price`).
    #[serde(with = "rust_decimal::serde::float")]
    pub item_total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub gst_amount: Decimal,
}

impl CreateInvoiceRequest {
    /// Sum of every item's subtotal and tax, saturating like the draft totals.
    pub fn grand_total(&self) -> Decimal {
        self.items.iter().fold(Decimal::ZERO, |total, item| {
            total
                .saturating_add(item.item_total)
                .saturating_add(item.gst_amount)
        })
    }
}
