use chrono::NaiveDate;

use invoicehub_core::{format_inr_fixed, format_rate};
use invoicehub_invoicing::InvoiceDraft;

/// File name offered when the document is saved.
pub const DEFAULT_FILE_NAME: &str = "invoice.pdf";

/// One table row; every field is display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLine {
    pub name: String,
    pub quantity: String,
    pub unit_price: String,
    pub subtotal: String,
    pub tax_rate: String,
    pub tax_amount: String,
}

/// Everything the renderer prints, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub client_name: String,
    pub issued_on: NaiveDate,
    pub lines: Vec<ExportLine>,
    pub subtotal: String,
    pub total_tax: String,
    pub grand_total: String,
}

impl ExportDocument {
    /// Snapshot of the draft's valid lines and totals.
    ///
    /// No validation: an incomplete draft still exports (possibly with an
    /// empty table).
    pub fn from_draft(draft: &InvoiceDraft, issued_on: NaiveDate) -> Self {
        let lines = draft
            .valid_lines()
            .map(|line| {
                let totals = line.totals();
                ExportLine {
                    name: line.name().trim().to_string(),
                    quantity: line.quantity().normalize().to_string(),
                    unit_price: format_inr_fixed(line.unit_price()),
                    subtotal: format_inr_fixed(totals.subtotal),
                    tax_rate: format_rate(line.tax_rate()),
                    tax_amount: format_inr_fixed(totals.tax_amount),
                }
            })
            .collect();

        let totals = draft.totals();
        Self {
            client_name: draft.client_name().trim().to_string(),
            issued_on,
            lines,
            subtotal: format_inr_fixed(totals.subtotal),
            total_tax: format_inr_fixed(totals.total_tax),
            grand_total: format_inr_fixed(totals.grand_total),
        }
    }
}
