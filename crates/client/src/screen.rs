//! The seam between the controller and whatever draws the UI.
//!
//! A screen never reads state back: the controller pushes complete
//! projections and the screen draws them.

use invoicehub_core::{LineId, MalformedField, format_inr};
use invoicehub_invoicing::{
    CatalogItem, Client, DashboardStats, InvoiceDraft, InvoiceSummary, LineField,
};

use crate::view::View;

/// One draft row as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowProjection {
    pub id: LineId,
    pub name: String,
    pub quantity: String,
    pub unit_price: String,
    pub tax_rate: String,
    /// Live `₹` total of the row, valid or not.
    pub line_total: String,
    pub valid: bool,
    pub warnings: Vec<MalformedField>,
}

/// The whole create form as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftProjection {
    pub client_name: String,
    pub rows: Vec<RowProjection>,
    pub subtotal: String,
    pub total_tax: String,
    pub grand_total: String,
}

impl DraftProjection {
    pub fn from_draft(draft: &InvoiceDraft) -> Self {
        let rows = draft
            .lines()
            .iter()
            .map(|line| RowProjection {
                id: line.id(),
                name: line.raw(LineField::Name).to_string(),
                quantity: line.raw(LineField::Quantity).to_string(),
                unit_price: line.raw(LineField::UnitPrice).to_string(),
                tax_rate: line.raw(LineField::TaxRate).to_string(),
                line_total: format_inr(line.totals().line_total),
                valid: line.is_valid(),
                warnings: line.warnings(),
            })
            .collect();

        let totals = draft.totals();
        Self {
            client_name: draft.client_name().to_string(),
            rows,
            subtotal: format_inr(totals.subtotal),
            total_tax: format_inr(totals.total_tax),
            grand_total: format_inr(totals.grand_total),
        }
    }
}

/// Dismissible message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Saved {
        invoice_number: String,
    },
    Invoice {
        invoice_number: String,
        client_name: String,
        grand_total: String,
    },
    Error(String),
}

impl core::fmt::Display for Notice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Notice::Saved { invoice_number } => {
                write!(f, "Invoice {invoice_number} saved successfully!")
            }
            Notice::Invoice {
                invoice_number,
                client_name,
                grand_total,
            } => write!(
                f,
                "Invoice {invoice_number} for {client_name}\nTotal: {grand_total}"
            ),
            Notice::Error(msg) => f.write_str(msg),
        }
    }
}

/// Rendering surface driven by [`crate::ViewController`].
pub trait Screen {
    fn show_view(&mut self, view: View);

    fn render_draft(&mut self, draft: &DraftProjection);

    fn render_dashboard(&mut self, stats: &DashboardStats, recent: &[InvoiceSummary]);

    fn render_clients(&mut self, clients: &[Client]);

    fn render_items(&mut self, items: &[CatalogItem]);

    /// Enable or disable the save trigger.
    fn set_save_enabled(&mut self, enabled: bool);

    fn notify(&mut self, notice: Notice);
}
