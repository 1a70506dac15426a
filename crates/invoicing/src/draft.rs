use core::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use invoicehub_core::{
    DomainResult, InvoiceTotals, LineAmounts, LineId, LineTotals, MalformedField, Taxable,
    ValidationError, aggregate, line_totals, parse_amount, parse_amount_checked,
};

use crate::payload::{CreateInvoiceItem, CreateInvoiceRequest};

/// Tax rate pre-filled on every new line.
pub const DEFAULT_TAX_RATE: &str = "18";

/// Editable field of a draft line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineField {
    Name,
    Quantity,
    UnitPrice,
    TaxRate,
}

impl LineField {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineField::Name => "name",
            LineField::Quantity => "quantity",
            LineField::UnitPrice => "unit_price",
            LineField::TaxRate => "tax_rate",
        }
    }
}

impl core::fmt::Display for LineField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown line field: {0:?}")]
pub struct UnknownLineField(pub String);

impl FromStr for LineField {
    type Err = UnknownLineField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" | "item" => Ok(LineField::Name),
            "qty" | "quantity" => Ok(LineField::Quantity),
            "price" | "unit_price" | "unit-price" => Ok(LineField::UnitPrice),
            "gst" | "tax" | "tax_rate" | "gst_percentage" => Ok(LineField::TaxRate),
            _ => Err(UnknownLineField(s.to_string())),
        }
    }
}

/// A draft line, holding exactly what the user typed.
///
/// Numeric values are derived on read: empty or non-numeric text counts as
/// zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    id: LineId,
    name: String,
    quantity: String,
    unit_price: String,
    tax_rate: String,
}

impl LineItem {
    /// Blank line: empty name, quantity and price; default tax rate.
    pub fn new() -> Self {
        Self {
            id: LineId::new(),
            name: String::new(),
            quantity: String::new(),
            unit_price: String::new(),
            tax_rate: DEFAULT_TAX_RATE.to_string(),
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw text of a field.
    pub fn raw(&self, field: LineField) -> &str {
        match field {
            LineField::Name => &self.name,
            LineField::Quantity => &self.quantity,
            LineField::UnitPrice => &self.unit_price,
            LineField::TaxRate => &self.tax_rate,
        }
    }

    pub fn set(&mut self, field: LineField, value: impl Into<String>) {
        let value = value.into();
        match field {
            LineField::Name => self.name = value,
            LineField::Quantity => self.quantity = value,
            LineField::UnitPrice => self.unit_price = value,
            LineField::TaxRate => self.tax_rate = value,
        }
    }

    pub fn quantity(&self) -> Decimal {
        parse_amount(&self.quantity)
    }

    pub fn unit_price(&self) -> Decimal {
        parse_amount(&self.unit_price)
    }

    pub fn tax_rate(&self) -> Decimal {
        parse_amount(&self.tax_rate)
    }

    /// Valid iff name is non-blank, quantity > 0 and unit price > 0.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && self.quantity() > Decimal::ZERO
            && self.unit_price() > Decimal::ZERO
    }

    pub fn totals(&self) -> LineTotals {
        line_totals(self.quantity(), self.unit_price(), self.tax_rate())
    }

    /// Numeric fields whose text is present but cannot be priced.
    pub fn warnings(&self) -> Vec<MalformedField> {
        [LineField::Quantity, LineField::UnitPrice, LineField::TaxRate]
            .into_iter()
            .filter_map(|field| parse_amount_checked(field.as_str(), self.raw(field)).err())
            .collect()
    }

    fn to_create_item(&self) -> CreateInvoiceItem {
        let totals = self.totals();
        CreateInvoiceItem {
            name: self.name.trim().to_string(),
            quantity: self.quantity(),
            unit_price: self.unit_price(),
            gst_percentage: self.tax_rate(),
            item_total: totals.subtotal,
            gst_amount: totals.tax_amount,
        }
    }
}

impl Default for LineItem {
    fn default() -> Self {
        Self::new()
    }
}

impl Taxable for LineItem {
    fn amounts(&self) -> LineAmounts {
        LineAmounts {
            quantity: self.quantity(),
            unit_price: self.unit_price(),
            tax_rate: self.tax_rate(),
        }
    }
}

/// The invoice under composition.
///
/// Mutations never fail and never validate; validation is deferred to
/// [`InvoiceDraft::to_create_payload`]. Out-of-range indices are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDraft {
    client_name: String,
    lines: Vec<LineItem>,
}

impl InvoiceDraft {
    /// Fresh draft: empty client name, one blank line.
    pub fn new() -> Self {
        Self {
            client_name: String::new(),
            lines: vec![LineItem::new()],
        }
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn set_client_name(&mut self, name: impl Into<String>) {
        self.client_name = name.into();
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&LineItem> {
        self.lines.get(index)
    }

    pub fn position(&self, id: LineId) -> Option<usize> {
        self.lines.iter().position(|line| line.id == id)
    }

    /// Append a blank line and return its identifier.
    pub fn add_line(&mut self) -> LineId {
        let line = LineItem::new();
        let id = line.id;
        self.lines.push(line);
        id
    }

    /// Remove the line at `index`. Removing the last remaining line is allowed.
    pub fn remove_line(&mut self, index: usize) -> Option<LineItem> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    pub fn remove_line_by_id(&mut self, id: LineId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.lines.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn update_line(&mut self, index: usize, field: LineField, value: impl Into<String>) {
        if let Some(line) = self.lines.get_mut(index) {
            line.set(field, value);
        }
    }

    /// Lines satisfying the validity rule, in display order.
    ///
    /// The iterator is lazy and `Clone`; call this as often as needed.
    pub fn valid_lines(&self) -> impl Iterator<Item = &LineItem> + Clone + '_ {
        self.lines.iter().filter(|line| line.is_valid())
    }

    /// Totals over valid lines only.
    pub fn totals(&self) -> InvoiceTotals {
        aggregate(self.valid_lines())
    }

    /// Live totals of one row, valid or not.
    pub fn line_totals(&self, index: usize) -> Option<LineTotals> {
        self.lines.get(index).map(LineItem::totals)
    }

    pub fn warnings(&self) -> Vec<(LineId, MalformedField)> {
        self.lines
            .iter()
            .flat_map(|line| line.warnings().into_iter().map(move |w| (line.id, w)))
            .collect()
    }

    /// Build the `POST /invoices` body from the client name and valid lines.
    pub fn to_create_payload(&self) -> DomainResult<CreateInvoiceRequest> {
        let client_name = self.client_name.trim();
        if client_name.is_empty() {
            return Err(ValidationError::MissingClientName);
        }

        let items: Vec<CreateInvoiceItem> =
            self.valid_lines().map(LineItem::to_create_item).collect();
        if items.is_empty() {
            return Err(ValidationError::NoValidLines);
        }

        Ok(CreateInvoiceRequest {
            client_name: client_name.to_string(),
            items,
        })
    }

    /// Back to a fresh draft. Idempotent.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for InvoiceDraft {
    fn default() -> Self {
        Self::new()
    }
}
