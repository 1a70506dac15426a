//! A4 PDF layout for [`ExportDocument`].
//!
//! Coordinates are millimetres from the bottom-left corner of the page.

use std::io::BufWriter;

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};
use thiserror::Error;

use crate::document::{ExportDocument, ExportLine};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 20.0;
const MARGIN_RIGHT: f32 = 190.0;
const BOTTOM_LIMIT: f32 = 30.0;
const ROW_HEIGHT: f32 = 7.0;
const TOTALS_X: f32 = 130.0;
const NAME_MAX_CHARS: usize = 28;

const COLUMNS: [(&str, f32); 6] = [
    ("Item", 20.0),
    ("Qty", 75.0),
    ("Unit Price", 92.0),
    ("Subtotal", 122.0),
    ("GST", 150.0),
    ("GST Amt", 166.0),
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Page cursor: current layer plus the next baseline.
struct Cursor {
    layer: PdfLayerReference,
    y: f32,
    pages: usize,
}

impl Cursor {
    fn text(&self, font: &IndirectFontRef, text: &str, size: f32, x: f32, y: f32) {
        self.layer.use_text(pdf_text(text), size, Mm(x), Mm(y), font);
    }

    fn rule(&self, y: f32) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN_LEFT), Mm(y)), false),
                (Point::new(Mm(MARGIN_RIGHT), Mm(y)), false),
            ],
            is_closed: false,
        });
    }

    fn new_page(&mut self, doc: &PdfDocumentReference) {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - 20.0;
        self.pages += 1;
    }
}

/// Render the document to PDF bytes.
pub fn render_pdf(document: &ExportDocument) -> Result<Vec<u8>, ExportError> {
    let (doc, page1, layer1) =
        PdfDocument::new("Invoice", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Pdf(e.to_string()))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::Pdf(e.to_string()))?,
    };

    let mut cursor = Cursor {
        layer: doc.get_page(page1).get_layer(layer1),
        y: PAGE_HEIGHT - 30.0,
        pages: 1,
    };

    // Title block
    cursor.text(&fonts.bold, "INVOICE", 20.0, MARGIN_LEFT, cursor.y);
    cursor.y -= 20.0;
    cursor.text(
        &fonts.regular,
        &format!("Client: {}", document.client_name),
        12.0,
        MARGIN_LEFT,
        cursor.y,
    );
    cursor.y -= 10.0;
    cursor.text(
        &fonts.regular,
        &format!("Invoice Date: {}", document.issued_on.format("%d/%m/%Y")),
        12.0,
        MARGIN_LEFT,
        cursor.y,
    );
    cursor.y -= 20.0;

    // Line items
    table_header(&cursor, &fonts);
    cursor.y -= ROW_HEIGHT + 2.0;

    for line in &document.lines {
        if cursor.y < BOTTOM_LIMIT {
            cursor.new_page(&doc);
            table_header(&cursor, &fonts);
            cursor.y -= ROW_HEIGHT + 2.0;
        }
        table_row(&cursor, &fonts, line);
        cursor.y -= ROW_HEIGHT;
    }
    cursor.rule(cursor.y + ROW_HEIGHT - 2.0);

    // Totals need roughly 40mm.
    if cursor.y - 40.0 < BOTTOM_LIMIT {
        cursor.new_page(&doc);
    }
    cursor.y -= 13.0;
    cursor.text(
        &fonts.regular,
        &format!("Subtotal: {}", document.subtotal),
        12.0,
        TOTALS_X,
        cursor.y,
    );
    cursor.y -= 10.0;
    cursor.text(
        &fonts.regular,
        &format!("Total GST: {}", document.total_tax),
        12.0,
        TOTALS_X,
        cursor.y,
    );
    cursor.y -= 20.0;
    cursor.text(
        &fonts.bold,
        &format!("Grand Total: {}", document.grand_total),
        16.0,
        TOTALS_X,
        cursor.y,
    );

    tracing::debug!(
        lines = document.lines.len(),
        pages = cursor.pages,
        "rendered invoice PDF"
    );

    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

fn table_header(cursor: &Cursor, fonts: &Fonts) {
    for (title, x) in COLUMNS {
        cursor.text(&fonts.bold, title, 10.0, x, cursor.y);
    }
    cursor.rule(cursor.y - 2.5);
}

fn table_row(cursor: &Cursor, fonts: &Fonts, line: &ExportLine) {
    let cells = [
        truncate(&line.name, NAME_MAX_CHARS),
        line.quantity.clone(),
        line.unit_price.clone(),
        line.subtotal.clone(),
        line.tax_rate.clone(),
        line.tax_amount.clone(),
    ];
    for ((_, x), cell) in COLUMNS.iter().zip(cells.iter()) {
        cursor.text(&fonts.regular, cell, 10.0, *x, cursor.y);
    }
}

/// The builtin PDF fonts have no rupee glyph.
fn pdf_text(text: &str) -> String {
    text.replace('₹', "Rs.")
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
