//! Line-oriented terminal front end.

use core::fmt::Write as _;
use core::ops::ControlFlow;
use core::str::FromStr;
use std::io::Write;

use thiserror::Error;

use invoicehub_core::format_inr_compact;
use invoicehub_export::document::DEFAULT_FILE_NAME;
use invoicehub_gateway::InvoiceGateway;
use invoicehub_invoicing::{
    CatalogItem, Client, DashboardStats, InvoiceSummary, LineField, UnknownLineField,
    display_date,
};

use crate::controller::ViewController;
use crate::screen::{DraftProjection, Notice, Screen};
use crate::view::{UnknownView, View};

pub const HELP: &str = "\
commands:
  view <dashboard|create|clients|items>   switch view
  client <name>                           set the client name
  add                                     add an empty line item
  set <row> <field> <value>               edit a line (field: name, qty, price, gst)
  remove <row>                            remove a line item
  save                                    save the invoice
  show <id>                               show a saved invoice
  pdf [path]                              export the draft (default invoice.pdf)
  help                                    show this text
  quit                                    exit";

/// One parsed input line. Row numbers are 1-based on input and stored as
/// indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    View(View),
    Client(String),
    Add,
    Set {
        row: usize,
        field: LineField,
        value: String,
    },
    Remove(usize),
    Save,
    Show(i64),
    Pdf(String),
    Help,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0:?} (try `help`)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("row must be a number starting at 1, got {0:?}")]
    BadRow(String),
    #[error("invoice id must be a number, got {0:?}")]
    BadInvoiceId(String),
    #[error(transparent)]
    View(#[from] UnknownView),
    #[error(transparent)]
    Field(#[from] UnknownLineField),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }
        let (word, rest) = split_word(line);

        match word.to_ascii_lowercase().as_str() {
            "view" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("view <name>"));
                }
                Ok(Command::View(rest.parse()?))
            }
            "client" => Ok(Command::Client(rest.to_string())),
            "add" => Ok(Command::Add),
            "set" => {
                let (row, rest) = split_word(rest);
                let (field, value) = split_word(rest);
                if field.is_empty() {
                    return Err(CommandError::Usage("set <row> <field> <value>"));
                }
                Ok(Command::Set {
                    row: parse_row(row)?,
                    field: field.parse()?,
                    value: value.to_string(),
                })
            }
            "remove" | "rm" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("remove <row>"));
                }
                Ok(Command::Remove(parse_row(rest)?))
            }
            "save" => Ok(Command::Save),
            "show" => rest
                .parse()
                .map(Command::Show)
                .map_err(|_| CommandError::BadInvoiceId(rest.to_string())),
            "pdf" => Ok(Command::Pdf(if rest.is_empty() {
                DEFAULT_FILE_NAME.to_string()
            } else {
                rest.to_string()
            })),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (s, ""),
    }
}

fn parse_row(raw: &str) -> Result<usize, CommandError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(CommandError::BadRow(raw.to_string())),
    }
}

/// Executes one command against the controller.
pub async fn run_command<G, W>(
    controller: &mut ViewController<G, TerminalScreen<W>>,
    command: Command,
) -> ControlFlow<()>
where
    G: InvoiceGateway,
    W: Write,
{
    match command {
        Command::View(view) => controller.on_view_change(view).await,
        Command::Client(name) => controller.on_client_name_changed(&name),
        Command::Add => {
            controller.on_add_row();
        }
        Command::Set { row, field, value } => controller.on_field_changed(row, field, &value),
        Command::Remove(row) => controller.on_remove_row(row),
        Command::Save if !controller.screen().save_enabled() => {
            tracing::debug!("save ignored: trigger disabled");
            controller
                .screen_mut()
                .notify(Notice::Error("a save is already in progress".to_string()));
        }
        Command::Save => {
            if let Err(err) = controller.on_save().await {
                tracing::debug!(%err, "save did not complete");
            }
        }
        Command::Show(id) => {
            if let Err(err) = controller.view_invoice(id).await {
                tracing::debug!(id, %err, "invoice not shown");
            }
        }
        Command::Pdf(path) => {
            let issued_on = chrono::Local::now().date_naive();
            if let Ok(bytes) = controller.export_pdf(issued_on) {
                match tokio::fs::write(&path, &bytes).await {
                    Ok(()) => {
                        tracing::info!(%path, bytes = bytes.len(), "PDF written");
                        controller.screen_mut().message(&format!("wrote {path}"));
                    }
                    Err(err) => {
                        tracing::error!(%path, %err, "PDF write failed");
                        controller
                            .screen_mut()
                            .notify(Notice::Error(format!("Could not write {path}: {err}")));
                    }
                }
            }
        }
        Command::Help => controller.screen_mut().message(HELP),
        Command::Quit => return ControlFlow::Break(()),
    }
    ControlFlow::Continue(())
}

/// [`Screen`] that prints plain text tables to a writer.
///
/// While the save trigger is disabled, [`run_command`] refuses `save` before it
/// reaches the controller.
pub struct TerminalScreen<W> {
    out: W,
    save_enabled: bool,
}

impl<W: Write> TerminalScreen<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            save_enabled: true,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn save_enabled(&self) -> bool {
        self.save_enabled
    }

    pub fn message(&mut self, text: &str) {
        self.emit(format!("{text}\n"));
    }

    fn emit(&mut self, block: String) {
        if let Err(err) = self
            .out
            .write_all(block.as_bytes())
            .and_then(|()| self.out.flush())
        {
            tracing::warn!(%err, "terminal write failed");
        }
    }
}

impl<W: Write> Screen for TerminalScreen<W> {
    fn show_view(&mut self, view: View) {
        self.emit(format!("== {view} ==\n"));
    }

    fn render_draft(&mut self, draft: &DraftProjection) {
        let mut s = String::new();
        let _ = writeln!(s, "Client: {}", draft.client_name);
        let _ = writeln!(
            s,
            "  {:>3}  {:<24} {:>8} {:>10} {:>6} {:>14}",
            "#", "Item", "Qty", "Price", "GST%", "Total"
        );
        for (i, row) in draft.rows.iter().enumerate() {
            let _ = writeln!(
                s,
                "{} {:>3}  {:<24} {:>8} {:>10} {:>6} {:>14}",
                if row.valid { ' ' } else { '*' },
                i + 1,
                row.name,
                row.quantity,
                row.unit_price,
                row.tax_rate,
                row.line_total
            );
            for warning in &row.warnings {
                let _ = writeln!(s, "        ! {warning}");
            }
        }
        let _ = writeln!(
            s,
            "Subtotal: {}  GST: {}  Grand Total: {}",
            draft.subtotal, draft.total_tax, draft.grand_total
        );
        self.emit(s);
    }

    fn render_dashboard(&mut self, stats: &DashboardStats, recent: &[InvoiceSummary]) {
        let mut s = String::new();
        let _ = writeln!(
            s,
            "Invoices: {}  Revenue: {}  Pending: {}",
            stats.total_invoices,
            format_inr_compact(stats.total_revenue),
            format_inr_compact(stats.pending_amount)
        );
        if recent.is_empty() {
            let _ = writeln!(s, "No invoices yet.");
        }
        for invoice in recent {
            let _ = writeln!(
                s,
                "  {:>4}  {:<10} {:<24} {:<10} {:>14}  {}",
                invoice.id,
                invoice.invoice_number,
                invoice.client_name,
                display_date(invoice.created_at.as_deref()),
                format_inr_compact(invoice.amount()),
                invoice.status
            );
        }
        self.emit(s);
    }

    fn render_clients(&mut self, clients: &[Client]) {
        let mut s = String::new();
        if clients.is_empty() {
            let _ = writeln!(s, "No clients yet.");
        }
        for client in clients {
            let _ = writeln!(
                s,
                "  {:>4}  {:<32} {}",
                client.id,
                client.name,
                display_date(client.created_at.as_deref())
            );
        }
        self.emit(s);
    }

    fn render_items(&mut self, items: &[CatalogItem]) {
        let mut s = String::new();
        if items.is_empty() {
            let _ = writeln!(s, "No items yet.");
        }
        for item in items {
            let _ = writeln!(
                s,
                "  {:>4}  {:<32} {:>6}%",
                item.id,
                item.name,
                item.gst_percentage.normalize()
            );
        }
        self.emit(s);
    }

    fn set_save_enabled(&mut self, enabled: bool) {
        self.save_enabled = enabled;
        if !enabled {
            self.emit("Saving...\n".to_string());
        }
    }

    fn notify(&mut self, notice: Notice) {
        let prefix = match &notice {
            Notice::Error(_) => "error: ",
            _ => "",
        };
        self.emit(format!("{prefix}{notice}\n"));
    }
}
