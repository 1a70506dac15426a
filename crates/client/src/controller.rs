//! View controller: owns the draft, drives the screen, calls the API.

use chrono::NaiveDate;
use thiserror::Error;

use invoicehub_core::{LineId, ValidationError, format_inr_compact};
use invoicehub_export::{ExportDocument, ExportError, render_pdf};
use invoicehub_gateway::{GatewayError, InvoiceGateway};
use invoicehub_invoicing::{
    CreateInvoiceRequest, CreatedInvoice, InvoiceDetail, InvoiceDraft, LineField,
};

use crate::screen::{DraftProjection, Notice, Screen};
use crate::view::{CreateState, View};

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("a save is already in progress")]
    SaveInProgress,
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Mediates between the draft, the screen and the API gateway.
///
/// Every draft mutation is followed by a full redraw of the create form.
pub struct ViewController<G, S> {
    gateway: G,
    screen: S,
    draft: InvoiceDraft,
    view: View,
    state: CreateState,
}

impl<G: InvoiceGateway, S: Screen> ViewController<G, S> {
    pub fn new(gateway: G, screen: S) -> Self {
        Self {
            gateway,
            screen,
            draft: InvoiceDraft::new(),
            view: View::Dashboard,
            state: CreateState::Editing,
        }
    }

    pub fn draft(&self) -> &InvoiceDraft {
        &self.draft
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn state(&self) -> CreateState {
        self.state
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Initial load: dashboard data, then the dashboard view.
    pub async fn start(&mut self) {
        self.refresh_dashboard().await;
        self.show(View::Dashboard);
    }

    pub fn on_client_name_changed(&mut self, text: &str) {
        self.draft.set_client_name(text);
        self.redraw();
    }

    pub fn on_field_changed(&mut self, row: usize, field: LineField, raw: &str) {
        self.draft.update_line(row, field, raw);
        if let Some(line) = self.draft.line(row) {
            for warning in line.warnings() {
                tracing::debug!(row, %warning, "malformed field counts as zero");
            }
        }
        self.redraw();
    }

    pub fn on_add_row(&mut self) -> LineId {
        let id = self.draft.add_line();
        self.redraw();
        id
    }

    pub fn on_remove_row(&mut self, row: usize) {
        if self.draft.remove_line(row).is_none() {
            tracing::debug!(row, "remove ignored: no such row");
        }
        self.redraw();
    }

    pub fn on_remove_line(&mut self, id: LineId) {
        if !self.draft.remove_line_by_id(id) {
            tracing::debug!(%id, "remove ignored: no such line");
        }
        self.redraw();
    }

    /// Validate the draft and enter `Saving`.
    ///
    /// Returns the request to submit. Validation failures are reported to the
    /// screen before any network call and leave the draft untouched.
    pub fn begin_save(&mut self) -> Result<CreateInvoiceRequest, ControllerError> {
        if self.state == CreateState::Saving {
            return Err(ControllerError::SaveInProgress);
        }

        let request = match self.draft.to_create_payload() {
            Ok(request) => request,
            Err(err) => {
                tracing::info!(%err, "save blocked by validation");
                self.screen.notify(Notice::Error(err.to_string()));
                return Err(err.into());
            }
        };

        self.state = CreateState::Saving;
        self.screen.set_save_enabled(false);
        Ok(request)
    }

    /// Leave `Saving` with the API's answer.
    ///
    /// Success resets the draft, navigates to the dashboard and refreshes it.
    /// Failure keeps the draft as it was.
    pub async fn finish_save(
        &mut self,
        result: Result<CreatedInvoice, GatewayError>,
    ) -> Result<CreatedInvoice, ControllerError> {
        self.state = CreateState::Editing;
        self.screen.set_save_enabled(true);

        match result {
            Ok(created) => {
                tracing::info!(invoice_number = %created.invoice_number, "invoice saved");
                self.screen.notify(Notice::Saved {
                    invoice_number: created.invoice_number.clone(),
                });
                self.draft.reset();
                self.redraw();
                self.show(View::Dashboard);
                self.refresh_dashboard().await;
                Ok(created)
            }
            Err(err) => {
                tracing::error!(%err, retryable = err.is_retryable(), "saving invoice failed");
                self.screen
                    .notify(Notice::Error(format!("Error saving invoice: {err}")));
                Err(err.into())
            }
        }
    }

    pub async fn on_save(&mut self) -> Result<CreatedInvoice, ControllerError> {
        let request = self.begin_save()?;
        tracing::info!(
            client = %request.client_name,
            items = request.items.len(),
            grand_total = %request.grand_total(),
            "submitting invoice"
        );
        let result = self.gateway.create_invoice(&request).await;
        self.finish_save(result).await
    }

    pub async fn on_view_change(&mut self, view: View) {
        tracing::info!(%view, "view change");
        self.show(view);

        match view {
            View::Create => {
                self.draft.reset();
                self.redraw();
            }
            View::Clients => match self.gateway.clients().await {
                Ok(clients) => self.screen.render_clients(&clients),
                Err(err) => tracing::error!(%err, "clients load error"),
            },
            View::Items => match self.gateway.items().await {
                Ok(items) => self.screen.render_items(&items),
                Err(err) => tracing::error!(%err, "items load error"),
            },
            View::Dashboard => self.refresh_dashboard().await,
        }
    }

    /// Reload stats and recent invoices together.
    ///
    /// On failure the dashboard keeps whatever it showed last.
    pub async fn refresh_dashboard(&mut self) {
        let (stats, invoices) =
            tokio::join!(self.gateway.dashboard(), self.gateway.list_invoices());

        match (stats, invoices) {
            (Ok(stats), Ok(invoices)) => self.screen.render_dashboard(&stats, &invoices),
            (Err(err), _) | (_, Err(err)) => tracing::error!(%err, "dashboard load error"),
        }
    }

    pub async fn view_invoice(&mut self, id: i64) -> Result<InvoiceDetail, ControllerError> {
        match self.gateway.invoice(id).await {
            Ok(detail) => {
                self.screen.notify(Notice::Invoice {
                    invoice_number: detail.invoice_number.clone(),
                    client_name: detail.client_name.clone(),
                    grand_total: format_inr_compact(detail.grand_total),
                });
                Ok(detail)
            }
            Err(err) => {
                tracing::error!(id, %err, "invoice load error");
                self.screen
                    .notify(Notice::Error("Error loading invoice".to_string()));
                Err(err.into())
            }
        }
    }

    /// Render the current draft as a PDF.
    pub fn export_pdf(&mut self, issued_on: NaiveDate) -> Result<Vec<u8>, ControllerError> {
        let document = ExportDocument::from_draft(&self.draft, issued_on);
        render_pdf(&document).map_err(|err| {
            tracing::error!(%err, "PDF export failed");
            self.screen.notify(Notice::Error(err.to_string()));
            ControllerError::from(err)
        })
    }

    fn show(&mut self, view: View) {
        self.view = view;
        self.screen.show_view(view);
    }

    fn redraw(&mut self) {
        self.screen
            .render_draft(&DraftProjection::from_draft(&self.draft));
    }
}
