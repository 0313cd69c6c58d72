use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use chrono::Local;
use fractic_server_error::ServerError;
use iso_currency::Currency;

use crate::{
    config::PageSize,
    domain::{
        repositories::invoicing_repository::InvoicingRepository,
        usecases::records_usecase::DefaultRepository,
    },
    entities::{InvoiceDocument, InvoiceId},
    errors::{InvoiceNotFound, WriteError},
    presentation::{
        invoice_csv_printer::print_invoices_csv, invoice_layout::InvoiceLayout,
        pdf_writer::write_pdf,
    },
};

#[async_trait]
pub trait InvoiceDocumentUsecase: Send + Sync {
    /// Aggregate an invoice with its parties, footer and items, and compute
    /// its totals.
    async fn get_invoice_document(&self, id: InvoiceId) -> Result<InvoiceDocument, ServerError>;

    /// Render the invoice as a PDF and return the path written. Without an
    /// explicit `output`, a timestamped file name in the output directory is
    /// used.
    async fn generate_invoice_pdf(
        &self,
        id: InvoiceId,
        output: Option<PathBuf>,
    ) -> Result<PathBuf, ServerError>;

    async fn render_invoice_pdf(&self, id: InvoiceId) -> Result<Vec<u8>, ServerError>;

    async fn export_invoices_csv(&self) -> Result<String, ServerError>;
}

pub(crate) struct InvoiceDocumentUsecaseImpl<R1 = DefaultRepository>
where
    R1: InvoicingRepository,
{
    records_repository: Arc<R1>,
    currency: Currency,
    page_size: PageSize,
    output_dir: PathBuf,
}

impl<R1: InvoicingRepository> InvoiceDocumentUsecaseImpl<R1> {
    pub(crate) fn new(
        records_repository: Arc<R1>,
        currency: Currency,
        page_size: PageSize,
        output_dir: PathBuf,
    ) -> Self {
        InvoiceDocumentUsecaseImpl {
            records_repository,
            currency,
            page_size,
            output_dir,
        }
    }

    fn load(&self, id: InvoiceId) -> Result<InvoiceDocument, ServerError> {
        let (view, lines) = self
            .records_repository
            .get_invoice_data(id)?
            .ok_or_else(|| InvoiceNotFound::new(id.0))?;
        Ok(InvoiceDocument::new(view, lines))
    }

    fn render(&self, document: &InvoiceDocument) -> Result<Vec<u8>, ServerError> {
        let layout = InvoiceLayout::new(self.page_size, self.currency);
        let page = layout.page();
        let pages = layout.layout(document);
        tracing::debug!(
            invoice_id = document.view.id.0,
            pages = pages.len(),
            "laid out invoice"
        );
        write_pdf(&format!("Invoice {}", document.view.id), page, &pages)
    }
}

pub(crate) fn default_pdf_file_name(id: InvoiceId) -> String {
    format!(
        "invoice_{}_{}.pdf",
        id,
        Local::now().format("%Y%m%d_%H%M%S")
    )
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ServerError> {
    let display = path.display().to_string();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| WriteError::with_debug(&display, &e))?;
    }
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| WriteError::with_debug(&display, &e))
}

#[async_trait]
impl<R1: InvoicingRepository> InvoiceDocumentUsecase for InvoiceDocumentUsecaseImpl<R1> {
    async fn get_invoice_document(&self, id: InvoiceId) -> Result<InvoiceDocument, ServerError> {
        self.load(id)
    }

    async fn generate_invoice_pdf(
        &self,
        id: InvoiceId,
        output: Option<PathBuf>,
    ) -> Result<PathBuf, ServerError> {
        let document = self.load(id)?;
        let bytes = self.render(&document)?;
        let path = output.unwrap_or_else(|| self.output_dir.join(default_pdf_file_name(id)));
        write_file(&path, &bytes).await?;
        tracing::info!(
            invoice_id = id.0,
            path = %path.display(),
            bytes = bytes.len(),
            "wrote invoice PDF"
        );
        Ok(path)
    }

    async fn render_invoice_pdf(&self, id: InvoiceId) -> Result<Vec<u8>, ServerError> {
        let document = self.load(id)?;
        self.render(&document)
    }

    async fn export_invoices_csv(&self) -> Result<String, ServerError> {
        let rows = self.records_repository.list_invoice_totals()?;
        tracing::debug!(invoices = rows.len(), "exporting invoices");
        print_invoices_csv(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_name_pattern() {
        let name = default_pdf_file_name(InvoiceId(1));
        assert!(name.starts_with("invoice_1_"));
        assert!(name.ends_with(".pdf"));
        // invoice_1_YYYYmmdd_HHMMSS.pdf
        assert_eq!(name.len(), "invoice_1_".len() + 15 + ".pdf".len());
    }
}
