use std::{path::PathBuf, sync::Arc};

use fractic_server_error::ServerError;

use crate::{
    config::InvoicingConfig,
    domain::usecases::{
        invoice_document_usecase::{InvoiceDocumentUsecase as _, InvoiceDocumentUsecaseImpl},
        records_usecase::{DefaultRepository, RecordsUsecase as _, RecordsUsecaseImpl},
    },
    entities::{
        Client, ClientDraft, ClientId, FooterMessage, FooterMessageId, Invoice, InvoiceDocument,
        InvoiceDraft, InvoiceId, InvoiceItem, InvoiceItemDraft, InvoiceItemId, InvoiceSummary,
        Sender, SenderDraft, SenderId,
    },
    presentation::invoice_text_printer::InvoiceTextPrinter,
};

/// Entry point of the library: record keeping plus invoice rendering over a
/// single SQLite database.
pub struct InvoicingUtil {
    records_usecase: RecordsUsecaseImpl,
    document_usecase: InvoiceDocumentUsecaseImpl,
    printer: InvoiceTextPrinter,
}

impl InvoicingUtil {
    /// Open (or create) the database named by `config.database_path`.
    pub fn open(config: &InvoicingConfig) -> Result<Self, ServerError> {
        let repository = DefaultRepository::open(&config.database_path)?;
        Self::with_repository(config, repository)
    }

    /// Same as [`InvoicingUtil::open`], but backed by a private in-memory
    /// database.
    pub fn open_in_memory(config: &InvoicingConfig) -> Result<Self, ServerError> {
        Self::with_repository(config, DefaultRepository::open_in_memory()?)
    }

    fn with_repository(
        config: &InvoicingConfig,
        repository: DefaultRepository,
    ) -> Result<Self, ServerError> {
        let repository = Arc::new(repository);
        let currency = config.currency()?;
        Ok(Self {
            records_usecase: RecordsUsecaseImpl::new(repository.clone()),
            document_usecase: InvoiceDocumentUsecaseImpl::new(
                repository,
                currency,
                config.page_size,
                config.output_dir.clone(),
            ),
            printer: InvoiceTextPrinter::new(currency),
        })
    }

    // Senders.

    pub async fn create_sender(&self, draft: SenderDraft) -> Result<SenderId, ServerError> {
        self.records_usecase.create_sender(draft).await
    }

    pub async fn list_senders(&self) -> Result<Vec<Sender>, ServerError> {
        self.records_usecase.list_senders().await
    }

    pub async fn get_sender(&self, id: SenderId) -> Result<Sender, ServerError> {
        self.records_usecase.get_sender(id).await
    }

    pub async fn update_sender(&self, id: SenderId, draft: SenderDraft) -> Result<(), ServerError> {
        self.records_usecase.update_sender(id, draft).await
    }

    // Clients.

    pub async fn create_client(&self, draft: ClientDraft) -> Result<ClientId, ServerError> {
        self.records_usecase.create_client(draft).await
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, ServerError> {
        self.records_usecase.list_clients().await
    }

    pub async fn get_client(&self, id: ClientId) -> Result<Client, ServerError> {
        self.records_usecase.get_client(id).await
    }

    pub async fn update_client(&self, id: ClientId, draft: ClientDraft) -> Result<(), ServerError> {
        self.records_usecase.update_client(id, draft).await
    }

    // Footer messages.

    pub async fn create_footer_message(
        &self,
        message: &str,
    ) -> Result<FooterMessageId, ServerError> {
        self.records_usecase.create_footer_message(message).await
    }

    pub async fn list_footer_messages(&self) -> Result<Vec<FooterMessage>, ServerError> {
        self.records_usecase.list_footer_messages().await
    }

    pub async fn get_footer_message(
        &self,
        id: FooterMessageId,
    ) -> Result<FooterMessage, ServerError> {
        self.records_usecase.get_footer_message(id).await
    }

    pub async fn update_footer_message(
        &self,
        id: FooterMessageId,
        message: &str,
    ) -> Result<(), ServerError> {
        self.records_usecase.update_footer_message(id, message).await
    }

    // Invoices.

    pub async fn create_invoice(&self, draft: InvoiceDraft) -> Result<InvoiceId, ServerError> {
        self.records_usecase.create_invoice(draft).await
    }

    pub async fn get_invoice(&self, id: InvoiceId) -> Result<Invoice, ServerError> {
        self.records_usecase.get_invoice(id).await
    }

    pub async fn update_invoice(
        &self,
        id: InvoiceId,
        draft: InvoiceDraft,
    ) -> Result<(), ServerError> {
        self.records_usecase.update_invoice(id, draft).await
    }

    pub async fn set_invoice_paid(&self, id: InvoiceId, paid: bool) -> Result<(), ServerError> {
        self.records_usecase.set_invoice_paid(id, paid).await
    }

    pub async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, ServerError> {
        self.records_usecase.list_invoices().await
    }

    pub async fn add_invoice_item(
        &self,
        invoice_id: InvoiceId,
        draft: InvoiceItemDraft,
    ) -> Result<InvoiceItemId, ServerError> {
        self.records_usecase.add_invoice_item(invoice_id, draft).await
    }

    pub async fn list_invoice_items(
        &self,
        invoice_id: InvoiceId,
    ) -> Result<Vec<InvoiceItem>, ServerError> {
        self.records_usecase.list_invoice_items(invoice_id).await
    }

    // Documents.

    pub async fn get_invoice_document(&self, id: InvoiceId) -> Result<InvoiceDocument, ServerError> {
        self.document_usecase.get_invoice_document(id).await
    }

    pub async fn generate_invoice_pdf(
        &self,
        id: InvoiceId,
        output: Option<PathBuf>,
    ) -> Result<PathBuf, ServerError> {
        self.document_usecase.generate_invoice_pdf(id, output).await
    }

    pub async fn render_invoice_pdf(&self, id: InvoiceId) -> Result<Vec<u8>, ServerError> {
        self.document_usecase.render_invoice_pdf(id).await
    }

    /// Monospace rendition of the invoice, for the terminal.
    pub async fn print_invoice_text(&self, id: InvoiceId) -> Result<String, ServerError> {
        let document = self.document_usecase.get_invoice_document(id).await?;
        Ok(self.printer.print_invoice(&document))
    }

    pub fn print_invoice_summary(&self, summary: &InvoiceSummary) -> String {
        self.printer.print_summary(summary)
    }

    pub async fn export_invoices_csv(&self) -> Result<String, ServerError> {
        self.document_usecase.export_invoices_csv().await
    }
}
