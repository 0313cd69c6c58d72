use fractic_server_error::ServerError;

use crate::entities::{
    Client, ClientDraft, ClientId, FooterMessage, FooterMessageId, Invoice, InvoiceDraft,
    InvoiceId, InvoiceItem, InvoiceItemDraft, InvoiceItemId, InvoiceLine, InvoiceSummary,
    InvoiceView, Sender, SenderDraft, SenderId,
};

/// Persistent record store. Drafts handed to the repository are expected to be
/// validated already.
pub trait InvoicingRepository: Send + Sync {
    // Senders.
    fn create_sender(&self, draft: &SenderDraft) -> Result<SenderId, ServerError>;
    fn list_senders(&self) -> Result<Vec<Sender>, ServerError>;
    fn get_sender(&self, id: SenderId) -> Result<Option<Sender>, ServerError>;
    fn update_sender(&self, id: SenderId, draft: &SenderDraft) -> Result<bool, ServerError>;

    // Clients.
    fn create_client(&self, draft: &ClientDraft) -> Result<ClientId, ServerError>;
    fn list_clients(&self) -> Result<Vec<Client>, ServerError>;
    fn get_client(&self, id: ClientId) -> Result<Option<Client>, ServerError>;
    fn update_client(&self, id: ClientId, draft: &ClientDraft) -> Result<bool, ServerError>;

    // Footer messages.
    fn create_footer_message(&self, message: &str) -> Result<FooterMessageId, ServerError>;
    fn list_footer_messages(&self) -> Result<Vec<FooterMessage>, ServerError>;
    fn get_footer_message(
        &self,
        id: FooterMessageId,
    ) -> Result<Option<FooterMessage>, ServerError>;
    fn update_footer_message(
        &self,
        id: FooterMessageId,
        message: &str,
    ) -> Result<bool, ServerError>;

    // Invoices.
    fn create_invoice(&self, draft: &InvoiceDraft) -> Result<InvoiceId, ServerError>;
    fn get_invoice(&self, id: InvoiceId) -> Result<Option<Invoice>, ServerError>;
    fn update_invoice(&self, id: InvoiceId, draft: &InvoiceDraft) -> Result<bool, ServerError>;
    fn set_invoice_paid(&self, id: InvoiceId, paid: bool) -> Result<bool, ServerError>;
    fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, ServerError>;
    fn list_invoice_totals(&self) -> Result<Vec<(InvoiceSummary, f64)>, ServerError>;

    // Items.
    fn add_invoice_item(
        &self,
        invoice_id: InvoiceId,
        draft: &InvoiceItemDraft,
    ) -> Result<InvoiceItemId, ServerError>;
    fn list_invoice_items(&self, invoice_id: InvoiceId) -> Result<Vec<InvoiceItem>, ServerError>;

    // Aggregation.
    fn get_invoice_data(
        &self,
        id: InvoiceId,
    ) -> Result<Option<(InvoiceView, Vec<InvoiceLine>)>, ServerError>;
}
