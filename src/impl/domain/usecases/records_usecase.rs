use std::sync::Arc;

use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    data::{
        datasources::{
            invoices_datasource::InvoicesDatasourceImpl,
            parties_datasource::PartiesDatasourceImpl,
        },
        repositories::invoicing_repository_impl::InvoicingRepositoryImpl,
    },
    domain::{
        logic::validation::{
            validate_client, validate_footer_message, validate_item, validate_sender,
        },
        repositories::invoicing_repository::InvoicingRepository,
    },
    entities::{
        Client, ClientDraft, ClientId, FooterMessage, FooterMessageId, Invoice, InvoiceDraft,
        InvoiceId, InvoiceItem, InvoiceItemDraft, InvoiceItemId, InvoiceSummary, Sender,
        SenderDraft, SenderId,
    },
    errors::{ClientNotFound, FooterMessageNotFound, InvoiceNotFound, SenderNotFound},
};

pub(crate) type DefaultRepository =
    InvoicingRepositoryImpl<PartiesDatasourceImpl, InvoicesDatasourceImpl>;

#[async_trait]
pub trait RecordsUsecase: Send + Sync {
    async fn create_sender(&self, draft: SenderDraft) -> Result<SenderId, ServerError>;
    async fn list_senders(&self) -> Result<Vec<Sender>, ServerError>;
    async fn get_sender(&self, id: SenderId) -> Result<Sender, ServerError>;
    async fn update_sender(&self, id: SenderId, draft: SenderDraft) -> Result<(), ServerError>;

    async fn create_client(&self, draft: ClientDraft) -> Result<ClientId, ServerError>;
    async fn list_clients(&self) -> Result<Vec<Client>, ServerError>;
    async fn get_client(&self, id: ClientId) -> Result<Client, ServerError>;
    async fn update_client(&self, id: ClientId, draft: ClientDraft) -> Result<(), ServerError>;

    async fn create_footer_message(&self, message: &str) -> Result<FooterMessageId, ServerError>;
    async fn list_footer_messages(&self) -> Result<Vec<FooterMessage>, ServerError>;
    async fn get_footer_message(&self, id: FooterMessageId) -> Result<FooterMessage, ServerError>;
    async fn update_footer_message(
        &self,
        id: FooterMessageId,
        message: &str,
    ) -> Result<(), ServerError>;

    async fn create_invoice(&self, draft: InvoiceDraft) -> Result<InvoiceId, ServerError>;
    async fn get_invoice(&self, id: InvoiceId) -> Result<Invoice, ServerError>;
    async fn update_invoice(&self, id: InvoiceId, draft: InvoiceDraft) -> Result<(), ServerError>;
    async fn set_invoice_paid(&self, id: InvoiceId, paid: bool) -> Result<(), ServerError>;
    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, ServerError>;

    async fn add_invoice_item(
        &self,
        invoice_id: InvoiceId,
        draft: InvoiceItemDraft,
    ) -> Result<InvoiceItemId, ServerError>;
    async fn list_invoice_items(
        &self,
        invoice_id: InvoiceId,
    ) -> Result<Vec<InvoiceItem>, ServerError>;
}

pub(crate) struct RecordsUsecaseImpl<R1 = DefaultRepository>
where
    R1: InvoicingRepository,
{
    records_repository: Arc<R1>,
}

impl<R1: InvoicingRepository> RecordsUsecaseImpl<R1> {
    pub(crate) fn new(records_repository: Arc<R1>) -> Self {
        RecordsUsecaseImpl { records_repository }
    }

    /// Invoices may only point at records that exist.
    fn check_references(&self, draft: &InvoiceDraft) -> Result<(), ServerError> {
        if self.records_repository.get_sender(draft.sender_id)?.is_none() {
            return Err(SenderNotFound::new(draft.sender_id.0));
        }
        if self.records_repository.get_client(draft.client_id)?.is_none() {
            return Err(ClientNotFound::new(draft.client_id.0));
        }
        if let Some(footer_id) = draft.footer_message_id {
            if self.records_repository.get_footer_message(footer_id)?.is_none() {
                return Err(FooterMessageNotFound::new(footer_id.0));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<R1: InvoicingRepository> RecordsUsecase for RecordsUsecaseImpl<R1> {
    async fn create_sender(&self, draft: SenderDraft) -> Result<SenderId, ServerError> {
        let draft = validate_sender(&draft)?;
        let id = self.records_repository.create_sender(&draft)?;
        tracing::info!(sender_id = id.0, name = %draft.name, "created sender");
        Ok(id)
    }

    async fn list_senders(&self) -> Result<Vec<Sender>, ServerError> {
        self.records_repository.list_senders()
    }

    async fn get_sender(&self, id: SenderId) -> Result<Sender, ServerError> {
        self.records_repository
            .get_sender(id)?
            .ok_or_else(|| SenderNotFound::new(id.0))
    }

    async fn update_sender(&self, id: SenderId, draft: SenderDraft) -> Result<(), ServerError> {
        let draft = validate_sender(&draft)?;
        if !self.records_repository.update_sender(id, &draft)? {
            return Err(SenderNotFound::new(id.0));
        }
        tracing::info!(sender_id = id.0, "updated sender");
        Ok(())
    }

    async fn create_client(&self, draft: ClientDraft) -> Result<ClientId, ServerError> {
        let draft = validate_client(&draft)?;
        let id = self.records_repository.create_client(&draft)?;
        tracing::info!(client_id = id.0, name = %draft.name, "created client");
        Ok(id)
    }

    async fn list_clients(&self) -> Result<Vec<Client>, ServerError> {
        self.records_repository.list_clients()
    }

    async fn get_client(&self, id: ClientId) -> Result<Client, ServerError> {
        self.records_repository
            .get_client(id)?
            .ok_or_else(|| ClientNotFound::new(id.0))
    }

    async fn update_client(&self, id: ClientId, draft: ClientDraft) -> Result<(), ServerError> {
        let draft = validate_client(&draft)?;
        if !self.records_repository.update_client(id, &draft)? {
            return Err(ClientNotFound::new(id.0));
        }
        tracing::info!(client_id = id.0, "updated client");
        Ok(())
    }

    async fn create_footer_message(&self, message: &str) -> Result<FooterMessageId, ServerError> {
        let message = validate_footer_message(message)?;
        let id = self.records_repository.create_footer_message(&message)?;
        tracing::info!(footer_message_id = id.0, "created footer message");
        Ok(id)
    }

    async fn list_footer_messages(&self) -> Result<Vec<FooterMessage>, ServerError> {
        self.records_repository.list_footer_messages()
    }

    async fn get_footer_message(&self, id: FooterMessageId) -> Result<FooterMessage, ServerError> {
        self.records_repository
            .get_footer_message(id)?
            .ok_or_else(|| FooterMessageNotFound::new(id.0))
    }

    async fn update_footer_message(
        &self,
        id: FooterMessageId,
        message: &str,
    ) -> Result<(), ServerError> {
        let message = validate_footer_message(message)?;
        if !self.records_repository.update_footer_message(id, &message)? {
            return Err(FooterMessageNotFound::new(id.0));
        }
        tracing::info!(footer_message_id = id.0, "updated footer message");
        Ok(())
    }

    async fn create_invoice(&self, draft: InvoiceDraft) -> Result<InvoiceId, ServerError> {
        self.check_references(&draft)?;
        let id = self.records_repository.create_invoice(&draft)?;
        tracing::info!(
            invoice_id = id.0,
            sender_id = draft.sender_id.0,
            client_id = draft.client_id.0,
            "created invoice"
        );
        Ok(id)
    }

    async fn get_invoice(&self, id: InvoiceId) -> Result<Invoice, ServerError> {
        self.records_repository
            .get_invoice(id)?
            .ok_or_else(|| InvoiceNotFound::new(id.0))
    }

    async fn update_invoice(&self, id: InvoiceId, draft: InvoiceDraft) -> Result<(), ServerError> {
        self.check_references(&draft)?;
        if !self.records_repository.update_invoice(id, &draft)? {
            return Err(InvoiceNotFound::new(id.0));
        }
        tracing::info!(invoice_id = id.0, "updated invoice");
        Ok(())
    }

    async fn set_invoice_paid(&self, id: InvoiceId, paid: bool) -> Result<(), ServerError> {
        if !self.records_repository.set_invoice_paid(id, paid)? {
            return Err(InvoiceNotFound::new(id.0));
        }
        tracing::info!(invoice_id = id.0, paid, "updated invoice paid flag");
        Ok(())
    }

    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, ServerError> {
        self.records_repository.list_invoices()
    }

    async fn add_invoice_item(
        &self,
        invoice_id: InvoiceId,
        draft: InvoiceItemDraft,
    ) -> Result<InvoiceItemId, ServerError> {
        let draft = validate_item(&draft)?;
        if self.records_repository.get_invoice(invoice_id)?.is_none() {
            return Err(InvoiceNotFound::new(invoice_id.0));
        }
        let id = self.records_repository.add_invoice_item(invoice_id, &draft)?;
        tracing::info!(invoice_id = invoice_id.0, item_id = id.0, "added invoice item");
        Ok(id)
    }

    async fn list_invoice_items(
        &self,
        invoice_id: InvoiceId,
    ) -> Result<Vec<InvoiceItem>, ServerError> {
        if self.records_repository.get_invoice(invoice_id)?.is_none() {
            return Err(InvoiceNotFound::new(invoice_id.0));
        }
        self.records_repository.list_invoice_items(invoice_id)
    }
}
