use std::path::Path;

use fractic_server_error::ServerError;

use crate::{
    data::datasources::{
        invoices_datasource::{InvoicesDatasource, InvoicesDatasourceImpl},
        parties_datasource::{PartiesDatasource, PartiesDatasourceImpl},
        sqlite_connection::SqliteConnection,
    },
    domain::repositories::invoicing_repository::InvoicingRepository,
    entities::{
        Client, ClientDraft, ClientId, FooterMessage, FooterMessageId, Invoice, InvoiceDraft,
        InvoiceId, InvoiceItem, InvoiceItemDraft, InvoiceItemId, InvoiceLine, InvoiceSummary,
        InvoiceView, Sender, SenderDraft, SenderId,
    },
};

pub(crate) struct InvoicingRepositoryImpl<DS1, DS2>
where
    DS1: PartiesDatasource,
    DS2: InvoicesDatasource,
{
    parties_datasource: DS1,
    invoices_datasource: DS2,
}

impl<DS1, DS2> InvoicingRepository for InvoicingRepositoryImpl<DS1, DS2>
where
    DS1: PartiesDatasource,
    DS2: InvoicesDatasource,
{
    fn create_sender(&self, draft: &SenderDraft) -> Result<SenderId, ServerError> {
        self.parties_datasource.insert_sender(draft)
    }

    fn list_senders(&self) -> Result<Vec<Sender>, ServerError> {
        self.parties_datasource.select_senders()
    }

    fn get_sender(&self, id: SenderId) -> Result<Option<Sender>, ServerError> {
        self.parties_datasource.select_sender(id)
    }

    fn update_sender(&self, id: SenderId, draft: &SenderDraft) -> Result<bool, ServerError> {
        self.parties_datasource.update_sender(id, draft)
    }

    fn create_client(&self, draft: &ClientDraft) -> Result<ClientId, ServerError> {
        self.parties_datasource.insert_client(draft)
    }

    fn list_clients(&self) -> Result<Vec<Client>, ServerError> {
        self.parties_datasource.select_clients()
    }

    fn get_client(&self, id: ClientId) -> Result<Option<Client>, ServerError> {
        self.parties_datasource.select_client(id)
    }

    fn update_client(&self, id: ClientId, draft: &ClientDraft) -> Result<bool, ServerError> {
        self.parties_datasource.update_client(id, draft)
    }

    fn create_footer_message(&self, message: &str) -> Result<FooterMessageId, ServerError> {
        self.parties_datasource.insert_footer_message(message)
    }

    fn list_footer_messages(&self) -> Result<Vec<FooterMessage>, ServerError> {
        self.parties_datasource.select_footer_messages()
    }

    fn get_footer_message(
        &self,
        id: FooterMessageId,
    ) -> Result<Option<FooterMessage>, ServerError> {
        self.parties_datasource.select_footer_message(id)
    }

    fn update_footer_message(
        &self,
        id: FooterMessageId,
        message: &str,
    ) -> Result<bool, ServerError> {
        self.parties_datasource.update_footer_message(id, message)
    }

    fn create_invoice(&self, draft: &InvoiceDraft) -> Result<InvoiceId, ServerError> {
        self.invoices_datasource.insert_invoice(draft)
    }

    fn get_invoice(&self, id: InvoiceId) -> Result<Option<Invoice>, ServerError> {
        self.invoices_datasource.select_invoice(id)
    }

    fn update_invoice(&self, id: InvoiceId, draft: &InvoiceDraft) -> Result<bool, ServerError> {
        self.invoices_datasource.update_invoice(id, draft)
    }

    fn set_invoice_paid(&self, id: InvoiceId, paid: bool) -> Result<bool, ServerError> {
        self.invoices_datasource.update_paid(id, paid)
    }

    fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, ServerError> {
        self.invoices_datasource.select_summaries()
    }

    fn list_invoice_totals(&self) -> Result<Vec<(InvoiceSummary, f64)>, ServerError> {
        self.invoices_datasource.select_summaries_with_totals()
    }

    fn add_invoice_item(
        &self,
        invoice_id: InvoiceId,
        draft: &InvoiceItemDraft,
    ) -> Result<InvoiceItemId, ServerError> {
        self.invoices_datasource.insert_item(invoice_id, draft)
    }

    fn list_invoice_items(&self, invoice_id: InvoiceId) -> Result<Vec<InvoiceItem>, ServerError> {
        self.invoices_datasource.select_items(invoice_id)
    }

    fn get_invoice_data(
        &self,
        id: InvoiceId,
    ) -> Result<Option<(InvoiceView, Vec<InvoiceLine>)>, ServerError> {
        let Some(view) = self.invoices_datasource.select_view(id)? else {
            return Ok(None);
        };
        let lines = self
            .invoices_datasource
            .select_items(id)?
            .into_iter()
            .map(|item| InvoiceLine {
                name: item.name,
                quantity: item.quantity,
                unit_cost: item.unit_cost,
            })
            .collect();
        Ok(Some((view, lines)))
    }
}

impl InvoicingRepositoryImpl<PartiesDatasourceImpl, InvoicesDatasourceImpl> {
    pub(crate) fn new(db: SqliteConnection) -> Self {
        InvoicingRepositoryImpl {
            parties_datasource: PartiesDatasourceImpl::new(db.clone()),
            invoices_datasource: InvoicesDatasourceImpl::new(db),
        }
    }

    pub(crate) fn open<P: AsRef<Path>>(path: P) -> Result<Self, ServerError> {
        Ok(Self::new(SqliteConnection::open(path)?))
    }

    pub(crate) fn open_in_memory() -> Result<Self, ServerError> {
        Ok(Self::new(SqliteConnection::open_in_memory()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository() -> InvoicingRepositoryImpl<PartiesDatasourceImpl, InvoicesDatasourceImpl> {
        InvoicingRepositoryImpl::open_in_memory().unwrap()
    }

    fn sender_draft(name: &str) -> SenderDraft {
        SenderDraft {
            name: name.into(),
            address: Some("123 Main St".into()),
            email: Some("test@example.com".into()),
            phone: Some("555-1234".into()),
        }
    }

    fn client_draft(name: &str) -> ClientDraft {
        ClientDraft {
            name: name.into(),
            address: None,
            email: None,
        }
    }

    #[test]
    fn invoice_data_joins_all_parties() {
        let repo = repository();
        let sender_id = repo.create_sender(&sender_draft("Test Sender")).unwrap();
        let client_id = repo.create_client(&client_draft("Test Client")).unwrap();
        let footer_id = repo.create_footer_message("Thank you!").unwrap();
        let invoice_id = repo
            .create_invoice(&InvoiceDraft {
                sender_id,
                client_id,
                footer_message_id: Some(footer_id),
                paid: false,
            })
            .unwrap();
        repo.add_invoice_item(invoice_id, &InvoiceItemDraft::new("Test Service", 2.0, 100.0))
            .unwrap();
        repo.add_invoice_item(invoice_id, &InvoiceItemDraft::new("Support", 1.0, 50.0))
            .unwrap();

        let (view, lines) = repo.get_invoice_data(invoice_id).unwrap().unwrap();
        assert_eq!(view.id, invoice_id);
        assert_eq!(view.sender_id, Some(sender_id));
        assert_eq!(view.sender_name.as_deref(), Some("Test Sender"));
        assert_eq!(view.sender_phone.as_deref(), Some("555-1234"));
        assert_eq!(view.client_name.as_deref(), Some("Test Client"));
        assert_eq!(view.client_address, None);
        assert_eq!(view.footer_message.as_deref(), Some("Thank you!"));
        assert!(!view.paid);
        assert_eq!(
            lines,
            vec![
                InvoiceLine {
                    name: "Test Service".into(),
                    quantity: 2.0,
                    unit_cost: 100.0,
                },
                InvoiceLine {
                    name: "Support".into(),
                    quantity: 1.0,
                    unit_cost: 50.0,
                },
            ]
        );
    }

    #[test]
    fn invoice_without_footer_has_no_message() {
        let repo = repository();
        let sender_id = repo.create_sender(&sender_draft("S")).unwrap();
        let client_id = repo.create_client(&client_draft("C")).unwrap();
        let invoice_id = repo
            .create_invoice(&InvoiceDraft {
                sender_id,
                client_id,
                footer_message_id: None,
                paid: true,
            })
            .unwrap();
        let (view, lines) = repo.get_invoice_data(invoice_id).unwrap().unwrap();
        assert_eq!(view.footer_message_id, None);
        assert_eq!(view.footer_message, None);
        assert!(view.paid);
        assert!(lines.is_empty());
    }

    #[test]
    fn missing_invoice_yields_none() {
        let repo = repository();
        assert!(repo.get_invoice_data(InvoiceId(999)).unwrap().is_none());
        assert!(repo.get_invoice(InvoiceId(999)).unwrap().is_none());
    }

    #[test]
    fn updates_report_whether_a_row_changed() {
        let repo = repository();
        let id = repo.create_sender(&sender_draft("Original Name")).unwrap();
        assert!(repo.update_sender(id, &sender_draft("Updated Name")).unwrap());
        assert!(!repo
            .update_sender(SenderId(id.0 + 1), &sender_draft("Nobody"))
            .unwrap());
        assert_eq!(repo.get_sender(id).unwrap().unwrap().name, "Updated Name");
    }

    #[test]
    fn listing_joins_party_names() {
        let repo = repository();
        let sender_id = repo.create_sender(&sender_draft("Test Sender")).unwrap();
        let client_id = repo.create_client(&client_draft("Test Client")).unwrap();
        let first = repo
            .create_invoice(&InvoiceDraft {
                sender_id,
                client_id,
                footer_message_id: None,
                paid: false,
            })
            .unwrap();
        let second = repo
            .create_invoice(&InvoiceDraft {
                sender_id,
                client_id,
                footer_message_id: None,
                paid: true,
            })
            .unwrap();

        let invoices = repo.list_invoices().unwrap();
        assert_eq!(invoices.len(), 2);
        // Same timestamp second, so newest id first.
        assert_eq!(invoices[0].id, second);
        assert_eq!(invoices[1].id, first);
        assert_eq!(invoices[0].sender_name, "Test Sender");
        assert_eq!(invoices[0].client_name, "Test Client");
        assert!(invoices[0].paid);
    }

    #[test]
    fn invoice_totals_sum_line_totals_in_one_query() {
        let repo = repository();
        let sender_id = repo.create_sender(&sender_draft("Test Sender")).unwrap();
        let client_id = repo.create_client(&client_draft("Test Client")).unwrap();
        let draft = InvoiceDraft {
            sender_id,
            client_id,
            footer_message_id: None,
            paid: false,
        };
        let billed = repo.create_invoice(&draft).unwrap();
        let empty = repo.create_invoice(&draft).unwrap();
        repo.add_invoice_item(billed, &InvoiceItemDraft::new("Web Development", 40.0, 75.0))
            .unwrap();
        repo.add_invoice_item(billed, &InvoiceItemDraft::new("Hosting", 1.5, 20.0))
            .unwrap();

        let totals: Vec<_> = repo
            .list_invoice_totals()
            .unwrap()
            .into_iter()
            .map(|(summary, total)| (summary.id, summary.client_name, total))
            .collect();
        assert_eq!(
            totals,
            vec![
                (empty, "Test Client".to_string(), 0.0),
                (billed, "Test Client".to_string(), 3030.0),
            ]
        );
    }
}
