use fractic_server_error::ServerError;

use crate::{
    entities::{ClientDraft, InvoiceDraft, InvoiceId, InvoiceItemDraft, SenderDraft},
    util::InvoicingUtil,
};

pub const SAMPLE_SENDER_NAME: &str = "Test Company Inc.";
pub const SAMPLE_CLIENT_NAME: &str = "Client Corporation";
pub const SAMPLE_FOOTER_MESSAGE: &str =
    "Thank you for your business! Payment is due within 30 days.";

/// Create one sender, one client, one footer message and an unpaid invoice
/// with three items. Returns the new invoice.
pub async fn seed_sample_invoice(util: &InvoicingUtil) -> Result<InvoiceId, ServerError> {
    let sender_id = util
        .create_sender(SenderDraft {
            name: SAMPLE_SENDER_NAME.to_string(),
            address: Some("123 Business St\nSuite 100\nBusiness City, BC 12345".to_string()),
            email: Some("billing@testcompany.com".to_string()),
            phone: Some("(555) 123-4567".to_string()),
        })
        .await?;
    let client_id = util
        .create_client(ClientDraft {
            name: SAMPLE_CLIENT_NAME.to_string(),
            address: Some("456 Client Ave\nClient Town, CT 67890".to_string()),
            email: Some("accounts@clientcorp.com".to_string()),
        })
        .await?;
    let footer_message_id = util.create_footer_message(SAMPLE_FOOTER_MESSAGE).await?;

    let invoice_id = util
        .create_invoice(InvoiceDraft {
            sender_id,
            client_id,
            footer_message_id: Some(footer_message_id),
            paid: false,
        })
        .await?;
    for item in [
        InvoiceItemDraft::new("Web Development", 40.0, 75.0),
        InvoiceItemDraft::new("Consulting Services", 10.0, 100.0),
        InvoiceItemDraft::new("Design Work", 5.0, 50.0),
    ] {
        util.add_invoice_item(invoice_id, item).await?;
    }

    tracing::info!(invoice_id = invoice_id.0, "seeded sample invoice");
    Ok(invoice_id)
}
