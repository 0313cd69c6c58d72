use chrono::NaiveDateTime;
use serde_derive::Serialize;

use super::{
    footer_message::FooterMessageId,
    invoice::InvoiceId,
    party::{ClientId, SenderId},
};

/// Denormalized invoice, joined with its sender, client and footer message.
///
/// Joined columns come from a left join, so every party field is optional even
/// though the schema requires the references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceView {
    pub id: InvoiceId,
    pub date_created: NaiveDateTime,
    pub paid: bool,
    pub sender_id: Option<SenderId>,
    pub sender_name: Option<String>,
    pub sender_address: Option<String>,
    pub sender_email: Option<String>,
    pub sender_phone: Option<String>,
    pub client_id: Option<ClientId>,
    pub client_name: Option<String>,
    pub client_address: Option<String>,
    pub client_email: Option<String>,
    pub footer_message_id: Option<FooterMessageId>,
    pub footer_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceLine {
    pub name: String,
    pub quantity: f64,
    pub unit_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub total: f64,
}

/// Everything the renderers need for one invoice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceDocument {
    pub view: InvoiceView,
    pub lines: Vec<InvoiceLine>,
    pub totals: InvoiceTotals,
}
