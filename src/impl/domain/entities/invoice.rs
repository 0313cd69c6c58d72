use std::fmt;

use chrono::NaiveDateTime;
use serde_derive::Serialize;

use super::{
    footer_message::FooterMessageId,
    party::{ClientId, SenderId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct InvoiceId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct InvoiceItemId(pub i64);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub sender_id: SenderId,
    pub client_id: ClientId,
    pub footer_message_id: Option<FooterMessageId>,
    pub paid: bool,
    pub date_created: NaiveDateTime,
}

/// Fields needed to create or re-point an invoice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceDraft {
    pub sender_id: SenderId,
    pub client_id: ClientId,
    pub footer_message_id: Option<FooterMessageId>,
    pub paid: bool,
}

/// One row of the invoice listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceSummary {
    pub id: InvoiceId,
    pub sender_name: String,
    pub client_name: String,
    pub date_created: NaiveDateTime,
    pub paid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceItem {
    pub id: InvoiceItemId,
    pub invoice_id: InvoiceId,
    pub name: String,
    pub quantity: f64,
    pub unit_cost: f64,
}

/// Unvalidated line entry, as entered by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceItemDraft {
    pub name: String,
    pub quantity: f64,
    pub unit_cost: f64,
}

// --

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for InvoiceItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl InvoiceItemDraft {
    pub fn new(name: impl Into<String>, quantity: f64, unit_cost: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_cost,
        }
    }
}
