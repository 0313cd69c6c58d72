use std::str::FromStr as _;

use fractic_server_error::ServerError;
use rusqlite::Row;

use crate::{
    data::models::timestamp_model::TimestampModel,
    entities::{
        ClientId, FooterMessageId, Invoice, InvoiceId, InvoiceSummary, InvoiceView, SenderId,
    },
};

// Raw rows keep the timestamp as text; conversion into entities happens
// outside the rusqlite row callback so it can fail with a ServerError.

#[derive(Debug)]
pub(crate) struct InvoiceRowModel {
    id: i64,
    sender_id: i64,
    client_id: i64,
    footer_message_id: Option<i64>,
    paid: bool,
    date_created: String,
}

impl InvoiceRowModel {
    pub(crate) const COLUMNS: &'static str =
        "id, sender_id, client_id, footer_message_id, paid, date_created";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            sender_id: row.get(1)?,
            client_id: row.get(2)?,
            footer_message_id: row.get(3)?,
            paid: row.get(4)?,
            date_created: row.get(5)?,
        })
    }
}

impl TryFrom<InvoiceRowModel> for Invoice {
    type Error = ServerError;
    fn try_from(m: InvoiceRowModel) -> Result<Self, Self::Error> {
        Ok(Invoice {
            id: InvoiceId(m.id),
            sender_id: SenderId(m.sender_id),
            client_id: ClientId(m.client_id),
            footer_message_id: m.footer_message_id.map(FooterMessageId),
            paid: m.paid,
            date_created: TimestampModel::from_str(&m.date_created)?.into(),
        })
    }
}

#[derive(Debug)]
pub(crate) struct InvoiceSummaryRowModel {
    id: i64,
    sender_name: Option<String>,
    client_name: Option<String>,
    date_created: String,
    paid: bool,
}

impl InvoiceSummaryRowModel {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            sender_name: row.get(1)?,
            client_name: row.get(2)?,
            date_created: row.get(3)?,
            paid: row.get(4)?,
        })
    }
}

impl TryFrom<InvoiceSummaryRowModel> for InvoiceSummary {
    type Error = ServerError;
    fn try_from(m: InvoiceSummaryRowModel) -> Result<Self, Self::Error> {
        Ok(InvoiceSummary {
            id: InvoiceId(m.id),
            sender_name: m.sender_name.unwrap_or_default(),
            client_name: m.client_name.unwrap_or_default(),
            date_created: TimestampModel::from_str(&m.date_created)?.into(),
            paid: m.paid,
        })
    }
}

#[derive(Debug)]
pub(crate) struct InvoiceViewRowModel {
    id: i64,
    date_created: String,
    paid: bool,
    sender_id: Option<i64>,
    sender_name: Option<String>,
    sender_address: Option<String>,
    sender_email: Option<String>,
    sender_phone: Option<String>,
    client_id: Option<i64>,
    client_name: Option<String>,
    client_address: Option<String>,
    client_email: Option<String>,
    footer_message_id: Option<i64>,
    footer_message: Option<String>,
}

impl InvoiceViewRowModel {
    pub(crate) const QUERY: &'static str = "
        SELECT
            i.id, i.date_created, i.paid,
            s.id, s.name, s.address, s.email, s.phone,
            c.id, c.name, c.address, c.email,
            f.id, f.message
        FROM invoice i
        LEFT JOIN sender s ON i.sender_id = s.id
        LEFT JOIN client c ON i.client_id = c.id
        LEFT JOIN footer_message f ON i.footer_message_id = f.id
        WHERE i.id = ?1";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            date_created: row.get(1)?,
            paid: row.get(2)?,
            sender_id: row.get(3)?,
            sender_name: row.get(4)?,
            sender_address: row.get(5)?,
            sender_email: row.get(6)?,
            sender_phone: row.get(7)?,
            client_id: row.get(8)?,
            client_name: row.get(9)?,
            client_address: row.get(10)?,
            client_email: row.get(11)?,
            footer_message_id: row.get(12)?,
            footer_message: row.get(13)?,
        })
    }
}

impl TryFrom<InvoiceViewRowModel> for InvoiceView {
    type Error = ServerError;
    fn try_from(m: InvoiceViewRowModel) -> Result<Self, Self::Error> {
        Ok(InvoiceView {
            id: InvoiceId(m.id),
            date_created: TimestampModel::from_str(&m.date_created)?.into(),
            paid: m.paid,
            sender_id: m.sender_id.map(SenderId),
            sender_name: m.sender_name,
            sender_address: m.sender_address,
            sender_email: m.sender_email,
            sender_phone: m.sender_phone,
            client_id: m.client_id.map(ClientId),
            client_name: m.client_name,
            client_address: m.client_address,
            client_email: m.client_email,
            footer_message_id: m.footer_message_id.map(FooterMessageId),
            footer_message: m.footer_message,
        })
    }
}
