use fractic_server_error::ServerError;
use rusqlite::{params, OptionalExtension as _};

use crate::{
    data::{
        datasources::sqlite_connection::SqliteConnection,
        models::invoice_row_model::{InvoiceRowModel, InvoiceSummaryRowModel, InvoiceViewRowModel},
    },
    entities::{
        Invoice, InvoiceDraft, InvoiceId, InvoiceItem, InvoiceItemDraft, InvoiceItemId,
        InvoiceSummary, InvoiceView,
    },
};

pub(crate) trait InvoicesDatasource: Send + Sync {
    fn insert_invoice(&self, draft: &InvoiceDraft) -> Result<InvoiceId, ServerError>;
    fn select_invoice(&self, id: InvoiceId) -> Result<Option<Invoice>, ServerError>;
    fn update_invoice(&self, id: InvoiceId, draft: &InvoiceDraft) -> Result<bool, ServerError>;
    fn update_paid(&self, id: InvoiceId, paid: bool) -> Result<bool, ServerError>;
    fn select_summaries(&self) -> Result<Vec<InvoiceSummary>, ServerError>;
    /// Summaries paired with the sum of their line totals.
    fn select_summaries_with_totals(&self) -> Result<Vec<(InvoiceSummary, f64)>, ServerError>;
    fn select_view(&self, id: InvoiceId) -> Result<Option<InvoiceView>, ServerError>;

    fn insert_item(
        &self,
        invoice_id: InvoiceId,
        draft: &InvoiceItemDraft,
    ) -> Result<InvoiceItemId, ServerError>;
    fn select_items(&self, invoice_id: InvoiceId) -> Result<Vec<InvoiceItem>, ServerError>;
}

pub(crate) struct InvoicesDatasourceImpl {
    db: SqliteConnection,
}

impl InvoicesDatasourceImpl {
    pub(crate) fn new(db: SqliteConnection) -> Self {
        Self { db }
    }
}

impl InvoicesDatasource for InvoicesDatasourceImpl {
    fn insert_invoice(&self, draft: &InvoiceDraft) -> Result<InvoiceId, ServerError> {
        self.db.with_conn("insert invoice", |conn| {
            conn.execute(
                "INSERT INTO invoice (sender_id, client_id, footer_message_id, paid)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    draft.sender_id.0,
                    draft.client_id.0,
                    draft.footer_message_id.map(|f| f.0),
                    draft.paid
                ],
            )?;
            Ok(InvoiceId(conn.last_insert_rowid()))
        })
    }

    fn select_invoice(&self, id: InvoiceId) -> Result<Option<Invoice>, ServerError> {
        self.db
            .with_conn("get invoice", |conn| {
                conn.query_row(
                    &format!("SELECT {} FROM invoice WHERE id = ?1", InvoiceRowModel::COLUMNS),
                    params![id.0],
                    InvoiceRowModel::from_row,
                )
                .optional()
            })?
            .map(Invoice::try_from)
            .transpose()
    }

    fn update_invoice(&self, id: InvoiceId, draft: &InvoiceDraft) -> Result<bool, ServerError> {
        self.db.with_conn("update invoice", |conn| {
            let changed = conn.execute(
                "UPDATE invoice
                 SET sender_id = ?1, client_id = ?2, footer_message_id = ?3, paid = ?4
                 WHERE id = ?5",
                params![
                    draft.sender_id.0,
                    draft.client_id.0,
                    draft.footer_message_id.map(|f| f.0),
                    draft.paid,
                    id.0
                ],
            )?;
            Ok(changed > 0)
        })
    }

    fn update_paid(&self, id: InvoiceId, paid: bool) -> Result<bool, ServerError> {
        self.db.with_conn("update invoice paid flag", |conn| {
            let changed = conn.execute(
                "UPDATE invoice SET paid = ?1 WHERE id = ?2",
                params![paid, id.0],
            )?;
            Ok(changed > 0)
        })
    }

    fn select_summaries(&self) -> Result<Vec<InvoiceSummary>, ServerError> {
        self.db
            .with_conn("list invoices", |conn| {
                let mut stmt = conn.prepare(
                    "SELECT i.id, s.name, c.name, i.date_created, i.paid
                     FROM invoice i
                     LEFT JOIN sender s ON i.sender_id = s.id
                     LEFT JOIN client c ON i.client_id = c.id
                     ORDER BY i.date_created DESC, i.id DESC",
                )?;
                let rows = stmt.query_map([], InvoiceSummaryRowModel::from_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()
            })?
            .into_iter()
            .map(InvoiceSummary::try_from)
            .collect()
    }

    fn select_summaries_with_totals(&self) -> Result<Vec<(InvoiceSummary, f64)>, ServerError> {
        self.db
            .with_conn("list invoice totals", |conn| {
                let mut stmt = conn.prepare(
                    "SELECT i.id, s.name, c.name, i.date_created, i.paid,
                            COALESCE(SUM(it.amount * it.cost_per_unit), 0.0)
                     FROM invoice i
                     LEFT JOIN sender s ON i.sender_id = s.id
                     LEFT JOIN client c ON i.client_id = c.id
                     LEFT JOIN invoice_item it ON it.invoice_id = i.id
                     GROUP BY i.id
                     ORDER BY i.date_created DESC, i.id DESC",
                )?;
                let rows = stmt.query_map([], |row| {
                    Ok((InvoiceSummaryRowModel::from_row(row)?, row.get::<_, f64>(5)?))
                })?;
                rows.collect::<rusqlite::Result<Vec<_>>>()
            })?
            .into_iter()
            .map(|(summary, total)| {
                Ok::<_, ServerError>((InvoiceSummary::try_from(summary)?, total))
            })
            .collect()
    }

    fn select_view(&self, id: InvoiceId) -> Result<Option<InvoiceView>, ServerError> {
        self.db
            .with_conn("get invoice data", |conn| {
                conn.query_row(
                    InvoiceViewRowModel::QUERY,
                    params![id.0],
                    InvoiceViewRowModel::from_row,
                )
                .optional()
            })?
            .map(InvoiceView::try_from)
            .transpose()
    }

    fn insert_item(
        &self,
        invoice_id: InvoiceId,
        draft: &InvoiceItemDraft,
    ) -> Result<InvoiceItemId, ServerError> {
        self.db.with_conn("insert invoice item", |conn| {
            conn.execute(
                "INSERT INTO invoice_item (invoice_id, item_name, amount, cost_per_unit)
                 VALUES (?1, ?2, ?3, ?4)",
                params![invoice_id.0, draft.name, draft.quantity, draft.unit_cost],
            )?;
            Ok(InvoiceItemId(conn.last_insert_rowid()))
        })
    }

    fn select_items(&self, invoice_id: InvoiceId) -> Result<Vec<InvoiceItem>, ServerError> {
        self.db.with_conn("list invoice items", |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, invoice_id, item_name, amount, cost_per_unit
                 FROM invoice_item WHERE invoice_id = ?1 ORDER BY id",
            )?;
            let rows = stmt.query_map(params![invoice_id.0], |row| {
                Ok(InvoiceItem {
                    id: InvoiceItemId(row.get(0)?),
                    invoice_id: InvoiceId(row.get(1)?),
                    name: row.get(2)?,
                    quantity: row.get(3)?,
                    unit_cost: row.get(4)?,
                })
            })?;
            rows.collect()
        })
    }
}
