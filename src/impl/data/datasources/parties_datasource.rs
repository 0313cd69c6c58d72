use fractic_server_error::ServerError;
use rusqlite::{params, OptionalExtension as _, Row};

use crate::{
    data::datasources::sqlite_connection::SqliteConnection,
    entities::{
        Client, ClientDraft, ClientId, FooterMessage, FooterMessageId, Sender, SenderDraft,
        SenderId,
    },
};

/// Senders, clients and footer messages: the records an invoice points at.
pub(crate) trait PartiesDatasource: Send + Sync {
    fn insert_sender(&self, draft: &SenderDraft) -> Result<SenderId, ServerError>;
    fn select_senders(&self) -> Result<Vec<Sender>, ServerError>;
    fn select_sender(&self, id: SenderId) -> Result<Option<Sender>, ServerError>;
    fn update_sender(&self, id: SenderId, draft: &SenderDraft) -> Result<bool, ServerError>;

    fn insert_client(&self, draft: &ClientDraft) -> Result<ClientId, ServerError>;
    fn select_clients(&self) -> Result<Vec<Client>, ServerError>;
    fn select_client(&self, id: ClientId) -> Result<Option<Client>, ServerError>;
    fn update_client(&self, id: ClientId, draft: &ClientDraft) -> Result<bool, ServerError>;

    fn insert_footer_message(&self, message: &str) -> Result<FooterMessageId, ServerError>;
    fn select_footer_messages(&self) -> Result<Vec<FooterMessage>, ServerError>;
    fn select_footer_message(
        &self,
        id: FooterMessageId,
    ) -> Result<Option<FooterMessage>, ServerError>;
    fn update_footer_message(&self, id: FooterMessageId, message: &str)
        -> Result<bool, ServerError>;
}

pub(crate) struct PartiesDatasourceImpl {
    db: SqliteConnection,
}

impl PartiesDatasourceImpl {
    pub(crate) fn new(db: SqliteConnection) -> Self {
        Self { db }
    }
}

fn sender_from_row(row: &Row<'_>) -> rusqlite::Result<Sender> {
    Ok(Sender {
        id: SenderId(row.get(0)?),
        name: row.get(1)?,
        address: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
    })
}

fn client_from_row(row: &Row<'_>) -> rusqlite::Result<Client> {
    Ok(Client {
        id: ClientId(row.get(0)?),
        name: row.get(1)?,
        address: row.get(2)?,
        email: row.get(3)?,
    })
}

fn footer_message_from_row(row: &Row<'_>) -> rusqlite::Result<FooterMessage> {
    Ok(FooterMessage {
        id: FooterMessageId(row.get(0)?),
        message: row.get(1)?,
    })
}

impl PartiesDatasource for PartiesDatasourceImpl {
    fn insert_sender(&self, draft: &SenderDraft) -> Result<SenderId, ServerError> {
        self.db.with_conn("insert sender", |conn| {
            conn.execute(
                "INSERT INTO sender (name, address, email, phone) VALUES (?1, ?2, ?3, ?4)",
                params![draft.name, draft.address, draft.email, draft.phone],
            )?;
            Ok(SenderId(conn.last_insert_rowid()))
        })
    }

    fn select_senders(&self) -> Result<Vec<Sender>, ServerError> {
        self.db.with_conn("list senders", |conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, address, email, phone FROM sender ORDER BY id")?;
            let rows = stmt.query_map([], sender_from_row)?;
            rows.collect()
        })
    }

    fn select_sender(&self, id: SenderId) -> Result<Option<Sender>, ServerError> {
        self.db.with_conn("get sender", |conn| {
            conn.query_row(
                "SELECT id, name, address, email, phone FROM sender WHERE id = ?1",
                params![id.0],
                sender_from_row,
            )
            .optional()
        })
    }

    fn update_sender(&self, id: SenderId, draft: &SenderDraft) -> Result<bool, ServerError> {
        self.db.with_conn("update sender", |conn| {
            let changed = conn.execute(
                "UPDATE sender SET name = ?1, address = ?2, email = ?3, phone = ?4 WHERE id = ?5",
                params![draft.name, draft.address, draft.email, draft.phone, id.0],
            )?;
            Ok(changed > 0)
        })
    }

    fn insert_client(&self, draft: &ClientDraft) -> Result<ClientId, ServerError> {
        self.db.with_conn("insert client", |conn| {
            conn.execute(
                "INSERT INTO client (name, address, email) VALUES (?1, ?2, ?3)",
                params![draft.name, draft.address, draft.email],
            )?;
            Ok(ClientId(conn.last_insert_rowid()))
        })
    }

    fn select_clients(&self) -> Result<Vec<Client>, ServerError> {
        self.db.with_conn("list clients", |conn| {
            let mut stmt = conn.prepare("SELECT id, name, address, email FROM client ORDER BY id")?;
            let rows = stmt.query_map([], client_from_row)?;
            rows.collect()
        })
    }

    fn select_client(&self, id: ClientId) -> Result<Option<Client>, ServerError> {
        self.db.with_conn("get client", |conn| {
            conn.query_row(
                "SELECT id, name, address, email FROM client WHERE id = ?1",
                params![id.0],
                client_from_row,
            )
            .optional()
        })
    }

    fn update_client(&self, id: ClientId, draft: &ClientDraft) -> Result<bool, ServerError> {
        self.db.with_conn("update client", |conn| {
            let changed = conn.execute(
                "UPDATE client SET name = ?1, address = ?2, email = ?3 WHERE id = ?4",
                params![draft.name, draft.address, draft.email, id.0],
            )?;
            Ok(changed > 0)
        })
    }

    fn insert_footer_message(&self, message: &str) -> Result<FooterMessageId, ServerError> {
        self.db.with_conn("insert footer message", |conn| {
            conn.execute(
                "INSERT INTO footer_message (message) VALUES (?1)",
                params![message],
            )?;
            Ok(FooterMessageId(conn.last_insert_rowid()))
        })
    }

    fn select_footer_messages(&self) -> Result<Vec<FooterMessage>, ServerError> {
        self.db.with_conn("list footer messages", |conn| {
            let mut stmt = conn.prepare("SELECT id, message FROM footer_message ORDER BY id")?;
            let rows = stmt.query_map([], footer_message_from_row)?;
            rows.collect()
        })
    }

    fn select_footer_message(
        &self,
        id: FooterMessageId,
    ) -> Result<Option<FooterMessage>, ServerError> {
        self.db.with_conn("get footer message", |conn| {
            conn.query_row(
                "SELECT id, message FROM footer_message WHERE id = ?1",
                params![id.0],
                footer_message_from_row,
            )
            .optional()
        })
    }

    fn update_footer_message(
        &self,
        id: FooterMessageId,
        message: &str,
    ) -> Result<bool, ServerError> {
        self.db.with_conn("update footer message", |conn| {
            let changed = conn.execute(
                "UPDATE footer_message SET message = ?1 WHERE id = ?2",
                params![message, id.0],
            )?;
            Ok(changed > 0)
        })
    }
}
