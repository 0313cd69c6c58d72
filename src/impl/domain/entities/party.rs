use std::fmt;

use serde_derive::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SenderId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ClientId(pub i64);

/// The invoice-issuing party.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sender {
    pub id: SenderId,
    pub name: String,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// The invoice-receiving party.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub address: Option<String>,
    pub email: Option<String>,
}

/// Unvalidated sender fields, as entered by the user.
#[derive(Debug, Clone, Default)]
pub struct SenderDraft {
    pub name: String,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Unvalidated client fields, as entered by the user.
#[derive(Debug, Clone, Default)]
pub struct ClientDraft {
    pub name: String,
    pub address: Option<String>,
    pub email: Option<String>,
}

// --

impl fmt::Display for SenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
