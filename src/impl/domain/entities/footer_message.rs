use std::fmt;

use serde_derive::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FooterMessageId(pub i64);

/// Reusable free-text note printed under the items table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FooterMessage {
    pub id: FooterMessageId,
    pub message: String,
}

impl fmt::Display for FooterMessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
