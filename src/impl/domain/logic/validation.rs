use fractic_server_error::ServerError;

use crate::{
    entities::{ClientDraft, InvoiceItemDraft, SenderDraft},
    errors::{
        AmountMustBePositive, ClientNameRequired, CostPerUnitMustBePositive,
        FooterMessageRequired, ItemNameRequired, SenderNameRequired,
    },
};

/// Trim a required field, returning `None` if nothing is left.
fn required(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Trim an optional field; blank input is stored as NULL.
fn optional(raw: Option<&str>) -> Option<String> {
    raw.and_then(required)
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

pub(crate) fn validate_sender(draft: &SenderDraft) -> Result<SenderDraft, ServerError> {
    Ok(SenderDraft {
        name: required(&draft.name).ok_or_else(|| SenderNameRequired::new())?,
        address: optional(draft.address.as_deref()),
        email: optional(draft.email.as_deref()),
        phone: optional(draft.phone.as_deref()),
    })
}

pub(crate) fn validate_client(draft: &ClientDraft) -> Result<ClientDraft, ServerError> {
    Ok(ClientDraft {
        name: required(&draft.name).ok_or_else(|| ClientNameRequired::new())?,
        address: optional(draft.address.as_deref()),
        email: optional(draft.email.as_deref()),
    })
}

pub(crate) fn validate_footer_message(message: &str) -> Result<String, ServerError> {
    required(message).ok_or_else(|| FooterMessageRequired::new())
}

pub(crate) fn validate_item(draft: &InvoiceItemDraft) -> Result<InvoiceItemDraft, ServerError> {
    let name = required(&draft.name).ok_or_else(|| ItemNameRequired::new())?;
    if !positive(draft.quantity) {
        return Err(AmountMustBePositive::new());
    }
    if !positive(draft.unit_cost) {
        return Err(CostPerUnitMustBePositive::new());
    }
    Ok(InvoiceItemDraft {
        name,
        quantity: draft.quantity,
        unit_cost: draft.unit_cost,
    })
}
