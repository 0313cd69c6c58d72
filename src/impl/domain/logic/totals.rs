use crate::entities::{InvoiceDocument, InvoiceLine, InvoiceTotals, InvoiceView};

impl InvoiceLine {
    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_cost
    }
}

/// Sum the line totals. No tax or discount is applied, so the grand total
/// equals the subtotal.
pub(crate) fn compute_totals(lines: &[InvoiceLine]) -> InvoiceTotals {
    let subtotal: f64 = lines.iter().map(InvoiceLine::line_total).sum();
    InvoiceTotals {
        subtotal,
        total: subtotal,
    }
}

impl InvoiceDocument {
    pub fn new(view: InvoiceView, lines: Vec<InvoiceLine>) -> Self {
        let totals = compute_totals(&lines);
        Self {
            view,
            lines,
            totals,
        }
    }
}
