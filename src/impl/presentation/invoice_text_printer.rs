use iso_currency::Currency;

use crate::{
    entities::{InvoiceDocument, InvoiceSummary},
    presentation::utils::{format_invoice_date, format_money, format_quantity, paid_label},
};

const WIDTH: usize = 80;
const DESCRIPTION_WIDTH: usize = 36;
const PARTY_WIDTH: usize = 38;

/// Monospace rendition of the invoice template, for the terminal.
pub(crate) struct InvoiceTextPrinter {
    currency: Currency,
}

impl InvoiceTextPrinter {
    pub(crate) fn new(currency: Currency) -> Self {
        Self { currency }
    }

    pub(crate) fn print_invoice(&self, document: &InvoiceDocument) -> String {
        let mut out = String::new();

        out.push_str(&format!("{:^WIDTH$}\n\n", "INVOICE"));
        self.print_info(&mut out, document);
        out.push('\n');
        self.print_parties(&mut out, document);
        out.push('\n');
        self.print_items(&mut out, document);
        self.print_notes(&mut out, document);

        out
    }

    pub(crate) fn print_summary(&self, summary: &InvoiceSummary) -> String {
        format!(
            "Invoice #{} | {} -> {} | {} | {}",
            summary.id,
            summary.sender_name,
            summary.client_name,
            summary.date_created.format("%Y-%m-%d"),
            paid_label(summary.paid),
        )
    }

    fn print_info(&self, out: &mut String, document: &InvoiceDocument) {
        let view = &document.view;
        out.push_str(&format!("{:<12} {}\n", "Invoice ID:", view.id));
        out.push_str(&format!(
            "{:<12} {}\n",
            "Date:",
            format_invoice_date(&view.date_created)
        ));
        out.push_str(&format!("{:<12} {}\n", "Status:", paid_label(view.paid)));
    }

    fn party_column(
        heading: &str,
        name: Option<&str>,
        address: Option<&str>,
        contacts: &[Option<&str>],
    ) -> Vec<String> {
        let mut lines = vec![heading.to_string()];
        let mut add = |s: &str| {
            for line in s.lines() {
                lines.extend(
                    textwrap::wrap(line, PARTY_WIDTH)
                        .into_iter()
                        .map(|l| l.into_owned()),
                );
            }
        };
        add(name.unwrap_or("N/A"));
        add(address.unwrap_or("No address provided"));
        for contact in contacts.iter().flatten() {
            add(*contact);
        }
        lines
    }

    fn print_parties(&self, out: &mut String, document: &InvoiceDocument) {
        let view = &document.view;
        let from = Self::party_column(
            "From:",
            view.sender_name.as_deref(),
            view.sender_address.as_deref(),
            &[view.sender_email.as_deref(), view.sender_phone.as_deref()],
        );
        let to = Self::party_column(
            "To:",
            view.client_name.as_deref(),
            view.client_address.as_deref(),
            &[view.client_email.as_deref()],
        );
        for i in 0..from.len().max(to.len()) {
            let left = from.get(i).map(String::as_str).unwrap_or("");
            let right = to.get(i).map(String::as_str).unwrap_or("");
            out.push_str(format!("{:<w$}  {}", left, right, w = PARTY_WIDTH).trim_end());
            out.push('\n');
        }
    }

    fn print_items(&self, out: &mut String, document: &InvoiceDocument) {
        out.push_str("Invoice Items\n");
        out.push_str(&format!(
            "{:<DESCRIPTION_WIDTH$} {:>10} {:>15} {:>15}\n",
            "Description", "Quantity", "Unit Price", "Total"
        ));
        out.push_str(&format!("{}\n", "-".repeat(WIDTH)));
        for line in &document.lines {
            let wrapped = textwrap::wrap(&line.name, DESCRIPTION_WIDTH);
            let first = wrapped.first().map(|l| l.as_ref()).unwrap_or("");
            out.push_str(&format!(
                "{:<DESCRIPTION_WIDTH$} {:>10} {:>15} {:>15}\n",
                first,
                format_quantity(line.quantity),
                format_money(line.unit_cost, self.currency),
                format_money(line.line_total(), self.currency),
            ));
            for rest in wrapped.iter().skip(1) {
                out.push_str(&format!("{}\n", rest));
            }
        }
        out.push_str(&format!("{}\n", "-".repeat(WIDTH)));
        let label_width = DESCRIPTION_WIDTH + 1 + 10 + 1 + 15;
        out.push_str(&format!(
            "{:>label_width$} {:>15}\n",
            "Subtotal:",
            format_money(document.totals.subtotal, self.currency)
        ));
        out.push_str(&format!(
            "{:>label_width$} {:>15}\n",
            "Grand Total:",
            format_money(document.totals.total, self.currency)
        ));
    }

    fn print_notes(&self, out: &mut String, document: &InvoiceDocument) {
        let Some(message) = document
            .view
            .footer_message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
        else {
            return;
        };
        out.push_str("\nNotes:\n");
        for paragraph in message.lines() {
            for line in textwrap::wrap(paragraph, WIDTH) {
                out.push_str(&format!("{}\n", line));
            }
        }
    }
}
