use fractic_server_error::ServerError;
use serde_derive::Serialize;

use crate::{entities::InvoiceSummary, errors::CsvExportFailed};

#[derive(Debug, Serialize)]
struct InvoiceCsvRow<'a> {
    id: i64,
    date: String,
    sender: &'a str,
    client: &'a str,
    paid: bool,
    total: String,
}

const HEADER: [&str; 6] = ["id", "date", "sender", "client", "paid", "total"];

/// One CSV row per invoice, after a header row that is written even when
/// there are no invoices. Totals are written with two decimals and no
/// currency symbol so spreadsheets read them as numbers.
pub(crate) fn print_invoices_csv(
    invoices: &[(InvoiceSummary, f64)],
) -> Result<String, ServerError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(HEADER)
        .map_err(|e| CsvExportFailed::with_debug(&e))?;
    for (summary, total) in invoices {
        writer
            .serialize(InvoiceCsvRow {
                id: summary.id.0,
                date: summary.date_created.format("%Y-%m-%d").to_string(),
                sender: &summary.sender_name,
                client: &summary.client_name,
                paid: summary.paid,
                total: format!("{:.2}", total),
            })
            .map_err(|e| CsvExportFailed::with_debug(&e))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CsvExportFailed::with_debug(&e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CsvExportFailed::with_debug(&e))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::entities::InvoiceId;

    #[test]
    fn writes_header_and_rows() {
        let summary = InvoiceSummary {
            id: InvoiceId(1),
            sender_name: "Test Company, Inc.".into(),
            client_name: "Client Corp".into(),
            date_created: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            paid: true,
        };
        let csv = print_invoices_csv(&[(summary, 4250.0)]).unwrap();
        assert_eq!(
            csv,
            "id,date,sender,client,paid,total\n\
             1,2024-01-15,\"Test Company, Inc.\",Client Corp,true,4250.00\n"
        );
    }

    #[test]
    fn no_invoices_still_writes_header() {
        assert_eq!(
            print_invoices_csv(&[]).unwrap(),
            "id,date,sender,client,paid,total\n"
        );
    }
}
