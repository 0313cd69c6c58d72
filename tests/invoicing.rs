use fractic_invoice::{
    config::{InvoicingConfig, PageSize},
    entities::{
        ClientDraft, ClientId, FooterMessageId, InvoiceDraft, InvoiceId, InvoiceItemDraft,
        SenderDraft, SenderId,
    },
    ext::sample_data::{seed_sample_invoice, SAMPLE_CLIENT_NAME, SAMPLE_SENDER_NAME},
    util::InvoicingUtil,
};
use tempfile::TempDir;

fn setup() -> (TempDir, InvoicingUtil) {
    let dir = tempfile::tempdir().unwrap();
    let config = InvoicingConfig {
        database_path: dir.path().join("invoices.db"),
        output_dir: dir.path().join("out"),
        ..InvoicingConfig::default()
    };
    let util = InvoicingUtil::open(&config).unwrap();
    (dir, util)
}

async fn sender_and_client(util: &InvoicingUtil) -> (SenderId, ClientId) {
    let sender_id = util
        .create_sender(SenderDraft {
            name: "Acme".to_string(),
            ..SenderDraft::default()
        })
        .await
        .unwrap();
    let client_id = util
        .create_client(ClientDraft {
            name: "Globex".to_string(),
            ..ClientDraft::default()
        })
        .await
        .unwrap();
    (sender_id, client_id)
}

fn draft(sender_id: SenderId, client_id: ClientId) -> InvoiceDraft {
    InvoiceDraft {
        sender_id,
        client_id,
        footer_message_id: None,
        paid: false,
    }
}

fn assert_err_contains<T: std::fmt::Debug>(
    result: Result<T, fractic_server_error::ServerError>,
    needle: &str,
) {
    let e = result.unwrap_err();
    assert!(e.to_string().contains(needle), "{e} does not mention {needle}");
}

#[tokio::test]
async fn sender_is_trimmed_and_blank_fields_dropped() {
    let (_dir, util) = setup();

    let id = util
        .create_sender(SenderDraft {
            name: "  Acme Ltd  ".to_string(),
            address: Some("   ".to_string()),
            email: Some(" billing@acme.test ".to_string()),
            phone: None,
        })
        .await
        .unwrap();

    let sender = util.get_sender(id).await.unwrap();
    assert_eq!(sender.name, "Acme Ltd");
    assert_eq!(sender.address, None);
    assert_eq!(sender.email.as_deref(), Some("billing@acme.test"));
    assert_eq!(util.list_senders().await.unwrap(), vec![sender]);
}

#[tokio::test]
async fn records_can_be_updated() {
    let (_dir, util) = setup();
    let (sender_id, client_id) = sender_and_client(&util).await;
    let footer_id = util.create_footer_message("Thanks").await.unwrap();

    util.update_sender(
        sender_id,
        SenderDraft {
            name: "Acme 2".to_string(),
            phone: Some("555".to_string()),
            ..SenderDraft::default()
        },
    )
    .await
    .unwrap();
    util.update_client(
        client_id,
        ClientDraft {
            name: "Globex 2".to_string(),
            ..ClientDraft::default()
        },
    )
    .await
    .unwrap();
    util.update_footer_message(footer_id, "Net 15").await.unwrap();

    assert_eq!(util.get_sender(sender_id).await.unwrap().name, "Acme 2");
    assert_eq!(util.get_client(client_id).await.unwrap().name, "Globex 2");
    assert_eq!(
        util.get_footer_message(footer_id).await.unwrap().message,
        "Net 15"
    );
}

#[tokio::test]
async fn required_fields_are_validated() {
    let (_dir, util) = setup();

    assert_err_contains(
        util.create_sender(SenderDraft::default()).await,
        "Sender name is required",
    );
    assert_err_contains(
        util.create_client(ClientDraft {
            name: "  ".to_string(),
            ..ClientDraft::default()
        })
        .await,
        "Client name is required",
    );
    assert_err_contains(
        util.create_footer_message("").await,
        "Footer message is required",
    );
    assert!(util.list_senders().await.unwrap().is_empty());
    assert!(util.list_clients().await.unwrap().is_empty());
    assert!(util.list_footer_messages().await.unwrap().is_empty());
}

#[tokio::test]
async fn items_are_validated() {
    let (_dir, util) = setup();
    let (sender_id, client_id) = sender_and_client(&util).await;
    let invoice_id = util
        .create_invoice(draft(sender_id, client_id))
        .await
        .unwrap();

    assert_err_contains(
        util.add_invoice_item(invoice_id, InvoiceItemDraft::new("", 1.0, 1.0))
            .await,
        "Item name is required",
    );
    assert_err_contains(
        util.add_invoice_item(invoice_id, InvoiceItemDraft::new("Work", 0.0, 1.0))
            .await,
        "Amount must be positive",
    );
    assert_err_contains(
        util.add_invoice_item(invoice_id, InvoiceItemDraft::new("Work", 1.0, -5.0))
            .await,
        "Cost per unit must be positive",
    );
    assert!(util.list_invoice_items(invoice_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_records_are_reported() {
    let (_dir, util) = setup();
    let (sender_id, client_id) = sender_and_client(&util).await;

    assert_err_contains(
        util.get_sender(SenderId(99)).await,
        "Sender with ID 99 not found",
    );
    assert_err_contains(
        util.create_invoice(draft(sender_id, ClientId(42))).await,
        "Client with ID 42 not found",
    );
    assert_err_contains(
        util.create_invoice(InvoiceDraft {
            footer_message_id: Some(FooterMessageId(7)),
            ..draft(sender_id, client_id)
        })
        .await,
        "Footer message with ID 7 not found",
    );
    assert_err_contains(
        util.add_invoice_item(InvoiceId(5), InvoiceItemDraft::new("Work", 1.0, 1.0))
            .await,
        "Invoice with ID 5 not found",
    );
    assert_err_contains(
        util.set_invoice_paid(InvoiceId(5), true).await,
        "Invoice with ID 5 not found",
    );
    assert_err_contains(
        util.generate_invoice_pdf(InvoiceId(5), None).await,
        "Invoice with ID 5 not found",
    );
}

#[tokio::test]
async fn invoice_update_repoints_records() {
    let (_dir, util) = setup();
    let (sender_id, client_id) = sender_and_client(&util).await;
    let invoice_id = util
        .create_invoice(draft(sender_id, client_id))
        .await
        .unwrap();
    let other_sender = util
        .create_sender(SenderDraft {
            name: "Initech".to_string(),
            ..SenderDraft::default()
        })
        .await
        .unwrap();
    let other_client = util
        .create_client(ClientDraft {
            name: "Umbrella".to_string(),
            ..ClientDraft::default()
        })
        .await
        .unwrap();
    let footer_id = util.create_footer_message("Net 30").await.unwrap();

    util.update_invoice(
        invoice_id,
        InvoiceDraft {
            sender_id: other_sender,
            client_id: other_client,
            footer_message_id: Some(footer_id),
            paid: true,
        },
    )
    .await
    .unwrap();

    let invoice = util.get_invoice(invoice_id).await.unwrap();
    assert_eq!(invoice.sender_id, other_sender);
    assert_eq!(invoice.client_id, other_client);
    assert_eq!(invoice.footer_message_id, Some(footer_id));
    assert!(invoice.paid);
    let view = util.get_invoice_document(invoice_id).await.unwrap().view;
    assert_eq!(view.sender_name.as_deref(), Some("Initech"));
    assert_eq!(view.client_name.as_deref(), Some("Umbrella"));
    assert_eq!(view.footer_message.as_deref(), Some("Net 30"));
}

#[tokio::test]
async fn invoice_update_checks_references() {
    let (_dir, util) = setup();
    let (sender_id, client_id) = sender_and_client(&util).await;
    let invoice_id = util
        .create_invoice(draft(sender_id, client_id))
        .await
        .unwrap();

    assert_err_contains(
        util.update_invoice(invoice_id, draft(SenderId(77), client_id))
            .await,
        "Sender with ID 77 not found",
    );
    assert_err_contains(
        util.update_invoice(
            invoice_id,
            InvoiceDraft {
                footer_message_id: Some(FooterMessageId(8)),
                ..draft(sender_id, client_id)
            },
        )
        .await,
        "Footer message with ID 8 not found",
    );
    let invoice = util.get_invoice(invoice_id).await.unwrap();
    assert_eq!(invoice.sender_id, sender_id);
    assert_eq!(invoice.footer_message_id, None);
}

#[tokio::test]
async fn updates_of_missing_records_are_not_found() {
    let (_dir, util) = setup();
    let (sender_id, client_id) = sender_and_client(&util).await;

    assert_err_contains(
        util.update_sender(
            SenderId(9),
            SenderDraft {
                name: "Nobody".to_string(),
                ..SenderDraft::default()
            },
        )
        .await,
        "Sender with ID 9 not found",
    );
    assert_err_contains(
        util.update_client(
            ClientId(9),
            ClientDraft {
                name: "Nobody".to_string(),
                ..ClientDraft::default()
            },
        )
        .await,
        "Client with ID 9 not found",
    );
    assert_err_contains(
        util.update_footer_message(FooterMessageId(9), "Gone").await,
        "Footer message with ID 9 not found",
    );
    assert_err_contains(
        util.update_invoice(InvoiceId(9), draft(sender_id, client_id))
            .await,
        "Invoice with ID 9 not found",
    );
    assert!(util.list_invoices().await.unwrap().is_empty());
}

#[tokio::test]
async fn invoice_document_aggregates_records() {
    let (_dir, util) = setup();
    let id = seed_sample_invoice(&util).await.unwrap();

    let document = util.get_invoice_document(id).await.unwrap();
    assert_eq!(document.view.sender_name.as_deref(), Some(SAMPLE_SENDER_NAME));
    assert_eq!(document.view.client_name.as_deref(), Some(SAMPLE_CLIENT_NAME));
    assert!(document.view.footer_message.is_some());
    assert!(!document.view.paid);
    let names: Vec<_> = document.lines.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Web Development", "Consulting Services", "Design Work"]
    );
    assert_eq!(document.totals.subtotal, 4250.0);
    assert_eq!(document.totals.total, 4250.0);
}

#[tokio::test]
async fn paid_flag_and_listing() {
    let (_dir, util) = setup();
    let (sender_id, client_id) = sender_and_client(&util).await;
    let first = util
        .create_invoice(draft(sender_id, client_id))
        .await
        .unwrap();
    let second = util
        .create_invoice(draft(sender_id, client_id))
        .await
        .unwrap();

    util.set_invoice_paid(first, true).await.unwrap();

    assert!(util.get_invoice(first).await.unwrap().paid);
    let summaries = util.list_invoices().await.unwrap();
    let ids: Vec<_> = summaries.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![second, first]);
    assert_eq!(summaries[0].sender_name, "Acme");
    assert_eq!(summaries[0].client_name, "Globex");
    assert!(summaries[1].paid);
}

#[tokio::test]
async fn pdf_is_written_with_default_name() {
    let (dir, util) = setup();
    let id = seed_sample_invoice(&util).await.unwrap();

    let path = util.generate_invoice_pdf(id, None).await.unwrap();

    assert_eq!(path.parent(), Some(dir.path().join("out").as_path()));
    let file_name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with(&format!("invoice_{id}_")));
    assert!(file_name.ends_with(".pdf"));
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn pdf_is_written_to_explicit_path() {
    let (dir, util) = setup();
    let (sender_id, client_id) = sender_and_client(&util).await;
    let id = util
        .create_invoice(draft(sender_id, client_id))
        .await
        .unwrap();
    let output = dir.path().join("empty.pdf");

    let path = util
        .generate_invoice_pdf(id, Some(output.clone()))
        .await
        .unwrap();

    assert_eq!(path, output);
    assert!(std::fs::read(&output).unwrap().starts_with(b"%PDF"));
}

#[tokio::test]
async fn long_invoice_renders() {
    let (_dir, util) = setup();
    let (sender_id, client_id) = sender_and_client(&util).await;
    let footer_id = util
        .create_footer_message(&"Please remit payment promptly. ".repeat(40))
        .await
        .unwrap();
    let id = util
        .create_invoice(InvoiceDraft {
            footer_message_id: Some(footer_id),
            ..draft(sender_id, client_id)
        })
        .await
        .unwrap();
    for i in 0..120 {
        util.add_invoice_item(
            id,
            InvoiceItemDraft::new(
                format!("Item {i} with a fairly long description that needs wrapping"),
                1.5,
                19.99,
            ),
        )
        .await
        .unwrap();
    }

    let bytes = util.render_invoice_pdf(id).await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn text_rendition_shows_template() {
    let (_dir, util) = setup();
    let id = seed_sample_invoice(&util).await.unwrap();

    let text = util.print_invoice_text(id).await.unwrap();

    assert!(text.contains("INVOICE"));
    assert!(text.contains("UNPAID"));
    assert!(text.contains(SAMPLE_SENDER_NAME));
    assert!(text.contains("$4,250.00"));
    assert!(text.contains("Notes:"));
}

#[tokio::test]
async fn csv_export_lists_totals() {
    let (_dir, util) = setup();
    let id = seed_sample_invoice(&util).await.unwrap();

    let csv = util.export_invoices_csv().await.unwrap();

    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("id,date,sender,client,paid,total"));
    let row = lines.next().unwrap();
    assert!(row.starts_with(&format!("{id},")));
    assert!(row.ends_with(",4250.00"));
    assert_eq!(lines.next(), None);
}

#[tokio::test]
async fn csv_export_without_invoices_has_header() {
    let (_dir, util) = setup();
    assert_eq!(
        util.export_invoices_csv().await.unwrap(),
        "id,date,sender,client,paid,total\n"
    );
}

#[tokio::test]
async fn a4_pdf_renders() {
    let dir = tempfile::tempdir().unwrap();
    let config = InvoicingConfig {
        database_path: dir.path().join("invoices.db"),
        output_dir: dir.path().to_path_buf(),
        page_size: PageSize::A4,
        ..InvoicingConfig::default()
    };
    let util = InvoicingUtil::open(&config).unwrap();
    let id = seed_sample_invoice(&util).await.unwrap();

    let path = util.generate_invoice_pdf(id, None).await.unwrap();

    assert!(std::fs::read(path).unwrap().starts_with(b"%PDF"));
}

#[tokio::test]
async fn records_survive_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let config = InvoicingConfig {
        database_path: dir.path().join("invoices.db"),
        ..InvoicingConfig::default()
    };

    let id = {
        let util = InvoicingUtil::open(&config).unwrap();
        seed_sample_invoice(&util).await.unwrap()
    };

    let util = InvoicingUtil::open(&config).unwrap();
    assert_eq!(util.list_invoice_items(id).await.unwrap().len(), 3);
}
