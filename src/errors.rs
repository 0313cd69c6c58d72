use fractic_server_error::{define_client_error, define_internal_error};

// IO-related.
define_client_error!(ReadError, "Error reading file.");
define_internal_error!(WriteError, "Error writing file '{path}'.", { path: &str });

// Configuration-related.
define_client_error!(InvalidRon, "Invalid {ron_type} (invalid RON format).", { ron_type: &str });
define_client_error!(InvalidIsoCurrencyCode, "Invalid ISO currency code: {code}.", { code: &str });

// Storage-related.
define_internal_error!(DatabaseOpenFailed, "Could not open database '{path}'.", { path: &str });
define_internal_error!(DatabaseQueryFailed, "Database query failed: {operation}.", { operation: &str });
define_internal_error!(
    InvalidStoredTimestamp,
    "Invalid timestamp stored in database: '{value}'.",
    { value: &str }
);

// Validation-related.
define_client_error!(SenderNameRequired, "Sender name is required");
define_client_error!(ClientNameRequired, "Client name is required");
define_client_error!(FooterMessageRequired, "Footer message is required");
define_client_error!(ItemNameRequired, "Item name is required");
define_client_error!(AmountMustBePositive, "Amount must be positive");
define_client_error!(CostPerUnitMustBePositive, "Cost per unit must be positive");

// Lookup-related.
define_client_error!(SenderNotFound, "Sender with ID {id} not found", { id: i64 });
define_client_error!(ClientNotFound, "Client with ID {id} not found", { id: i64 });
define_client_error!(FooterMessageNotFound, "Footer message with ID {id} not found", { id: i64 });
define_client_error!(InvoiceNotFound, "Invoice with ID {id} not found", { id: i64 });

// Document generation.
define_internal_error!(PdfFontUnavailable, "Could not load built-in PDF font '{font}'.", { font: &str });
define_internal_error!(PdfEncodingFailed, "Could not encode PDF document '{title}'.", { title: &str });

// Export.
define_internal_error!(CsvExportFailed, "Could not export invoices to CSV.");
