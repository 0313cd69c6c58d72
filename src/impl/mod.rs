// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod invoices_datasource;
        pub(crate) mod parties_datasource;
        pub(crate) mod sqlite_connection;
    }
    pub(crate) mod models {
        pub(crate) mod invoice_row_model;
        pub(crate) mod timestamp_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod invoicing_repository_impl;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod footer_message;
        pub(crate) mod invoice;
        pub(crate) mod invoice_view;
        pub(crate) mod party;
    }
    pub(crate) mod logic {
        pub(crate) mod totals;
        pub(crate) mod validation;
    }
    pub(crate) mod repositories {
        pub(crate) mod invoicing_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod invoice_document_usecase;
        pub(crate) mod records_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod invoice_csv_printer;
    pub(crate) mod invoice_layout;
    pub(crate) mod invoice_style;
    pub(crate) mod invoice_text_printer;
    pub(crate) mod pdf_writer;
    pub(crate) mod text_metrics;
    pub(crate) mod utils;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::footer_message::*;
        pub use crate::domain::entities::invoice::*;
        pub use crate::domain::entities::invoice_view::*;
        pub use crate::domain::entities::party::*;
    }
}
