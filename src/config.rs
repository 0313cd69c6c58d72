use std::{
    fs,
    path::{Path, PathBuf},
};

use fractic_server_error::ServerError;
use iso_currency::Currency;

use crate::errors::{InvalidIsoCurrencyCode, InvalidRon, ReadError};

pub const DEFAULT_CONFIG_PATH: &str = "invoicing.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde_derive::Deserialize)]
pub enum PageSize {
    #[default]
    Letter,
    A4,
}

/// Settings read from a RON file, for example:
///
/// ```ron
/// (
///     database_path: "invoices.db",
///     output_dir: "pdf",
///     currency: "EUR",
///     page_size: A4,
/// )
/// ```
///
/// Every field is optional.
#[derive(Debug, Clone, PartialEq, serde_derive::Deserialize)]
#[serde(default)]
pub struct InvoicingConfig {
    pub database_path: PathBuf,
    pub output_dir: PathBuf,
    /// ISO 4217 code used to print amounts.
    pub currency: String,
    pub page_size: PageSize,
}

impl Default for InvoicingConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("invoices.db"),
            output_dir: PathBuf::from("."),
            currency: "USD".to_string(),
            page_size: PageSize::default(),
        }
    }
}

impl InvoicingConfig {
    pub fn from_string(s: &str) -> Result<Self, ServerError> {
        let config: Self =
            ron::from_str(s).map_err(|e| InvalidRon::with_debug("InvoicingConfig", &e))?;
        config.currency()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ServerError> {
        Self::from_string(&fs::read_to_string(path).map_err(|e| ReadError::with_debug(&e))?)
    }

    /// Read `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ServerError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.as_ref().display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn currency(&self) -> Result<Currency, ServerError> {
        Currency::from_code(self.currency.trim())
            .ok_or_else(|| InvalidIsoCurrencyCode::new(&self.currency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(
            InvoicingConfig::from_string("()").unwrap(),
            InvoicingConfig::default()
        );
    }

    #[test]
    fn parses_every_field() {
        let config = InvoicingConfig::from_string(
            r#"(
                database_path: "data/books.db",
                output_dir: "out",
                currency: "EUR",
                page_size: A4,
            )"#,
        )
        .unwrap();
        assert_eq!(config.database_path, PathBuf::from("data/books.db"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.currency().unwrap(), Currency::EUR);
        assert_eq!(config.page_size, PageSize::A4);
    }

    #[test]
    fn rejects_unknown_currency() {
        assert!(InvoicingConfig::from_string(r#"(currency: "XYZQ")"#).is_err());
    }

    #[test]
    fn rejects_malformed_ron() {
        assert!(InvoicingConfig::from_string("(currency: ").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = InvoicingConfig::load_or_default(dir.path().join("nope.ron")).unwrap();
        assert_eq!(config, InvoicingConfig::default());
    }
}
