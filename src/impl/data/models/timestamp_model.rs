use std::str::FromStr;

use chrono::NaiveDateTime;
use fractic_server_error::ServerError;

use crate::errors::InvalidStoredTimestamp;

/// SQLite `CURRENT_TIMESTAMP` format.
pub(crate) const SQLITE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug)]
pub(crate) struct TimestampModel(NaiveDateTime);
impl FromStr for TimestampModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Rows written by hand (or by older builds) may carry fractional seconds.
        let d = NaiveDateTime::parse_from_str(s, SQLITE_TIMESTAMP_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
            .map_err(|e| InvalidStoredTimestamp::with_debug(s, &e))?;
        Ok(TimestampModel(d))
    }
}

impl From<TimestampModel> for NaiveDateTime {
    fn from(value: TimestampModel) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike as _, Timelike as _};

    use super::*;

    #[test]
    fn parses_sqlite_current_timestamp() {
        let d: NaiveDateTime = TimestampModel::from_str("2024-01-15 10:30:00").unwrap().into();
        assert_eq!((d.year(), d.month(), d.day()), (2024, 1, 15));
        assert_eq!((d.hour(), d.minute()), (10, 30));
    }

    #[test]
    fn accepts_fractional_seconds() {
        assert!(TimestampModel::from_str("2024-01-15 10:30:00.250").is_ok());
    }

    #[test]
    fn rejects_garbage() {
        assert!(TimestampModel::from_str("yesterday").is_err());
        assert!(TimestampModel::from_str("2024-01-15").is_err());
    }
}
