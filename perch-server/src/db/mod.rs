pub mod connection;
pub mod error;
pub mod repositories;
pub mod schema;

pub use connection::{with_write_retry, Database, DbConnection, DbPool};
pub use error::{Result, StoreError};

use chrono::{DateTime, Utc};
use perch_types::timestamp;

/// Parse a stored timestamp column inside a rusqlite row-mapping closure.
pub(crate) fn parse_ts(idx: usize, raw: String) -> rusqlite::Result<DateTime<Utc>> {
    timestamp::from_store(&raw).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
    })
}
