use thiserror::Error;

/// Malformed field values found in raw ESI records.
///
/// Recovered locally by the transformer: the affected column is stored as null and the rest of
/// the record is kept.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Invalid transaction date {value:?}: {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
