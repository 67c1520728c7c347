use thiserror::Error;

use rawtx_codec::{EncodingError, SerError};
use rawtx_provider::FetchError;

/// A line of the records file that could not be parsed.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The line did not split into `txid,wtxid,label`.
    #[error("line {line}: expected 3 comma-separated fields, found {found}")]
    WrongFieldCount {
        /// 1-based line number
        line: usize,
        /// Number of fields found
        found: usize,
    },

    /// A txid or wtxid field was not a 32-byte BE hex digest.
    #[error("line {line}: bad {field}: {source}")]
    BadDigest {
        /// 1-based line number
        line: usize,
        /// "txid" or "wtxid"
        field: &'static str,
        /// The underlying decode error
        source: SerError,
    },
}

impl RecordError {
    /// The 1-based line number the error refers to.
    pub fn line(&self) -> usize {
        match self {
            RecordError::WrongFieldCount { line, .. } => *line,
            RecordError::BadDigest { line, .. } => *line,
        }
    }
}

/// A fetched transaction whose identifiers could not be computed.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body did not hash as hex.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The body did not decode as a transaction.
    #[error(transparent)]
    Ser(#[from] SerError),
}

/// Errors that stop a check run before any record is checked.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Reading the records failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A record did not parse.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// The HTTP client could not be configured.
    #[error(transparent)]
    Client(#[from] FetchError),
}
