//! Check expected `txid,wtxid,label` records against the transactions a server actually serves.
//!
//! Each record's txid is fetched from a `TxSource`, and the returned bytes are hashed into a
//! wtxid and decoded into a txid. Every record is checked, whatever happens to the ones before
//! it, and the results are collected into a `Report`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Validation loop and report
pub mod check;

/// Error types
pub mod error;

/// Records file parsing
pub mod records;

pub use check::*;
pub use error::*;
pub use records::*;
