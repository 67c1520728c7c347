//! Fetch raw Bitcoin transactions over HTTP, with bounded retries.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Fetch errors and their retry classification
pub mod error;

/// The transaction source trait
pub mod provider;

/// Retry policy and the retry loop
pub mod retry;

/// Esplora HTTP client
pub mod esplora;

pub use error::*;
pub use esplora::{EsploraClient, EsploraTx, DEFAULT_API_ROOT};
pub use provider::*;
pub use retry::*;
