//! # rawtx codec
//!
//! `rawtx-codec` reproduces the Bitcoin raw transaction wire format byte for
//! byte, and computes the identifiers derived from it.
//!
//! ## Crate Layout
//!
//! ### Encode
//!
//! The `encode` module holds the flat, byte-oriented operations: serializing a
//! single input or output from its fields, building the witness program for a
//! P2WSH output, and hashing pre-encoded inputs and outputs into a txid. These
//! use the single-byte length prefix and return an `EncodingError` instead of
//! truncating when a length does not fit.
//!
//! ### Ser trait
//!
//! The `ByteFormat` trait is a simple serialization API using
//! `std::io::{Read, Write}`. Implementers define the binary serialization
//! format of the type. The typed transaction model in `types` implements it
//! with full compact-size support.
//!
//! ### Hashes
//!
//! The hashes module provides the Bitcoin double-sha2 writer and the marked
//! digest newtypes `Txid` and `Wtxid`. Marked digests are stored in internal
//! (little-endian) byte order. Use `to_be_hex` / `from_be_hex` to move between
//! them and the big-endian form shown by block explorers.
//!
//! ### Types
//!
//! `LegacyTx` is the non-witness transaction whose hash is the txid. `RawTx`
//! decodes a full transaction as served by a node, segwit or not, and exposes
//! both its txid and its wtxid.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

#[macro_use]
pub mod macros;

pub mod encode;
pub mod hashes;
pub mod ser;
pub mod types;

pub use encode::*;
pub use hashes::{Hash256, Hash256Digest, MarkedDigest, Txid, Wtxid};
pub use ser::{ByteFormat, SerError, SerResult};
pub use types::*;

/// Common re-exports
pub mod prelude {
    pub use crate::encode::*;
    pub use crate::hashes::*;
    pub use crate::ser::*;
    pub use crate::types::*;
}
