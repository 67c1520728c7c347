//! Flat, byte-oriented transaction encoding.
//!
//! These functions take already-split fields and produce the exact wire bytes. Lengths and
//! counts use a single-byte prefix, so anything of 253 or more is refused with an
//! `EncodingError` rather than truncated. Use the typed model in `types` when full compact-size
//! support is needed.

use thiserror::Error;
use tracing::trace;

use crate::{
    hashes::{hash256, Hash256},
    types::witness::WitnessProgram,
};

/// The largest length or count that fits the single-byte prefix.
pub const MAX_SINGLE_BYTE_LEN: usize = 0xfc;

/// The version written by `compute_txid`.
pub const TXID_VERSION: i32 = 1;

/// Errors raised by the flat encoders.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// A script does not fit the single-byte length prefix.
    #[error("Script of {0} bytes does not fit a single-byte length prefix")]
    ScriptTooLong(usize),

    /// Too many inputs or outputs for the single-byte count prefix.
    #[error("{count} {what} do not fit a single-byte count prefix")]
    TooManyItems {
        /// "inputs" or "outputs"
        what: &'static str,
        /// The number supplied
        count: usize,
    },

    /// A txid was not 32 bytes long.
    #[error("Txid must be 32 bytes. Got {0}.")]
    BadTxidLength(usize),

    /// A hex argument did not decode.
    #[error("Invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

fn single_byte_len(len: usize) -> Result<u8, EncodingError> {
    if len > MAX_SINGLE_BYTE_LEN {
        return Err(EncodingError::ScriptTooLong(len));
    }
    Ok(len as u8)
}

fn single_byte_count(what: &'static str, count: usize) -> Result<u8, EncodingError> {
    if count > MAX_SINGLE_BYTE_LEN {
        return Err(EncodingError::TooManyItems { what, count });
    }
    Ok(count as u8)
}

/// Compute the witness program for `script`: one `version` byte followed by the sha2 of the
/// script. No length prefix is added.
///
/// ```
/// use rawtx_codec::compute_witness_program;
///
/// let program = compute_witness_program(&[0x51], 0);
/// assert_eq!(program.len(), 33);
/// assert_eq!(program[0], 0);
/// ```
pub fn compute_witness_program(script: &[u8], version: u8) -> Vec<u8> {
    WitnessProgram::from_script(script, version).to_vec()
}

/// Serialize one transaction input.
///
/// `txid` is given in display (big-endian) order and is reversed into wire order. The output is
/// `txid (32, reversed) || index (4, LE) || len(script_sig) (1) || script_sig || sequence (4, LE)`.
pub fn encode_input(
    txid: &[u8],
    output_index: u32,
    script_sig: &[u8],
    sequence: u32,
) -> Result<Vec<u8>, EncodingError> {
    if txid.len() != 32 {
        return Err(EncodingError::BadTxidLength(txid.len()));
    }
    let script_sig_len = single_byte_len(script_sig.len())?;

    let mut input = Vec::with_capacity(41 + script_sig.len());
    input.extend(txid.iter().rev());
    input.extend_from_slice(&output_index.to_le_bytes());
    trace!(outpoint = %hex::encode(&input), "encoded outpoint");

    input.push(script_sig_len);
    input.extend_from_slice(script_sig);
    input.extend_from_slice(&sequence.to_le_bytes());
    trace!(script_sig_len, "encoded input");
    Ok(input)
}

/// Serialize one transaction output: `value (8, LE) || len(script) (1) || script`.
pub fn encode_output(script: &[u8], value: u64) -> Result<Vec<u8>, EncodingError> {
    let script_len = single_byte_len(script.len())?;

    let mut output = Vec::with_capacity(9 + script.len());
    output.extend_from_slice(&value.to_le_bytes());
    output.push(script_len);
    output.extend_from_slice(script);
    Ok(output)
}

/// Compute the txid of a version 1, locktime 0 transaction from pre-encoded inputs and outputs.
/// Witnesses are not part of the preimage. Returns the digest byte-reversed and hex-encoded, as
/// shown by block explorers.
pub fn compute_txid<I, O>(inputs: &[I], outputs: &[O]) -> Result<String, EncodingError>
where
    I: AsRef<[u8]>,
    O: AsRef<[u8]>,
{
    let input_count = single_byte_count("inputs", inputs.len())?;
    let output_count = single_byte_count("outputs", outputs.len())?;

    let mut w = Hash256::default();
    let version = TXID_VERSION.to_le_bytes();
    w.update(&version);
    trace!(version = %hex::encode(version), "txid preimage version");

    w.update(&[input_count]);
    trace!(input_count, "txid preimage input count");
    for input in inputs {
        w.update(input.as_ref());
        trace!(input = %hex::encode(input), "appended input bytes");
    }

    w.update(&[output_count]);
    trace!(output_count, "txid preimage output count");
    for output in outputs {
        w.update(output.as_ref());
        trace!(output = %hex::encode(output), "appended output bytes");
    }

    w.update(&0u32.to_le_bytes());

    let mut digest = w.finalize();
    digest.reverse();
    let txid = hex::encode(digest);
    trace!(%txid, "computed txid");
    Ok(txid)
}

/// Double-sha2 the bytes encoded by `hex_str`, reverse, and hex-encode. Applied to a full
/// serialized transaction this is its wtxid.
pub fn double_sha256_reversed(hex_str: &str) -> Result<String, EncodingError> {
    let bytes = hex::decode(hex_str.trim())?;
    let mut digest = hash256(&bytes);
    digest.reverse();
    Ok(hex::encode(digest))
}
