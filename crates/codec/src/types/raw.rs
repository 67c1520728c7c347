//! Full transactions, as served by a node or block explorer.
//!
//! A `RawTx` keeps the bytes it was decoded from. The wtxid commits to exactly those bytes, so
//! witness data is read but never re-serialized.

use std::io::{Cursor, Read};

use crate::{
    hashes::{hash256, MarkedDigest, Txid, Wtxid},
    ser::{ByteFormat, SerError, SerResult},
    types::{
        legacy::LegacyTx,
        script::Witness,
        txin::{TxInput, Vin},
        txout::{TxOutput, Vout},
    },
};

/// Witness scale factor for weight units.
pub const WITNESS_SCALE_FACTOR: usize = 4;

/// A decoded full transaction: the legacy fields, and one witness stack per input if the segwit
/// marker and flag were present.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawTx {
    tx: LegacyTx,
    segwit: bool,
    witnesses: Vec<Witness>,
    raw: Vec<u8>,
}

impl RawTx {
    /// Decode a transaction from its full serialization. Errors on a bad segwit flag, a segwit
    /// marker with every witness empty, truncated input, or trailing bytes.
    pub fn from_bytes<T>(bytes: T) -> SerResult<Self>
    where
        T: Into<Vec<u8>>,
    {
        let raw = bytes.into();
        let (tx, segwit, witnesses) = Self::decode(&raw)?;
        tracing::trace!(
            size = raw.len(),
            segwit,
            inputs = tx.inputs().len(),
            outputs = tx.outputs().len(),
            "decoded raw transaction"
        );
        Ok(Self {
            tx,
            segwit,
            witnesses,
            raw,
        })
    }

    /// Decode a transaction from hex.
    pub fn from_hex(s: &str) -> SerResult<Self> {
        Self::from_bytes(hex::decode(s.trim())?)
    }

    fn decode(raw: &[u8]) -> SerResult<(LegacyTx, bool, Vec<Witness>)> {
        let mut cursor = Cursor::new(raw);
        let version = LegacyTx::read_u32_le(&mut cursor)? as i32;

        let mut marker = [0u8; 1];
        cursor.read_exact(&mut marker)?;
        let segwit = marker[0] == 0;
        if segwit {
            let mut flag = [0u8; 1];
            cursor.read_exact(&mut flag)?;
            if flag[0] != 1 {
                return Err(SerError::BadWitnessFlag([marker[0], flag[0]]));
            }
        } else {
            cursor.set_position(cursor.position() - 1);
        }

        let vin: Vin = LegacyTx::read_prefix_vec(&mut cursor)?;
        let vout: Vout = LegacyTx::read_prefix_vec(&mut cursor)?;

        let mut witnesses: Vec<Witness> = vec![];
        if segwit {
            for _ in 0..vin.len() {
                witnesses.push(LegacyTx::read_prefix_vec(&mut cursor)?);
            }
            if witnesses.iter().all(Vec::is_empty) {
                return Err(SerError::SuperfluousWitness);
            }
        }

        let locktime = LegacyTx::read_u32_le(&mut cursor)?;

        let remaining = raw.len() - cursor.position() as usize;
        if remaining != 0 {
            return Err(SerError::TrailingBytes(remaining));
        }

        Ok((LegacyTx::new(version, vin, vout, locktime), segwit, witnesses))
    }

    /// True if the transaction was serialized with the segwit marker and flag.
    pub fn is_segwit(&self) -> bool {
        self.segwit
    }

    /// The legacy (non-witness) view of the transaction.
    pub fn legacy(&self) -> &LegacyTx {
        &self.tx
    }

    /// The inputs.
    pub fn inputs(&self) -> &[TxInput] {
        self.tx.inputs()
    }

    /// The outputs.
    pub fn outputs(&self) -> &[TxOutput] {
        self.tx.outputs()
    }

    /// One witness stack per input. Empty for non-segwit transactions.
    pub fn witnesses(&self) -> &[Witness] {
        &self.witnesses
    }

    /// The bytes this transaction was decoded from.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// The txid. Hash of the legacy serialization, which excludes witnesses.
    pub fn txid(&self) -> Txid {
        self.tx.txid()
    }

    /// The wtxid. Hash of the full serialization. Equal to the txid for non-segwit
    /// transactions.
    pub fn wtxid(&self) -> Wtxid {
        Wtxid::new(hash256(&self.raw))
    }

    /// Total size in bytes, witness included.
    pub fn size(&self) -> usize {
        self.raw.len()
    }

    /// Size in bytes of the legacy serialization.
    pub fn base_size(&self) -> usize {
        self.tx.serialized_length()
    }

    /// Weight in weight units: `base_size * 3 + size`.
    pub fn weight(&self) -> usize {
        self.base_size() * (WITNESS_SCALE_FACTOR - 1) + self.size()
    }

    /// Virtual size: weight divided by 4, rounded up.
    pub fn vsize(&self) -> usize {
        (self.weight() + WITNESS_SCALE_FACTOR - 1) / WITNESS_SCALE_FACTOR
    }
}
