//! Legacy Transactions

use std::io::{Read, Write};

use crate::{
    hashes::{Hash256, Txid},
    ser::{ByteFormat, SerError, SerResult},
    types::{
        txin::{TxInput, Vin},
        txout::{TxOutput, Vout},
    },
};

/// A Legacy (non-witness) Transaction. Its serialization is the txid preimage, for segwit
/// transactions as well as legacy ones.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct LegacyTx {
    /// The version number. Usually 1 or 2.
    pub(crate) version: i32,
    /// The vector of inputs
    pub(crate) vin: Vin,
    /// The vector of outputs
    pub(crate) vout: Vout,
    /// The nLocktime field.
    pub(crate) locktime: u32,
}

impl Default for LegacyTx {
    fn default() -> Self {
        Self::new(1, vec![], vec![], 0)
    }
}

impl LegacyTx {
    /// Instantiate a new transaction
    pub fn new<I, O>(version: i32, vin: I, vout: O, locktime: u32) -> Self
    where
        I: Into<Vin>,
        O: Into<Vout>,
    {
        Self {
            version,
            vin: vin.into(),
            vout: vout.into(),
            locktime,
        }
    }

    /// The version number.
    pub fn version(&self) -> i32 {
        self.version
    }

    /// The inputs.
    pub fn inputs(&self) -> &[TxInput] {
        &self.vin
    }

    /// The outputs.
    pub fn outputs(&self) -> &[TxOutput] {
        &self.vout
    }

    /// The nLocktime field.
    pub fn locktime(&self) -> u32 {
        self.locktime
    }

    /// Calculate the txid: the double-sha2 of the legacy serialization.
    pub fn txid(&self) -> Txid {
        let mut w = Hash256::default();
        self.write_to(&mut w)
            .expect("No IOError from hash functions");
        w.finalize_marked()
    }
}

impl ByteFormat for LegacyTx {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        let mut len = 4; // version
        len += Self::prefixed_length(&self.vin);
        len += Self::prefixed_length(&self.vout);
        len += 4; // locktime
        len
    }

    fn read_from<R>(reader: &mut R, _limit: usize) -> SerResult<Self>
    where
        R: Read,
        Self: std::marker::Sized,
    {
        let version = Self::read_u32_le(reader)? as i32;
        let vin = Self::read_prefix_vec(reader)?;
        let vout = Self::read_prefix_vec(reader)?;
        let locktime = Self::read_u32_le(reader)?;
        Ok(Self {
            version,
            vin,
            vout,
            locktime,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write,
    {
        let mut len = Self::write_u32_le(writer, self.version as u32)?;
        len += Self::write_prefix_vec(writer, &self.vin)?;
        len += Self::write_prefix_vec(writer, &self.vout)?;
        len += Self::write_u32_le(writer, self.locktime)?;
        Ok(len)
    }
}

impl LegacyTx {
    fn prefixed_length<T: ByteFormat>(items: &[T]) -> usize {
        let body: usize = items.iter().map(ByteFormat::serialized_length).sum();
        crate::ser::prefix_byte_len(items.len() as u64) as usize + body
    }
}
