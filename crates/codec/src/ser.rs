//! A simple trait for binary (de)Serialization using std `Read` and `Write` traits, plus the
//! Bitcoin compact-size integer used to prefix scripts and vectors.

use std::io::{Cursor, Error as IOError, Read, Write};

use thiserror::Error;

/// The largest compact-size length we will allocate for while deserializing. Anything longer
/// than a maximum-weight block cannot be part of a valid transaction.
pub const MAX_VECTOR_ALLOCATE: u64 = 4_000_000;

/// Errors related to serialization of types.
#[derive(Debug, Error)]
pub enum SerError {
    /// A compact size was encoded with a longer prefix than its value requires.
    #[error("Non-minimal compact size. Prefix {prefix:#04x} used for value {value}")]
    NonMinimalCompactSize {
        /// The prefix byte that was read
        prefix: u8,
        /// The decoded value
        value: u64,
    },

    /// A compact size length exceeded `MAX_VECTOR_ALLOCATE`.
    #[error("Compact size {0} exceeds the allocation limit")]
    LengthLimitExceeded(u64),

    /// Got an unknown flag where we expected a witness flag. May indicate a non-witness
    /// transaction.
    #[error("Witness flag not as expected. Got {:?}. Expected {:?}.", .0, [0u8, 1u8])]
    BadWitnessFlag([u8; 2]),

    /// The segwit marker and flag were present but every witness stack was empty.
    #[error("Segwit marker present but all witnesses are empty")]
    SuperfluousWitness,

    /// Deserialization finished before the end of the input.
    #[error("{0} unexpected trailing bytes")]
    TrailingBytes(usize),

    /// IOError bubbled up from a `Read` or `Write` passed to a `ByteFormat` implementation.
    #[error(transparent)]
    IOError(#[from] IOError),

    /// `deserialize_hex` encountered an error on its input.
    #[error("Error deserializing hex string")]
    FromHexError(#[from] hex::FromHexError),
}

/// Type alias for serialization errors
pub type SerResult<T> = Result<T, SerError>;

/// Calculates the minimum prefix length for a compact size encoding `number`
pub fn prefix_byte_len(number: u64) -> u8 {
    match number {
        0..=0xfc => 1,
        0xfd..=0xffff => 3,
        0x10000..=0xffff_ffff => 5,
        _ => 9,
    }
}

/// Matches the length of the compact size to the 1-byte flag
pub fn first_byte_from_len(number: u8) -> Option<u8> {
    match number {
        3 => Some(0xfd),
        5 => Some(0xfe),
        9 => Some(0xff),
        _ => None,
    }
}

/// Matches the compact size prefix flag to the serialized length
pub fn prefix_len_from_first_byte(number: u8) -> u8 {
    match number {
        0..=0xfc => 1,
        0xfd => 3,
        0xfe => 5,
        0xff => 9,
    }
}

/// Write `number` as a minimally-encoded compact size. Returns the number of bytes written.
pub fn write_compact_int<W>(writer: &mut W, number: u64) -> SerResult<usize>
where
    W: Write,
{
    let prefix_len = prefix_byte_len(number);
    match first_byte_from_len(prefix_len) {
        None => writer.write_all(&[number as u8])?,
        Some(prefix) => {
            let body = number.to_le_bytes();
            writer.write_all(&[prefix])?;
            writer.write_all(&body[..prefix_len as usize - 1])?;
        }
    };
    Ok(prefix_len as usize)
}

/// Read a compact size. Rejects encodings that are not minimal.
pub fn read_compact_int<R>(reader: &mut R) -> SerResult<u64>
where
    R: Read,
{
    let mut prefix = [0u8; 1];
    reader.read_exact(&mut prefix)?;
    let prefix_len = prefix_len_from_first_byte(prefix[0]);

    if prefix_len == 1 {
        return Ok(prefix[0] as u64);
    }

    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf[..prefix_len as usize - 1])?;
    let value = u64::from_le_bytes(buf);

    if prefix_byte_len(value) < prefix_len {
        return Err(SerError::NonMinimalCompactSize {
            prefix: prefix[0],
            value,
        });
    }
    Ok(value)
}

/// Read a compact-size prefixed byte vector.
pub fn read_prefixed_bytes<R>(reader: &mut R) -> SerResult<Vec<u8>>
where
    R: Read,
{
    let len = read_compact_int(reader)?;
    if len > MAX_VECTOR_ALLOCATE {
        return Err(SerError::LengthLimitExceeded(len));
    }
    let mut buf = vec![0u8; len as usize];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

/// Write a compact-size prefixed byte vector. Returns the number of bytes written.
pub fn write_prefixed_bytes<W>(writer: &mut W, bytes: &[u8]) -> SerResult<usize>
where
    W: Write,
{
    let written = write_compact_int(writer, bytes.len() as u64)?;
    writer.write_all(bytes)?;
    Ok(written + bytes.len())
}

/// A simple trait for deserializing from `std::io::Read` and serializing to `std::io::Write`.
///
/// `ByteFormat` is used for txid calculations, and transaction serialization and
/// deserialization.
pub trait ByteFormat {
    /// An associated error type
    type Error: From<SerError> + From<IOError> + std::error::Error;

    /// Returns the byte-length of the serialized data structure.
    fn serialized_length(&self) -> usize;

    /// Convenience function for reading a LE u32
    fn read_u32_le<R>(reader: &mut R) -> Result<u32, Self::Error>
    where
        R: Read,
    {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Convenience function for reading a LE u64
    fn read_u64_le<R>(reader: &mut R) -> Result<u64, Self::Error>
    where
        R: Read,
    {
        let mut buf = [0u8; 8];
        reader.read_exact(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    /// Convenience function for writing a LE u32
    fn write_u32_le<W>(writer: &mut W, number: u32) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        writer.write_all(&number.to_le_bytes())?;
        Ok(4)
    }

    /// Convenience function for writing a LE u64
    fn write_u64_le<W>(writer: &mut W, number: u64) -> Result<usize, Self::Error>
    where
        W: Write,
    {
        writer.write_all(&number.to_le_bytes())?;
        Ok(8)
    }

    /// Read a compact-size prefixed vector of `I`.
    fn read_prefix_vec<R, I>(reader: &mut R) -> Result<Vec<I>, Self::Error>
    where
        R: Read,
        I: ByteFormat,
        Self::Error: From<I::Error>,
    {
        let items = read_compact_int(reader)?;
        if items > MAX_VECTOR_ALLOCATE {
            return Err(SerError::LengthLimitExceeded(items).into());
        }
        let mut v = Vec::with_capacity(items.min(1024) as usize);
        for _ in 0..items {
            v.push(I::read_from(reader, 0)?);
        }
        Ok(v)
    }

    /// Write a compact-size prefixed vector of `I`.
    fn write_prefix_vec<W, I>(writer: &mut W, items: &[I]) -> Result<usize, Self::Error>
    where
        W: Write,
        I: ByteFormat,
        Self::Error: From<I::Error>,
    {
        let mut written = write_compact_int(writer, items.len() as u64)?;
        for item in items {
            written += item.write_to(writer)?;
        }
        Ok(written)
    }

    /// Deserializes an instance of `Self` from a `std::io::Read`.
    /// The `limit` argument is used only when deserializing collections, and specifies a
    /// maximum number of instances of the underlying type to read.
    fn read_from<R>(reader: &mut R, limit: usize) -> Result<Self, Self::Error>
    where
        R: Read,
        Self: std::marker::Sized;

    /// Serializes `Self` to a `std::io::Write`. Following `Write` trait conventions, its `Ok`
    /// type is a `usize` denoting the number of bytes written.
    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write;

    /// Decodes a hex string to a `Vec<u8>`, deserializes an instance of `Self` from that
    /// vector. Errors if any bytes are left over.
    fn deserialize_hex(s: &str) -> Result<Self, Self::Error>
    where
        Self: std::marker::Sized,
    {
        let v: Vec<u8> = hex::decode(s).map_err(SerError::from)?;
        let mut cursor = Cursor::new(&v[..]);
        let t = Self::read_from(&mut cursor, 0)?;
        let remaining = v.len() - cursor.position() as usize;
        if remaining != 0 {
            return Err(SerError::TrailingBytes(remaining).into());
        }
        Ok(t)
    }

    /// Serializes `self` to a vector
    fn serialize_vec(&self) -> Result<Vec<u8>, Self::Error> {
        let mut v: Vec<u8> = Vec::with_capacity(self.serialized_length());
        self.write_to(&mut v)?;
        Ok(v)
    }

    /// Serializes `self` to a vector, returns the hex-encoded vector
    fn serialize_hex(&self) -> Result<String, Self::Error> {
        Ok(hex::encode(self.serialize_vec()?))
    }
}
