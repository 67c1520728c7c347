use digest::Digest;
use sha2::Sha256;
use std::io::{Result as IOResult, Write};

use crate::hashes::marked::MarkedDigest;

/// A 32-byte digest, as output by sha2 and double-sha2.
pub type Hash256Digest = [u8; 32];

/// A struct that exposes a Bitcoin-style Hash256 `Write` interface by wrapping an internal SHA2
/// instance.
///
/// ```
/// use std::io::Write;
/// use rawtx_codec::hashes::{Hash256, Txid};
///
/// let mut w = Hash256::default();
/// # let data = [0u8; 32];
///
/// // Writing more than once will update the hasher.
/// w.write_all(&data).unwrap();
///
/// // Call finalize to consume the hasher and produce the digest.
/// let txid: Txid = w.finalize_marked();
/// ```
#[derive(Default)]
pub struct Hash256 {
    internal: Sha256,
}

impl Hash256 {
    /// Feed `data` to the hasher. Infallible, unlike the `Write` interface.
    pub fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.internal, data);
    }

    /// Consume the writer and produce the double-sha2 digest, in internal byte order.
    pub fn finalize(self) -> Hash256Digest {
        let first = self.internal.finalize();
        Sha256::digest(first).into()
    }

    /// Consume the writer and produce a marked digest.
    pub fn finalize_marked<M: MarkedDigest>(self) -> M {
        M::new(self.finalize())
    }
}

impl Write for Hash256 {
    fn write(&mut self, buf: &[u8]) -> IOResult<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> IOResult<()> {
        Ok(())
    }
}

/// Single sha2 of `data`.
pub fn sha256(data: &[u8]) -> Hash256Digest {
    Sha256::digest(data).into()
}

/// Bitcoin double-sha2 of `data`, in internal byte order.
pub fn hash256(data: &[u8]) -> Hash256Digest {
    Sha256::digest(Sha256::digest(data)).into()
}
