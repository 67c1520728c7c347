use crate::hashes::Hash256Digest;

/// A marked digest wraps a 32-byte digest so that digests with different meanings cannot be
/// confused for one another.
pub trait MarkedDigest: Default + Copy + Eq {
    /// Wrap a digest.
    fn new(hash: Hash256Digest) -> Self;

    /// Return a copy of the internal digest.
    fn internal(&self) -> Hash256Digest;

    /// Return a new instance with the byte order reversed.
    fn reversed(&self) -> Self {
        let mut digest = self.internal();
        digest.reverse();
        Self::new(digest)
    }
}
