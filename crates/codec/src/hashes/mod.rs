//! Holds utilites for working with cryptographic digests, and disambiguating digests via marker
//! traits.
//!
//! We want to wrap hashes in marked newtypes in order to prevent type-confusion between TXIDs,
//! WTXIDs, and other digests with the same length.

/// Marked hashes
pub mod marked;

/// Tooling for bitcoin-style double-sha2
pub mod hash256;

pub use hash256::*;
pub use marked::*;

mark_32_byte_hash!(
    /// A marked Hash256Digest representing transaction IDs. The hash of the legacy
    /// (non-witness) serialization.
    Txid
);

mark_32_byte_hash!(
    /// A marked Hash256Digest representing witness transaction IDs. The hash of the full
    /// serialization, including witnesses.
    Wtxid
);

#[cfg(test)]
mod test {
    use super::*;
    use crate::ser::ByteFormat;

    #[test]
    fn it_serializes_and_derializes_hash256digests() {
        let cases = [(
            Txid::default(),
            "0000000000000000000000000000000000000000000000000000000000000000",
        )];
        for case in cases.iter() {
            let digest = Txid::deserialize_hex(case.1).unwrap();
            assert_eq!(digest.serialized_length(), 32);
            assert_eq!(digest, case.0);
            assert_eq!(digest.serialize_hex().unwrap(), case.1);
            assert_eq!(case.0.serialize_hex().unwrap(), case.1);
        }
    }

    #[test]
    fn it_moves_between_be_and_le_hex() {
        let be = "d1283ec7f6a2bcb65a5905033168258ca282e806c9dc7164415519a5ef041b14";
        let le = "141b04efa51955416471dcc906e882a28c2568310305595ab6bca2f6c73e28d1";

        let txid = Txid::from_be_hex(be).unwrap();
        assert_eq!(txid.serialize_hex().unwrap(), le);
        assert_eq!(txid.to_be_hex(), be);
        assert_eq!(txid.to_string(), be);
        assert_eq!(be.parse::<Txid>().unwrap(), txid);
    }

    #[test]
    fn it_rejects_wrong_length_digests() {
        assert!(Txid::from_be_hex("d1283ec7").is_err());
        assert!(Wtxid::from_be_hex(&"00".repeat(33)).is_err());
        assert!(Txid::from_slice(&[0u8; 31]).is_none());
        assert!(Txid::from_slice(&[0u8; 32]).is_some());
    }

    #[test]
    fn it_reverses_marked_digests() {
        let be = "d1283ec7f6a2bcb65a5905033168258ca282e806c9dc7164415519a5ef041b14";
        let txid = Txid::from_be_hex(be).unwrap();
        let reversed = txid.reversed();
        assert_eq!(reversed.serialize_hex().unwrap(), be);
        assert_eq!(reversed.reversed(), txid);
        assert_eq!(Wtxid::new(txid.internal()).to_be_hex(), be);
    }

    #[test]
    fn it_uses_be_hex_for_serde() {
        let be = "ff58846e06d32ccbc92dc8055499a5700dbac3278322de87584a5641e14dd84e";
        let txid = Txid::from_be_hex(be).unwrap();
        let json = serde_json::to_string(&txid).unwrap();
        assert_eq!(json, format!("\"{}\"", be));
        assert_eq!(serde_json::from_str::<Txid>(&json).unwrap(), txid);
    }
}
