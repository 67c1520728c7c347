//! Segwit witness programs.
//!
//! See [BIP141](https://github.com/bitcoin/bips/blob/master/bip-0141.mediawiki#p2wsh).

use crate::{
    hashes::{sha256, Hash256Digest},
    types::script::{ScriptPubkey, WitnessScript},
};

/// A witness program committing to a witness script: a version byte and the sha2 of the script.
#[derive(serde::Serialize, serde::Deserialize, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct WitnessProgram {
    /// The witness version. 0 for P2WSH. Not validated.
    pub version: u8,
    /// The sha2 digest of the witness script.
    pub hash: Hash256Digest,
}

impl WitnessProgram {
    /// Commit to `script` under witness `version`.
    pub fn from_script(script: &[u8], version: u8) -> Self {
        Self {
            version,
            hash: sha256(script),
        }
    }

    /// The 33-byte program: version byte followed by the 32-byte hash. No length prefix.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut v = Vec::with_capacity(33);
        v.push(self.version);
        v.extend_from_slice(&self.hash);
        v
    }

    /// The script pubkey paying to this program. Only meaningful for version 0.
    pub fn script_pubkey(&self) -> ScriptPubkey {
        let mut v = Vec::with_capacity(34);
        v.push(self.version);
        v.push(0x20);
        v.extend_from_slice(&self.hash);
        v.into()
    }
}

impl From<&WitnessScript> for WitnessProgram {
    fn from(script: &WitnessScript) -> Self {
        Self::from_script(script.items(), 0)
    }
}
