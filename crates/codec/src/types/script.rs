//! Compact-size prefixed script types.

use crate::hashes::sha256;

wrap_prefixed_byte_vector!(
    /// A ScriptSig is the unlocking script carried in a legacy input. It is empty for inputs
    /// spending native witness outputs.
    ScriptSig
);

wrap_prefixed_byte_vector!(
    /// A ScriptPubkey is the locking script attached to an output.
    ScriptPubkey
);

wrap_prefixed_byte_vector!(
    /// A WitnessScript is the script committed to by a P2WSH output.
    WitnessScript
);

wrap_prefixed_byte_vector!(
    /// A single item of a witness stack.
    WitnessStackItem
);

/// A witness stack: one per input of a segwit transaction.
pub type Witness = Vec<WitnessStackItem>;

impl ScriptPubkey {
    /// Build the version 0 P2WSH script pubkey (`OP_0 OP_PUSHBYTES_32 <sha256(script)>`)
    /// committing to `script`.
    pub fn p2wsh(script: &WitnessScript) -> Self {
        let mut v = Vec::with_capacity(34);
        v.push(0x00);
        v.push(0x20);
        v.extend_from_slice(&sha256(script.items()));
        v.into()
    }

    /// True if this is a version 0 P2WSH script pubkey.
    pub fn is_p2wsh(&self) -> bool {
        self.len() == 34 && self[0] == 0x00 && self[1] == 0x20
    }
}

impl std::ops::Index<usize> for ScriptPubkey {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.items()[index]
    }
}
