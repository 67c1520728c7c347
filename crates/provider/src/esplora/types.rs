use rawtx_codec::prelude::*;

/// Confirmation status as reported by the explorer.
#[derive(serde::Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TxStatus {
    /// Whether the transaction is in a block
    pub confirmed: bool,
    /// Height of the confirming block
    #[serde(default)]
    pub block_height: Option<u64>,
    /// BE hash of the confirming block
    #[serde(default)]
    pub block_hash: Option<String>,
}

/// The output an input spends, as embedded by the explorer.
#[derive(serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EsploraPrevout {
    /// Hex script pubkey
    pub scriptpubkey: String,
    /// Value in satoshis
    pub value: u64,
}

/// An input of the explorer's JSON transaction view.
#[derive(serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EsploraTxIn {
    /// Txid being spent. BE hex in JSON, held in internal order.
    pub txid: Txid,
    /// Index in the spent transaction's vout
    pub vout: u32,
    /// Hex script sig. Empty for native segwit spends.
    #[serde(default)]
    pub scriptsig: String,
    /// Hex witness stack items
    #[serde(default)]
    pub witness: Vec<String>,
    /// The spent output, absent for coinbase inputs
    #[serde(default)]
    pub prevout: Option<EsploraPrevout>,
    /// Whether this is a coinbase input
    #[serde(default)]
    pub is_coinbase: bool,
    /// nSequence
    pub sequence: u32,
}

/// An output of the explorer's JSON transaction view.
#[derive(serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EsploraTxOut {
    /// Hex script pubkey
    pub scriptpubkey: String,
    /// Value in satoshis
    pub value: u64,
}

/// The explorer's JSON view of a transaction, as served by `GET /tx/{txid}`.
#[derive(serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EsploraTx {
    /// BE txid. Not every producer of this view includes it.
    #[serde(default)]
    pub txid: Option<Txid>,
    /// Transaction version
    pub version: i32,
    /// nLocktime
    pub locktime: u32,
    /// Inputs
    pub vin: Vec<EsploraTxIn>,
    /// Outputs
    pub vout: Vec<EsploraTxOut>,
    /// Confirmation status
    #[serde(default)]
    pub status: Option<TxStatus>,
}

impl EsploraTx {
    /// Rebuild the legacy transaction from the JSON fields. Its `txid()` is computed locally, not
    /// copied from the `txid` field.
    pub fn to_legacy(&self) -> SerResult<LegacyTx> {
        let vin = self
            .vin
            .iter()
            .map(|i| {
                Ok(TxInput::new(
                    Outpoint::new(i.txid, i.vout),
                    ScriptSig::from_hex(&i.scriptsig)?,
                    i.sequence,
                ))
            })
            .collect::<SerResult<Vec<_>>>()?;
        let vout = self
            .vout
            .iter()
            .map(|o| Ok(TxOutput::new(o.value, ScriptPubkey::from_hex(&o.scriptpubkey)?)))
            .collect::<SerResult<Vec<_>>>()?;
        Ok(LegacyTx::new(self.version, vin, vout, self.locktime))
    }

    /// True if any input carries witness data.
    pub fn has_witness(&self) -> bool {
        self.vin.iter().any(|i| !i.witness.is_empty())
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    pub(crate) static JSON_TX: &str = r#"{
        "version": 1,
        "locktime": 0,
        "vin": [
            {
                "txid": "d1283ec7f6a2bcb65a5905033168258ca282e806c9dc7164415519a5ef041b14",
                "vout": 0,
                "prevout": {
                    "scriptpubkey": "76a91496bc8310635539000a65a7cc95cb773c0cc7009788ac",
                    "scriptpubkey_asm": "OP_DUP OP_HASH160 OP_PUSHBYTES_20 96bc8310635539000a65a7cc95cb773c0cc70097 OP_EQUALVERIFY OP_CHECKSIG",
                    "scriptpubkey_type": "p2pkh",
                    "scriptpubkey_address": "1Ek2BpKHUbr6SrrWq4P3Tf2jB6UCST2bwx",
                    "value": 1103367
                },
                "scriptsig": "4730440220200b9a61529151f9f264a04e9aa17bb6e1d53fb345747c44885b1e185a82c17502200e41059f8ab4d3b3709dcb91b050c344b06c5086f05598d62bc06a8b746db4290121025f0ba0cdc8aa97ec1fffd01fac34d3a7f700baf07658048263a2c925825e8d33",
                "scriptsig_asm": "OP_PUSHBYTES_71 30440220200b9a61529151f9f264a04e9aa17bb6e1d53fb345747c44885b1e185a82c17502200e41059f8ab4d3b3709dcb91b050c344b06c5086f05598d62bc06a8b746db42901 OP_PUSHBYTES_33 025f0ba0cdc8aa97ec1fffd01fac34d3a7f700baf07658048263a2c925825e8d33",
                "is_coinbase": false,
                "sequence": 4294967295
            }
        ],
        "vout": [
            {
                "scriptpubkey": "76a914e5977cf916acdba010b9d847b9682135aa3ea81a88ac",
                "scriptpubkey_asm": "OP_DUP OP_HASH160 OP_PUSHBYTES_20 e5977cf916acdba010b9d847b9682135aa3ea81a OP_EQUALVERIFY OP_CHECKSIG",
                "scriptpubkey_type": "p2pkh",
                "scriptpubkey_address": "1MvyDWhroVV7BAL1twmwvY88DdvBEmPbG7",
                "value": 1100665
            }
        ]
    }"#;

    #[test]
    fn it_recomputes_the_txid_from_json() {
        let tx: EsploraTx = serde_json::from_str(JSON_TX).unwrap();
        assert!(tx.txid.is_none());
        assert!(!tx.has_witness());
        assert_eq!(tx.vin[0].prevout.as_ref().map(|p| p.value), Some(1103367));

        let legacy = tx.to_legacy().unwrap();
        assert_eq!(
            legacy.txid().to_be_hex(),
            "ff58846e06d32ccbc92dc8055499a5700dbac3278322de87584a5641e14dd84e"
        );
        assert_eq!(
            legacy.inputs()[0].outpoint.txid_be_hex(),
            "d1283ec7f6a2bcb65a5905033168258ca282e806c9dc7164415519a5ef041b14"
        );
    }

    #[test]
    fn it_rejects_bad_script_hex() {
        let mut tx: EsploraTx = serde_json::from_str(JSON_TX).unwrap();
        tx.vout[0].scriptpubkey = "76a9zz".to_owned();
        assert!(matches!(tx.to_legacy(), Err(SerError::FromHexError(_))));
    }
}
