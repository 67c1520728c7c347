use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;

use rawtx_codec::{Txid, Wtxid};

use crate::error::FetchError;

/// Anything that can serve the full serialized transaction for a txid.
#[async_trait]
pub trait TxSource: Send + Sync {
    /// Fetch the hex-encoded transaction, witnesses included, identified by `txid`.
    async fn fetch_tx_hex(&self, txid: &Txid) -> Result<String, FetchError>;
}

#[async_trait]
impl<T> TxSource for Arc<T>
where
    T: TxSource + ?Sized,
{
    async fn fetch_tx_hex(&self, txid: &Txid) -> Result<String, FetchError> {
        (**self).fetch_tx_hex(txid).await
    }
}

/// A `TxSource` serving transactions held in memory. Unknown txids answer as a 404 would.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    txs: HashMap<Txid, String>,
}

impl MemorySource {
    /// An empty source.
    pub fn new() -> Self {
        Default::default()
    }

    /// Serve `tx_hex` for `txid`. Replaces any previous entry.
    pub fn insert(&mut self, txid: Txid, tx_hex: &str) {
        self.txs.insert(txid, tx_hex.to_owned());
    }

    /// Decode `tx_hex` and serve it under its own txid. Returns the txid and wtxid.
    pub fn insert_raw(&mut self, tx_hex: &str) -> rawtx_codec::SerResult<(Txid, Wtxid)> {
        let tx = rawtx_codec::RawTx::from_hex(tx_hex)?;
        let txid = tx.txid();
        self.insert(txid, tx_hex);
        Ok((txid, tx.wtxid()))
    }

    /// The number of transactions held.
    pub fn len(&self) -> usize {
        self.txs.len()
    }

    /// True if no transactions are held.
    pub fn is_empty(&self) -> bool {
        self.txs.is_empty()
    }
}

#[async_trait]
impl TxSource for MemorySource {
    async fn fetch_tx_hex(&self, txid: &Txid) -> Result<String, FetchError> {
        self.txs
            .get(txid)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: format!("memory:/tx/{}/hex", txid),
                status: 404,
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    static LEGACY: &str = "0100000001141b04efa51955416471dcc906e882a28c2568310305595ab6bca2f6c73e28d1000000006a4730440220200b9a61529151f9f264a04e9aa17bb6e1d53fb345747c44885b1e185a82c17502200e41059f8ab4d3b3709dcb91b050c344b06c5086f05598d62bc06a8b746db4290121025f0ba0cdc8aa97ec1fffd01fac34d3a7f700baf07658048263a2c925825e8d33ffffffff0179cb1000000000001976a914e5977cf916acdba010b9d847b9682135aa3ea81a88ac00000000";

    #[tokio::test]
    async fn it_serves_inserted_transactions() {
        let mut source = MemorySource::new();
        let (txid, wtxid) = source.insert_raw(LEGACY).unwrap();
        assert_eq!(
            txid.to_be_hex(),
            "ff58846e06d32ccbc92dc8055499a5700dbac3278322de87584a5641e14dd84e"
        );
        assert_eq!(txid.0, wtxid.0);
        assert_eq!(source.len(), 1);

        let shared = Arc::new(source);
        assert_eq!(shared.fetch_tx_hex(&txid).await.unwrap(), LEGACY);
    }

    #[tokio::test]
    async fn it_answers_404_for_unknown_txids() {
        let source = MemorySource::new();
        let err = source.fetch_tx_hex(&Txid::default()).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert!(!err.is_retryable());
    }
}
