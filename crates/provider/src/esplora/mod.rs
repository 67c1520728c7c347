mod types;
mod utils;

pub use types::*;

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use rawtx_codec::Txid;

use crate::{error::FetchError, provider::TxSource, retry::RetryPolicy};

/// The default Esplora API root
pub const DEFAULT_API_ROOT: &str = "https://mempool.space/api";

/// A client for an Esplora-style HTTP API. Every fetch is retried according to its
/// `RetryPolicy`.
///
/// ```no_run
/// # async fn example() -> Result<(), rawtx_provider::FetchError> {
/// use std::time::Duration;
/// use rawtx_provider::{EsploraClient, RetryPolicy, TxSource};
///
/// let client = EsploraClient::default()
///     .with_api_root("http://mempoolhiddenservice.onion/api")
///     .with_retry_policy(RetryPolicy::fixed(10, Duration::from_secs(5)))
///     .with_proxy("socks5h://127.0.0.1:9050")?;
/// let txid = "ff58846e06d32ccbc92dc8055499a5700dbac3278322de87584a5641e14dd84e".parse().unwrap();
/// let tx_hex = client.fetch_tx_hex(&txid).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EsploraClient {
    api_root: String,
    client: reqwest::Client,
    retry: RetryPolicy,
    proxy: Option<String>,
    timeout: Option<Duration>,
}

impl Default for EsploraClient {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_owned(),
            client: Default::default(),
            retry: Default::default(),
            proxy: None,
            timeout: None,
        }
    }
}

impl EsploraClient {
    /// Point the client at a specific API root, such as `https://blockstream.info/api`.
    pub fn with_api_root(mut self, api_root: &str) -> Self {
        self.api_root = api_root.trim_end_matches('/').to_owned();
        self
    }

    /// Replace the retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Route every request through `proxy`, for example `socks5h://127.0.0.1:9050` to reach an
    /// onion service over Tor.
    pub fn with_proxy(mut self, proxy: &str) -> Result<Self, FetchError> {
        self.proxy = Some(proxy.to_owned());
        self.client = self.build_client()?;
        Ok(self)
    }

    /// Bound each request, connection included, by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, FetchError> {
        self.timeout = Some(timeout);
        self.client = self.build_client()?;
        Ok(self)
    }

    /// The API root in use.
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// The retry policy in use.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(proxy) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy).map_err(FetchError::Client)?);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(FetchError::Client)
    }

    /// Fetch the explorer's JSON view of a transaction. `EsploraTx::to_legacy` rebuilds the
    /// transaction from it.
    pub async fn fetch_tx_json(&self, txid: &Txid) -> Result<EsploraTx, FetchError> {
        let url = format!("{}/tx/{}", self.api_root, txid.to_be_hex());
        utils::fetch_json_with(&self.retry, |attempt| {
            debug!(attempt, %url, "fetching tx json");
            utils::ez_fetch_string(&self.client, &url)
        })
        .await
    }
}

#[async_trait]
impl TxSource for EsploraClient {
    async fn fetch_tx_hex(&self, txid: &Txid) -> Result<String, FetchError> {
        let txid_be = txid.to_be_hex();
        self.retry
            .run(|attempt| {
                debug!(attempt, txid = %txid_be, api_root = %self.api_root, "fetching tx hex");
                utils::fetch_tx_hex(&self.client, &self.api_root, &txid_be)
            })
            .await
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_configures_the_client() {
        let client = EsploraClient::default();
        assert_eq!(client.api_root(), DEFAULT_API_ROOT);
        assert_eq!(client.retry_policy().max_attempts(), 10);

        let client = client
            .with_api_root("http://localhost:3000/api/")
            .with_retry_policy(RetryPolicy::none());
        assert_eq!(client.api_root(), "http://localhost:3000/api");
        assert_eq!(client.retry_policy().max_attempts(), 1);
    }

    #[test]
    fn it_accepts_socks_proxies_and_timeouts() {
        let client = EsploraClient::default()
            .with_proxy("socks5h://127.0.0.1:9050")
            .unwrap()
            .with_timeout(Duration::from_secs(30))
            .unwrap();
        assert_eq!(client.proxy.as_deref(), Some("socks5h://127.0.0.1:9050"));
        assert_eq!(client.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn it_rejects_unparseable_proxies() {
        assert!(matches!(
            EsploraClient::default().with_proxy("http://[::1"),
            Err(FetchError::Client(_))
        ));
    }

    #[tokio::test]
    async fn it_reports_connection_failures_after_the_budget() {
        // nothing listens on port 9 of the loopback interface
        let client = EsploraClient::default()
            .with_api_root("http://127.0.0.1:9/api")
            .with_retry_policy(RetryPolicy::fixed(2, Duration::ZERO));
        let err = client.fetch_tx_hex(&Txid::default()).await.unwrap_err();
        match err {
            FetchError::Exhausted { attempts, source } => {
                assert_eq!(attempts, 2);
                assert!(source.is_retryable());
            }
            other => panic!("expected Exhausted, got {:?}", other),
        }
    }
}
