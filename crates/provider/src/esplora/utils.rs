use std::future::Future;

use serde::Deserialize;

use crate::{error::FetchError, retry::RetryPolicy};

pub(crate) async fn fetch_it(
    client: &reqwest::Client,
    url: &str,
) -> Result<reqwest::Response, FetchError> {
    let res = client.get(url).send().await?;
    let status = res.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_owned(),
            status: status.as_u16(),
        });
    }
    Ok(res)
}

/// Run `fetch_body` under `retry` and JSON deserialize the body it returns. A body that does
/// not deserialize is not retried.
pub(crate) async fn fetch_json_with<T, F, Fut>(
    retry: &RetryPolicy,
    mut fetch_body: F,
) -> Result<T, FetchError>
where
    T: for<'a> Deserialize<'a>,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<String, FetchError>>,
{
    retry
        .run(|attempt| {
            let body = fetch_body(attempt);
            async move { Ok(serde_json::from_str(&body.await?)?) }
        })
        .await
}

/// Easy fetching of a URL. Returns result as a String
pub(crate) async fn ez_fetch_string(
    client: &reqwest::Client,
    url: &str,
) -> Result<String, FetchError> {
    let res = fetch_it(client, url).await?;
    Ok(res.text().await?)
}

/// Fetch a raw hex transaction by its BE txid
pub(crate) async fn fetch_tx_hex(
    client: &reqwest::Client,
    api_root: &str,
    txid_be: &str,
) -> Result<String, FetchError> {
    let url = format!("{}/tx/{}/hex", api_root, txid_be);
    let body = ez_fetch_string(client, &url).await?;
    check_hex_body(&body).map(str::to_owned)
}

/// Trim the body and make sure it is non-empty, even-length hex.
pub(crate) fn check_hex_body(body: &str) -> Result<&str, FetchError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(FetchError::MalformedResponse("empty body".to_owned()));
    }
    hex::check(body).map_err(|e| FetchError::MalformedResponse(format!("{} in body", e)))?;
    Ok(body)
}
