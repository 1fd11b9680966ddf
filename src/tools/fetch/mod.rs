//! Fetch Tools

mod client;
mod headers;
mod utils;

use crate::config::FetchConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;

/// Source of raw product page markup.
///
/// The engine only sees this trait, so tests and alternative transports can
/// stand in for HTTP.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// [`PageFetcher`] over a single reusable `reqwest` client.
pub struct HttpFetcher {
    client: Client,
    timeout_ms: u64,
}

impl HttpFetcher {
    pub fn new(cfg: &FetchConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: client::build_client(cfg)?,
            timeout_ms: cfg.timeout_ms,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "reqwest"
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        fetch_with_client(&self.client, url, self.timeout_ms).await
    }
}

/// GET `url` and return its body; non-2xx statuses are errors.
///
/// `timeout_ms` is the deadline the client was built with. A request that
/// hits it fails with [`FetchError::Timeout`].
pub async fn fetch_with_client(
    client: &Client,
    url: &str,
    timeout_ms: u64,
) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| utils::request_error(e, timeout_ms))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| utils::request_error(e, timeout_ms))?;

    utils::validate_response(status)?;

    Ok(body)
}
