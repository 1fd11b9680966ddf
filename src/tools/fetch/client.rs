use super::headers::default_headers;
use crate::config::FetchConfig;
use crate::error::FetchError;
use reqwest::{redirect, Client};
use std::time::Duration;

const REDIRECT_LIMIT: usize = 10;
const POOL_IDLE_TIMEOUT_SEC: u64 = 90;

/// Build the client shared by every request of a run.
pub(crate) fn build_client(cfg: &FetchConfig) -> Result<Client, FetchError> {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::limited(REDIRECT_LIMIT))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .timeout(Duration::from_millis(cfg.timeout_ms))
        .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SEC))
        .default_headers(default_headers(&cfg.user_agent))
        .build()
        .map_err(|e| FetchError::Request(format!("failed to build client: {e}")))
}
