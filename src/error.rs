use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("listing container not found: `{selector}`")]
    ContainerNotFound { selector: String },
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("could not read input {source_ref}: {reason}")]
    Input { source_ref: String, reason: String },
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    pub fn input(source_ref: &str, reason: impl ToString) -> Self {
        ScrapeError::Input {
            source_ref: source_ref.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Failure to fetch a single product page. Always recovered into an error row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("HTTP status {status}")]
    Status { status: u16 },
    #[error("failed to read response: {0}")]
    Body(String),
    #[error("timed out after {ms}ms")]
    Timeout { ms: u64 },
}

/* Conversions so `?` works smoothly inside the fetch tool.
   Deadlines are mapped by the fetcher, which knows the configured timeout. */
impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_body() || e.is_decode() {
            FetchError::Body(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}
