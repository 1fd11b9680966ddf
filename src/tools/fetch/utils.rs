use crate::error::FetchError;
use reqwest::StatusCode;

/// Accept any 2xx response, whatever its body. An empty page just matches nothing.
pub(super) fn validate_response(status: StatusCode) -> Result<(), FetchError> {
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
        });
    }
    Ok(())
}

/// Map a transport failure, reporting the client deadline as a timeout.
pub(super) fn request_error(e: reqwest::Error, timeout_ms: u64) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout { ms: timeout_ms }
    } else {
        FetchError::from(e)
    }
}
