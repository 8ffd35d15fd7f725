use thiserror::Error;

/// Failure of a call to one of the external services (geocoder, tile servers).
/// Never fatal: the session turns these into status messages.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("connection error: {0}")]
    Connection(String),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("http client error: {0}")]
    Client(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ServiceError::Timeout(e.to_string())
        } else if e.is_connect() {
            ServiceError::Connection(e.to_string())
        } else if e.is_decode() {
            ServiceError::Malformed(e.to_string())
        } else if e.is_builder() {
            ServiceError::Client(e.to_string())
        } else {
            ServiceError::Connection(e.to_string())
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// At most this many characters of an error response body are kept
pub(crate) const BODY_EXCERPT_LEN: usize = 200;

pub(crate) fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_LEN).collect()
}
