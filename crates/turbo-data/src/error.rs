//! Remote fetch error types.

use thiserror::Error;

/// Errors returned by the catalog and cart APIs.
///
/// A bulk lookup with no results is not an error: `CatalogApi::get_items`
/// returns `Ok(None)` for it. A single-product lookup for a missing id
/// comes back from the backend as a bad request, and stays one here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend rejected the request as malformed.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The backend failed while serving the request.
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    /// Any other non-success response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid URL or client configuration.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Build the error for a non-success status code.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 => FetchError::BadRequest(message),
            404 => FetchError::NotFound(message),
            500..=599 => FetchError::Server { status, message },
            _ => FetchError::HttpError { status, message },
        }
    }

    /// Check if this is a data-access failure rather than a lookup miss.
    pub fn is_data_access(&self) -> bool {
        !matches!(self, FetchError::NotFound(_) | FetchError::BadRequest(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::ParseError(e.to_string())
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::ParseError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            FetchError::from_status(400, "x"),
            FetchError::BadRequest("x".to_string())
        );
        assert_eq!(
            FetchError::from_status(404, "x"),
            FetchError::NotFound("x".to_string())
        );
        assert!(matches!(
            FetchError::from_status(503, "down"),
            FetchError::Server { status: 503, .. }
        ));
        assert!(matches!(
            FetchError::from_status(401, "no"),
            FetchError::HttpError { status: 401, .. }
        ));
    }

    #[test]
    fn test_data_access_classification() {
        assert!(!FetchError::NotFound("p".into()).is_data_access());
        assert!(!FetchError::BadRequest("p".into()).is_data_access());
        assert!(FetchError::Timeout.is_data_access());
        assert!(FetchError::from_status(500, "db").is_data_access());
    }
}
