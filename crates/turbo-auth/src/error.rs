//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The identity provider failed while resolving the current session.
    #[error("identity resolution failed: {0}")]
    Resolution(String),

    /// The identity provider was dropped before producing a value.
    #[error("identity provider closed before resolving")]
    ProviderClosed,
}

impl AuthError {
    /// Check if this error came from the upstream identity provider.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(self, AuthError::Resolution(_) | AuthError::ProviderClosed)
    }
}
