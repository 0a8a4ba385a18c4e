//! Storefront error types.

use thiserror::Error;
use turbo_auth::AuthError;
use turbo_cache::CacheError;
use turbo_data::FetchError;

/// Errors surfaced by the storefront state layer.
///
/// Each variant wraps the collaborator that failed; the page shows the
/// `Display` text in its error slot.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Local cache failure.
    #[error("Local storage error: {0}")]
    Cache(#[from] CacheError),

    /// Identity resolution failure.
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Remote API failure.
    #[error("{0}")]
    Fetch(#[from] FetchError),

    /// Invalid or unreadable configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result alias for storefront operations.
pub type StorefrontResult<T> = Result<T, StorefrontError>;
