//! Authentication gate.

use std::sync::Arc;
use std::time::Duration;

use crate::{AuthError, IdentityProvider, Session};

/// Decides whether the current session is authenticated.
///
/// Never raises for "not authenticated": a missing identity, an identity
/// that is not authenticated, or a resolution still pending when the
/// optional timeout elapses all resolve to an unauthenticated session.
/// Only provider failures surface as errors.
#[derive(Clone)]
pub struct AuthGate {
    provider: Arc<dyn IdentityProvider>,
    resolve_timeout: Option<Duration>,
}

impl AuthGate {
    /// Create a gate over an identity provider.
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            resolve_timeout: None,
        }
    }

    /// Bound how long to wait for the provider.
    pub fn with_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout = Some(timeout);
        self
    }

    /// Resolve the current session.
    pub async fn resolve(&self) -> Result<Session, AuthError> {
        let lookup = self.provider.current_identity();
        let identity = match self.resolve_timeout {
            Some(limit) => match tokio::time::timeout(limit, lookup).await {
                Ok(result) => result?,
                Err(_) => {
                    tracing::warn!(?limit, "identity still pending, treating as anonymous");
                    None
                }
            },
            None => lookup.await?,
        };

        let session = Session::from(identity);
        tracing::debug!(authenticated = session.is_authenticated(), "session resolved");
        Ok(session)
    }

    /// True only if a resolved identity exists and reports itself authenticated.
    pub async fn is_authorized(&self) -> Result<bool, AuthError> {
        Ok(self.resolve().await?.is_authenticated())
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("resolve_timeout", &self.resolve_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DeferredIdentityProvider, Identity, StaticIdentityProvider};
    use turbo_commerce::ids::UserId;

    fn gate(provider: StaticIdentityProvider) -> AuthGate {
        AuthGate::new(Arc::new(provider))
    }

    #[tokio::test]
    async fn test_authenticated_identity_is_authorized() {
        let gate = gate(StaticIdentityProvider::new(Identity::authenticated(
            UserId::new(1),
            "Bob",
        )));
        assert!(gate.is_authorized().await.unwrap());
    }

    #[tokio::test]
    async fn test_anonymous_identity_is_not_authorized() {
        let gate = gate(StaticIdentityProvider::new(Identity::anonymous()));
        assert!(!gate.is_authorized().await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_identity_is_not_authorized() {
        assert!(!gate(StaticIdentityProvider::none())
            .is_authorized()
            .await
            .unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_identity_times_out_as_anonymous() {
        let (provider, _resolver) = DeferredIdentityProvider::pending();
        let gate = AuthGate::new(Arc::new(provider))
            .with_resolve_timeout(Duration::from_millis(50));

        assert!(!gate.is_authorized().await.unwrap());
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let (provider, resolver) = DeferredIdentityProvider::pending();
        resolver.fail("boom");

        let gate = AuthGate::new(Arc::new(provider));
        assert!(gate.is_authorized().await.unwrap_err().is_resolution_failure());
    }
}
