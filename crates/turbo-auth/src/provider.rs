//! Identity providers.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::{AuthError, Identity};

/// Asynchronous source of the current identity.
///
/// `Ok(None)` means the provider has no identity for this session.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the identity of the current session.
    async fn current_identity(&self) -> Result<Option<Identity>, AuthError>;
}

/// Provider that always yields the same identity.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    identity: Option<Identity>,
}

impl StaticIdentityProvider {
    /// Provider for a fixed identity.
    pub fn new(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// Provider with no identity at all.
    pub fn none() -> Self {
        Self { identity: None }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn current_identity(&self) -> Result<Option<Identity>, AuthError> {
        Ok(self.identity.clone())
    }
}

type Resolution = Option<Result<Option<Identity>, AuthError>>;

/// Provider whose identity becomes available later, through the paired
/// [`IdentityResolver`]. Callers suspend until it does.
#[derive(Debug, Clone)]
pub struct DeferredIdentityProvider {
    rx: watch::Receiver<Resolution>,
}

/// Completes a [`DeferredIdentityProvider`].
#[derive(Debug)]
pub struct IdentityResolver {
    tx: watch::Sender<Resolution>,
}

impl DeferredIdentityProvider {
    /// Create a pending provider and the handle that resolves it.
    pub fn pending() -> (Self, IdentityResolver) {
        let (tx, rx) = watch::channel(None);
        (Self { rx }, IdentityResolver { tx })
    }
}

impl IdentityResolver {
    /// Publish the identity. Later calls replace it.
    pub fn resolve(&self, identity: Option<Identity>) {
        self.tx.send_replace(Some(Ok(identity)));
    }

    /// Publish a resolution failure.
    pub fn fail(&self, message: impl Into<String>) {
        self.tx
            .send_replace(Some(Err(AuthError::Resolution(message.into()))));
    }
}

#[async_trait]
impl IdentityProvider for DeferredIdentityProvider {
    async fn current_identity(&self) -> Result<Option<Identity>, AuthError> {
        let mut rx = self.rx.clone();
        let resolved = rx
            .wait_for(Option::is_some)
            .await
            .map_err(|_| AuthError::ProviderClosed)?;
        match &*resolved {
            Some(result) => result.clone(),
            None => Err(AuthError::ProviderClosed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbo_commerce::ids::UserId;

    #[tokio::test]
    async fn test_static_provider() {
        let provider = StaticIdentityProvider::new(Identity::anonymous());
        assert_eq!(
            provider.current_identity().await.unwrap(),
            Some(Identity::anonymous())
        );
        assert!(StaticIdentityProvider::none()
            .current_identity()
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_deferred_provider_waits_for_resolution() {
        let (provider, resolver) = DeferredIdentityProvider::pending();

        let waiter = tokio::spawn(async move { provider.current_identity().await });
        tokio::task::yield_now().await;
        resolver.resolve(Some(Identity::authenticated(UserId::new(1), "Bob")));

        let identity = waiter.await.unwrap().unwrap().unwrap();
        assert!(identity.is_authenticated());
    }

    #[tokio::test]
    async fn test_deferred_provider_failure() {
        let (provider, resolver) = DeferredIdentityProvider::pending();
        resolver.fail("token endpoint unreachable");

        let err = provider.current_identity().await.unwrap_err();
        assert_eq!(
            err,
            AuthError::Resolution("token endpoint unreachable".to_string())
        );
    }

    #[tokio::test]
    async fn test_deferred_provider_dropped_resolver() {
        let (provider, resolver) = DeferredIdentityProvider::pending();
        drop(resolver);

        assert_eq!(
            provider.current_identity().await.unwrap_err(),
            AuthError::ProviderClosed
        );
    }
}
