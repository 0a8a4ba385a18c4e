//! Identity and session values.

use serde::{Deserialize, Serialize};
use turbo_commerce::ids::UserId;

/// The identity attached to a session, as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User the identity belongs to, if known.
    pub user_id: Option<UserId>,
    /// Display name.
    pub name: Option<String>,
    /// Whether the provider vouches for this identity.
    pub authenticated: bool,
}

impl Identity {
    /// An identity the provider does not vouch for.
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            name: None,
            authenticated: false,
        }
    }

    /// An authenticated identity for a user.
    pub fn authenticated(user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id),
            name: Some(name.into()),
            authenticated: true,
        }
    }

    /// Check if the identity reports itself authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

/// The current session, resolved once per page activation and passed
/// explicitly to whatever needs it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    identity: Option<Identity>,
}

impl Session {
    /// A session with a resolved identity.
    pub fn new(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// A session without any identity.
    pub fn unresolved() -> Self {
        Self { identity: None }
    }

    /// The resolved identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// True only when an identity exists and reports itself authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.identity
            .as_ref()
            .is_some_and(Identity::is_authenticated)
    }

    /// User id of an authenticated session.
    pub fn user_id(&self) -> Option<UserId> {
        self.identity
            .as_ref()
            .filter(|i| i.is_authenticated())
            .and_then(|i| i.user_id)
    }
}

impl From<Option<Identity>> for Session {
    fn from(identity: Option<Identity>) -> Self {
        Self { identity }
    }
}
