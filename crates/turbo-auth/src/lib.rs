//! Authentication module for TurboCommerce.
//!
//! Resolves the current session from an identity provider and answers
//! whether it is authenticated.

mod error;
mod gate;
mod identity;
mod provider;

pub use error::AuthError;
pub use gate::AuthGate;
pub use identity::{Identity, Session};
pub use provider::{
    DeferredIdentityProvider, IdentityProvider, IdentityResolver, StaticIdentityProvider,
};
