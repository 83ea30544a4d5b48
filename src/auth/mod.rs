//! Signing in and out.
//!
//! The external sign-in flows (Google, Apple) happen outside of this crate. An
//! `IdentityProvider` hands back the outcome of such a flow, normalized to a `User`, and the
//! `Session` keeps track of who is signed in and persists it through the `Store`.

mod providers;
mod session;

use crate::error::Res;
use crate::model::User;

pub use providers::{
    AppleCredential, AppleProvider, GoogleAuthResult, GoogleProfile, GoogleProvider,
    LocalProvider,
};
pub use session::{Session, SessionEvent};

/// The boundary to an external sign-in flow.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// A short name for logs, e.g. `google`.
    fn name(&self) -> &str;

    /// Runs the flow. Returns `Ok(None)` when the person cancelled it.
    async fn authenticate(&self) -> Res<Option<User>>;
}
