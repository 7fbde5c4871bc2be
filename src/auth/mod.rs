//! Authentication seam
//!
//! [`AuthGateway`] is what the session service needs from an auth backend.
//! The HTTP implementation lives in [`crate::remote::auth`]; an in-memory
//! implementation backs the service tests.

pub mod biometric;
pub mod memory;

use async_trait::async_trait;

use crate::error::TrackerResult;
use crate::models::{Session, SessionUser};

pub use biometric::{Biometric, ScriptedBiometric, Unavailable};
pub use memory::InMemoryAuth;

/// Result of a sign-up request
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    /// The account is active and signed in
    SignedIn(Session),
    /// The backend sent a confirmation e-mail; no session yet
    ConfirmationRequired(SessionUser),
}

/// Operations offered by the auth backend
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// The user owning `access_token`
    async fn current_user(&self, access_token: &str) -> TrackerResult<SessionUser>;

    /// Password sign-in
    async fn sign_in(&self, email: &str, password: &str) -> TrackerResult<Session>;

    /// Create an account, storing `full_name` in the user metadata
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> TrackerResult<SignUpOutcome>;

    /// Exchange a refresh token for a new session
    async fn refresh(&self, refresh_token: &str) -> TrackerResult<Session>;

    /// Revoke the session owning `access_token`
    async fn sign_out(&self, access_token: &str) -> TrackerResult<()>;
}
