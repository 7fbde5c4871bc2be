//! Authenticated session model
//!
//! A session is the backend-issued proof of authentication. Every expense and
//! profile call is scoped to `session.user.id`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::ids::UserId;

/// Metadata stored on the auth user at sign-up
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// The authenticated user attached to a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// An active session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: SessionUser,
}

impl Session {
    /// Tokens are treated as expired slightly early so a request does not
    /// race the backend's own expiry check
    const EXPIRY_MARGIN_SECS: i64 = 30;

    /// Owner id for all scoped calls
    pub fn user_id(&self) -> UserId {
        self.user.id
    }

    /// Check whether the access token should be refreshed before use
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(Self::EXPIRY_MARGIN_SECS) <= now
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.access_token.zeroize();
        self.refresh_token.zeroize();
    }
}
