//! In-memory auth backend
//!
//! Issues random tokens and mirrors the error statuses of the hosted auth
//! API closely enough for the session service tests. Failure switches let
//! tests simulate an unreachable backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use super::{AuthGateway, SignUpOutcome};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Session, SessionUser, UserId, UserMetadata};

struct Account {
    password: String,
    user: SessionUser,
}

#[derive(Default)]
struct AuthState {
    accounts: HashMap<String, Account>,
    access_tokens: HashMap<String, UserId>,
    refresh_tokens: HashMap<String, UserId>,
}

/// Auth backend held entirely in memory
pub struct InMemoryAuth {
    state: RwLock<AuthState>,
    session_ttl: RwLock<Duration>,
    require_confirmation: bool,
    offline_sign_out: AtomicBool,
    sign_outs: AtomicUsize,
}

impl Default for InMemoryAuth {
    fn default() -> Self {
        Self {
            state: RwLock::new(AuthState::default()),
            session_ttl: RwLock::new(Duration::hours(1)),
            require_confirmation: false,
            offline_sign_out: AtomicBool::new(false),
            sign_outs: AtomicUsize::new(0),
        }
    }
}

fn lock_error<E: std::fmt::Display>(e: E) -> TrackerError {
    TrackerError::Storage(format!("Failed to acquire lock: {}", e))
}

fn remote(status: u16, message: &str) -> TrackerError {
    TrackerError::Remote {
        status,
        message: message.to_string(),
    }
}

impl InMemoryAuth {
    /// Backend that signs users in straight after sign-up
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that asks new users to confirm their e-mail first
    pub fn with_confirmation() -> Self {
        Self {
            require_confirmation: true,
            ..Self::default()
        }
    }

    /// Seed an account and return its user
    pub fn register(&self, email: &str, password: &str, full_name: &str) -> SessionUser {
        let user = SessionUser {
            id: UserId::new(),
            email: email.to_string(),
            user_metadata: UserMetadata {
                full_name: Some(full_name.to_string()),
            },
        };
        if let Ok(mut state) = self.state.write() {
            state.accounts.insert(
                email.to_lowercase(),
                Account {
                    password: password.to_string(),
                    user: user.clone(),
                },
            );
        }
        user
    }

    /// Lifetime of sessions issued from now on
    pub fn set_session_ttl(&self, ttl: Duration) {
        if let Ok(mut current) = self.session_ttl.write() {
            *current = ttl;
        }
    }

    /// Make `sign_out` fail as if the network were down
    pub fn set_offline_sign_out(&self, offline: bool) {
        self.offline_sign_out.store(offline, Ordering::SeqCst);
    }

    /// Number of sign-out calls received
    pub fn sign_out_calls(&self) -> usize {
        self.sign_outs.load(Ordering::SeqCst)
    }

    /// Revoke a refresh token so the next refresh fails
    pub fn revoke_refresh_token(&self, refresh_token: &str) {
        if let Ok(mut state) = self.state.write() {
            state.refresh_tokens.remove(refresh_token);
        }
    }

    fn issue(&self, state: &mut AuthState, user: SessionUser) -> TrackerResult<Session> {
        let ttl = *self.session_ttl.read().map_err(lock_error)?;
        let access_token = Uuid::new_v4().simple().to_string();
        let refresh_token = Uuid::new_v4().simple().to_string();

        state.access_tokens.insert(access_token.clone(), user.id);
        state.refresh_tokens.insert(refresh_token.clone(), user.id);

        Ok(Session {
            access_token,
            refresh_token,
            expires_at: Utc::now() + ttl,
            user,
        })
    }

    fn user_by_id(state: &AuthState, id: UserId) -> Option<SessionUser> {
        state
            .accounts
            .values()
            .find(|a| a.user.id == id)
            .map(|a| a.user.clone())
    }
}

#[async_trait]
impl AuthGateway for InMemoryAuth {
    async fn current_user(&self, access_token: &str) -> TrackerResult<SessionUser> {
        let state = self.state.read().map_err(lock_error)?;
        state
            .access_tokens
            .get(access_token)
            .and_then(|id| Self::user_by_id(&state, *id))
            .ok_or_else(|| remote(401, "Invalid token"))
    }

    async fn sign_in(&self, email: &str, password: &str) -> TrackerResult<Session> {
        let mut state = self.state.write().map_err(lock_error)?;
        let user = match state.accounts.get(&email.to_lowercase()) {
            Some(account) if account.password == password => account.user.clone(),
            _ => return Err(remote(400, "Invalid login credentials")),
        };
        self.issue(&mut state, user)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> TrackerResult<SignUpOutcome> {
        if self
            .state
            .read()
            .map_err(lock_error)?
            .accounts
            .contains_key(&email.to_lowercase())
        {
            return Err(remote(422, "User already registered"));
        }

        let user = self.register(email, password, full_name);
        if self.require_confirmation {
            return Ok(SignUpOutcome::ConfirmationRequired(user));
        }

        let mut state = self.state.write().map_err(lock_error)?;
        self.issue(&mut state, user).map(SignUpOutcome::SignedIn)
    }

    async fn refresh(&self, refresh_token: &str) -> TrackerResult<Session> {
        let mut state = self.state.write().map_err(lock_error)?;
        let user = state
            .refresh_tokens
            .remove(refresh_token)
            .and_then(|id| Self::user_by_id(&state, id))
            .ok_or_else(|| remote(400, "Invalid Refresh Token: Refresh Token Not Found"))?;
        self.issue(&mut state, user)
    }

    async fn sign_out(&self, access_token: &str) -> TrackerResult<()> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        if self.offline_sign_out.load(Ordering::SeqCst) {
            return Err(TrackerError::Network("connection refused".into()));
        }

        let mut state = self.state.write().map_err(lock_error)?;
        state
            .access_tokens
            .remove(access_token)
            .map(|_| ())
            .ok_or_else(|| remote(401, "Invalid token"))
    }
}
