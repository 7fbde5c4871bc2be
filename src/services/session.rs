//! Session service
//!
//! Owns the sign-in lifecycle: password sign-in with the optional biometric
//! gate, sign-up, sign-out and restoring the persisted session on later
//! commands.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::auth::{AuthGateway, Biometric, SignUpOutcome};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Session, SessionUser};
use crate::storage::{RepositoryProvider, SessionStore};
use crate::validation::{validate_registration, validate_sign_in, RegistrationForm, SignInForm};

const BIOMETRIC_REASON: &str = "Confirm your identity to sign in";

/// Service for authentication and session persistence
pub struct SessionService<'a> {
    auth: &'a dyn AuthGateway,
    store: &'a SessionStore,
    repositories: &'a dyn RepositoryProvider,
    biometric: &'a dyn Biometric,
    biometric_enabled: bool,
}

impl<'a> SessionService<'a> {
    /// Create a new session service
    pub fn new(
        auth: &'a dyn AuthGateway,
        store: &'a SessionStore,
        repositories: &'a dyn RepositoryProvider,
        biometric: &'a dyn Biometric,
        biometric_enabled: bool,
    ) -> Self {
        Self {
            auth,
            store,
            repositories,
            biometric,
            biometric_enabled,
        }
    }

    /// The persisted session, refreshed if it has expired
    pub async fn current_session(&self) -> TrackerResult<Session> {
        self.current_session_at(Utc::now()).await
    }

    /// Same as [`Self::current_session`] with an explicit clock
    ///
    /// An expired session gets exactly one refresh attempt. If that fails
    /// the stored session is dropped and the user has to sign in again.
    pub async fn current_session_at(&self, now: DateTime<Utc>) -> TrackerResult<Session> {
        let session = self.store.load()?.ok_or(TrackerError::NoSession)?;
        if !session.is_expired(now) {
            return Ok(session);
        }

        debug!(user = %session.user_id(), "session expired, refreshing");
        match self.auth.refresh(&session.refresh_token).await {
            Ok(renewed) => {
                self.store.save(&renewed)?;
                Ok(renewed)
            }
            Err(e) => {
                warn!(error = %e, "session refresh failed");
                self.store.clear()?;
                Err(TrackerError::NoSession)
            }
        }
    }

    /// The stored session together with the user the backend reports for it
    ///
    /// A token the backend rejects is dropped like a failed refresh.
    pub async fn verified_user(&self) -> TrackerResult<(Session, SessionUser)> {
        let session = self.current_session().await?;
        match self.auth.current_user(&session.access_token).await {
            Ok(user) => Ok((session, user)),
            Err(e) if e.requires_login() => {
                warn!(error = %e, "stored session rejected by the backend");
                self.store.clear()?;
                Err(TrackerError::NoSession)
            }
            Err(e) => Err(e),
        }
    }

    /// Sign in with e-mail and password
    pub async fn sign_in(&self, form: &SignInForm) -> TrackerResult<Session> {
        let email = validate_sign_in(form)?;
        let session = self.auth.sign_in(&email, &form.password).await?;

        if self.biometric_enabled {
            self.confirm_biometric(&session).await?;
        }

        self.store.save(&session)?;
        info!(user = %session.user_id(), "session stored");
        Ok(session)
    }

    async fn confirm_biometric(&self, session: &Session) -> TrackerResult<()> {
        if !self.biometric.is_available() {
            warn!("biometric sign-in is enabled but no biometric device is available");
            return Ok(());
        }

        if self.biometric.authenticate(BIOMETRIC_REASON) {
            return Ok(());
        }

        // The password was right, so a session exists remotely; revoke it
        if let Err(e) = self.auth.sign_out(&session.access_token).await {
            warn!(error = %e, "could not revoke session after biometric failure");
        }
        Err(TrackerError::Biometric(
            "identity could not be confirmed".into(),
        ))
    }

    /// Register a new account
    ///
    /// When the backend signs the user in straight away the session is
    /// stored and the profile row is written with the chosen full name.
    pub async fn sign_up(&self, form: &RegistrationForm) -> TrackerResult<SignUpOutcome> {
        let valid = validate_registration(form)?;
        let outcome = self
            .auth
            .sign_up(&valid.email, &valid.password, &valid.full_name)
            .await?;

        if let SignUpOutcome::SignedIn(session) = &outcome {
            self.store.save(session)?;
            let profiles = self.repositories.profiles(session);
            if let Err(e) = profiles.upsert(session.user_id(), &valid.full_name).await {
                warn!(error = %e, "profile row not written after sign-up");
            }
        }

        Ok(outcome)
    }

    /// Sign out, returning whether a session was stored
    ///
    /// The local session is removed even if the backend cannot be reached.
    pub async fn sign_out(&self) -> TrackerResult<bool> {
        let Some(session) = self.store.load()? else {
            return Ok(false);
        };

        if let Err(e) = self.auth.sign_out(&session.access_token).await {
            warn!(error = %e, "remote sign-out failed, clearing local session anyway");
        }
        self.store.clear()?;
        info!(user = %session.user_id(), "signed out");
        Ok(true)
    }
}
