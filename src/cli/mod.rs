//! CLI command handlers
//!
//! This module bridges clap argument parsing with the service layer.
//! [`AppContext`] carries the paths, settings and session store every
//! command needs; [`Backend`] holds the HTTP clients and is only built by
//! commands that talk to the backend.

pub mod auth;
pub mod config;
pub mod expense;
pub mod profile;
pub mod summary;

use std::io::{self, BufRead, Write};

use zeroize::Zeroizing;

use crate::auth::{Biometric, Unavailable};
use crate::config::{Settings, TrackerPaths};
use crate::error::{TrackerError, TrackerResult};
use crate::models::Session;
use crate::remote::{BackendClient, RemoteAuth, RemoteRepositories};
use crate::services::SessionService;
use crate::storage::SessionStore;

pub use auth::{handle_auth_command, AuthCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use profile::{handle_profile_command, ProfileCommands};
pub use summary::{handle_summary_command, SummaryArgs};

/// Terminals have no biometric hardware
static NO_BIOMETRIC: Unavailable = Unavailable;

/// Everything a command needs from local disk
pub struct AppContext {
    pub paths: TrackerPaths,
    pub settings: Settings,
    pub sessions: SessionStore,
}

impl AppContext {
    /// Resolve paths and load settings
    pub fn load() -> TrackerResult<Self> {
        let paths = TrackerPaths::new()?;
        Self::with_paths(paths)
    }

    /// Load settings from an explicit location
    pub fn with_paths(paths: TrackerPaths) -> TrackerResult<Self> {
        let settings = Settings::load_or_create(&paths)?;
        let sessions = SessionStore::new(&paths);
        Ok(Self {
            paths,
            settings,
            sessions,
        })
    }

    /// Build the HTTP clients from the backend settings
    pub fn backend(&self) -> TrackerResult<Backend> {
        let client = BackendClient::new(self.settings.backend_config()?)?;
        Ok(Backend {
            auth: RemoteAuth::new(client.clone()),
            repositories: RemoteRepositories::new(client),
        })
    }

    /// Session service wired to `backend`
    pub fn session_service<'a>(&'a self, backend: &'a Backend) -> SessionService<'a> {
        let biometric: &'a dyn Biometric = &NO_BIOMETRIC;
        SessionService::new(
            &backend.auth,
            &self.sessions,
            &backend.repositories,
            biometric,
            self.settings.biometric_enabled,
        )
    }

    /// The active session, or [`TrackerError::NoSession`]
    ///
    /// Checked before the backend settings so a signed-out user is told to
    /// sign in rather than to configure the backend.
    pub async fn require_session(&self) -> TrackerResult<(Backend, Session)> {
        if !self.sessions.exists() {
            return Err(TrackerError::NoSession);
        }
        let backend = self.backend()?;
        let session = self.session_service(&backend).current_session().await?;
        Ok((backend, session))
    }
}

/// HTTP clients for one command
pub struct Backend {
    pub auth: RemoteAuth,
    pub repositories: RemoteRepositories,
}

/// Read one line from stdin after printing `label`
pub(crate) fn prompt_line(label: &str) -> TrackerResult<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Read a password without echoing it
pub(crate) fn prompt_secret(label: &str) -> TrackerResult<Zeroizing<String>> {
    rpassword::prompt_password(label)
        .map(Zeroizing::new)
        .map_err(|e| TrackerError::Io(format!("Failed to read password: {}", e)))
}

/// Today's date on the local calendar
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
