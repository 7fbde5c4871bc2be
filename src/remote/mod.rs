//! HTTP clients for the hosted backend
//!
//! The backend exposes a PostgREST table API under `/rest/v1` and a GoTrue
//! auth API under `/auth/v1`. Every request carries the project's `apikey`
//! header; calls made on behalf of a user add the user's bearer token.

pub mod auth;
pub mod client;
pub mod expenses;
pub mod profiles;

pub use auth::RemoteAuth;
pub use client::{BackendClient, BackendConfig};
pub use expenses::RemoteExpenseRepository;
pub use profiles::RemoteProfileRepository;

use std::sync::Arc;

use crate::models::Session;
use crate::storage::{ExpenseRepository, ProfileRepository, RepositoryProvider};

/// Opens table clients bound to a session's access token
#[derive(Debug, Clone)]
pub struct RemoteRepositories {
    client: BackendClient,
}

impl RemoteRepositories {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

impl RepositoryProvider for RemoteRepositories {
    fn expenses(&self, session: &Session) -> Arc<dyn ExpenseRepository> {
        Arc::new(RemoteExpenseRepository::new(
            self.client.clone(),
            &session.access_token,
        ))
    }

    fn profiles(&self, session: &Session) -> Arc<dyn ProfileRepository> {
        Arc::new(RemoteProfileRepository::new(
            self.client.clone(),
            &session.access_token,
        ))
    }
}
