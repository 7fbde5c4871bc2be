//! Profile service

use tracing::info;

use crate::error::TrackerResult;
use crate::models::{Profile, ProfileRow, Session};
use crate::storage::ProfileRepository;
use crate::validation::{validate_full_name, ValidationErrors};

/// Service for the signed-in user's profile
pub struct ProfileService<'a> {
    repo: &'a dyn ProfileRepository,
}

impl<'a> ProfileService<'a> {
    /// Create a new profile service
    pub fn new(repo: &'a dyn ProfileRepository) -> Self {
        Self { repo }
    }

    /// Load the profile, joined with the session's e-mail
    ///
    /// Accounts created before the profile row was written still show the
    /// name given at sign-up.
    pub async fn load(&self, session: &Session) -> TrackerResult<Profile> {
        let row = self.repo.get(session.user_id()).await?;
        Ok(join(session, row))
    }

    /// Change the display name
    pub async fn rename(&self, session: &Session, full_name: &str) -> TrackerResult<Profile> {
        let full_name = validate_full_name(full_name).map_err(ValidationErrors::from)?;
        let row = self.repo.upsert(session.user_id(), &full_name).await?;

        info!(user = %session.user_id(), "profile renamed");
        Ok(join(session, Some(row)))
    }
}

fn join(session: &Session, row: Option<ProfileRow>) -> Profile {
    let (full_name, created_at) = match row {
        Some(row) => (row.full_name, row.created_at),
        None => (None, None),
    };

    Profile {
        id: session.user_id(),
        full_name: full_name.or_else(|| session.user.user_metadata.full_name.clone()),
        email: session.user.email.clone(),
        created_at,
    }
}
