//! Persisted session
//!
//! The session returned by the backend is kept in `session.json` so that
//! consecutive commands stay signed in. The file is written owner-only.

use std::path::PathBuf;

use super::file_io::{read_json_optional, remove_if_exists, write_json_private};
use crate::config::paths::TrackerPaths;
use crate::error::TrackerResult;
use crate::models::Session;

/// Reads and writes the local session file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store at the default location under `paths`
    pub fn new(paths: &TrackerPaths) -> Self {
        Self {
            path: paths.session_file(),
        }
    }

    /// Create a store at an explicit file path
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// The stored session, if any
    pub fn load(&self) -> TrackerResult<Option<Session>> {
        read_json_optional(&self.path)
    }

    /// Replace the stored session
    pub fn save(&self, session: &Session) -> TrackerResult<()> {
        write_json_private(&self.path, session)
    }

    /// Forget the stored session
    pub fn clear(&self) -> TrackerResult<()> {
        remove_if_exists(&self.path)
    }

    /// Check whether a session file is present
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}
