//! Configuration for the expense tracker
//!
//! Resolves where settings and the persisted session live, and loads the
//! user settings (backend location, display preferences, biometric gate).

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::{BackendSettings, Settings};
