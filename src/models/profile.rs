//! User profile model
//!
//! The `profiles` table holds the display name; the e-mail address lives on
//! the auth user and is joined in from the session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// A row of the `profiles` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Profile as shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: UserId,
    pub full_name: Option<String>,
    pub email: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Name to greet the user with, falling back to the e-mail local part
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => self.email.split('@').next().unwrap_or(&self.email),
        }
    }
}

/// Upsert payload for the `profiles` table
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpsert {
    pub id: UserId,
    pub full_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(full_name: Option<&str>) -> Profile {
        Profile {
            id: UserId::new(),
            full_name: full_name.map(String::from),
            email: "ana.souza@example.com".into(),
            created_at: None,
        }
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        assert_eq!(profile(Some("Ana Souza")).display_name(), "Ana Souza");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        assert_eq!(profile(None).display_name(), "ana.souza");
        assert_eq!(profile(Some("   ")).display_name(), "ana.souza");
    }

    #[test]
    fn test_row_deserialization() {
        let row: ProfileRow = serde_json::from_str(
            r#"{"full_name":"Ana Souza","created_at":"2024-01-02T03:04:05+00:00"}"#,
        )
        .unwrap();
        assert_eq!(row.full_name.as_deref(), Some("Ana Souza"));
        assert!(row.id.is_none());
        assert!(row.created_at.is_some());
    }
}
