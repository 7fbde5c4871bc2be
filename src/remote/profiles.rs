//! Profile table client

use async_trait::async_trait;
use reqwest::Method;
use zeroize::Zeroizing;

use super::client::BackendClient;
use crate::error::TrackerResult;
use crate::models::{ProfileRow, ProfileUpsert, UserId};
use crate::storage::ProfileRepository;

const TABLE: &str = "/rest/v1/profiles";

/// Profile repository over the table API
pub struct RemoteProfileRepository {
    client: BackendClient,
    access_token: Zeroizing<String>,
}

impl RemoteProfileRepository {
    pub fn new(client: BackendClient, access_token: &str) -> Self {
        Self {
            client,
            access_token: Zeroizing::new(access_token.to_string()),
        }
    }
}

#[async_trait]
impl ProfileRepository for RemoteProfileRepository {
    async fn get(&self, user_id: UserId) -> TrackerResult<Option<ProfileRow>> {
        let request = self
            .client
            .request(Method::GET, TABLE, Some(self.access_token.as_str()))
            .query(&[
                ("id", format!("eq.{}", user_id)),
                ("select", "full_name,created_at".to_string()),
            ]);
        let rows: Vec<ProfileRow> = self.client.send_json(request).await?;
        Ok(rows.into_iter().next())
    }

    async fn upsert(&self, user_id: UserId, full_name: &str) -> TrackerResult<ProfileRow> {
        let body = ProfileUpsert {
            id: user_id,
            full_name: full_name.to_string(),
        };
        let request = self
            .client
            .request(Method::POST, TABLE, Some(self.access_token.as_str()))
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&body);
        let rows: Vec<ProfileRow> = self.client.send_json(request).await?;

        Ok(rows.into_iter().next().unwrap_or(ProfileRow {
            id: Some(user_id),
            full_name: Some(body.full_name),
            created_at: None,
        }))
    }
}
