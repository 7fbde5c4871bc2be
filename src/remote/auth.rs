//! GoTrue auth client

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::client::BackendClient;
use crate::auth::{AuthGateway, SignUpOutcome};
use crate::error::TrackerResult;
use crate::models::{Session, SessionUser};

/// Body of a successful token grant
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: SessionUser,
}

impl TokenResponse {
    fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or_else(|| now + Duration::seconds(self.expires_in.unwrap_or(3600)));

        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

/// Turn a sign-up body into an outcome
///
/// With auto-confirm on, the body is a token grant. Otherwise it is the new
/// user, either bare or wrapped in `{"user": ...}`.
fn parse_sign_up(body: serde_json::Value, now: DateTime<Utc>) -> TrackerResult<SignUpOutcome> {
    if body.get("access_token").is_some() {
        let grant: TokenResponse = serde_json::from_value(body)?;
        return Ok(SignUpOutcome::SignedIn(grant.into_session(now)));
    }

    let user_value = body.get("user").cloned().unwrap_or(body);
    let user: SessionUser = serde_json::from_value(user_value)?;
    Ok(SignUpOutcome::ConfirmationRequired(user))
}

/// Auth gateway over HTTP
#[derive(Debug, Clone)]
pub struct RemoteAuth {
    client: BackendClient,
}

impl RemoteAuth {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    async fn grant(&self, grant_type: &str, body: serde_json::Value) -> TrackerResult<Session> {
        let request = self
            .client
            .request(Method::POST, "/auth/v1/token", None)
            .query(&[("grant_type", grant_type)])
            .json(&body);
        let grant: TokenResponse = self.client.send_json(request).await?;
        Ok(grant.into_session(Utc::now()))
    }
}

#[async_trait]
impl AuthGateway for RemoteAuth {
    async fn current_user(&self, access_token: &str) -> TrackerResult<SessionUser> {
        let request = self
            .client
            .request(Method::GET, "/auth/v1/user", Some(access_token));
        self.client.send_json(request).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> TrackerResult<Session> {
        let session = self
            .grant("password", json!({ "email": email, "password": password }))
            .await?;
        info!(user = %session.user.id, "signed in");
        Ok(session)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> TrackerResult<SignUpOutcome> {
        let request = self
            .client
            .request(Method::POST, "/auth/v1/signup", None)
            .json(&json!({
                "email": email,
                "password": password,
                "data": { "full_name": full_name },
            }));
        let body: serde_json::Value = self.client.send_json(request).await?;
        let outcome = parse_sign_up(body, Utc::now())?;

        if let SignUpOutcome::ConfirmationRequired(user) = &outcome {
            info!(user = %user.id, "sign-up awaiting e-mail confirmation");
        }
        Ok(outcome)
    }

    async fn refresh(&self, refresh_token: &str) -> TrackerResult<Session> {
        debug!("refreshing session");
        self.grant("refresh_token", json!({ "refresh_token": refresh_token }))
            .await
    }

    async fn sign_out(&self, access_token: &str) -> TrackerResult<()> {
        let request = self
            .client
            .request(Method::POST, "/auth/v1/logout", Some(access_token));
        self.client.send_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: &str = r#"{"id":"6ba7b810-9dad-11d1-80b4-00c04fd430c8","email":"ana@example.com","user_metadata":{"full_name":"Ana Souza"}}"#;

    #[test]
    fn test_grant_uses_absolute_expiry() {
        let body = format!(
            r#"{{"access_token":"a","refresh_token":"r","expires_in":3600,"expires_at":1717200000,"user":{}}}"#,
            USER
        );
        let grant: TokenResponse = serde_json::from_str(&body).unwrap();
        let session = grant.into_session(Utc::now());
        assert_eq!(session.expires_at.timestamp(), 1_717_200_000);
        assert_eq!(session.user.user_metadata.full_name.as_deref(), Some("Ana Souza"));
    }

    #[test]
    fn test_grant_falls_back_to_relative_expiry() {
        let body = format!(
            r#"{{"access_token":"a","refresh_token":"r","expires_in":60,"user":{}}}"#,
            USER
        );
        let grant: TokenResponse = serde_json::from_str(&body).unwrap();
        let now = Utc::now();
        assert_eq!(grant.into_session(now).expires_at, now + Duration::seconds(60));
    }

    #[test]
    fn test_sign_up_with_confirmation() {
        let body: serde_json::Value = serde_json::from_str(USER).unwrap();
        let outcome = parse_sign_up(body, Utc::now()).unwrap();
        assert!(matches!(outcome, SignUpOutcome::ConfirmationRequired(u) if u.email == "ana@example.com"));
    }

    #[test]
    fn test_sign_up_auto_confirmed() {
        let body: serde_json::Value = serde_json::from_str(&format!(
            r#"{{"access_token":"a","refresh_token":"r","expires_in":3600,"user":{}}}"#,
            USER
        ))
        .unwrap();
        assert!(matches!(
            parse_sign_up(body, Utc::now()).unwrap(),
            SignUpOutcome::SignedIn(_)
        ));
    }
}
