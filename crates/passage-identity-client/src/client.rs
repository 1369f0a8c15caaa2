//! Identity service client contract and reqwest implementation.

use crate::error::{
    EMAIL_IN_USE_CODE, EMAIL_IN_USE_STATUS, IdentityClientError, IdentityClientResult,
};
use crate::models::{NewIdentity, RemoteIdentity};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Operations the engine needs from the remote identity service.
#[async_trait]
pub trait IdentityServiceClient: Send + Sync {
    /// Create a new identity. A create on an email that already exists
    /// fails with [`IdentityClientError::Conflict`].
    async fn create_user(&self, payload: &NewIdentity) -> IdentityClientResult<RemoteIdentity>;

    /// Update an existing identity by its remote id.
    async fn update_user(
        &self,
        id: &str,
        payload: &NewIdentity,
    ) -> IdentityClientResult<RemoteIdentity>;

    /// Look up an identity by primary email. `Ok(None)` when no match.
    async fn find_user_by_email(&self, email: &str)
    -> IdentityClientResult<Option<RemoteIdentity>>;
}

/// Error body shape the service returns on failures.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Reqwest-backed client with bearer authentication.
#[derive(Debug, Clone)]
pub struct HttpIdentityClient {
    base_url: String,
    api_token: String,
    http: reqwest::Client,
}

impl HttpIdentityClient {
    /// Create a client for the given base URL and API token.
    pub fn new(
        base_url: &str,
        api_token: &str,
        timeout: Duration,
    ) -> IdentityClientResult<Self> {
        if base_url.is_empty() {
            return Err(IdentityClientError::InvalidConfig(
                "identity service base URL is empty".to_string(),
            ));
        }
        if api_token.is_empty() {
            return Err(IdentityClientError::InvalidConfig(
                "identity service API token is empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("passage-identity-client/0.1")
            .build()
            .map_err(|e| {
                IdentityClientError::InvalidConfig(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
            http,
        })
    }

    /// Create a client with a pre-built `reqwest::Client` (for testing).
    #[must_use]
    pub fn with_http_client(base_url: &str, api_token: &str, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
            http,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Decode a non-2xx response into the matching error variant.
    async fn error_from_response(response: reqwest::Response) -> IdentityClientError {
        let status = response.status().as_u16();
        let body: ApiErrorBody = match response.text().await {
            Ok(text) => serde_json::from_str(&text).unwrap_or(ApiErrorBody {
                code: String::new(),
                message: text,
            }),
            Err(e) => return IdentityClientError::Transport(e),
        };

        if status == EMAIL_IN_USE_STATUS && body.code == EMAIL_IN_USE_CODE {
            return IdentityClientError::Conflict {
                code: body.code,
                message: body.message,
            };
        }
        if status == 404 {
            return IdentityClientError::NotFound(body.message);
        }
        IdentityClientError::Api {
            status,
            code: body.code,
            message: body.message,
        }
    }
}

#[async_trait]
impl IdentityServiceClient for HttpIdentityClient {
    async fn create_user(&self, payload: &NewIdentity) -> IdentityClientResult<RemoteIdentity> {
        let url = format!("{}/api/users", self.base_url);
        debug!(url = %url, "creating identity");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(response.json::<RemoteIdentity>().await?)
    }

    async fn update_user(
        &self,
        id: &str,
        payload: &NewIdentity,
    ) -> IdentityClientResult<RemoteIdentity> {
        let url = format!("{}/api/users/{}", self.base_url, id);
        debug!(url = %url, "updating identity");
        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.api_token)
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(response.json::<RemoteIdentity>().await?)
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> IdentityClientResult<Option<RemoteIdentity>> {
        let url = format!("{}/api/users", self.base_url);
        debug!(url = %url, email = %email, "searching identity by email");
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_token)
            .query(&[("page", "1"), ("page_size", "20"), ("email", email)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let matches = response.json::<Vec<RemoteIdentity>>().await?;
        Ok(matches.into_iter().next())
    }
}
