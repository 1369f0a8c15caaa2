//! Engine configuration.

use passage_identity_client::{HttpIdentityClient, IdentityClientError, PayloadDefaults};
use serde::Deserialize;
use std::time::Duration;

/// Remote identity service connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityServiceConfig {
    pub base_url: String,
    pub api_token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl IdentityServiceConfig {
    /// Read connection settings from the environment
    /// (`PASSAGE_IDENTITY_API_URL`, `PASSAGE_IDENTITY_API_TOKEN`).
    pub fn from_env() -> Result<Self, String> {
        let base_url = std::env::var("PASSAGE_IDENTITY_API_URL")
            .map_err(|_| "PASSAGE_IDENTITY_API_URL is not set".to_string())?;
        let api_token = std::env::var("PASSAGE_IDENTITY_API_TOKEN")
            .map_err(|_| "PASSAGE_IDENTITY_API_TOKEN is not set".to_string())?;
        Ok(Self {
            base_url,
            api_token,
            timeout_secs: default_timeout_secs(),
        })
    }

    /// Build the HTTP client these settings describe. The single shared
    /// helper so bootstrap code never duplicates client construction.
    pub fn build_client(&self) -> Result<HttpIdentityClient, IdentityClientError> {
        HttpIdentityClient::new(
            &self.base_url,
            &self.api_token,
            Duration::from_secs(self.timeout_secs),
        )
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Concurrent in-flight record operations per shard.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Concurrent staging-store writes during the load phase.
    #[serde(default = "default_staging_concurrency")]
    pub staging_concurrency: usize,
    pub identity: IdentityServiceConfig,
    #[serde(default)]
    pub payload_defaults: PayloadDefaults,
}

fn default_concurrency() -> usize {
    crate::orchestrator::DEFAULT_CONCURRENCY
}

fn default_staging_concurrency() -> usize {
    crate::staging::DEFAULT_STAGING_CONCURRENCY
}
