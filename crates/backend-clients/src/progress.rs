//! Connector Progress Store
//!
//! HTTP implementation of [`ProgressStore`] against the connector service,
//! which owns per-account Stripe setup flags.
//!
//! Endpoints:
//! - `GET  /v1/api/accounts/{id}/stripe-setup` → flag map
//! - `POST /v1/api/accounts/{id}/stripe-setup/flags` with `{"flag": name}`;
//!   `409 Conflict` means the flag was already set (compare-and-set lost).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;

use wizard_core::{FlagUpdate, ProgressFlags, ProgressStore, Result, WizardError};

/// Connector service configuration
#[derive(Clone, Debug)]
pub struct ConnectorConfig {
    /// Connector base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9300".into(),
            timeout_secs: 30,
        }
    }
}

impl ConnectorConfig {
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("CONNECTOR_URL")
            .map_err(|_| WizardError::Config("CONNECTOR_URL not set".into()))?;

        Ok(Self {
            base_url,
            ..Default::default()
        })
    }
}

/// HTTP progress store backed by the connector service
pub struct HttpProgressStore {
    http: reqwest::Client,
    config: ConnectorConfig,
}

impl HttpProgressStore {
    /// Create from configuration
    pub fn from_config(config: ConnectorConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WizardError::Config(format!("connector http client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(ConnectorConfig::from_env()?)
    }

    fn progress_url(&self, account_id: &str) -> String {
        format!(
            "{}/v1/api/accounts/{}/stripe-setup",
            self.config.base_url, account_id
        )
    }
}

#[async_trait]
impl ProgressStore for HttpProgressStore {
    async fn get_progress(&self, account_id: &str) -> Result<ProgressFlags> {
        let response = self
            .http
            .get(self.progress_url(account_id))
            .send()
            .await
            .map_err(|e| WizardError::Upstream(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(WizardError::AccountNotFound(account_id.to_string())),
            status if status.is_success() => response
                .json::<ProgressFlags>()
                .await
                .map_err(|e| WizardError::Upstream(e.to_string())),
            status => Err(WizardError::Upstream(format!(
                "connector returned {} for {}",
                status, account_id
            ))),
        }
    }

    async fn set_flag(&self, account_id: &str, flag: &str) -> Result<FlagUpdate> {
        let response = self
            .http
            .post(format!("{}/flags", self.progress_url(account_id)))
            .json(&json!({ "flag": flag }))
            .send()
            .await
            .map_err(|e| WizardError::Upstream(e.to_string()))?;

        match response.status() {
            StatusCode::CONFLICT => {
                tracing::warn!(account_id, flag, "flag already set upstream");
                Ok(FlagUpdate::AlreadySet)
            }
            StatusCode::NOT_FOUND => Err(WizardError::AccountNotFound(account_id.to_string())),
            status if status.is_success() => Ok(FlagUpdate::Updated),
            status => Err(WizardError::Upstream(format!(
                "connector returned {} setting {} for {}",
                status, flag, account_id
            ))),
        }
    }
}
