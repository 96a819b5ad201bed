//! PSP HTTP Client
//!
//! HTTP implementation of [`PspClient`] against the connector's Stripe
//! resource endpoints. Each step's terminal side effect is one POST; a
//! non-success response with a structured body becomes a domain error the
//! step controller can map to a field.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use psp_onboarding::{
    BankDetails, CompanyNumber, Director, GovernmentEntityDocument, PspClient, ResponsiblePerson,
    VatNumber,
};
use wizard_core::{Result, ServiceError, WizardError};

use crate::parse_error_body;

/// HTTP PSP client backed by the connector service
pub struct HttpPspClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpPspClient {
    /// Create with an explicit base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| WizardError::Config(format!("psp http client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("CONNECTOR_URL")
            .map_err(|_| WizardError::Config("CONNECTOR_URL not set".into()))?;
        Self::new(base_url)
    }

    async fn post<T: Serialize + Sync>(
        &self,
        account_id: &str,
        resource: &str,
        payload: &T,
    ) -> std::result::Result<(), ServiceError> {
        let url = format!(
            "{}/v1/api/accounts/{}/stripe-resources/{}",
            self.base_url, account_id, resource
        );

        let response = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(parse_error_body(status.as_u16(), &body))
    }
}

#[async_trait]
impl PspClient for HttpPspClient {
    async fn update_bank_account(
        &self,
        account_id: &str,
        details: &BankDetails,
    ) -> std::result::Result<(), ServiceError> {
        self.post(account_id, "bank-account", details).await
    }

    async fn upsert_responsible_person(
        &self,
        account_id: &str,
        person: &ResponsiblePerson,
    ) -> std::result::Result<(), ServiceError> {
        self.post(account_id, "responsible-person", person).await
    }

    async fn set_vat_number(
        &self,
        account_id: &str,
        vat: &VatNumber,
    ) -> std::result::Result<(), ServiceError> {
        self.post(account_id, "vat-number", vat).await
    }

    async fn set_company_number(
        &self,
        account_id: &str,
        company: &CompanyNumber,
    ) -> std::result::Result<(), ServiceError> {
        self.post(account_id, "company-number", company).await
    }

    async fn create_director(
        &self,
        account_id: &str,
        director: &Director,
    ) -> std::result::Result<(), ServiceError> {
        self.post(account_id, "director", director).await
    }

    async fn upload_government_entity_document(
        &self,
        account_id: &str,
        document: &GovernmentEntityDocument,
    ) -> std::result::Result<(), ServiceError> {
        self.post(account_id, "government-entity-document", document)
            .await
    }
}
