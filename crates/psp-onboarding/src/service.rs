//! PSP Side-Effect Client
//!
//! The terminal side effect of each wizard step: the call that actually
//! submits bank details, person records or documents to the PSP. Exposed as
//! a trait so the server can run against the HTTP implementation in
//! production and the recording mock in tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use wizard_core::ServiceError;

use crate::forms::{
    BankDetails, CompanyNumber, Director, GovernmentEntityDocument, ResponsiblePerson, VatNumber,
};

/// Per-step side-effecting operations against the PSP
#[async_trait]
pub trait PspClient: Send + Sync {
    /// Submit bank account details
    async fn update_bank_account(
        &self,
        account_id: &str,
        details: &BankDetails,
    ) -> Result<(), ServiceError>;

    /// Create or update the responsible person record
    async fn upsert_responsible_person(
        &self,
        account_id: &str,
        person: &ResponsiblePerson,
    ) -> Result<(), ServiceError>;

    /// Record the VAT registration number
    async fn set_vat_number(
        &self,
        account_id: &str,
        vat: &VatNumber,
    ) -> Result<(), ServiceError>;

    /// Record the company number declaration (and number, when declared)
    async fn set_company_number(
        &self,
        account_id: &str,
        company: &CompanyNumber,
    ) -> Result<(), ServiceError>;

    /// Create a director record
    async fn create_director(
        &self,
        account_id: &str,
        director: &Director,
    ) -> Result<(), ServiceError>;

    /// Attach an uploaded government entity document
    async fn upload_government_entity_document(
        &self,
        account_id: &str,
        document: &GovernmentEntityDocument,
    ) -> Result<(), ServiceError>;
}

/// One call observed by the mock client
#[derive(Clone, Debug)]
pub struct RecordedCall {
    /// Operation name, e.g. `update_bank_account`
    pub operation: String,

    /// Target account
    pub account_id: String,

    /// The normalized payload that was sent
    pub payload: serde_json::Value,
}

/// Recording mock PSP client (for development/testing).
///
/// Failures can be scripted per operation; a scripted failure is consumed
/// by the next call to that operation.
pub struct MockPspClient {
    calls: Mutex<Vec<RecordedCall>>,
    failures: Mutex<Vec<(String, ServiceError)>>,
}

impl Default for MockPspClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPspClient {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
        }
    }

    /// Script the next call to `operation` to fail with `error`
    pub fn fail_next(&self, operation: &str, error: ServiceError) {
        let mut failures = self.failures.lock().unwrap();
        failures.push((operation.to_string(), error));
    }

    /// All calls made so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls made to one operation
    pub fn calls_to(&self, operation: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.operation == operation)
            .collect()
    }

    fn record(
        &self,
        operation: &str,
        account_id: &str,
        payload: serde_json::Value,
    ) -> Result<(), ServiceError> {
        self.calls.lock().unwrap().push(RecordedCall {
            operation: operation.to_string(),
            account_id: account_id.to_string(),
            payload,
        });

        let mut failures = self.failures.lock().unwrap();
        if let Some(pos) = failures.iter().position(|(op, _)| op == operation) {
            let (_, error) = failures.remove(pos);
            return Err(error);
        }
        Ok(())
    }
}

#[async_trait]
impl PspClient for MockPspClient {
    async fn update_bank_account(
        &self,
        account_id: &str,
        details: &BankDetails,
    ) -> Result<(), ServiceError> {
        self.record("update_bank_account", account_id, json!(details))
    }

    async fn upsert_responsible_person(
        &self,
        account_id: &str,
        person: &ResponsiblePerson,
    ) -> Result<(), ServiceError> {
        self.record("upsert_responsible_person", account_id, json!(person))
    }

    async fn set_vat_number(
        &self,
        account_id: &str,
        vat: &VatNumber,
    ) -> Result<(), ServiceError> {
        self.record("set_vat_number", account_id, json!(vat))
    }

    async fn set_company_number(
        &self,
        account_id: &str,
        company: &CompanyNumber,
    ) -> Result<(), ServiceError> {
        self.record("set_company_number", account_id, json!(company))
    }

    async fn create_director(
        &self,
        account_id: &str,
        director: &Director,
    ) -> Result<(), ServiceError> {
        self.record("create_director", account_id, json!(director))
    }

    async fn upload_government_entity_document(
        &self,
        account_id: &str,
        document: &GovernmentEntityDocument,
    ) -> Result<(), ServiceError> {
        self.record("upload_government_entity_document", account_id, json!(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_normalized_payload() {
        let mock = MockPspClient::new();
        let details = BankDetails {
            sort_code: "309430".into(),
            account_number: "00733445".into(),
        };

        mock.update_bank_account("acc-1", &details).await.unwrap();

        let calls = mock.calls_to("update_bank_account");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].account_id, "acc-1");
        assert_eq!(calls[0].payload["sort_code"], "309430");
    }

    #[tokio::test]
    async fn test_scripted_failure_is_consumed() {
        let mock = MockPspClient::new();
        mock.fail_next(
            "update_bank_account",
            ServiceError::domain("bank_account_unusable", "unusable"),
        );

        let details = BankDetails {
            sort_code: "309430".into(),
            account_number: "00733445".into(),
        };

        let err = mock.update_bank_account("acc-1", &details).await.unwrap_err();
        assert_eq!(err.code(), Some("bank_account_unusable"));

        // Next call succeeds again
        mock.update_bank_account("acc-1", &details).await.unwrap();
        assert_eq!(mock.calls_to("update_bank_account").len(), 2);
    }
}
