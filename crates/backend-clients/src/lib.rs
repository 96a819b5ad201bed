//! # backend-clients
//!
//! reqwest-backed implementations of the wizard's two consumed interfaces:
//! the account service progress store and the PSP side-effect client. Both
//! speak JSON to first-party REST APIs and translate structured error
//! bodies (`{"code": ..., "message": ...}`) into the wizard error taxonomy.

mod progress;
mod psp;

pub use progress::{ConnectorConfig, HttpProgressStore};
pub use psp::HttpPspClient;

use wizard_core::ServiceError;

/// Parse a structured upstream error body into a domain error.
///
/// Bodies without a `code` field become transport errors, which the step
/// controllers propagate instead of rendering as field errors.
pub(crate) fn parse_error_body(status: u16, body: &str) -> ServiceError {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        code: String,
        #[serde(default)]
        message: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => ServiceError::domain(parsed.code, parsed.message),
        Err(_) => ServiceError::Transport(format!("HTTP {}: {}", status, body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_body_becomes_domain_error() {
        let err = parse_error_body(
            400,
            r#"{"code":"bank_account_unusable","message":"account unusable"}"#,
        );
        assert_eq!(err.code(), Some("bank_account_unusable"));
    }

    #[test]
    fn test_unstructured_body_becomes_transport_error() {
        let err = parse_error_body(502, "Bad Gateway");
        assert!(matches!(err, ServiceError::Transport(_)));
        assert!(err.code().is_none());
    }
}
