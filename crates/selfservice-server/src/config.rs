//! Server Configuration

use wizard_core::WizardConfig;

/// Server configuration, read once at startup
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,

    /// Connector base URL; when unset the server falls back to in-memory
    /// stores and a mock PSP client
    pub connector_url: Option<String>,

    /// Wizard behavior switches
    pub wizard: WizardConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            connector_url: None,
            wizard: WizardConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into()),
            connector_url: std::env::var("CONNECTOR_URL").ok(),
            wizard: WizardConfig::from_env(),
        }
    }
}
