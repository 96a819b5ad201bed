//! Application State

use std::sync::Arc;

use psp_onboarding::PspClient;
use wizard_core::{DraftStore, ProgressStore, WizardConfig, WizardPlan};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Progress flag store (connector-backed in production)
    pub progress: Arc<dyn ProgressStore>,

    /// PSP side-effect client
    pub psp: Arc<dyn PspClient>,

    /// Per-session draft storage
    pub drafts: Arc<dyn DraftStore>,

    /// The wizard step table
    pub plan: Arc<WizardPlan>,

    /// Wizard behavior switches
    pub wizard_config: WizardConfig,
}
