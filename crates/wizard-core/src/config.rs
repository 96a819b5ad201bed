//! Wizard Configuration
//!
//! Runtime behavior switches, read once from the environment at startup and
//! injected into the server. Handlers never consult ambient process state.

use serde::{Deserialize, Serialize};

/// Where to send the user after a non-final step completes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionRouting {
    /// Straight to the next incomplete step in priority order
    NextStep,

    /// Back to the overview task list
    TaskList,
}

/// Wizard behavior configuration
#[derive(Clone, Copy, Debug)]
pub struct WizardConfig {
    pub completion_routing: CompletionRouting,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            completion_routing: CompletionRouting::NextStep,
        }
    }
}

impl WizardConfig {
    pub fn from_env() -> Self {
        let task_list = std::env::var("TASK_LIST_ROUTING")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            completion_routing: if task_list {
                CompletionRouting::TaskList
            } else {
                CompletionRouting::NextStep
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routing_is_sequential() {
        let config = WizardConfig::default();
        assert_eq!(config.completion_routing, CompletionRouting::NextStep);
    }
}
