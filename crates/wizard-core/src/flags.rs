//! Progress Flags
//!
//! Per-account completion markers, one boolean per wizard step. The flags
//! are owned by an external account service; this module defines the store
//! interface plus an in-memory implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WizardError};

/// Completion flags for one account, keyed by step flag name.
///
/// Flags are monotonic: the wizard only ever sets them, never clears them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressFlags(HashMap<String, bool>);

impl ProgressFlags {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Whether the given step flag has been set
    pub fn is_complete(&self, flag: &str) -> bool {
        self.0.get(flag).copied().unwrap_or(false)
    }

    /// Set a flag. Returns `false` if it was already set.
    pub fn mark(&mut self, flag: &str) -> bool {
        !std::mem::replace(self.0.entry(flag.to_string()).or_insert(false), true)
    }
}

impl<const N: usize> From<[(&str, bool); N]> for ProgressFlags {
    fn from(entries: [(&str, bool); N]) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }
}

/// Outcome of a `set_flag` call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagUpdate {
    /// The flag was unset and is now set
    Updated,
    /// The flag was already set (a concurrent submission won the race)
    AlreadySet,
}

/// Store of per-account progress flags.
///
/// `set_flag` is compare-and-set: implementations must report `AlreadySet`
/// instead of blindly overwriting, so that two racing submissions of the
/// same step can be told apart.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Fetch the full flag map for an account
    async fn get_progress(&self, account_id: &str) -> Result<ProgressFlags>;

    /// Set one flag, failing over to `AlreadySet` if it is already true
    async fn set_flag(&self, account_id: &str, flag: &str) -> Result<FlagUpdate>;
}

/// In-memory progress store (for development/testing)
pub struct MemoryProgressStore {
    accounts: RwLock<HashMap<String, ProgressFlags>>,
}

impl Default for MemoryProgressStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// Register an account with the given starting flags
    pub fn insert_account(&self, account_id: impl Into<String>, flags: ProgressFlags) {
        let mut accounts = self.accounts.write().unwrap();
        accounts.insert(account_id.into(), flags);
    }
}

#[async_trait]
impl ProgressStore for MemoryProgressStore {
    async fn get_progress(&self, account_id: &str) -> Result<ProgressFlags> {
        let accounts = self.accounts.read().unwrap();
        accounts
            .get(account_id)
            .cloned()
            .ok_or_else(|| WizardError::AccountNotFound(account_id.to_string()))
    }

    async fn set_flag(&self, account_id: &str, flag: &str) -> Result<FlagUpdate> {
        let mut accounts = self.accounts.write().unwrap();
        let flags = accounts
            .get_mut(account_id)
            .ok_or_else(|| WizardError::AccountNotFound(account_id.to_string()))?;

        if flags.mark(flag) {
            Ok(FlagUpdate::Updated)
        } else {
            Ok(FlagUpdate::AlreadySet)
        }
    }
}
