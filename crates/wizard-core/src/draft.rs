//! Session Draft Store
//!
//! Transient, per-session storage of in-progress wizard form input. Drafts
//! hold the user's raw (non-normalized) values so a re-rendered form shows
//! exactly what was typed, plus the validation errors from a failed
//! submission so a follow-up GET can re-display them. Scope is
//! (session, wizard, step); the whole wizard namespace is cleared when the
//! wizard completes.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::form::FormErrors;

/// Unique session identifier, carried in a cookie
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Draft form values for one wizard step
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Draft {
    /// Raw field values as typed by the user
    pub values: HashMap<String, String>,

    /// Validation errors from the submission that saved this draft
    #[serde(default)]
    pub errors: Option<FormErrors>,

    /// Last write timestamp, so a host session store can expire entries
    pub touched_at: DateTime<Utc>,
}

impl Draft {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self {
            values,
            errors: None,
            touched_at: Utc::now(),
        }
    }

    /// Attach the validation errors that caused this draft to be saved
    pub fn with_errors(mut self, errors: FormErrors) -> Self {
        self.errors = Some(errors);
        self
    }

    /// A field value, if the draft has one
    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }
}

/// Draft storage trait.
///
/// Backed by whatever session mechanism the host provides; the in-memory
/// implementation below is enough for tests and single-process runs.
pub trait DraftStore: Send + Sync {
    /// Load the draft for one step
    fn get(&self, session: &SessionId, wizard: &str, step: &str) -> Result<Option<Draft>>;

    /// Save (replace) the draft for one step
    fn put(&self, session: &SessionId, wizard: &str, step: &str, draft: Draft) -> Result<()>;

    /// Drop one step's draft
    fn clear_step(&self, session: &SessionId, wizard: &str, step: &str) -> Result<()>;

    /// Drop every draft under the wizard's namespace
    fn clear_wizard(&self, session: &SessionId, wizard: &str) -> Result<()>;
}

type DraftKey = (SessionId, String, String);

/// In-memory draft store (for development/testing)
pub struct MemoryDraftStore {
    drafts: RwLock<HashMap<DraftKey, Draft>>,
}

impl Default for MemoryDraftStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self {
            drafts: RwLock::new(HashMap::new()),
        }
    }
}

impl DraftStore for MemoryDraftStore {
    fn get(&self, session: &SessionId, wizard: &str, step: &str) -> Result<Option<Draft>> {
        let drafts = self.drafts.read().unwrap();
        Ok(drafts
            .get(&(session.clone(), wizard.to_string(), step.to_string()))
            .cloned())
    }

    fn put(&self, session: &SessionId, wizard: &str, step: &str, draft: Draft) -> Result<()> {
        let mut drafts = self.drafts.write().unwrap();
        drafts.insert((session.clone(), wizard.to_string(), step.to_string()), draft);
        Ok(())
    }

    fn clear_step(&self, session: &SessionId, wizard: &str, step: &str) -> Result<()> {
        let mut drafts = self.drafts.write().unwrap();
        drafts.remove(&(session.clone(), wizard.to_string(), step.to_string()));
        Ok(())
    }

    fn clear_wizard(&self, session: &SessionId, wizard: &str) -> Result<()> {
        let mut drafts = self.drafts.write().unwrap();
        drafts.retain(|(s, w, _), _| !(s == session && w == wizard));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_put_and_get() {
        let store = MemoryDraftStore::new();
        let session = SessionId::new();

        store
            .put(
                &session,
                "stripe-setup",
                "vat-number",
                Draft::new(values(&[("vat_number", "GB 123")])),
            )
            .unwrap();

        let draft = store.get(&session, "stripe-setup", "vat-number").unwrap().unwrap();
        assert_eq!(draft.value("vat_number"), Some("GB 123"));
        assert!(draft.errors.is_none());
    }

    #[test]
    fn test_draft_keeps_validation_errors() {
        let store = MemoryDraftStore::new();
        let session = SessionId::new();

        let mut errors = FormErrors::new();
        errors.add("sort_code", "Enter a valid sort code like 309430");
        store
            .put(
                &session,
                "stripe-setup",
                "bank-details",
                Draft::new(values(&[("sort_code", "30-94-3")])).with_errors(errors),
            )
            .unwrap();

        let draft = store.get(&session, "stripe-setup", "bank-details").unwrap().unwrap();
        assert_eq!(draft.value("sort_code"), Some("30-94-3"));
        let errors = draft.errors.unwrap();
        assert_eq!(errors.field("sort_code"), Some("Enter a valid sort code like 309430"));
    }

    #[test]
    fn test_drafts_scoped_per_session() {
        let store = MemoryDraftStore::new();
        let a = SessionId::new();
        let b = SessionId::new();

        store.put(&a, "w", "s", Draft::new(values(&[("f", "x")]))).unwrap();
        assert!(store.get(&b, "w", "s").unwrap().is_none());
    }

    #[test]
    fn test_clear_wizard_drops_all_steps() {
        let store = MemoryDraftStore::new();
        let session = SessionId::new();

        store.put(&session, "w", "one", Draft::new(values(&[("f", "1")]))).unwrap();
        store.put(&session, "w", "two", Draft::new(values(&[("f", "2")]))).unwrap();
        store.put(&session, "other", "one", Draft::new(values(&[("f", "3")]))).unwrap();

        store.clear_wizard(&session, "w").unwrap();

        assert!(store.get(&session, "w", "one").unwrap().is_none());
        assert!(store.get(&session, "w", "two").unwrap().is_none());
        assert!(store.get(&session, "other", "one").unwrap().is_some());
    }
}
