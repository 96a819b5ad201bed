//! # wizard-core
//!
//! Generic machinery for session-backed, multi-page onboarding wizards.
//!
//! A wizard is an ordered list of steps. Each step is gated by a monotonic
//! completion flag owned by an external account service (the progress
//! store), collects form input into a per-session draft store, and commits
//! by performing an external side effect before setting its flag.
//!
//! The pieces fit together like this:
//!
//! ```text
//! request ──▶ StepGuard ──▶ step controller ──▶ redirect / render
//!               │                 │
//!          ProgressStore     DraftStore + side-effect client
//! ```

mod config;
mod draft;
mod error;
mod flags;
mod guard;
mod step;

pub mod form;

pub use config::{CompletionRouting, WizardConfig};
pub use draft::{Draft, DraftStore, MemoryDraftStore, SessionId};
pub use error::{Result, ServiceError, WizardError};
pub use flags::{FlagUpdate, MemoryProgressStore, ProgressFlags, ProgressStore};
pub use guard::{check_step, completion_target, GuardDecision};
pub use step::{StepDefinition, WizardPlan};
