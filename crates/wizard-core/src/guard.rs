//! Step Guard
//!
//! Decides whether an inbound request for a wizard step may proceed, given
//! the account's current progress flags. Read-only: the guard never mutates
//! the progress store.

use crate::error::{Result, WizardError};
use crate::flags::ProgressFlags;
use crate::step::{StepDefinition, WizardPlan};

/// Guard decision for a requested step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision<'a> {
    /// The step may be rendered/submitted
    Proceed,

    /// An earlier step is incomplete; redirect there
    Redirect(&'a StepDefinition),

    /// The step's own flag is already set; redirect away with a flash
    AlreadyCompleted,
}

/// Check whether the named step is reachable.
///
/// Rules, in order:
/// - unknown step name fails with [`WizardError::UnknownStep`];
/// - a step whose own flag is set is `AlreadyCompleted`;
/// - the earliest predecessor with an unset flag wins a `Redirect`;
/// - otherwise `Proceed`.
pub fn check_step<'a>(
    plan: &'a WizardPlan,
    flags: &ProgressFlags,
    step_name: &str,
) -> Result<GuardDecision<'a>> {
    let step = plan
        .step(step_name)
        .ok_or_else(|| WizardError::UnknownStep(step_name.to_string()))?;

    if flags.is_complete(step.flag) {
        return Ok(GuardDecision::AlreadyCompleted);
    }

    for predecessor in plan.predecessors(step_name) {
        if !flags.is_complete(predecessor.flag) {
            return Ok(GuardDecision::Redirect(predecessor));
        }
    }

    Ok(GuardDecision::Proceed)
}

/// Destination after a step completes: the first still-incomplete step, or
/// `None` when the whole wizard is done.
///
/// This is the guard's priority rule run without a target step.
pub fn completion_target<'a>(
    plan: &'a WizardPlan,
    flags: &ProgressFlags,
) -> Option<&'a StepDefinition> {
    plan.first_incomplete(flags)
}
