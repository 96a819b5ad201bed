//! Wizard Step Plan
//!
//! Static definition of a wizard: an ordered list of steps, each tied to a
//! completion flag. Ordering is the fixed priority list used by the step
//! guard — a step's predecessors are simply the steps before it.

use crate::flags::ProgressFlags;

/// One page/form in a multi-page wizard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepDefinition {
    /// Step name, used in routes and session draft keys
    pub name: &'static str,

    /// Flag key in the progress store that marks this step complete
    pub flag: &'static str,

    /// URL path slug relative to the wizard root
    pub slug: &'static str,
}

/// Ordered list of steps forming one wizard
#[derive(Clone, Debug)]
pub struct WizardPlan {
    /// Wizard name, used as the session draft namespace
    pub name: &'static str,
    steps: Vec<StepDefinition>,
}

impl WizardPlan {
    /// Build a plan from an ordered step list.
    ///
    /// Step names and flag keys must be unique; the order is the guard's
    /// priority order.
    pub fn new(name: &'static str, steps: Vec<StepDefinition>) -> Self {
        debug_assert!(
            steps
                .iter()
                .enumerate()
                .all(|(i, s)| steps[..i].iter().all(|p| p.name != s.name && p.flag != s.flag)),
            "wizard steps must have unique names and flag keys"
        );
        Self { name, steps }
    }

    /// All steps, in priority order
    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    /// Look up a step by name
    pub fn step(&self, name: &str) -> Option<&StepDefinition> {
        self.steps.iter().find(|s| s.name == name)
    }

    /// Position of a step in the priority order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.name == name)
    }

    /// Steps that must be complete before the named step
    pub fn predecessors(&self, name: &str) -> &[StepDefinition] {
        match self.position(name) {
            Some(pos) => &self.steps[..pos],
            None => &[],
        }
    }

    /// First step whose flag is not yet set
    pub fn first_incomplete(&self, flags: &ProgressFlags) -> Option<&StepDefinition> {
        self.steps.iter().find(|s| !flags.is_complete(s.flag))
    }

    /// Whether every step's flag is set
    pub fn is_complete(&self, flags: &ProgressFlags) -> bool {
        self.first_incomplete(flags).is_none()
    }
}
