//! Wizard controller
//!
//! Holds the active step index. Callers are trusted to pass valid indices;
//! an out-of-range index simply resolves to no step.

use super::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WizardController {
    active_step: usize,
}

impl WizardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_step(&self) -> usize {
        self.active_step
    }

    /// Move to step `n` without bounds checking
    pub fn set_active_step(&mut self, n: usize) {
        if n != self.active_step {
            tracing::info!(from = self.active_step, to = n, "changing wizard step");
        }
        self.active_step = n;
    }

    /// The step to render, or None when the index is out of range
    pub fn current(&self) -> Option<Step> {
        Step::from_index(self.active_step)
    }
}
