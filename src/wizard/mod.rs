//! Onboarding wizard core
//!
//! Step sequencing, step submission rules, the scroll-gated terms viewer and
//! the partner redirect. Front ends (`tui`, `prompt`) drive this module; it
//! never touches the terminal.

pub mod controller;
pub mod legal;
pub mod redirect;
pub mod steps;

use std::fmt;

use crate::store::FormStore;

pub use controller::WizardController;
pub use legal::TermsViewer;
pub use redirect::{build_redirect_url, RedirectTimer};

/// The wizard's steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Account,
    Identity,
    Agreement,
    Complete,
}

/// All steps in order; a step's position is its index
pub const STEPS: [Step; 4] = [Step::Account, Step::Identity, Step::Agreement, Step::Complete];

impl Step {
    pub fn from_index(index: usize) -> Option<Self> {
        STEPS.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            Self::Account => 0,
            Self::Identity => 1,
            Self::Agreement => 2,
            Self::Complete => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Account => "Create Account",
            Self::Identity => "Verify Identity",
            Self::Agreement => "Letter of Intent",
            Self::Complete => "Complete",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// What a step gets to work with: the store and the controller
pub struct WizardContext<'a> {
    pub store: &'a mut FormStore,
    pub wizard: &'a mut WizardController,
}

impl<'a> WizardContext<'a> {
    pub fn new(store: &'a mut FormStore, wizard: &'a mut WizardController) -> Self {
        Self { store, wizard }
    }
}
