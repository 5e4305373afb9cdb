//! Line-oriented wizard
//!
//! The same steps as the TUI for terminals where a full-screen interface is
//! unavailable, and for scripted input.

pub mod console;
pub mod steps;
pub mod wizard;

pub use console::Console;
pub use wizard::{wait_for_redirect, PromptResult, PromptWizard, RedirectTrigger};
