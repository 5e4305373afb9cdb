//! onboard-cli - Terminal customer onboarding wizard
//!
//! This library provides a multi-step sign-up flow: account creation,
//! identity verification with scroll-gated consents, a letter of intent, and
//! a timed hand-off to a credit-monitoring partner.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: The records collected by the wizard
//! - `validation`: Field rules and per-form error maps
//! - `store`: Shared form state updated through actions
//! - `wizard`: Step sequencing, submission rules, legal text and redirect
//! - `tui`: Full-screen front end
//! - `prompt`: Line-oriented front end
//! - `display`: Table output for the non-interactive commands
//! - `logging`: File-backed tracing setup
//!
//! # Example
//!
//! ```rust,ignore
//! use onboard::store::FormStore;
//! use onboard::wizard::{steps, WizardContext, WizardController};
//!
//! let mut store = FormStore::new();
//! let mut wizard = WizardController::new();
//! let mut ctx = WizardContext::new(&mut store, &mut wizard);
//! steps::submit_account(&mut ctx, account_info)?;
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod prompt;
pub mod store;
pub mod tui;
pub mod validation;
pub mod wizard;

pub use error::{OnboardError, OnboardResult};
