//! Shared form state store
//!
//! One record with two sub-records, updated only through [`Action`]s. The
//! store is owned by the front end and lent to steps through
//! [`crate::wizard::WizardContext`]; there is no global instance.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::{OnboardError, OnboardResult};
use crate::models::{AccountInfo, CustomerInfo};

/// Everything the wizard has collected so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub account_info: AccountInfo,
    pub customer_info: CustomerInfo,
}

/// Store update; each variant replaces its sub-record wholesale
///
/// Deserializes from `{"type": "updateAccountInfo", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Action {
    UpdateAccountInfo(AccountInfo),
    UpdateCustomerInfo(CustomerInfo),
}

/// Payload-free tag of an action, for listeners and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    UpdateAccountInfo,
    UpdateCustomerInfo,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UpdateAccountInfo => "updateAccountInfo",
            Self::UpdateCustomerInfo => "updateCustomerInfo",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::UpdateAccountInfo(_) => ActionKind::UpdateAccountInfo,
            Self::UpdateCustomerInfo(_) => ActionKind::UpdateCustomerInfo,
        }
    }
}

/// Apply an action to a state, producing the next state
pub fn reduce(state: FormState, action: Action) -> FormState {
    match action {
        Action::UpdateAccountInfo(account_info) => FormState {
            account_info,
            ..state
        },
        Action::UpdateCustomerInfo(customer_info) => FormState {
            customer_info,
            ..state
        },
    }
}

type Listener = Box<dyn FnMut(ActionKind, &FormState)>;

/// Owner of the form state
#[derive(Default)]
pub struct FormStore {
    state: FormState,
    listeners: Vec<Listener>,
    dispatch_count: u64,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state snapshot
    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn account_info(&self) -> &AccountInfo {
        &self.state.account_info
    }

    pub fn customer_info(&self) -> &CustomerInfo {
        &self.state.customer_info
    }

    /// Number of actions dispatched so far
    pub fn dispatch_count(&self) -> u64 {
        self.dispatch_count
    }

    /// Register a listener called after every dispatch
    pub fn subscribe(&mut self, listener: impl FnMut(ActionKind, &FormState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Reduce an action into the state and notify listeners
    pub fn dispatch(&mut self, action: Action) {
        let kind = action.kind();
        tracing::debug!(action = %kind, "dispatching form update");

        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
        self.dispatch_count += 1;

        for listener in &mut self.listeners {
            listener(kind, &self.state);
        }
    }

    /// Parse a JSON array of actions and dispatch them in order
    ///
    /// Nothing is dispatched unless every entry is a known action.
    pub fn apply_prefill(&mut self, source_name: &str, json: &str) -> OnboardResult<usize> {
        let actions: Vec<Action> = serde_json::from_str(json)
            .map_err(|e| OnboardError::prefill(source_name, e.to_string()))?;

        let count = actions.len();
        for action in actions {
            self.dispatch(action);
        }

        tracing::info!(source = source_name, count, "applied prefill actions");
        Ok(count)
    }

    /// Read and apply a prefill file
    pub fn load_prefill(&mut self, path: &Path) -> OnboardResult<usize> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            OnboardError::Io(format!("Failed to read prefill file {}: {}", path.display(), e))
        })?;
        self.apply_prefill(&path.display().to_string(), &json)
    }
}

impl fmt::Debug for FormStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .field("dispatch_count", &self.dispatch_count)
            .finish()
    }
}
