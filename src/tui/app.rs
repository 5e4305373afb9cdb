//! Application state for the TUI
//!
//! The App struct owns the form store and the wizard controller and holds
//! the per-step form state needed for rendering and handling events.

use std::time::Instant;

use chrono::{Local, NaiveDate};
use url::Url;
use uuid::Uuid;

use crate::config::Settings;
use crate::store::FormStore;
use crate::wizard::{steps, Step, WizardContext, WizardController};

use super::steps::{AccountFormState, AgreementFormState, CompleteState, IdentityFormState};
use super::widgets::{Notification, NotificationQueue};

/// Main application state
pub struct App {
    /// Effective settings for this run
    pub settings: Settings,

    /// Collected form data
    pub store: FormStore,

    /// Which step is showing
    pub wizard: WizardController,

    /// Reference shown to the customer and attached to log lines
    pub session_id: Uuid,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Toast notifications
    pub notifications: NotificationQueue,

    pub account_form: AccountFormState,
    pub identity_form: IdentityFormState,
    pub agreement_form: AgreementFormState,
    pub complete: CompleteState,

    /// Set once the redirect fires
    pub redirect: Option<Url>,

    /// Step whose form was last loaded
    entered_step: Option<usize>,
}

impl App {
    /// Create the app over an already prefilled store
    pub fn new(settings: Settings, store: FormStore) -> Self {
        let threshold = settings.scroll_threshold;
        let mut app = Self {
            account_form: AccountFormState::from_info(store.account_info()),
            identity_form: IdentityFormState::from_info(store.customer_info(), threshold),
            agreement_form: AgreementFormState::new(Local::now().date_naive()),
            complete: CompleteState::default(),
            settings,
            store,
            wizard: WizardController::new(),
            session_id: Uuid::new_v4(),
            should_quit: false,
            notifications: NotificationQueue::new(),
            redirect: None,
            entered_step: None,
        };
        app.sync_step(Instant::now());
        app
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn current_step(&self) -> Option<Step> {
        self.wizard.current()
    }

    /// Load the form for a newly entered step
    ///
    /// Forms start from whatever the store holds; entering the final step
    /// arms the redirect timer.
    pub fn sync_step(&mut self, now: Instant) {
        let active = self.wizard.active_step();
        if self.entered_step == Some(active) {
            return;
        }
        self.entered_step = Some(active);
        tracing::debug!(session = %self.session_id, step = active, "step entered");

        match Step::from_index(active) {
            Some(Step::Account) => {
                self.account_form = AccountFormState::from_info(self.store.account_info());
            }
            Some(Step::Identity) => {
                self.identity_form = IdentityFormState::from_info(
                    self.store.customer_info(),
                    self.settings.scroll_threshold,
                );
            }
            Some(Step::Agreement) => {
                self.agreement_form = AgreementFormState::new(Local::now().date_naive());
            }
            Some(Step::Complete) => {
                self.complete =
                    CompleteState::enter(now, &self.settings, self.store.account_info());
            }
            None => {}
        }
    }

    /// Submit the current step as of `today`
    pub fn submit(&mut self, today: NaiveDate) {
        let before = self.current_step();
        let mut ctx = WizardContext::new(&mut self.store, &mut self.wizard);

        match before {
            Some(Step::Account) => {
                let info = self.account_form.to_info();
                if let Err(errors) = steps::submit_account(&mut ctx, info) {
                    self.account_form.show_errors(errors);
                }
            }
            Some(Step::Identity) => {
                let info = self.identity_form.to_info();
                if let Err(errors) = steps::submit_identity_on(&mut ctx, info, today) {
                    self.identity_form.show_errors(errors);
                }
            }
            Some(Step::Agreement) => {
                let agreement = self.agreement_form.to_agreement();
                if let Err(errors) = steps::submit_agreement(&mut ctx, &agreement) {
                    self.agreement_form.show_errors(errors);
                }
            }
            Some(Step::Complete) | None => {}
        }

        if let Some(step) = before.filter(|_| self.current_step() != before) {
            self.notifications
                .push(Notification::success(format!("{} done", step)));
        }
    }

    /// The identity step's back control
    pub fn back(&mut self) {
        if self.current_step() == Some(Step::Identity) {
            let mut ctx = WizardContext::new(&mut self.store, &mut self.wizard);
            steps::back_to_account(&mut ctx);
        }
    }

    /// Manual redirect override on the final step
    pub fn leave_now(&mut self) {
        if self.complete.leave_now() {
            self.fire_redirect();
        }
    }

    /// Periodic update: expire toasts and poll the redirect timer
    pub fn tick(&mut self, now: Instant) {
        self.notifications.remove_expired_at(now);
        if self.complete.poll(now) {
            self.fire_redirect();
        }
    }

    fn fire_redirect(&mut self) {
        match self.complete.url.clone() {
            Some(url) => {
                tracing::info!(session = %self.session_id, host = ?url.host_str(), "leaving for partner");
                self.redirect = Some(url);
                self.quit();
            }
            None => {
                self.notifications
                    .push(Notification::error("No redirect address is available"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::tests::valid_account;
    use crate::models::customer::tests::valid_customer;
    use crate::store::Action;
    use std::time::Duration;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn app() -> App {
        App::new(Settings::default(), FormStore::new())
    }

    #[test]
    fn test_full_walkthrough_redirects_once() {
        let dir = TempDir::new().unwrap();
        let start = Instant::now();
        let mut app = app();

        app.account_form = AccountFormState::from_info(&valid_account());
        app.submit(today());
        app.sync_step(start);
        assert_eq!(app.current_step(), Some(Step::Identity));

        app.identity_form = IdentityFormState::from_info(&valid_customer(dir.path()), 5);
        app.submit(today());
        app.sync_step(start);
        assert_eq!(app.current_step(), Some(Step::Agreement));

        for c in "Jane Doe".chars() {
            app.agreement_form.signature_input.insert(c);
        }
        app.submit(today());
        app.sync_step(start);
        assert_eq!(app.current_step(), Some(Step::Complete));

        app.tick(start + Duration::from_secs(7));
        assert!(app.redirect.is_none());

        app.tick(start + Duration::from_secs(8));
        let url = app.redirect.clone().unwrap();
        assert!(url.as_str().contains("firstname=Jane"));
        assert!(app.should_quit);

        app.redirect = None;
        app.tick(start + Duration::from_secs(16));
        app.leave_now();
        assert!(app.redirect.is_none());
    }

    #[test]
    fn test_invalid_submit_keeps_step_and_shows_errors() {
        let mut app = app();
        app.submit(today());
        assert_eq!(app.wizard.active_step(), 0);
        assert!(!app.account_form.errors.is_empty());
        assert_eq!(app.store.dispatch_count(), 0);
    }

    #[test]
    fn test_back_reloads_account_form_from_store() {
        let mut app = app();
        app.store.dispatch(Action::UpdateAccountInfo(valid_account()));
        app.wizard.set_active_step(1);
        app.sync_step(Instant::now());

        app.back();
        app.sync_step(Instant::now());

        assert_eq!(app.current_step(), Some(Step::Account));
        assert_eq!(app.account_form.to_info(), valid_account());
    }

    #[test]
    fn test_back_is_ignored_outside_identity() {
        let mut app = app();
        app.wizard.set_active_step(2);
        app.back();
        assert_eq!(app.wizard.active_step(), 2);
    }

    #[test]
    fn test_leave_now_preempts_timer() {
        let start = Instant::now();
        let mut app = app();
        app.store.dispatch(Action::UpdateAccountInfo(valid_account()));
        app.wizard.set_active_step(3);
        app.sync_step(start);

        app.leave_now();
        assert!(app.redirect.is_some());

        app.redirect = None;
        app.tick(start + Duration::from_secs(8));
        assert!(app.redirect.is_none());
    }

    #[test]
    fn test_prefilled_store_populates_first_form() {
        let mut store = FormStore::new();
        store.dispatch(Action::UpdateAccountInfo(valid_account()));
        let app = App::new(Settings::default(), store);
        assert_eq!(app.account_form.to_info(), valid_account());
    }
}
