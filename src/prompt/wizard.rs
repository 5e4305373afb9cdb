//! Prompt wizard orchestration
//!
//! Runs the same step sequence as the TUI over a line-oriented console and
//! waits out the redirect delay with a "leave now" escape hatch.

use std::io::{BufRead, Write};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use url::Url;

use crate::config::Settings;
use crate::error::{OnboardError, OnboardResult};
use crate::store::FormStore;
use crate::wizard::{build_redirect_url, RedirectTimer, Step, WizardContext, WizardController};

use super::console::Console;
use super::steps::{AccountPromptStep, AgreementPromptStep, IdentityPromptStep};

/// Result of running the prompt wizard
#[derive(Debug, Clone)]
pub struct PromptResult {
    /// Where the customer goes next
    pub redirect_url: Url,
}

/// How the redirect was triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTrigger {
    Timer,
    LeaveNow,
}

/// The prompt wizard
pub struct PromptWizard<'a> {
    settings: &'a Settings,
}

impl<'a> PromptWizard<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Walk the steps until the completion step is reached
    pub fn run<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        store: &mut FormStore,
        today: NaiveDate,
    ) -> OnboardResult<PromptResult> {
        console.blank()?;
        console.say("===========================================")?;
        console.say("  Welcome! Let's get you enrolled.")?;
        console.say("===========================================")?;
        console.blank()?;
        console.say("Press Ctrl+C at any time to cancel.")?;

        let mut wizard = WizardController::new();
        loop {
            let mut ctx = WizardContext::new(store, &mut wizard);
            match ctx.wizard.current() {
                Some(Step::Account) => AccountPromptStep::run(console, &mut ctx)?,
                Some(Step::Identity) => IdentityPromptStep::run(
                    console,
                    &mut ctx,
                    self.settings.scroll_threshold,
                    today,
                )?,
                Some(Step::Agreement) => AgreementPromptStep::run(console, &mut ctx, today)?,
                Some(Step::Complete) => {
                    let redirect_url = build_redirect_url(self.settings, ctx.store.account_info())?;
                    console.heading("You're all set!")?;
                    console.say(
                        "To finish enrollment you will be taken to our credit monitoring partner.",
                    )?;
                    return Ok(PromptResult { redirect_url });
                }
                None => {
                    return Err(OnboardError::Config(format!(
                        "wizard has no step at index {}",
                        ctx.wizard.active_step()
                    )))
                }
            }
        }
    }
}

/// Block until the redirect is due or a "leave now" signal arrives
///
/// A closed channel counts as "no signal": the full delay is still waited.
pub fn wait_for_redirect(delay: Duration, leave_now: &Receiver<()>) -> RedirectTrigger {
    let mut timer = RedirectTimer::arm(Instant::now(), delay);

    match leave_now.recv_timeout(delay) {
        Ok(()) if timer.leave_now() => return RedirectTrigger::LeaveNow,
        Ok(()) | Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {}
    }

    loop {
        let now = Instant::now();
        if timer.poll(now) {
            return RedirectTrigger::Timer;
        }
        thread::sleep(timer.remaining(now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::mpsc;
    use tempfile::TempDir;

    #[test]
    fn test_scripted_run_reaches_completion() {
        let dir = TempDir::new().unwrap();
        let id = dir.path().join("id.jpg");
        let bill = dir.path().join("bill.pdf");
        std::fs::write(&id, b"id").unwrap();
        std::fs::write(&bill, b"bill").unwrap();

        let script = format!(
            "Jane\nDoe\njane.doe@example.com\ncorrect horse\n555-123-4567\n12 Main St\n\
             San Luis Obispo\nCA\n93401\n\n\n\n\n\n\
             123-45-6789\n07/04/1990\n{}\n{}\nend\ns\n\
             Jane Doe\n",
            id.display(),
            bill.display()
        );
        let mut console = Console::new(Cursor::new(script.into_bytes()), Vec::new());
        let mut store = FormStore::new();
        let settings = Settings::default();

        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let result = PromptWizard::new(&settings)
            .run(&mut console, &mut store, today)
            .unwrap();

        assert_eq!(store.dispatch_count(), 2);
        assert!(result
            .redirect_url
            .as_str()
            .contains("bill_city=San+Luis+Obispo"));
    }

    #[test]
    fn test_leave_now_signal_wins() {
        let (tx, rx) = mpsc::channel();
        tx.send(()).unwrap();
        assert_eq!(
            wait_for_redirect(Duration::from_secs(30), &rx),
            RedirectTrigger::LeaveNow
        );
    }

    #[test]
    fn test_closed_channel_waits_for_timer() {
        let (tx, rx) = mpsc::channel::<()>();
        drop(tx);
        let start = Instant::now();
        assert_eq!(
            wait_for_redirect(Duration::from_millis(50), &rx),
            RedirectTrigger::Timer
        );
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
