//! Event handler for the TUI
//!
//! Routes keyboard and mouse events to the form of the active step.

use std::time::Instant;

use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use super::app::App;
use super::event::Event;
use super::steps::FormAction;
use crate::wizard::Step;

/// Rows moved per mouse wheel notch
const WHEEL_ROWS: isize = 3;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Tick => app.tick(Instant::now()),
        Event::Resize(_, _) => {}
    }
    app.sync_step(Instant::now());
    Ok(())
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        tracing::info!(step = app.wizard.active_step(), "quit before redirect");
        app.quit();
        return;
    }

    let action = match app.current_step() {
        Some(Step::Account) => {
            if key.code == KeyCode::Esc {
                app.quit();
                return;
            }
            app.account_form.handle_key(key)
        }
        Some(Step::Identity) => app.identity_form.handle_key(key),
        Some(Step::Agreement) => app.agreement_form.handle_key(key),
        Some(Step::Complete) => app.complete.handle_key(key),
        None => {
            if key.code == KeyCode::Esc {
                app.quit();
            }
            FormAction::None
        }
    };

    match action {
        FormAction::None => {}
        FormAction::Submit => app.submit(Local::now().date_naive()),
        FormAction::Back => app.back(),
        FormAction::LeaveNow => app.leave_now(),
    }
}

/// Mouse wheel scrolls the legal text on the steps that show one
fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    let delta = match mouse.kind {
        MouseEventKind::ScrollDown => WHEEL_ROWS,
        MouseEventKind::ScrollUp => -WHEEL_ROWS,
        _ => return,
    };

    match app.current_step() {
        Some(Step::Identity) => app.identity_form.scroll_terms(delta),
        Some(Step::Agreement) => app.agreement_form.letter.scroll_by(delta),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::store::FormStore;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn wheel_down() -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn app() -> App {
        App::new(Settings::default(), FormStore::new())
    }

    #[test]
    fn test_ctrl_c_quits_without_redirect() {
        let mut app = app();
        handle_event(
            &mut app,
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        )
        .unwrap();
        assert!(app.should_quit);
        assert!(app.redirect.is_none());
    }

    #[test]
    fn test_enter_on_empty_account_form_stays_put() {
        let mut app = app();
        handle_event(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.wizard.active_step(), 0);
        assert!(!app.account_form.errors.is_empty());
    }

    #[test]
    fn test_wheel_on_identity_step_gates_consents() {
        let mut app = app();
        app.wizard.set_active_step(1);
        handle_event(&mut app, Event::Resize(80, 24)).unwrap();
        app.identity_form.terms.set_viewport(60, 10);

        for _ in 0..100 {
            handle_event(&mut app, wheel_down()).unwrap();
        }
        assert!(app.identity_form.toc_agreement);
        assert!(app.identity_form.poa_agreement);
    }

    #[test]
    fn test_escape_on_identity_goes_back() {
        let mut app = app();
        app.wizard.set_active_step(1);
        handle_event(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.wizard.active_step(), 0);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut app = app();
        let mut release = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        release.state = KeyEventState::NONE;
        handle_event(&mut app, Event::Key(release)).unwrap();
        assert!(!app.should_quit);
    }
}
