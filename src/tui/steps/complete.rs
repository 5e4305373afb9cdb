//! Completion screen with the redirect countdown

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use url::Url;

use super::{button_line, hints_line, FormAction};
use crate::config::Settings;
use crate::models::AccountInfo;
use crate::wizard::{build_redirect_url, RedirectTimer};

/// Redirect state for the final step
#[derive(Debug, Clone, Default)]
pub struct CompleteState {
    pub timer: Option<RedirectTimer>,
    pub url: Option<Url>,
    pub error: Option<String>,
}

impl CompleteState {
    /// Build the URL and arm the timer at `now`
    ///
    /// When the URL cannot be built the timer stays disarmed and the error
    /// is shown instead.
    pub fn enter(now: Instant, settings: &Settings, account: &AccountInfo) -> Self {
        match build_redirect_url(settings, account) {
            Ok(url) => {
                tracing::info!(
                    delay_secs = settings.redirect_delay_secs,
                    "redirect timer armed"
                );
                Self {
                    timer: Some(RedirectTimer::arm(now, settings.redirect_delay())),
                    url: Some(url),
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "could not build redirect url");
                Self {
                    timer: None,
                    url: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// True exactly once, when the automatic redirect is due
    pub fn poll(&mut self, now: Instant) -> bool {
        self.timer.as_mut().map(|t| t.poll(now)).unwrap_or(false)
    }

    /// True if this call fired the redirect
    pub fn leave_now(&mut self) -> bool {
        self.timer.as_mut().map(|t| t.leave_now()).unwrap_or(false)
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.timer
            .map(|t| t.remaining(now))
            .unwrap_or(Duration::ZERO)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('l') => FormAction::LeaveNow,
            _ => FormAction::None,
        }
    }
}

/// Render the completion message and countdown
pub fn render(frame: &mut Frame, state: &CompleteState, now: Instant, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Heading
            Constraint::Length(4), // Body
            Constraint::Length(2), // Countdown
            Constraint::Length(2), // Button
            Constraint::Min(0),
            Constraint::Length(1), // Hints
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "You're all set!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center),
        chunks[0],
    );

    frame.render_widget(
        Paragraph::new(
            "Your application is complete. To finish enrollment you will be taken to our \
             credit monitoring partner to activate your monitoring account.",
        )
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center),
        chunks[1],
    );

    let countdown = match (&state.error, state.timer) {
        (Some(error), _) => Line::from(Span::styled(
            format!("Redirect unavailable: {}", error),
            Style::default().fg(Color::Red),
        )),
        (None, Some(timer)) if timer.has_fired() => Line::from("Redirecting..."),
        (None, _) => {
            let secs = state.remaining(now).as_secs_f64().ceil() as u64;
            Line::from(vec![
                Span::raw("Redirecting in "),
                Span::styled(
                    secs.to_string(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(if secs == 1 { " second" } else { " seconds" }),
            ])
        }
    };
    frame.render_widget(
        Paragraph::new(countdown).alignment(Alignment::Center),
        chunks[2],
    );

    if state.url.is_some() {
        frame.render_widget(
            Paragraph::new(button_line("Leave now", true)).alignment(Alignment::Center),
            chunks[3],
        );
    }

    let hints = hints_line(&[
        ("[Enter]", "Leave now", Color::Green),
        ("[Ctrl+C]", "Quit", Color::Red),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[5]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::tests::valid_account;

    #[test]
    fn test_enter_arms_timer_with_configured_delay() {
        let now = Instant::now();
        let state = CompleteState::enter(now, &Settings::default(), &valid_account());
        assert!(state.url.is_some());
        assert_eq!(state.remaining(now), Duration::from_secs(8));
    }

    #[test]
    fn test_bad_partner_url_leaves_timer_disarmed() {
        let settings = Settings {
            partner_url: "::".into(),
            ..Settings::default()
        };
        let now = Instant::now();
        let mut state = CompleteState::enter(now, &settings, &valid_account());
        assert!(state.error.is_some());
        assert!(!state.poll(now + Duration::from_secs(60)));
        assert!(!state.leave_now());
    }

    #[test]
    fn test_poll_then_leave_now_fires_once() {
        let now = Instant::now();
        let mut state = CompleteState::enter(now, &Settings::default(), &valid_account());
        assert!(state.poll(now + Duration::from_secs(8)));
        assert!(!state.leave_now());
    }
}
