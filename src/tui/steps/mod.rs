//! Step screens
//!
//! One form state per wizard step. Each form turns key presses into edits
//! and reports a [`FormAction`] the handler acts on; submission itself goes
//! through `wizard::steps`.

pub mod account;
pub mod agreement;
pub mod complete;
pub mod identity;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

pub use account::AccountFormState;
pub use agreement::AgreementFormState;
pub use complete::CompleteState;
pub use identity::IdentityFormState;

/// What a key press on a form asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    /// Key consumed (or ignored) without leaving the form
    None,
    /// Validate and submit the step
    Submit,
    /// The identity step's back control
    Back,
    /// Fire the redirect now
    LeaveNow,
}

/// Move a focus index forward, wrapping
pub(crate) fn next_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + 1) % len
    }
}

/// Move a focus index backward, wrapping
pub(crate) fn prev_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

/// Ctrl+R shows or hides the focused secret field
pub(crate) fn is_reveal_key(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Style for a field label
pub(crate) fn label_style(focused: bool, has_error: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if has_error {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Yellow)
    }
}

/// `[x] Label` checkbox line
pub(crate) fn checkbox_line(label: &str, checked: bool, focused: bool, has_error: bool) -> Line<'static> {
    let mark = if checked { "[x] " } else { "[ ] " };
    let mut spans = vec![
        Span::styled(mark, Style::default().fg(Color::White)),
        Span::styled(label.to_string(), label_style(focused, has_error)),
    ];
    if focused {
        spans.push(Span::styled(
            " (Space to toggle)",
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Bracketed button line
pub(crate) fn button_line(label: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(Span::styled(format!("[ {} ]", label), style))
}

/// Key hint line used at the bottom of each form
pub(crate) fn hints_line(hints: &[(&'static str, &'static str, Color)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (key, action, color) in hints {
        spans.push(Span::styled(*key, Style::default().fg(*color)));
        spans.push(Span::raw(format!(" {}  ", action)));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_wraps() {
        assert_eq!(next_index(2, 3), 0);
        assert_eq!(prev_index(0, 3), 2);
        assert_eq!(prev_index(2, 3), 1);
        assert_eq!(next_index(0, 0), 0);
    }
}
