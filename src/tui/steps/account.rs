//! Account creation screen
//!
//! Fourteen fields in two columns. State and loan amount are pickers cycled
//! with Left/Right; everything else is free text.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{hints_line, is_reveal_key, label_style, next_index, prev_index, FormAction};
use crate::models::{AccountField, AccountInfo, LOAN_AMOUNTS, US_STATES};
use crate::tui::widgets::input::{render_field, TextInput};
use crate::validation::FieldErrors;

/// Fields rendered in the left column; the rest go on the right
const LEFT_COLUMN: usize = 7;

/// State for the account form
#[derive(Debug, Clone)]
pub struct AccountFormState {
    /// Index into `AccountField::ALL`
    pub focused: usize,
    /// One input per `AccountField::ALL` entry
    inputs: Vec<TextInput>,
    pub errors: FieldErrors<AccountField>,
}

impl Default for AccountFormState {
    fn default() -> Self {
        Self::from_info(&AccountInfo::default())
    }
}

fn is_picker(field: AccountField) -> bool {
    matches!(field, AccountField::State | AccountField::LoanAmount)
}

fn placeholder(field: AccountField) -> &'static str {
    match field {
        AccountField::Email | AccountField::RepEmail => "name@example.com",
        AccountField::Phone | AccountField::RepPhone => "555-123-4567",
        AccountField::Zip => "93401",
        AccountField::Password => "at least 8 characters",
        AccountField::Kw => "e.g. 7.2",
        AccountField::State | AccountField::LoanAmount => "◀ ▶ to choose",
        _ => "",
    }
}

impl AccountFormState {
    /// Form pre-populated from the stored record
    pub fn from_info(info: &AccountInfo) -> Self {
        let inputs = AccountField::ALL
            .iter()
            .map(|&field| {
                TextInput::new()
                    .label(field.label())
                    .placeholder(placeholder(field))
                    .masked(field == AccountField::Password)
                    .read_only(is_picker(field))
                    .content(info.value(field))
            })
            .collect();

        Self {
            focused: 0,
            inputs,
            errors: FieldErrors::new(),
        }
    }

    pub fn focused_field(&self) -> AccountField {
        AccountField::ALL[self.focused.min(AccountField::ALL.len() - 1)]
    }

    pub fn set_focus(&mut self, field: AccountField) {
        if let Some(i) = AccountField::ALL.iter().position(|f| *f == field) {
            self.focused = i;
        }
    }

    pub fn next_field(&mut self) {
        self.focused = next_index(self.focused, AccountField::ALL.len());
    }

    pub fn prev_field(&mut self) {
        self.focused = prev_index(self.focused, AccountField::ALL.len());
    }

    pub fn input(&self, field: AccountField) -> &TextInput {
        &self.inputs[field_position(field)]
    }

    pub fn input_mut(&mut self, field: AccountField) -> &mut TextInput {
        &mut self.inputs[field_position(field)]
    }

    /// Snapshot the form as a record
    pub fn to_info(&self) -> AccountInfo {
        let mut info = AccountInfo::default();
        for (field, input) in AccountField::ALL.iter().zip(&self.inputs) {
            info.set(*field, input.value());
        }
        info
    }

    /// Show submit errors and move focus to the first offending field
    pub fn show_errors(&mut self, errors: FieldErrors<AccountField>) {
        if let Some(first) = errors.first_field() {
            self.set_focus(first);
        }
        self.errors = errors;
    }

    /// Cycle a picker field one entry, wrapping past either end
    fn cycle_picker(&mut self, field: AccountField, forward: bool) {
        let options: Vec<&str> = match field {
            AccountField::State => US_STATES.iter().map(|(code, _)| *code).collect(),
            AccountField::LoanAmount => LOAN_AMOUNTS.to_vec(),
            _ => return,
        };

        let input = self.input_mut(field);
        let current = options.iter().position(|o| *o == input.value());
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => options.len() - 1,
            (Some(i), true) => next_index(i, options.len()),
            (Some(i), false) => prev_index(i, options.len()),
        };
        input.set_value(options[next]);
    }

    /// Jump the state picker to the next code starting with `letter`
    fn jump_state(&mut self, letter: char) {
        let letter = letter.to_ascii_uppercase();
        let input = self.input_mut(AccountField::State);
        let start = US_STATES
            .iter()
            .position(|(code, _)| *code == input.value())
            .map(|i| i + 1)
            .unwrap_or(0);

        let found = (0..US_STATES.len())
            .map(|offset| (start + offset) % US_STATES.len())
            .find(|&i| US_STATES[i].0.starts_with(letter));
        if let Some(i) = found {
            input.set_value(US_STATES[i].0);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        let field = self.focused_field();

        match key.code {
            KeyCode::Enter => return FormAction::Submit,
            _ if is_reveal_key(&key) => {
                self.input_mut(field).toggle_reveal();
            }
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.prev_field(),
            KeyCode::Right if is_picker(field) => self.cycle_picker(field, true),
            KeyCode::Left if is_picker(field) => self.cycle_picker(field, false),
            KeyCode::Backspace | KeyCode::Delete if is_picker(field) => {
                self.input_mut(field).clear();
                self.errors.clear(field);
            }
            KeyCode::Char(c)
                if field == AccountField::State
                    && c.is_ascii_alphabetic()
                    && !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.jump_state(c);
                self.errors.clear(field);
            }
            _ => {
                if self.input_mut(field).handle_key(key) {
                    self.errors.clear(field);
                }
            }
        }
        FormAction::None
    }
}

fn field_position(field: AccountField) -> usize {
    AccountField::ALL
        .iter()
        .position(|f| *f == field)
        .unwrap_or(0)
}

/// Render the account form
pub fn render(frame: &mut Frame, form: &AccountFormState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Intro
            Constraint::Length(1), // Spacer
            Constraint::Min(14),   // Fields
            Constraint::Length(1), // Hints
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Create your account. Fields marked * are required.",
            Style::default().fg(Color::White),
        ))),
        chunks[0],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    let (left, right) = AccountField::ALL.split_at(LEFT_COLUMN);
    render_column(frame, form, left, columns[0]);
    render_column(frame, form, right, columns[1]);

    let hints = hints_line(&[
        ("[Tab]", "Next", Color::White),
        ("[◀ ▶]", "Choose", Color::White),
        ("[Ctrl+R]", "Show/hide password", Color::White),
        ("[Enter]", "Continue", Color::Green),
        ("[Esc]", "Quit", Color::Red),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[3]);
}

fn render_column(frame: &mut Frame, form: &AccountFormState, fields: &[AccountField], area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            fields
                .iter()
                .map(|_| Constraint::Length(2))
                .chain(std::iter::once(Constraint::Min(0)))
                .collect::<Vec<_>>(),
        )
        .split(area);

    let focused = form.focused_field();
    for (field, row) in fields.iter().zip(rows.iter()) {
        let is_focused = *field == focused;
        let error = form.errors.get(*field);

        if is_picker(*field) {
            render_picker(frame, *row, form.input(*field), *field, is_focused, error);
        } else {
            let mut input = form.input(*field).clone();
            if !field.is_optional() {
                input.label.push('*');
            }
            render_field(frame, *row, &input, is_focused, error);
        }
    }
}

fn render_picker(
    frame: &mut Frame,
    area: Rect,
    input: &TextInput,
    field: AccountField,
    focused: bool,
    error: Option<&str>,
) {
    let required = if field.is_optional() { "" } else { "*" };
    let mut spans = vec![Span::styled(
        format!("{}{}: ", input.label, required),
        label_style(focused, error.is_some()),
    )];

    let value = input.value();
    let shown = if value.is_empty() {
        input.placeholder.clone()
    } else if field == AccountField::State {
        US_STATES
            .iter()
            .find(|(code, _)| *code == value)
            .map(|(code, name)| format!("{} {}", code, name))
            .unwrap_or_else(|| value.to_string())
    } else {
        value.to_string()
    };

    let value_style = if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    if focused {
        spans.push(Span::styled("◀ ", Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(shown, value_style));
        spans.push(Span::styled(" ▶", Style::default().fg(Color::Cyan)));
    } else {
        spans.push(Span::styled(shown, value_style));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)),
        Rect { height: 1, ..area },
    );
    if let (Some(message), true) = (error, area.height > 1) {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("  {}", message),
                Style::default().fg(Color::Red),
            ))),
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::tests::valid_account;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut AccountFormState, text: &str) {
        for c in text.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_round_trips_stored_record() {
        let form = AccountFormState::from_info(&valid_account());
        assert_eq!(form.to_info(), valid_account());
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let mut form = AccountFormState::default();
        type_text(&mut form, "Jane");
        form.handle_key(key(KeyCode::Tab));
        type_text(&mut form, "Doe");

        let info = form.to_info();
        assert_eq!(info.first_name, "Jane");
        assert_eq!(info.last_name, "Doe");
        assert_eq!(form.focused_field(), AccountField::LastName);
    }

    #[test]
    fn test_state_picker() {
        let mut form = AccountFormState::default();
        form.set_focus(AccountField::State);

        form.handle_key(key(KeyCode::Right));
        assert_eq!(form.to_info().state, "AL");
        form.handle_key(key(KeyCode::Left));
        assert_eq!(form.to_info().state, "WY");

        form.handle_key(key(KeyCode::Char('c')));
        assert_eq!(form.to_info().state, "CA");
        form.handle_key(key(KeyCode::Char('c')));
        assert_eq!(form.to_info().state, "CO");
    }

    #[test]
    fn test_loan_picker_can_be_cleared() {
        let mut form = AccountFormState::default();
        form.set_focus(AccountField::LoanAmount);
        form.handle_key(key(KeyCode::Right));
        form.handle_key(key(KeyCode::Right));
        assert_eq!(form.to_info().loan_amount, "$50,000 - $75,000");

        form.handle_key(key(KeyCode::Backspace));
        assert_eq!(form.to_info().loan_amount, "");
    }

    #[test]
    fn test_enter_requests_submit() {
        let mut form = AccountFormState::default();
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::Submit);
    }

    #[test]
    fn test_errors_focus_first_field_and_clear_on_edit() {
        let mut form = AccountFormState::from_info(&valid_account());
        let mut info = valid_account();
        info.email = "bad".into();
        form.show_errors(info.validate().unwrap_err());

        assert_eq!(form.focused_field(), AccountField::Email);
        assert!(form.errors.contains(AccountField::Email));

        type_text(&mut form, "x");
        assert!(!form.errors.contains(AccountField::Email));
    }

    #[test]
    fn test_ctrl_r_reveals_password_only() {
        let mut form = AccountFormState::from_info(&valid_account());
        let reveal = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);

        form.set_focus(AccountField::Password);
        assert_eq!(form.input(AccountField::Password).display_value(), "•".repeat(13));
        form.handle_key(reveal);
        assert_eq!(form.input(AccountField::Password).display_value(), "correct horse");
        form.handle_key(reveal);
        assert!(form.input(AccountField::Password).is_hidden());

        form.set_focus(AccountField::FirstName);
        form.handle_key(reveal);
        assert_eq!(form.to_info().first_name, "Jane");
        assert!(form.input(AccountField::Password).is_hidden());
    }
}
