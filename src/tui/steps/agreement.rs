//! Letter of intent screen

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{hints_line, FormAction};
use crate::models::{Agreement, AgreementField};
use crate::tui::widgets::input::{render_field, TextInput};
use crate::validation::FieldErrors;
use crate::wizard::legal::LETTER_OF_INTENT;
use crate::wizard::TermsViewer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgreementFocus {
    Letter,
    #[default]
    Signature,
}

/// State for the letter-of-intent form
#[derive(Debug, Clone)]
pub struct AgreementFormState {
    pub focus: AgreementFocus,
    pub letter: TermsViewer,
    pub signature_input: TextInput,
    pub date_input: TextInput,
    pub errors: FieldErrors<AgreementField>,
}

impl AgreementFormState {
    /// Blank form dated `today`
    pub fn new(today: NaiveDate) -> Self {
        let agreement = Agreement::dated(today);
        Self {
            focus: AgreementFocus::Signature,
            letter: TermsViewer::new(LETTER_OF_INTENT, 0),
            signature_input: TextInput::new()
                .label("Your Name*")
                .placeholder("type your full name"),
            date_input: TextInput::new()
                .label("Date")
                .read_only(true)
                .content(agreement.agreement_date),
            errors: FieldErrors::new(),
        }
    }

    pub fn to_agreement(&self) -> Agreement {
        Agreement {
            signature: self.signature_input.value().to_string(),
            agreement_date: self.date_input.value().to_string(),
        }
    }

    pub fn show_errors(&mut self, errors: FieldErrors<AgreementField>) {
        self.focus = AgreementFocus::Signature;
        self.errors = errors;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Enter => return FormAction::Submit,
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    AgreementFocus::Letter => AgreementFocus::Signature,
                    AgreementFocus::Signature => AgreementFocus::Letter,
                };
                return FormAction::None;
            }
            _ => {}
        }

        match self.focus {
            AgreementFocus::Letter => match key.code {
                KeyCode::Down | KeyCode::Char('j') => self.letter.scroll_by(1),
                KeyCode::Up | KeyCode::Char('k') => self.letter.scroll_by(-1),
                KeyCode::PageDown | KeyCode::Char(' ') => self.letter.page_down(),
                KeyCode::PageUp => self.letter.page_up(),
                _ => {}
            },
            AgreementFocus::Signature => {
                if self.signature_input.handle_key(key) {
                    self.errors.clear(AgreementField::Signature);
                }
            }
        }
        FormAction::None
    }
}

/// Render the letter of intent and signature fields
pub fn render(frame: &mut Frame, form: &mut AgreementFormState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // Letter
            Constraint::Length(2), // Signature
            Constraint::Length(2), // Date
            Constraint::Length(1), // Hints
        ])
        .split(area);

    let border = if form.focus == AgreementFocus::Letter {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(" Letter of Intent ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);

    form.letter
        .set_viewport(inner.width as usize, inner.height as usize);
    let lines: Vec<Line> = form
        .letter
        .visible_lines()
        .iter()
        .map(|l| Line::from(l.as_str()))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);

    render_field(
        frame,
        chunks[1],
        &form.signature_input,
        form.focus == AgreementFocus::Signature,
        form.errors.get(AgreementField::Signature),
    );
    render_field(
        frame,
        chunks[2],
        &form.date_input,
        false,
        form.errors.get(AgreementField::Date),
    );

    let hints = hints_line(&[
        ("[Tab]", "Letter/Signature", Color::White),
        ("[Enter]", "Sign", Color::Green),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_date_defaults_to_today_and_is_read_only() {
        let mut form = AgreementFormState::new(today());
        assert_eq!(form.to_agreement().agreement_date, "06/01/2024");

        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Backspace));
        assert_eq!(form.to_agreement().agreement_date, "06/01/2024");
    }

    #[test]
    fn test_typing_signs() {
        let mut form = AgreementFormState::new(today());
        for c in "Jane Doe".chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(form.to_agreement().signature, "Jane Doe");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::Submit);
    }

    #[test]
    fn test_letter_scrolls_when_focused() {
        let mut form = AgreementFormState::new(today());
        form.letter.set_viewport(40, 5);
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(form.letter.offset(), 5);
        assert_eq!(form.to_agreement().signature, "");
    }
}
