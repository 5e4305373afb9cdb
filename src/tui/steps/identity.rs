//! Identity verification screen
//!
//! SSN, date of birth and the two document paths, then the scrollable terms
//! with their consent checkboxes and the Back button.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{
    button_line, checkbox_line, hints_line, is_reveal_key, next_index, prev_index, FormAction,
};
use crate::models::{CustomerField, CustomerInfo, DocumentRef, SecretText};
use crate::tui::widgets::input::{render_field, TextInput};
use crate::validation::FieldErrors;
use crate::wizard::legal::TERMS_TEXT;
use crate::wizard::TermsViewer;

/// Focusable elements of the identity form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityFocus {
    #[default]
    Ssn,
    DateOfBirth,
    PhotoId,
    ProofOfAddress,
    Terms,
    TocAgreement,
    PoaAgreement,
    Back,
}

impl IdentityFocus {
    const ORDER: [IdentityFocus; 8] = [
        Self::Ssn,
        Self::DateOfBirth,
        Self::PhotoId,
        Self::ProofOfAddress,
        Self::Terms,
        Self::TocAgreement,
        Self::PoaAgreement,
        Self::Back,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[next_index(self.position(), Self::ORDER.len())]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[prev_index(self.position(), Self::ORDER.len())]
    }

    fn from_field(field: CustomerField) -> Self {
        match field {
            CustomerField::Ssn => Self::Ssn,
            CustomerField::DateOfBirth => Self::DateOfBirth,
            CustomerField::PhotoId => Self::PhotoId,
            CustomerField::ProofOfAddress => Self::ProofOfAddress,
            CustomerField::TocAgreement => Self::TocAgreement,
            CustomerField::PoaAgreement => Self::PoaAgreement,
        }
    }
}

/// State for the identity form
#[derive(Debug, Clone)]
pub struct IdentityFormState {
    pub focus: IdentityFocus,
    pub ssn_input: TextInput,
    pub dob_input: TextInput,
    pub photo_id_input: TextInput,
    pub proof_input: TextInput,
    pub terms: TermsViewer,
    pub toc_agreement: bool,
    pub poa_agreement: bool,
    pub errors: FieldErrors<CustomerField>,
}

impl IdentityFormState {
    /// Form pre-populated from the stored record
    pub fn from_info(info: &CustomerInfo, scroll_threshold: usize) -> Self {
        Self {
            focus: IdentityFocus::Ssn,
            ssn_input: TextInput::new()
                .label("SSN*")
                .placeholder("123-45-6789")
                .masked(true)
                .content(info.ssn.expose()),
            dob_input: TextInput::new()
                .label("Date of Birth*")
                .placeholder("MM/DD/YYYY")
                .content(info.date_of_birth.as_str()),
            photo_id_input: TextInput::new()
                .label("Photo of ID*")
                .placeholder("path to a pdf, png, jpg or heic file")
                .content(info.photo_id.as_str()),
            proof_input: TextInput::new()
                .label("Proof of Address*")
                .placeholder("path to a pdf, png, jpg or heic file")
                .content(info.proof_of_address.as_str()),
            terms: TermsViewer::new(TERMS_TEXT, scroll_threshold),
            toc_agreement: info.toc_agreement,
            poa_agreement: info.poa_agreement,
            errors: FieldErrors::new(),
        }
    }

    /// Snapshot the form as a record
    pub fn to_info(&self) -> CustomerInfo {
        CustomerInfo {
            ssn: SecretText::new(self.ssn_input.value()),
            date_of_birth: self.dob_input.value().trim().to_string(),
            photo_id: DocumentRef::new(self.photo_id_input.value()),
            proof_of_address: DocumentRef::new(self.proof_input.value()),
            toc_agreement: self.toc_agreement,
            poa_agreement: self.poa_agreement,
        }
    }

    pub fn show_errors(&mut self, errors: FieldErrors<CustomerField>) {
        if let Some(first) = errors.first_field() {
            self.focus = IdentityFocus::from_field(first);
        }
        self.errors = errors;
    }

    /// Scroll the terms; reaching the bottom marks both consents
    pub fn scroll_terms(&mut self, delta: isize) {
        if self
            .terms
            .scroll_and_gate(delta, &mut self.toc_agreement, &mut self.poa_agreement)
        {
            self.errors.clear(CustomerField::TocAgreement);
            self.errors.clear(CustomerField::PoaAgreement);
        }
    }

    fn focused_input(&mut self) -> Option<(CustomerField, &mut TextInput)> {
        match self.focus {
            IdentityFocus::Ssn => Some((CustomerField::Ssn, &mut self.ssn_input)),
            IdentityFocus::DateOfBirth => Some((CustomerField::DateOfBirth, &mut self.dob_input)),
            IdentityFocus::PhotoId => Some((CustomerField::PhotoId, &mut self.photo_id_input)),
            IdentityFocus::ProofOfAddress => {
                Some((CustomerField::ProofOfAddress, &mut self.proof_input))
            }
            _ => None,
        }
    }

    fn toggle(&mut self, field: CustomerField) {
        let flag = match field {
            CustomerField::TocAgreement => &mut self.toc_agreement,
            CustomerField::PoaAgreement => &mut self.poa_agreement,
            _ => return,
        };
        *flag = !*flag;
        self.errors.clear(field);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Esc => return FormAction::Back,
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return FormAction::None;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return FormAction::None;
            }
            KeyCode::Enter => {
                return if self.focus == IdentityFocus::Back {
                    FormAction::Back
                } else {
                    FormAction::Submit
                };
            }
            _ => {}
        }

        match self.focus {
            IdentityFocus::Terms => match key.code {
                KeyCode::Down | KeyCode::Char('j') => self.scroll_terms(1),
                KeyCode::Up | KeyCode::Char('k') => self.scroll_terms(-1),
                KeyCode::PageDown | KeyCode::Char(' ') => {
                    let page = self.terms.viewport().max(1) as isize;
                    self.scroll_terms(page);
                }
                KeyCode::PageUp => {
                    let page = self.terms.viewport().max(1) as isize;
                    self.scroll_terms(-page);
                }
                KeyCode::End => self.scroll_terms(self.terms.total_lines() as isize),
                KeyCode::Home => self.scroll_terms(-(self.terms.total_lines() as isize)),
                _ => {}
            },
            IdentityFocus::TocAgreement if key.code == KeyCode::Char(' ') => {
                self.toggle(CustomerField::TocAgreement)
            }
            IdentityFocus::PoaAgreement if key.code == KeyCode::Char(' ') => {
                self.toggle(CustomerField::PoaAgreement)
            }
            _ => match key.code {
                _ if is_reveal_key(&key) => {
                    if let Some((_, input)) = self.focused_input() {
                        input.toggle_reveal();
                    }
                }
                KeyCode::Down => self.focus = self.focus.next(),
                KeyCode::Up => self.focus = self.focus.prev(),
                _ => {
                    if let Some((field, input)) = self.focused_input() {
                        if input.handle_key(key) {
                            self.errors.clear(field);
                        }
                    }
                }
            },
        }
        FormAction::None
    }
}

/// Render the identity form; updates the terms viewport to the drawn size
pub fn render(frame: &mut Frame, form: &mut IdentityFormState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // SSN
            Constraint::Length(2), // DOB
            Constraint::Length(2), // Photo ID
            Constraint::Length(2), // Proof of address
            Constraint::Min(6),    // Terms
            Constraint::Length(1), // ToC checkbox
            Constraint::Length(1), // PoA checkbox
            Constraint::Length(1), // Consent error
            Constraint::Length(1), // Back
            Constraint::Length(1), // Hints
        ])
        .split(area);

    let focus = form.focus;
    let fields = [
        (IdentityFocus::Ssn, CustomerField::Ssn, &form.ssn_input),
        (IdentityFocus::DateOfBirth, CustomerField::DateOfBirth, &form.dob_input),
        (IdentityFocus::PhotoId, CustomerField::PhotoId, &form.photo_id_input),
        (IdentityFocus::ProofOfAddress, CustomerField::ProofOfAddress, &form.proof_input),
    ];
    for (i, (f, field, input)) in fields.into_iter().enumerate() {
        render_field(frame, chunks[i], input, focus == f, form.errors.get(field));
    }

    // Terms pane
    let terms_focused = focus == IdentityFocus::Terms;
    let border = if terms_focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .title(" Terms and Conditions, Privacy Policy, Limited Power of Attorney ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(chunks[4]);
    frame.render_widget(block, chunks[4]);

    form.terms
        .set_viewport(inner.width as usize, inner.height as usize);
    let lines: Vec<Line> = form
        .terms
        .visible_lines()
        .iter()
        .map(|l| Line::from(l.as_str()))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);

    frame.render_widget(
        Paragraph::new(checkbox_line(
            "I agree to the Terms and Conditions",
            form.toc_agreement,
            focus == IdentityFocus::TocAgreement,
            form.errors.contains(CustomerField::TocAgreement),
        )),
        chunks[5],
    );
    frame.render_widget(
        Paragraph::new(checkbox_line(
            "I grant the Limited Power of Attorney",
            form.poa_agreement,
            focus == IdentityFocus::PoaAgreement,
            form.errors.contains(CustomerField::PoaAgreement),
        )),
        chunks[6],
    );

    let consent_error = form
        .errors
        .get(CustomerField::TocAgreement)
        .or_else(|| form.errors.get(CustomerField::PoaAgreement));
    if let Some(message) = consent_error {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("  {}", message),
                Style::default().fg(Color::Red),
            ))),
            chunks[7],
        );
    }

    frame.render_widget(
        Paragraph::new(button_line("Back", focus == IdentityFocus::Back)),
        chunks[8],
    );

    let hints = hints_line(&[
        ("[Tab]", "Next", Color::White),
        ("[↑/↓ PgUp/PgDn]", "Scroll terms", Color::White),
        ("[Ctrl+R]", "Show/hide SSN", Color::White),
        ("[Enter]", "Continue", Color::Green),
        ("[Esc]", "Back", Color::Yellow),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[9]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::customer::tests::valid_customer;
    use crossterm::event::KeyModifiers;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn form() -> IdentityFormState {
        let mut form = IdentityFormState::from_info(&CustomerInfo::default(), 5);
        form.terms.set_viewport(60, 10);
        form
    }

    #[test]
    fn test_round_trips_stored_record() {
        let dir = TempDir::new().unwrap();
        let info = valid_customer(dir.path());
        assert_eq!(IdentityFormState::from_info(&info, 5).to_info(), info);
    }

    #[test]
    fn test_scrolling_terms_to_bottom_checks_both_boxes() {
        let mut form = form();
        form.focus = IdentityFocus::Terms;

        form.handle_key(key(KeyCode::PageDown));
        assert!(!form.toc_agreement);

        form.handle_key(key(KeyCode::End));
        assert!(form.toc_agreement);
        assert!(form.poa_agreement);
    }

    #[test]
    fn test_checkboxes_toggle_independently() {
        let mut form = form();
        form.focus = IdentityFocus::TocAgreement;
        form.handle_key(key(KeyCode::Char(' ')));
        assert!(form.toc_agreement);
        assert!(!form.poa_agreement);

        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Char(' ')));
        form.handle_key(key(KeyCode::Char(' ')));
        assert!(!form.poa_agreement);
    }

    #[test]
    fn test_back_button_and_escape() {
        let mut form = form();
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormAction::Back);

        form.focus = IdentityFocus::Back;
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::Back);

        form.focus = IdentityFocus::Ssn;
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::Submit);
    }

    #[test]
    fn test_consent_errors_focus_checkbox() {
        let dir = TempDir::new().unwrap();
        let mut info = valid_customer(dir.path());
        info.poa_agreement = false;

        let mut form = form();
        form.show_errors(info.validate().unwrap_err());
        assert_eq!(form.focus, IdentityFocus::PoaAgreement);
    }

    #[test]
    fn test_typing_into_ssn() {
        let mut form = form();
        for c in "123456789".chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(form.to_info().ssn.expose(), "123456789");
    }

    #[test]
    fn test_ctrl_r_reveals_ssn() {
        let dir = TempDir::new().unwrap();
        let mut form = IdentityFormState::from_info(&valid_customer(dir.path()), 5);
        let reveal = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);

        assert_eq!(form.ssn_input.display_value(), "•".repeat(11));
        form.handle_key(reveal);
        assert_eq!(form.ssn_input.display_value(), "123-45-6789");
        form.handle_key(reveal);
        assert!(form.ssn_input.is_hidden());
        assert_eq!(form.to_info().ssn.expose(), "123-45-6789");
    }
}
