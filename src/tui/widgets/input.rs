//! Text input widget
//!
//! A single-line text field with a character-indexed cursor, optional
//! masking, and an inline error line under it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// A simple text input
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// Current text content
    pub content: String,
    /// Cursor position, in characters
    pub cursor: usize,
    /// Placeholder text
    pub placeholder: String,
    /// Label
    pub label: String,
    /// Secret field: rendered as bullets unless revealed
    pub masked: bool,
    /// Show a masked field's text in the clear
    pub revealed: bool,
    /// Ignore edits (value is set programmatically)
    pub read_only: bool,
}

impl TextInput {
    /// Create a new text input
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the placeholder
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Flip a masked field between hidden and shown; returns false for
    /// fields that are never masked
    pub fn toggle_reveal(&mut self) -> bool {
        if !self.masked {
            return false;
        }
        self.revealed = !self.revealed;
        true
    }

    /// Whether the text is currently hidden on screen
    pub fn is_hidden(&self) -> bool {
        self.masked && !self.revealed
    }

    /// Set content, moving the cursor to the end
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.set_value(content);
        self
    }

    /// Replace the content, moving the cursor to the end
    pub fn set_value(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.char_len();
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Clear the content
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Get the current content
    pub fn value(&self) -> &str {
        &self.content
    }

    /// Apply an editing key; returns true if the key was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.read_only {
            return false;
        }
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_start(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }

    /// Text as it should appear on screen
    pub fn display_value(&self) -> String {
        if self.is_hidden() {
            "•".repeat(self.char_len())
        } else {
            self.content.clone()
        }
    }
}

/// Render a labelled field on the first row of `area` and its error (if any)
/// on the second
pub fn render_field(
    frame: &mut Frame,
    area: Rect,
    input: &TextInput,
    focused: bool,
    error: Option<&str>,
) {
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let value_style = if input.read_only {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![Span::styled(format!("{}: ", input.label), label_style)];
    let display = input.display_value();

    if focused && !input.read_only {
        let chars: Vec<char> = display.chars().collect();
        let cursor = input.cursor.min(chars.len());
        let before: String = chars[..cursor].iter().collect();
        let at = chars.get(cursor).copied().unwrap_or(' ');
        let after: String = chars.iter().skip(cursor + 1).collect();

        spans.push(Span::styled(before, value_style));
        spans.push(Span::styled(
            at.to_string(),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));
        spans.push(Span::styled(after, value_style));
    } else if display.is_empty() {
        spans.push(Span::styled(
            input.placeholder.clone(),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled(display, value_style));
    }

    let value_area = Rect { height: 1, ..area };
    frame.render_widget(Paragraph::new(Line::from(spans)), value_area);

    if let Some(message) = error {
        if area.height > 1 {
            let error_area = Rect {
                y: area.y + 1,
                height: 1,
                ..area
            };
            let line = Line::from(Span::styled(
                format!("  {}", message),
                Style::default().fg(Color::Red),
            ));
            frame.render_widget(Paragraph::new(line), error_area);
        }
    }
}
