//! Stepper header
//!
//! One label per step; completed steps are checked and the active one is
//! highlighted.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::wizard::STEPS;

/// Render the step indicator
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.wizard.active_step();
    let mut spans = Vec::new();

    for (i, step) in STEPS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ── ", Style::default().fg(Color::DarkGray)));
        }

        let (marker, style) = if i < active {
            ("✓", Style::default().fg(Color::Green))
        } else if i == active {
            (
                "●",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("○", Style::default().fg(Color::DarkGray))
        };
        spans.push(Span::styled(format!("{} {}", marker, step.title()), style));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}
