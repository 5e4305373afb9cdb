//! TUI Views module
//!
//! Frame composition: stepper header, the active step's form, status bar and
//! any pending toast.

pub mod header;
pub mod status_bar;

use std::time::Instant;

use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::App;
use super::layout::{centered_rect_fixed, top_right_rect, WizardLayout};
use super::steps;
use super::widgets::NotificationWidget;
use crate::wizard::Step;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App, now: Instant) {
    let layout = WizardLayout::new(frame.area());

    header::render(frame, app, layout.header);

    let step = app.current_step();
    let title = step.map(|s| format!(" {} ", s.title())).unwrap_or_default();
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(layout.body);
    frame.render_widget(block, layout.body);

    match step {
        Some(Step::Account) => steps::account::render(frame, &app.account_form, inner),
        Some(Step::Identity) => steps::identity::render(frame, &mut app.identity_form, inner),
        Some(Step::Agreement) => steps::agreement::render(frame, &mut app.agreement_form, inner),
        Some(Step::Complete) => steps::complete::render(frame, &app.complete, now, inner),
        None => render_no_step(frame, app.wizard.active_step(), inner),
    }

    status_bar::render(frame, app, layout.status_bar);

    if let Some(notification) = app.notifications.current() {
        let area = top_right_rect(40, 4, frame.area());
        frame.render_widget(NotificationWidget::new(notification), area);
    }
}

/// An out-of-range step index renders an empty body with a hint
fn render_no_step(frame: &mut Frame, index: usize, area: ratatui::layout::Rect) {
    let area = centered_rect_fixed(40, 1, area);
    let line = Line::from(Span::styled(
        format!("Nothing to show for step {} (Esc to quit)", index),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
