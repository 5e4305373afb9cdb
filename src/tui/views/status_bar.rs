//! Status bar view
//!
//! Shows the step counter, the session reference and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;
use crate::wizard::STEPS;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![];

    let step = app.wizard.active_step();
    spans.push(Span::styled(" Step ", Style::default().fg(Color::White)));
    spans.push(Span::styled(
        format!("{}/{}", (step + 1).min(STEPS.len()), STEPS.len()),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ));

    spans.push(Span::raw(" │ "));

    let session = app.session_id.simple().to_string();
    spans.push(Span::styled(
        format!("Ref {}", &session[..8]),
        Style::default().fg(Color::Cyan),
    ));

    let hints = " Ctrl+C:Quit ";
    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
