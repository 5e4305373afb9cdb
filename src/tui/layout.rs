//! Layout definitions for the TUI
//!
//! Stepper header on top, the active step's form in the middle, status bar
//! at the bottom.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Widest body the forms are laid out in
const MAX_BODY_WIDTH: u16 = 110;

/// Layout regions for the wizard
pub struct WizardLayout {
    /// Step indicator
    pub header: Rect,
    /// Active step form
    pub body: Rect,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl WizardLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(10),   // Body
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        // Keep long forms readable on wide terminals
        let body_width = vertical[1].width.min(MAX_BODY_WIDTH);
        let body = Rect {
            x: vertical[1].x + (vertical[1].width - body_width) / 2,
            width: body_width,
            ..vertical[1]
        };

        Self {
            header: vertical[0],
            body,
            status_bar: vertical[2],
        }
    }
}

/// Create a fixed-size centered rect for popups
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

/// Anchor a popup of the given size to the top-right corner of `r`
pub fn top_right_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    Rect::new(
        r.x + r.width - width,
        r.y,
        width,
        height.min(r.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wizard_layout_splits_vertically() {
        let layout = WizardLayout::new(Rect::new(0, 0, 80, 30));
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.status_bar.y, 29);
        assert_eq!(layout.body.width, 80);
    }

    #[test]
    fn test_body_is_centered_on_wide_terminals() {
        let layout = WizardLayout::new(Rect::new(0, 0, 200, 40));
        assert_eq!(layout.body.width, MAX_BODY_WIDTH);
        assert_eq!(layout.body.x, 45);
    }

    #[test]
    fn test_centered_rect_fixed_clamps() {
        let r = centered_rect_fixed(50, 10, Rect::new(0, 0, 40, 8));
        assert_eq!((r.x, r.y, r.width, r.height), (0, 0, 40, 8));
    }
}
