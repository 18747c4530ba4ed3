//! Modal confirmation box drawn over a dimmed backdrop.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Labels and state for one rendering of the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialog<'a> {
    pub title: &'a str,
    pub confirm_label: &'a str,
    pub cancel_label: &'a str,
    /// While pending, both buttons are replaced by a busy indicator.
    pub pending: bool,
}

impl<'a> Dialog<'a> {
    pub fn new(title: &'a str, confirm_label: &'a str) -> Self {
        Self {
            title,
            confirm_label,
            cancel_label: "Cancel",
            pending: false,
        }
    }

    pub fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }
}

/// A `width` x `height` rect centered in `area`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Whether the terminal cell at (`column`, `row`) lies inside `rect`.
pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    rect.contains(ratatui::layout::Position { x: column, y: row })
}

/// Draws the dialog into `area`, which should come from [`centered_rect`].
///
/// Everything outside `area` is dimmed. `content` renders the body into the
/// space above the button row.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_dialog(
    dialog: &Dialog,
    frame: &mut Frame,
    area: Rect,
    content: impl FnOnce(&mut Frame, Rect),
) {
    let backdrop = Block::default().style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(backdrop, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", dialog.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [body, _, buttons] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    content(frame, body);

    let line = if dialog.pending {
        Line::from(Span::styled(
            "Working\u{2026}",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::SLOW_BLINK),
        ))
    } else {
        Line::from(vec![
            Span::styled(
                format!("[ {} ]", dialog.cancel_label),
                Style::default().fg(Color::Gray),
            ),
            Span::raw("   "),
            Span::styled(
                format!("[ {} ]", dialog.confirm_label),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    };
    frame.render_widget(Paragraph::new(line).centered(), buttons);
}
