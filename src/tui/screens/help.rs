//! Help screen: keybinding reference for the form and the code dialog.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::action::Action;
use crate::tui::app::Screen;

type Bindings = &'static [(&'static str, &'static str)];

static SECTIONS: &[(&str, Bindings)] = &[
    (
        "Log Form",
        &[
            ("Tab / Shift-Tab", "next / prev field"),
            ("Ctrl+S", "ask for the code, then submit"),
            ("Enter", "on Distance or Date: same as Ctrl+S"),
            ("Ctrl+E", "export sheet"),
            ("Esc", "quit"),
        ],
    ),
    (
        "From / To",
        &[
            ("Enter", "add typed text or highlighted suggestion"),
            ("Up / Down", "move suggestion highlight"),
            ("Backspace", "on empty input: remove last place"),
            ("Left / Right", "on empty input: select a place"),
            ("Delete", "remove selected place"),
        ],
    ),
    (
        "Code Dialog",
        &[
            ("0-9", "type digit"),
            ("Left / Right", "move between cells"),
            ("Backspace", "clear cell"),
            ("Enter", "confirm"),
            ("Esc / click outside", "cancel"),
        ],
    ),
    (
        "Anywhere",
        &[("F1", "this help"), ("Ctrl+C", "quit immediately")],
    ),
];

/// Rows moved by PageUp / PageDown.
const PAGE: u16 = 10;

/// State for the help screen.
#[derive(Debug, Clone)]
pub struct HelpState {
    offset: u16,
    origin: Screen,
}

impl Default for HelpState {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            origin: Screen::Form,
        }
    }

    /// First visible line.
    pub fn offset(&self) -> u16 {
        self.offset
    }

    /// The screen that opened help, returned to on q / Esc.
    pub fn origin(&self) -> Screen {
        self.origin
    }

    pub fn set_origin(&mut self, screen: Screen) {
        self.origin = screen;
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => self.offset = self.offset.saturating_sub(1),
            KeyCode::Down => self.offset = self.offset.saturating_add(1),
            KeyCode::PageUp => self.offset = self.offset.saturating_sub(PAGE),
            KeyCode::PageDown => self.offset = self.offset.saturating_add(PAGE),
            KeyCode::Home => self.offset = 0,
            KeyCode::Char('q') | KeyCode::Esc => return Action::Navigate(self.origin),
            _ => {}
        }
        Action::None
    }
}

fn help_lines() -> Vec<Line<'static>> {
    let heading = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let keys = Style::default().fg(Color::Yellow);

    let mut lines = Vec::new();
    for (title, bindings) in SECTIONS {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::styled(*title, heading));
        lines.extend(bindings.iter().map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("  {key:<22}"), keys),
                Span::raw(*what),
            ])
        }));
    }
    lines
}

/// Renders the help screen.
#[mutants::skip]
pub fn draw_help(state: &HelpState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [body, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let lines = help_lines();
    let last_start = u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_sub(body.height);
    frame.render_widget(
        Paragraph::new(lines).scroll((state.offset().min(last_start), 0)),
        body,
    );
    frame.render_widget(
        Paragraph::new("Up/Down/PgUp/PgDn: scroll  q/Esc: back")
            .style(Style::default().fg(Color::DarkGray)),
        footer,
    );
}
