//! Alert banner: a one-line success or error message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Whether a message reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// A transient message shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

/// Renders the message, or nothing when there is none.
///
/// Success is green with a check mark, errors are red with a cross.
#[mutants::skip]
pub fn draw_alert(message: Option<&Message>, frame: &mut Frame, area: Rect) {
    let Some(message) = message else {
        return;
    };

    let (symbol, color) = match message.kind {
        MessageKind::Success => ("\u{2714} ", Color::Green),
        MessageKind::Error => ("\u{2718} ", Color::Red),
    };
    let style = Style::default().fg(color).add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled(symbol, style),
        Span::styled(message.text.as_str(), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
        let mut s = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
            }
            s.push('\n');
        }
        s
    }

    fn render_alert(message: Option<&Message>) -> (String, ratatui::buffer::Buffer) {
        let backend = TestBackend::new(40, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw_alert(message, frame, frame.area()))
            .unwrap();
        let buf = terminal.backend().buffer().clone();
        (buffer_to_string(&buf), buf)
    }

    #[test]
    fn constructors_set_kind() {
        assert_eq!(Message::success("ok").kind, MessageKind::Success);
        assert_eq!(Message::error("bad").kind, MessageKind::Error);
    }

    #[test]
    fn renders_nothing_without_message() {
        let (output, _) = render_alert(None);
        assert_eq!(output.trim(), "");
    }

    #[test]
    fn renders_success_in_green() {
        let message = Message::success("Distance Info Logged!");
        let (output, buf) = render_alert(Some(&message));
        assert!(output.contains("Distance Info Logged!"));
        assert_eq!(buf[(2, 0)].fg, Color::Green);
    }

    #[test]
    fn renders_error_in_red() {
        let message = Message::error("invalid code");
        let (output, buf) = render_alert(Some(&message));
        assert!(output.contains("invalid code"));
        assert_eq!(buf[(2, 0)].fg, Color::Red);
    }
}
