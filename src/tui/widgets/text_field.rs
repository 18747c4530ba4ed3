//! Labeled single-line text input.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// A single-line text input with an optional character filter and length cap.
#[derive(Debug, Clone)]
pub struct TextField {
    label: String,
    value: String,
    placeholder: String,
    max_len: Option<usize>,
    accepts: fn(char) -> bool,
    disabled: bool,
}

fn any_char(ch: char) -> bool {
    !ch.is_control()
}

impl TextField {
    /// Creates an empty field that accepts any printable character.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            placeholder: String::new(),
            max_len: None,
            accepts: any_char,
            disabled: false,
        }
    }

    /// Sets the hint shown while the field is empty.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Caps the value at `max_len` characters.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// Restricts typed and pasted characters to those `accepts` allows.
    pub fn with_filter(mut self, accepts: fn(char) -> bool) -> Self {
        self.accepts = accepts;
        self
    }

    /// Appends a character. Returns `false` if it was filtered out, the field
    /// is full, or the field is disabled.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if self.disabled || !(self.accepts)(ch) {
            return false;
        }
        if self
            .max_len
            .is_some_and(|max| self.value.chars().count() >= max)
        {
            return false;
        }
        self.value.push(ch);
        true
    }

    /// Appends every acceptable character of `text`, stopping when full.
    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.insert_char(ch);
        }
    }

    /// Deletes the last character.
    pub fn delete_char(&mut self) {
        if !self.disabled {
            self.value.pop();
        }
    }

    /// Returns the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the value, bypassing the filter.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}

/// Renders a text field as a bordered box titled with its label.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_text_field(field: &TextField, focused: bool, frame: &mut Frame, area: Rect) {
    let border_color = if field.is_disabled() {
        Color::DarkGray
    } else if focused {
        Color::Yellow
    } else {
        Color::Gray
    };

    let block = Block::default()
        .title(field.label())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let mut spans = if field.value().is_empty() && !focused {
        vec![Span::styled(
            field.placeholder(),
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        vec![Span::raw(field.value())]
    };
    if focused {
        spans.push(Span::styled(
            "\u{2588}",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
