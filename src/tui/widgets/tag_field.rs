//! Multi-value place picker: chips plus free-text input with suggestions.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

use crate::model::normalize_tag;

/// Most suggestions shown at once.
pub const MAX_SUGGESTIONS: usize = 8;

/// A list of unique, non-empty tags entered from suggestions or free text.
#[derive(Debug, Clone)]
pub struct TagField {
    label: String,
    placeholder: String,
    options: Vec<String>,
    values: Vec<String>,
    input: String,
    max_tags: Option<usize>,
    /// Highlighted row in the suggestion list.
    highlighted: Option<usize>,
    /// Chip picked with Left/Right for deletion.
    selected_chip: Option<usize>,
    open: bool,
    disabled: bool,
}

impl TagField {
    pub fn new(label: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            label: label.into(),
            placeholder: String::new(),
            options,
            values: Vec::new(),
            input: String::new(),
            max_tags: None,
            highlighted: None,
            selected_chip: None,
            open: false,
            disabled: false,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Limits how many tags may be entered. `None` means unlimited.
    pub fn with_max_tags(mut self, max_tags: Option<usize>) -> Self {
        self.max_tags = max_tags;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn selected_chip(&self) -> Option<usize> {
        self.selected_chip
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.open = false;
        }
    }

    pub fn is_full(&self) -> bool {
        self.max_tags.is_some_and(|max| self.values.len() >= max)
    }

    /// Whether the suggestion list should be shown.
    pub fn is_open(&self) -> bool {
        self.open && !self.disabled && !self.is_full() && !self.suggestions().is_empty()
    }

    /// Options not yet chosen whose text contains the input, case-insensitively.
    pub fn suggestions(&self) -> Vec<&str> {
        let query = self.input.trim().to_lowercase();
        self.options
            .iter()
            .filter(|option| !self.values.contains(option))
            .filter(|option| option.to_lowercase().contains(&query))
            .take(MAX_SUGGESTIONS)
            .map(String::as_str)
            .collect()
    }

    /// Adds a tag after trimming it. Empty, duplicate, and over-limit tags are
    /// rejected. Accepting a tag clears the input.
    pub fn add(&mut self, value: &str) -> bool {
        let Some(tag) = normalize_tag(value) else {
            return false;
        };
        if self.is_full() || self.values.iter().any(|v| v == tag) {
            return false;
        }
        self.values.push(tag.to_string());
        self.input.clear();
        self.highlighted = None;
        self.selected_chip = None;
        true
    }

    /// Removes the tag at `index`.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index >= self.values.len() {
            return None;
        }
        let removed = self.values.remove(index);
        self.selected_chip = match self.selected_chip {
            _ if self.values.is_empty() => None,
            Some(i) if i >= self.values.len() => Some(self.values.len() - 1),
            other => other,
        };
        self.highlighted = None;
        Some(removed)
    }

    /// Replaces all tags. Duplicates and blanks in `values` are dropped.
    pub fn set_values(&mut self, values: &[String]) {
        self.values.clear();
        self.input.clear();
        self.highlighted = None;
        self.selected_chip = None;
        for value in values {
            self.add(value);
        }
    }

    pub fn clear(&mut self) {
        self.set_values(&[]);
    }

    /// Turns pending free text into a tag, as when focus leaves the field.
    /// Rejected text stays in the input.
    pub fn commit_input(&mut self) -> bool {
        let input = self.input.clone();
        self.add(&input)
    }

    pub fn focus(&mut self) {
        self.open = true;
    }

    /// Commits pending text and hides suggestions.
    pub fn blur(&mut self) {
        self.commit_input();
        self.open = false;
        self.highlighted = None;
        self.selected_chip = None;
    }

    /// Appends pasted text to the input. Ignored once the field is full.
    pub fn insert_str(&mut self, text: &str) {
        if self.disabled || self.is_full() {
            return;
        }
        self.input
            .extend(text.chars().filter(|c| !c.is_control()));
        self.open = true;
        self.highlighted = None;
        self.selected_chip = None;
    }

    /// Handles a key while the field is focused. Returns `true` if consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.disabled {
            return false;
        }
        match key.code {
            KeyCode::Char(_) if self.is_full() => false,
            KeyCode::Char(c) => {
                self.input.push(c);
                self.open = true;
                self.highlighted = None;
                self.selected_chip = None;
                true
            }
            KeyCode::Backspace => {
                if !self.input.is_empty() {
                    self.input.pop();
                    self.highlighted = None;
                } else if let Some(i) = self.selected_chip {
                    self.remove(i);
                } else if !self.values.is_empty() {
                    self.remove(self.values.len() - 1);
                }
                true
            }
            KeyCode::Delete => {
                if let Some(i) = self.selected_chip {
                    self.remove(i);
                }
                true
            }
            KeyCode::Enter => {
                let picked = self
                    .highlighted
                    .and_then(|i| self.suggestions().get(i).map(|s| s.to_string()));
                match picked {
                    Some(option) => self.add(&option),
                    None => self.commit_input(),
                };
                true
            }
            KeyCode::Down => {
                self.open = true;
                let count = self.suggestions().len();
                if count > 0 {
                    self.highlighted = Some(match self.highlighted {
                        Some(i) if i + 1 < count => i + 1,
                        Some(i) => i,
                        None => 0,
                    });
                }
                true
            }
            KeyCode::Up => {
                self.highlighted = match self.highlighted {
                    Some(0) | None => None,
                    Some(i) => Some(i - 1),
                };
                true
            }
            KeyCode::Left if self.input.is_empty() && !self.values.is_empty() => {
                self.selected_chip = Some(match self.selected_chip {
                    Some(i) => i.saturating_sub(1),
                    None => self.values.len() - 1,
                });
                true
            }
            KeyCode::Right if self.selected_chip.is_some() => {
                self.selected_chip = self
                    .selected_chip
                    .map(|i| i + 1)
                    .filter(|&i| i < self.values.len());
                true
            }
            _ => false,
        }
    }
}

/// Renders the chips and the input line.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_tag_field(field: &TagField, focused: bool, frame: &mut Frame, area: Rect) {
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

    let mut spans = Vec::new();
    for (i, value) in field.values().iter().enumerate() {
        let style = if focused && field.selected_chip() == Some(i) {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(format!("[{value} \u{00d7}]"), style));
        spans.push(Span::raw(" "));
    }

    if field.values().is_empty() && field.input().is_empty() && !focused {
        spans.push(Span::styled(
            field.placeholder.as_str(),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::raw(field.input()));
    }
    if focused {
        spans.push(Span::styled(
            "\u{2588}",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Renders the suggestion list as an overlay in `area`, sized to fit.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_suggestions(field: &TagField, frame: &mut Frame, area: Rect) {
    if !field.is_open() {
        return;
    }
    let suggestions = field.suggestions();
    #[allow(clippy::cast_possible_truncation)]
    let height = (suggestions.len() as u16 + 2).min(area.height);
    let list_area = Rect { height, ..area };

    let items: Vec<ListItem> = suggestions.into_iter().map(ListItem::new).collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(field.highlighted());

    frame.render_widget(Clear, list_area);
    frame.render_stateful_widget(list, list_area, &mut state);
}
