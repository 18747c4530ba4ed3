//! Fixed-length one-digit-per-cell code entry.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Width of one rendered cell including its borders.
const CELL_WIDTH: u16 = 5;

/// A row of single-digit cells with a focused cursor cell.
///
/// Cells may be left empty; [`value`](Self::value) concatenates the filled
/// ones in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeField {
    cells: Vec<Option<char>>,
    focus: usize,
    disabled: bool,
}

impl CodeField {
    pub fn new(len: usize) -> Self {
        Self {
            cells: vec![None; len],
            focus: 0,
            disabled: false,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn cells(&self) -> &[Option<char>] {
        &self.cells
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn set_focus(&mut self, index: usize) {
        self.focus = index.min(self.len().saturating_sub(1));
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// The filled cells, concatenated.
    pub fn value(&self) -> String {
        self.cells.iter().flatten().collect()
    }

    /// Fills cells from the start with the digits of `value`.
    pub fn set_value(&mut self, value: &str) {
        self.clear();
        let digits = value.chars().filter(char::is_ascii_digit);
        for (cell, digit) in self.cells.iter_mut().zip(digits) {
            *cell = Some(digit);
        }
    }

    /// Empties every cell and returns focus to the first.
    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.focus = 0;
    }

    /// Writes a digit into the focused cell and moves right. Non-digits are
    /// ignored.
    pub fn type_digit(&mut self, ch: char) -> bool {
        if self.disabled || !ch.is_ascii_digit() || self.cells.is_empty() {
            return false;
        }
        self.cells[self.focus] = Some(ch);
        self.move_right();
        true
    }

    /// Clears the focused cell, or the previous one if the focused cell is
    /// already empty.
    pub fn backspace(&mut self) {
        if self.disabled || self.cells.is_empty() {
            return;
        }
        if self.cells[self.focus].is_none() && self.focus > 0 {
            self.focus -= 1;
        }
        self.cells[self.focus] = None;
    }

    pub fn move_left(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.focus + 1 < self.len() {
            self.focus += 1;
        }
    }

    /// Spreads the digits of `text` over the cells starting at the focused
    /// one. Digits beyond the last cell are dropped; cells before the focus
    /// are left alone. Focus lands after the last digit written. Returns
    /// `true` if any cell was written.
    pub fn paste(&mut self, text: &str) -> bool {
        if self.disabled {
            return false;
        }
        let start = self.focus;
        let mut written = 0;
        let digits = text.chars().filter(char::is_ascii_digit);
        for (cell, digit) in self.cells.iter_mut().skip(start).zip(digits) {
            *cell = Some(digit);
            written += 1;
        }
        if written > 0 {
            self.set_focus(start + written);
        }
        written > 0
    }

    /// Handles an editing key. Returns `true` if consumed. Characters count
    /// only when a digit was typed; modified characters are never typed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.disabled {
            return false;
        }
        match key.code {
            KeyCode::Char(_)
                if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                false
            }
            KeyCode::Char(c) => self.type_digit(c),
            KeyCode::Backspace => {
                self.backspace();
                true
            }
            KeyCode::Left => {
                self.move_left();
                true
            }
            KeyCode::Right => {
                self.move_right();
                true
            }
            _ => false,
        }
    }
}

/// Renders one boxed cell per digit, the focused cell highlighted.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_code_field(field: &CodeField, focused: bool, frame: &mut Frame, area: Rect) {
    let constraints = vec![Constraint::Length(CELL_WIDTH); field.len()];
    let cells = Layout::horizontal(constraints).split(area);

    for (i, (cell, rect)) in field.cells().iter().zip(cells.iter()).enumerate() {
        let active = focused && !field.is_disabled() && i == field.focus();
        let border = if active {
            Style::default().fg(Color::Yellow)
        } else if field.is_disabled() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Gray)
        };
        let text = match cell {
            Some(d) => Span::styled(d.to_string(), Style::default().add_modifier(Modifier::BOLD)),
            None if active => Span::styled(
                "\u{2588}",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ),
            None => Span::raw(" "),
        };
        let paragraph = Paragraph::new(text)
            .centered()
            .block(Block::default().borders(Borders::ALL).border_style(border));
        frame.render_widget(paragraph, *rect);
    }
}

/// Total width needed to draw a field of `len` cells.
#[allow(clippy::cast_possible_truncation)]
pub fn code_field_width(len: usize) -> u16 {
    CELL_WIDTH * len as u16
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn cells(field: &CodeField) -> String {
        field
            .cells()
            .iter()
            .map(|c| c.unwrap_or('_'))
            .collect()
    }

    mod typing {
        use super::*;

        #[test]
        fn digits_fill_and_advance() {
            let mut f = CodeField::new(6);
            for c in "123".chars() {
                f.type_digit(c);
            }
            assert_eq!(cells(&f), "123___");
            assert_eq!(f.focus(), 3);
            assert_eq!(f.value(), "123");
        }

        #[test]
        fn non_digits_ignored() {
            let mut f = CodeField::new(6);
            assert!(!f.type_digit('a'));
            assert!(f.is_empty());
            assert_eq!(f.focus(), 0);
        }

        #[test]
        fn last_cell_keeps_focus() {
            let mut f = CodeField::new(3);
            for c in "9876".chars() {
                f.type_digit(c);
            }
            assert_eq!(cells(&f), "986");
            assert_eq!(f.focus(), 2);
        }

        #[test]
        fn value_skips_gaps() {
            let mut f = CodeField::new(6);
            f.type_digit('1');
            f.move_right();
            f.type_digit('3');
            assert_eq!(cells(&f), "1_3___");
            assert_eq!(f.value(), "13");
        }
    }

    mod backspace {
        use super::*;

        #[test]
        fn clears_filled_cell_in_place() {
            let mut f = CodeField::new(6);
            f.set_value("123");
            f.set_focus(1);
            f.backspace();
            assert_eq!(cells(&f), "1_3___");
            assert_eq!(f.focus(), 1);
        }

        #[test]
        fn empty_cell_steps_back_and_clears() {
            let mut f = CodeField::new(6);
            for c in "12".chars() {
                f.type_digit(c);
            }
            f.backspace();
            assert_eq!(cells(&f), "1_____");
            assert_eq!(f.focus(), 1);
        }

        #[test]
        fn first_empty_cell_is_noop() {
            let mut f = CodeField::new(6);
            f.backspace();
            assert!(f.is_empty());
            assert_eq!(f.focus(), 0);
        }
    }

    mod paste {
        use super::*;

        #[test]
        fn fills_from_focus_and_truncates() {
            let mut f = CodeField::new(6);
            f.set_focus(2);
            f.paste("123456");
            assert_eq!(cells(&f), "__1234");
            assert_eq!(f.focus(), 5);
        }

        #[test]
        fn leaves_earlier_cells() {
            let mut f = CodeField::new(6);
            f.set_value("99");
            f.paste("123456");
            // Focus was reset to 0 by set_value.
            assert_eq!(cells(&f), "123456");

            let mut f = CodeField::new(6);
            f.set_value("99");
            f.set_focus(2);
            f.paste("1234");
            assert_eq!(cells(&f), "991234");
        }

        #[test]
        fn strips_non_digits() {
            let mut f = CodeField::new(6);
            f.paste(" 12-34\n");
            assert_eq!(cells(&f), "1234__");
            assert_eq!(f.focus(), 4);
        }

        #[test]
        fn no_digits_changes_nothing() {
            let mut f = CodeField::new(6);
            f.set_focus(3);
            assert!(!f.paste("abc"));
            assert!(f.is_empty());
            assert_eq!(f.focus(), 3);
        }
    }

    #[test]
    fn clear_resets_focus() {
        let mut f = CodeField::new(6);
        f.paste("123456");
        f.clear();
        assert!(f.is_empty());
        assert_eq!(f.focus(), 0);
    }

    #[test]
    fn disabled_ignores_input() {
        let mut f = CodeField::new(6);
        f.set_disabled(true);
        assert!(!f.handle_key(press(KeyCode::Char('1'))));
        assert!(!f.paste("123"));
        assert!(f.is_empty());
    }

    #[test]
    fn handle_key_routes_edits() {
        let mut f = CodeField::new(6);
        f.handle_key(press(KeyCode::Char('4')));
        f.handle_key(press(KeyCode::Char('2')));
        f.handle_key(press(KeyCode::Left));
        f.handle_key(press(KeyCode::Backspace));
        assert_eq!(cells(&f), "4_____");
        assert!(!f.handle_key(press(KeyCode::Enter)));
    }

    #[test]
    fn handle_key_reports_only_real_edits() {
        let mut f = CodeField::new(6);
        assert!(!f.handle_key(press(KeyCode::Char('x'))));
        let ctrl_digit = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..press(KeyCode::Char('1'))
        };
        assert!(!f.handle_key(ctrl_digit));
        assert!(f.is_empty());
        assert!(f.handle_key(press(KeyCode::Char('1'))));
    }

    #[test]
    fn renders_digits() {
        let mut f = CodeField::new(6);
        f.set_value("4821");

        let backend = TestBackend::new(code_field_width(6), 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw_code_field(&f, false, frame, frame.area()))
            .unwrap();
        let buf = terminal.backend().buffer();
        let row: String = (0..buf.area.width)
            .map(|x| buf[(x, 1)].symbol().chars().next().unwrap_or(' '))
            .collect();
        let digits: String = row.chars().filter(char::is_ascii_digit).collect();
        assert_eq!(digits, "4821");
    }
}
