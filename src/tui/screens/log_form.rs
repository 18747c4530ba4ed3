//! Log form screen: distance, places and date, confirmed with a one-time code.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::config::Config;
use crate::model::{
    CODE_LENGTH, CachedFields, CreateLogRequest, ExportRequest, FormPayload, format_date, today,
    validate_code,
};
use crate::storage::{KeyValueStore, load_cache, save_cache};
use crate::transport::Completion;
use crate::tui::action::Action;
use crate::tui::timer::Timers;
use crate::tui::widgets::{
    CodeField, Dialog, Message, TagField, TextField, centered_rect, code_field_width, contains,
    draw_alert, draw_code_field, draw_dialog, draw_suggestions, draw_tag_field, draw_text_field,
};

/// Shown after the API accepts an entry.
pub const LOGGED_MESSAGE: &str = "Distance Info Logged!";

const DIALOG_WIDTH: u16 = 44;
const DIALOG_HEIGHT: u16 = 10;

/// Form fields in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Distance,
    From,
    To,
    Date,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Self::Distance => Self::From,
            Self::From => Self::To,
            Self::To => Self::Date,
            Self::Date => Self::Distance,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Distance => Self::Date,
            Self::From => Self::Distance,
            Self::To => Self::From,
            Self::Date => Self::To,
        }
    }
}

/// What the code dialog was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Submit,
    Download,
}

impl DialogMode {
    fn title(self) -> &'static str {
        match self {
            Self::Submit => "Authenticator code",
            Self::Download => "Download sheet",
        }
    }

    fn confirm_label(self) -> &'static str {
        match self {
            Self::Submit => "Submit",
            Self::Download => "Download",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    ClearMessage,
    RestoreFields,
}

/// Tunables the form takes from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSettings {
    pub from_options: Vec<String>,
    pub to_options: Vec<String>,
    pub max_tags: Option<usize>,
    pub message_timeout: Duration,
    pub restore_delay: Duration,
}

impl FormSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            from_options: config.places.from.clone(),
            to_options: config.places.to.clone(),
            max_tags: config.ui.max_tags,
            message_timeout: config.ui.message_timeout(),
            restore_delay: config.ui.restore_delay(),
        }
    }
}

impl Default for FormSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

fn distance_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.'
}

fn date_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '-'
}

/// State for the log form and its code dialog.
///
/// Owns the cache store and every pending timer. Requests leave as
/// [`Action`]s; their outcomes come back through [`on_completion`](Self::on_completion).
pub struct LogFormState {
    distance: TextField,
    from: TagField,
    to: TagField,
    date: TextField,
    focus: Field,
    code: CodeField,
    dialog: Option<DialogMode>,
    dialog_error: Option<String>,
    pending: bool,
    message: Option<Message>,
    /// Values sent with the last create-log request, used to refill the form
    /// if the cache cannot be read back.
    last_submitted: Option<CachedFields>,
    timers: Timers<Timer>,
    store: Box<dyn KeyValueStore>,
    settings: FormSettings,
    clock: fn() -> NaiveDate,
}

impl LogFormState {
    /// Creates the form, prefilled from the cache when one exists.
    pub fn new(store: Box<dyn KeyValueStore>, settings: FormSettings) -> Self {
        Self::with_clock(store, settings, today)
    }

    /// Like [`new`](Self::new), with `clock` supplying today's date.
    pub fn with_clock(
        store: Box<dyn KeyValueStore>,
        settings: FormSettings,
        clock: fn() -> NaiveDate,
    ) -> Self {
        let mut state = Self {
            distance: TextField::new("Distance")
                .with_placeholder("e.g., 53128")
                .with_filter(distance_char),
            from: TagField::new("From", settings.from_options.clone())
                .with_placeholder("Type or pick places")
                .with_max_tags(settings.max_tags),
            to: TagField::new("To", settings.to_options.clone())
                .with_placeholder("Type or pick places")
                .with_max_tags(settings.max_tags),
            date: TextField::new("Date")
                .with_placeholder("YYYY-MM-DD")
                .with_filter(date_char)
                .with_max_len(10),
            focus: Field::Distance,
            code: CodeField::new(CODE_LENGTH),
            dialog: None,
            dialog_error: None,
            pending: false,
            message: None,
            last_submitted: None,
            timers: Timers::new(),
            store,
            settings,
            clock,
        };
        state.date.set_value(format_date(clock()));
        if let Some(cached) = load_cache(state.store.as_ref()) {
            tracing::debug!("prefilling form from cache");
            state.apply_cached(&cached);
        }
        state
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if let Some(mode) = self.dialog {
            return self.handle_dialog_key(mode, key);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => self.open_submit(),
            KeyCode::Char('e') if ctrl => {
                self.open_dialog(DialogMode::Download);
                Action::None
            }
            KeyCode::Char(_) if ctrl => Action::None,
            KeyCode::Tab => {
                self.move_focus(self.focus.next());
                Action::None
            }
            KeyCode::BackTab => {
                self.move_focus(self.focus.prev());
                Action::None
            }
            KeyCode::Esc => Action::Quit,
            KeyCode::Enter if matches!(self.focus, Field::Distance | Field::Date) => {
                self.open_submit()
            }
            _ => {
                self.edit_focused(key);
                Action::None
            }
        }
    }

    /// Handles bracketed-paste text.
    ///
    /// With the dialog open the digits go to the code field from its focused
    /// cell. Otherwise the text is appended to the focused field.
    pub fn handle_paste(&mut self, text: &str) {
        if self.dialog.is_some() {
            if !self.pending && self.code.paste(text) {
                self.dialog_error = None;
            }
            return;
        }
        match self.focus {
            Field::Distance => self.distance.insert_str(text),
            Field::From => self.from.insert_str(text),
            Field::To => self.to.insert_str(text),
            Field::Date => self.date.insert_str(text),
        }
    }

    /// Handles a left click at (`column`, `row`) on a screen of size `area`.
    ///
    /// A click outside the open dialog cancels it, like Esc.
    pub fn handle_click(&mut self, area: Rect, column: u16, row: u16) {
        if self.dialog.is_some() && !contains(dialog_area(area), column, row) {
            self.cancel_dialog();
        }
    }

    /// Applies the outcome of a request emitted earlier.
    pub fn on_completion(&mut self, completion: Completion) {
        if !self.pending {
            tracing::warn!(?completion, "completion arrived with no request pending");
        }
        self.close_dialog();

        match completion {
            Completion::LogCreated(Ok(())) => self.on_log_created(),
            Completion::SheetExported(Ok(path)) => {
                self.show(Message::success(format!(
                    "Sheet saved to {}",
                    path.display()
                )));
            }
            Completion::LogCreated(Err(e)) | Completion::SheetExported(Err(e)) => {
                tracing::warn!(kind = ?e.kind, message = %e.message, "request failed");
                self.show(Message::error(e.message));
            }
        }
    }

    /// Fires every timer due at `now`.
    pub fn tick(&mut self, now: Instant) {
        for timer in self.timers.take_due(now) {
            match timer {
                Timer::ClearMessage => self.message = None,
                Timer::RestoreFields => self.restore_fields(),
            }
        }
    }

    /// The earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Cancels all pending timers. Nothing fires after this.
    pub fn teardown(&mut self) {
        if !self.timers.is_empty() {
            tracing::debug!("cancelling pending form timers");
        }
        self.timers.cancel_all();
    }

    /// Closes the dialog without sending anything. Ignored while a request
    /// is pending.
    pub fn cancel_dialog(&mut self) {
        if self.pending {
            tracing::debug!("cancel ignored while request pending");
            return;
        }
        if self.dialog.take().is_some() {
            self.close_dialog();
        }
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn distance(&self) -> &TextField {
        &self.distance
    }

    pub fn from(&self) -> &TagField {
        &self.from
    }

    pub fn to(&self) -> &TagField {
        &self.to
    }

    pub fn date(&self) -> &TextField {
        &self.date
    }

    pub fn code(&self) -> &CodeField {
        &self.code
    }

    /// The open dialog's mode, or `None` while editing.
    pub fn dialog(&self) -> Option<DialogMode> {
        self.dialog
    }

    /// Error shown inside the dialog.
    pub fn dialog_error(&self) -> Option<&str> {
        self.dialog_error.as_deref()
    }

    /// Whether a request is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Everything currently entered, including the code.
    pub fn payload(&self) -> FormPayload {
        FormPayload {
            distance: self.distance.value().to_string(),
            from_places: self.from.values().to_vec(),
            to_places: self.to.values().to_vec(),
            date: self.date.value().to_string(),
            token: self.code.value(),
        }
    }

    fn handle_dialog_key(&mut self, mode: DialogMode, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => {
                self.cancel_dialog();
                Action::None
            }
            KeyCode::Enter => self.confirm(mode),
            _ => {
                if !self.pending && self.code.handle_key(key) {
                    self.dialog_error = None;
                }
                Action::None
            }
        }
    }

    fn edit_focused(&mut self, key: KeyEvent) {
        match self.focus {
            Field::Distance => edit_text(&mut self.distance, key),
            Field::Date => edit_text(&mut self.date, key),
            Field::From => {
                self.from.handle_key(key);
            }
            Field::To => {
                self.to.handle_key(key);
            }
        }
    }

    fn move_focus(&mut self, to: Field) {
        match self.focus {
            Field::From => self.from.blur(),
            Field::To => self.to.blur(),
            Field::Distance | Field::Date => {}
        }
        self.focus = to;
        match to {
            Field::From => self.from.focus(),
            Field::To => self.to.focus(),
            Field::Distance | Field::Date => {}
        }
    }

    fn commit_tag_input(&mut self) {
        match self.focus {
            Field::From => {
                self.from.commit_input();
            }
            Field::To => {
                self.to.commit_input();
            }
            Field::Distance | Field::Date => {}
        }
    }

    fn open_submit(&mut self) -> Action {
        self.commit_tag_input();
        if let Err(e) = self.payload().validate_entry((self.clock)()) {
            tracing::debug!(error = %e, "submit blocked");
            self.show(Message::error(e.to_string()));
            return Action::None;
        }
        self.open_dialog(DialogMode::Submit);
        Action::None
    }

    fn open_dialog(&mut self, mode: DialogMode) {
        tracing::debug!(?mode, "opening code dialog");
        self.dismiss_message();
        self.code.clear();
        self.dialog_error = None;
        self.dialog = Some(mode);
        self.set_fields_disabled(true);
    }

    fn close_dialog(&mut self) {
        self.dialog = None;
        self.pending = false;
        self.dialog_error = None;
        self.code.clear();
        self.code.set_disabled(false);
        self.set_fields_disabled(false);
    }

    fn set_fields_disabled(&mut self, disabled: bool) {
        self.distance.set_disabled(disabled);
        self.from.set_disabled(disabled);
        self.to.set_disabled(disabled);
        self.date.set_disabled(disabled);
    }

    fn confirm(&mut self, mode: DialogMode) -> Action {
        if self.pending {
            return Action::None;
        }
        let token = self.code.value();
        if let Err(e) = validate_code(&token) {
            self.dialog_error = Some(e.to_string());
            return Action::None;
        }

        match mode {
            DialogMode::Submit => {
                let payload = self.payload();
                match CreateLogRequest::from_payload(&payload, (self.clock)()) {
                    Ok(request) => {
                        tracing::info!(date = %request.date, "submitting log entry");
                        self.last_submitted = Some(payload.cached_fields());
                        self.begin_request();
                        Action::CreateLog(request)
                    }
                    Err(e) => {
                        self.dialog_error = Some(e.to_string());
                        Action::None
                    }
                }
            }
            DialogMode::Download => match ExportRequest::new(&token) {
                Ok(request) => {
                    tracing::info!("requesting spreadsheet export");
                    self.begin_request();
                    Action::ExportSheet(request)
                }
                Err(e) => {
                    self.dialog_error = Some(e.to_string());
                    Action::None
                }
            },
        }
    }

    fn begin_request(&mut self) {
        self.pending = true;
        self.code.set_disabled(true);
    }

    fn on_log_created(&mut self) {
        let submitted = self
            .last_submitted
            .clone()
            .unwrap_or_else(|| self.payload().cached_fields());
        save_cache(self.store.as_ref(), &submitted);

        self.distance.clear();
        self.from.clear();
        self.to.clear();
        self.date.clear();
        self.show(Message::success(LOGGED_MESSAGE));
        self.timers
            .schedule(Timer::RestoreFields, self.settings.restore_delay);
    }

    fn restore_fields(&mut self) {
        self.dismiss_message();
        let cached = load_cache(self.store.as_ref())
            .or_else(|| self.last_submitted.clone())
            .unwrap_or_default();
        self.apply_cached(&cached);
        self.date.set_value(format_date((self.clock)()));
        self.code.clear();
        tracing::debug!("form restored after submit");
    }

    fn apply_cached(&mut self, cached: &CachedFields) {
        self.distance.set_value(cached.distance.as_str());
        self.from.set_values(&cached.from_places);
        self.to.set_values(&cached.to_places);
    }

    fn show(&mut self, message: Message) {
        self.message = Some(message);
        self.timers
            .schedule(Timer::ClearMessage, self.settings.message_timeout);
    }

    fn dismiss_message(&mut self) {
        self.message = None;
        self.timers.cancel(Timer::ClearMessage);
    }
}

impl Drop for LogFormState {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn edit_text(field: &mut TextField, key: KeyEvent) {
    match key.code {
        KeyCode::Char(ch) => {
            field.insert_char(ch);
        }
        KeyCode::Backspace => field.delete_char(),
        _ => {}
    }
}

/// Where the code dialog sits on a screen of size `area`.
pub fn dialog_area(area: Rect) -> Rect {
    centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area)
}

/// Renders the log form, and the code dialog over it when open.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_log_form(state: &LogFormState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Log Sheet Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [alert_area, distance_area, from_area, to_area, date_area, _, footer_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

    let editing = state.dialog().is_none();
    let focused = |field: Field| editing && state.focus() == field;

    draw_alert(state.message(), frame, alert_area);
    draw_text_field(state.distance(), focused(Field::Distance), frame, distance_area);
    draw_tag_field(state.from(), focused(Field::From), frame, from_area);
    draw_tag_field(state.to(), focused(Field::To), frame, to_area);
    draw_text_field(state.date(), focused(Field::Date), frame, date_area);

    let footer = Paragraph::new(
        "Tab: next field  Ctrl+S: next  Ctrl+E: export sheet  F1: help  Esc: quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);

    // Suggestions overlay the fields below the focused tag field.
    let below = |field: Rect| Rect {
        y: field.bottom(),
        height: inner.bottom().saturating_sub(field.bottom()),
        ..field
    };
    if focused(Field::From) {
        draw_suggestions(state.from(), frame, below(from_area));
    } else if focused(Field::To) {
        draw_suggestions(state.to(), frame, below(to_area));
    }

    if let Some(mode) = state.dialog() {
        let dialog = Dialog::new(mode.title(), mode.confirm_label()).pending(state.is_pending());
        draw_dialog(&dialog, frame, dialog_area(area), |frame, body| {
            let [prompt_area, code_area, error_area] = Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .areas(body);

            frame.render_widget(
                Paragraph::new(format!("Enter your {CODE_LENGTH}-digit code")).centered(),
                prompt_area,
            );
            let cells = centered_rect(code_field_width(state.code().len()), 3, code_area);
            draw_code_field(state.code(), true, frame, cells);
            if let Some(error) = state.dialog_error() {
                frame.render_widget(
                    Paragraph::new(Line::styled(error, Style::default().fg(Color::Red)))
                        .centered(),
                    error_area,
                );
            }
        });
    }
}
