use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};

use crate::config::Config;
use crate::storage::open_store;
use crate::transport::{Completion, ErrorKind, HttpApi, Job, TransportError, Worker};

use super::action::Action;
use super::error::AppError;
use super::screens::{FormSettings, HelpState, LogFormState, draw_help, draw_log_form};

/// Longest wait for a terminal event before checking completions and timers.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// The log form and its code dialog.
    Form,
    /// Show keybinding help.
    Help,
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    form: LogFormState,
    help: HelpState,
    worker: Worker,
    /// Size of the last drawn frame, for mouse hit testing.
    area: Rect,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` starting on the [`Screen::Form`] screen.
    pub fn new(form: LogFormState, worker: Worker) -> Self {
        Self {
            screen: Screen::Form,
            form,
            help: HelpState::new(),
            worker,
            area: Rect::default(),
            should_quit: false,
        }
    }

    /// Wires the store, HTTP client and transport worker from `config`.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let store = open_store(config.storage.path.as_deref());
        let form = LogFormState::new(store, FormSettings::from_config(config));
        let api = HttpApi::new(&config.api)?;
        let export_path = config.export.resolve_path()?;
        tracing::info!(
            api = %config.api.base_url,
            export = %export_path.display(),
            "starting"
        );
        let worker = Worker::spawn(api, export_path)?;
        Ok(Self::new(form, worker))
    }

    /// Main event loop: draw, poll for input, apply finished requests, fire
    /// due timers.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(self.poll_timeout(Instant::now()))? {
                self.handle_event(event::read()?);
            }
            self.drain_completions();
            self.form.tick(Instant::now());
        }
        self.form.teardown();
        Ok(())
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&mut self, frame: &mut Frame) {
        self.area = frame.area();
        match self.screen {
            Screen::Form => draw_log_form(&self.form, frame, self.area),
            Screen::Help => draw_help(&self.help, frame, self.area),
        }
    }

    fn poll_timeout(&self, now: Instant) -> Duration {
        self.form
            .next_deadline()
            .map_or(POLL_INTERVAL, |at| {
                at.saturating_duration_since(now).min(POLL_INTERVAL)
            })
    }

    /// Dispatches a terminal event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(text) if self.screen == Screen::Form => self.form.handle_paste(&text),
            Event::Mouse(mouse)
                if self.screen == Screen::Form
                    && mouse.kind == MouseEventKind::Down(MouseButton::Left) =>
            {
                self.form.handle_click(self.area, mouse.column, mouse.row);
            }
            _ => {}
        }
    }

    /// Handles a key event: global keys first, then screen-specific.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if key.code == KeyCode::F(1) {
            if self.screen != Screen::Help {
                self.help.reset();
                self.help.set_origin(self.screen);
                self.screen = Screen::Help;
            }
            return;
        }

        let action = match self.screen {
            Screen::Form => self.form.handle_key(key),
            Screen::Help => self.help.handle_key(key),
        };
        self.apply(action);
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => self.screen = screen,
            Action::CreateLog(request) => self.dispatch(Job::CreateLog(request)),
            Action::ExportSheet(request) => self.dispatch(Job::ExportSheet(request)),
            Action::Quit => self.should_quit = true,
        }
    }

    fn dispatch(&mut self, job: Job) {
        let failed = match &job {
            Job::CreateLog(_) => {
                Completion::LogCreated(Err(TransportError::fallback(ErrorKind::Transport)))
            }
            Job::ExportSheet(_) => {
                Completion::SheetExported(Err(TransportError::fallback(ErrorKind::Transport)))
            }
        };
        if !self.worker.submit(job) {
            tracing::error!("transport worker has stopped");
            self.form.on_completion(failed);
        }
    }

    /// Applies every request outcome the worker has ready.
    pub fn drain_completions(&mut self) {
        while let Some(completion) = self.worker.try_recv() {
            self.form.on_completion(completion);
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn form(&self) -> &LogFormState {
        &self.form
    }
}
