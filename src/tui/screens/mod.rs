//! TUI screen implementations.

pub mod help;
pub mod log_form;

pub use help::{HelpState, draw_help};
pub use log_form::{
    DialogMode, Field, FormSettings, LOGGED_MESSAGE, LogFormState, dialog_area, draw_log_form,
};
