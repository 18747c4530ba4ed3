//! TUI: App state, event loop, screens, widgets.

pub mod action;
pub mod app;
pub mod error;
pub mod screens;
pub mod timer;
pub mod widgets;

pub use app::{App, Screen};
pub use error::AppError;
