//! Reusable TUI widgets.

pub mod alert;
pub mod code_field;
pub mod dialog;
pub mod tag_field;
pub mod text_field;

pub use alert::{Message, MessageKind, draw_alert};
pub use code_field::{CodeField, code_field_width, draw_code_field};
pub use dialog::{Dialog, centered_rect, contains, draw_dialog};
pub use tag_field::{MAX_SUGGESTIONS, TagField, draw_suggestions, draw_tag_field};
pub use text_field::{TextField, draw_text_field};
