//! Input events and key bindings.
//!
//! The host translates its native events into [`Event`]s (pointer positions
//! in text area coordinates) and hands them to
//! [`TextArea::handle_event`](crate::TextArea::handle_event). Keys are mapped
//! to [`Command`](crate::commands::Command)s by [`command_for_key`].

mod event;
mod keyboard;
mod keymap;
mod mouse;

pub use event::{Event, PasteEvent};
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
pub use keymap::command_for_key;
pub use mouse::{MouseButton, MouseEvent, MouseEventKind};
