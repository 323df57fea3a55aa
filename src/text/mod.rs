//! Text storage, edit transactions and undo/redo.
//!
//! Key types:
//!
//! - [`TextBuffer`]: content snapshot with cursor, selection and
//!   transactional edits
//! - [`EditHistory`]: bounded linear undo/redo log of [`EditRecord`]s
//! - [`EditTransaction`]: operations collected between `begin_edit` and
//!   `end_edit`, replayed against their baseline on commit
//!
//! # Examples
//!
//! ```
//! use textarea_core::TextBuffer;
//!
//! let mut buf = TextBuffer::with_content("hello");
//! buf.begin_edit();
//! buf.insert(5, " world");
//! buf.end_edit();
//! buf.set_cursor_index(11);
//!
//! buf.undo();
//! assert_eq!(buf.content(), "hello");
//! buf.redo();
//! assert_eq!(buf.content(), "hello world");
//! assert_eq!(buf.cursor_index(), 11);
//! ```

pub mod boundary;
mod buffer;
mod history;

pub use buffer::{BufferEvent, TextBuffer};
pub use history::{DEFAULT_MAX_DEPTH, EditHistory, EditOp, EditRecord, EditTransaction};
