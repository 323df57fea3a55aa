//! Text buffer model: content, cursor, selection and transactional edits.

use tracing::debug;

use crate::event::{EventRegistry, Subscription};
use crate::text::boundary::floor_char_boundary;
use crate::text::history::{DEFAULT_MAX_DEPTH, EditHistory, EditTransaction};

/// Notification emitted by a [`TextBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferEvent {
    /// The content was replaced; `revision` is the new content revision.
    ContentChanged { revision: u64 },
}

/// Editable text with cursor, selection and undo/redo.
///
/// Content is a `String` snapshot replaced as a whole whenever an edit
/// transaction commits; while a transaction is open, [`content`](Self::content)
/// reports the transaction's running content. Indices are byte offsets and
/// every index setter clamps into `[0, len]`, snapping down to a `char`
/// boundary.
///
/// # Examples
///
/// ```
/// use textarea_core::TextBuffer;
///
/// let mut buf = TextBuffer::with_content("ab");
/// buf.begin_edit();
/// buf.insert(0, "x");
/// assert!(buf.end_edit());
/// assert_eq!(buf.content(), "xab");
///
/// assert!(buf.undo());
/// assert_eq!(buf.content(), "ab");
/// assert!(!buf.undo());
/// ```
#[derive(Debug)]
pub struct TextBuffer {
    content: String,
    cursor: usize,
    anchor: usize,
    selection_on: bool,
    history: EditHistory,
    edit: Option<EditTransaction>,
    revision: u64,
    events: EventRegistry<BufferEvent>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_history_depth(DEFAULT_MAX_DEPTH)
    }

    /// Create a buffer with initial content and an empty history.
    #[must_use]
    pub fn with_content(content: &str) -> Self {
        let mut buf = Self::new();
        buf.content = content.to_string();
        buf
    }

    /// Create an empty buffer keeping at most `max_depth` undo records.
    #[must_use]
    pub fn with_max_history_depth(max_depth: usize) -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            anchor: 0,
            selection_on: false,
            history: EditHistory::new(max_depth),
            edit: None,
            revision: 0,
            events: EventRegistry::new(),
        }
    }

    /// Current content (the running content while an edit is open).
    #[must_use]
    pub fn content(&self) -> &str {
        self.edit
            .as_ref()
            .map_or(self.content.as_str(), EditTransaction::content)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.content().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content().is_empty()
    }

    /// Content revision, bumped on every replacement.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the content.
    ///
    /// The selection is always turned off. `clear_position` moves the cursor
    /// to the start. With `clear_history` the history is dropped and the
    /// content set directly; otherwise the replacement is recorded as one
    /// undoable edit.
    pub fn set_content(&mut self, content: &str, clear_position: bool, clear_history: bool) {
        self.clear_selection();
        if clear_position {
            self.set_cursor_index(0);
        }
        if clear_history {
            self.history.clear();
            self.replace_content(content.to_string());
        } else {
            self.begin_edit();
            let len = self.len();
            self.delete(0, len);
            self.insert(0, content);
            self.end_edit();
        }
    }

    fn replace_content(&mut self, content: String) {
        if content == self.content {
            return;
        }
        self.content = content;
        self.revision += 1;
        // re-validate indices against the new length
        self.cursor = self.valid_index(self.cursor);
        self.anchor = self.valid_index(self.anchor);
        self.validate_selection();
        self.events.emit(&BufferEvent::ContentChanged {
            revision: self.revision,
        });
    }

    fn valid_index(&self, v: usize) -> usize {
        floor_char_boundary(self.content(), v)
    }

    #[must_use]
    pub fn cursor_index(&self) -> usize {
        self.cursor
    }

    /// Move the cursor; an active selection keeps its anchor.
    pub fn set_cursor_index(&mut self, v: usize) {
        self.cursor = self.valid_index(v);
        self.validate_selection();
    }

    /// Selection anchor; equals the cursor when no selection is active.
    #[must_use]
    pub fn selection_anchor(&self) -> usize {
        if self.selection_active() {
            self.anchor
        } else {
            self.cursor
        }
    }

    /// Set the anchor, activating the selection when it differs from the cursor.
    pub fn set_selection_anchor(&mut self, v: usize) {
        self.anchor = self.valid_index(v);
        self.selection_on = self.anchor != self.cursor;
    }

    /// Set anchor and cursor together.
    pub fn set_selection(&mut self, anchor: usize, cursor: usize) {
        self.cursor = self.valid_index(cursor);
        self.set_selection_anchor(anchor);
    }

    #[must_use]
    pub fn selection_active(&self) -> bool {
        self.selection_on && self.anchor != self.cursor
    }

    pub fn clear_selection(&mut self) {
        self.selection_on = false;
    }

    fn validate_selection(&mut self) {
        if self.anchor == self.cursor {
            self.selection_on = false;
        }
    }

    /// Ordered `(start, end)` of the active selection.
    #[must_use]
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        self.selection_active()
            .then(|| (self.anchor.min(self.cursor), self.anchor.max(self.cursor)))
    }

    #[must_use]
    pub fn selected_text(&self) -> Option<&str> {
        let (start, end) = self.selection_range()?;
        self.content().get(start..end)
    }

    /// Open an edit transaction against the current content.
    ///
    /// # Panics
    /// Panics if an edit is already open.
    pub fn begin_edit(&mut self) {
        let mut tx = self.history.open(&self.content);
        tx.set_cursor_before(self.cursor);
        self.edit = Some(tx);
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    fn open_edit(&mut self) -> &mut EditTransaction {
        self.edit
            .as_mut()
            .expect("edit operation without an open transaction")
    }

    /// Insert into the open transaction.
    ///
    /// # Panics
    /// Panics if no edit is open or `index` is not a valid offset.
    pub fn insert(&mut self, index: usize, text: &str) {
        self.open_edit().insert(index, text);
    }

    /// Delete from the open transaction.
    ///
    /// # Panics
    /// Panics if no edit is open or an index is not a valid offset.
    pub fn delete(&mut self, start: usize, end: usize) {
        self.open_edit().delete(start, end);
    }

    /// Commit the open transaction. Returns whether the content changed.
    ///
    /// An unchanged transaction pushes no record and emits no event. Calling
    /// this with no open edit is a no-op.
    pub fn end_edit(&mut self) -> bool {
        self.end_edit_at(self.cursor)
    }

    /// Commit the open transaction and move the cursor to `cursor`, an index
    /// into the final content. Redo returns to this position.
    pub fn end_edit_at(&mut self, cursor: usize) -> bool {
        let cursor = self.valid_index(cursor);
        let Some(mut tx) = self.edit.take() else {
            return false;
        };
        tx.set_cursor_after(cursor);
        let (content, changed) = self.history.commit(tx);
        if changed {
            debug!(len = content.len(), depth = self.history.len(), "edit committed");
            self.replace_content(content);
        }
        // indices set while editing may refer to the discarded running content
        self.cursor = self.valid_index(cursor);
        self.anchor = self.valid_index(self.anchor);
        self.validate_selection();
        changed
    }

    /// Undo the last record. Returns `false` at the oldest record.
    pub fn undo(&mut self) -> bool {
        if self.edit.is_some() {
            return false;
        }
        let Some((content, cursor)) = self.history.pop_undo(&self.content) else {
            return false;
        };
        debug!(cursor, "undo");
        self.replace_content(content);
        self.set_cursor_index(cursor);
        self.clear_selection();
        true
    }

    /// Redo the next record. Returns `false` at the newest record.
    pub fn redo(&mut self) -> bool {
        if self.edit.is_some() {
            return false;
        }
        let Some((content, cursor)) = self.history.unpop_redo(&self.content) else {
            return false;
        };
        debug!(cursor, "redo");
        self.replace_content(content);
        self.set_cursor_index(cursor);
        self.clear_selection();
        true
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn set_max_history_depth(&mut self, max_depth: usize) {
        self.history.set_max_depth(max_depth);
    }

    /// Observe committed content changes (one event per transaction).
    #[must_use = "dropping the subscription unregisters the callback"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&BufferEvent) + 'static,
    {
        self.events.subscribe(callback)
    }
}
