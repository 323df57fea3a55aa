//! Edit transactions and the bounded undo/redo history.
//!
//! Edits are recorded as (index, text) deltas. A transaction is opened
//! against a baseline string, collects operations whose indices refer to its
//! running content, and on close replays them against the baseline to
//! materialize the final string. A changed transaction becomes one
//! [`EditRecord`], undone and redone as a unit.
//!
//! # Examples
//!
//! ```
//! use textarea_core::text::EditHistory;
//!
//! let mut history = EditHistory::new(40);
//! let mut tx = history.open("ab");
//! tx.insert(0, "x");
//! let (content, changed) = history.commit(tx);
//! assert_eq!(content, "xab");
//! assert!(changed);
//!
//! let (content, cursor) = history.pop_undo(&content).unwrap();
//! assert_eq!((content.as_str(), cursor), ("ab", 0));
//! ```

use std::collections::VecDeque;

use tracing::trace;

/// Default maximum number of records to retain.
pub const DEFAULT_MAX_DEPTH: usize = 40;

/// One reversible string operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOp {
    /// `text` inserted at byte `index`.
    Insert { index: usize, text: String },
    /// `text` removed starting at byte `index`.
    Delete { index: usize, text: String },
}

impl EditOp {
    fn invert(&self) -> Self {
        match self {
            Self::Insert { index, text } => Self::Delete {
                index: *index,
                text: text.clone(),
            },
            Self::Delete { index, text } => Self::Insert {
                index: *index,
                text: text.clone(),
            },
        }
    }

    fn apply(&self, content: &mut String) {
        match self {
            Self::Insert { index, text } => content.insert_str(*index, text),
            Self::Delete { index, text } => {
                content.replace_range(*index..*index + text.len(), "");
            }
        }
    }

    /// Cursor position right after this operation was applied.
    fn cursor_after(&self) -> usize {
        match self {
            Self::Insert { index, text } => index + text.len(),
            Self::Delete { index, .. } => *index,
        }
    }
}

/// A committed, undoable unit of one or more operations.
///
/// Carries the cursor before the edit opened and after it closed; undo
/// returns the first, redo the second.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditRecord {
    ops: Vec<EditOp>,
    cursor_before: usize,
    cursor_after: usize,
}

impl EditRecord {
    #[must_use]
    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    #[must_use]
    pub fn cursor_before(&self) -> usize {
        self.cursor_before
    }

    #[must_use]
    pub fn cursor_after(&self) -> usize {
        self.cursor_after
    }

    fn redo(&self, content: &mut String) -> usize {
        for op in &self.ops {
            op.apply(content);
        }
        self.cursor_after
    }

    fn undo(&self, content: &mut String) -> usize {
        for op in self.ops.iter().rev() {
            op.invert().apply(content);
        }
        self.cursor_before
    }
}

/// An open edit transaction.
///
/// # Panics
/// `insert` and `delete` panic when an index lies outside the running content
/// or not on a `char` boundary: callers are expected to pass clamped indices.
#[derive(Clone, Debug)]
pub struct EditTransaction {
    baseline: String,
    running: String,
    ops: Vec<EditOp>,
    cursor_before: Option<usize>,
    cursor_after: Option<usize>,
}

impl EditTransaction {
    /// Open a transaction directly, without a history slot.
    #[must_use]
    pub fn new(baseline: &str) -> Self {
        Self {
            baseline: baseline.to_string(),
            running: baseline.to_string(),
            ops: Vec::new(),
            cursor_before: None,
            cursor_after: None,
        }
    }

    /// Content with every operation so far applied.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.running
    }

    #[must_use]
    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    /// Cursor to restore when the record is undone.
    pub fn set_cursor_before(&mut self, index: usize) {
        self.cursor_before = Some(index);
    }

    /// Cursor to restore when the record is redone.
    pub fn set_cursor_after(&mut self, index: usize) {
        self.cursor_after = Some(index);
    }

    fn check_index(&self, index: usize) {
        assert!(
            index <= self.running.len() && self.running.is_char_boundary(index),
            "edit index {index} is not a valid offset into content of length {}",
            self.running.len()
        );
    }

    /// Insert `text` at `index` of the running content.
    pub fn insert(&mut self, index: usize, text: &str) {
        self.check_index(index);
        if text.is_empty() {
            return;
        }
        let op = EditOp::Insert {
            index,
            text: text.to_string(),
        };
        op.apply(&mut self.running);
        self.ops.push(op);
    }

    /// Delete the running-content range between `start` and `end`.
    pub fn delete(&mut self, start: usize, end: usize) {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        self.check_index(start);
        self.check_index(end);
        if start == end {
            return;
        }
        let op = EditOp::Delete {
            index: start,
            text: self.running[start..end].to_string(),
        };
        op.apply(&mut self.running);
        self.ops.push(op);
    }

    /// Materialize the final content by replaying against the baseline.
    ///
    /// Returns the content, the record, and whether anything changed.
    /// Cursors not set explicitly fall back to the removal point of the first
    /// operation (before) and the end of the last operation (after).
    #[must_use]
    pub fn close(self) -> (String, EditRecord, bool) {
        let cursor_before = self.cursor_before.unwrap_or_else(|| {
            self.ops
                .first()
                .map_or(0, |op| op.invert().cursor_after())
        });
        let cursor_after = self
            .cursor_after
            .unwrap_or_else(|| self.ops.last().map_or(0, EditOp::cursor_after));
        let record = EditRecord {
            ops: self.ops,
            cursor_before,
            cursor_after,
        };
        let mut content = self.baseline.clone();
        record.redo(&mut content);
        debug_assert_eq!(content, self.running);
        let changed = content != self.baseline;
        (content, record, changed)
    }
}

/// Linear undo/redo history with bounded depth.
#[derive(Clone, Debug)]
pub struct EditHistory {
    records: VecDeque<EditRecord>,
    /// Number of records currently applied; records at `undo_index..` are redoable.
    undo_index: usize,
    max_depth: usize,
    open: bool,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl EditHistory {
    /// Create a history retaining at most `max_depth` records (minimum 1).
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self {
            records: VecDeque::new(),
            undo_index: 0,
            max_depth: max_depth.max(1),
            open: false,
        }
    }

    /// Open a transaction against `baseline`.
    ///
    /// # Panics
    /// Panics if a transaction obtained from this history is still open.
    #[must_use]
    pub fn open(&mut self, baseline: &str) -> EditTransaction {
        assert!(!self.open, "edit transaction already open");
        self.open = true;
        EditTransaction::new(baseline)
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Close `tx`, pushing its record when it changed the content.
    ///
    /// Returns the final content and the changed flag.
    pub fn commit(&mut self, tx: EditTransaction) -> (String, bool) {
        self.open = false;
        let (content, record, changed) = tx.close();
        if changed {
            self.push_record(record);
        }
        (content, changed)
    }

    /// Abandon an open transaction without recording it.
    pub fn discard(&mut self, tx: EditTransaction) {
        self.open = false;
        drop(tx);
    }

    /// Commit a record, discarding the redo tail and evicting the oldest
    /// record when the depth bound is exceeded.
    pub fn push_record(&mut self, record: EditRecord) {
        self.records.truncate(self.undo_index);
        self.records.push_back(record);
        self.evict_excess();
        self.undo_index = self.records.len();
        trace!(depth = self.records.len(), "edit record pushed");
    }

    fn evict_excess(&mut self) {
        while self.records.len() > self.max_depth {
            self.records.pop_front();
            self.undo_index = self.undo_index.saturating_sub(1);
        }
    }

    /// Undo the record before the pointer. `None` at the oldest record.
    #[must_use]
    pub fn pop_undo(&mut self, current: &str) -> Option<(String, usize)> {
        let idx = self.undo_index.checked_sub(1)?;
        let mut content = current.to_string();
        let cursor = self.records[idx].undo(&mut content);
        self.undo_index = idx;
        Some((content, cursor))
    }

    /// Redo the record at the pointer. `None` at the newest record.
    #[must_use]
    pub fn unpop_redo(&mut self, current: &str) -> Option<(String, usize)> {
        let record = self.records.get(self.undo_index)?;
        let mut content = current.to_string();
        let cursor = record.redo(&mut content);
        self.undo_index += 1;
        Some((content, cursor))
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undo_index > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.undo_index < self.records.len()
    }

    /// Number of retained records (undoable and redoable).
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Change the depth bound; shrinking evicts the oldest records now.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth.max(1);
        self.evict_excess();
    }

    /// Drop every record. An open transaction stays open.
    pub fn clear(&mut self) {
        self.records.clear();
        self.undo_index = 0;
    }
}
