//! Clipboard collaborator boundary.
//!
//! The text area talks to the host's selection exchange through the
//! [`Clipboard`] trait. [`MemoryClipboard`] is an in-process implementation
//! that also answers transfer requests the way a selection owner would, using
//! a read-only [`TargetTable`] built once by the host.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};

/// Selection channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    /// Mouse selection, pasted with the middle button.
    Primary,
    /// Explicit copy/cut/paste.
    Clipboard,
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Clipboard => write!(f, "clipboard"),
        }
    }
}

/// Host selection exchange used by copy, cut and paste commands.
pub trait Clipboard {
    /// Fetch the text currently held by `kind`.
    fn request_paste(&mut self, kind: SelectionKind) -> Result<String>;

    /// Take ownership of `kind` with `text`.
    fn set_copy(&mut self, kind: SelectionKind, text: &str);
}

/// Identifier of a transfer target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Target(pub u32);

/// Read-only table of transfer target identifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetTable {
    by_name: HashMap<String, Target>,
    utf8_string: Target,
    targets: Target,
}

impl TargetTable {
    pub const UTF8_STRING: &'static str = "UTF8_STRING";
    pub const TARGETS: &'static str = "TARGETS";

    /// Build the table from host-assigned identifiers.
    #[must_use]
    pub fn new(utf8_string: Target, targets: Target) -> Self {
        let by_name = [
            (Self::UTF8_STRING.to_string(), utf8_string),
            (Self::TARGETS.to_string(), targets),
        ]
        .into_iter()
        .collect();
        Self {
            by_name,
            utf8_string,
            targets,
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Target> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn name(&self, target: Target) -> Option<&str> {
        self.by_name
            .iter()
            .find(|(_, t)| **t == target)
            .map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn utf8_string(&self) -> Target {
        self.utf8_string
    }

    #[must_use]
    pub fn targets(&self) -> Target {
        self.targets
    }
}

impl Default for TargetTable {
    fn default() -> Self {
        Self::new(Target(1), Target(2))
    }
}

/// Answer to a transfer request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transfer {
    Text(String),
    Targets(Vec<Target>),
}

/// In-memory selection owner.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    targets: TargetTable,
    primary: String,
    clipboard: String,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new(targets: TargetTable) -> Self {
        Self {
            targets,
            primary: String::new(),
            clipboard: String::new(),
        }
    }

    #[must_use]
    pub fn contents(&self, kind: SelectionKind) -> &str {
        match kind {
            SelectionKind::Primary => &self.primary,
            SelectionKind::Clipboard => &self.clipboard,
        }
    }

    fn slot(&mut self, kind: SelectionKind) -> &mut String {
        match kind {
            SelectionKind::Primary => &mut self.primary,
            SelectionKind::Clipboard => &mut self.clipboard,
        }
    }

    /// Answer another client's request for `kind` converted to `target`.
    ///
    /// Unknown targets are ignored.
    #[must_use]
    pub fn serve(&self, kind: SelectionKind, target: Target) -> Option<Transfer> {
        if target == self.targets.utf8_string() {
            Some(Transfer::Text(self.contents(kind).to_string()))
        } else if target == self.targets.targets() {
            Some(Transfer::Targets(vec![self.targets.utf8_string()]))
        } else {
            tracing::debug!(%kind, target = target.0, "ignored selection request");
            None
        }
    }

    /// Another client took ownership of `kind`.
    pub fn clear(&mut self, kind: SelectionKind) {
        self.slot(kind).clear();
    }
}

impl Clipboard for MemoryClipboard {
    fn request_paste(&mut self, kind: SelectionKind) -> Result<String> {
        let text = self.contents(kind);
        if text.is_empty() {
            return Err(Error::ClipboardEmpty(kind));
        }
        Ok(text.to_string())
    }

    fn set_copy(&mut self, kind: SelectionKind, text: &str) {
        let slot = self.slot(kind);
        slot.clear();
        slot.push_str(text);
    }
}
