//! Error types for the text area core.
//!
//! Only collaborator failures and invalid construction parameters are
//! reported as errors. Contract violations (a second open edit transaction,
//! an edit index outside the running content) panic, and boundary no-ops such
//! as undo on an empty history are reported through `bool`/`Option` returns.

use std::fmt;

use crate::clipboard::SelectionKind;

/// Result type alias for text area operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for text area operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested selection channel holds no text.
    ClipboardEmpty(SelectionKind),
    /// No clipboard collaborator is attached to the text area.
    ClipboardUnavailable(SelectionKind),
    /// The clipboard collaborator reported a failure.
    Clipboard {
        kind: SelectionKind,
        message: String,
    },
    /// Surface dimension error (zero width or height).
    InvalidDimensions { width: u32, height: u32 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClipboardEmpty(kind) => write!(f, "{kind} selection is empty"),
            Self::ClipboardUnavailable(kind) => {
                write!(f, "{kind} selection is not available")
            }
            Self::Clipboard { kind, message } => {
                write!(f, "{kind} selection request failed: {message}")
            }
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions: {width}x{height}")
            }
        }
    }
}

impl std::error::Error for Error {}
