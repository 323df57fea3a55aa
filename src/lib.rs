//! `textarea_core` - text editing and line layout core
//!
//! The pieces behind a graphical multi-line text area: a string buffer with
//! transactional edits and bounded undo/redo, a composable line layout
//! pipeline (wrapping, selection and cursor tracking, early exit), a render
//! driver that paints into an RGBA surface with parallel glyph compositing,
//! and the mapping from input events to editing commands.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use textarea_core::{Rect, TextArea, TextAreaConfig};
//! use textarea_core::face::{GlyphFace, MonoFace};
//! use textarea_core::commands::{self, Command};
//!
//! let face: Arc<dyn GlyphFace> = Arc::new(MonoFace::default());
//! let mut ta = TextArea::new(face, TextAreaConfig::default());
//! ta.set_bounds(Rect::new(0, 0, 320, 200));
//! ta.set_content("ab", true, true);
//!
//! commands::execute(&mut ta, &Command::InsertString("x".into())).unwrap();
//! assert_eq!(ta.content(), "xab");
//! assert!(ta.undo());
//! assert_eq!(ta.content(), "ab");
//! ```

// Crate-level lint configuration
#![warn(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_precision_loss)] // Intentional for color math
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow layout::LayoutOptions etc
#![allow(clippy::struct_excessive_bools)] // Text area state needs multiple flags
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::branches_sharing_code)] // Code clarity over DRY in branching
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference
#![allow(clippy::needless_collect)] // Collect for assertions is clear

pub mod clipboard;
pub mod color;
pub mod commands;
pub mod config;
pub mod error;
pub mod event;
pub mod face;
pub mod fixed;
pub mod input;
pub mod layout;
pub mod render;
pub mod surface;
pub mod text;
mod textarea;

// Re-export core types at crate root
pub use color::Rgba;
pub use error::{Error, Result};
pub use event::{EventRegistry, Subscription};
pub use fixed::{Fixed, Point, Rect};
pub use surface::Surface;
pub use textarea::{TextArea, TextAreaEvent};

// Re-export editing and layout types
pub use clipboard::{Clipboard, MemoryClipboard, SelectionKind, TargetTable};
pub use commands::Command;
pub use config::{Colors, TextAreaConfig, Wrap};
pub use layout::{Layout, LayoutOptions, PipelineBuilder};
pub use render::{PaintRequest, PaintStats, RenderDriver};
pub use text::{EditHistory, TextBuffer};

// Re-export input types
pub use input::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, command_for_key};
