//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use textarea_core::face::{GlyphFace, MonoFace};
use textarea_core::{MemoryClipboard, Rect, TextArea, TextAreaConfig};
use tracing::Level;

/// Cell width of the test face.
pub const CELL_W: i32 = 8;
/// Line height of the test face.
pub const LINE_H: i32 = 16;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_test_writer()
        .try_init();
}

pub fn face() -> Arc<dyn GlyphFace> {
    Arc::new(MonoFace::with_cell(CELL_W, LINE_H))
}

/// Text area of `cols` x `rows` cells with a memory clipboard.
pub fn text_area(content: &str, cols: u32, rows: u32) -> TextArea {
    text_area_with(content, cols, rows, TextAreaConfig::default())
}

pub fn text_area_with(content: &str, cols: u32, rows: u32, config: TextAreaConfig) -> TextArea {
    let mut ta = TextArea::new(face(), config).with_clipboard(Box::new(MemoryClipboard::default()));
    ta.set_bounds(Rect::new(0, 0, cols * CELL_W as u32, rows * LINE_H as u32));
    ta.set_content(content, true, true);
    ta
}
