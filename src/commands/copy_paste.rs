//! Clipboard commands.

use crate::clipboard::SelectionKind;
use crate::error::Result;
use crate::textarea::TextArea;

/// Copy the selection to the clipboard; no-op without a selection.
pub fn copy(ta: &mut TextArea) {
    if let Some(text) = ta.selected_text().map(str::to_string) {
        ta.set_copy(SelectionKind::Clipboard, &text);
    }
}

/// Copy the selection to the clipboard and delete it.
pub fn cut(ta: &mut TextArea) {
    let Some((start, end)) = ta.selection_range() else {
        return;
    };
    copy(ta);
    super::edit::delete_range(ta, start, end);
}

/// Insert the contents of `kind` at the cursor, replacing the selection.
///
/// On failure the error is returned and the content is untouched.
pub fn paste(ta: &mut TextArea, kind: SelectionKind) -> Result<()> {
    let text = ta.request_paste(kind)?;
    super::insert_string(ta, &text);
    Ok(())
}
