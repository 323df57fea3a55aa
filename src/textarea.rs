//! Text area: buffer, layout cache, scrolling, painting and input.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::clipboard::{Clipboard, SelectionKind};
use crate::commands::{self, Command};
use crate::config::{TextAreaConfig, Wrap};
use crate::error::{Error, Result};
use crate::event::{EventRegistry, Subscription};
use crate::face::GlyphFace;
use crate::fixed::{Fixed, Point, Rect};
use crate::input::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind, command_for_key};
use crate::layout::{Layout, LayoutOptions};
use crate::render::{PaintRequest, PaintStats, RenderDriver};
use crate::surface::Surface;
use crate::text::TextBuffer;
use crate::text::boundary::floor_char_boundary;

/// Notification emitted by a [`TextArea`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAreaEvent {
    /// Command request (right button release, double or triple click) at
    /// the cursor.
    Cmd { index: usize },
    /// Content replaced; `revision` is the new buffer revision.
    ContentChanged { revision: u64 },
    /// Vertical scroll offset changed.
    OffsetChanged { offset_y: Fixed },
    /// Bounds changed.
    BoundsChanged { bounds: Rect },
}

/// An editable, scrollable block of text.
///
/// The layout is measured against committed content and cached by buffer
/// revision and wrap options; it is refreshed after every committed edit,
/// undo, redo and bounds change.
pub struct TextArea {
    buffer: TextBuffer,
    face: Arc<dyn GlyphFace>,
    driver: RenderDriver,
    layout: Layout,
    config: TextAreaConfig,
    bounds: Rect,
    offset_y: Fixed,
    button_pressed: bool,
    clipboard: Option<Box<dyn Clipboard>>,
    needs_paint: bool,
    events: EventRegistry<TextAreaEvent>,
}

impl fmt::Debug for TextArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextArea")
            .field("buffer", &self.buffer)
            .field("bounds", &self.bounds)
            .field("offset_y", &self.offset_y)
            .field("config", &self.config)
            .field("needs_paint", &self.needs_paint)
            .finish_non_exhaustive()
    }
}

impl TextArea {
    #[must_use]
    pub fn new(face: Arc<dyn GlyphFace>, config: TextAreaConfig) -> Self {
        let buffer = TextBuffer::with_max_history_depth(config.max_undo_depth);
        let driver = Self::driver_for(&face, &config);
        let options = LayoutOptions {
            wrap_width: None,
            tab_width: config.tab_width,
        };
        let layout = Layout::measure(buffer.content(), face.as_ref(), options, buffer.revision());
        let mut ta = Self {
            buffer,
            face,
            driver,
            layout,
            config,
            bounds: Rect::default(),
            offset_y: Fixed::ZERO,
            button_pressed: false,
            clipboard: None,
            needs_paint: true,
            events: EventRegistry::new(),
        };
        ta.sync_layout();
        ta
    }

    fn driver_for(face: &Arc<dyn GlyphFace>, config: &TextAreaConfig) -> RenderDriver {
        RenderDriver::new(Arc::clone(face))
            .with_colors(config.colors)
            .with_workers(config.render_workers)
            .with_slack_lines(config.early_exit_slack_lines)
    }

    /// Attach the clipboard collaborator.
    #[must_use]
    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn set_clipboard(&mut self, clipboard: Box<dyn Clipboard>) {
        self.clipboard = Some(clipboard);
    }

    #[must_use]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn config(&self) -> &TextAreaConfig {
        &self.config
    }

    /// Replace the configuration, re-measuring when wrapping changes.
    pub fn set_config(&mut self, config: TextAreaConfig) {
        self.driver = Self::driver_for(&self.face, &config);
        self.buffer.set_max_history_depth(config.max_undo_depth);
        self.config = config;
        self.sync_layout();
        self.set_offset_y(self.offset_y);
        self.needs_paint = true;
    }

    #[must_use]
    pub fn face(&self) -> &dyn GlyphFace {
        self.face.as_ref()
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    // --- layout ---

    fn layout_options(&self, width: u32) -> LayoutOptions {
        let wrap_width = match self.config.wrap {
            // not laid out by the host yet
            Wrap::Bounds if width == 0 => None,
            wrap => wrap.width(width, self.face.as_ref()),
        };
        LayoutOptions {
            wrap_width,
            tab_width: self.config.tab_width,
        }
    }

    fn relayout(&mut self, width: u32) {
        if self.buffer.is_editing() {
            return;
        }
        let options = self.layout_options(width);
        let revision = self.buffer.revision();
        if !self.layout.is_valid_for(revision, options) {
            self.layout = Layout::measure(self.buffer.content(), self.face.as_ref(), options, revision);
        }
    }

    fn sync_layout(&mut self) {
        self.relayout(self.bounds.width);
    }

    /// Measure the content at `width` and return its height in pixels (at
    /// least one line).
    pub fn measure(&mut self, width: u32) -> u32 {
        self.relayout(width);
        self.height().round().max(0) as u32
    }

    #[must_use]
    pub fn line_height(&self) -> Fixed {
        self.face.line_height()
    }

    /// Content height, at least one line.
    #[must_use]
    pub fn height(&self) -> Fixed {
        self.layout.height().max(self.line_height())
    }

    /// Pen position of `index` in content coordinates.
    #[must_use]
    pub fn point_at_index(&self, index: usize) -> Point {
        self.layout.point_at_index(self.buffer.content(), index)
    }

    /// Index under a point in content coordinates.
    #[must_use]
    pub fn index_at_point(&self, point: Point) -> usize {
        let index = self.layout.index_at_point(point);
        floor_char_boundary(self.buffer.content(), index)
    }

    // --- content ---

    #[must_use]
    pub fn content(&self) -> &str {
        self.buffer.content()
    }

    /// Replace the content; see [`TextBuffer::set_content`]. With
    /// `clear_position` the view also scrolls back to the top.
    pub fn set_content(&mut self, content: &str, clear_position: bool, clear_history: bool) {
        let revision = self.buffer.revision();
        self.buffer.set_content(content, clear_position, clear_history);
        if clear_position {
            self.set_offset_y(Fixed::ZERO);
        }
        self.content_changed(revision);
    }

    fn content_changed(&mut self, old_revision: u64) {
        self.needs_paint = true;
        if self.buffer.revision() == old_revision {
            return;
        }
        self.sync_layout();
        let revision = self.buffer.revision();
        self.events.emit(&TextAreaEvent::ContentChanged { revision });
        // the content may have shrunk below the current offset
        self.set_offset_y(self.offset_y);
    }

    pub fn begin_edit(&mut self) {
        self.buffer.begin_edit();
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.buffer.is_editing()
    }

    pub fn insert(&mut self, index: usize, text: &str) {
        self.buffer.insert(index, text);
    }

    pub fn delete(&mut self, start: usize, end: usize) {
        self.buffer.delete(start, end);
    }

    /// Commit the open edit. Returns whether the content changed.
    pub fn end_edit(&mut self) -> bool {
        let cursor = self.buffer.cursor_index();
        self.end_edit_at(cursor)
    }

    /// Commit the open edit leaving the cursor at `cursor`; redo returns there.
    pub fn end_edit_at(&mut self, cursor: usize) -> bool {
        let revision = self.buffer.revision();
        let old = self.buffer.cursor_index();
        let changed = self.buffer.end_edit_at(cursor);
        self.content_changed(revision);
        let new = self.buffer.cursor_index();
        if new != old {
            self.make_index_visible(new);
        }
        changed
    }

    pub fn undo(&mut self) -> bool {
        let revision = self.buffer.revision();
        if !self.buffer.undo() {
            return false;
        }
        self.content_changed(revision);
        self.make_index_visible(self.cursor_index());
        true
    }

    pub fn redo(&mut self) -> bool {
        let revision = self.buffer.revision();
        if !self.buffer.redo() {
            return false;
        }
        self.content_changed(revision);
        self.make_index_visible(self.cursor_index());
        true
    }

    // --- cursor and selection ---

    #[must_use]
    pub fn cursor_index(&self) -> usize {
        self.buffer.cursor_index()
    }

    /// Move the cursor and scroll it into view.
    pub fn set_cursor_index(&mut self, index: usize) {
        let old = self.buffer.cursor_index();
        self.buffer.set_cursor_index(index);
        let new = self.buffer.cursor_index();
        if new != old {
            self.make_index_visible(new);
            self.needs_paint = true;
        }
    }

    #[must_use]
    pub fn selection_anchor(&self) -> usize {
        self.buffer.selection_anchor()
    }

    pub fn set_selection_anchor(&mut self, index: usize) {
        self.buffer.set_selection_anchor(index);
        self.needs_paint = true;
    }

    /// Set anchor and cursor; the cursor is scrolled into view.
    pub fn set_selection(&mut self, anchor: usize, cursor: usize) {
        self.set_cursor_index(cursor);
        self.buffer.set_selection(anchor, cursor);
        self.needs_paint = true;
    }

    #[must_use]
    pub fn selection_active(&self) -> bool {
        self.buffer.selection_active()
    }

    pub fn clear_selection(&mut self) {
        if self.buffer.selection_active() {
            self.needs_paint = true;
        }
        self.buffer.clear_selection();
    }

    #[must_use]
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        self.buffer.selection_range()
    }

    #[must_use]
    pub fn selected_text(&self) -> Option<&str> {
        self.buffer.selected_text()
    }

    /// Whether the text area point (`x`, `y`) falls inside the selection.
    #[must_use]
    pub fn point_index_inside_selection(&self, x: i32, y: i32) -> bool {
        let index = self.index_at_point(self.content_point(x, y));
        self.selection_range()
            .is_some_and(|(start, end)| start <= index && index < end)
    }

    // --- scrolling ---

    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Resize, keeping the first visible line at the top.
    pub fn set_bounds(&mut self, bounds: Rect) {
        if bounds == self.bounds {
            return;
        }
        let offset_index = self.offset_index();
        self.bounds = bounds;
        self.sync_layout();
        self.set_offset_index(offset_index);
        self.needs_paint = true;
        debug!(width = bounds.width, height = bounds.height, "text area bounds changed");
        self.events.emit(&TextAreaEvent::BoundsChanged { bounds });
    }

    #[must_use]
    pub fn offset_y(&self) -> Fixed {
        self.offset_y
    }

    /// Scroll to `offset_y`, clamped to `[0, height]`.
    pub fn set_offset_y(&mut self, offset_y: Fixed) {
        let v = offset_y.clamp(Fixed::ZERO, self.height());
        if v != self.offset_y {
            self.offset_y = v;
            self.needs_paint = true;
            self.events.emit(&TextAreaEvent::OffsetChanged { offset_y: v });
        }
    }

    /// Index at the start of the first visible line.
    #[must_use]
    pub fn offset_index(&self) -> usize {
        self.index_at_point(Point::new(Fixed::ZERO, self.offset_y))
    }

    /// Scroll so the line holding `index` is the first visible line.
    pub fn set_offset_index(&mut self, index: usize) {
        let y = self.point_at_index(index).y;
        self.set_offset_y(y);
    }

    /// Scroll the minimum needed to show the line holding `index`.
    ///
    /// Fully visible lines leave the offset alone. A line cut by the top or
    /// bottom edge is aligned to that edge; anything else is centered.
    pub fn make_index_visible(&mut self, index: usize) {
        if self.bounds.is_empty() {
            return;
        }
        let lh = self.line_height();
        let view = Fixed::from_int(self.bounds.height as i32);
        let y0 = self.offset_y;
        let y1 = y0 + view;

        let a0 = self.point_at_index(index).y;
        let a1 = a0 + lh;
        if a0 >= y0 && a1 <= y1 {
            return;
        }
        if y0 >= a0 && y0 <= a1 {
            self.set_offset_y(a0);
            return;
        }
        if y1 >= a0 && y1 <= a1 {
            self.set_offset_y(a0 - view + lh);
            return;
        }
        self.make_index_visible_at_center(index);
    }

    pub fn make_index_visible_at_center(&mut self, index: usize) {
        let half = Fixed::from_int(self.bounds.height as i32 / 2);
        let y = self.point_at_index(index).y;
        self.set_offset_y(y - half);
    }

    fn content_point(&self, x: i32, y: i32) -> Point {
        Point::new(Fixed::from_int(x), Fixed::from_int(y) + self.offset_y)
    }

    // --- clipboard ---

    /// Fetch text from the clipboard collaborator.
    pub fn request_paste(&mut self, kind: SelectionKind) -> Result<String> {
        let result = match self.clipboard.as_mut() {
            Some(clipboard) => clipboard.request_paste(kind),
            None => Err(Error::ClipboardUnavailable(kind)),
        };
        if let Err(err) = &result {
            warn!(%kind, error = %err, "paste request failed");
        }
        result
    }

    pub fn set_copy(&mut self, kind: SelectionKind, text: &str) {
        match self.clipboard.as_mut() {
            Some(clipboard) => clipboard.set_copy(kind, text),
            None => trace!(%kind, "copy without clipboard"),
        }
    }

    fn copy_selection_to_primary(&mut self) {
        if let Some(text) = self.selected_text().map(str::to_string) {
            self.set_copy(SelectionKind::Primary, &text);
        }
    }

    // --- painting ---

    /// Whether state changed since the last paint.
    #[must_use]
    pub fn needs_paint(&self) -> bool {
        self.needs_paint
    }

    /// Paint into the text area bounds of `surface`.
    pub fn paint(&mut self, surface: &mut Surface) -> PaintStats {
        self.sync_layout();
        let request = PaintRequest {
            content: self.buffer.content(),
            layout: &self.layout,
            offset_y: self.offset_y,
            cursor: self
                .config
                .cursor_visible
                .then(|| self.buffer.cursor_index()),
            selection: self.buffer.selection_range(),
            word_at: self
                .config
                .highlight_cursor_word
                .then(|| self.buffer.cursor_index()),
        };
        let stats = self.driver.paint(surface, self.bounds, &request);
        self.needs_paint = false;
        stats
    }

    // --- events ---

    #[must_use = "dropping the subscription unregisters the callback"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&TextAreaEvent) + 'static,
    {
        self.events.subscribe(callback)
    }

    /// Run one command.
    pub fn execute(&mut self, command: &Command) -> Result<()> {
        commands::execute(self, command)
    }

    /// Apply a host input event.
    ///
    /// Clipboard failures are returned after being logged; the buffer is left
    /// untouched in that case.
    pub fn handle_event(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::Key(key) => match command_for_key(key) {
                Some(command) => self.execute(&command),
                None => Ok(()),
            },
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Paste(paste) => {
                commands::insert_string(self, paste.content());
                Ok(())
            }
        }
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.bounds.width as i32 && y < self.bounds.height as i32
    }

    fn handle_mouse(&mut self, ev: &MouseEvent) -> Result<()> {
        let point = self.content_point(ev.x, ev.y);
        match ev.kind {
            MouseEventKind::Press => {
                if !self.in_bounds(ev.x, ev.y) {
                    return Ok(());
                }
                self.button_pressed = true;
                if ev.button == MouseButton::Left {
                    let select = ev.modifiers.contains(KeyModifiers::SHIFT);
                    commands::move_cursor_to_point(self, point, select);
                    self.copy_selection_to_primary();
                }
            }
            MouseEventKind::Move => {
                if self.button_pressed && ev.button == MouseButton::Left {
                    commands::move_cursor_to_point(self, point, true);
                    self.copy_selection_to_primary();
                }
            }
            MouseEventKind::Release => {
                if !self.button_pressed {
                    return Ok(());
                }
                self.button_pressed = false;
                if !self.in_bounds(ev.x, ev.y) {
                    return Ok(());
                }
                match ev.button {
                    MouseButton::Middle => {
                        commands::move_cursor_to_point(self, point, false);
                        commands::paste(self, SelectionKind::Primary)?;
                    }
                    MouseButton::Right => {
                        commands::move_cursor_to_point(self, point, false);
                        self.emit_cmd();
                    }
                    MouseButton::Left | MouseButton::None => {}
                }
            }
            MouseEventKind::DoubleClick | MouseEventKind::TripleClick => {
                if !self.in_bounds(ev.x, ev.y) {
                    return Ok(());
                }
                match ev.button {
                    MouseButton::Left => {
                        commands::move_cursor_to_point(self, point, false);
                        if ev.kind == MouseEventKind::DoubleClick {
                            commands::select_word(self);
                        } else {
                            commands::select_line(self);
                        }
                        self.copy_selection_to_primary();
                    }
                    MouseButton::Right if ev.modifiers.is_empty() => {
                        commands::move_cursor_to_point(self, point, false);
                        self.emit_cmd();
                    }
                    _ => {}
                }
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                if !self.in_bounds(ev.x, ev.y) {
                    return Ok(());
                }
                if ev.kind == MouseEventKind::ScrollUp {
                    commands::scroll_up(self);
                } else {
                    commands::scroll_down(self);
                }
            }
        }
        Ok(())
    }

    fn emit_cmd(&self) {
        let index = self.cursor_index();
        self.events.emit(&TextAreaEvent::Cmd { index });
    }
}
