//! View scrolling. These move the view only; the cursor stays put.

use crate::fixed::Fixed;
use crate::textarea::TextArea;

fn scroll_by(ta: &mut TextArea, dy: Fixed) {
    if !ta.config().page_up_down_enabled {
        return;
    }
    let y = ta.offset_y() + dy;
    ta.set_offset_y(y);
}

fn page(ta: &TextArea) -> Fixed {
    Fixed::from_int(ta.bounds().height as i32).max(ta.line_height())
}

fn step(ta: &TextArea) -> Fixed {
    ta.line_height() * ta.config().scroll_lines as i32
}

pub fn page_up(ta: &mut TextArea) {
    let dy = page(ta);
    scroll_by(ta, -dy);
}

pub fn page_down(ta: &mut TextArea) {
    let dy = page(ta);
    scroll_by(ta, dy);
}

pub fn scroll_up(ta: &mut TextArea) {
    let dy = step(ta);
    scroll_by(ta, -dy);
}

pub fn scroll_down(ta: &mut TextArea) {
    let dy = step(ta);
    scroll_by(ta, dy);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::text_area;
    use crate::config::TextAreaConfig;

    #[test]
    fn test_page_and_scroll() {
        let mut ta = text_area(&"x\n".repeat(30));
        page_down(&mut ta);
        assert_eq!(ta.offset_y(), Fixed::from_int(64));
        scroll_down(&mut ta);
        assert_eq!(ta.offset_y(), Fixed::from_int(128));
        scroll_up(&mut ta);
        page_up(&mut ta);
        assert_eq!(ta.offset_y(), Fixed::ZERO);
        page_up(&mut ta);
        assert_eq!(ta.offset_y(), Fixed::ZERO);
        assert_eq!(ta.cursor_index(), 0);
    }

    #[test]
    fn test_disabled() {
        let mut ta = text_area(&"x\n".repeat(30));
        ta.set_config(TextAreaConfig::default().with_page_up_down(false));
        page_down(&mut ta);
        scroll_down(&mut ta);
        assert_eq!(ta.offset_y(), Fixed::ZERO);
    }
}
