//! Fuzz target for layout measurement and hit testing.
//!
//! Every rune boundary must map to a point that maps back to it, for any
//! content and wrap width.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use textarea_core::Fixed;
use textarea_core::face::{GlyphFace, MonoFace};
use textarea_core::layout::{Layout, LayoutOptions};

#[derive(Arbitrary, Debug)]
struct LayoutInput {
    content: String,
    /// Wrap width in pixels; `None` disables wrapping.
    wrap: Option<u16>,
    tab_width: u8,
}

fuzz_target!(|input: LayoutInput| {
    let face = MonoFace::with_cell(8, 16);
    // zero-advance runes other than newlines share a box with their neighbor
    let content: String = input
        .content
        .chars()
        .take(500)
        .filter(|&c| c == '\n' || c == '\t' || face.advance(c) > Fixed::ZERO)
        .collect();
    let options = LayoutOptions {
        wrap_width: input.wrap.map(|w| Fixed::from_int(i32::from(w))),
        tab_width: u32::from(input.tab_width % 16) + 1,
    };
    let layout = Layout::measure(&content, &face, options, 0);

    assert!(layout.line_count() >= 1);
    for (i, _) in content.char_indices() {
        let p = layout.point_at_index(&content, i);
        assert_eq!(layout.index_at_point(p), i);
    }
});
