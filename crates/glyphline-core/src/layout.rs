//! Single-line layout: shrink-to-fit with a middle ellipsis, justification,
//! vertical centering and shadow colors
//!
//! Everything here is pure arithmetic over a measuring closure, so it can be
//! tested without a font backend. [`TextContext`](crate::TextContext) wires
//! it to a real one.

use crate::constants::{CHANNEL_MAX, ELLIPSIS, ELLIPSIS_CHARS, MAX_SHADOW_TINT};
use crate::font::FontHandle;
use crate::traits::{RenderColor, TextColor};

/// Drawing region in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }
}

/// Horizontal alignment inside the target rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Justify {
    #[default]
    Left,
    Right,
    Center,
}

impl Justify {
    /// X origin of a run `measured_width` wide
    ///
    /// Centering divides with truncation toward zero, so an overflowing run
    /// (negative slack) moves right of where flooring would put it.
    pub fn origin_x(self, rect_x: i32, rect_width: i32, measured_width: i32) -> i32 {
        match self {
            Justify::Left => rect_x,
            Justify::Right => rect_x + (rect_width - measured_width),
            Justify::Center => rect_x + (rect_width - measured_width) / 2,
        }
    }
}

/// One draw's worth of input
///
/// The shadow, when enabled, is offset by `shadow_offset` on both axes and
/// tinted by `shadow_tint`: 0..=100 is a black shadow of growing opacity,
/// -100..0 a white one.
pub struct TextDrawRequest<'a, F> {
    pub font: &'a FontHandle<F>,
    pub text: &'a str,
    pub shadow: bool,
    pub shadow_offset: i32,
    pub shadow_tint: i32,
    pub justify: Justify,
    pub color: TextColor,
    pub rect: Rect,
}

impl<'a, F> TextDrawRequest<'a, F> {
    /// Left-justified black text without a shadow
    pub fn new(font: &'a FontHandle<F>, text: &'a str, rect: Rect) -> Self {
        TextDrawRequest {
            font,
            text,
            shadow: false,
            shadow_offset: crate::constants::DEFAULT_SHADOW_OFFSET,
            shadow_tint: crate::constants::DEFAULT_SHADOW_TINT,
            justify: Justify::Left,
            color: TextColor::default(),
            rect,
        }
    }

    pub fn with_shadow(mut self, offset: i32, tint: i32) -> Self {
        self.shadow = true;
        self.shadow_offset = offset;
        self.shadow_tint = tint;
        self
    }

    pub fn with_justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    pub fn with_color(mut self, color: TextColor) -> Self {
        self.color = color;
        self
    }

    /// Extra width and height the shadow adds, zero without one
    pub fn shadow_extent(&self) -> i32 {
        if self.shadow {
            self.shadow_offset
        } else {
            0
        }
    }
}

/// Result of the fit loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FittedText {
    pub text: String,
    /// Codepoints in `text`, ellipsis included
    pub chars: usize,
    /// Width the loop last measured, used for justification
    pub width: i32,
    pub truncated: bool,
}

impl FittedText {
    pub fn is_empty(&self) -> bool {
        self.chars == 0
    }
}

/// A fully placed line, ready to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLayout {
    pub text: String,
    pub x: i32,
    /// Top of the text box after vertical centering; glyphs sit at `y + ascent`
    pub y: i32,
    pub width: i32,
    pub truncated: bool,
}

/// Shrink `text` until it fits `rect_width`
///
/// While the line is too wide, one codepoint is dropped from the middle
/// (index `len / 2`). From the first removal on, the ellipsis footprint
/// (`ellipsis_advance + shadow_extent`) is counted in the width so the
/// line converges to a size with room for it; the ellipsis is then put
/// where the removals happened. When the footprint alone is wider than the
/// rectangle, no ellipsis is shown.
///
/// `shadow_extent` is added to every measurement and again inside the
/// ellipsis footprint.
pub fn fit_text<M>(
    text: &str,
    rect_width: i32,
    shadow_extent: i32,
    ellipsis_advance: i32,
    mut measure: M,
) -> FittedText
where
    M: FnMut(&str) -> i32,
{
    let mut cut = MiddleCut::new(text);
    let mut width = measure(text) + shadow_extent;
    let mut truncated = false;

    while !cut.is_empty() && width > rect_width {
        truncated = true;
        cut.remove_middle();

        let footprint = ellipsis_advance + shadow_extent;
        if footprint > rect_width {
            truncated = false;
        }
        width = measure(&cut.text()) + shadow_extent + footprint;
        tracing::trace!("Fit: {} codepoints, {}px of {}px", cut.len(), width, rect_width);
    }

    let (text, chars) = if truncated {
        (cut.text_with(ELLIPSIS), cut.len() + ELLIPSIS_CHARS)
    } else {
        (cut.text(), cut.len())
    };

    FittedText {
        text,
        chars,
        width,
        truncated,
    }
}

/// Codepoints of a string with a contiguous run removed from the middle
///
/// Removing at `len / 2` over and over only ever eats into one side of the
/// hole or the other, so the remaining text is always
/// `input[..head] + input[head + removed..]` in codepoints.
struct MiddleCut<'a> {
    text: &'a str,
    /// Byte offset of every codepoint, plus the end of the string
    offsets: Vec<usize>,
    head: usize,
    removed: usize,
}

impl<'a> MiddleCut<'a> {
    fn new(text: &'a str) -> Self {
        let offsets = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        MiddleCut {
            text,
            offsets,
            head: 0,
            removed: 0,
        }
    }

    fn len(&self) -> usize {
        self.offsets.len() - 1 - self.removed
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn remove_middle(&mut self) {
        let mid = self.len() / 2;
        // With nothing removed yet the hole starts at mid; afterwards mid is
        // either just left of the hole or its right edge.
        if self.removed == 0 || mid < self.head {
            debug_assert!(self.removed == 0 || mid + 1 == self.head);
            self.head = mid;
        } else {
            debug_assert_eq!(mid, self.head);
        }
        self.removed += 1;
    }

    fn head(&self) -> &'a str {
        &self.text[..self.offsets[self.head]]
    }

    fn tail(&self) -> &'a str {
        &self.text[self.offsets[self.head + self.removed]..]
    }

    fn text(&self) -> String {
        [self.head(), self.tail()].concat()
    }

    /// Remaining text with `filler` at codepoint `(len + 1) / 2`, which is
    /// always the hole
    fn text_with(&self, filler: &str) -> String {
        debug_assert_eq!(self.head, (self.len() + 1) / 2);
        [self.head(), filler, self.tail()].concat()
    }
}

/// Top of the text box inside a rectangle
///
/// Centers the backend's ascent + descent box over the measured line height
/// and the rectangle height, compensating for fonts whose reported box is
/// taller or shorter than their glyphs.
pub fn baseline_offset(rect_y: i32, rect_height: i32, ascent: i32, descent: i32, line_height: i32) -> i32 {
    rect_y - (2 * (ascent + descent) - (line_height + rect_height) - 1) / 2
}

/// Shadow color for a tint in -100..=100 (clamped)
///
/// Non-negative tints give black with alpha growing with the tint; negative
/// ones a white-ish gray whose level and alpha grow with the magnitude.
pub fn shadow_color(tint: i32, black_pixel: u64, white_pixel: u64) -> RenderColor {
    let tint = tint.clamp(-MAX_SHADOW_TINT, MAX_SHADOW_TINT);
    let level = (CHANNEL_MAX * tint.unsigned_abs() / MAX_SHADOW_TINT as u32) as u16;

    if tint >= 0 {
        RenderColor {
            red: 0,
            green: 0,
            blue: 0,
            alpha: level,
            pixel: black_pixel,
        }
    } else {
        RenderColor {
            red: level,
            green: level,
            blue: level,
            alpha: level,
            pixel: white_pixel,
        }
    }
}
