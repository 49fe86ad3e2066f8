//! Dummy backend for testing layout and drawing without a graphics stack

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::constants::ELLIPSIS;
use crate::traits::{BackendError, FontBackend, FontMetrics, RenderColor, TextExtents};

/// Font handed out by [`DummyBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DummyFont {
    pub descriptor: String,
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub font: String,
    pub color: RenderColor,
    pub x: i32,
    pub y: i32,
    pub text: String,
}

/// Surface that records draw calls instead of drawing
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear recorded operations
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

/// Fixed-advance measuring backend
///
/// Every codepoint advances `advance` pixels unless overridden with
/// [`with_char_width`](Self::with_char_width). The literal ellipsis can be
/// given its own width so layouts can be worked out by hand. Open and close
/// calls are recorded; descriptors listed as failing refuse to open.
pub struct DummyBackend {
    pub advance: i32,
    pub ascent: i32,
    pub descent: i32,
    pub line_height: i32,
    pub max_advance: i32,
    char_widths: HashMap<char, i32>,
    ellipsis_advance: Option<i32>,
    text_heights: HashMap<String, i32>,
    failing: HashSet<String>,
    fail_startup: bool,
    opened: RefCell<Vec<String>>,
    closed: RefCell<Vec<String>>,
    measured: RefCell<Vec<String>>,
    shutdowns: Rc<Cell<usize>>,
}

impl Default for DummyBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DummyBackend {
    /// 10px per codepoint, ascent 12, descent 3, line height 14
    pub fn new() -> Self {
        DummyBackend {
            advance: 10,
            ascent: 12,
            descent: 3,
            line_height: 14,
            max_advance: 12,
            char_widths: HashMap::new(),
            ellipsis_advance: None,
            text_heights: HashMap::new(),
            failing: HashSet::new(),
            fail_startup: false,
            opened: RefCell::new(Vec::new()),
            closed: RefCell::new(Vec::new()),
            measured: RefCell::new(Vec::new()),
            shutdowns: Rc::new(Cell::new(0)),
        }
    }

    pub fn with_advance(mut self, advance: i32) -> Self {
        self.advance = advance;
        self
    }

    pub fn with_char_width(mut self, ch: char, width: i32) -> Self {
        self.char_widths.insert(ch, width);
        self
    }

    /// Width reported for exactly `"..."`
    pub fn with_ellipsis_advance(mut self, width: i32) -> Self {
        self.ellipsis_advance = Some(width);
        self
    }

    /// Ink height reported for exactly `text`
    pub fn with_text_height(mut self, text: &str, height: i32) -> Self {
        self.text_heights.insert(text.to_string(), height);
        self
    }

    pub fn with_metrics(mut self, ascent: i32, descent: i32, line_height: i32) -> Self {
        self.ascent = ascent;
        self.descent = descent;
        self.line_height = line_height;
        self
    }

    /// Make `descriptor` fail to open
    pub fn failing(mut self, descriptor: &str) -> Self {
        self.failing.insert(descriptor.to_string());
        self
    }

    pub fn failing_startup(mut self) -> Self {
        self.fail_startup = true;
        self
    }

    /// Descriptors successfully opened, in order
    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }

    pub fn closed(&self) -> Vec<String> {
        self.closed.borrow().clone()
    }

    /// Every string passed to `text_extents`, in order
    pub fn measured(&self) -> Vec<String> {
        self.measured.borrow().clone()
    }

    /// Shared counter of shutdown calls, readable after the context is gone
    pub fn shutdown_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.shutdowns)
    }

    fn width_of(&self, text: &str) -> i32 {
        if let (Some(w), ELLIPSIS) = (self.ellipsis_advance, text) {
            return w;
        }
        text.chars()
            .map(|ch| self.char_widths.get(&ch).copied().unwrap_or(self.advance))
            .sum()
    }
}

impl FontBackend for DummyBackend {
    type Font = DummyFont;
    type Surface = RecordingSurface;

    fn name(&self) -> &'static str {
        "dummy"
    }

    fn startup(&mut self) -> Result<(), BackendError> {
        if self.fail_startup {
            return Err(BackendError::Init("dummy startup refused".into()));
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        self.shutdowns.set(self.shutdowns.get() + 1);
    }

    fn open_font(&self, descriptor: &str) -> Result<DummyFont, BackendError> {
        if self.failing.contains(descriptor) {
            return Err(BackendError::Font(format!("no such font {descriptor:?}")));
        }
        self.opened.borrow_mut().push(descriptor.to_string());
        Ok(DummyFont {
            descriptor: descriptor.to_string(),
        })
    }

    fn close_font(&self, font: DummyFont) {
        self.closed.borrow_mut().push(font.descriptor);
    }

    fn text_extents(&self, _font: &DummyFont, text: &str) -> TextExtents {
        self.measured.borrow_mut().push(text.to_string());
        let width = self.width_of(text);
        let height = match self.text_heights.get(text) {
            Some(&h) => h,
            None if text.is_empty() => 0,
            None => self.line_height,
        };
        TextExtents {
            width,
            height,
            x: 0,
            y: self.ascent,
            x_advance: width,
            y_advance: 0,
        }
    }

    fn font_metrics(&self, _font: &DummyFont) -> FontMetrics {
        FontMetrics {
            ascent: self.ascent,
            descent: self.descent,
            max_advance_width: self.max_advance,
        }
    }

    fn black_pixel(&self) -> u64 {
        0
    }

    fn white_pixel(&self) -> u64 {
        0xffffff
    }

    fn draw_text(
        &self,
        surface: &mut RecordingSurface,
        font: &DummyFont,
        color: &RenderColor,
        x: i32,
        y: i32,
        text: &str,
    ) {
        surface.calls.push(DrawCall {
            font: font.descriptor.clone(),
            color: *color,
            x,
            y,
            text: text.to_string(),
        });
    }
}
