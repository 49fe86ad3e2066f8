//! Pure-Rust backend: fontdue for glyphs, an in-memory ARGB canvas to draw on

use std::path::PathBuf;

use fontdue::{Font, FontSettings};

use crate::font::discovery::find_with_fontconfig;
use crate::font::*;
use crate::traits::{BackendError, FontBackend, FontMetrics, RenderColor, TextExtents};

const DEFAULT_DPI: f32 = 96.0;

/// A fontdue font rasterized at one pixel size
pub struct FontdueFont {
    font: Font,
    px: f32,
    metrics: FontMetrics,
}

impl FontdueFont {
    fn new(font: Font, px: f32) -> Self {
        let (ascent, descent) = match font.horizontal_line_metrics(px) {
            Some(lm) => (lm.ascent.ceil() as i32, (-lm.descent).ceil() as i32),
            None => (px.ceil() as i32, 0),
        };
        let max_advance = (0..font.glyph_count())
            .map(|i| font.metrics_indexed(i, px).advance_width)
            .fold(0.0f32, f32::max);

        FontdueFont {
            font,
            px,
            metrics: FontMetrics {
                ascent,
                descent,
                max_advance_width: max_advance.ceil() as i32,
            },
        }
    }

    pub fn pixel_size(&self) -> f32 {
        self.px
    }
}

/// Text backend built on fontdue
///
/// Descriptors resolve through fontconfig when the `font-discovery` feature
/// is enabled on Linux, otherwise by matching against font files found
/// under the search paths at startup.
pub struct FontdueBackend {
    search_paths: Vec<PathBuf>,
    dpi: f32,
    fonts: Vec<SystemFont>,
}

impl Default for FontdueBackend {
    fn default() -> Self {
        Self::new(default_search_paths())
    }
}

impl FontdueBackend {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        FontdueBackend {
            search_paths,
            dpi: DEFAULT_DPI,
            fonts: Vec::new(),
        }
    }

    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Fonts found by the last startup scan
    pub fn discovered(&self) -> &[SystemFont] {
        &self.fonts
    }

    fn resolve(&self, descriptor: &FontDescriptor) -> Option<SystemFont> {
        find_with_fontconfig(descriptor).or_else(|| match_descriptor(descriptor, &self.fonts).cloned())
    }
}

impl FontBackend for FontdueBackend {
    type Font = FontdueFont;
    type Surface = PixelCanvas;

    fn name(&self) -> &'static str {
        "fontdue"
    }

    fn startup(&mut self) -> Result<(), BackendError> {
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(BackendError::Init(format!("invalid dpi {}", self.dpi)));
        }
        self.fonts = discover_fonts(&self.search_paths);
        Ok(())
    }

    fn shutdown(&mut self) {
        self.fonts.clear();
    }

    fn open_font(&self, descriptor: &str) -> Result<FontdueFont, BackendError> {
        let parsed = FontDescriptor::parse(descriptor).map_err(|e| BackendError::Font(e.to_string()))?;
        let file = self
            .resolve(&parsed)
            .ok_or_else(|| BackendError::Font(format!("no font file matches {descriptor:?}")))?;

        let data = std::fs::read(&file.path)?;
        let px = parsed.pixels(self.dpi);
        let settings = FontSettings {
            scale: px,
            ..Default::default()
        };
        let font = Font::from_bytes(data, settings)
            .map_err(|e| BackendError::Font(format!("{}: {}", file.path.display(), e)))?;

        tracing::debug!("Loaded {} at {}px for {:?}", file.path.display(), px, descriptor);
        Ok(FontdueFont::new(font, px))
    }

    fn close_font(&self, font: FontdueFont) {
        drop(font);
    }

    fn text_extents(&self, font: &FontdueFont, text: &str) -> TextExtents {
        let mut pen = 0.0f32;
        // Ink bounds, y up from the baseline
        let mut bounds: Option<(f32, f32, f32, f32)> = None;

        for ch in text.chars() {
            let m = font.font.metrics(ch, font.px);
            if m.width > 0 && m.height > 0 {
                let left = pen + m.xmin as f32;
                let right = left + m.width as f32;
                let bottom = m.ymin as f32;
                let top = bottom + m.height as f32;
                bounds = Some(match bounds {
                    None => (left, right, bottom, top),
                    Some((l, r, b, t)) => (l.min(left), r.max(right), b.min(bottom), t.max(top)),
                });
            }
            pen += m.advance_width;
        }

        let (left, right, bottom, top) = bounds.unwrap_or_default();
        TextExtents {
            width: (right - left).ceil() as i32,
            height: (top - bottom).ceil() as i32,
            x: (-left).floor() as i32,
            y: top.ceil() as i32,
            x_advance: pen.round() as i32,
            y_advance: 0,
        }
    }

    fn font_metrics(&self, font: &FontdueFont) -> FontMetrics {
        font.metrics
    }

    fn black_pixel(&self) -> u64 {
        0xff00_0000
    }

    fn white_pixel(&self) -> u64 {
        0xffff_ffff
    }

    fn draw_text(
        &self,
        surface: &mut PixelCanvas,
        font: &FontdueFont,
        color: &RenderColor,
        x: i32,
        y: i32,
        text: &str,
    ) {
        let mut pen = x as f32;
        for ch in text.chars() {
            let (m, coverage) = font.font.rasterize(ch, font.px);
            let left = (pen + m.xmin as f32).round() as i32;
            let top = y - (m.ymin + m.height as i32);
            for row in 0..m.height {
                for col in 0..m.width {
                    let c = coverage[row * m.width + col];
                    if c > 0 {
                        surface.blend(left + col as i32, top + row as i32, color, c);
                    }
                }
            }
            pen += m.advance_width;
        }
    }
}

/// ARGB32 pixel buffer, row major, non-premultiplied
#[derive(Debug, Clone, PartialEq)]
pub struct PixelCanvas {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl PixelCanvas {
    /// Transparent canvas
    pub fn new(width: usize, height: usize) -> Self {
        PixelCanvas {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn fill(&mut self, argb: u32) {
        self.pixels.fill(argb);
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Composite `color` over one pixel, scaled by glyph `coverage`
    ///
    /// Pixels outside the canvas are clipped.
    pub fn blend(&mut self, x: i32, y: i32, color: &RenderColor, coverage: u8) {
        let Some(i) = self.index(x, y) else {
            return;
        };

        let src_a = (color.alpha as u32 >> 8) * coverage as u32 / 255;
        if src_a == 0 {
            return;
        }
        let dst = self.pixels[i];
        let dst_a = dst >> 24;
        let out_a = src_a + dst_a * (255 - src_a) / 255;

        let channel = |src: u16, shift: u32| -> u32 {
            let s = (src >> 8) as u32;
            let d = (dst >> shift) & 0xff;
            let premul = s * src_a + d * dst_a * (255 - src_a) / 255;
            premul.checked_div(out_a).unwrap_or(0).min(255)
        };

        let r = channel(color.red, 16);
        let g = channel(color.green, 8);
        let b = channel(color.blue, 0);
        self.pixels[i] = out_a << 24 | r << 16 | g << 8 | b;
    }
}
