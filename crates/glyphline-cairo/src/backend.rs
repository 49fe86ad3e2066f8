//! Cairo implementation of the glyphline backend seam

use cairo::{Antialias, FontFace, FontOptions, HintMetrics, HintStyle, Matrix, ScaledFont};
use glyphline_core::font::{FontDescriptor, FontSlant, FontWeight};
use glyphline_core::{BackendError, FontBackend, FontMetrics, RenderColor, TextExtents};

const DEFAULT_DPI: f64 = 96.0;

/// A cairo scaled font plus the descriptor it came from
pub struct CairoFont {
    scaled: ScaledFont,
    descriptor: FontDescriptor,
}

impl CairoFont {
    pub fn scaled_font(&self) -> &ScaledFont {
        &self.scaled
    }

    pub fn descriptor(&self) -> &FontDescriptor {
        &self.descriptor
    }
}

/// Text backend drawing onto cairo contexts
///
/// Cairo's toy font API substitutes a font for unknown families instead of
/// failing, so opening only fails for malformed descriptors or cairo errors.
pub struct CairoBackend {
    dpi: f64,
    antialias: Antialias,
}

impl Default for CairoBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CairoBackend {
    pub fn new() -> Self {
        CairoBackend {
            dpi: DEFAULT_DPI,
            antialias: Antialias::Gray,
        }
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_antialias(mut self, antialias: Antialias) -> Self {
        self.antialias = antialias;
        self
    }

    fn create_scaled_font(&self, descriptor: &FontDescriptor) -> Result<ScaledFont, cairo::Error> {
        let slant = match descriptor.slant {
            FontSlant::Normal => cairo::FontSlant::Normal,
            FontSlant::Italic => cairo::FontSlant::Italic,
        };
        let weight = match descriptor.weight {
            FontWeight::Normal => cairo::FontWeight::Normal,
            FontWeight::Bold => cairo::FontWeight::Bold,
        };
        let face = FontFace::toy_create(descriptor.family(), slant, weight)?;

        let size = descriptor.pixels(self.dpi as f32) as f64;
        let font_matrix = Matrix::new(size, 0.0, 0.0, size, 0.0, 0.0);
        let ctm = Matrix::identity();

        let mut options = FontOptions::new()?;
        options.set_antialias(self.antialias);
        options.set_hint_style(HintStyle::Slight);
        // Metric hinting keeps advances on whole pixels
        options.set_hint_metrics(HintMetrics::On);

        ScaledFont::new(&face, &font_matrix, &ctm, &options)
    }
}

impl FontBackend for CairoBackend {
    type Font = CairoFont;
    type Surface = cairo::Context;

    fn name(&self) -> &'static str {
        "cairo"
    }

    fn startup(&mut self) -> Result<(), BackendError> {
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(BackendError::Init(format!("invalid dpi {}", self.dpi)));
        }
        tracing::debug!("Using cairo {}", cairo::version_string());
        Ok(())
    }

    fn open_font(&self, descriptor: &str) -> Result<CairoFont, BackendError> {
        let parsed = FontDescriptor::parse(descriptor).map_err(|e| BackendError::Font(e.to_string()))?;
        let scaled = self
            .create_scaled_font(&parsed)
            .map_err(|e| BackendError::Font(format!("{descriptor:?}: {e}")))?;
        Ok(CairoFont {
            scaled,
            descriptor: parsed,
        })
    }

    fn close_font(&self, font: CairoFont) {
        drop(font);
    }

    fn text_extents(&self, font: &CairoFont, text: &str) -> TextExtents {
        if text.is_empty() {
            return TextExtents::default();
        }
        let e = font.scaled.text_extents(text);
        TextExtents {
            width: e.width().ceil() as i32,
            height: e.height().ceil() as i32,
            x: (-e.x_bearing()).floor() as i32,
            y: (-e.y_bearing()).ceil() as i32,
            x_advance: e.x_advance().round() as i32,
            y_advance: e.y_advance().round() as i32,
        }
    }

    fn font_metrics(&self, font: &CairoFont) -> FontMetrics {
        let e = font.scaled.extents();
        FontMetrics {
            ascent: e.ascent().ceil() as i32,
            descent: e.descent().ceil() as i32,
            max_advance_width: e.max_x_advance().ceil() as i32,
        }
    }

    fn black_pixel(&self) -> u64 {
        0x00_0000
    }

    fn white_pixel(&self) -> u64 {
        0xff_ffff
    }

    fn draw_text(
        &self,
        cr: &mut cairo::Context,
        font: &CairoFont,
        color: &RenderColor,
        x: i32,
        y: i32,
        text: &str,
    ) {
        let (r, g, b, a) = color.to_f64();
        cr.set_scaled_font(&font.scaled);
        cr.set_source_rgba(r, g, b, a);
        cr.move_to(x as f64, y as f64);
        if let Err(e) = cr.show_text(text) {
            tracing::warn!("Failed to draw {:?}: {}", text, e);
        }
    }
}
