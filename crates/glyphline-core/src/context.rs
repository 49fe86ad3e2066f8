//! The text context: one started backend plus the font and draw operations

use tracing::{debug, error, warn};

use crate::constants::FALLBACK_FONT_DESCRIPTOR;
use crate::error::{TextError, TextResult};
use crate::font::FontHandle;
use crate::layout::{baseline_offset, fit_text, shadow_color, TextDrawRequest, TextLayout};
use crate::traits::FontBackend;

/// A started text backend
///
/// Startup happens in [`TextContext::new`], shutdown when the context is
/// dropped. Fonts opened through a context must be closed through the same
/// context, and not while a draw using them runs.
pub struct TextContext<B: FontBackend> {
    backend: B,
}

impl<B: FontBackend> TextContext<B> {
    pub fn new(mut backend: B) -> TextResult<Self> {
        if let Err(e) = backend.startup() {
            warn!("Couldn't initialize text backend {}: {}", backend.name(), e);
            return Err(TextError::BackendInit {
                reason: e.to_string(),
            });
        }
        debug!("Using text backend {}", backend.name());
        Ok(TextContext { backend })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Open `descriptor`, falling back to `"sans"` once
    ///
    /// [`TextError::NoUsableFont`] means neither loaded; hosts that need
    /// text should exit with [`TextError::exit_code`].
    pub fn open_font(&self, descriptor: &str) -> TextResult<FontHandle<B::Font>> {
        self.open_font_with_fallback(descriptor, FALLBACK_FONT_DESCRIPTOR)
    }

    pub fn open_font_with_fallback(
        &self,
        descriptor: &str,
        fallback: &str,
    ) -> TextResult<FontHandle<B::Font>> {
        match self.try_open_font(descriptor) {
            Ok(handle) => return Ok(handle),
            Err(e) => {
                warn!("{}", e);
                warn!("Trying fallback font: {}", fallback);
            }
        }

        match self.backend.open_font(fallback) {
            Ok(font) => Ok(FontHandle::measure(&self.backend, font, fallback, true)),
            Err(e) => {
                warn!("Unable to load font: {} ({})", fallback, e);
                error!("Aborting!");
                Err(TextError::NoUsableFont {
                    requested: descriptor.to_string(),
                    fallback: fallback.to_string(),
                })
            }
        }
    }

    /// Open exactly `descriptor`, no fallback
    pub fn try_open_font(&self, descriptor: &str) -> TextResult<FontHandle<B::Font>> {
        let font = self
            .backend
            .open_font(descriptor)
            .map_err(|source| TextError::FontUnavailable {
                descriptor: descriptor.to_string(),
                source,
            })?;
        Ok(FontHandle::measure(&self.backend, font, descriptor, false))
    }

    /// Release the backend font behind `handle`
    pub fn close_font(&self, handle: FontHandle<B::Font>) {
        debug!("Closing font {:?}", handle.descriptor());
        self.backend.close_font(handle.into_font());
    }

    /// Advance width of `text`, plus the shadow offset when a shadow is drawn
    pub fn measure_width(
        &self,
        font: &FontHandle<B::Font>,
        text: &str,
        shadow: bool,
        offset: i32,
    ) -> i32 {
        self.backend.text_extents(font.font(), text).x_advance + if shadow { offset } else { 0 }
    }

    pub fn line_height(&self, font: &FontHandle<B::Font>, shadow: bool, offset: i32) -> i32 {
        font.line_height(shadow, offset)
    }

    /// Widest glyph advance in the font
    pub fn max_glyph_width(&self, font: &FontHandle<B::Font>) -> i32 {
        self.backend.font_metrics(font.font()).max_advance_width
    }

    /// Fit and place `request`'s text; `None` when nothing is left to draw
    pub fn layout(&self, request: &TextDrawRequest<'_, B::Font>) -> Option<TextLayout> {
        let font = request.font;
        let metrics = self.backend.font_metrics(font.font());
        let rect = request.rect;

        let y = baseline_offset(
            rect.y,
            rect.height,
            metrics.ascent,
            metrics.descent,
            font.line_height(false, 0),
        );

        let fitted = fit_text(
            request.text,
            rect.width,
            request.shadow_extent(),
            font.ellipsis_advance(),
            |s| self.measure_width(font, s, false, 0),
        );
        if fitted.is_empty() {
            return None;
        }

        Some(TextLayout {
            x: request.justify.origin_x(rect.x, rect.width, fitted.width),
            y,
            width: fitted.width,
            truncated: fitted.truncated,
            text: fitted.text,
        })
    }

    /// Draw `request` onto `surface`: the shadow first if enabled, then the
    /// text itself at full opacity
    ///
    /// Issues no draw calls at all when the text fits to nothing.
    pub fn draw(&self, surface: &mut B::Surface, request: &TextDrawRequest<'_, B::Font>) {
        let Some(layout) = self.layout(request) else {
            return;
        };
        let font = request.font.font();
        let baseline = self.backend.font_metrics(font).ascent + layout.y;

        if request.shadow {
            let offset = request.shadow_offset;
            let color = shadow_color(
                request.shadow_tint,
                self.backend.black_pixel(),
                self.backend.white_pixel(),
            );
            self.backend.draw_text(
                surface,
                font,
                &color,
                layout.x + offset,
                baseline + offset,
                &layout.text,
            );
        }

        self.backend
            .draw_text(surface, font, &request.color.opaque(), layout.x, baseline, &layout.text);
    }
}

impl<B: FontBackend> Drop for TextContext<B> {
    fn drop(&mut self) {
        debug!("Shutting down text backend {}", self.backend.name());
        self.backend.shutdown();
    }
}
