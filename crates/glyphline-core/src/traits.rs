//! Backend seam: the measurement and drawing service text layout runs on

/// Ink and advance extents of a run of text, in whole pixels
///
/// `width`/`height` describe the inked box, `x`/`y` its bearing from the
/// origin and `x_advance`/`y_advance` where the pen ends up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextExtents {
    pub width: i32,
    pub height: i32,
    pub x: i32,
    pub y: i32,
    pub x_advance: i32,
    pub y_advance: i32,
}

/// Whole-font metrics reported by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontMetrics {
    pub ascent: i32,
    pub descent: i32,
    pub max_advance_width: i32,
}

/// 8-bit foreground color plus the backend's pixel value for it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub pixel: u64,
}

impl TextColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        TextColor { r, g, b, pixel: 0 }
    }

    pub const fn with_pixel(mut self, pixel: u64) -> Self {
        self.pixel = pixel;
        self
    }

    /// Widen to 16-bit channels at full opacity
    pub fn opaque(&self) -> RenderColor {
        RenderColor {
            red: widen(self.r),
            green: widen(self.g),
            blue: widen(self.b),
            alpha: 0xffff,
            pixel: self.pixel,
        }
    }
}

fn widen(channel: u8) -> u16 {
    let c = channel as u16;
    c | c << 8
}

/// Color handed to a backend draw call: 16-bit channels with alpha
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderColor {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
    pub alpha: u16,
    pub pixel: u64,
}

impl RenderColor {
    /// Channels as 0.0..=1.0 floats (r, g, b, a)
    pub fn to_f64(&self) -> (f64, f64, f64, f64) {
        let max = u16::MAX as f64;
        (
            self.red as f64 / max,
            self.green as f64 / max,
            self.blue as f64 / max,
            self.alpha as f64 / max,
        )
    }
}

/// Text measurement and drawing service
///
/// Implementations own whatever process-wide state their graphics stack
/// needs; the crate only ever reaches it through a
/// [`TextContext`](crate::TextContext).
pub trait FontBackend {
    /// Loaded scalable font
    type Font;
    /// Whatever the backend draws onto
    type Surface: ?Sized;

    fn name(&self) -> &'static str;

    fn startup(&mut self) -> Result<(), BackendError> {
        Ok(())
    }

    fn shutdown(&mut self) {}

    fn open_font(&self, descriptor: &str) -> Result<Self::Font, BackendError>;
    fn close_font(&self, font: Self::Font);

    fn text_extents(&self, font: &Self::Font, text: &str) -> TextExtents;
    fn font_metrics(&self, font: &Self::Font) -> FontMetrics;

    fn black_pixel(&self) -> u64;
    fn white_pixel(&self) -> u64;

    fn draw_text(
        &self,
        surface: &mut Self::Surface,
        font: &Self::Font,
        color: &RenderColor,
        x: i32,
        y: i32,
        text: &str,
    );
}

/// Error types for backend operations
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Initialization error: {0}")]
    Init(String),

    #[error("Font error: {0}")]
    Font(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_widens_channels_and_forces_alpha() {
        let c = TextColor::rgb(0x12, 0xff, 0x00).with_pixel(42).opaque();
        assert_eq!(c.red, 0x1212);
        assert_eq!(c.green, 0xffff);
        assert_eq!(c.blue, 0x0000);
        assert_eq!(c.alpha, 0xffff);
        assert_eq!(c.pixel, 42);
    }

    #[test]
    fn test_render_color_to_f64() {
        let (r, g, b, a) = TextColor::rgb(255, 0, 0).opaque().to_f64();
        assert_eq!((r, g, b, a), (1.0, 0.0, 0.0, 1.0));
    }
}
