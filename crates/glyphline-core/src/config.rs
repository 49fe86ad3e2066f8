// src/config.rs
use crate::constants::{
    DEFAULT_FONT_DESCRIPTOR, DEFAULT_SHADOW_OFFSET, DEFAULT_SHADOW_TINT, FALLBACK_FONT_DESCRIPTOR,
    MAX_SHADOW_TINT,
};
use crate::context::TextContext;
use crate::error::TextResult;
use crate::font::FontHandle;
use crate::layout::{Justify, Rect, TextDrawRequest};
use crate::traits::{FontBackend, TextColor};

/// Font and style shared by a group of labels
#[derive(Clone, Debug, PartialEq)]
pub struct TextConfig {
    pub font_descriptor: String,
    pub fallback_descriptor: String,
    pub shadow: bool,
    pub shadow_offset: i32,
    /// -100..=100, see [`shadow_color`](crate::layout::shadow_color)
    pub shadow_tint: i32,
    pub justify: Justify,
    pub color: TextColor,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_descriptor: DEFAULT_FONT_DESCRIPTOR.to_string(),
            fallback_descriptor: FALLBACK_FONT_DESCRIPTOR.to_string(),
            shadow: false,
            shadow_offset: DEFAULT_SHADOW_OFFSET,
            shadow_tint: DEFAULT_SHADOW_TINT,
            justify: Justify::Left,
            color: TextColor::rgb(0, 0, 0),
        }
    }
}

impl TextConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(mut self, descriptor: &str) -> Self {
        self.font_descriptor = descriptor.to_string();
        self
    }

    pub fn with_fallback_font(mut self, descriptor: &str) -> Self {
        self.fallback_descriptor = descriptor.to_string();
        self
    }

    pub fn with_shadow(mut self, offset: i32, tint: i32) -> Self {
        self.shadow = true;
        self.shadow_offset = offset;
        self.shadow_tint = tint.clamp(-MAX_SHADOW_TINT, MAX_SHADOW_TINT);
        self
    }

    pub fn without_shadow(mut self) -> Self {
        self.shadow = false;
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

    /// Open the configured font through `ctx`, with the configured fallback
    pub fn open_font<B: FontBackend>(&self, ctx: &TextContext<B>) -> TextResult<FontHandle<B::Font>> {
        ctx.open_font_with_fallback(&self.font_descriptor, &self.fallback_descriptor)
    }

    /// Draw request for `text` in `rect` using this style
    pub fn request<'a, F>(
        &self,
        font: &'a FontHandle<F>,
        text: &'a str,
        rect: Rect,
    ) -> TextDrawRequest<'a, F> {
        TextDrawRequest {
            font,
            text,
            shadow: self.shadow,
            shadow_offset: self.shadow_offset,
            shadow_tint: self.shadow_tint,
            justify: self.justify,
            color: self.color,
            rect,
        }
    }

    /// Height of one line in the configured style
    pub fn line_height<F>(&self, font: &FontHandle<F>) -> i32 {
        font.line_height(self.shadow, self.shadow_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TextConfig::new();
        assert_eq!(config.font_descriptor, "sans-10");
        assert_eq!(config.fallback_descriptor, "sans");
        assert!(!config.shadow);
        assert_eq!(config.justify, Justify::Left);
    }

    #[test]
    fn test_builder_clamps_tint() {
        let config = TextConfig::new()
            .with_font("Serif-12:bold")
            .with_shadow(2, -300)
            .with_justify(Justify::Center)
            .with_color(TextColor::rgb(1, 2, 3));
        assert_eq!(config.font_descriptor, "Serif-12:bold");
        assert!(config.shadow);
        assert_eq!(config.shadow_offset, 2);
        assert_eq!(config.shadow_tint, -100);
        assert_eq!(config.justify, Justify::Center);
        assert!(!config.without_shadow().shadow);
    }
}
