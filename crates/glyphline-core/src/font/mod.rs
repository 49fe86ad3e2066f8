//! Loaded fonts, font descriptors and the font-file side of the fontdue backend
//!
//! A [`FontHandle`] wraps whatever font type the backend hands out together
//! with the two metrics the layout engine needs on every draw: the line
//! height and the advance of the ellipsis.

pub mod descriptor;
pub mod discovery;
pub mod matching;
pub mod raster;

pub use descriptor::FontDescriptor;
pub use discovery::{default_search_paths, discover_fonts};
pub use matching::{match_descriptor, score_font};
pub use raster::{FontdueBackend, FontdueFont, PixelCanvas};

use crate::constants::{ELLIPSIS, HEIGHT_REFERENCE};
use crate::traits::FontBackend;

/// Font weight variants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Font slant variants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontSlant {
    #[default]
    Normal,
    Italic,
}

/// A font file found on the system
#[derive(Debug, Clone, PartialEq)]
pub struct SystemFont {
    pub name: String,
    pub path: std::path::PathBuf,
    pub weight: FontWeight,
    pub slant: FontSlant,
}

/// An open font plus the metrics measured when it was opened
///
/// Both metrics are fixed for the lifetime of the handle. Closing goes
/// through [`TextContext::close_font`](crate::TextContext::close_font) so
/// the backend can release the font.
#[derive(Debug)]
pub struct FontHandle<F> {
    font: F,
    descriptor: String,
    fallback: bool,
    line_height: i32,
    ellipsis_advance: i32,
}

impl<F> FontHandle<F> {
    /// Measure `font` and wrap it
    pub(crate) fn measure<B>(backend: &B, font: F, descriptor: &str, fallback: bool) -> Self
    where
        B: FontBackend<Font = F>,
    {
        let line_height = backend.text_extents(&font, HEIGHT_REFERENCE).height;
        let ellipsis_advance = backend.text_extents(&font, ELLIPSIS).x_advance;
        tracing::debug!(
            "Opened font {:?}: line height {}, ellipsis advance {}",
            descriptor,
            line_height,
            ellipsis_advance
        );

        FontHandle {
            font,
            descriptor: descriptor.to_string(),
            fallback,
            line_height,
            ellipsis_advance,
        }
    }

    pub fn font(&self) -> &F {
        &self.font
    }

    /// Descriptor that was actually loaded
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// True when the requested descriptor failed and the fallback was loaded
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Line height, grown by the shadow offset when a shadow is drawn
    pub fn line_height(&self, shadow: bool, offset: i32) -> i32 {
        self.line_height + if shadow { offset } else { 0 }
    }

    pub fn ellipsis_advance(&self) -> i32 {
        self.ellipsis_advance
    }

    pub(crate) fn into_font(self) -> F {
        self.font
    }
}
