//! Glyphline Core - fit a single line of text into a rectangle
//!
//! Text that is too wide loses codepoints from its middle and gains an
//! ellipsis; it is then justified, centered vertically, and drawn with an
//! optional offset shadow. Measuring and drawing go through a
//! [`FontBackend`], so the same layout runs on cairo, fontdue or a recording
//! stub.

pub mod config;
pub mod constants;
pub mod context;
pub mod dummy_backend;
pub mod error;
pub mod font;
pub mod layout;
pub mod traits;

// Re-export main types
pub use config::TextConfig;
pub use context::TextContext;
pub use error::{TextError, TextResult};
pub use font::{FontDescriptor, FontHandle, FontdueBackend, PixelCanvas};
pub use layout::{fit_text, FittedText, Justify, Rect, TextDrawRequest, TextLayout};

// Re-export traits and types
pub use traits::*;
