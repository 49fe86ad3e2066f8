//! Glyphline Cairo - cairo backend for glyphline-core
//!
//! Fonts are cairo toy faces selected from fontconfig-style descriptors and
//! drawn onto any `cairo::Context`.

mod backend;

pub use backend::{CairoBackend, CairoFont};

// Re-export glyphline-core types for convenience
pub use glyphline_core::*;
