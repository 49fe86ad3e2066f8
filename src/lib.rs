//! Glyphline - single-line text fitting with ellipsis truncation and shadows
//!
//! This crate bundles the backend-agnostic core with the cairo backend:
//! - Middle truncation with an ellipsis until the text fits its rectangle
//! - Left, right and centered justification
//! - Optional offset shadow in a dark or light tint
//! - Font opening with a `"sans"` fallback

pub mod demo;

// Re-export main types for convenience
pub use glyphline_cairo::{CairoBackend, CairoFont};
pub use glyphline_core::*;
