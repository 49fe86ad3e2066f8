// src/constants.rs

/// Descriptor tried when the requested font cannot be loaded
pub const FALLBACK_FONT_DESCRIPTOR: &str = "sans";

pub const DEFAULT_FONT_DESCRIPTOR: &str = "sans-10";

/// Drawn in the middle of a string that had to be shortened
pub const ELLIPSIS: &str = "...";
pub const ELLIPSIS_CHARS: usize = 3;

/// Representative glyphs measured once per font to get its line height.
/// Backends disagree on what a font's "height" is, the ink extents of this
/// string don't.
pub const HEIGHT_REFERENCE: &str = concat!(
    "12345678900-qwertyuiopasdfghjklzxcvbnm",
    "!@#$%^&*()_+QWERTYUIOPASDFGHJKLZXCVBNM",
    "`~[]\\;',./{}|:\"<>?",
);

/// Exit status for hosts that cannot continue without text
pub const FATAL_EXIT_CODE: i32 = 3;

// Shadow defaults
pub const DEFAULT_SHADOW_OFFSET: i32 = 1;
pub const DEFAULT_SHADOW_TINT: i32 = 50;
pub const MAX_SHADOW_TINT: i32 = 100;

/// Full intensity of a 16-bit color channel
pub const CHANNEL_MAX: u32 = 0xffff;
