// src/error.rs
use thiserror::Error;

use crate::constants::FATAL_EXIT_CODE;
use crate::traits::BackendError;

/// Error hierarchy for text fitting and drawing
///
/// Drawing itself never fails; everything here happens around it, when the
/// backend starts up or a font is opened.
#[derive(Error, Debug)]
pub enum TextError {
    #[error("Text backend initialization failed: {reason}")]
    BackendInit { reason: String },

    #[error("Unable to load font: {descriptor}")]
    FontUnavailable {
        descriptor: String,
        #[source]
        source: BackendError,
    },

    #[error("Unable to load font {requested:?} or fallback font {fallback:?}")]
    NoUsableFont { requested: String, fallback: String },

    #[error("Invalid font descriptor {descriptor:?}: {reason}")]
    InvalidDescriptor { descriptor: String, reason: String },
}

impl TextError {
    /// Process exit status a host should use when it gives up on this error.
    ///
    /// Text rendering is mandatory for the hosts of this crate, so every
    /// variant maps to the same fixed status.
    pub fn exit_code(&self) -> i32 {
        FATAL_EXIT_CODE
    }

    /// True when no font at all could be loaded.
    pub fn is_fatal_font_error(&self) -> bool {
        matches!(self, TextError::NoUsableFont { .. })
    }
}

pub type TextResult<T> = Result<T, TextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_usable_font_is_fatal_with_status_3() {
        let err = TextError::NoUsableFont {
            requested: "Missing-12".into(),
            fallback: "sans".into(),
        };
        assert!(err.is_fatal_font_error());
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("Missing-12"));
    }

    #[test]
    fn test_font_unavailable_keeps_backend_source() {
        let err = TextError::FontUnavailable {
            descriptor: "Nope".into(),
            source: BackendError::Font("no match".into()),
        };
        assert!(!err.is_fatal_font_error());
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("Font error: no match"));
    }

    #[test]
    fn test_every_error_is_raised_around_drawing() {
        let errors = [
            TextError::BackendInit { reason: "no display".into() },
            TextError::FontUnavailable {
                descriptor: "Nope".into(),
                source: BackendError::Init("gone".into()),
            },
            TextError::NoUsableFont {
                requested: "Nope".into(),
                fallback: "sans".into(),
            },
            TextError::InvalidDescriptor {
                descriptor: "-1".into(),
                reason: "no family".into(),
            },
        ];
        for err in &errors {
            let stage = match err {
                TextError::BackendInit { .. } => "startup",
                TextError::FontUnavailable { .. }
                | TextError::NoUsableFont { .. }
                | TextError::InvalidDescriptor { .. } => "open",
            };
            assert!(!stage.is_empty());
            assert_eq!(err.exit_code(), 3);
        }
    }
}
