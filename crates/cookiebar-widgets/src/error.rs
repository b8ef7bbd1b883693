#![forbid(unsafe_code)]

//! Errors raised while building a banner.
//!
//! Only construction can fail. Everything that goes wrong at runtime
//! (double dismiss, late timers, detaching twice) is an ordering artifact of
//! the event loop and is absorbed silently by the controller.

use std::fmt;

use crate::views::ElementKind;

/// Construction-time failure of a banner.
#[derive(Debug, Clone, PartialEq)]
pub enum CookieError {
    /// A custom content view does not provide a required element.
    MissingElement(ElementKind),
    /// Display density must be finite and positive.
    InvalidDensity(f32),
}

impl fmt::Display for CookieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingElement(kind) => write!(
                f,
                "custom cookie view is missing the required `{}` element",
                kind.name()
            ),
            Self::InvalidDensity(density) => {
                write!(f, "display density must be finite and positive, got {density}")
            }
        }
    }
}

impl std::error::Error for CookieError {}
