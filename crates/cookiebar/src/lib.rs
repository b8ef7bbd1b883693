#![forbid(unsafe_code)]

//! Cookiebar public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from internal crates and offers a lightweight
//! prelude for day-to-day usage.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use cookiebar::prelude::*;
//!
//! fn main() -> cookiebar::Result<()> {
//!     let mut stage = Stage::new();
//!     let id = stage.spawn(CookieConfig::new().title("Copied").edge(Edge::Top))?;
//!     stage.show(id);
//!     stage.layout(id, Rect::from_size(Size::new(360.0, 96.0)), 96.0);
//!     stage.advance(Duration::from_millis(500));
//!
//!     // Swipe it away to the right.
//!     stage.pointer(id, PointerEvent::down(20.0, 40.0));
//!     stage.pointer(id, PointerEvent::moved(200.0, 40.0));
//!     assert!(stage.cookie(id).is_some_and(|c| c.is_swiped_out()));
//!     Ok(())
//! }
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use cookiebar_core::animation::{Motion, Pose, Target, Transition};
pub use cookiebar_core::color::Rgba;
pub use cookiebar_core::event::{PointerEvent, PointerId, PointerKind};
pub use cookiebar_core::geometry::{Offset, Point, Rect, Sides, Size};
pub use cookiebar_core::host::{
    AnimationDriver, Container, ContainerHandle, Continuation, CookieId, DriverHandle, Scheduler,
    SchedulerHandle, Task,
};

// --- Widget re-exports -----------------------------------------------------

pub use cookiebar_widgets::{
    Cookie, CookieConfig, CookieError, CookieViews, CustomView, DismissListener, DismissState,
    DisplayMetrics, Edge, ElementKind, Elements, Environment, Geometry, ResourceId, Theme,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use cookiebar_runtime::{ResourceCatalog, Stage};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Cookiebar hosts.
#[derive(Debug)]
pub enum Error {
    /// A banner could not be built.
    Cookie(CookieError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cookie(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Cookie(err) => Some(err),
        }
    }
}

impl From<CookieError> for Error {
    fn from(err: CookieError) -> Self {
        Self::Cookie(err)
    }
}

/// Standard result type for Cookiebar APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Cookie, CookieConfig, CookieId, DismissState, Edge, Error, PointerEvent, Rect, Result,
        Size, Theme,
    };

    #[cfg(feature = "runtime")]
    pub use crate::Stage;

    pub use crate::{core, widgets};

    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use cookiebar_core as core;
#[cfg(feature = "runtime")]
pub use cookiebar_runtime as runtime;
pub use cookiebar_widgets as widgets;
