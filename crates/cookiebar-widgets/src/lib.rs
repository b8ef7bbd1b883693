#![forbid(unsafe_code)]

//! Banner widgets for Cookiebar: configuration, views, gestures, and the
//! controller that ties them to a host.

pub mod config;
pub mod cookie;
pub mod error;
pub mod gesture;
pub mod views;

pub use config::{CookieConfig, CustomView, DisplayMetrics, Edge, ResourceId, Theme};
pub use cookie::{Cookie, DismissListener, DismissState, Environment};
pub use error::CookieError;
pub use gesture::{DragSession, Geometry, MoveOutcome, Release};
pub use views::{CookieViews, ElementKind, Elements};
