#![forbid(unsafe_code)]

//! Cookiebar Runtime
//!
//! A deterministic, single-threaded host for banner controllers.
//!
//! # Key Components
//!
//! - [`Timeline`] - Virtual clock with an ordered queue of due callbacks
//! - [`TimelineScheduler`] - `Scheduler` that posts tasks onto the timeline
//! - [`TimelineAnimator`] - `AnimationDriver` that records transitions and
//!   completes them after their duration
//! - [`ResourceCatalog`] - Durations of named transition resources
//! - [`RecordingContainer`] - `Container` that remembers attach/detach history
//! - [`Stage`] - Owns banners and routes every callback back by id
//!
//! # Role in Cookiebar
//! Real hosts implement the `cookiebar-core` host traits on top of their own
//! event loop. This crate implements them on virtual time so that tests and
//! demos can replay a banner's life exactly.

pub mod animator;
pub mod container;
pub mod scheduler;
pub mod stage;
pub mod timeline;

pub use animator::{DEFAULT_SLIDE_DURATION, PlayRecord, ResourceCatalog, TimelineAnimator};
pub use container::{ContainerEvent, RecordingContainer};
pub use scheduler::{PostRecord, TimelineScheduler};
pub use stage::{Delivery, Stage};
pub use timeline::{Due, Entry, Ticket, Timeline, TimelineHandle};
