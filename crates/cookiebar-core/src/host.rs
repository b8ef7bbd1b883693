#![forbid(unsafe_code)]

//! The host boundary.
//!
//! A banner talks to its environment through three capabilities, each a trait
//! the host implements:
//!
//! - [`Container`]: the parent the banner attaches to and detaches from.
//! - [`AnimationDriver`]: plays [`Transition`]s and reports completion.
//! - [`Scheduler`]: runs a [`Task`] after a delay on the event loop.
//!
//! # Callbacks as data
//!
//! Completion callbacks are not closures. A banner passes a [`Continuation`]
//! to [`AnimationDriver::play`] and a [`Task`] to [`Scheduler::post_delayed`];
//! when the time comes, the host hands the value back to the banner with the
//! matching [`CookieId`]. This keeps the banner free of self-references and
//! makes every callback observable in tests.
//!
//! # Threading
//!
//! Everything runs on the host's UI thread. A host must deliver callbacks
//! one at a time, in the order they became due, and never re-enter a banner
//! from inside one of these trait methods.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::animation::Transition;

/// Shared handle to a parent container.
pub type ContainerHandle = Rc<RefCell<dyn Container>>;

/// Shared handle to the host's animation driver.
pub type DriverHandle = Rc<RefCell<dyn AnimationDriver>>;

/// Shared handle to the host's scheduler.
pub type SchedulerHandle = Rc<RefCell<dyn Scheduler>>;

/// Identifies one banner within a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CookieId(pub u64);

impl CookieId {
    /// Create a new banner ID.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// What a banner wants to happen when a transition finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Continuation {
    /// The enter transition finished; arm the auto-dismiss timer.
    EnterFinished,
    /// The exit transition finished; notify and schedule removal.
    ExitFinished,
    /// A swipe commit finished moving the banner off-screen; schedule removal.
    SwipeFinished,
}

/// Deferred work a banner posts to the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// The display duration elapsed.
    AutoDismiss,
    /// The grace delay after an exit elapsed; detach from the parent.
    Detach,
}

/// A parent view that banners attach to.
pub trait Container {
    /// Add `child` to this container.
    fn add_child(&mut self, child: CookieId);

    /// Remove `child` from this container.
    ///
    /// Returns `false` if `child` was not attached.
    fn remove_child(&mut self, child: CookieId) -> bool;
}

/// Plays transitions on behalf of banners.
pub trait AnimationDriver {
    /// Duration of a named transition resource, if the driver knows it.
    fn resource_duration(&self, name: &str) -> Option<Duration>;

    /// Start `transition` on banner `id`. When it finishes, hand
    /// `on_complete` back to the banner.
    ///
    /// A new transition replaces an in-flight one with the same target and
    /// the same kind of motion (resource or pose), dropping its continuation.
    /// Resource and pose transitions run side by side.
    fn play(&mut self, id: CookieId, transition: Transition, on_complete: Option<Continuation>);

    /// Stop every transition of banner `id` and drop their continuations.
    fn clear(&mut self, id: CookieId);
}

/// The event loop's delayed-execution primitive.
pub trait Scheduler {
    /// Hand `task` back to banner `id` after `delay`.
    fn post_delayed(&mut self, id: CookieId, delay: Duration, task: Task);
}
