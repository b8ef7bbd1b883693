#![forbid(unsafe_code)]

//! Canonical pointer event types.
//!
//! Hosts translate their native touch or mouse input into [`PointerEvent`]s
//! before handing them to a banner. Coordinates are *raw* screen coordinates,
//! not view-local ones: the banner moves while it is being dragged, so only
//! screen space gives a stable origin for the drag vector.

use crate::geometry::Point;

/// Identifier of a pointer (finger, stylus, mouse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointerId(pub u32);

impl PointerId {
    /// The first pointer of a gesture.
    pub const PRIMARY: Self = Self(0);
}

/// The phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Pointer touched down.
    Down,

    /// Pointer moved while down.
    Move,

    /// Pointer lifted.
    Up,

    /// The gesture was taken away by the host (e.g. a parent scroll).
    Cancel,
}

/// A single pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Phase of the sample.
    pub kind: PointerKind,

    /// Which pointer produced the sample.
    pub pointer: PointerId,

    /// Raw screen position.
    pub position: Point,
}

impl PointerEvent {
    /// Create a sample from the primary pointer.
    #[must_use]
    pub const fn new(kind: PointerKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            pointer: PointerId::PRIMARY,
            position: Point::new(x, y),
        }
    }

    /// Shorthand for a primary `Down` sample.
    #[must_use]
    pub const fn down(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Down, x, y)
    }

    /// Shorthand for a primary `Move` sample.
    #[must_use]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    /// Shorthand for a primary `Up` sample.
    #[must_use]
    pub const fn up(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Up, x, y)
    }

    /// Shorthand for a primary `Cancel` sample.
    #[must_use]
    pub const fn cancel(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Cancel, x, y)
    }

    /// Attribute the sample to another pointer.
    #[must_use]
    pub const fn with_pointer(mut self, pointer: PointerId) -> Self {
        self.pointer = pointer;
        self
    }
}
