#![forbid(unsafe_code)]

//! Pointer gesture interpretation.
//!
//! Pure functions from a drag offset to a banner [`Pose`] and a commit
//! decision. The controller owns the [`DragSession`] and feeds each sample
//! through [`interpret_move`] and [`interpret_release`]; nothing here touches
//! the host.
//!
//! # Thresholds
//!
//! | Axis | Commits when | Snaps to | Duration |
//! |------|--------------|----------|----------|
//! | horizontal | `|dx| > width / 3` | `x = ±width`, alpha 0 | 200ms |
//! | vertical | `|dy'| > content_height / 2.5` | fully off-screen | 150ms |
//!
//! `dy'` is the vertical offset constrained away from the anchored edge: a
//! top banner can only be pushed up and a bottom banner only down. Both axes
//! are checked on every sample; when both commit, the vertical duration wins.
//!
//! # Invariants
//!
//! 1. Below both thresholds the pose tracks the finger with zero duration.
//! 2. A horizontal commit always ends at `|x| == width` with alpha 0.
//! 3. A vertical commit never forces alpha.
//! 4. Alpha is `1 - |dx| / width`, and 1 when the width is zero.

use std::time::Duration;

use cookiebar_core::animation::Pose;
use cookiebar_core::event::PointerId;
use cookiebar_core::geometry::{Offset, Point, Size, dp};

use crate::config::Edge;

/// Width divisor for the horizontal commit threshold.
pub const HORIZONTAL_COMMIT_DIVISOR: f32 = 3.0;
/// Content-height divisor for the vertical commit threshold.
pub const VERTICAL_COMMIT_DIVISOR: f32 = 2.5;
/// Duration of the move that finishes a horizontal commit.
pub const HORIZONTAL_COMMIT_DURATION: Duration = Duration::from_millis(200);
/// Duration of the move that finishes a vertical commit.
pub const VERTICAL_COMMIT_DURATION: Duration = Duration::from_millis(150);
/// Duration of the return to rest after a released drag.
pub const SPRING_BACK_DURATION: Duration = Duration::from_millis(200);
/// Largest displacement, in dp, that still counts as a tap.
pub const TAP_SLOP_DP: f32 = 4.0;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Layout-derived measurements used by the interpreter.
///
/// Recomputed on every layout pass; the controller never keeps an old one
/// across a bounds change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Width of the banner view.
    pub width: f32,
    /// Height of the banner's frame.
    pub height: f32,
    /// Height of the visible content inside the frame.
    pub content_height: f32,
    /// Horizontal distance past which a drag commits.
    pub horizontal_threshold: f32,
    /// Vertical distance past which a drag commits.
    pub vertical_threshold: f32,
}

impl Geometry {
    /// Measure a frame of `frame` size holding content `content_height` tall.
    pub fn measure(frame: Size, content_height: f32) -> Self {
        let width = frame.width.max(0.0);
        let content_height = content_height.max(0.0);
        Self {
            width,
            height: frame.height.max(0.0),
            content_height,
            horizontal_threshold: width / HORIZONTAL_COMMIT_DIVISOR,
            vertical_threshold: content_height / VERTICAL_COMMIT_DIVISOR,
        }
    }

    /// Vertical translation of the banner at rest.
    ///
    /// Bottom banners rest `height - content_height` down so the content sits
    /// against the bottom of the frame.
    pub fn resting_y(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Top => 0.0,
            Edge::Bottom => self.height - self.content_height,
        }
    }

    /// The resting pose for `edge`.
    pub fn rest_pose(&self, edge: Edge) -> Pose {
        Pose::new(0.0, self.resting_y(edge), 1.0)
    }

    /// Vertical translation that puts the banner fully off-screen.
    pub fn off_screen_y(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Top => -self.content_height,
            Edge::Bottom => self.height,
        }
    }

    /// Alpha for a horizontal offset of `dx`.
    pub fn fade(&self, dx: f32) -> f32 {
        if self.width <= 0.0 {
            return 1.0;
        }
        1.0 - (dx / self.width).abs()
    }
}

// ---------------------------------------------------------------------------
// Drag session
// ---------------------------------------------------------------------------

/// One pointer's drag, from down to up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer that opened the session.
    pub pointer: PointerId,
    /// Raw position at pointer-down.
    pub origin: Point,
    /// Latest offset from the origin.
    pub offset: Offset,
}

impl DragSession {
    /// Open a session at `origin`.
    pub fn begin(pointer: PointerId, origin: Point) -> Self {
        Self {
            pointer,
            origin,
            offset: Offset::ZERO,
        }
    }

    /// Record a new sample and return its offset from the origin.
    pub fn track(&mut self, position: Point) -> Offset {
        self.offset = position.offset_from(self.origin);
        self.offset
    }
}

// ---------------------------------------------------------------------------
// Interpretation
// ---------------------------------------------------------------------------

/// Result of one move sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// Where the banner should go.
    pub pose: Pose,
    /// How long the move should take. Zero while tracking.
    pub duration: Duration,
    pub horizontal_commit: bool,
    pub vertical_commit: bool,
}

impl MoveOutcome {
    /// Whether this sample dismisses the banner.
    pub fn is_commit(&self) -> bool {
        self.horizontal_commit || self.vertical_commit
    }
}

/// What a pointer release means.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// The pointer barely moved; dismiss.
    Tap,
    /// Return to rest.
    SpringBack(Pose),
}

/// Interpret a move sample at `offset` from the drag origin.
pub fn interpret_move(geometry: &Geometry, edge: Edge, offset: Offset) -> MoveOutcome {
    let mut x = offset.dx;
    let mut alpha = geometry.fade(offset.dx);
    let mut duration = Duration::ZERO;
    let mut horizontal_commit = false;
    let mut vertical_commit = false;

    if offset.dx.abs() > geometry.horizontal_threshold {
        x = geometry.width.copysign(offset.dx);
        alpha = 0.0;
        duration = HORIZONTAL_COMMIT_DURATION;
        horizontal_commit = true;
    }

    let mut y = match edge {
        Edge::Top => offset.dy.min(0.0),
        Edge::Bottom => offset.dy.max(0.0),
    };
    if y.abs() > geometry.vertical_threshold {
        y = geometry.off_screen_y(edge);
        duration = VERTICAL_COMMIT_DURATION;
        vertical_commit = true;
    } else {
        y += geometry.resting_y(edge);
    }

    MoveOutcome {
        pose: Pose::new(x, y, alpha),
        duration,
        horizontal_commit,
        vertical_commit,
    }
}

/// Interpret a release at `offset` from the drag origin.
pub fn interpret_release(geometry: &Geometry, edge: Edge, offset: Offset, density: f32) -> Release {
    if offset.magnitude() < dp(TAP_SLOP_DP, density) {
        Release::Tap
    } else {
        Release::SpringBack(geometry.rest_pose(edge))
    }
}
