#![forbid(unsafe_code)]

//! Transition vocabulary and time-based interpolation.
//!
//! A banner never animates itself. It describes what should happen as a
//! [`Transition`] and hands it to the host's
//! [`AnimationDriver`](crate::host::AnimationDriver). Two kinds of motion exist:
//!
//! - [`Motion::Resource`]: a named, host-defined transition such as
//!   `slide_out_to_bottom`. Its curve and geometry are data owned by the host.
//! - [`Motion::To`]: move the banner to an explicit [`Pose`] (translation and
//!   alpha). Used for finger tracking, spring-back, and swipe commits.
//!
//! [`Tween`] interpolates between two poses and is what deterministic hosts use
//! to sample a banner mid-flight.

use std::borrow::Cow;
use std::time::Duration;

/// Slide-in resource for top-anchored banners.
pub const SLIDE_IN_FROM_TOP: &str = "slide_in_from_top";
/// Slide-in resource for bottom-anchored banners.
pub const SLIDE_IN_FROM_BOTTOM: &str = "slide_in_from_bottom";
/// Slide-out resource for top-anchored banners.
pub const SLIDE_OUT_TO_TOP: &str = "slide_out_to_top";
/// Slide-out resource for bottom-anchored banners.
pub const SLIDE_OUT_TO_BOTTOM: &str = "slide_out_to_bottom";

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation producing values in [0.0, 1.0].
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value, clamped to [0.0, 1.0].
    fn value(&self) -> f32;

    /// Time left until completion. Zero once complete.
    fn remaining(&self) -> Duration;
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Translation and opacity of a banner relative to its laid-out position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub alpha: f32,
}

impl Pose {
    /// Untranslated and fully opaque.
    pub const REST: Self = Self::new(0.0, 0.0, 1.0);

    /// Create a new pose.
    #[inline]
    pub const fn new(x: f32, y: f32, alpha: f32) -> Self {
        Self { x, y, alpha }
    }

    /// Linear interpolation towards `to` at `t` in [0, 1].
    pub fn lerp(self, to: Pose, t: f32) -> Pose {
        let t = t.clamp(0.0, 1.0);
        Pose {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
            alpha: self.alpha + (to.alpha - self.alpha) * t,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::REST
    }
}

/// Which part of a banner a transition applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Target {
    /// The whole banner.
    #[default]
    Banner,
    /// The icon element only.
    Icon,
}

/// What a transition does.
#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    /// A named transition resource resolved by the host.
    Resource(Cow<'static, str>),
    /// Animate to an explicit pose.
    To(Pose),
}

/// A request to animate part of a banner.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub target: Target,
    pub motion: Motion,
    pub duration: Duration,
}

impl Transition {
    /// Play a named resource on the banner.
    pub fn resource(name: impl Into<Cow<'static, str>>, duration: Duration) -> Self {
        Self {
            target: Target::Banner,
            motion: Motion::Resource(name.into()),
            duration,
        }
    }

    /// Move the banner to `pose`.
    pub fn to(pose: Pose, duration: Duration) -> Self {
        Self {
            target: Target::Banner,
            motion: Motion::To(pose),
            duration,
        }
    }

    /// Retarget the transition (builder).
    #[must_use]
    pub fn on(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// The resource name, if this is a resource transition.
    pub fn resource_name(&self) -> Option<&str> {
        match &self.motion {
            Motion::Resource(name) => Some(name.as_ref()),
            Motion::To(_) => None,
        }
    }

    /// The destination pose, if this is a pose transition.
    pub fn pose(&self) -> Option<Pose> {
        match self.motion {
            Motion::To(pose) => Some(pose),
            Motion::Resource(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// Interpolates a [`Pose`] between `from` and `to` over a duration.
///
/// A zero duration is complete from the start and reports `to`.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: Pose,
    to: Pose,
    elapsed: Duration,
    duration: Duration,
}

impl Tween {
    /// Create a new tween from `from` to `to` over `duration`.
    pub fn new(from: Pose, to: Pose, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }

    /// Current interpolated pose.
    pub fn pose(&self) -> Pose {
        if self.is_complete() {
            return self.to;
        }
        self.from.lerp(self.to, self.value())
    }

    /// Destination pose.
    pub fn target(&self) -> Pose {
        self.to
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        ease_out(self.progress())
    }

    fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
