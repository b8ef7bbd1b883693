#![forbid(unsafe_code)]

//! A deterministic [`AnimationDriver`].
//!
//! [`TimelineAnimator`] does not draw anything. It records every transition
//! it is asked to play, queues the transition's end on the shared timeline,
//! and answers [`finish`](TimelineAnimator::finish) with the continuation to
//! hand back, unless the transition was replaced or cleared in the meantime.
//!
//! Transitions run on channels keyed by banner, target, and kind of motion.
//! A new transition replaces the one on its channel; resource and pose
//! transitions of the same banner run side by side.

use std::borrow::Cow;
use std::collections::HashMap;
use std::time::Duration;

use cookiebar_core::animation::{
    Animation, Motion, Pose, SLIDE_IN_FROM_BOTTOM, SLIDE_IN_FROM_TOP, SLIDE_OUT_TO_BOTTOM,
    SLIDE_OUT_TO_TOP, Target, Transition, Tween,
};
use cookiebar_core::host::{AnimationDriver, Continuation, CookieId};
use tracing::{debug, trace};

use crate::timeline::{Due, Ticket, TimelineHandle};

/// Length of the stock slide resources.
pub const DEFAULT_SLIDE_DURATION: Duration = Duration::from_millis(500);

// ---------------------------------------------------------------------------
// Resource catalog
// ---------------------------------------------------------------------------

/// Durations of the named transition resources a host has loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCatalog {
    durations: HashMap<Cow<'static, str>, Duration>,
}

impl Default for ResourceCatalog {
    /// The four slide resources at [`DEFAULT_SLIDE_DURATION`].
    fn default() -> Self {
        Self::empty()
            .with(SLIDE_IN_FROM_TOP, DEFAULT_SLIDE_DURATION)
            .with(SLIDE_IN_FROM_BOTTOM, DEFAULT_SLIDE_DURATION)
            .with(SLIDE_OUT_TO_TOP, DEFAULT_SLIDE_DURATION)
            .with(SLIDE_OUT_TO_BOTTOM, DEFAULT_SLIDE_DURATION)
    }
}

impl ResourceCatalog {
    /// A catalog that knows no resources.
    pub fn empty() -> Self {
        Self {
            durations: HashMap::new(),
        }
    }

    /// Add or replace a resource (builder).
    #[must_use]
    pub fn with(mut self, name: impl Into<Cow<'static, str>>, duration: Duration) -> Self {
        self.insert(name, duration);
        self
    }

    /// Add or replace a resource.
    pub fn insert(&mut self, name: impl Into<Cow<'static, str>>, duration: Duration) {
        self.durations.insert(name.into(), duration);
    }

    /// Duration of `name`, if loaded.
    pub fn duration(&self, name: &str) -> Option<Duration> {
        self.durations.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Animator
// ---------------------------------------------------------------------------

/// Record of one `play` call.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRecord {
    /// Virtual time the transition started.
    pub at: Duration,
    pub cookie: CookieId,
    pub transition: Transition,
    pub on_complete: Option<Continuation>,
    pub ticket: Ticket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MotionKind {
    Resource,
    Pose,
}

impl MotionKind {
    fn of(motion: &Motion) -> Self {
        match motion {
            Motion::Resource(_) => Self::Resource,
            Motion::To(_) => Self::Pose,
        }
    }
}

type Channel = (CookieId, Target, MotionKind);

#[derive(Debug, Clone, Copy)]
struct Active {
    ticket: Ticket,
    on_complete: Option<Continuation>,
}

/// [`AnimationDriver`] backed by a [`Timeline`](crate::timeline::Timeline).
#[derive(Debug)]
pub struct TimelineAnimator {
    timeline: TimelineHandle,
    catalog: ResourceCatalog,
    next_ticket: u64,
    active: HashMap<Channel, Active>,
    poses: HashMap<CookieId, (Tween, Duration)>,
    log: Vec<PlayRecord>,
}

impl TimelineAnimator {
    /// An animator queueing on `timeline` with resources from `catalog`.
    pub fn new(timeline: TimelineHandle, catalog: ResourceCatalog) -> Self {
        Self {
            timeline,
            catalog,
            next_ticket: 0,
            active: HashMap::new(),
            poses: HashMap::new(),
            log: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    /// Every transition played so far, in order.
    pub fn log(&self) -> &[PlayRecord] {
        &self.log
    }

    /// Transitions played on behalf of `cookie`.
    pub fn plays_for(&self, cookie: CookieId) -> impl Iterator<Item = &PlayRecord> {
        self.log.iter().filter(move |record| record.cookie == cookie)
    }

    /// Whether any transition of `cookie` is still running.
    pub fn is_playing(&self, cookie: CookieId) -> bool {
        self.active.keys().any(|(id, _, _)| *id == cookie)
    }

    /// Current pose of `cookie`'s banner, or `None` if it has never moved.
    pub fn pose(&self, cookie: CookieId) -> Option<Pose> {
        let now = self.timeline.borrow().now();
        self.sample(cookie, now)
    }

    fn sample(&self, cookie: CookieId, now: Duration) -> Option<Pose> {
        let (tween, started) = self.poses.get(&cookie)?;
        let mut tween = *tween;
        tween.tick(now.saturating_sub(*started));
        Some(tween.pose())
    }

    /// Resolve a finished transition.
    ///
    /// Returns the banner and the continuation to deliver, or `None` when the
    /// transition was replaced or cleared before it ended.
    pub fn finish(&mut self, ticket: Ticket) -> Option<(CookieId, Option<Continuation>)> {
        let channel = self
            .active
            .iter()
            .find(|(_, active)| active.ticket == ticket)
            .map(|(channel, _)| *channel)?;
        let active = self.active.remove(&channel)?;
        Some((channel.0, active.on_complete))
    }
}

impl AnimationDriver for TimelineAnimator {
    fn resource_duration(&self, name: &str) -> Option<Duration> {
        self.catalog.duration(name)
    }

    fn play(&mut self, id: CookieId, transition: Transition, on_complete: Option<Continuation>) {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;

        let now = self.timeline.borrow().now();
        if transition.target == Target::Banner
            && let Some(to) = transition.pose()
        {
            let from = self.sample(id, now).unwrap_or(Pose::REST);
            self.poses
                .insert(id, (Tween::new(from, to, transition.duration), now));
        }

        let channel = (id, transition.target, MotionKind::of(&transition.motion));
        if let Some(replaced) = self.active.insert(
            channel,
            Active {
                ticket,
                on_complete,
            },
        ) && replaced.on_complete.is_some()
        {
            debug!(
                cookie = id.0,
                dropped = ?replaced.on_complete,
                "transition replaced before completion"
            );
        }

        self.timeline
            .borrow_mut()
            .schedule(id, transition.duration, Due::Transition(ticket));
        trace!(
            cookie = id.0,
            resource = transition.resource_name(),
            duration_ms = transition.duration.as_millis() as u64,
            "transition started"
        );
        self.log.push(PlayRecord {
            at: now,
            cookie: id,
            transition,
            on_complete,
            ticket,
        });
    }

    fn clear(&mut self, id: CookieId) {
        self.active.retain(|(cookie, _, _), _| *cookie != id);
        let now = self.timeline.borrow().now();
        if let Some(pose) = self.sample(id, now) {
            self.poses
                .insert(id, (Tween::new(pose, pose, Duration::ZERO), now));
        }
        trace!(cookie = id.0, "transitions cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::Timeline;

    const ID: CookieId = CookieId(1);

    fn animator() -> (TimelineHandle, TimelineAnimator) {
        let timeline = Timeline::shared();
        let animator = TimelineAnimator::new(timeline.clone(), ResourceCatalog::default());
        (timeline, animator)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn default_catalog_knows_slides() {
        let catalog = ResourceCatalog::default();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.duration(SLIDE_OUT_TO_TOP), Some(DEFAULT_SLIDE_DURATION));
        assert_eq!(catalog.duration("spin"), None);
        assert!(ResourceCatalog::empty().is_empty());
    }

    #[test]
    fn play_queues_completion() {
        let (timeline, mut animator) = animator();
        animator.play(
            ID,
            Transition::resource(SLIDE_IN_FROM_TOP, ms(500)),
            Some(Continuation::EnterFinished),
        );
        assert!(animator.is_playing(ID));
        let entry = timeline
            .borrow_mut()
            .pop_until(ms(500))
            .expect("completion queued");
        let Due::Transition(ticket) = entry.due else {
            panic!("expected a transition entry");
        };
        assert_eq!(
            animator.finish(ticket),
            Some((ID, Some(Continuation::EnterFinished)))
        );
        assert!(!animator.is_playing(ID));
    }

    #[test]
    fn replaced_transition_does_not_finish() {
        let (_timeline, mut animator) = animator();
        animator.play(ID, Transition::to(Pose::new(10.0, 0.0, 1.0), ms(200)), None);
        animator.play(
            ID,
            Transition::to(Pose::new(300.0, 0.0, 0.0), ms(200)),
            Some(Continuation::SwipeFinished),
        );
        assert_eq!(animator.finish(animator.log()[0].ticket), None);
        assert_eq!(
            animator.finish(animator.log()[1].ticket),
            Some((ID, Some(Continuation::SwipeFinished)))
        );
    }

    #[test]
    fn resource_and_pose_channels_coexist() {
        let (_timeline, mut animator) = animator();
        animator.play(
            ID,
            Transition::resource(SLIDE_OUT_TO_BOTTOM, ms(500)),
            Some(Continuation::ExitFinished),
        );
        animator.play(ID, Transition::to(Pose::new(5.0, 0.0, 1.0), Duration::ZERO), None);
        assert_eq!(
            animator.finish(animator.log()[0].ticket),
            Some((ID, Some(Continuation::ExitFinished)))
        );
    }

    #[test]
    fn clear_drops_pending() {
        let (_timeline, mut animator) = animator();
        animator.play(
            ID,
            Transition::resource(SLIDE_IN_FROM_BOTTOM, ms(500)),
            Some(Continuation::EnterFinished),
        );
        animator.play(CookieId(2), Transition::resource(SLIDE_IN_FROM_BOTTOM, ms(500)), None);
        animator.clear(ID);
        assert!(!animator.is_playing(ID));
        assert!(animator.is_playing(CookieId(2)));
        assert_eq!(animator.finish(animator.log()[0].ticket), None);
    }

    #[test]
    fn pose_interpolates_over_time() {
        let (timeline, mut animator) = animator();
        assert_eq!(animator.pose(ID), None);
        animator.play(ID, Transition::to(Pose::new(300.0, 0.0, 0.0), ms(200)), None);
        assert_eq!(animator.pose(ID), Some(Pose::REST));

        timeline.borrow_mut().advance_to(ms(100));
        let mid = animator.pose(ID).expect("pose tracked");
        assert!(mid.x > 0.0 && mid.x < 300.0);

        timeline.borrow_mut().advance_to(ms(200));
        assert_eq!(animator.pose(ID), Some(Pose::new(300.0, 0.0, 0.0)));
    }

    #[test]
    fn icon_transitions_leave_banner_pose() {
        let (_timeline, mut animator) = animator();
        animator.play(
            ID,
            Transition::to(Pose::new(1.0, 1.0, 1.0), ms(10)).on(Target::Icon),
            None,
        );
        assert_eq!(animator.pose(ID), None);
    }
}
