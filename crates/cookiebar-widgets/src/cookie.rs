#![forbid(unsafe_code)]

//! The banner controller.
//!
//! A [`Cookie`] owns one banner from attachment to removal: its views, the
//! latest layout [`Geometry`], the active [`DragSession`], and the dismissal
//! state machine. It never animates or sleeps itself. Transitions go to the
//! host's [`AnimationDriver`], delays go to the host's [`Scheduler`], and both
//! come back as data through [`Cookie::on_transition_finished`] and
//! [`Cookie::run_task`].
//!
//! # State machine
//!
//! ```text
//!            dismiss()                ExitFinished             Detach
//!   Idle ─────────────▶ Dismissing ─────────────▶ Exited ─────────────▶ Removed
//!     │                                              ▲                     ▲
//!     │ swipe commit / tap: swiped_out = true        │ dismiss()           │
//!     └──────────────────────────────────────────────┴─────────────────────┘
//!                    (immediate detach, no exit transition)
//! ```
//!
//! `swiped_out` is orthogonal to the state and never clears. Once it is set,
//! moves and releases are claimed without effect, the auto-dismiss timer does
//! nothing, and `dismiss` detaches on the spot.
//!
//! # Invariants
//!
//! 1. At most one exit transition is played per controller.
//! 2. The auto-dismiss timer is armed once, after the enter transition
//!    finishes, and only dismisses from `Idle` without a swipe.
//! 3. Detaching is idempotent; nothing is consumed or played after `Removed`.
//! 4. A swipe commit goes straight to removal and never calls `dismiss`.

use std::fmt;
use std::time::Duration;

use cookiebar_core::animation::{Target, Transition};
use cookiebar_core::event::{PointerEvent, PointerId, PointerKind};
use cookiebar_core::geometry::Rect;
use cookiebar_core::host::{
    ContainerHandle, Continuation, CookieId, DriverHandle, SchedulerHandle, Task,
};
use cookiebar_core::{debug, trace};

use crate::config::{CookieConfig, DisplayMetrics, Edge, Theme};
use crate::error::CookieError;
use crate::gesture::{
    DragSession, Geometry, Release, SPRING_BACK_DURATION, interpret_move, interpret_release,
};
use crate::views::CookieViews;

/// Duration used for a slide resource the driver does not know.
pub const DEFAULT_SLIDE_DURATION: Duration = Duration::from_millis(500);

/// Delay between the end of an exit and detaching from the parent.
pub const REMOVAL_GRACE: Duration = Duration::from_millis(200);

/// Called once when a dismissal completes.
pub type DismissListener = Box<dyn FnOnce()>;

/// Host services shared by every banner.
#[derive(Clone)]
pub struct Environment {
    pub animator: DriverHandle,
    pub scheduler: SchedulerHandle,
    pub theme: Theme,
    pub metrics: DisplayMetrics,
}

impl Environment {
    /// Environment with the default theme and density 1.
    pub fn new(animator: DriverHandle, scheduler: SchedulerHandle) -> Self {
        Self {
            animator,
            scheduler,
            theme: Theme::default(),
            metrics: DisplayMetrics::default(),
        }
    }

    /// Set the theme (builder).
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the display metrics (builder).
    #[must_use]
    pub fn metrics(mut self, metrics: DisplayMetrics) -> Self {
        self.metrics = metrics;
        self
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("theme", &self.theme)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

/// Where a banner is in its dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DismissState {
    /// Visible and interactive.
    #[default]
    Idle,
    /// Exit transition in flight.
    Dismissing,
    /// Exit transition finished; detach pending.
    Exited,
    /// Detached. Terminal.
    Removed,
}

/// How fast an exit plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pace {
    Full,
    Quick,
}

/// Controller for one banner.
pub struct Cookie {
    id: CookieId,
    env: Environment,
    config: CookieConfig,
    views: CookieViews,
    parent: Option<ContainerHandle>,
    geometry: Option<Geometry>,
    drag: Option<DragSession>,
    state: DismissState,
    swiped_out: bool,
    timer_armed: bool,
    listener: Option<DismissListener>,
}

impl fmt::Debug for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cookie")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("swiped_out", &self.swiped_out)
            .field("attached", &self.parent.is_some())
            .field("geometry", &self.geometry)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

impl Cookie {
    /// Build a banner from `config`.
    ///
    /// Fails when a custom content view lacks a required element or the
    /// display density is unusable.
    pub fn new(id: CookieId, env: Environment, config: CookieConfig) -> Result<Self, CookieError> {
        let views = CookieViews::build(&config, &env.theme, env.metrics)?;
        debug!(cookie = id.0, edge = ?config.edge, "cookie configured");
        Ok(Self {
            id,
            env,
            config,
            views,
            parent: None,
            geometry: None,
            drag: None,
            state: DismissState::Idle,
            swiped_out: false,
            timer_armed: false,
            listener: None,
        })
    }

    /// Replace the configuration and rebuild the views.
    ///
    /// On error the previous configuration stays in place.
    pub fn configure(&mut self, config: CookieConfig) -> Result<(), CookieError> {
        self.views = CookieViews::build(&config, &self.env.theme, self.env.metrics)?;
        self.config = config;
        debug!(cookie = self.id.0, edge = ?self.config.edge, "cookie reconfigured");
        Ok(())
    }

    // --- Accessors ---

    pub fn id(&self) -> CookieId {
        self.id
    }

    pub fn state(&self) -> DismissState {
        self.state
    }

    pub fn is_swiped_out(&self) -> bool {
        self.swiped_out
    }

    /// Latest layout measurements, or `None` before the first layout pass.
    pub fn geometry(&self) -> Option<Geometry> {
        self.geometry
    }

    pub fn views(&self) -> &CookieViews {
        &self.views
    }

    pub fn config(&self) -> &CookieConfig {
        &self.config
    }

    pub fn edge(&self) -> Edge {
        self.config.edge
    }

    pub fn is_attached(&self) -> bool {
        self.parent.is_some()
    }

    /// The active drag, if a pointer is down.
    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Whether the auto-dismiss timer has been posted.
    pub fn is_timer_armed(&self) -> bool {
        self.timer_armed
    }

    // --- Lifecycle ---

    /// Attach to `parent` and play the enter transition.
    ///
    /// Moving to a new parent detaches from the old one first. Ignored once
    /// a dismissal or swipe has started, since replaying the enter transition
    /// would replace the exit.
    pub fn show(&mut self, parent: ContainerHandle) {
        if self.state != DismissState::Idle || self.swiped_out {
            trace!(
                cookie = self.id.0,
                state = ?self.state,
                swiped_out = self.swiped_out,
                "show ignored"
            );
            return;
        }
        if let Some(old) = self.parent.take() {
            old.borrow_mut().remove_child(self.id);
        }
        parent.borrow_mut().add_child(self.id);
        self.parent = Some(parent);

        let slide_in = self.config.edge.slide_in();
        let duration = self.slide_duration(slide_in);
        self.play(
            Transition::resource(slide_in, duration),
            Some(Continuation::EnterFinished),
        );

        if self.views.icon.visible
            && let Some(animator) = self.config.icon_animator.clone()
        {
            let duration = self.slide_duration(&animator);
            self.play(Transition::resource(animator, duration).on(Target::Icon), None);
        }
        debug!(cookie = self.id.0, resource = slide_in, "cookie shown");
    }

    /// Recompute geometry for the banner's new bounds.
    ///
    /// `content_height` is the height of the visible content inside `bounds`.
    pub fn layout(&mut self, bounds: Rect, content_height: f32) -> Geometry {
        let geometry = Geometry::measure(bounds.size(), content_height);
        trace!(
            cookie = self.id.0,
            width = geometry.width,
            height = geometry.height,
            content_height = geometry.content_height,
            "cookie laid out"
        );
        self.geometry = Some(geometry);
        geometry
    }

    // --- Input ---

    /// Feed a pointer event to the gesture interpreter.
    ///
    /// Returns whether the event was consumed.
    pub fn on_pointer_event(&mut self, event: PointerEvent) -> bool {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!(
            "cookie_pointer",
            cookie = self.id.0,
            kind = ?event.kind,
            x = event.position.x,
            y = event.position.y
        )
        .entered();

        if self.state == DismissState::Removed || event.pointer != PointerId::PRIMARY {
            return false;
        }

        match event.kind {
            PointerKind::Down => {
                self.drag = Some(DragSession::begin(event.pointer, event.position));
                true
            }
            PointerKind::Move => {
                if !self.swiped_out {
                    self.on_drag_move(event);
                }
                true
            }
            PointerKind::Up => {
                let session = self.drag.take();
                if !self.swiped_out
                    && let Some(session) = session
                {
                    self.on_drag_release(session, event);
                }
                true
            }
            PointerKind::Cancel => {
                self.drag = None;
                false
            }
        }
    }

    fn on_drag_move(&mut self, event: PointerEvent) {
        let (Some(geometry), Some(session)) = (self.geometry, self.drag.as_mut()) else {
            return;
        };
        let offset = session.track(event.position);
        let outcome = interpret_move(&geometry, self.config.edge, offset);

        if outcome.is_commit() {
            self.swiped_out = true;
            self.drag = None;
            debug!(
                cookie = self.id.0,
                horizontal = outcome.horizontal_commit,
                vertical = outcome.vertical_commit,
                "swipe committed"
            );
            self.play(
                Transition::to(outcome.pose, outcome.duration),
                Some(Continuation::SwipeFinished),
            );
        } else {
            self.play(Transition::to(outcome.pose, outcome.duration), None);
        }
    }

    fn on_drag_release(&mut self, mut session: DragSession, event: PointerEvent) {
        let Some(geometry) = self.geometry else {
            return;
        };
        let offset = session.track(event.position);
        match interpret_release(&geometry, self.config.edge, offset, self.env.metrics.density) {
            Release::Tap => {
                debug!(cookie = self.id.0, "tap to dismiss");
                self.dismiss(None);
                self.swiped_out = true;
            }
            Release::SpringBack(rest) => {
                self.play(Transition::to(rest, SPRING_BACK_DURATION), None);
            }
        }
    }

    /// Tap the action button.
    ///
    /// Runs the host callback, then starts a quick dismiss. Returns `false`
    /// without doing anything when the button is hidden or the banner has
    /// been removed.
    pub fn click_action(&mut self) -> bool {
        if self.state == DismissState::Removed || !self.views.action.visible {
            return false;
        }
        if let Some(on_action) = self.config.on_action.as_mut() {
            on_action();
        }
        self.request_dismiss(None, Pace::Quick);
        true
    }

    // --- Dismissal ---

    /// Dismiss the banner.
    ///
    /// Plays the exit transition at full length, or at half length when a
    /// `listener` is supplied, and calls the listener once it finishes. After
    /// a swipe or a finished exit there is nothing left to animate: the
    /// banner detaches at once and the listener runs synchronously. Ignored
    /// while an exit is in flight or after removal.
    pub fn dismiss(&mut self, listener: Option<DismissListener>) {
        let pace = if listener.is_some() {
            Pace::Quick
        } else {
            Pace::Full
        };
        self.request_dismiss(listener, pace);
    }

    fn request_dismiss(&mut self, listener: Option<DismissListener>, pace: Pace) {
        match self.state {
            DismissState::Removed | DismissState::Dismissing => {
                trace!(cookie = self.id.0, state = ?self.state, "dismiss ignored");
                return;
            }
            DismissState::Exited => {}
            DismissState::Idle if self.swiped_out => {}
            DismissState::Idle => {
                self.begin_exit(listener, pace);
                return;
            }
        }

        debug!(cookie = self.id.0, "dismiss after exit, detaching now");
        self.detach();
        if let Some(listener) = listener {
            listener();
        }
    }

    fn begin_exit(&mut self, listener: Option<DismissListener>, pace: Pace) {
        let slide_out = self.config.edge.slide_out();
        let full = self.slide_duration(slide_out);
        let duration = match pace {
            Pace::Full => full,
            Pace::Quick => full / 2,
        };
        self.state = DismissState::Dismissing;
        self.listener = listener;
        debug!(
            cookie = self.id.0,
            resource = slide_out,
            duration_ms = duration.as_millis() as u64,
            "dismiss started"
        );
        self.play(
            Transition::resource(slide_out, duration),
            Some(Continuation::ExitFinished),
        );
    }

    // --- Host callbacks ---

    /// A transition started by this banner finished.
    pub fn on_transition_finished(&mut self, continuation: Continuation) {
        if self.state == DismissState::Removed {
            trace!(cookie = self.id.0, ?continuation, "completion after removal ignored");
            return;
        }
        match continuation {
            Continuation::EnterFinished => {
                if self.timer_armed {
                    return;
                }
                self.timer_armed = true;
                trace!(
                    cookie = self.id.0,
                    duration_ms = self.config.duration.as_millis() as u64,
                    "auto-dismiss armed"
                );
                self.env
                    .scheduler
                    .borrow_mut()
                    .post_delayed(self.id, self.config.duration, Task::AutoDismiss);
            }
            Continuation::ExitFinished => {
                if self.state != DismissState::Dismissing {
                    return;
                }
                self.state = DismissState::Exited;
                if let Some(listener) = self.listener.take() {
                    listener();
                }
                self.schedule_detach();
            }
            Continuation::SwipeFinished => self.schedule_detach(),
        }
    }

    /// A task posted by this banner came due.
    pub fn run_task(&mut self, task: Task) {
        match task {
            Task::AutoDismiss => {
                if self.state == DismissState::Idle && !self.swiped_out {
                    debug!(cookie = self.id.0, "auto-dismiss fired");
                    self.dismiss(None);
                } else {
                    trace!(
                        cookie = self.id.0,
                        state = ?self.state,
                        swiped_out = self.swiped_out,
                        "auto-dismiss skipped"
                    );
                }
            }
            Task::Detach => self.detach(),
        }
    }

    fn schedule_detach(&mut self) {
        self.env
            .scheduler
            .borrow_mut()
            .post_delayed(self.id, REMOVAL_GRACE, Task::Detach);
    }

    /// Stop all transitions and leave the parent. Idempotent.
    ///
    /// A listener still waiting on a cleared exit runs here.
    fn detach(&mut self) {
        self.drag = None;
        if self.state == DismissState::Removed {
            return;
        }
        self.state = DismissState::Removed;
        self.env.animator.borrow_mut().clear(self.id);
        if let Some(parent) = self.parent.take() {
            parent.borrow_mut().remove_child(self.id);
            debug!(cookie = self.id.0, "cookie detached");
        }
        if let Some(listener) = self.listener.take() {
            listener();
        }
    }

    // --- Helpers ---

    fn slide_duration(&self, resource: &str) -> Duration {
        self.env
            .animator
            .borrow()
            .resource_duration(resource)
            .unwrap_or(DEFAULT_SLIDE_DURATION)
    }

    fn play(&self, transition: Transition, on_complete: Option<Continuation>) {
        self.env
            .animator
            .borrow_mut()
            .play(self.id, transition, on_complete);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::BTreeSet;
    use std::rc::Rc;

    use cookiebar_core::animation::{
        Pose, SLIDE_IN_FROM_BOTTOM, SLIDE_IN_FROM_TOP, SLIDE_OUT_TO_BOTTOM, SLIDE_OUT_TO_TOP,
    };
    use cookiebar_core::geometry::Size;
    use cookiebar_core::host::{AnimationDriver, Container, Scheduler};

    use crate::config::{CustomView, ResourceId};
    use crate::gesture::{HORIZONTAL_COMMIT_DURATION, VERTICAL_COMMIT_DURATION};
    use crate::views::{ElementKind, Elements};

    const ID: CookieId = CookieId(1);

    #[derive(Default)]
    struct FakeDriver {
        played: Vec<(Transition, Option<Continuation>)>,
        cleared: usize,
        slide_out: Option<Duration>,
    }

    impl AnimationDriver for FakeDriver {
        fn resource_duration(&self, name: &str) -> Option<Duration> {
            if name == SLIDE_OUT_TO_TOP || name == SLIDE_OUT_TO_BOTTOM {
                self.slide_out
            } else {
                None
            }
        }

        fn play(&mut self, _id: CookieId, transition: Transition, on_complete: Option<Continuation>) {
            self.played.push((transition, on_complete));
        }

        fn clear(&mut self, _id: CookieId) {
            self.cleared += 1;
        }
    }

    #[derive(Default)]
    struct FakeScheduler {
        posted: Vec<(Duration, Task)>,
    }

    impl Scheduler for FakeScheduler {
        fn post_delayed(&mut self, _id: CookieId, delay: Duration, task: Task) {
            self.posted.push((delay, task));
        }
    }

    #[derive(Default)]
    struct FakeContainer {
        children: BTreeSet<CookieId>,
        removals: usize,
    }

    impl Container for FakeContainer {
        fn add_child(&mut self, child: CookieId) {
            self.children.insert(child);
        }

        fn remove_child(&mut self, child: CookieId) -> bool {
            self.removals += 1;
            self.children.remove(&child)
        }
    }

    struct Harness {
        cookie: Cookie,
        driver: Rc<RefCell<FakeDriver>>,
        scheduler: Rc<RefCell<FakeScheduler>>,
        parent: Rc<RefCell<FakeContainer>>,
    }

    impl Harness {
        fn new(config: CookieConfig) -> Self {
            Self::with_density(config, 1.0)
        }

        fn with_density(config: CookieConfig, density: f32) -> Self {
            let driver = Rc::new(RefCell::new(FakeDriver::default()));
            let scheduler = Rc::new(RefCell::new(FakeScheduler::default()));
            let parent = Rc::new(RefCell::new(FakeContainer::default()));
            let env = Environment::new(driver.clone(), scheduler.clone())
                .metrics(DisplayMetrics::new(density));
            let mut cookie = Cookie::new(ID, env, config).expect("cookie should build");
            cookie.show(parent.clone());
            // 300 wide, 200 frame, 100 content: thresholds 100 and 40.
            cookie.layout(Rect::from_size(Size::new(300.0, 200.0)), 100.0);
            Self {
                cookie,
                driver,
                scheduler,
                parent,
            }
        }

        fn exits(&self) -> usize {
            self.driver
                .borrow()
                .played
                .iter()
                .filter(|(_, c)| *c == Some(Continuation::ExitFinished))
                .count()
        }

        fn last_played(&self) -> (Transition, Option<Continuation>) {
            self.driver
                .borrow()
                .played
                .last()
                .cloned()
                .expect("something should have played")
        }

        fn posted(&self) -> Vec<(Duration, Task)> {
            self.scheduler.borrow().posted.clone()
        }

        fn drag(&mut self, from: (f32, f32), to: (f32, f32)) -> bool {
            assert!(self.cookie.on_pointer_event(PointerEvent::down(from.0, from.1)));
            self.cookie.on_pointer_event(PointerEvent::moved(to.0, to.1))
        }
    }

    #[test]
    fn show_attaches_and_plays_enter() {
        let h = Harness::new(CookieConfig::new().edge(Edge::Top));
        assert!(h.parent.borrow().children.contains(&ID));
        let (transition, continuation) = h.last_played();
        assert_eq!(transition.resource_name(), Some(SLIDE_IN_FROM_TOP));
        assert_eq!(transition.duration, DEFAULT_SLIDE_DURATION);
        assert_eq!(continuation, Some(Continuation::EnterFinished));
    }

    #[test]
    fn show_plays_icon_animator() {
        let h = Harness::new(
            CookieConfig::new()
                .icon(ResourceId(3))
                .icon_animator("pulse"),
        );
        let driver = h.driver.borrow();
        let played = &driver.played;
        assert_eq!(played[0].0.resource_name(), Some(SLIDE_IN_FROM_BOTTOM));
        assert_eq!(played[1].0.resource_name(), Some("pulse"));
        assert_eq!(played[1].0.target, Target::Icon);
        assert_eq!(played[1].1, None);
    }

    #[test]
    fn icon_animator_needs_icon() {
        let h = Harness::new(CookieConfig::new().icon_animator("pulse"));
        assert_eq!(h.driver.borrow().played.len(), 1);
    }

    #[test]
    fn enter_finished_arms_timer_once() {
        let mut h = Harness::new(CookieConfig::new().duration(Duration::from_millis(2000)));
        assert!(h.posted().is_empty());
        h.cookie.on_transition_finished(Continuation::EnterFinished);
        h.cookie.on_transition_finished(Continuation::EnterFinished);
        assert_eq!(
            h.posted(),
            vec![(Duration::from_millis(2000), Task::AutoDismiss)]
        );
        assert!(h.cookie.is_timer_armed());
    }

    #[test]
    fn auto_dismiss_plays_full_exit() {
        let mut h = Harness::new(CookieConfig::new());
        h.cookie.run_task(Task::AutoDismiss);
        assert_eq!(h.cookie.state(), DismissState::Dismissing);
        let (transition, continuation) = h.last_played();
        assert_eq!(transition.resource_name(), Some(SLIDE_OUT_TO_BOTTOM));
        assert_eq!(transition.duration, DEFAULT_SLIDE_DURATION);
        assert_eq!(continuation, Some(Continuation::ExitFinished));
    }

    #[test]
    fn exit_duration_comes_from_driver() {
        let mut h = Harness::new(CookieConfig::new().edge(Edge::Top));
        h.driver.borrow_mut().slide_out = Some(Duration::from_millis(300));
        h.cookie.dismiss(None);
        assert_eq!(h.last_played().0.duration, Duration::from_millis(300));
    }

    #[test]
    fn listener_halves_exit_and_runs_on_finish() {
        let mut h = Harness::new(CookieConfig::new());
        let called = Rc::new(Cell::new(0));
        let seen = called.clone();
        h.cookie
            .dismiss(Some(Box::new(move || seen.set(seen.get() + 1))));
        assert_eq!(h.last_played().0.duration, Duration::from_millis(250));
        assert_eq!(called.get(), 0);

        h.cookie.on_transition_finished(Continuation::ExitFinished);
        assert_eq!(called.get(), 1);
        assert_eq!(h.cookie.state(), DismissState::Exited);
        assert_eq!(h.posted(), vec![(REMOVAL_GRACE, Task::Detach)]);

        h.cookie.run_task(Task::Detach);
        assert_eq!(h.cookie.state(), DismissState::Removed);
        assert!(h.parent.borrow().children.is_empty());
        assert_eq!(h.driver.borrow().cleared, 1);
    }

    #[test]
    fn dismiss_while_dismissing_is_ignored() {
        let mut h = Harness::new(CookieConfig::new());
        h.cookie.dismiss(None);
        h.cookie.dismiss(None);
        h.cookie.run_task(Task::AutoDismiss);
        assert_eq!(h.exits(), 1);
    }

    #[test]
    fn dismiss_after_exit_detaches_without_second_exit() {
        let mut h = Harness::new(CookieConfig::new());
        h.cookie.dismiss(None);
        h.cookie.on_transition_finished(Continuation::ExitFinished);

        let called = Rc::new(Cell::new(false));
        let seen = called.clone();
        h.cookie.dismiss(Some(Box::new(move || seen.set(true))));
        assert!(called.get());
        assert_eq!(h.cookie.state(), DismissState::Removed);
        assert_eq!(h.exits(), 1);

        // The grace-delayed detach is now a no-op.
        h.cookie.run_task(Task::Detach);
        assert_eq!(h.parent.borrow().removals, 1);
    }

    #[test]
    fn stale_exit_finished_is_ignored() {
        let mut h = Harness::new(CookieConfig::new());
        h.cookie.on_transition_finished(Continuation::ExitFinished);
        assert_eq!(h.cookie.state(), DismissState::Idle);
        assert!(h.posted().is_empty());
    }

    #[test]
    fn horizontal_swipe_commits_and_detaches() {
        let mut h = Harness::new(CookieConfig::new().edge(Edge::Top));
        assert!(h.drag((10.0, 10.0), (150.0, 10.0)));
        assert!(h.cookie.is_swiped_out());
        assert!(h.cookie.drag().is_none());

        let (transition, continuation) = h.last_played();
        assert_eq!(transition.pose(), Some(Pose::new(300.0, 0.0, 0.0)));
        assert_eq!(transition.duration, HORIZONTAL_COMMIT_DURATION);
        assert_eq!(continuation, Some(Continuation::SwipeFinished));

        h.cookie.on_transition_finished(Continuation::SwipeFinished);
        assert_eq!(h.posted(), vec![(REMOVAL_GRACE, Task::Detach)]);
        h.cookie.run_task(Task::Detach);
        assert_eq!(h.cookie.state(), DismissState::Removed);
        assert_eq!(h.exits(), 0);
    }

    #[test]
    fn bottom_drag_down_snaps_to_frame_height() {
        let mut h = Harness::new(CookieConfig::new().edge(Edge::Bottom));
        h.drag((0.0, 0.0), (0.0, 50.0));
        let (transition, _) = h.last_played();
        assert_eq!(transition.pose(), Some(Pose::new(0.0, 200.0, 1.0)));
        assert_eq!(transition.duration, VERTICAL_COMMIT_DURATION);
        assert!(h.cookie.is_swiped_out());
    }

    #[test]
    fn top_drag_down_is_clamped() {
        let mut h = Harness::new(CookieConfig::new().edge(Edge::Top));
        h.drag((0.0, 0.0), (0.0, 500.0));
        let (transition, continuation) = h.last_played();
        assert_eq!(transition.pose(), Some(Pose::REST));
        assert_eq!(transition.duration, Duration::ZERO);
        assert_eq!(continuation, None);
        assert!(!h.cookie.is_swiped_out());
    }

    #[test]
    fn events_after_swipe_are_claimed_without_effect() {
        let mut h = Harness::new(CookieConfig::new());
        h.drag((0.0, 0.0), (-200.0, 0.0));
        let played = h.driver.borrow().played.len();
        assert!(h.cookie.on_pointer_event(PointerEvent::moved(5.0, 5.0)));
        assert!(h.cookie.on_pointer_event(PointerEvent::up(5.0, 5.0)));
        assert_eq!(h.driver.borrow().played.len(), played);
    }

    #[test]
    fn timer_after_swipe_does_nothing() {
        let mut h = Harness::new(CookieConfig::new());
        h.cookie.on_transition_finished(Continuation::EnterFinished);
        h.drag((0.0, 0.0), (200.0, 0.0));
        h.cookie.run_task(Task::AutoDismiss);
        assert_eq!(h.exits(), 0);
        assert_eq!(h.cookie.state(), DismissState::Idle);
    }

    #[test]
    fn dismiss_after_swipe_detaches_immediately() {
        let mut h = Harness::new(CookieConfig::new());
        h.drag((0.0, 0.0), (200.0, 0.0));
        let called = Rc::new(Cell::new(false));
        let seen = called.clone();
        h.cookie.dismiss(Some(Box::new(move || seen.set(true))));
        assert!(called.get());
        assert_eq!(h.cookie.state(), DismissState::Removed);
        assert!(!h.cookie.is_attached());
        assert_eq!(h.exits(), 0);

        // Late swipe completion is ignored.
        h.cookie.on_transition_finished(Continuation::SwipeFinished);
        assert!(h.posted().is_empty());
    }

    #[test]
    fn tap_dismisses_like_dismiss() {
        let mut h = Harness::with_density(CookieConfig::new(), 2.0);
        assert!(h.cookie.on_pointer_event(PointerEvent::down(50.0, 50.0)));
        assert!(h.cookie.on_pointer_event(PointerEvent::up(53.0, 53.0)));
        assert!(h.cookie.is_swiped_out());
        assert_eq!(h.cookie.state(), DismissState::Dismissing);
        let (transition, _) = h.last_played();
        assert_eq!(transition.duration, DEFAULT_SLIDE_DURATION);
        assert_eq!(h.exits(), 1);
    }

    #[test]
    fn release_after_drag_springs_back() {
        let mut h = Harness::new(CookieConfig::new().edge(Edge::Bottom));
        h.drag((0.0, 0.0), (40.0, 10.0));
        assert!(h.cookie.on_pointer_event(PointerEvent::up(40.0, 10.0)));
        let (transition, continuation) = h.last_played();
        assert_eq!(transition.pose(), Some(Pose::new(0.0, 100.0, 1.0)));
        assert_eq!(transition.duration, SPRING_BACK_DURATION);
        assert_eq!(continuation, None);
        assert_eq!(h.cookie.state(), DismissState::Idle);
        assert!(!h.cookie.is_swiped_out());
    }

    #[test]
    fn move_before_layout_is_claimed_only() {
        let driver = Rc::new(RefCell::new(FakeDriver::default()));
        let scheduler = Rc::new(RefCell::new(FakeScheduler::default()));
        let mut cookie = Cookie::new(
            ID,
            Environment::new(driver.clone(), scheduler),
            CookieConfig::new(),
        )
        .expect("cookie should build");
        assert!(cookie.on_pointer_event(PointerEvent::down(0.0, 0.0)));
        assert!(cookie.on_pointer_event(PointerEvent::moved(500.0, 0.0)));
        assert!(cookie.on_pointer_event(PointerEvent::up(0.0, 0.0)));
        assert!(driver.borrow().played.is_empty());
        assert!(!cookie.is_swiped_out());
    }

    #[test]
    fn move_without_down_is_claimed_only() {
        let mut h = Harness::new(CookieConfig::new());
        let played = h.driver.borrow().played.len();
        assert!(h.cookie.on_pointer_event(PointerEvent::moved(200.0, 0.0)));
        assert!(h.cookie.on_pointer_event(PointerEvent::up(200.0, 0.0)));
        assert_eq!(h.driver.borrow().played.len(), played);
    }

    #[test]
    fn cancel_and_secondary_pointer_not_consumed() {
        let mut h = Harness::new(CookieConfig::new());
        assert!(h.cookie.on_pointer_event(PointerEvent::down(0.0, 0.0)));
        let second = PointerEvent::moved(200.0, 0.0).with_pointer(PointerId(1));
        assert!(!h.cookie.on_pointer_event(second));
        assert!(!h.cookie.is_swiped_out());
        assert!(!h.cookie.on_pointer_event(PointerEvent::cancel(0.0, 0.0)));
        assert!(h.cookie.drag().is_none());
    }

    #[test]
    fn nothing_consumed_after_removal() {
        let mut h = Harness::new(CookieConfig::new());
        h.drag((0.0, 0.0), (200.0, 0.0));
        h.cookie.dismiss(None);
        assert!(!h.cookie.on_pointer_event(PointerEvent::down(0.0, 0.0)));
    }

    #[test]
    fn action_runs_callback_then_quick_exit() {
        let taps = Rc::new(Cell::new(0));
        let seen = taps.clone();
        let mut h = Harness::new(
            CookieConfig::new()
                .edge(Edge::Top)
                .action("Undo", move || seen.set(seen.get() + 1)),
        );
        assert!(h.cookie.click_action());
        assert_eq!(taps.get(), 1);
        let (transition, _) = h.last_played();
        assert_eq!(transition.resource_name(), Some(SLIDE_OUT_TO_TOP));
        assert_eq!(transition.duration, Duration::from_millis(250));

        // A second tap still reaches the host but cannot start a second exit.
        assert!(h.cookie.click_action());
        assert_eq!(taps.get(), 2);
        assert_eq!(h.exits(), 1);
    }

    #[test]
    fn hidden_action_ignores_clicks() {
        let mut h = Harness::new(CookieConfig::new());
        assert!(!h.cookie.click_action());
        assert_eq!(h.cookie.state(), DismissState::Idle);
    }

    #[test]
    fn show_moves_between_parents() {
        let mut h = Harness::new(CookieConfig::new());
        let other = Rc::new(RefCell::new(FakeContainer::default()));
        h.cookie.show(other.clone());
        assert!(h.parent.borrow().children.is_empty());
        assert!(other.borrow().children.contains(&ID));
    }

    #[test]
    fn show_during_exit_is_ignored() {
        let mut h = Harness::new(CookieConfig::new());
        h.cookie.on_transition_finished(Continuation::EnterFinished);
        h.cookie.dismiss(None);
        let played = h.driver.borrow().played.len();

        let other = Rc::new(RefCell::new(FakeContainer::default()));
        h.cookie.show(other.clone());
        assert_eq!(h.driver.borrow().played.len(), played);
        assert!(other.borrow().children.is_empty());
        assert!(h.parent.borrow().children.contains(&ID));

        // The exit completion still lands and the banner detaches.
        h.cookie.on_transition_finished(Continuation::ExitFinished);
        assert_eq!(h.cookie.state(), DismissState::Exited);
        h.cookie.run_task(Task::Detach);
        assert_eq!(h.cookie.state(), DismissState::Removed);
        assert!(h.parent.borrow().children.is_empty());
    }

    #[test]
    fn show_after_swipe_is_ignored() {
        let mut h = Harness::new(CookieConfig::new());
        assert!(h.drag((0.0, 0.0), (150.0, 0.0)));
        let played = h.driver.borrow().played.len();
        h.cookie.show(h.parent.clone());
        assert_eq!(h.driver.borrow().played.len(), played);
    }

    #[test]
    fn swipe_during_exit_still_runs_listener() {
        let mut h = Harness::new(CookieConfig::new());
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        h.cookie.dismiss(Some(Box::new(move || seen.set(seen.get() + 1))));
        assert_eq!(h.cookie.state(), DismissState::Dismissing);

        assert!(h.drag((10.0, 10.0), (200.0, 10.0)));
        h.cookie.on_transition_finished(Continuation::SwipeFinished);
        h.cookie.run_task(Task::Detach);
        assert_eq!(h.cookie.state(), DismissState::Removed);
        assert_eq!(calls.get(), 1);

        // The cleared exit never completes; a late delivery changes nothing.
        h.cookie.on_transition_finished(Continuation::ExitFinished);
        h.cookie.run_task(Task::Detach);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn relayout_mid_drag_uses_new_thresholds() {
        let mut h = Harness::new(CookieConfig::new().edge(Edge::Top));
        assert!(h.drag((0.0, 0.0), (90.0, 0.0)));
        assert!(!h.cookie.is_swiped_out());

        // Narrower frame: horizontal threshold drops from 100 to 60.
        h.cookie.layout(Rect::from_size(Size::new(180.0, 200.0)), 100.0);
        assert!(h.cookie.on_pointer_event(PointerEvent::moved(90.0, 0.0)));
        assert!(h.cookie.is_swiped_out());
        let (transition, continuation) = h.last_played();
        assert_eq!(transition.pose(), Some(Pose::new(180.0, 0.0, 0.0)));
        assert_eq!(continuation, Some(Continuation::SwipeFinished));
    }

    #[test]
    fn layout_replaces_geometry() {
        let mut h = Harness::new(CookieConfig::new());
        let g = h
            .cookie
            .layout(Rect::from_size(Size::new(600.0, 120.0)), 80.0);
        assert_eq!(h.cookie.geometry(), Some(g));
        assert_eq!(g.horizontal_threshold, 200.0);
        assert_eq!(g.vertical_threshold, 32.0);
    }

    #[test]
    fn new_rejects_incomplete_custom_view() {
        let driver = Rc::new(RefCell::new(FakeDriver::default()));
        let scheduler = Rc::new(RefCell::new(FakeScheduler::default()));
        let config = CookieConfig::new()
            .custom_view(CustomView::new("partial", Elements::REQUIRED - Elements::ICON));
        let err = Cookie::new(ID, Environment::new(driver, scheduler), config)
            .expect_err("missing icon should fail");
        assert_eq!(err, CookieError::MissingElement(ElementKind::Icon));
    }

    #[test]
    fn configure_keeps_old_views_on_error() {
        let mut h = Harness::new(CookieConfig::new().title("Hello"));
        let bad = CookieConfig::new()
            .custom_view(CustomView::new("empty", Elements::empty()));
        assert!(h.cookie.configure(bad).is_err());
        assert_eq!(h.cookie.views().title.text, "Hello");

        h.cookie
            .configure(CookieConfig::new().title("Bye"))
            .expect("valid config");
        assert_eq!(h.cookie.views().title.text, "Bye");
    }
}
