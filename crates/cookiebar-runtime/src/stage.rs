#![forbid(unsafe_code)]

//! Deterministic banner host for testing.
//!
//! `Stage` wires banners to a virtual [`Timeline`], a [`TimelineAnimator`],
//! a [`TimelineScheduler`], and a [`RecordingContainer`], and routes every
//! completion and task back to the banner that asked for it. Time only moves
//! when [`advance`](Stage::advance) is called, so tests can step through a
//! banner's life millisecond by millisecond.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use cookiebar_core::geometry::{Rect, Size};
//! use cookiebar_runtime::stage::Stage;
//! use cookiebar_widgets::{CookieConfig, DismissState};
//!
//! let mut stage = Stage::new();
//! let id = stage.spawn(CookieConfig::new().title("Hi")).unwrap();
//! stage.show(id);
//! stage.layout(id, Rect::from_size(Size::new(360.0, 120.0)), 96.0);
//!
//! // Enter (500ms) + display (2000ms) + exit (500ms) + grace (200ms).
//! stage.advance(Duration::from_millis(3200));
//! assert_eq!(stage.cookie(id).unwrap().state(), DismissState::Removed);
//! ```

use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use cookiebar_core::event::PointerEvent;
use cookiebar_core::geometry::Rect;
use cookiebar_core::host::{Continuation, CookieId, Task};
use cookiebar_widgets::config::{CookieConfig, DisplayMetrics, Theme};
use cookiebar_widgets::cookie::{Cookie, DismissListener, Environment};
use cookiebar_widgets::error::CookieError;
use cookiebar_widgets::gesture::Geometry;
use tracing::{debug, debug_span, trace};

use crate::animator::{ResourceCatalog, TimelineAnimator};
use crate::container::RecordingContainer;
use crate::scheduler::TimelineScheduler;
use crate::timeline::{Due, Entry, Timeline, TimelineHandle};

/// Upper bound on advance steps in [`Stage::run_until_idle`].
const MAX_IDLE_STEPS: usize = 10_000;

/// Record of a callback handed back to a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// A transition finished with a continuation.
    Transition {
        at: Duration,
        cookie: CookieId,
        continuation: Continuation,
    },
    /// A posted task came due.
    Task {
        at: Duration,
        cookie: CookieId,
        task: Task,
    },
}

/// Deterministic host for [`Cookie`] controllers.
pub struct Stage {
    timeline: TimelineHandle,
    animator: Rc<RefCell<TimelineAnimator>>,
    scheduler: Rc<RefCell<TimelineScheduler>>,
    container: Rc<RefCell<RecordingContainer>>,
    env: Environment,
    cookies: BTreeMap<CookieId, Cookie>,
    next_id: u64,
    deliveries: Vec<Delivery>,
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage {
    /// A stage with the stock slide resources.
    pub fn new() -> Self {
        Self::with_catalog(ResourceCatalog::default())
    }

    /// A stage whose animator knows the resources in `catalog`.
    pub fn with_catalog(catalog: ResourceCatalog) -> Self {
        let timeline = Timeline::shared();
        let animator = Rc::new(RefCell::new(TimelineAnimator::new(timeline.clone(), catalog)));
        let scheduler = Rc::new(RefCell::new(TimelineScheduler::new(timeline.clone())));
        let env = Environment::new(animator.clone(), scheduler.clone());
        Self {
            timeline,
            animator,
            scheduler,
            container: Rc::new(RefCell::new(RecordingContainer::new())),
            env,
            cookies: BTreeMap::new(),
            next_id: 1,
            deliveries: Vec::new(),
        }
    }

    /// Theme for banners spawned from now on (builder).
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.env.theme = theme;
        self
    }

    /// Display metrics for banners spawned from now on (builder).
    #[must_use]
    pub fn metrics(mut self, metrics: DisplayMetrics) -> Self {
        self.env.metrics = metrics;
        self
    }

    // --- Banners ---

    /// Build a banner from `config` and return its id.
    pub fn spawn(&mut self, config: CookieConfig) -> Result<CookieId, CookieError> {
        let id = CookieId::new(self.next_id);
        let cookie = Cookie::new(id, self.env.clone(), config)?;
        self.next_id += 1;
        self.cookies.insert(id, cookie);
        debug!(cookie = id.0, "cookie spawned");
        Ok(id)
    }

    /// Attach banner `id` to the stage's container.
    ///
    /// Returns `false` for an unknown id.
    pub fn show(&mut self, id: CookieId) -> bool {
        let Some(cookie) = self.cookies.get_mut(&id) else {
            return false;
        };
        cookie.show(self.container.clone());
        true
    }

    /// Lay out banner `id`.
    pub fn layout(&mut self, id: CookieId, bounds: Rect, content_height: f32) -> Option<Geometry> {
        let cookie = self.cookies.get_mut(&id)?;
        Some(cookie.layout(bounds, content_height))
    }

    /// Feed a pointer event to banner `id`. Returns whether it was consumed.
    pub fn pointer(&mut self, id: CookieId, event: PointerEvent) -> bool {
        self.cookies
            .get_mut(&id)
            .is_some_and(|cookie| cookie.on_pointer_event(event))
    }

    /// Feed a sequence of pointer events. Returns how many were consumed.
    pub fn pointer_sequence(&mut self, id: CookieId, events: &[PointerEvent]) -> usize {
        events
            .iter()
            .filter(|event| self.pointer(id, **event))
            .count()
    }

    /// Dismiss banner `id`.
    pub fn dismiss(&mut self, id: CookieId, listener: Option<DismissListener>) {
        if let Some(cookie) = self.cookies.get_mut(&id) {
            cookie.dismiss(listener);
        }
    }

    /// Tap banner `id`'s action button.
    pub fn click_action(&mut self, id: CookieId) -> bool {
        self.cookies
            .get_mut(&id)
            .is_some_and(|cookie| cookie.click_action())
    }

    pub fn cookie(&self, id: CookieId) -> Option<&Cookie> {
        self.cookies.get(&id)
    }

    pub fn cookie_mut(&mut self, id: CookieId) -> Option<&mut Cookie> {
        self.cookies.get_mut(&id)
    }

    // --- Time ---

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.timeline.borrow().now()
    }

    /// Move time forward by `dt`, delivering everything that comes due on
    /// the way, in order. Returns the number of callbacks delivered.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let until = self.now().saturating_add(dt);
        let _span = debug_span!("stage_advance", until_ms = until.as_millis() as u64).entered();

        let mut delivered = 0;
        loop {
            let Some(entry) = self.timeline.borrow_mut().pop_until(until) else {
                break;
            };
            if self.deliver(entry) {
                delivered += 1;
            }
        }
        self.timeline.borrow_mut().advance_to(until);
        delivered
    }

    /// Advance until nothing is queued. Returns the number of callbacks
    /// delivered.
    pub fn run_until_idle(&mut self) -> usize {
        let mut delivered = 0;
        for _ in 0..MAX_IDLE_STEPS {
            let Some(next) = self.timeline.borrow().next_due() else {
                return delivered;
            };
            delivered += self.advance(next.saturating_sub(self.now()));
        }
        delivered
    }

    fn deliver(&mut self, entry: Entry) -> bool {
        match entry.due {
            Due::Task(task) => {
                let Some(cookie) = self.cookies.get_mut(&entry.cookie) else {
                    return false;
                };
                trace!(cookie = entry.cookie.0, ?task, "task due");
                self.deliveries.push(Delivery::Task {
                    at: entry.at,
                    cookie: entry.cookie,
                    task,
                });
                cookie.run_task(task);
                true
            }
            Due::Transition(ticket) => {
                let finished = self.animator.borrow_mut().finish(ticket);
                let Some((id, Some(continuation))) = finished else {
                    return false;
                };
                let Some(cookie) = self.cookies.get_mut(&id) else {
                    return false;
                };
                trace!(cookie = id.0, ?continuation, "transition finished");
                self.deliveries.push(Delivery::Transition {
                    at: entry.at,
                    cookie: id,
                    continuation,
                });
                cookie.on_transition_finished(continuation);
                true
            }
        }
    }

    // --- Inspection ---

    /// Every callback delivered so far.
    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    pub fn animator(&self) -> Ref<'_, TimelineAnimator> {
        self.animator.borrow()
    }

    pub fn scheduler(&self) -> Ref<'_, TimelineScheduler> {
        self.scheduler.borrow()
    }

    pub fn container(&self) -> Ref<'_, RecordingContainer> {
        self.container.borrow()
    }

    /// Number of exit transitions banner `id` has played.
    pub fn exits_played(&self, id: CookieId) -> usize {
        self.animator
            .borrow()
            .plays_for(id)
            .filter(|record| record.on_complete == Some(Continuation::ExitFinished))
            .count()
    }
}
