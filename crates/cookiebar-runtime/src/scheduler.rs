#![forbid(unsafe_code)]

//! Delayed tasks on the virtual timeline.

use std::time::Duration;

use cookiebar_core::host::{CookieId, Scheduler, Task};
use tracing::trace;

use crate::timeline::{Due, TimelineHandle};

/// Record of a posted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostRecord {
    /// Virtual time of the post.
    pub posted_at: Duration,
    /// Virtual time the task comes due.
    pub due_at: Duration,
    pub cookie: CookieId,
    pub task: Task,
}

/// [`Scheduler`] that queues tasks on a [`Timeline`](crate::timeline::Timeline).
#[derive(Debug)]
pub struct TimelineScheduler {
    timeline: TimelineHandle,
    log: Vec<PostRecord>,
}

impl TimelineScheduler {
    /// Schedule onto `timeline`.
    pub fn new(timeline: TimelineHandle) -> Self {
        Self {
            timeline,
            log: Vec::new(),
        }
    }

    /// Every task posted so far, in posting order.
    pub fn log(&self) -> &[PostRecord] {
        &self.log
    }
}

impl Scheduler for TimelineScheduler {
    fn post_delayed(&mut self, id: CookieId, delay: Duration, task: Task) {
        let mut timeline = self.timeline.borrow_mut();
        let posted_at = timeline.now();
        let entry = timeline.schedule(id, delay, Due::Task(task));
        trace!(cookie = id.0, ?task, due_ms = entry.at.as_millis() as u64, "task posted");
        self.log.push(PostRecord {
            posted_at,
            due_at: entry.at,
            cookie: id,
            task,
        });
    }
}
