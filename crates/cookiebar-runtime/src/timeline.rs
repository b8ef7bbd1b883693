#![forbid(unsafe_code)]

//! Virtual time and the queue of things that come due.
//!
//! A [`Timeline`] never reads the wall clock. Time moves only when the owner
//! advances it, and entries come out in `(due time, insertion sequence)`
//! order, so two runs with the same inputs deliver the same callbacks in the
//! same order.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;
use std::time::Duration;

use cookiebar_core::host::{CookieId, Task};

/// Shared handle to a timeline.
pub type TimelineHandle = Rc<RefCell<Timeline>>;

/// Identifies one played transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(pub u64);

/// What comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Due {
    /// A posted task.
    Task(Task),
    /// A transition reached its end.
    Transition(Ticket),
}

/// One queued item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// Virtual time at which the entry is due.
    pub at: Duration,
    /// Insertion order, for ties.
    pub seq: u64,
    pub cookie: CookieId,
    pub due: Due,
}

// BinaryHeap is a max-heap; the earliest (at, seq) must compare greatest.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .at
            .cmp(&self.at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A virtual clock with an ordered queue of due entries.
#[derive(Debug, Default)]
pub struct Timeline {
    now: Duration,
    next_seq: u64,
    queue: BinaryHeap<Entry>,
}

impl Timeline {
    /// A timeline at time zero with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// A new shared timeline.
    pub fn shared() -> TimelineHandle {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of queued entries.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Due time of the earliest entry.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.peek().map(|entry| entry.at)
    }

    /// Queue `due` for `cookie`, `delay` from now.
    pub fn schedule(&mut self, cookie: CookieId, delay: Duration, due: Due) -> Entry {
        let entry = Entry {
            at: self.now.saturating_add(delay),
            seq: self.next_seq,
            cookie,
            due,
        };
        self.next_seq += 1;
        self.queue.push(entry);
        entry
    }

    /// Remove and return the earliest entry due at or before `until`,
    /// moving the clock to its due time.
    pub fn pop_until(&mut self, until: Duration) -> Option<Entry> {
        if self.queue.peek()?.at > until {
            return None;
        }
        let entry = self.queue.pop()?;
        self.now = self.now.max(entry.at);
        Some(entry)
    }

    /// Move the clock forward to `to`. Never moves backwards.
    pub fn advance_to(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }
}
