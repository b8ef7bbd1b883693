#![forbid(unsafe_code)]

//! A parent container that remembers what happened to it.

use cookiebar_core::host::{Container, CookieId};

/// One change to a [`RecordingContainer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerEvent {
    Added(CookieId),
    Removed(CookieId),
    /// A removal request for a child that was not attached.
    Missed(CookieId),
}

/// [`Container`] that tracks its children and every change.
#[derive(Debug, Default)]
pub struct RecordingContainer {
    children: Vec<CookieId>,
    history: Vec<ContainerEvent>,
}

impl RecordingContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attached children, in attachment order.
    pub fn children(&self) -> &[CookieId] {
        &self.children
    }

    pub fn contains(&self, child: CookieId) -> bool {
        self.children.contains(&child)
    }

    /// Every add and remove so far.
    pub fn history(&self) -> &[ContainerEvent] {
        &self.history
    }

    /// Number of successful removals of `child`.
    pub fn removals_of(&self, child: CookieId) -> usize {
        self.history
            .iter()
            .filter(|event| **event == ContainerEvent::Removed(child))
            .count()
    }
}

impl Container for RecordingContainer {
    fn add_child(&mut self, child: CookieId) {
        if !self.contains(child) {
            self.children.push(child);
        }
        self.history.push(ContainerEvent::Added(child));
    }

    fn remove_child(&mut self, child: CookieId) -> bool {
        let Some(index) = self.children.iter().position(|c| *c == child) else {
            self.history.push(ContainerEvent::Missed(child));
            return false;
        };
        self.children.remove(index);
        self.history.push(ContainerEvent::Removed(child));
        true
    }
}
