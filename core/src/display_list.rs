//! Shared status strip
//!
//! `DisplayList` is a cloneable handle to the host's ordered list of status
//! entries. Every holder sees the same list; mutations go through explicit
//! methods and notify list watchers synchronously.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::host::{RefreshTrigger, WatchToken, Watcher};

/// One entry of the status strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEntry {
    /// Displays the value of the named variable
    Variable(String),
    /// Fixed text
    Literal(String),
}

impl DisplayEntry {
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    fn is_variable(&self, name: &str) -> bool {
        matches!(self, Self::Variable(n) if n == name)
    }
}

impl fmt::Display for DisplayEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(name) => write!(f, "${name}"),
            Self::Literal(text) => write!(f, "{text:?}"),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    entries: Vec<DisplayEntry>,
    watchers: Vec<Watcher>,
    /// Number of redisplay requests issued against the strip
    redisplays: u64,
}

/// Handle to the shared status strip
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    inner: Rc<RefCell<Inner>>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = DisplayEntry>) -> Self {
        let list = Self::new();
        list.inner.borrow_mut().entries = entries.into_iter().collect();
        list
    }

    /// Snapshot of the current entries, in display order
    pub fn entries(&self) -> Vec<DisplayEntry> {
        self.inner.borrow().entries.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    pub fn contains_variable(&self, name: &str) -> bool {
        self.inner
            .borrow()
            .entries
            .iter()
            .any(|e| e.is_variable(name))
    }

    /// Remove the first entry showing `name`. Returns whether one was removed.
    pub fn remove_variable(&self, name: &str) -> bool {
        let removed = {
            let mut inner = self.inner.borrow_mut();
            match inner.entries.iter().position(|e| e.is_variable(name)) {
                Some(idx) => {
                    inner.entries.remove(idx);
                    true
                }
                None => false,
            }
        };
        if removed {
            self.notify();
        }
        removed
    }

    /// Append an entry showing `name` at the end of the strip
    pub fn append_variable(&self, name: &str) {
        self.push(DisplayEntry::variable(name));
    }

    pub fn push(&self, entry: DisplayEntry) {
        self.inner.borrow_mut().entries.push(entry);
        self.notify();
    }

    /// Ask the host to redraw the strip
    pub fn request_redisplay(&self) {
        self.inner.borrow_mut().redisplays += 1;
        tracing::trace!("Status strip redisplay requested");
    }

    pub fn redisplay_count(&self) -> u64 {
        self.inner.borrow().redisplays
    }

    /// Watch the list itself; the watcher fires after every mutation
    pub fn watch(&self, watcher: Watcher) {
        let mut inner = self.inner.borrow_mut();
        if inner.watchers.iter().all(|w| w.token != watcher.token) {
            inner.watchers.push(watcher);
        }
    }

    pub fn unwatch(&self, token: WatchToken) {
        self.inner
            .borrow_mut()
            .watchers
            .retain(|w| w.token != token);
    }

    pub fn watcher_count(&self) -> usize {
        self.inner.borrow().watchers.len()
    }

    fn notify(&self) {
        let watchers = self.inner.borrow().watchers.clone();
        for watcher in &watchers {
            watcher.notify(RefreshTrigger::DisplayListChanged);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn strip() -> DisplayList {
        DisplayList::from_entries([
            DisplayEntry::variable("clock"),
            DisplayEntry::literal(" | "),
            DisplayEntry::variable("battery"),
        ])
    }

    #[test]
    fn test_remove_and_append() {
        let list = strip();
        assert!(list.remove_variable("clock"));
        assert!(!list.contains_variable("clock"));
        assert!(!list.remove_variable("clock"));

        list.append_variable("clock");
        assert_eq!(
            list.entries().last(),
            Some(&DisplayEntry::variable("clock"))
        );
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_literals_never_match_variables() {
        let list = DisplayList::from_entries([DisplayEntry::literal("clock")]);
        assert!(!list.contains_variable("clock"));
        assert!(!list.remove_variable("clock"));
    }

    #[test]
    fn test_clones_share_state() {
        let list = strip();
        let other = list.clone();
        other.remove_variable("battery");
        assert!(!list.contains_variable("battery"));
    }

    #[test]
    fn test_watchers_fire_on_mutation_only() {
        let (tx, rx) = mpsc::channel();
        let list = strip();
        list.watch(Watcher::new(WatchToken(1), tx.clone()));
        list.watch(Watcher::new(WatchToken(1), tx));
        assert_eq!(list.watcher_count(), 1);

        list.remove_variable("missing");
        assert!(rx.try_recv().is_err());

        list.push(DisplayEntry::literal("x"));
        assert_eq!(rx.try_recv(), Ok(RefreshTrigger::DisplayListChanged));

        list.unwatch(WatchToken(1));
        list.push(DisplayEntry::literal("y"));
        assert!(rx.try_recv().is_err());
    }
}
