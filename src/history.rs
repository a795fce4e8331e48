//! Focus history
//!
//! A bounded stack of recently-focused locations, consulted whenever the
//! naive "next focus" candidate (the removed node's sibling) is gone, e.g.
//! because the whole desktop was emptied. Mirrors the bookkeeping bspwm's
//! `history_add`/`history_remove`/`history_last_*` family keeps, collapsed
//! into a `Vec`-backed stack instead of an intrusive doubly-linked list.

use crate::{monitor::MonitorId, monitor::desktop::DesktopId, tree::NodeId};

/// How many entries [`History`] retains before dropping the oldest
const MAX_HISTORY: usize = 256;

/// A single visited location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Coordinates {
    pub(crate) monitor: MonitorId,
    pub(crate) desktop: DesktopId,
    pub(crate) node:    Option<NodeId>,
}

/// Bounded LIFO stack of [`Coordinates`], most-recent last
#[derive(Debug, Clone, Default)]
pub(crate) struct History {
    entries: Vec<Coordinates>,
}

impl History {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record `loc` as the most recently visited location. Any existing
    /// entry for the same node is moved to the top rather than duplicated.
    pub(crate) fn add(&mut self, loc: Coordinates) {
        self.entries.retain(|e| e.node != loc.node || loc.node.is_none());
        self.entries.push(loc);
        if self.entries.len() > MAX_HISTORY {
            self.entries.remove(0);
        }
    }

    /// Drop every entry referencing `node` (called when a node is removed)
    pub(crate) fn remove_node(&mut self, node: NodeId) {
        self.entries.retain(|e| e.node != Some(node));
    }

    /// Drop every entry on `desktop` (called when a desktop is removed)
    pub(crate) fn remove_desktop(&mut self, desktop: DesktopId) {
        self.entries.retain(|e| e.desktop != desktop);
    }

    /// The most recent entry, if any
    pub(crate) fn last(&self) -> Option<Coordinates> {
        self.entries.last().copied()
    }

    /// The most recent entry on `desktop`, skipping the location itself
    pub(crate) fn last_node(&self, desktop: DesktopId, exclude: Option<NodeId>) -> Option<NodeId> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.desktop == desktop && e.node.is_some() && e.node != exclude)
            .and_then(|e| e.node)
    }

    /// The most recent entry on a different desktop than `exclude`
    pub(crate) fn last_desktop(&self, exclude: DesktopId) -> Option<DesktopId> {
        self.entries.iter().rev().find(|e| e.desktop != exclude).map(|e| e.desktop)
    }

    /// The most recent entry on a different monitor than `exclude`
    pub(crate) fn last_monitor(&self, exclude: MonitorId) -> Option<MonitorId> {
        self.entries.iter().rev().find(|e| e.monitor != exclude).map(|e| e.monitor)
    }

    /// 0-based rank of `node` counting back from the most recent entry, or
    /// `None` if it isn't recorded
    pub(crate) fn rank(&self, node: NodeId) -> Option<usize> {
        self.entries.iter().rev().position(|e| e.node == Some(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(m: u32, d: u32, n: Option<usize>) -> Coordinates {
        Coordinates {
            monitor: MonitorId::from_raw(m),
            desktop: DesktopId::from_raw(d),
            node:    n.map(crate::tree::NodeId::from_raw_for_test),
        }
    }

    #[test]
    fn last_node_skips_the_excluded_entry() {
        let mut h = History::new();
        h.add(coords(0, 0, Some(1)));
        h.add(coords(0, 0, Some(2)));
        let last = h.last_node(DesktopId::from_raw(0), Some(crate::tree::NodeId::from_raw_for_test(2)));
        assert_eq!(last, Some(crate::tree::NodeId::from_raw_for_test(1)));
    }

    #[test]
    fn remove_node_drops_matching_entries() {
        let mut h = History::new();
        h.add(coords(0, 0, Some(1)));
        h.remove_node(crate::tree::NodeId::from_raw_for_test(1));
        assert_eq!(h.last(), None);
    }

    #[test]
    fn history_is_bounded() {
        let mut h = History::new();
        for i in 0..(MAX_HISTORY + 10) {
            h.add(coords(0, 0, Some(i)));
        }
        assert_eq!(h.entries.len(), MAX_HISTORY);
    }
}
