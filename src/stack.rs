//! The global Z-order stacking list
//!
//! Stacking order is independent of the layout tree: a node's position in
//! its desktop's tree says nothing about whether its window is drawn above
//! or below another. This module tracks that order as one flat list shared
//! by every desktop, restacked whenever a client's layer or state changes.

use crate::{core::Window, monitor::client::ClientState};
use serde::{Deserialize, Serialize};

/// Which of the three Z-order bands a window's layer places it in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub(crate) enum StackLayer {
    /// Window is `Below` another
    Below,
    /// Window is at the normal layer
    Normal,
    /// Window is `Above` another
    Above,
}

impl StackLayer {
    const fn rank(self) -> i32 {
        match self {
            Self::Below => 0,
            Self::Normal => 1,
            Self::Above => 2,
        }
    }
}

/// Where within a [`StackLayer`] a client's [`ClientState`] places it
const fn state_rank(state: ClientState) -> i32 {
    match state {
        ClientState::Tiled | ClientState::PsuedoTiled => 0,
        ClientState::Floating => 1,
        ClientState::Fullscreen => 2,
    }
}

/// Compute the sparse `3 * layer + state` ordering key used to place a
/// window among its peers. Higher sorts above lower.
pub(crate) const fn stack_level(layer: StackLayer, state: ClientState) -> i32 {
    3 * layer.rank() + state_rank(state)
}

/// An entry in the [`StackingList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Entry {
    window: Window,
    level:  i32,
}

/// The flat, ordered stacking list: `windows[0]` is the bottom-most window,
/// `windows[len - 1]` is the top-most.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct StackingList {
    windows: Vec<Entry>,
}

impl StackingList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.windows.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub(crate) fn contains(&self, window: Window) -> bool {
        self.windows.iter().any(|e| e.window == window)
    }

    fn position(&self, window: Window) -> Option<usize> {
        self.windows.iter().position(|e| e.window == window)
    }

    /// Insert `window` at `level`, placed after the last existing entry with
    /// a level `<=` its own (stable: ties go above earlier-inserted peers,
    /// matching "last-raised-wins" within a level).
    pub(crate) fn insert(&mut self, window: Window, level: i32) {
        self.remove(window);
        let pos = self
            .windows
            .iter()
            .rposition(|e| e.level <= level)
            .map_or(0, |i| i + 1);
        self.windows.insert(pos, Entry { window, level });
    }

    pub(crate) fn remove(&mut self, window: Window) -> bool {
        if let Some(pos) = self.position(window) {
            self.windows.remove(pos);
            true
        } else {
            false
        }
    }

    /// Move `window` to the top of its level band
    pub(crate) fn raise(&mut self, window: Window) {
        if let Some(pos) = self.position(window) {
            let entry = self.windows.remove(pos);
            self.insert(entry.window, entry.level);
        }
    }

    /// Move `window` to the bottom of its level band
    pub(crate) fn lower(&mut self, window: Window) {
        if let Some(pos) = self.position(window) {
            let entry = self.windows.remove(pos);
            let insert_pos = self.windows.iter().position(|e| e.level >= entry.level).unwrap_or(0);
            self.windows.insert(insert_pos, entry);
        }
    }

    /// Every window in the [`Above`](StackLayer::Above) band
    pub(crate) fn above(&self) -> impl Iterator<Item = Window> + '_ {
        self.windows
            .iter()
            .filter(|e| e.level >= stack_level(StackLayer::Above, ClientState::Tiled))
            .map(|e| e.window)
    }

    /// Every window in the [`Below`](StackLayer::Below) band
    pub(crate) fn below(&self) -> impl Iterator<Item = Window> + '_ {
        self.windows
            .iter()
            .filter(|e| e.level < stack_level(StackLayer::Normal, ClientState::Tiled))
            .map(|e| e.window)
    }

    /// Bottom-to-top iteration order, the order windows should be restacked
    /// on the server in
    pub(crate) fn iter_bottom_to_top(&self) -> impl Iterator<Item = Window> + '_ {
        self.windows.iter().map(|e| e.window)
    }

    /// `true` if `a` is drawn above `b` in this list. Unknown windows sort
    /// as absent (never "above" anything).
    pub(crate) fn is_above(&self, a: Window, b: Window) -> bool {
        match (self.position(a), self.position(b)) {
            (Some(pa), Some(pb)) => pa > pb,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_level_orders_layer_before_state() {
        let below_fullscreen = stack_level(StackLayer::Below, ClientState::Fullscreen);
        let normal_tiled = stack_level(StackLayer::Normal, ClientState::Tiled);
        assert!(below_fullscreen < normal_tiled);
    }

    #[test]
    fn insert_keeps_higher_levels_above_lower_ones() {
        let mut stack = StackingList::new();
        stack.insert(1, stack_level(StackLayer::Below, ClientState::Tiled));
        stack.insert(2, stack_level(StackLayer::Above, ClientState::Tiled));
        stack.insert(3, stack_level(StackLayer::Normal, ClientState::Tiled));
        let order: Vec<Window> = stack.iter_bottom_to_top().collect();
        assert_eq!(order, vec![1, 3, 2]);
    }

    #[test]
    fn raise_moves_a_window_above_its_level_peers() {
        let mut stack = StackingList::new();
        let lvl = stack_level(StackLayer::Normal, ClientState::Tiled);
        stack.insert(1, lvl);
        stack.insert(2, lvl);
        stack.raise(1);
        let order: Vec<Window> = stack.iter_bottom_to_top().collect();
        assert_eq!(order, vec![2, 1]);
    }

    #[test]
    fn remove_drops_the_window_from_the_list() {
        let mut stack = StackingList::new();
        stack.insert(1, 0);
        assert!(stack.remove(1));
        assert!(!stack.contains(1));
    }
}
