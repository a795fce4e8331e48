//! The binary split tree backing a single desktop's layout
//!
//! Each [`Desktop`](crate::monitor::desktop::Desktop) owns one [`Tree`]. A
//! `Tree` is an arena of [`Node`]s addressed by [`NodeId`] rather than a
//! pointer-linked recursive structure, so that depth and cycle checks are
//! simple integer comparisons instead of pointer-chasing.

use crate::{
    core::{AutomaticScheme, ChildPolarity, Direction, LayoutType, Window},
    geometry::Rectangle,
    monitor::client::{Client, ClientState},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Ceiling on the depth of any root-to-leaf path. Traversals that would
/// exceed this are aborted rather than recursing or looping unboundedly.
pub(crate) const MAX_TREE_DEPTH: usize = 256;

/// Errors a [`Tree`] mutation can refuse with, rather than leaving the tree
/// in a structurally inconsistent state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TreeError {
    /// The operation's target id isn't a live node in this tree
    #[error("node is not present in this tree")]
    UnknownNode,
    /// A swap/transfer would make a node its own ancestor
    #[error("operation would create a cycle")]
    WouldCycle,
    /// A swap would leave the desktop's focus outside `root`'s reachable leaves
    #[error("operation would strand the focused node")]
    WouldStrandFocus,
    /// A traversal or insertion would exceed `MAX_TREE_DEPTH`
    #[error("tree depth exceeds the maximum of {}", MAX_TREE_DEPTH)]
    DepthExceeded,
    /// The destination rectangle is too small to hold the node after insets
    #[error("destination rectangle cannot satisfy minimum constraints")]
    GeometryOverflow,
}

/// The axis along which a [`Node::Split`] divides its rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub(crate) enum SplitType {
    /// Children are arranged side by side (divider runs North-South)
    Horizontal,
    /// Children are stacked (divider runs East-West)
    Vertical,
}

impl SplitType {
    /// The [`SplitType`] produced by inserting in the given [`Direction`]
    pub(crate) const fn from_dir(dir: Direction) -> Self {
        match dir {
            Direction::East | Direction::West => Self::Horizontal,
            Direction::North | Direction::South => Self::Vertical,
        }
    }

    const fn toggled(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Minimum size a [`Node`]'s rectangle is allowed to shrink to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub(crate) struct Constraint {
    /// Minimum width
    pub(crate) min_width:  u16,
    /// Minimum height
    pub(crate) min_height: u16,
}

impl Default for Constraint {
    fn default() -> Self {
        Self { min_width: 1, min_height: 1 }
    }
}

/// Combine two children's constraints the way `split_type` combines their
/// rectangles: summed along the split axis, maxed across it (I4).
fn combine_constraints(split_type: SplitType, c1: Constraint, c2: Constraint) -> Constraint {
    match split_type {
        SplitType::Horizontal => Constraint {
            min_width:  c1.min_width.saturating_add(c2.min_width),
            min_height: c1.min_height.max(c2.min_height),
        },
        SplitType::Vertical => Constraint {
            min_width:  c1.min_width.max(c2.min_width),
            min_height: c1.min_height.saturating_add(c2.min_height),
        },
    }
}

/// A leaf is vacant iff it's a receptacle, hidden, or holds a client in a
/// non-tiled state (§3.3, I3). `Fullscreen`/`Floating` flip this on entry
/// and off on exit (§4.3.7); `Hidden` contributes independently.
fn leaf_vacant(hidden: bool, kind: &NodeKind) -> bool {
    if hidden {
        return true;
    }
    match kind {
        NodeKind::Receptacle => true,
        NodeKind::Leaf(client) => matches!(client.state(), ClientState::Floating | ClientState::Fullscreen),
    }
}

/// A latched insertion hint left on a [`Node`]: the next client inserted at
/// this node splits along `split_dir` with `split_ratio`, then the hint is
/// cleared
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub(crate) struct Presel {
    /// Ratio of the preselection split
    pub(crate) split_ratio: f64,
    /// Direction of the split
    pub(crate) split_dir:   Direction,
    /// Window showing the preselection overlay, if any
    pub(crate) feedback:    Option<Window>,
}

impl Presel {
    /// Create a new [`Presel`] hint pointing `dir` with the given ratio
    pub(crate) const fn new(split_dir: Direction, split_ratio: f64) -> Self {
        Self { split_ratio, split_dir, feedback: None }
    }
}

/// Stable handle into a [`Tree`]'s arena. Never reused by a different node
/// while any live reference to the original could still exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub(crate) struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl NodeId {
    #[cfg(test)]
    pub(crate) const fn from_raw_for_test(n: usize) -> Self {
        Self(n)
    }
}

/// What a [`Node`] actually holds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) enum NodeKind {
    /// An internal node dividing its rectangle between two children
    Split {
        split_type:  SplitType,
        split_ratio: f64,
        first:       NodeId,
        second:      NodeId,
    },
    /// A leaf managing a mapped client
    Leaf(Client),
    /// An empty leaf ("receptacle") reserved for a future insertion
    Receptacle,
}

/// A single node in the [`Tree`] arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Node {
    id:          NodeId,
    kind:        NodeKind,
    presel:      Option<Presel>,
    rectangle:   Rectangle,
    constraints: Constraint,
    vacant:      bool,
    hidden:      bool,
    sticky:      bool,
    private:     bool,
    locked:      bool,
    marked:      bool,
    parent:      Option<NodeId>,
}

impl Node {
    pub(crate) const fn id(&self) -> NodeId {
        self.id
    }

    pub(crate) const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub(crate) const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub(crate) const fn rectangle(&self) -> Rectangle {
        self.rectangle
    }

    pub(crate) const fn constraints(&self) -> Constraint {
        self.constraints
    }

    pub(crate) const fn is_receptacle(&self) -> bool {
        matches!(self.kind, NodeKind::Receptacle)
    }

    pub(crate) const fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_) | NodeKind::Receptacle)
    }

    /// An internal node is vacant iff both children are vacant; a leaf is
    /// vacant iff it is a receptacle, hidden, or holds a non-tiled client (I3)
    pub(crate) const fn is_vacant(&self) -> bool {
        self.vacant
    }

    pub(crate) fn client(&self) -> Option<&Client> {
        match &self.kind {
            NodeKind::Leaf(c) => Some(c),
            _ => None,
        }
    }

    pub(crate) fn client_mut(&mut self) -> Option<&mut Client> {
        match &mut self.kind {
            NodeKind::Leaf(c) => Some(c),
            _ => None,
        }
    }

    pub(crate) const fn presel(&self) -> Option<Presel> {
        self.presel
    }

    pub(crate) const fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub(crate) const fn is_sticky(&self) -> bool {
        self.sticky
    }

    pub(crate) const fn is_private(&self) -> bool {
        self.private
    }

    pub(crate) const fn is_locked(&self) -> bool {
        self.locked
    }

    pub(crate) const fn is_marked(&self) -> bool {
        self.marked
    }

    pub(crate) fn set_presel(&mut self, presel: Presel) {
        self.presel = Some(presel);
    }

    pub(crate) fn clear_presel(&mut self) -> Option<Presel> {
        self.presel.take()
    }
}

/// Geometry/layout inputs a [`Tree::project`] call needs beyond the tree
/// itself: the monitor's full rectangle (for fullscreen), the active layout,
/// and the subset of `GlobalSettings` that shape a leaf's final rectangle.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ProjectContext {
    pub(crate) monitor_rectangle:   Rectangle,
    pub(crate) layout:              LayoutType,
    pub(crate) gap:                 i32,
    pub(crate) borderless_monocle:  bool,
    pub(crate) borderless_singleton: bool,
    pub(crate) only_window:         bool,
    pub(crate) center_pseudotiled:  bool,
    pub(crate) honor_size_hints:    bool,
}

/// One leaf's result out of [`Tree::project`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Projected {
    pub(crate) id:           NodeId,
    pub(crate) rectangle:    Rectangle,
    pub(crate) border_width: u32,
}

/// An arena-backed binary split tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Tree {
    slots: Vec<Option<Node>>,
    free:  Vec<usize>,
    root:  Option<NodeId>,
    focus: Option<NodeId>,
}

impl Tree {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) const fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) const fn focus(&self) -> Option<NodeId> {
        self.focus
    }

    pub(crate) fn set_focus(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.get(id)?;
        self.focus = Some(id);
        Ok(())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn get(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.slots
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(TreeError::UnknownNode)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(TreeError::UnknownNode)
    }

    fn alloc(&mut self, kind: NodeKind, parent: Option<NodeId>, rectangle: Rectangle) -> NodeId {
        let vacant = leaf_vacant(false, &kind);
        let node = Node {
            id: NodeId(0),
            kind,
            presel: None,
            rectangle,
            constraints: Constraint::default(),
            vacant,
            hidden: false,
            sticky: false,
            private: false,
            locked: false,
            marked: false,
            parent,
        };

        if let Some(idx) = self.free.pop() {
            let id = NodeId(idx);
            self.slots[idx] = Some(Node { id, ..node });
            id
        } else {
            let id = NodeId(self.slots.len());
            self.slots.push(Some(Node { id, ..node }));
            id
        }
    }

    fn free_slot(&mut self, id: NodeId) {
        if id.0 < self.slots.len() {
            self.slots[id.0] = None;
            self.free.push(id.0);
        }
    }

    /// Depth of `id`, counting the root as depth 0. `Err(DepthExceeded)` if
    /// the parent chain is longer than [`MAX_TREE_DEPTH`] (a defensive
    /// bound; a well-formed tree never hits this).
    pub(crate) fn depth(&self, mut id: NodeId) -> Result<usize, TreeError> {
        let mut depth = 0;
        loop {
            let node = self.get(id)?;
            match node.parent {
                None => return Ok(depth),
                Some(parent) => {
                    depth += 1;
                    if depth > MAX_TREE_DEPTH {
                        return Err(TreeError::DepthExceeded);
                    }
                    id = parent;
                },
            }
        }
    }

    /// `true` if `ancestor` lies on `id`'s path to the root
    pub(crate) fn is_ancestor_of(&self, ancestor: NodeId, mut id: NodeId) -> Result<bool, TreeError> {
        let mut steps = 0;
        loop {
            if id == ancestor {
                return Ok(true);
            }
            let node = self.get(id)?;
            match node.parent {
                None => return Ok(false),
                Some(parent) => {
                    steps += 1;
                    if steps > MAX_TREE_DEPTH {
                        return Err(TreeError::DepthExceeded);
                    }
                    id = parent;
                },
            }
        }
    }

    /// Pre-order walk over every leaf reachable from `start`, using an
    /// explicit stack rather than recursion.
    pub(crate) fn leaves(&self, start: NodeId) -> Result<Vec<NodeId>, TreeError> {
        let mut out = Vec::new();
        let mut stack = vec![(start, 0_usize)];

        while let Some((id, depth)) = stack.pop() {
            if depth > MAX_TREE_DEPTH {
                return Err(TreeError::DepthExceeded);
            }
            let node = self.get(id)?;
            match &node.kind {
                NodeKind::Split { first, second, .. } => {
                    stack.push((*second, depth + 1));
                    stack.push((*first, depth + 1));
                },
                NodeKind::Leaf(_) | NodeKind::Receptacle => out.push(id),
            }
        }

        Ok(out)
    }

    /// Every occupied leaf (skips receptacles) reachable from `start`
    pub(crate) fn clients(&self, start: NodeId) -> Result<Vec<NodeId>, TreeError> {
        Ok(self
            .leaves(start)?
            .into_iter()
            .filter(|id| matches!(self.get(*id).map(Node::kind), Ok(NodeKind::Leaf(_))))
            .collect())
    }

    // ========================== Invariant recomputation ==========================

    /// Recompute `id`'s own `vacant`/`hidden`/`constraints` from its
    /// children (internal) or its kind/hidden flag (leaf). Does not touch
    /// ancestors; pair with [`Tree::propagate_flags_upward`].
    fn recompute_local(&mut self, id: NodeId) -> Result<(), TreeError> {
        let split_info = match &self.get(id)?.kind {
            NodeKind::Split { split_type, first, second, .. } => Some((*split_type, *first, *second)),
            NodeKind::Leaf(_) | NodeKind::Receptacle => None,
        };

        if let Some((split_type, first, second)) = split_info {
            let c1 = self.get(first)?;
            let c2 = self.get(second)?;
            let vacant = c1.vacant && c2.vacant;
            let hidden = c1.hidden && c2.hidden;
            let constraints = combine_constraints(split_type, c1.constraints, c2.constraints);
            let node = self.get_mut(id)?;
            node.vacant = vacant;
            node.hidden = hidden;
            node.constraints = constraints;
        } else {
            let node = self.get_mut(id)?;
            let vacant = leaf_vacant(node.hidden, &node.kind);
            node.vacant = vacant;
            node.constraints = Constraint::default();
        }
        Ok(())
    }

    /// Walk from `id`'s parent up to the root, recomputing each ancestor
    fn propagate_flags_upward(&mut self, id: NodeId) -> Result<(), TreeError> {
        let mut current = self.get(id)?.parent;
        let mut steps = 0;
        while let Some(ancestor) = current {
            steps += 1;
            if steps > MAX_TREE_DEPTH {
                return Err(TreeError::DepthExceeded);
            }
            self.recompute_local(ancestor)?;
            current = self.get(ancestor)?.parent;
        }
        Ok(())
    }

    /// Post-order recompute of every node in the subtree rooted at `start`,
    /// bottom-up. Used after a whole-subtree structural change (e.g.
    /// [`Tree::rotate`]) where every node's constraints may be stale, not
    /// just the mutated one.
    fn recompute_subtree(&mut self, start: NodeId) -> Result<(), TreeError> {
        let mut stack = vec![(start, false, 0_usize)];
        while let Some((id, processed, depth)) = stack.pop() {
            if depth > MAX_TREE_DEPTH {
                return Err(TreeError::DepthExceeded);
            }
            if processed {
                self.recompute_local(id)?;
                continue;
            }
            match &self.get(id)?.kind {
                NodeKind::Split { first, second, .. } => {
                    let (first, second) = (*first, *second);
                    stack.push((id, true, depth));
                    stack.push((second, false, depth + 1));
                    stack.push((first, false, depth + 1));
                },
                NodeKind::Leaf(_) | NodeKind::Receptacle => self.recompute_local(id)?,
            }
        }
        Ok(())
    }

    // ========================== Insertion ==========================

    /// The largest-area leaf (by rectangle) under the root that isn't
    /// marked private. `None` if every leaf is private or the tree is empty.
    fn largest_public_leaf(&self) -> Result<Option<NodeId>, TreeError> {
        let Some(root) = self.root else {
            return Ok(None);
        };
        let mut best: Option<(NodeId, u32)> = None;
        for leaf in self.leaves(root)? {
            let node = self.get(leaf)?;
            if node.private {
                continue;
            }
            let area = node.rectangle.area();
            if best.map_or(true, |(_, a)| area > a) {
                best = Some((leaf, area));
            }
        }
        Ok(best.map(|(id, _)| id))
    }

    /// Split type chosen by `scheme` for a node landing at `target` with no
    /// preselection (§4.3.3).
    fn automatic_split_type(&self, scheme: AutomaticScheme, target: NodeId) -> Result<SplitType, TreeError> {
        match scheme {
            AutomaticScheme::LongestSide => {
                let rect = self.get(target)?.rectangle;
                Ok(if rect.dimension.width >= rect.dimension.height {
                    SplitType::Horizontal
                } else {
                    SplitType::Vertical
                })
            },
            AutomaticScheme::Alternate => self.alternate_split_type(target),
            AutomaticScheme::Spiral => {
                // Approximates "rotate the ancestor subtree" with a
                // depth-parity alternation: full spiral geometry would need
                // a position-aware rotation of the ancestor chain, which is
                // out of scope for this insertion-time decision.
                let depth = self.depth(target)?;
                Ok(if depth % 2 == 0 { SplitType::Vertical } else { SplitType::Horizontal })
            },
        }
    }

    /// `alternate`: opposite orientation from the nearest non-vacant
    /// ancestor, falling back to the longest-side rule if there is none
    fn alternate_split_type(&self, target: NodeId) -> Result<SplitType, TreeError> {
        let mut current = self.get(target)?.parent;
        let mut steps = 0;
        while let Some(ancestor) = current {
            steps += 1;
            if steps > MAX_TREE_DEPTH {
                return Err(TreeError::DepthExceeded);
            }
            let node = self.get(ancestor)?;
            if !node.vacant {
                if let NodeKind::Split { split_type, .. } = node.kind {
                    return Ok(split_type.toggled());
                }
            }
            current = node.parent;
        }
        let rect = self.get(target)?.rectangle;
        Ok(if rect.dimension.width >= rect.dimension.height {
            SplitType::Horizontal
        } else {
            SplitType::Vertical
        })
    }

    /// Insert `client` into the tree (§4.3.3).
    ///
    /// - If the tree is empty, `client` becomes the sole leaf; every other
    ///   argument is ignored.
    /// - If `at`'s node is private and has no public sibling to land on
    ///   instead, a preselection is forced on it (east if wider than tall,
    ///   south otherwise) so the conflict resolves deterministically.
    /// - If `at`'s node is an empty receptacle with no preselection, `client`
    ///   replaces it in place rather than splitting it.
    /// - Otherwise a new internal node is created. `manual_dir`, if given,
    ///   picks the split direction directly (the caller's own preselection,
    ///   e.g. a keybinding-driven manual split); a latched [`Presel`] on the
    ///   target takes priority over it; with neither, `scheme` and `polarity`
    ///   decide orientation and which side `client` lands on.
    pub(crate) fn insert(
        &mut self,
        at: Option<NodeId>,
        client: Client,
        manual_dir: Option<Direction>,
        scheme: AutomaticScheme,
        polarity: ChildPolarity,
        ratio: f64,
    ) -> Result<NodeId, TreeError> {
        let Some(mut target) = at.or(self.root) else {
            let id = self.alloc(NodeKind::Leaf(client), None, Rectangle::zeroed());
            self.recompute_local(id)?;
            self.root = Some(id);
            self.focus = Some(id);
            return Ok(id);
        };

        if self.get(target)?.is_private() && self.get(target)?.presel().is_none() {
            if let Some(alt) = self.largest_public_leaf()? {
                target = alt;
            } else {
                let rect = self.get(target)?.rectangle;
                let dir = if rect.dimension.width >= rect.dimension.height {
                    Direction::East
                } else {
                    Direction::South
                };
                self.get_mut(target)?.set_presel(Presel::new(dir, ratio));
            }
        }

        if matches!(self.get(target)?.kind, NodeKind::Receptacle) && self.get(target)?.presel().is_none() {
            self.get_mut(target)?.kind = NodeKind::Leaf(client);
            self.recompute_local(target)?;
            self.propagate_flags_upward(target)?;
            self.focus = Some(target);
            return Ok(target);
        }

        if self.depth(target)? >= MAX_TREE_DEPTH - 1 {
            return Err(TreeError::DepthExceeded);
        }

        let target_node = self.get(target)?;
        let parent = target_node.parent;
        let rect = target_node.rectangle;
        let presel = target_node.presel;

        let (split_type, split_ratio, first_is_old) = if let Some(p) = presel {
            (SplitType::from_dir(p.split_dir), p.split_ratio, matches!(p.split_dir, Direction::South | Direction::East))
        } else if let Some(dir) = manual_dir {
            (SplitType::from_dir(dir), ratio, matches!(dir, Direction::South | Direction::East))
        } else {
            (self.automatic_split_type(scheme, target)?, ratio, matches!(polarity, ChildPolarity::Second))
        };

        let old_kind = std::mem::replace(&mut self.get_mut(target)?.kind, NodeKind::Receptacle);
        self.get_mut(target)?.clear_presel();

        let old_leaf = self.alloc(old_kind, Some(target), rect);
        let new_leaf = self.alloc(NodeKind::Leaf(client), Some(target), rect);

        let (first, second) = if first_is_old { (old_leaf, new_leaf) } else { (new_leaf, old_leaf) };

        let target_mut = self.get_mut(target)?;
        target_mut.kind = NodeKind::Split { split_type, split_ratio, first, second };
        target_mut.parent = parent;

        self.recompute_local(old_leaf)?;
        self.recompute_local(new_leaf)?;
        self.recompute_local(target)?;
        self.propagate_flags_upward(target)?;

        self.focus = Some(new_leaf);
        Ok(new_leaf)
    }

    // ========================== Removal ==========================

    /// Remove `id` and collapse its parent split, returning the removed
    /// client (if the leaf held one). The sibling takes over the parent's
    /// slot, so depth only ever decreases.
    pub(crate) fn remove(&mut self, id: NodeId) -> Result<Option<Client>, TreeError> {
        let node = self.get(id)?;
        let parent_id = node.parent;
        let removed_client = match &node.kind {
            NodeKind::Leaf(c) => Some(c.clone()),
            _ => None,
        };

        let Some(parent_id) = parent_id else {
            // Removing the root: tree becomes empty
            self.free_slot(id);
            self.root = None;
            self.focus = None;
            return Ok(removed_client);
        };

        let parent = self.get(parent_id)?;
        let NodeKind::Split { first, second, .. } = parent.kind else {
            return Err(TreeError::UnknownNode);
        };
        let sibling = if first == id { second } else { first };
        let grandparent = parent.parent;

        let sibling_kind = self.get(sibling)?.kind.clone();
        let sibling_rect = self.get(sibling)?.rectangle;

        self.free_slot(id);
        self.free_slot(sibling);

        let parent_mut = self.get_mut(parent_id)?;
        parent_mut.kind = sibling_kind;
        parent_mut.rectangle = sibling_rect;
        parent_mut.parent = grandparent;

        // Re-parent the sibling's own children (if it was itself a split)
        // onto `parent_id`, since the sibling's slot was freed.
        if let NodeKind::Split { first, second, .. } = self.get(parent_id)?.kind {
            if let Ok(n) = self.get_mut(first) {
                n.parent = Some(parent_id);
            }
            if let Ok(n) = self.get_mut(second) {
                n.parent = Some(parent_id);
            }
        }

        self.recompute_local(parent_id)?;
        self.propagate_flags_upward(parent_id)?;

        if self.focus == Some(id) {
            self.focus = self.leaves(parent_id).ok().and_then(|l| l.first().copied());
        }

        Ok(removed_client)
    }

    // ========================== Projection ==========================

    /// Compute each leaf's final rectangle and border width reachable from
    /// `start`, applying `ctx`'s gap/border/fullscreen/pseudo-tiled rules
    /// (§4.3.2 step 2) without mutating the tree's own rectangles (callers
    /// commit via [`Tree::commit_projection`]). Also rewrites each visited
    /// split's ratio if constraint clamping adjusted it. Depth-bounded via
    /// an explicit stack so a malformed tree can't cause unbounded
    /// recursion.
    pub(crate) fn project(&mut self, start: NodeId, rect: Rectangle, ctx: &ProjectContext) -> Result<Vec<Projected>, TreeError> {
        let mut out = Vec::new();
        let mut stack = vec![(start, rect, 0_usize)];

        while let Some((id, rect, depth)) = stack.pop() {
            if depth > MAX_TREE_DEPTH {
                return Err(TreeError::DepthExceeded);
            }
            let split_info = match &self.get(id)?.kind {
                NodeKind::Split { split_type, split_ratio, first, second } => Some((*split_type, *split_ratio, *first, *second)),
                NodeKind::Leaf(_) | NodeKind::Receptacle => None,
            };

            if let Some((split_type, split_ratio, first, second)) = split_info {
                let c1_vacant = self.get(first)?.vacant;
                let c2_vacant = self.get(second)?.vacant;
                let (r1, r2) = if ctx.layout == LayoutType::Monocle || c1_vacant || c2_vacant {
                    (rect, rect)
                } else {
                    let c1 = self.get(first)?.constraints;
                    let c2 = self.get(second)?.constraints;
                    let (r1, r2, new_ratio) = split_with_gap(rect, split_type, split_ratio, c1, c2, ctx.gap);
                    if let NodeKind::Split { split_ratio: stored, .. } = &mut self.get_mut(id)?.kind {
                        *stored = new_ratio;
                    }
                    (r1, r2)
                };
                stack.push((second, r2, depth + 1));
                stack.push((first, r1, depth + 1));
            } else if matches!(self.get(id)?.kind, NodeKind::Leaf(_)) {
                out.push(self.project_leaf(id, rect, ctx)?);
            }
        }

        Ok(out)
    }

    /// One leaf's final rectangle/border, per its [`ClientState`]. Fullscreen
    /// always wins the monitor rectangle regardless of what the split
    /// allotted it; this is why entering fullscreen (§4.3.7) only needs to
    /// update this one leaf rather than re-running [`Tree::project`] over
    /// the whole subtree (a sibling that received the vacant-collapse full
    /// rect from an *arrange* pass still keeps its own last-committed
    /// rectangle between arranges).
    fn project_leaf(&mut self, id: NodeId, rect: Rectangle, ctx: &ProjectContext) -> Result<Projected, TreeError> {
        let node = self.get(id)?;
        let client = node.client().ok_or(TreeError::UnknownNode)?;
        let state = client.state();

        let borderless = (ctx.borderless_monocle && ctx.layout == LayoutType::Monocle && matches!(state, ClientState::Tiled))
            || (ctx.borderless_singleton && ctx.only_window)
            || matches!(state, ClientState::Fullscreen);
        let border_width: u32 = if borderless { 0 } else { client.border_width() as u32 };
        let gap = if ctx.layout == LayoutType::Monocle { 0 } else { ctx.gap.max(0) as u32 };

        let mut projected = match state {
            ClientState::Tiled | ClientState::PsuedoTiled => {
                let bleed = gap.saturating_add(2 * border_width);
                let width = if bleed < rect.dimension.width { rect.dimension.width - bleed } else { 1 };
                let height = if bleed < rect.dimension.height { rect.dimension.height - bleed } else { 1 };
                let mut r = Rectangle::new(rect.point.x, rect.point.y, width, height);

                if matches!(state, ClientState::PsuedoTiled) {
                    let floating = client.floating_rectangle();
                    r.dimension.width = r.dimension.width.min(floating.dimension.width);
                    r.dimension.height = r.dimension.height.min(floating.dimension.height);
                    if ctx.center_pseudotiled {
                        let extra_w = rect.dimension.width.saturating_sub(gap).saturating_sub(r.dimension.width);
                        let extra_h = rect.dimension.height.saturating_sub(gap).saturating_sub(r.dimension.height);
                        r.point.x = rect.point.x - border_width as i32 + (extra_w / 2) as i32;
                        r.point.y = rect.point.y - border_width as i32 + (extra_h / 2) as i32;
                    }
                }
                r
            },
            ClientState::Floating => client.floating_rectangle(),
            ClientState::Fullscreen => ctx.monitor_rectangle,
        };

        let apply_hints = ctx.honor_size_hints || matches!(state, ClientState::Floating);
        if apply_hints {
            projected.dimension = client.size_hints().apply(projected.dimension);
        }

        if matches!(state, ClientState::Tiled | ClientState::PsuedoTiled | ClientState::Fullscreen) {
            if let Some(c) = self.get_mut(id)?.client_mut() {
                c.set_tiled_rectangle(projected);
            }
        }

        Ok(Projected { id, rectangle: projected, border_width })
    }

    /// Apply a computed projection back onto the tree's stored rectangles,
    /// so later calls to [`Node::rectangle`] reflect the latest arrangement.
    pub(crate) fn commit_projection(&mut self, projection: &[Projected]) {
        for p in projection {
            if let Ok(node) = self.get_mut(p.id) {
                node.rectangle = p.rectangle;
            }
        }
    }

    // ========================== Structural transforms ==========================

    /// Swap the flip order of every split in the subtree rooted at `id`
    /// along `flip_dir`: a split whose axis matches `flip_dir` has its
    /// children swapped and its ratio inverted; the other axis is left
    /// alone. No constraint rebuild is needed since neither axis nor the
    /// constraint-combining rule changes.
    pub(crate) fn flip(&mut self, id: NodeId, flip_dir: crate::core::Flip) -> Result<(), TreeError> {
        let mut stack = vec![(id, 0_usize)];
        while let Some((id, depth)) = stack.pop() {
            if depth > MAX_TREE_DEPTH {
                return Err(TreeError::DepthExceeded);
            }
            let (split_type, first, second) = match self.get(id)?.kind {
                NodeKind::Split { split_type, first, second, .. } => (split_type, first, second),
                _ => continue,
            };
            let swap = matches!(
                (flip_dir, split_type),
                (crate::core::Flip::Horizontal, SplitType::Horizontal) | (crate::core::Flip::Vertical, SplitType::Vertical)
            );
            if swap {
                if let NodeKind::Split { split_ratio, first, second, .. } = &mut self.get_mut(id)?.kind {
                    *split_ratio = 1.0 - *split_ratio;
                    std::mem::swap(first, second);
                }
            }
            stack.push((second, depth + 1));
            stack.push((first, depth + 1));
        }
        Ok(())
    }

    /// Rotate every split in the subtree rooted at `id` by `deg` (one of
    /// `90`, `180`, `270`). At each split, the children swap whenever the
    /// rotation would cross the node's axis (`180` always swaps; `90` swaps
    /// a `Horizontal` split, `270` swaps a `Vertical` one); swapping inverts
    /// the ratio. Unless `deg == 180`, the axis itself toggles too, which
    /// invalidates every constraint below the rotated node, so a full
    /// [`Tree::recompute_subtree`] runs afterward.
    pub(crate) fn rotate(&mut self, id: NodeId, deg: u16) -> Result<(), TreeError> {
        let toggles_axis = deg != 180;
        let mut stack = vec![(id, 0_usize)];
        while let Some((id, depth)) = stack.pop() {
            if depth > MAX_TREE_DEPTH {
                return Err(TreeError::DepthExceeded);
            }
            let (split_type, first, second) = match self.get(id)?.kind {
                NodeKind::Split { split_type, first, second, .. } => (split_type, first, second),
                _ => continue,
            };
            let swap = deg == 180
                || (deg == 90 && split_type == SplitType::Horizontal)
                || (deg == 270 && split_type == SplitType::Vertical);

            if let NodeKind::Split { split_type, split_ratio, first, second, .. } = &mut self.get_mut(id)?.kind {
                if swap {
                    *split_ratio = 1.0 - *split_ratio;
                    std::mem::swap(first, second);
                }
                if toggles_axis {
                    *split_type = split_type.toggled();
                }
            }

            stack.push((second, depth + 1));
            stack.push((first, depth + 1));
        }
        self.recompute_subtree(id)?;
        self.propagate_flags_upward(id)?;
        Ok(())
    }

    /// Reset every split ratio under `start` to 0.5, skipping vacant nodes
    pub(crate) fn equalize(&mut self, start: NodeId) -> Result<(), TreeError> {
        let mut stack = vec![(start, 0_usize)];
        while let Some((id, depth)) = stack.pop() {
            if depth > MAX_TREE_DEPTH {
                return Err(TreeError::DepthExceeded);
            }
            let node = self.get_mut(id)?;
            if node.vacant {
                continue;
            }
            if let NodeKind::Split { split_ratio, first, second, .. } = &mut node.kind {
                *split_ratio = 0.5;
                let (first, second) = (*first, *second);
                stack.push((second, depth + 1));
                stack.push((first, depth + 1));
            }
        }
        Ok(())
    }

    /// Set every split ratio under `start` proportionally to the leaf count
    /// on each side, so visually equal-weighted subtrees get equal area
    pub(crate) fn balance(&mut self, start: NodeId) -> Result<(), TreeError> {
        fn leaf_count(tree: &Tree, id: NodeId, depth: usize) -> Result<usize, TreeError> {
            if depth > MAX_TREE_DEPTH {
                return Err(TreeError::DepthExceeded);
            }
            match &tree.get(id)?.kind {
                NodeKind::Split { first, second, .. } => {
                    Ok(leaf_count(tree, *first, depth + 1)? + leaf_count(tree, *second, depth + 1)?)
                },
                NodeKind::Leaf(_) | NodeKind::Receptacle => Ok(1),
            }
        }

        let mut stack = vec![(start, 0_usize)];
        while let Some((id, depth)) = stack.pop() {
            if depth > MAX_TREE_DEPTH {
                return Err(TreeError::DepthExceeded);
            }
            let (first, second) = match self.get(id)?.kind {
                NodeKind::Split { first, second, .. } => (first, second),
                _ => continue,
            };
            let lc = leaf_count(self, first, 0)? as f64;
            let rc = leaf_count(self, second, 0)? as f64;
            if let NodeKind::Split { split_ratio, .. } = &mut self.get_mut(id)?.kind {
                *split_ratio = lc / (lc + rc);
            }
            stack.push((second, depth + 1));
            stack.push((first, depth + 1));
        }
        Ok(())
    }

    /// Adjust `id`'s parent split ratio by `delta`, clamped to `(0.0, 1.0)`
    pub(crate) fn change_ratio(&mut self, id: NodeId, delta: f64) -> Result<(), TreeError> {
        let parent = self.get(id)?.parent.ok_or(TreeError::UnknownNode)?;
        if let NodeKind::Split { split_ratio, .. } = &mut self.get_mut(parent)?.kind {
            *split_ratio = (*split_ratio + delta).clamp(0.01, 0.99);
        }
        Ok(())
    }

    // ========================== Swap / transfer ==========================

    /// Swap the subtrees rooted at `a` and `b` in place. Rejects the swap
    /// (leaving both trees untouched) if either is an ancestor of the other
    /// (would create a cycle), or if it would strand `self.focus` outside
    /// any leaf reachable from `self.root`.
    pub(crate) fn swap(&mut self, a: NodeId, b: NodeId) -> Result<(), TreeError> {
        if a == b {
            return Ok(());
        }
        self.get(a)?;
        self.get(b)?;

        if self.is_ancestor_of(a, b)? || self.is_ancestor_of(b, a)? {
            return Err(TreeError::WouldCycle);
        }

        let a_parent = self.get(a)?.parent;
        let b_parent = self.get(b)?.parent;

        if let Some(p) = a_parent {
            if let NodeKind::Split { first, second, .. } = &mut self.get_mut(p)?.kind {
                if *first == a {
                    *first = b;
                } else {
                    *second = b;
                }
            }
        } else {
            self.root = Some(b);
        }

        if let Some(p) = b_parent {
            if let NodeKind::Split { first, second, .. } = &mut self.get_mut(p)?.kind {
                if *first == b {
                    *first = a;
                } else {
                    *second = a;
                }
            }
        } else {
            self.root = Some(a);
        }

        self.get_mut(a)?.parent = b_parent;
        self.get_mut(b)?.parent = a_parent;

        if let Some(root) = self.root {
            if let Some(focus) = self.focus {
                let stranded = !self.leaves(root)?.contains(&focus);
                if stranded {
                    // undo: swap back before reporting the refusal
                    self.get_mut(a)?.parent = a_parent;
                    self.get_mut(b)?.parent = b_parent;
                    if let Some(p) = a_parent {
                        if let NodeKind::Split { first, second, .. } = &mut self.get_mut(p)?.kind {
                            if *first == b {
                                *first = a;
                            } else {
                                *second = a;
                            }
                        }
                    } else {
                        self.root = Some(a);
                    }
                    if let Some(p) = b_parent {
                        if let NodeKind::Split { first, second, .. } = &mut self.get_mut(p)?.kind {
                            if *first == a {
                                *first = b;
                            } else {
                                *second = b;
                            }
                        }
                    } else {
                        self.root = Some(b);
                    }
                    return Err(TreeError::WouldStrandFocus);
                }
            }
        }

        if let Some(p) = a_parent {
            self.recompute_local(p)?;
            self.propagate_flags_upward(p)?;
        }
        if let Some(p) = b_parent {
            self.recompute_local(p)?;
            self.propagate_flags_upward(p)?;
        }

        Ok(())
    }

    // ========================== State transitions ==========================

    pub(crate) fn set_hidden(&mut self, id: NodeId, hidden: bool) -> Result<(), TreeError> {
        self.get_mut(id)?.hidden = hidden;
        self.recompute_local(id)?;
        self.propagate_flags_upward(id)?;
        Ok(())
    }

    pub(crate) fn set_sticky(&mut self, id: NodeId, sticky: bool) -> Result<(), TreeError> {
        self.get_mut(id)?.sticky = sticky;
        Ok(())
    }

    pub(crate) fn set_private(&mut self, id: NodeId, private: bool) -> Result<(), TreeError> {
        self.get_mut(id)?.private = private;
        Ok(())
    }

    pub(crate) fn set_locked(&mut self, id: NodeId, locked: bool) -> Result<(), TreeError> {
        self.get_mut(id)?.locked = locked;
        Ok(())
    }

    pub(crate) fn set_marked(&mut self, id: NodeId, marked: bool) -> Result<(), TreeError> {
        self.get_mut(id)?.marked = marked;
        Ok(())
    }

    pub(crate) fn is_hidden(&self, id: NodeId) -> Result<bool, TreeError> {
        Ok(self.get(id)?.hidden)
    }

    pub(crate) fn is_sticky(&self, id: NodeId) -> Result<bool, TreeError> {
        Ok(self.get(id)?.sticky)
    }

    /// Transition `id`'s client to `new_state` (§4.3.7): records
    /// `last_state`/EWMH bit on the `Client` itself, flips `vacant` on
    /// entry/exit from `floating`/`fullscreen`, restacks at the new state's
    /// level, and on exit neutralizes any occluding fullscreen peer (demotes
    /// any peer above `id` in stacking order that is fullscreen back to its
    /// own `last_state`). Does not re-run [`Tree::project`]; entering
    /// fullscreen needs no split-level reflow (see [`Tree::project_leaf`]'s
    /// doc comment) and exiting one is expected to be followed by a normal
    /// `arrange()` call from the caller.
    pub(crate) fn transition_client_state(
        &mut self,
        id: NodeId,
        new_state: ClientState,
        stack: &mut crate::stack::StackingList,
    ) -> Result<(), TreeError> {
        let was_occluding = matches!(self.get(id)?.client().map(Client::state), Some(ClientState::Fullscreen));

        let window = {
            let node = self.get_mut(id)?;
            node.clear_presel();
            let client = node.client_mut().ok_or(TreeError::UnknownNode)?;
            client.set_state(new_state);
            client.window()
        };

        self.recompute_local(id)?;
        self.propagate_flags_upward(id)?;

        let level = {
            let client = self.get(id)?.client().ok_or(TreeError::UnknownNode)?;
            crate::stack::stack_level(client.layer(), client.state())
        };
        stack.insert(window, level);

        if was_occluding && !matches!(new_state, ClientState::Fullscreen) {
            self.neutralize_occluding_peers(id, stack)?;
        }

        Ok(())
    }

    /// Transition `id`'s client to `new_layer` (§4.3.7): updates the EWMH
    /// above/below bit, restacks, and neutralizes occluding peers
    pub(crate) fn transition_client_layer(
        &mut self,
        id: NodeId,
        new_layer: crate::stack::StackLayer,
        stack: &mut crate::stack::StackingList,
    ) -> Result<(), TreeError> {
        let window = {
            let node = self.get_mut(id)?;
            let client = node.client_mut().ok_or(TreeError::UnknownNode)?;
            client.set_layer(new_layer);
            client.window()
        };

        let level = {
            let client = self.get(id)?.client().ok_or(TreeError::UnknownNode)?;
            crate::stack::stack_level(client.layer(), client.state())
        };
        stack.insert(window, level);

        self.neutralize_occluding_peers(id, stack)?;
        Ok(())
    }

    /// Demote every fullscreen peer still above `id` in `stack` back to its
    /// own `last_state`, so a newly-unfullscreened or re-layered window
    /// isn't left hidden behind a stale fullscreen occluder.
    fn neutralize_occluding_peers(&mut self, id: NodeId, stack: &mut crate::stack::StackingList) -> Result<(), TreeError> {
        let Some(root) = self.root else {
            return Ok(());
        };
        let window = self.get(id)?.client().ok_or(TreeError::UnknownNode)?.window();

        for peer in self.clients(root)? {
            if peer == id {
                continue;
            }
            let peer_window = match self.get(peer)?.client() {
                Some(c) if c.is_fullscreen() => c.window(),
                _ => continue,
            };
            if !stack.is_above(peer_window, window) {
                continue;
            }
            let fallback = self.get(peer)?.client().map(Client::last_state).unwrap_or(ClientState::Tiled);
            if let Some(client) = self.get_mut(peer)?.client_mut() {
                client.set_state(fallback);
            }
            self.recompute_local(peer)?;
            self.propagate_flags_upward(peer)?;
            let level = {
                let c = self.get(peer)?.client().ok_or(TreeError::UnknownNode)?;
                crate::stack::stack_level(c.layer(), c.state())
            };
            stack.insert(peer_window, level);
        }
        Ok(())
    }
}

/// Compute the fence (the dividing coordinate along the split axis) from
/// `split_ratio`, clamped so neither child falls below its own minimum
/// (§3.5/B3). Returns the fence and the ratio that actually produced it (the
/// two differ only when clamping kicked in).
fn clamp_fence(axis_length: u32, ratio: f64, min1: u16, min2: u16) -> (u32, f64) {
    let mut fence = (axis_length as f64 * ratio) as u32;
    let min1 = u32::from(min1);
    let min2 = u32::from(min2);
    let mut new_ratio = ratio;

    if min1.saturating_add(min2) <= axis_length {
        let hi = axis_length.saturating_sub(min2);
        if fence < min1 {
            fence = min1;
            new_ratio = fence as f64 / axis_length.max(1) as f64;
        } else if fence > hi {
            fence = hi;
            new_ratio = fence as f64 / axis_length.max(1) as f64;
        }
    }
    (fence, new_ratio)
}

/// Split `rect` into its first/second child rectangles for `split_type` at
/// `split_ratio`. The gap is carved entirely out of the first child's
/// trailing edge: the fence itself (and therefore the second child's
/// position) is left at its raw, unshrunk value, so the visible gap between
/// siblings is exactly `gap` pixels (validated against spec's window-gap
/// scenario, which aligns the second child's edge at the unshrunk fence).
/// Saturating so a pathological ratio near 0/1 can't underflow the
/// dimension.
fn split_with_gap(
    rect: Rectangle,
    split_type: SplitType,
    ratio: f64,
    c1: Constraint,
    c2: Constraint,
    gap: i32,
) -> (Rectangle, Rectangle, f64) {
    let gap = gap.max(0) as u32;
    match split_type {
        SplitType::Horizontal => {
            let total = rect.dimension.width;
            let (fence, new_ratio) = clamp_fence(total, ratio, c1.min_width, c2.min_width);
            let first_len = fence.saturating_sub(gap).max(1).min(total);
            let r1 = Rectangle::new(rect.point.x, rect.point.y, first_len, rect.dimension.height);
            let r2 = Rectangle::new(
                rect.point.x.saturating_add(fence as i32),
                rect.point.y,
                total.saturating_sub(fence),
                rect.dimension.height,
            );
            (r1, r2, new_ratio)
        },
        SplitType::Vertical => {
            let total = rect.dimension.height;
            let (fence, new_ratio) = clamp_fence(total, ratio, c1.min_height, c2.min_height);
            let first_len = fence.saturating_sub(gap).max(1).min(total);
            let r1 = Rectangle::new(rect.point.x, rect.point.y, rect.dimension.width, first_len);
            let r2 = Rectangle::new(
                rect.point.x,
                rect.point.y.saturating_add(fence as i32),
                rect.dimension.width,
                total.saturating_sub(fence),
            );
            (r1, r2, new_ratio)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::client::Client;

    fn leaf_client() -> Client {
        Client::default()
    }

    fn ctx(gap: i32) -> ProjectContext {
        ProjectContext {
            monitor_rectangle:   Rectangle::new(0, 0, 1000, 800),
            layout:              LayoutType::Tiled,
            gap,
            borderless_monocle:  false,
            borderless_singleton: false,
            only_window:         false,
            center_pseudotiled:  true,
            honor_size_hints:    false,
        }
    }

    fn insert_east(tree: &mut Tree, at: Option<NodeId>, ratio: f64) -> NodeId {
        tree.insert(at, leaf_client(), Some(Direction::East), AutomaticScheme::LongestSide, ChildPolarity::Second, ratio)
            .unwrap()
    }

    #[test]
    fn insert_into_empty_tree_becomes_root() {
        let mut tree = Tree::new();
        let id = insert_east(&mut tree, None, 0.5);
        assert_eq!(tree.root(), Some(id));
        assert_eq!(tree.focus(), Some(id));
    }

    #[test]
    fn second_insert_creates_a_split() {
        let mut tree = Tree::new();
        let first = insert_east(&mut tree, None, 0.5);
        let second = insert_east(&mut tree, Some(first), 0.5);
        assert_ne!(first, second);
        let leaves = tree.leaves(tree.root().unwrap()).unwrap();
        assert_eq!(leaves.len(), 2);
    }

    #[test]
    fn remove_collapses_parent_split() {
        let mut tree = Tree::new();
        let first = insert_east(&mut tree, None, 0.5);
        let second = insert_east(&mut tree, Some(first), 0.5);
        tree.remove(second).unwrap();
        let leaves = tree.leaves(tree.root().unwrap()).unwrap();
        assert_eq!(leaves, vec![first]);
    }

    #[test]
    fn removing_the_only_leaf_empties_the_tree() {
        let mut tree = Tree::new();
        let id = insert_east(&mut tree, None, 0.5);
        tree.remove(id).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.focus(), None);
    }

    #[test]
    fn swap_rejects_ancestor_descendant_pairs() {
        let mut tree = Tree::new();
        let first = insert_east(&mut tree, None, 0.5);
        let _second = insert_east(&mut tree, Some(first), 0.5);
        let root = tree.root().unwrap();
        assert_eq!(tree.swap(root, first), Err(TreeError::WouldCycle));
    }

    #[test]
    fn projection_splits_the_rectangle_without_overlap() {
        let mut tree = Tree::new();
        let first = insert_east(&mut tree, None, 0.5);
        let _second = insert_east(&mut tree, Some(first), 0.5);
        let root = tree.root().unwrap();
        let rect = Rectangle::new(0, 0, 1000, 800);
        let projection = tree.project(root, rect, &ctx(0)).unwrap();
        assert_eq!(projection.len(), 2);
        let total: u32 = projection.iter().map(|p| p.rectangle.dimension.width).sum();
        assert_eq!(total, 1000);
    }

    /// Scenario S2: two tiled clients, no gap, 50/50 width split.
    #[test]
    fn scenario_s2_side_by_side_split_with_no_gap() {
        let mut tree = Tree::new();
        let w1 = insert_east(&mut tree, None, 0.5);
        let _w2 = insert_east(&mut tree, Some(w1), 0.5);
        let root = tree.root().unwrap();
        let projection = tree.project(root, Rectangle::new(0, 0, 1000, 800), &ctx(0)).unwrap();
        let by_id = |id| projection.iter().find(|p| p.id == id).unwrap().rectangle;
        assert_eq!(by_id(w1), Rectangle::new(0, 0, 500, 800));
    }

    /// Scenario S5: window-gap=10 on S2's layout carves the gap out of the
    /// first child only, leaving the second child's fence unshrunk.
    #[test]
    fn scenario_s5_window_gap_is_carved_from_the_first_child() {
        let mut tree = Tree::new();
        let w1 = insert_east(&mut tree, None, 0.5);
        let w2 = insert_east(&mut tree, Some(w1), 0.5);
        let root = tree.root().unwrap();
        let working_area = Rectangle::new(10, 10, 980, 780);
        let projection = tree.project(root, working_area, &ctx(10)).unwrap();
        let by_id = |id| projection.iter().find(|p| p.id == id).unwrap().rectangle;
        assert_eq!(by_id(w1), Rectangle::new(10, 10, 480, 780));
        assert_eq!(by_id(w2), Rectangle::new(500, 10, 490, 780));
    }

    /// Scenario S6: a fullscreen sibling doesn't force the other leaf off
    /// its last split-derived rectangle.
    #[test]
    fn scenario_s6_fullscreen_sibling_keeps_its_own_rect_via_targeted_transition() {
        let mut tree = Tree::new();
        let w1 = insert_east(&mut tree, None, 0.5);
        let w2 = insert_east(&mut tree, Some(w1), 0.5);
        let root = tree.root().unwrap();
        tree.project(root, Rectangle::new(0, 0, 1000, 800), &ctx(0))
            .map(|p| tree.commit_projection(&p))
            .unwrap();

        let mut stack = crate::stack::StackingList::new();
        stack.insert(tree.get(w1).unwrap().client().unwrap().window(), 1);
        stack.insert(tree.get(w2).unwrap().client().unwrap().window(), 2);
        tree.transition_client_state(w2, ClientState::Fullscreen, &mut stack).unwrap();

        assert!(tree.get(w2).unwrap().is_vacant());
        assert!(!tree.get(w1).unwrap().is_vacant());
        assert_eq!(tree.get(w1).unwrap().rectangle(), Rectangle::new(0, 0, 500, 800));
    }

    #[test]
    fn presel_hint_is_consumed_by_the_next_insert() {
        let mut tree = Tree::new();
        let first = insert_east(&mut tree, None, 0.5);
        tree.get_mut(first).unwrap().set_presel(Presel::new(Direction::North, 0.3));
        let _second = insert_east(&mut tree, Some(first), 0.5);
        assert!(tree.get(first).unwrap().presel().is_none());
        let root = tree.root().unwrap();
        if let NodeKind::Split { split_type, split_ratio, .. } = tree.get(root).unwrap().kind() {
            assert_eq!(*split_type, SplitType::Vertical);
            assert!((*split_ratio - 0.3).abs() < f64::EPSILON);
        } else {
            panic!("expected a split");
        }
    }

    #[test]
    fn depth_guard_rejects_insertion_past_the_limit() {
        let mut tree = Tree::new();
        let mut leaf = insert_east(&mut tree, None, 0.5);
        for _ in 0..MAX_TREE_DEPTH {
            leaf = insert_east(&mut tree, Some(leaf), 0.5);
        }
        assert_eq!(
            tree.insert(Some(leaf), leaf_client(), Some(Direction::East), AutomaticScheme::LongestSide, ChildPolarity::Second, 0.5),
            Err(TreeError::DepthExceeded)
        );
    }

    #[test]
    fn vacant_internal_node_requires_both_children_vacant() {
        let mut tree = Tree::new();
        let w1 = insert_east(&mut tree, None, 0.5);
        let w2 = insert_east(&mut tree, Some(w1), 0.5);
        let root = tree.root().unwrap();
        assert!(!tree.get(root).unwrap().is_vacant());

        tree.get_mut(w1).unwrap().client_mut().unwrap().set_state(ClientState::Floating);
        tree.get_mut(w2).unwrap().client_mut().unwrap().set_state(ClientState::Floating);
        tree.recompute_local(w1).unwrap();
        tree.recompute_local(w2).unwrap();
        tree.propagate_flags_upward(w1).unwrap();
        assert!(tree.get(root).unwrap().is_vacant());
    }

    #[test]
    fn automatic_scheme_longest_side_splits_along_the_wider_axis() {
        let mut tree = Tree::new();
        let w1 = tree
            .insert(None, leaf_client(), None, AutomaticScheme::LongestSide, ChildPolarity::Second, 0.5)
            .unwrap();
        tree.get_mut(w1).unwrap().rectangle = Rectangle::new(0, 0, 1000, 800);
        let w2 = tree
            .insert(Some(w1), leaf_client(), None, AutomaticScheme::LongestSide, ChildPolarity::Second, 0.5)
            .unwrap();
        let root = tree.root().unwrap();
        match tree.get(root).unwrap().kind() {
            NodeKind::Split { split_type, first, .. } => {
                assert_eq!(*split_type, SplitType::Horizontal);
                assert_eq!(*first, w1);
            },
            _ => panic!("expected a split"),
        }
        let _ = w2;
    }

    #[test]
    fn rotate_90_toggles_axis_and_inverts_ratio_on_a_horizontal_split() {
        let mut tree = Tree::new();
        let w1 = insert_east(&mut tree, None, 0.3);
        let _w2 = insert_east(&mut tree, Some(w1), 0.5);
        let root = tree.root().unwrap();
        tree.rotate(root, 90).unwrap();
        if let NodeKind::Split { split_type, split_ratio, .. } = tree.get(root).unwrap().kind() {
            assert_eq!(*split_type, SplitType::Vertical);
            assert!((*split_ratio - 0.7).abs() < f64::EPSILON);
        } else {
            panic!("expected a split");
        }
    }

    #[test]
    fn rotate_360_in_four_quarter_turns_is_the_identity() {
        let mut tree = Tree::new();
        let w1 = insert_east(&mut tree, None, 0.3);
        let _w2 = insert_east(&mut tree, Some(w1), 0.5);
        let root = tree.root().unwrap();
        let before = tree.get(root).unwrap().kind().clone();
        for _ in 0..4 {
            tree.rotate(root, 90).unwrap();
        }
        let after = tree.get(root).unwrap().kind().clone();
        match (before, after) {
            (
                NodeKind::Split { split_type: st1, split_ratio: sr1, first: f1, second: s1 },
                NodeKind::Split { split_type: st2, split_ratio: sr2, first: f2, second: s2 },
            ) => {
                assert_eq!(st1, st2);
                assert!((sr1 - sr2).abs() < f64::EPSILON);
                assert_eq!(f1, f2);
                assert_eq!(s1, s2);
            },
            _ => panic!("expected splits"),
        }
    }

    #[test]
    fn flip_horizontal_swaps_children_of_a_horizontal_split_only() {
        let mut tree = Tree::new();
        let w1 = insert_east(&mut tree, None, 0.5);
        let w2 = insert_east(&mut tree, Some(w1), 0.5);
        let root = tree.root().unwrap();
        tree.flip(root, crate::core::Flip::Horizontal).unwrap();
        if let NodeKind::Split { first, second, .. } = tree.get(root).unwrap().kind() {
            assert_eq!(*first, w2);
            assert_eq!(*second, w1);
        } else {
            panic!("expected a split");
        }
    }
}
