//! The [`Desktop`] container: one level above a [`Node`](crate::tree::Node)
//! and one level below a [`Monitor`](super::Monitor)

use crate::{
    core::{AutomaticScheme, ChildPolarity, Direction, LayoutType},
    geometry::{Padding, Rectangle},
    monitor::client::{Client, ClientState},
    tree::{Projected, ProjectContext, NodeId, Tree, TreeError},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle to a [`Desktop`], unique within the running process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub(crate) struct DesktopId(u32);

impl fmt::Display for DesktopId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "D{}", self.0)
    }
}

impl DesktopId {
    #[cfg(test)]
    pub(crate) const fn from_raw(n: u32) -> Self {
        Self(n)
    }
}

/// Monotonic counter handing out fresh [`DesktopId`]s
#[derive(Debug, Default)]
pub(crate) struct DesktopIdSource(u32);

impl DesktopIdSource {
    pub(crate) fn next(&mut self) -> DesktopId {
        let id = DesktopId(self.0);
        self.0 += 1;
        id
    }
}

/// One virtual desktop: a name, a [`Tree`] of nodes, and its own layout
/// policy and insets.
#[derive(Debug, Clone)]
pub(crate) struct Desktop {
    id:           DesktopId,
    name:         String,
    layout:       LayoutType,
    user_layout:  LayoutType,
    tree:         Tree,
    padding:      Padding,
    window_gap:   i32,
    border_width: u32,

    borderless_monocle:   bool,
    gapless_monocle:      bool,
    borderless_singleton: bool,
    center_pseudotiled:   bool,
    honor_size_hints:     bool,

    tile_limit_enabled:    bool,
    max_tiles_per_desktop: Option<usize>,
}

impl Desktop {
    pub(crate) fn new(id: DesktopId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            layout: LayoutType::Tiled,
            user_layout: LayoutType::Tiled,
            tree: Tree::new(),
            padding: Padding::default(),
            window_gap: 6,
            border_width: 1,
            borderless_monocle: false,
            gapless_monocle: false,
            borderless_singleton: false,
            center_pseudotiled: true,
            honor_size_hints: false,
            tile_limit_enabled: false,
            max_tiles_per_desktop: None,
        }
    }

    /// Adopt the subset of [`GlobalSettings`](crate::config::GlobalSettings)
    /// that shape this desktop's own geometry/insertion policy
    pub(crate) fn configure(&mut self, settings: &crate::config::GlobalSettings) {
        self.window_gap = settings.window_gap as i32;
        self.border_width = settings.border_width;
        self.padding = settings.padding;
        self.borderless_monocle = settings.borderless_monocle;
        self.gapless_monocle = settings.gapless_monocle;
        self.borderless_singleton = settings.borderless_singleton;
        self.center_pseudotiled = settings.center_pseudotiled;
        self.honor_size_hints = settings.honor_size_hints;
        self.tile_limit_enabled = settings.tile_limit_enabled;
        self.max_tiles_per_desktop = settings.max_tiles_per_desktop;
    }

    pub(crate) const fn id(&self) -> DesktopId {
        self.id
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) const fn layout(&self) -> LayoutType {
        self.layout
    }

    pub(crate) fn set_layout(&mut self, layout: LayoutType) {
        self.layout = layout;
    }

    /// Switch between the user's chosen layout and monocle, remembering
    /// what to restore
    pub(crate) fn toggle_monocle(&mut self) {
        self.layout = match self.layout {
            LayoutType::Monocle => self.user_layout,
            other => {
                self.user_layout = other;
                LayoutType::Monocle
            },
        };
    }

    pub(crate) const fn tree(&self) -> &Tree {
        &self.tree
    }

    pub(crate) fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// `true` if any client on this desktop is currently marked urgent
    pub(crate) fn is_urgent(&self) -> bool {
        let Some(root) = self.tree.root() else {
            return false;
        };
        self.tree
            .clients(root)
            .map(|ids| {
                ids.iter().any(|&id| {
                    self.tree
                        .get(id)
                        .ok()
                        .and_then(|n| n.client())
                        .map_or(false, |c| c.is_urgent())
                })
            })
            .unwrap_or(false)
    }

    /// Project every leaf's rectangle within `monitor_rectangle`, honoring
    /// this desktop's padding and the outer window gap (the gap applies to
    /// the working area's own margins, not just the space between
    /// siblings — skipped only when `gapless_monocle` is set and the
    /// desktop is in `Monocle` layout).
    pub(crate) fn arrange(&mut self, monitor_rectangle: Rectangle) -> Result<Vec<Projected>, TreeError> {
        let Some(root) = self.tree.root() else {
            return Ok(Vec::new());
        };

        let mut working_area = monitor_rectangle - self.padding;
        let skip_outer_gap = self.layout == LayoutType::Monocle && self.gapless_monocle;
        if !skip_outer_gap {
            let gap = self.window_gap.max(0);
            working_area = Rectangle::new(
                working_area.point.x.saturating_add(gap),
                working_area.point.y.saturating_add(gap),
                working_area.dimension.width.saturating_sub(2 * gap as u32),
                working_area.dimension.height.saturating_sub(2 * gap as u32),
            );
        }

        let only_window = self.tree.clients(root)?.len() <= 1;
        let ctx = ProjectContext {
            monitor_rectangle,
            layout: self.layout,
            gap: if skip_outer_gap { 0 } else { self.window_gap },
            borderless_monocle: self.borderless_monocle,
            borderless_singleton: self.borderless_singleton,
            only_window,
            center_pseudotiled: self.center_pseudotiled,
            honor_size_hints: self.honor_size_hints,
        };

        let projection = self.tree.project(root, working_area, &ctx)?;
        self.tree.commit_projection(&projection);
        Ok(projection)
    }

    /// Number of leaves on this desktop currently holding a `Tiled` client,
    /// used by the tile-limit coercion in [`Desktop::insert_client`]
    fn tiled_client_count(&self) -> Result<usize, TreeError> {
        let Some(root) = self.tree.root() else {
            return Ok(0);
        };
        Ok(self
            .tree
            .clients(root)?
            .into_iter()
            .filter(|&id| matches!(self.tree.get(id).ok().and_then(|n| n.client()).map(Client::state), Some(ClientState::Tiled)))
            .count())
    }

    /// Insert `client` into this desktop's tree (§4.3.3). `manual_dir`
    /// overrides `scheme`/`polarity`'s automatic dispatch when given (a
    /// user-issued split, e.g. from a keybinding). Unless `exempt`, a
    /// tiled-state client is coerced to `floating` if the desktop is
    /// already at its configured tile limit.
    pub(crate) fn insert_client(
        &mut self,
        at: Option<NodeId>,
        mut client: Client,
        manual_dir: Option<Direction>,
        scheme: AutomaticScheme,
        polarity: ChildPolarity,
        ratio: f64,
        exempt: bool,
    ) -> Result<NodeId, TreeError> {
        if self.tile_limit_enabled && !exempt && matches!(client.state(), ClientState::Tiled) {
            if let Some(max) = self.max_tiles_per_desktop {
                if self.tiled_client_count()? >= max {
                    client.set_state(ClientState::Floating);
                }
            }
        }
        self.tree.insert(at, client, manual_dir, scheme, polarity, ratio)
    }

    pub(crate) fn remove_node(&mut self, id: NodeId) -> Result<Option<Client>, TreeError> {
        self.tree.remove(id)
    }
}

/// An ordered collection of [`Desktop`]s belonging to one monitor, plus
/// which one is currently active
#[derive(Debug, Clone, Default)]
pub(crate) struct DesktopList {
    desktops: Vec<Desktop>,
    active:   Option<usize>,
}

impl DesktopList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, desktop: Desktop) {
        if self.active.is_none() {
            self.active = Some(self.desktops.len());
        }
        self.desktops.push(desktop);
    }

    pub(crate) fn active(&self) -> Option<&Desktop> {
        self.active.and_then(|i| self.desktops.get(i))
    }

    pub(crate) fn active_mut(&mut self) -> Option<&mut Desktop> {
        self.active.and_then(move |i| self.desktops.get_mut(i))
    }

    pub(crate) fn find(&self, id: DesktopId) -> Option<&Desktop> {
        self.desktops.iter().find(|d| d.id() == id)
    }

    pub(crate) fn find_mut(&mut self, id: DesktopId) -> Option<&mut Desktop> {
        self.desktops.iter_mut().find(|d| d.id() == id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Desktop> {
        self.desktops.iter()
    }

    /// Switch the active desktop to `id`. No-op (returns `false`) if `id`
    /// isn't in this list.
    pub(crate) fn activate(&mut self, id: DesktopId) -> bool {
        if let Some(pos) = self.desktops.iter().position(|d| d.id() == id) {
            self.active = Some(pos);
            true
        } else {
            false
        }
    }

    /// Remove and return the desktop with `id`, adjusting `active` so it
    /// still points at a valid index (or `None` if the list is now empty)
    pub(crate) fn remove(&mut self, id: DesktopId) -> Option<Desktop> {
        let pos = self.desktops.iter().position(|d| d.id() == id)?;
        let removed = self.desktops.remove(pos);
        self.active = match self.active {
            Some(a) if a > pos => Some(a - 1),
            Some(a) if a == pos => {
                if self.desktops.is_empty() {
                    None
                } else {
                    Some(pos.min(self.desktops.len() - 1))
                }
            },
            other => other,
        };
        Some(removed)
    }

    /// Swap the positions of two desktops (used when swapping desktops
    /// between monitors keeps relative ordering deterministic)
    pub(crate) fn swap(&mut self, a: DesktopId, b: DesktopId) -> bool {
        let (Some(pa), Some(pb)) = (
            self.desktops.iter().position(|d| d.id() == a),
            self.desktops.iter().position(|d| d.id() == b),
        ) else {
            return false;
        };
        self.desktops.swap(pa, pb);
        true
    }

    /// Append every desktop from `other` onto `self`, consuming `other`
    pub(crate) fn merge(&mut self, mut other: Self) {
        self.desktops.append(&mut other.desktops);
    }

    pub(crate) fn len(&self) -> usize {
        self.desktops.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.desktops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activating_an_unknown_desktop_is_a_noop() {
        let mut list = DesktopList::new();
        list.push(Desktop::new(DesktopId::from_raw(0), "I"));
        assert!(!list.activate(DesktopId::from_raw(99)));
    }

    #[test]
    fn removing_the_active_desktop_picks_a_neighbor() {
        let mut list = DesktopList::new();
        list.push(Desktop::new(DesktopId::from_raw(0), "I"));
        list.push(Desktop::new(DesktopId::from_raw(1), "II"));
        list.activate(DesktopId::from_raw(0));
        list.remove(DesktopId::from_raw(0));
        assert_eq!(list.active().map(Desktop::id), Some(DesktopId::from_raw(1)));
    }

    #[test]
    fn monocle_layout_collapses_every_client_to_the_working_area() {
        let mut d = Desktop::new(DesktopId::from_raw(0), "I");
        let first = d
            .insert_client(None, Client::default(), Some(Direction::East), AutomaticScheme::LongestSide, ChildPolarity::Second, 0.5, false)
            .unwrap();
        let _second = d
            .insert_client(
                Some(first),
                Client::default(),
                Some(Direction::East),
                AutomaticScheme::LongestSide,
                ChildPolarity::Second,
                0.5,
                false,
            )
            .unwrap();
        d.set_layout(LayoutType::Monocle);
        let screen = Rectangle::new(0, 0, 800, 600);
        let projection = d.arrange(screen).unwrap();
        assert_eq!(projection.len(), 2);
        assert!(projection.iter().all(|p| p.rectangle == projection[0].rectangle));
    }

    #[test]
    fn tile_limit_coerces_the_overflow_client_to_floating() {
        let mut d = Desktop::new(DesktopId::from_raw(0), "I");
        d.tile_limit_enabled = true;
        d.max_tiles_per_desktop = Some(1);
        let first = d
            .insert_client(None, Client::default(), Some(Direction::East), AutomaticScheme::LongestSide, ChildPolarity::Second, 0.5, false)
            .unwrap();
        let second = d
            .insert_client(
                Some(first),
                Client::default(),
                Some(Direction::East),
                AutomaticScheme::LongestSide,
                ChildPolarity::Second,
                0.5,
                false,
            )
            .unwrap();
        assert!(d.tree().get(second).unwrap().client().unwrap().is_floating());
    }
}
