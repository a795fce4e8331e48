//! The single value grouping every piece of live, mutable window-manager
//! state: the monitor list, the stacking list, focus history, and the
//! pointer grab state. Replacing what would otherwise be a handful of
//! module-level globals with one `World` makes every mutation explicit
//! about what it touches, and keeps the pointer grab loop's re-entrancy
//! requirement (§4.6) checkable in one place.

use crate::{
    core::{AutomaticScheme, ChildPolarity, Direction, Window},
    geometry::Rectangle,
    history::{Coordinates, History},
    monitor::{
        client::Client,
        desktop::{Desktop, DesktopId, DesktopIdSource},
        Monitor, MonitorId, MonitorIdSource, MonitorList,
    },
    pointer::GrabState,
    stack::StackingList,
    tree::{NodeId, TreeError},
};

/// Everything the window manager knows, outside of the raw X11 connection
#[derive(Debug)]
pub(crate) struct World {
    monitors:     MonitorList,
    monitor_ids:  MonitorIdSource,
    desktop_ids:  DesktopIdSource,
    stack:        StackingList,
    history:      History,
    grab:         Option<GrabState>,
    client_count: usize,
}

impl World {
    pub(crate) fn new() -> Self {
        Self {
            monitors:     MonitorList::new(),
            monitor_ids:  MonitorIdSource::default(),
            desktop_ids:  DesktopIdSource::default(),
            stack:        StackingList::new(),
            history:      History::new(),
            grab:         None,
            client_count: 0,
        }
    }

    pub(crate) fn monitors(&self) -> &MonitorList {
        &self.monitors
    }

    pub(crate) fn monitors_mut(&mut self) -> &mut MonitorList {
        &mut self.monitors
    }

    pub(crate) fn stack(&self) -> &StackingList {
        &self.stack
    }

    pub(crate) fn stack_mut(&mut self) -> &mut StackingList {
        &mut self.stack
    }

    pub(crate) fn history(&self) -> &History {
        &self.history
    }

    pub(crate) fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub(crate) fn client_count(&self) -> usize {
        self.client_count
    }

    /// Add a new monitor and return its freshly minted id
    pub(crate) fn add_monitor(&mut self, name: impl Into<String>, randr_id: u32, rect: Rectangle) -> MonitorId {
        let id = self.monitor_ids.next();
        self.monitors.push(Monitor::new(id, name, randr_id, rect));
        id
    }

    /// Add a new desktop to `monitor` and return its id
    pub(crate) fn add_desktop(&mut self, monitor: MonitorId, name: impl Into<String>) -> Option<DesktopId> {
        let id = self.desktop_ids.next();
        let desktop = Desktop::new(id, name);
        self.monitors.find_mut(monitor)?.insert_desktop(desktop);
        Some(id)
    }

    /// Insert `client` onto `desktop`, bump the global client count, and
    /// record the resulting location in history. `dir` is always a manual
    /// split direction (the caller's own preselection); `scheme`/`polarity`
    /// only matter if a future caller passes `at: None` with no intention of
    /// honoring `dir`, since `Tree::insert` prefers a latched presel or
    /// `dir` over the automatic path whenever either is present.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn insert_client(
        &mut self,
        monitor: MonitorId,
        desktop: DesktopId,
        at: Option<NodeId>,
        client: Client,
        dir: Direction,
        scheme: AutomaticScheme,
        polarity: ChildPolarity,
        ratio: f64,
        exempt: bool,
    ) -> Result<NodeId, TreeError> {
        let target = self
            .monitors
            .find_mut(monitor)
            .and_then(|m| m.desktops_mut().find_mut(desktop))
            .ok_or(TreeError::UnknownNode)?;
        let id = target.insert_client(at, client, Some(dir), scheme, polarity, ratio, exempt)?;
        self.client_count += 1;
        self.history.add(Coordinates { monitor, desktop, node: Some(id) });
        Ok(id)
    }

    /// Remove `node` from `desktop`, refocusing from history if the removed
    /// node held the desktop's focus
    pub(crate) fn remove_client(
        &mut self,
        monitor: MonitorId,
        desktop: DesktopId,
        node: NodeId,
    ) -> Result<Option<Client>, TreeError> {
        let removed = {
            let target = self
                .monitors
                .find_mut(monitor)
                .and_then(|m| m.desktops_mut().find_mut(desktop))
                .ok_or(TreeError::UnknownNode)?;
            let removed = target.remove_node(node)?;
            if removed.is_some() {
                self.client_count = self.client_count.saturating_sub(1);
            }
            removed
        };
        self.history.remove_node(node);
        Ok(removed)
    }

    pub(crate) fn begin_grab(&mut self, grab: GrabState) -> bool {
        if self.grab.is_some() {
            return false;
        }
        self.grab = Some(grab);
        true
    }

    pub(crate) fn grab(&self) -> Option<&GrabState> {
        self.grab.as_ref()
    }

    pub(crate) fn grab_mut(&mut self) -> Option<&mut GrabState> {
        self.grab.as_mut()
    }

    pub(crate) fn end_grab(&mut self) -> Option<GrabState> {
        self.grab.take()
    }

    /// `true` while a pointer grab is active. Event dispatch must check this
    /// and restore tree invariants before recursing into another handler;
    /// see [`GrabState`]'s re-entrancy note.
    pub(crate) fn is_grabbing(&self) -> bool {
        self.grab.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_grab_refuses_a_second_concurrent_grab() {
        let mut world = World::new();
        assert!(world.begin_grab(GrabState::test_instance()));
        assert!(!world.begin_grab(GrabState::test_instance()));
        assert!(world.end_grab().is_some());
        assert!(world.begin_grab(GrabState::test_instance()));
    }

    #[test]
    fn insert_and_remove_client_updates_the_global_count() {
        let mut world = World::new();
        let monitor = world.add_monitor("eDP-1", 0, Rectangle::new(0, 0, 1920, 1080));
        let desktop = world.add_desktop(monitor, "I").unwrap();
        let id = world
            .insert_client(
                monitor,
                desktop,
                None,
                Client::default(),
                Direction::East,
                AutomaticScheme::LongestSide,
                ChildPolarity::Second,
                0.5,
                false,
            )
            .unwrap();
        assert_eq!(world.client_count(), 1);
        world.remove_client(monitor, desktop, id).unwrap();
        assert_eq!(world.client_count(), 0);
    }
}
