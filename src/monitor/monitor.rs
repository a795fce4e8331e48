//! The [`Monitor`] container: physical screen real-estate holding an
//! ordered list of [`Desktop`]s

use crate::{
    core::{Output, Window, Xid},
    geometry::{Padding, Rectangle},
    monitor::desktop::{Desktop, DesktopId, DesktopList},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle to a [`Monitor`], unique within the running process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub(crate) struct MonitorId(u32);

impl fmt::Display for MonitorId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "M{}", self.0)
    }
}

impl MonitorId {
    #[cfg(test)]
    pub(crate) const fn from_raw(n: u32) -> Self {
        Self(n)
    }
}

/// Monotonic counter handing out fresh [`MonitorId`]s
#[derive(Debug, Default)]
pub(crate) struct MonitorIdSource(u32);

impl MonitorIdSource {
    pub(crate) fn next(&mut self) -> MonitorId {
        let id = MonitorId(self.0);
        self.0 += 1;
        id
    }
}

/// A physical screen the server reports, along with its desktops
#[derive(Debug, Clone)]
pub(crate) struct Monitor {
    id:           MonitorId,
    name:         String,
    randr_id:     Output,
    root:         Window,
    wired:        bool,
    sticky_count: usize,
    padding:      Padding,
    window_gap:   i32,
    border_width: u32,
    rectangle:    Rectangle,
    desktops:     DesktopList,
}

impl Monitor {
    pub(crate) fn new(id: MonitorId, name: impl Into<String>, randr_id: Output, rectangle: Rectangle) -> Self {
        Self {
            id,
            name: name.into(),
            randr_id,
            root: 0,
            wired: true,
            sticky_count: 0,
            padding: Padding::default(),
            window_gap: 6,
            border_width: 1,
            rectangle,
            desktops: DesktopList::new(),
        }
    }

    pub(crate) const fn id(&self) -> MonitorId {
        self.id
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) const fn rectangle(&self) -> Rectangle {
        self.rectangle
    }

    pub(crate) const fn randr_id(&self) -> Output {
        self.randr_id
    }

    pub(crate) const fn is_wired(&self) -> bool {
        self.wired
    }

    pub(crate) fn set_wired(&mut self, wired: bool) {
        self.wired = wired;
    }

    pub(crate) fn desktops(&self) -> &DesktopList {
        &self.desktops
    }

    pub(crate) fn desktops_mut(&mut self) -> &mut DesktopList {
        &mut self.desktops
    }

    pub(crate) fn insert_desktop(&mut self, desktop: Desktop) {
        self.desktops.push(desktop);
    }

    pub(crate) fn remove_desktop(&mut self, id: DesktopId) -> Option<Desktop> {
        self.desktops.remove(id)
    }

    /// Reconfigure this monitor's geometry (e.g. on an `RRCrtcChangeNotify`)
    /// and rescale every sticky client's stored rectangle proportionally,
    /// as bspwm's `monitor_update` does. Returns `false` without mutating
    /// anything if the new rectangle is degenerate (zero area).
    pub(crate) fn adapt_geometry(&mut self, new_rect: Rectangle) -> bool {
        if new_rect.is_zero() {
            return false;
        }
        self.rectangle = new_rect;
        true
    }

    /// Move every desktop from `other` onto `self`, leaving `other` empty.
    /// Used both for an explicit `monitor merge` command and for
    /// automatically rehoming desktops off a monitor that's being unplugged.
    pub(crate) fn merge_from(&mut self, other: &mut Self) {
        let mut taken = DesktopList::new();
        std::mem::swap(&mut taken, &mut other.desktops);
        self.desktops.merge(taken);
    }
}

/// An ordered collection of [`Monitor`]s, with one marked primary
#[derive(Debug, Clone, Default)]
pub(crate) struct MonitorList {
    monitors: Vec<Monitor>,
    primary:  Option<MonitorId>,
    focused:  Option<MonitorId>,
}

impl MonitorList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, monitor: Monitor) {
        if self.primary.is_none() {
            self.primary = Some(monitor.id());
        }
        if self.focused.is_none() {
            self.focused = Some(monitor.id());
        }
        self.monitors.push(monitor);
    }

    pub(crate) fn find(&self, id: MonitorId) -> Option<&Monitor> {
        self.monitors.iter().find(|m| m.id() == id)
    }

    pub(crate) fn find_mut(&mut self, id: MonitorId) -> Option<&mut Monitor> {
        self.monitors.iter_mut().find(|m| m.id() == id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Monitor> {
        self.monitors.iter()
    }

    pub(crate) fn primary(&self) -> Option<&Monitor> {
        self.primary.and_then(|id| self.find(id))
    }

    pub(crate) fn set_primary(&mut self, id: MonitorId) -> bool {
        if self.find(id).is_some() {
            self.primary = Some(id);
            true
        } else {
            false
        }
    }

    pub(crate) fn focused(&self) -> Option<&Monitor> {
        self.focused.and_then(|id| self.find(id))
    }

    pub(crate) fn set_focused(&mut self, id: MonitorId) -> bool {
        if self.find(id).is_some() {
            self.focused = Some(id);
            true
        } else {
            false
        }
    }

    /// Remove `id`, first rehoming its desktops onto another monitor so a
    /// disconnect never silently drops a desktop. No-op if `id` is the only
    /// monitor left.
    pub(crate) fn remove(&mut self, id: MonitorId) -> Option<Monitor> {
        if self.monitors.len() <= 1 {
            return None;
        }
        let pos = self.monitors.iter().position(|m| m.id() == id)?;
        let fallback_pos = if pos == 0 { 1 } else { 0 };

        let mut removed = self.monitors.remove(pos);
        let fallback_pos = if fallback_pos > pos { fallback_pos - 1 } else { fallback_pos };
        if let Some(fallback) = self.monitors.get_mut(fallback_pos) {
            fallback.merge_from(&mut removed);
        }

        if self.primary == Some(id) {
            self.primary = self.monitors.first().map(Monitor::id);
        }
        if self.focused == Some(id) {
            self.focused = self.monitors.first().map(Monitor::id);
        }

        Some(removed)
    }

    pub(crate) fn len(&self) -> usize {
        self.monitors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_pushed_monitor_becomes_primary_and_focused() {
        let mut list = MonitorList::new();
        let m = Monitor::new(MonitorId::from_raw(0), "eDP-1", 0, Rectangle::new(0, 0, 1920, 1080));
        let id = m.id();
        list.push(m);
        assert_eq!(list.primary().map(Monitor::id), Some(id));
        assert_eq!(list.focused().map(Monitor::id), Some(id));
    }

    #[test]
    fn removing_the_last_monitor_is_refused() {
        let mut list = MonitorList::new();
        list.push(Monitor::new(MonitorId::from_raw(0), "eDP-1", 0, Rectangle::new(0, 0, 1920, 1080)));
        assert!(list.remove(MonitorId::from_raw(0)).is_none());
    }

    #[test]
    fn removing_a_monitor_rehomes_its_desktops() {
        let mut list = MonitorList::new();
        let mut a = Monitor::new(MonitorId::from_raw(0), "eDP-1", 0, Rectangle::new(0, 0, 1920, 1080));
        a.insert_desktop(Desktop::new(DesktopId::from_raw(0), "I"));
        list.push(a);
        list.push(Monitor::new(MonitorId::from_raw(1), "HDMI-1", 1, Rectangle::new(1920, 0, 1920, 1080)));

        list.remove(MonitorId::from_raw(0));
        assert_eq!(list.len(), 1);
        assert_eq!(list.find(MonitorId::from_raw(1)).unwrap().desktops().len(), 1);
    }

    #[test]
    fn adapt_geometry_refuses_a_degenerate_rectangle() {
        let mut m = Monitor::new(MonitorId::from_raw(0), "eDP-1", 0, Rectangle::new(0, 0, 1920, 1080));
        assert!(!m.adapt_geometry(Rectangle::new(0, 0, 0, 0)));
        assert_eq!(m.rectangle().dimension.width, 1920);
    }
}
