//! The interactive pointer grab loop
//!
//! Once a grab starts (button-down over a client with the configured
//! modifier held), every subsequent `MotionNotify` until the matching
//! `ButtonRelease` is consumed here instead of being dispatched through the
//! normal event switch. The loop must leave the tree in a consistent state
//! before yielding control back to the event loop's dispatch, since a
//! motion event can itself trigger a nested desktop/monitor lookup.

use crate::{
    core::{Corner, DragType, Edge, Window},
    geometry::{Point, Rectangle},
    monitor::{desktop::DesktopId, MonitorId},
    tree::NodeId,
};

/// What a button-down-plus-modifier starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PointerActionKind {
    /// Just focuses the window under the pointer
    Focus,
    /// Moves the floating window under the pointer
    Move,
    /// Resizes using whichever edge is nearest the pointer
    ResizeSide(Edge),
    /// Resizes using whichever corner is nearest the pointer
    ResizeCorner(Corner),
}

/// The window being interacted with and where the interaction began
#[derive(Debug, Clone, Copy)]
pub(crate) struct GrabState {
    pub(crate) monitor:     MonitorId,
    pub(crate) desktop:     DesktopId,
    pub(crate) node:        NodeId,
    pub(crate) window:      Window,
    pub(crate) action:      PointerActionKind,
    pub(crate) origin:      Point,
    pub(crate) start_rect:  Rectangle,
    /// The rectangle a preview should snap to if the pointer is released
    /// right now, or `None` if no edge is currently within snapping range
    pub(crate) snap_target: Option<Rectangle>,
}

impl GrabState {
    pub(crate) const fn new(
        monitor: MonitorId,
        desktop: DesktopId,
        node: NodeId,
        window: Window,
        action: PointerActionKind,
        origin: Point,
        start_rect: Rectangle,
    ) -> Self {
        Self { monitor, desktop, node, window, action, origin, start_rect, snap_target: None }
    }

    #[cfg(test)]
    pub(crate) fn test_instance() -> Self {
        Self::new(
            crate::monitor::MonitorId::from_raw(0),
            DesktopId::from_raw(0),
            NodeId::from_raw_for_test(0),
            1,
            PointerActionKind::Move,
            Point::new(0, 0),
            Rectangle::zeroed(),
        )
    }

    /// Recompute this grab's target rectangle given the pointer's current
    /// position, snapping to `screen`'s edges within `snap_distance` pixels.
    pub(crate) fn drag_to(&mut self, pointer: Point, screen: Rectangle, snap_distance: i32) -> Rectangle {
        let delta = pointer.relative(self.origin);

        let rect = match self.action {
            PointerActionKind::Move => Rectangle {
                point:     Point::new(
                    self.start_rect.point.x.saturating_add(delta.x),
                    self.start_rect.point.y.saturating_add(delta.y),
                ),
                dimension: self.start_rect.dimension,
            },
            PointerActionKind::ResizeSide(edge) => resize_side(self.start_rect, edge, delta),
            PointerActionKind::ResizeCorner(corner) => resize_corner(self.start_rect, corner, delta),
            PointerActionKind::Focus => self.start_rect,
        };

        self.snap_target = snap_preview(rect, screen, snap_distance);
        rect
    }
}

/// Apply a side-resize delta to one edge of `rect`, keeping the opposite
/// edge fixed and never letting width/height underflow to negative.
fn resize_side(rect: Rectangle, edge: Edge, delta: Point) -> Rectangle {
    match edge {
        Edge::Left => Rectangle {
            point:     Point::new(rect.point.x.saturating_add(delta.x), rect.point.y),
            dimension: crate::geometry::Dimension::new(
                rect.dimension.width.saturating_sub(delta.x.max(0) as u32),
                rect.dimension.height,
            ),
        },
        Edge::Right => Rectangle {
            point:     rect.point,
            dimension: crate::geometry::Dimension::new(
                (rect.dimension.width as i32).saturating_add(delta.x).max(1) as u32,
                rect.dimension.height,
            ),
        },
        Edge::Top => Rectangle {
            point:     Point::new(rect.point.x, rect.point.y.saturating_add(delta.y)),
            dimension: crate::geometry::Dimension::new(
                rect.dimension.width,
                rect.dimension.height.saturating_sub(delta.y.max(0) as u32),
            ),
        },
        Edge::Bottom => Rectangle {
            point:     rect.point,
            dimension: crate::geometry::Dimension::new(
                rect.dimension.width,
                (rect.dimension.height as i32).saturating_add(delta.y).max(1) as u32,
            ),
        },
    }
}

/// Apply a corner-resize delta, which moves two edges at once
fn resize_corner(rect: Rectangle, corner: Corner, delta: Point) -> Rectangle {
    let (h_edge, v_edge) = match corner {
        Corner::TopLeft => (Edge::Left, Edge::Top),
        Corner::TopRight => (Edge::Right, Edge::Top),
        Corner::BottomLeft => (Edge::Left, Edge::Bottom),
        Corner::BottomRight => (Edge::Right, Edge::Bottom),
    };
    let horiz = resize_side(rect, h_edge, delta);
    let vert = resize_side(rect, v_edge, delta);
    Rectangle {
        point:     Point::new(horiz.point.x, vert.point.y),
        dimension: crate::geometry::Dimension::new(horiz.dimension.width, vert.dimension.height),
    }
}

/// If `rect` is within `snap_distance` of any of `screen`'s four edges,
/// return the rectangle it would snap to on release
fn snap_preview(rect: Rectangle, screen: Rectangle, snap_distance: i32) -> Option<Rectangle> {
    let near_left = (rect.point.x - screen.point.x).abs() <= snap_distance;
    let near_top = (rect.point.y - screen.point.y).abs() <= snap_distance;
    let right_edge = screen.point.x + screen.dimension.width as i32;
    let bottom_edge = screen.point.y + screen.dimension.height as i32;
    let near_right = (rect.top_right().x - right_edge).abs() <= snap_distance;
    let near_bottom = (rect.bottom_left().y - bottom_edge).abs() <= snap_distance;

    if !(near_left || near_top || near_right || near_bottom) {
        return None;
    }

    let mut snapped = rect;
    if near_left {
        snapped.point.x = screen.point.x;
    }
    if near_top {
        snapped.point.y = screen.point.y;
    }
    if near_right {
        snapped.point.x = right_edge - rect.dimension.width as i32;
    }
    if near_bottom {
        snapped.point.y = bottom_edge - rect.dimension.height as i32;
    }
    Some(snapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_side_right_grows_width_without_moving_the_origin() {
        let rect = Rectangle::new(0, 0, 100, 100);
        let resized = resize_side(rect, Edge::Right, Point::new(20, 0));
        assert_eq!(resized.point.x, 0);
        assert_eq!(resized.dimension.width, 120);
    }

    #[test]
    fn resize_side_never_collapses_past_one_pixel() {
        let rect = Rectangle::new(0, 0, 100, 100);
        let resized = resize_side(rect, Edge::Right, Point::new(-500, 0));
        assert_eq!(resized.dimension.width, 1);
    }

    #[test]
    fn snap_preview_detects_the_nearest_screen_edge() {
        let screen = Rectangle::new(0, 0, 1920, 1080);
        let rect = Rectangle::new(3, 500, 400, 300);
        let snapped = snap_preview(rect, screen, 10).expect("should snap to the left edge");
        assert_eq!(snapped.point.x, 0);
    }

    #[test]
    fn snap_preview_is_none_when_nothing_is_near_an_edge() {
        let screen = Rectangle::new(0, 0, 1920, 1080);
        let rect = Rectangle::new(500, 500, 400, 300);
        assert!(snap_preview(rect, screen, 10).is_none());
    }
}
