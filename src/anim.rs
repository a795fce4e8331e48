//! Rectangle interpolation for window moves
//!
//! Projection hands a changed rectangle either straight to a server call or,
//! when animation is enabled, to this module: a linear interpolator keyed
//! by window id, canceling a window's in-flight animation whenever a new
//! target arrives before the old one finishes. Constants mirror bspwm's
//! `animation.c`.

use crate::{core::Window, geometry::{Point, Rectangle}};
use std::{collections::HashMap, time::Duration};

/// Upper bound on concurrently animating windows; further starts evict the
/// oldest entry rather than growing unbounded
const MAX_ANIMATIONS: usize = 64;
/// Moves shorter than this (in pixels, taxicab distance between origin and
/// target top-left corners) are applied immediately rather than animated
const MIN_ANIMATION_DISTANCE: i32 = 3;
/// Ceiling on how long a single animation is allowed to run
const MAX_ANIMATION_DURATION: Duration = Duration::from_millis(1000);

/// One window's in-flight interpolation
#[derive(Debug, Clone, Copy)]
struct Animation {
    from:     Rectangle,
    to:       Rectangle,
    started:  Duration,
    duration: Duration,
}

impl Animation {
    /// Linearly interpolated rectangle at `now`, or `None` once finished
    fn at(&self, now: Duration) -> Option<Rectangle> {
        if now >= self.started + self.duration {
            return None;
        }
        let elapsed = now.saturating_sub(self.started).as_secs_f64();
        let t = (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0);

        let lerp = |a: i32, b: i32| a + ((b - a) as f64 * t).round() as i32;
        let lerp_u = |a: u32, b: u32| (a as f64 + (b as f64 - a as f64) * t).round() as u32;

        Some(Rectangle {
            point:     Point::new(lerp(self.from.point.x, self.to.point.x), lerp(self.from.point.y, self.to.point.y)),
            dimension: crate::geometry::Dimension::new(
                lerp_u(self.from.dimension.width, self.to.dimension.width),
                lerp_u(self.from.dimension.height, self.to.dimension.height),
            ),
        })
    }
}

/// A keyed, cancel-on-retarget rectangle interpolator, ticked once per
/// event-loop iteration
#[derive(Debug, Default)]
pub(crate) struct Animator {
    animations: HashMap<Window, Animation>,
}

impl Animator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Start (or replace) `window`'s animation from `from` to `to`, taking
    /// `now` as the monotonic clock reading at call time. Distances under
    /// [`MIN_ANIMATION_DISTANCE`] are skipped: the caller should apply `to`
    /// immediately instead.
    pub(crate) fn retarget(&mut self, window: Window, from: Rectangle, to: Rectangle, now: Duration, duration: Duration) {
        let dx = (to.point.x - from.point.x).abs();
        let dy = (to.point.y - from.point.y).abs();
        if dx + dy < MIN_ANIMATION_DISTANCE {
            self.animations.remove(&window);
            return;
        }

        if self.animations.len() >= MAX_ANIMATIONS && !self.animations.contains_key(&window) {
            if let Some(oldest) = self.animations.iter().min_by_key(|(_, a)| a.started).map(|(w, _)| *w) {
                self.animations.remove(&oldest);
            }
        }

        self.animations.insert(
            window,
            Animation { from, to, started: now, duration: duration.min(MAX_ANIMATION_DURATION) },
        );
    }

    /// Cancel `window`'s animation, if any, e.g. because the client unmapped
    pub(crate) fn cancel(&mut self, window: Window) {
        self.animations.remove(&window);
    }

    /// Advance the clock to `now`, returning every window's current
    /// interpolated rectangle and dropping entries that finished
    pub(crate) fn tick(&mut self, now: Duration) -> Vec<(Window, Rectangle)> {
        let mut frame = Vec::with_capacity(self.animations.len());
        self.animations.retain(|&window, anim| match anim.at(now) {
            Some(rect) => {
                frame.push((window, rect));
                true
            },
            None => {
                frame.push((window, anim.to));
                false
            },
        });
        frame
    }

    pub(crate) fn is_animating(&self, window: Window) -> bool {
        self.animations.contains_key(&window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_moves_are_not_animated() {
        let mut anim = Animator::new();
        let from = Rectangle::new(0, 0, 100, 100);
        let to = Rectangle::new(1, 0, 100, 100);
        anim.retarget(1, from, to, Duration::ZERO, Duration::from_millis(200));
        assert!(!anim.is_animating(1));
    }

    #[test]
    fn animation_reaches_the_target_rectangle_at_completion() {
        let mut anim = Animator::new();
        let from = Rectangle::new(0, 0, 100, 100);
        let to = Rectangle::new(100, 0, 100, 100);
        anim.retarget(1, from, to, Duration::ZERO, Duration::from_millis(200));
        let frame = anim.tick(Duration::from_millis(200));
        assert_eq!(frame.len(), 1);
        assert_eq!(frame[0].1, to);
        assert!(!anim.is_animating(1));
    }

    #[test]
    fn retargeting_mid_flight_replaces_the_animation() {
        let mut anim = Animator::new();
        let from = Rectangle::new(0, 0, 100, 100);
        let mid = Rectangle::new(50, 0, 100, 100);
        let to = Rectangle::new(100, 0, 100, 100);
        anim.retarget(1, from, mid, Duration::ZERO, Duration::from_millis(200));
        anim.retarget(1, mid, to, Duration::from_millis(50), Duration::from_millis(200));
        let frame = anim.tick(Duration::from_millis(60));
        assert_eq!(frame.len(), 1);
        assert!(frame[0].1.point.x < to.point.x);
    }
}
