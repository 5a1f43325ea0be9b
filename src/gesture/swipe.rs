//! Touchpad swipe gestures

use tracing::debug;

use crate::config::GestureSettings;

use super::{Binding, CommandResolver, Direction, SwipeSource};

/// Horizontal distance, in unaccelerated touchpad units, of a threshold of 1.0
pub const SWIPE_X_THRESHOLD: f64 = 1000.0;
/// Vertical distance, in unaccelerated touchpad units, of a threshold of 1.0
pub const SWIPE_Y_THRESHOLD: f64 = 500.0;

/// State of the swipe currently in progress
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwipeEvent {
    pub fingers: u32,
    /// Motion accumulated since begin or since the last trigger
    pub dx: f64,
    pub dy: f64,
    /// Number of triggers so far; each one raises the next threshold
    pub step: u32,
    pub executed: bool,
}

impl SwipeEvent {
    pub fn begin(&mut self, fingers: u32) {
        *self = SwipeEvent {
            fingers,
            ..Default::default()
        };
    }

    /// Accumulate motion and fire once it crosses the current threshold
    ///
    /// Returns the direction that was fired, if any.
    pub fn update<R: CommandResolver + ?Sized>(
        &mut self,
        dx: f64,
        dy: f64,
        settings: &GestureSettings,
        resolver: &mut R,
    ) -> Option<Direction> {
        if settings.swipe_one_shot && self.executed {
            return None;
        }

        let scale = settings.swipe_threshold * f64::from(self.step + 1);
        let threshold_x = scale * SWIPE_X_THRESHOLD;
        let threshold_y = scale * SWIPE_Y_THRESHOLD;

        self.dx += dx;
        self.dy += dy;

        if self.dx.abs() <= threshold_x && self.dy.abs() <= threshold_y {
            return None;
        }

        let fired = self.trigger(resolver);
        self.dx = 0.0;
        self.dy = 0.0;
        self.executed = true;
        self.step += 1;
        fired
    }

    /// Finish the swipe, firing on release if nothing fired yet
    ///
    /// The event is reset whatever the outcome.
    pub fn end<R: CommandResolver + ?Sized>(
        &mut self,
        cancelled: bool,
        settings: &GestureSettings,
        resolver: &mut R,
    ) -> Option<Direction> {
        let fired = if !self.executed && !cancelled && settings.swipe_trigger_on_release {
            self.trigger(resolver)
        } else {
            None
        };
        *self = SwipeEvent::default();
        fired
    }

    fn trigger<R: CommandResolver + ?Sized>(&self, resolver: &mut R) -> Option<Direction> {
        let direction = Direction::classify(self.dx, self.dy);
        if direction == Direction::Center {
            debug!("Swipe without movement, ignoring");
            return None;
        }

        debug!(
            fingers = self.fingers,
            %direction,
            dx = self.dx,
            dy = self.dy,
            "Swipe recognized"
        );
        resolver.resolve_and_run(
            self.fingers,
            Binding::Swipe(SwipeSource::Gesture, direction),
        );
        Some(direction)
    }
}
