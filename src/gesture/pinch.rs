//! Pinch and rotate gestures
//!
//! Scale and angle are tracked together. Each axis starts in one-shot mode:
//! the first time it crosses its threshold the one-shot binding fires and the
//! gesture is done. If no one-shot binding exists the gesture falls through
//! into continuous mode, where every further threshold step fires the
//! continuous binding until none is bound.

use tracing::debug;

use super::{Binding, CommandResolver, DispatchOutcome, PinchAction, TriggerMode};

/// Scale reported by the touchpad when the fingers have not moved
pub const DEFAULT_SCALE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchThresholds {
    /// Relative scale change, e.g. 0.25 for 25%
    pub pinch: f64,
    /// Rotation in degrees
    pub rotate: f64,
}

/// State of the pinch currently in progress
#[derive(Debug, Clone, PartialEq)]
pub struct PinchRotateEvent {
    pub fingers: u32,
    /// Scale at the previous update
    pub scale: f64,
    /// Rotation accumulated since begin, in degrees
    pub angle: f64,
    /// Signed position on the continuous ladder
    pub step: i32,
    /// Nothing else fires in this gesture
    pub executed: bool,
    /// One-shot fell through to continuous triggering
    pub continuous: bool,
    /// Continuous triggering follows the angle instead of the scale
    pub rotating: bool,
}

impl Default for PinchRotateEvent {
    fn default() -> Self {
        Self {
            fingers: 0,
            scale: DEFAULT_SCALE,
            angle: 0.0,
            step: 0,
            executed: false,
            continuous: false,
            rotating: false,
        }
    }
}

impl PinchRotateEvent {
    pub fn begin(&mut self, fingers: u32) {
        *self = PinchRotateEvent {
            fingers,
            ..Default::default()
        };
    }

    /// Feed one pinch update: the absolute scale and the angle change
    pub fn update<R: CommandResolver + ?Sized>(
        &mut self,
        scale: f64,
        angle_delta: f64,
        thresholds: PinchThresholds,
        resolver: &mut R,
    ) {
        if self.executed {
            return;
        }

        let angle = self.angle + angle_delta;
        // Both axes climb the same ladder, so a pinch that falls through
        // here raises the rung the rotate has to reach
        if !self.continuous {
            self.one_shot_pinch(scale, thresholds.pinch, resolver);
            self.one_shot_rotate(angle, thresholds.rotate, resolver);
        } else if self.rotating {
            self.continuous_rotate(angle, thresholds.rotate, resolver);
        } else {
            self.continuous_pinch(scale, thresholds.pinch, resolver);
        }

        self.scale = scale;
        self.angle = angle;
    }

    fn one_shot_pinch<R: CommandResolver + ?Sized>(
        &mut self,
        scale: f64,
        threshold: f64,
        resolver: &mut R,
    ) {
        let action = if scale > self.scale && scale > 1.0 + threshold {
            PinchAction::Out
        } else if scale < self.scale && scale < 1.0 - threshold {
            PinchAction::In
        } else {
            return;
        };

        match self.fire(TriggerMode::OneShot, action, resolver) {
            DispatchOutcome::Dispatched => self.executed = true,
            DispatchOutcome::NoCommandBound => {
                self.advance(action);
                self.continuous_pinch(scale, threshold, resolver);
                self.continuous = true;
            }
        }
    }

    fn continuous_pinch<R: CommandResolver + ?Sized>(
        &mut self,
        scale: f64,
        threshold: f64,
        resolver: &mut R,
    ) {
        let trigger = 1.0 + threshold * ladder(self.step);
        debug!(scale, previous = self.scale, trigger, "Continuous pinch");

        let action = if scale > self.scale && scale >= trigger {
            PinchAction::Out
        } else if scale < self.scale && scale <= trigger {
            PinchAction::In
        } else {
            return;
        };

        match self.fire(TriggerMode::Continuous, action, resolver) {
            DispatchOutcome::Dispatched => self.advance(action),
            DispatchOutcome::NoCommandBound => self.executed = true,
        }
    }

    fn one_shot_rotate<R: CommandResolver + ?Sized>(
        &mut self,
        angle: f64,
        threshold: f64,
        resolver: &mut R,
    ) {
        // A pinch in this very update takes precedence
        if self.executed {
            return;
        }

        let action = if angle > self.angle && angle > threshold {
            PinchAction::RotateRight
        } else if angle < self.angle && angle < -threshold {
            PinchAction::RotateLeft
        } else {
            return;
        };

        match self.fire(TriggerMode::OneShot, action, resolver) {
            DispatchOutcome::Dispatched => self.executed = true,
            DispatchOutcome::NoCommandBound => {
                self.advance(action);
                self.continuous_rotate(angle, threshold, resolver);
                self.continuous = true;
                self.rotating = true;
            }
        }
    }

    fn continuous_rotate<R: CommandResolver + ?Sized>(
        &mut self,
        angle: f64,
        threshold: f64,
        resolver: &mut R,
    ) {
        let trigger = threshold * ladder(self.step);
        debug!(angle, previous = self.angle, trigger, "Continuous rotate");

        let action = if angle > self.angle && angle >= trigger {
            PinchAction::RotateRight
        } else if angle < self.angle && angle <= trigger {
            PinchAction::RotateLeft
        } else {
            return;
        };

        match self.fire(TriggerMode::Continuous, action, resolver) {
            DispatchOutcome::Dispatched => self.advance(action),
            DispatchOutcome::NoCommandBound => self.executed = true,
        }
    }

    /// Move one rung up (out, right) or down (in, left) the ladder
    fn advance(&mut self, action: PinchAction) {
        match action {
            PinchAction::Out | PinchAction::RotateRight => self.step += 1,
            PinchAction::In | PinchAction::RotateLeft => self.step -= 1,
        }
    }

    fn fire<R: CommandResolver + ?Sized>(
        &self,
        mode: TriggerMode,
        action: PinchAction,
        resolver: &mut R,
    ) -> DispatchOutcome {
        let outcome = resolver.resolve_and_run(self.fingers, Binding::Pinch(mode, action));
        debug!(
            fingers = self.fingers,
            ?mode,
            action = action.name(),
            step = self.step,
            ?outcome,
            "Pinch recognized"
        );
        outcome
    }
}

/// Rung multiplier for a step; step 0 counts as the first rung
fn ladder(step: i32) -> f64 {
    if step == 0 {
        1.0
    } else {
        f64::from(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const THRESHOLDS: PinchThresholds = PinchThresholds {
        pinch: 0.25,
        rotate: 20.0,
    };

    /// Resolver with a fixed set of bound actions
    #[derive(Default)]
    struct Bound {
        bound: HashSet<Binding>,
        calls: Vec<Binding>,
    }

    impl Bound {
        fn with(bindings: &[Binding]) -> Self {
            Self {
                bound: bindings.iter().copied().collect(),
                calls: Vec::new(),
            }
        }

        fn dispatched(&self) -> Vec<Binding> {
            self.calls
                .iter()
                .copied()
                .filter(|binding| self.bound.contains(binding))
                .collect()
        }
    }

    impl CommandResolver for Bound {
        fn resolve_and_run(&mut self, _fingers: u32, binding: Binding) -> DispatchOutcome {
            self.calls.push(binding);
            if self.bound.contains(&binding) {
                DispatchOutcome::Dispatched
            } else {
                DispatchOutcome::NoCommandBound
            }
        }
    }

    const ONESHOT_OUT: Binding = Binding::Pinch(TriggerMode::OneShot, PinchAction::Out);
    const ONESHOT_IN: Binding = Binding::Pinch(TriggerMode::OneShot, PinchAction::In);
    const CONT_OUT: Binding = Binding::Pinch(TriggerMode::Continuous, PinchAction::Out);
    const CONT_IN: Binding = Binding::Pinch(TriggerMode::Continuous, PinchAction::In);
    const ONESHOT_RIGHT: Binding = Binding::Pinch(TriggerMode::OneShot, PinchAction::RotateRight);
    const ONESHOT_LEFT: Binding = Binding::Pinch(TriggerMode::OneShot, PinchAction::RotateLeft);
    const CONT_RIGHT: Binding = Binding::Pinch(TriggerMode::Continuous, PinchAction::RotateRight);

    #[test]
    fn one_shot_pinch_out_fires_once() {
        let mut resolver = Bound::with(&[ONESHOT_OUT]);
        let mut pinch = PinchRotateEvent::default();
        pinch.begin(2);

        pinch.update(1.1, 0.0, THRESHOLDS, &mut resolver);
        assert!(resolver.calls.is_empty());

        pinch.update(1.3, 0.0, THRESHOLDS, &mut resolver);
        assert!(pinch.executed);
        assert!(!pinch.continuous);

        pinch.update(1.5, 0.0, THRESHOLDS, &mut resolver);
        assert_eq!(resolver.calls, vec![ONESHOT_OUT]);
    }

    #[test]
    fn one_shot_pinch_in() {
        let mut resolver = Bound::with(&[ONESHOT_IN]);
        let mut pinch = PinchRotateEvent::default();
        pinch.begin(2);

        pinch.update(0.9, 0.0, THRESHOLDS, &mut resolver);
        pinch.update(0.7, 0.0, THRESHOLDS, &mut resolver);
        assert!(pinch.executed);
        assert_eq!(resolver.calls, vec![ONESHOT_IN]);
    }

    #[test]
    fn unbound_one_shot_escalates_to_continuous() {
        let mut resolver = Bound::with(&[CONT_OUT]);
        let mut pinch = PinchRotateEvent::default();
        pinch.begin(2);

        // One-shot finds nothing, the continuous rung 1 (1.25) fires at once
        pinch.update(1.3, 0.0, THRESHOLDS, &mut resolver);
        assert!(pinch.continuous);
        assert!(!pinch.executed);
        assert_eq!(pinch.step, 2);
        assert_eq!(resolver.calls, vec![ONESHOT_OUT, CONT_OUT]);

        // Rung 2 sits at 1 + 0.25 * 2
        pinch.update(1.45, 0.0, THRESHOLDS, &mut resolver);
        assert_eq!(resolver.dispatched().len(), 1);
        pinch.update(1.6, 0.0, THRESHOLDS, &mut resolver);
        assert_eq!(resolver.dispatched(), vec![CONT_OUT, CONT_OUT]);
        assert_eq!(pinch.step, 3);
    }

    #[test]
    fn continuous_pinch_in_walks_down_the_ladder() {
        let mut resolver = Bound::with(&[CONT_IN]);
        let mut pinch = PinchRotateEvent::default();
        pinch.begin(3);

        pinch.update(0.7, 0.0, THRESHOLDS, &mut resolver);
        assert_eq!(pinch.step, -2);
        // Rung -2 sits at 1 - 0.25 * 2
        pinch.update(0.6, 0.0, THRESHOLDS, &mut resolver);
        assert_eq!(pinch.step, -2);
        pinch.update(0.5, 0.0, THRESHOLDS, &mut resolver);
        assert_eq!(pinch.step, -3);
        assert_eq!(resolver.dispatched(), vec![CONT_IN, CONT_IN]);
    }

    #[test]
    fn nothing_bound_stops_the_gesture() {
        let mut resolver = Bound::default();
        let mut pinch = PinchRotateEvent::default();
        pinch.begin(2);

        pinch.update(1.3, 0.0, THRESHOLDS, &mut resolver);
        assert!(pinch.executed);
        assert_eq!(resolver.calls, vec![ONESHOT_OUT, CONT_OUT]);

        pinch.update(2.0, 0.0, THRESHOLDS, &mut resolver);
        assert_eq!(resolver.calls.len(), 2);
    }

    #[test]
    fn pinch_suppresses_rotate_in_the_same_update() {
        let mut resolver = Bound::with(&[ONESHOT_OUT, ONESHOT_RIGHT]);
        let mut pinch = PinchRotateEvent::default();
        pinch.begin(2);

        pinch.update(1.4, 30.0, THRESHOLDS, &mut resolver);
        assert!(pinch.executed);
        assert_eq!(resolver.calls, vec![ONESHOT_OUT]);

        pinch.update(1.4, 30.0, THRESHOLDS, &mut resolver);
        assert_eq!(resolver.calls, vec![ONESHOT_OUT]);
    }

    #[test]
    fn pinch_and_rotate_share_the_ladder() {
        let mut resolver = Bound::with(&[CONT_OUT, CONT_RIGHT]);
        let mut pinch = PinchRotateEvent::default();
        pinch.begin(2);

        // Pinch falls through and fires rung 1, then the rotate falls
        // through on top of it and finds rung 3 (60 degrees) out of reach
        pinch.update(1.3, 30.0, THRESHOLDS, &mut resolver);
        assert_eq!(resolver.calls, vec![ONESHOT_OUT, CONT_OUT, ONESHOT_RIGHT]);
        assert_eq!(pinch.step, 3);
        assert!(pinch.rotating);

        pinch.update(1.3, 35.0, THRESHOLDS, &mut resolver);
        assert_eq!(resolver.dispatched(), vec![CONT_OUT, CONT_RIGHT]);
        assert_eq!(pinch.step, 4);
    }

    #[test]
    fn one_shot_rotate_in_both_directions() {
        let mut resolver = Bound::with(&[ONESHOT_RIGHT, ONESHOT_LEFT]);
        let mut pinch = PinchRotateEvent::default();
        pinch.begin(2);
        pinch.update(1.0, 12.0, THRESHOLDS, &mut resolver);
        pinch.update(1.0, 12.0, THRESHOLDS, &mut resolver);
        assert_eq!(resolver.calls, vec![ONESHOT_RIGHT]);

        pinch.begin(2);
        pinch.update(1.0, -25.0, THRESHOLDS, &mut resolver);
        assert_eq!(resolver.calls, vec![ONESHOT_RIGHT, ONESHOT_LEFT]);
    }

    #[test]
    fn rotating_back_does_not_count_as_left() {
        let mut resolver = Bound::with(&[ONESHOT_LEFT]);
        let mut pinch = PinchRotateEvent::default();
        pinch.begin(2);
        pinch.update(1.0, 15.0, THRESHOLDS, &mut resolver);
        pinch.update(1.0, -5.0, THRESHOLDS, &mut resolver);
        assert!(resolver.calls.is_empty());
    }

    #[test]
    fn continuous_rotate_takes_over_the_gesture() {
        let mut resolver = Bound::with(&[CONT_RIGHT]);
        let mut pinch = PinchRotateEvent::default();
        pinch.begin(2);

        pinch.update(1.0, 25.0, THRESHOLDS, &mut resolver);
        assert!(pinch.continuous);
        assert!(pinch.rotating);
        assert_eq!(pinch.step, 2);

        // Scale is no longer evaluated
        pinch.update(1.9, 0.0, THRESHOLDS, &mut resolver);
        assert_eq!(resolver.calls, vec![ONESHOT_RIGHT, CONT_RIGHT]);

        // 40 degrees reaches rung 2
        pinch.update(1.9, 16.0, THRESHOLDS, &mut resolver);
        assert_eq!(resolver.dispatched(), vec![CONT_RIGHT, CONT_RIGHT]);
        assert_eq!(pinch.angle, 41.0);
    }

    #[test]
    fn unchanged_scale_is_not_movement() {
        let mut resolver = Bound::with(&[CONT_OUT, CONT_IN]);
        let mut pinch = PinchRotateEvent::default();
        pinch.begin(2);
        pinch.update(1.3, 0.0, THRESHOLDS, &mut resolver);
        let calls = resolver.calls.len();

        pinch.update(1.3, 0.0, THRESHOLDS, &mut resolver);
        pinch.update(1.3, 1.0, THRESHOLDS, &mut resolver);
        assert_eq!(resolver.calls.len(), calls);
    }

    #[test]
    fn begin_resets_to_defaults() {
        let mut resolver = Bound::with(&[CONT_OUT]);
        let mut pinch = PinchRotateEvent::default();
        pinch.begin(2);
        pinch.update(1.6, 10.0, THRESHOLDS, &mut resolver);
        assert_ne!(pinch, PinchRotateEvent::default());

        pinch.begin(4);
        assert_eq!(
            pinch,
            PinchRotateEvent {
                fingers: 4,
                ..PinchRotateEvent::default()
            }
        );
    }
}
