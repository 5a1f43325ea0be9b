//! Gesture recognition
//!
//! This module holds the per-gesture state machines and the vocabulary they
//! use to talk to the outside world:
//!
//! - [`direction`]: eight-way classification of a motion vector
//! - [`swipe`]: touchpad swipe gestures (begin / update / end)
//! - [`touch`]: touchscreen swipes tracked per finger slot
//! - [`pinch`]: pinch and rotate gestures with one-shot and continuous triggers
//! - [`family`]: which input family (touchpad gestures or touchscreen) is live
//!
//! A recognized gesture is handed to a [`CommandResolver`], which reports back
//! whether anything was bound to it. That answer drives the pinch/rotate
//! escalation from one-shot into continuous mode.

pub mod direction;
pub mod family;
pub mod pinch;
pub mod swipe;
pub mod touch;

pub use self::direction::Direction;
pub use self::family::{FamilyGate, InputFamily};
pub use self::pinch::PinchRotateEvent;
pub use self::swipe::SwipeEvent;
pub use self::touch::TouchGestureEvent;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a swipe came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeSource {
    /// Touchpad swipe reported by the gesture API
    Gesture,
    /// Touchscreen swipe assembled from touch slots
    Touch,
}

/// Trigger policy of a pinch or rotate binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerMode {
    /// Fires at most once per gesture
    OneShot,
    /// Fires every time the motion crosses the next step
    Continuous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinchAction {
    In = 1,
    Out = 2,
    RotateLeft = 3,
    RotateRight = 4,
}

impl PinchAction {
    pub const ALL: [PinchAction; 4] = [
        PinchAction::In,
        PinchAction::Out,
        PinchAction::RotateLeft,
        PinchAction::RotateRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PinchAction::In => "in",
            PinchAction::Out => "out",
            PinchAction::RotateLeft => "rotate_left",
            PinchAction::RotateRight => "rotate_right",
        }
    }
}

impl FromStr for PinchAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PinchAction::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| format!("Unknown pinch action: {s}"))
    }
}

/// What a recognized gesture can be bound to
///
/// Together with the finger count this is the full lookup key for a
/// command, so combinations that make no sense cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Swipe(SwipeSource, Direction),
    Pinch(TriggerMode, PinchAction),
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Swipe(SwipeSource::Gesture, direction) => write!(f, "swipe:{direction}"),
            Binding::Swipe(SwipeSource::Touch, direction) => write!(f, "touch:{direction}"),
            Binding::Pinch(TriggerMode::OneShot, action) => write!(f, "pinch:{}", action.name()),
            Binding::Pinch(TriggerMode::Continuous, action) => {
                write!(f, "pinch-continuous:{}", action.name())
            }
        }
    }
}

/// Position of the laptop/tablet mode switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchState {
    Laptop,
    Tablet,
}

impl SwitchState {
    pub fn name(self) -> &'static str {
        match self {
            SwitchState::Laptop => "laptop",
            SwitchState::Tablet => "tablet",
        }
    }
}

impl FromStr for SwitchState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "laptop" => Ok(SwitchState::Laptop),
            "tablet" => Ok(SwitchState::Tablet),
            _ => Err(format!("Unknown switch state: {s}")),
        }
    }
}

/// Answer of the command resolver for one trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A command was bound and has been launched
    Dispatched,
    /// Nothing is bound for this finger count and binding
    NoCommandBound,
}

impl DispatchOutcome {
    pub fn is_dispatched(self) -> bool {
        self == DispatchOutcome::Dispatched
    }
}

/// Turns recognized gestures into actions
///
/// Called synchronously from the recognition loop, once per trigger.
pub trait CommandResolver {
    /// Look up and launch whatever is bound to `binding` for `fingers`
    fn resolve_and_run(&mut self, fingers: u32, binding: Binding) -> DispatchOutcome;

    /// Launch whatever is bound to the given switch position
    fn run_switch(&mut self, _state: SwitchState) -> DispatchOutcome {
        DispatchOutcome::NoCommandBound
    }

    /// Called after every batch of events
    fn idle(&mut self) {}
}

impl<R: CommandResolver + ?Sized> CommandResolver for &mut R {
    fn resolve_and_run(&mut self, fingers: u32, binding: Binding) -> DispatchOutcome {
        (**self).resolve_and_run(fingers, binding)
    }

    fn run_switch(&mut self, state: SwitchState) -> DispatchOutcome {
        (**self).run_switch(state)
    }

    fn idle(&mut self) {
        (**self).idle()
    }
}
