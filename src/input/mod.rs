//! Input handling module for gestured
//!
//! This module routes input events to the gesture state machines. Swipe and
//! touch events pass through the family gate first; pinch and switch
//! events always get through.

mod gesture;
mod switch;
mod touch;

use tracing::trace;

use crate::backend::InputEvent;
use crate::gesture::{CommandResolver, InputFamily};
use crate::state::GestureState;

impl<R: CommandResolver> GestureState<R> {
    /// Process one input event
    pub fn process_input_event(&mut self, event: InputEvent) {
        let family = match &event {
            InputEvent::SwipeBegin { .. }
            | InputEvent::SwipeUpdate { .. }
            | InputEvent::SwipeEnd { .. } => Some(InputFamily::Gesture),
            InputEvent::TouchDown { .. }
            | InputEvent::TouchMotion { .. }
            | InputEvent::TouchUp { .. }
            | InputEvent::TouchCancel => Some(InputFamily::Touch),
            _ => None,
        };
        if let Some(family) = family {
            if !self.gate.accepts(family) {
                trace!(%family, "Dropping event from inactive family");
                return;
            }
        }

        match event {
            InputEvent::SwipeBegin { fingers } => self.on_gesture_swipe_begin(fingers),
            InputEvent::SwipeUpdate { dx, dy, .. } => self.on_gesture_swipe_update(dx, dy),
            InputEvent::SwipeEnd { cancelled, .. } => self.on_gesture_swipe_end(cancelled),
            InputEvent::PinchBegin { fingers } => self.on_gesture_pinch_begin(fingers),
            InputEvent::PinchUpdate {
                scale, angle_delta, ..
            } => self.on_gesture_pinch_update(scale, angle_delta),
            InputEvent::PinchEnd { cancelled, .. } => self.on_gesture_pinch_end(cancelled),
            InputEvent::TouchDown { slot, time_msec } => self.on_touch_down(slot, time_msec),
            InputEvent::TouchMotion { slot, x, y, .. } => self.on_touch_motion(slot, x, y),
            InputEvent::TouchUp { slot, time_msec } => self.on_touch_up(slot, time_msec),
            InputEvent::TouchCancel => self.on_touch_cancel(),
            InputEvent::SwitchToggle { state } => self.on_switch_toggle(state),
        }
    }
}
