//! Laptop/tablet mode switch handling

use tracing::{debug, info};

use crate::gesture::{CommandResolver, SwipeEvent, SwitchState};
use crate::state::GestureState;

impl<R: CommandResolver> GestureState<R> {
    /// Handle the tablet-mode switch flipping
    ///
    /// Moves the family gate to the family that fits the new mode, unless
    /// both families are enabled, then runs the bound switch command.
    /// Gestures in flight are dropped when the family changes, since the
    /// gate would swallow the events that end them.
    pub fn on_switch_toggle(&mut self, state: SwitchState) {
        info!(state = state.name(), "Tablet mode switch toggled");
        if !self.gate.is_both() && self.gate.toggle(state) {
            if !self.touch.is_idle() {
                debug!("Dropping touch gesture in progress");
            }
            self.touch.cancel();
            self.swipe = SwipeEvent::default();
        }
        self.resolver.run_switch(state);
    }
}
