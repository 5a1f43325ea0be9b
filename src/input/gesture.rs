//! Gesture input handling

use tracing::{debug, trace};

use crate::gesture::CommandResolver;
use crate::state::GestureState;

impl<R: CommandResolver> GestureState<R> {
    /// Handle gesture swipe begin
    pub fn on_gesture_swipe_begin(&mut self, fingers: u32) {
        trace!(fingers, "Swipe begin");
        self.swipe.begin(fingers);
    }

    /// Handle gesture swipe update
    pub fn on_gesture_swipe_update(&mut self, dx: f64, dy: f64) {
        if let Some(direction) = self
            .swipe
            .update(dx, dy, &self.settings, &mut self.resolver)
        {
            debug!(%direction, step = self.swipe.step, "Swipe triggered during motion");
        }
    }

    /// Handle gesture swipe end
    pub fn on_gesture_swipe_end(&mut self, cancelled: bool) {
        if let Some(direction) = self
            .swipe
            .end(cancelled, &self.settings, &mut self.resolver)
        {
            debug!(%direction, "Swipe triggered on release");
        }
    }

    /// Handle gesture pinch begin
    pub fn on_gesture_pinch_begin(&mut self, fingers: u32) {
        trace!(fingers, "Pinch begin");
        self.pinch.begin(fingers);
    }

    /// Handle gesture pinch update
    pub fn on_gesture_pinch_update(&mut self, scale: f64, angle_delta: f64) {
        let thresholds = self.pinch_thresholds();
        self.pinch
            .update(scale, angle_delta, thresholds, &mut self.resolver);
    }

    /// Handle gesture pinch end
    ///
    /// The pinch state is left alone; the next begin resets it.
    pub fn on_gesture_pinch_end(&mut self, cancelled: bool) {
        trace!(
            cancelled,
            executed = self.pinch.executed,
            step = self.pinch.step,
            "Pinch end"
        );
    }
}
