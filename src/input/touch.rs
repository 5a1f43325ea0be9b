//! Touch input handling

use tracing::debug;

use crate::gesture::touch::TouchOutcome;
use crate::gesture::{Binding, CommandResolver, SwipeSource};
use crate::state::GestureState;

impl<R: CommandResolver> GestureState<R> {
    /// Handle touch down events
    pub fn on_touch_down(&mut self, slot: u32, time_msec: u64) {
        self.touch.down(slot, time_msec);
    }

    /// Handle touch motion events
    pub fn on_touch_motion(&mut self, slot: u32, x: f64, y: f64) {
        self.touch.motion(slot, x, y);
    }

    /// Handle touch up events
    pub fn on_touch_up(&mut self, slot: u32, time_msec: u64) {
        let outcome = self.touch.up(
            slot,
            time_msec,
            self.settings.longswipe_percentage,
            self.surface,
        );
        self.on_touch_outcome(outcome);
    }

    /// Handle touch cancel events
    pub fn on_touch_cancel(&mut self) {
        let outcome = self.touch.cancel();
        self.on_touch_outcome(outcome);
    }

    fn on_touch_outcome(&mut self, outcome: TouchOutcome) {
        match outcome {
            TouchOutcome::Pending => {}
            TouchOutcome::Discarded(reason) => debug!("Touch gesture discarded: {reason}"),
            TouchOutcome::Swipe { fingers, direction } => {
                debug!(fingers, %direction, "Touch swipe recognized");
                self.resolver
                    .resolve_and_run(fingers, Binding::Swipe(SwipeSource::Touch, direction));
            }
        }
    }
}
