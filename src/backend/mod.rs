//! Event sources feeding the recognition engine
//!
//! A source reports the devices it watches once, then hands out batches of
//! events until it runs dry. The live source reads libinput; the replay
//! source reads recorded sessions and is what the tests drive.

#[cfg(feature = "libinput")]
pub mod libinput;
pub mod replay;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::GesturedResult;
use crate::gesture::{CommandResolver, SwitchState};
use crate::state::GestureState;

bitflags! {
    /// Event families a device can produce
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct DeviceCapabilities: u32 {
        /// Touchpad gestures
        const GESTURE = 1 << 0;
        /// Touchscreen contacts
        const TOUCH = 1 << 1;
        /// Lid or tablet-mode switch
        const SWITCH = 1 << 2;
    }
}

/// An input device as seen at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub name: String,
    pub capabilities: DeviceCapabilities,
    /// Physical width and height in millimetres, when the device knows it
    #[serde(default)]
    pub size_mm: Option<(f64, f64)>,
}

/// Input events the engine understands
///
/// Touch positions are in millimetres from the top left corner of the
/// touch surface, matching [`DeviceInfo::size_mm`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    SwipeBegin {
        fingers: u32,
    },
    SwipeUpdate {
        fingers: u32,
        dx: f64,
        dy: f64,
    },
    SwipeEnd {
        fingers: u32,
        #[serde(default)]
        cancelled: bool,
    },
    PinchBegin {
        fingers: u32,
    },
    PinchUpdate {
        fingers: u32,
        scale: f64,
        #[serde(default)]
        angle_delta: f64,
    },
    PinchEnd {
        fingers: u32,
        #[serde(default)]
        cancelled: bool,
    },
    TouchDown {
        slot: u32,
        time_msec: u64,
    },
    TouchMotion {
        slot: u32,
        time_msec: u64,
        x: f64,
        y: f64,
    },
    TouchUp {
        slot: u32,
        time_msec: u64,
    },
    TouchCancel,
    SwitchToggle {
        state: SwitchState,
    },
}

/// Something that produces input events
pub trait EventSource {
    /// Devices known to this source
    fn devices(&self) -> &[DeviceInfo];

    /// Next batch of events
    ///
    /// Blocks until events are available. `Ok(None)` means the source is
    /// exhausted and the loop should stop.
    fn next_batch(&mut self) -> GesturedResult<Option<Vec<InputEvent>>>;
}

/// Feed every event of `source` through `state` until the source runs dry
pub fn run<S, R>(source: &mut S, state: &mut GestureState<R>) -> GesturedResult<()>
where
    S: EventSource + ?Sized,
    R: CommandResolver,
{
    info!("Starting gesture event loop");
    let mut batches = 0usize;
    while let Some(batch) = source.next_batch()? {
        profiling::scope!("event batch");
        batches += 1;
        debug!(events = batch.len(), "Processing event batch");
        for event in batch {
            state.process_input_event(event);
        }
        state.resolver.idle();
    }
    info!(batches, "Event source exhausted");
    Ok(())
}
