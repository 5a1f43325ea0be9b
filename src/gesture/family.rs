//! Input family selection
//!
//! A machine may deliver both touchpad gestures and raw touchscreen
//! contacts. Only one family drives swipes at a time unless the user asked
//! for both; the tablet-mode switch flips between them at runtime.

use std::fmt;

use tracing::{debug, info};

use crate::backend::{DeviceCapabilities, DeviceInfo};
use crate::config::InteractType;
use crate::error::{GesturedError, GesturedResult};

use super::SwitchState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFamily {
    /// Touchpad gestures (swipe begin/update/end)
    Gesture,
    /// Touchscreen contacts (down/motion/up)
    Touch,
}

impl fmt::Display for InputFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFamily::Gesture => f.write_str("gesture"),
            InputFamily::Touch => f.write_str("touch"),
        }
    }
}

/// Decides whether an event of a given family reaches the state machines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyGate {
    active: InputFamily,
    /// Both families were requested explicitly
    both: bool,
}

impl FamilyGate {
    pub fn new(active: InputFamily) -> Self {
        Self {
            active,
            both: false,
        }
    }

    /// Gate that lets every family through
    pub fn both() -> Self {
        Self {
            active: InputFamily::Gesture,
            both: true,
        }
    }

    /// Pick the family from the configured override, or from the devices
    ///
    /// Without an override the first gesture-capable device wins; failing
    /// that, any touch-capable device selects the touch family.
    pub fn select(interact: InteractType, devices: &[DeviceInfo]) -> GesturedResult<Self> {
        let gate = match interact {
            InteractType::Both => Self::both(),
            InteractType::Gesture => Self::new(InputFamily::Gesture),
            InteractType::Touch => Self::new(InputFamily::Touch),
            InteractType::Auto => {
                let mut found = None;
                for device in devices {
                    debug!(device = %device.name, "Testing capabilities");
                    if device.capabilities.contains(DeviceCapabilities::GESTURE) {
                        found = Some(InputFamily::Gesture);
                        break;
                    }
                    if device.capabilities.contains(DeviceCapabilities::TOUCH) {
                        found = Some(InputFamily::Touch);
                    }
                }
                Self::new(found.ok_or(GesturedError::DeviceNotFound)?)
            }
        };

        if gate.both {
            info!("Using both gesture and touch events");
        } else {
            info!(family = %gate.active, "Using events from a single family");
        }
        Ok(gate)
    }

    /// Whether an event of `family` should be processed
    ///
    /// With both families enabled the most recent family becomes the active
    /// one, so swipes are attributed to the device that produced them.
    pub fn accepts(&mut self, family: InputFamily) -> bool {
        if self.both {
            self.active = family;
            return true;
        }
        self.active == family
    }

    /// Follow the laptop/tablet switch
    ///
    /// Returns whether the active family changed.
    pub fn toggle(&mut self, state: SwitchState) -> bool {
        let family = match state {
            SwitchState::Laptop => InputFamily::Gesture,
            SwitchState::Tablet => InputFamily::Touch,
        };
        if family == self.active {
            return false;
        }
        self.active = family;
        info!(family = %self.active, "Switched input family");
        true
    }

    pub fn active(&self) -> InputFamily {
        self.active
    }

    pub fn is_both(&self) -> bool {
        self.both
    }
}
