//! State management module
//!
//! [`GestureState`] owns every in-flight gesture plus the resolver that
//! turns recognized gestures into commands. Event handlers live in
//! [`crate::input`].

use tracing::{debug, info};

use crate::backend::{DeviceCapabilities, DeviceInfo};
use crate::config::GestureSettings;
use crate::error::GesturedResult;
use crate::gesture::pinch::PinchThresholds;
use crate::gesture::touch::SurfaceSize;
use crate::gesture::{
    CommandResolver, FamilyGate, PinchRotateEvent, SwipeEvent, TouchGestureEvent,
};

pub struct GestureState<R: CommandResolver> {
    pub settings: GestureSettings,
    pub gate: FamilyGate,

    // in-flight gestures
    pub swipe: SwipeEvent,
    pub touch: TouchGestureEvent,
    pub pinch: PinchRotateEvent,

    /// Size of the touchscreen, used by the long-swipe check
    pub surface: Option<SurfaceSize>,
    pub resolver: R,
}

impl<R: CommandResolver> GestureState<R> {
    /// Set up recognition for the given devices
    ///
    /// Fails with [`DeviceNotFound`](crate::error::GesturedError::DeviceNotFound)
    /// when the input family has to be picked automatically and no device
    /// can produce gestures or touches.
    pub fn new(
        settings: GestureSettings,
        devices: &[DeviceInfo],
        resolver: R,
    ) -> GesturedResult<Self> {
        let gate = FamilyGate::select(settings.interact, devices)?;

        let surface = devices
            .iter()
            .filter(|device| device.capabilities.contains(DeviceCapabilities::TOUCH))
            .find_map(|device| device.size_mm)
            .map(|(width, height)| SurfaceSize { width, height });
        match surface {
            Some(size) => debug!(width = size.width, height = size.height, "Touch surface size"),
            None => debug!("Touch surface size unknown, long swipes are not checked"),
        }

        info!(settings = ?settings, "Gesture state initialized");
        Ok(Self {
            settings,
            gate,
            swipe: SwipeEvent::default(),
            touch: TouchGestureEvent::default(),
            pinch: PinchRotateEvent::default(),
            surface,
            resolver,
        })
    }

    pub fn pinch_thresholds(&self) -> PinchThresholds {
        PinchThresholds {
            pinch: self.settings.pinch_threshold,
            rotate: self.settings.rotate_threshold,
        }
    }

    pub fn into_resolver(self) -> R {
        self.resolver
    }
}
