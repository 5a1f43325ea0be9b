//! Touchscreen swipes assembled from individual finger slots
//!
//! Touchscreens report every contact separately. A multi-finger swipe is
//! accepted only when the fingers land and lift close together in time, and
//! when every finger moved in the same direction.

use std::fmt;

use tracing::debug;

use super::Direction;

/// Maximum gap between two fingers landing (or lifting) in one gesture
pub const SYNC_THRESHOLD_MSEC: u64 = 100;

/// Physical size of a touch surface, in the unit of its touch coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }
}

/// Motion of one finger slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotMotion {
    pub slot: u32,
    /// Last reported absolute position
    pub position: (f64, f64),
    /// Motion accumulated since the first report
    pub delta: (f64, f64),
}

/// Why a completed touch gesture was thrown away
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiscardReason {
    /// Fingers landed or lifted too far apart
    Unsynchronized,
    /// Not every finger that landed was counted
    FingerCountMismatch { down: usize, fingers: u32 },
    /// Not every finger that landed moved
    MotionSlotMismatch { down: usize, moving: usize },
    /// Fingers moved in different directions
    DirectionMismatch,
    /// Single-finger swipe shorter than the long-swipe threshold
    TooShort { length: f64, required: f64 },
    /// Fingers did not move at all
    NoMovement,
    /// A finger lifted that was never seen landing
    UnmatchedRelease,
    /// The touch sequence was cancelled by the device
    Cancelled,
}

impl fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscardReason::Unsynchronized => write!(f, "fingers were not synchronized"),
            DiscardReason::FingerCountMismatch { down, fingers } => {
                write!(f, "down slots {down} do not match number of fingers {fingers}")
            }
            DiscardReason::MotionSlotMismatch { down, moving } => {
                write!(f, "down slots {down} do not match motion slots {moving}")
            }
            DiscardReason::DirectionMismatch => write!(f, "fingers moved in different directions"),
            DiscardReason::TooShort { length, required } => {
                write!(f, "swipe length {length:.1} not above {required:.1}")
            }
            DiscardReason::NoMovement => write!(f, "no movement"),
            DiscardReason::UnmatchedRelease => write!(f, "release without matching touch down"),
            DiscardReason::Cancelled => write!(f, "touch sequence cancelled"),
        }
    }
}

/// Result of a finger lifting
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchOutcome {
    /// Other fingers are still down
    Pending,
    /// All fingers lifted, but the gesture was not clean
    Discarded(DiscardReason),
    /// All fingers lifted after a clean swipe
    Swipe { fingers: u32, direction: Direction },
}

/// State of the touch gesture currently in progress
#[derive(Debug, Clone, PartialEq)]
pub struct TouchGestureEvent {
    pub fingers: u32,
    /// `(slot, time)` of every finger landing, in arrival order
    pub down_slots: Vec<(u32, u64)>,
    /// `(slot, time)` of every finger lifting, in arrival order
    pub up_slots: Vec<(u32, u64)>,
    /// Per-slot motion in order of first report, one entry per slot
    pub motion: Vec<SlotMotion>,
    pub clean: bool,
}

impl Default for TouchGestureEvent {
    fn default() -> Self {
        Self {
            fingers: 0,
            down_slots: Vec::new(),
            up_slots: Vec::new(),
            motion: Vec::new(),
            clean: true,
        }
    }
}

impl TouchGestureEvent {
    /// Nothing is being tracked
    pub fn is_idle(&self) -> bool {
        self.down_slots.is_empty() && self.up_slots.is_empty() && self.motion.is_empty()
    }

    pub fn down(&mut self, slot: u32, time_msec: u64) {
        self.down_slots.push((slot, time_msec));
        if synchronized(&self.down_slots) {
            self.fingers = self.down_slots.len() as u32;
        } else {
            debug!(slot, "Finger landed too late, gesture is unclean");
            self.clean = false;
        }
    }

    pub fn motion(&mut self, slot: u32, x: f64, y: f64) {
        match self.motion.iter_mut().find(|m| m.slot == slot) {
            Some(entry) => {
                entry.delta.0 += x - entry.position.0;
                entry.delta.1 += y - entry.position.1;
                entry.position = (x, y);
            }
            None => self.motion.push(SlotMotion {
                slot,
                position: (x, y),
                delta: (0.0, 0.0),
            }),
        }
    }

    /// Record a finger lifting and resolve the gesture once all have lifted
    ///
    /// `longswipe_percentage` is the share of the surface a single-finger
    /// swipe must cover; 0 or an unknown `surface` disables the check.
    pub fn up(
        &mut self,
        slot: u32,
        time_msec: u64,
        longswipe_percentage: f64,
        surface: Option<SurfaceSize>,
    ) -> TouchOutcome {
        self.up_slots.push((slot, time_msec));
        if !synchronized(&self.up_slots) {
            debug!(slot, "Finger lifted too late, gesture is unclean");
            self.clean = false;
        }

        if self.up_slots.len() < self.down_slots.len() {
            return TouchOutcome::Pending;
        }

        let outcome = if self.up_slots.len() > self.down_slots.len() {
            TouchOutcome::Discarded(DiscardReason::UnmatchedRelease)
        } else {
            self.resolve(longswipe_percentage, surface)
        };

        debug!(
            fingers = self.fingers,
            down = self.down_slots.len(),
            up = self.up_slots.len(),
            moving = self.motion.len(),
            "Touch gesture finished"
        );
        *self = TouchGestureEvent::default();
        outcome
    }

    /// Drop everything tracked so far
    pub fn cancel(&mut self) -> TouchOutcome {
        *self = TouchGestureEvent::default();
        TouchOutcome::Discarded(DiscardReason::Cancelled)
    }

    fn resolve(&self, longswipe_percentage: f64, surface: Option<SurfaceSize>) -> TouchOutcome {
        use DiscardReason::*;

        if !self.clean {
            return TouchOutcome::Discarded(Unsynchronized);
        }
        if self.down_slots.len() != self.fingers as usize {
            return TouchOutcome::Discarded(FingerCountMismatch {
                down: self.down_slots.len(),
                fingers: self.fingers,
            });
        }
        if self.motion.len() != self.down_slots.len() {
            return TouchOutcome::Discarded(MotionSlotMismatch {
                down: self.down_slots.len(),
                moving: self.motion.len(),
            });
        }

        let mut agreed = None;
        for entry in &self.motion {
            let (dx, dy) = entry.delta;
            let direction = Direction::classify(dx, dy);
            debug!(slot = entry.slot, %direction, "Slot classified");

            if self.fingers == 1 {
                let length = dx.hypot(dy);
                let required = required_length(direction, longswipe_percentage, surface);
                if required > 0.0 && length <= required {
                    return TouchOutcome::Discarded(TooShort { length, required });
                }
            }

            match agreed {
                None => agreed = Some(direction),
                Some(previous) if previous != direction => {
                    return TouchOutcome::Discarded(DirectionMismatch);
                }
                Some(_) => {}
            }
        }

        match agreed {
            Some(direction) if direction != Direction::Center => TouchOutcome::Swipe {
                fingers: self.fingers,
                direction,
            },
            _ => TouchOutcome::Discarded(NoMovement),
        }
    }
}

/// The newest arrival is close enough to the one before it
fn synchronized(slots: &[(u32, u64)]) -> bool {
    match slots {
        [.., (_, previous), (_, latest)] => latest.saturating_sub(*previous) <= SYNC_THRESHOLD_MSEC,
        _ => true,
    }
}

/// Distance a single-finger swipe has to cover in `direction`
fn required_length(direction: Direction, percentage: f64, surface: Option<SurfaceSize>) -> f64 {
    let Some(surface) = surface else {
        return 0.0;
    };
    if percentage <= 0.0 {
        return 0.0;
    }

    let span = if direction.is_oblique() {
        surface.diagonal()
    } else if direction.is_vertical() {
        surface.height
    } else {
        surface.width
    };
    span * percentage / 100.0
}
