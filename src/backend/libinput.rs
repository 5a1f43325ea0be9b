//! Live input from libinput
//!
//! Opens every device of a udev seat directly, so the daemon needs read
//! access to `/dev/input` (usually membership in the `input` group).

use std::fs::{File, OpenOptions};
use std::os::fd::OwnedFd;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::Path;

use input::event::gesture::{
    GestureEndEvent, GestureEventCoordinates, GestureEventTrait, GesturePinchEvent,
    GesturePinchEventTrait, GestureSwipeEvent,
};
use input::event::switch::{Switch, SwitchEvent, SwitchState as ToggleState};
use input::event::touch::{TouchEvent, TouchEventPosition, TouchEventSlot, TouchEventTrait};
use input::event::{DeviceEvent, EventTrait, GestureEvent};
use input::{Device, DeviceCapability, Event, Libinput, LibinputInterface};
use tracing::{debug, info, trace};

use super::{DeviceCapabilities, DeviceInfo, EventSource, InputEvent};
use crate::error::{GesturedError, GesturedResult};
use crate::gesture::SwitchState;

/// Opens device nodes on behalf of libinput
struct Interface;

impl LibinputInterface for Interface {
    fn open_restricted(&mut self, path: &Path, flags: i32) -> Result<OwnedFd, i32> {
        let access = flags & libc::O_ACCMODE;
        OpenOptions::new()
            .custom_flags(flags)
            .read(access == libc::O_RDONLY || access == libc::O_RDWR)
            .write(access == libc::O_WRONLY || access == libc::O_RDWR)
            .open(path)
            .map(OwnedFd::from)
            .map_err(|err| err.raw_os_error().unwrap_or(libc::EIO))
    }

    fn close_restricted(&mut self, fd: OwnedFd) {
        drop(File::from(fd));
    }
}

pub struct LibinputSource {
    context: Libinput,
    devices: Vec<DeviceInfo>,
}

impl LibinputSource {
    /// Attach to a udev seat and enumerate its devices
    pub fn new(seat_name: &str) -> GesturedResult<Self> {
        let mut context = Libinput::new_with_udev(Interface);
        context
            .udev_assign_seat(seat_name)
            .map_err(|_| GesturedError::Backend(format!("Failed to assign udev seat {seat_name}")))?;

        let mut source = Self {
            context,
            devices: Vec::new(),
        };
        // Device added events are queued by the seat assignment
        let pending = source.drain()?;
        if !pending.is_empty() {
            debug!(events = pending.len(), "Dropping events queued during startup");
        }
        info!(devices = source.devices.len(), seat = seat_name, "libinput ready");
        Ok(source)
    }

    fn drain(&mut self) -> GesturedResult<Vec<InputEvent>> {
        self.context.dispatch()?;

        let mut batch = Vec::new();
        while let Some(event) = self.context.next() {
            match event {
                Event::Device(DeviceEvent::Added(added)) => {
                    let info = device_info(&added.device());
                    info!(device = %info.name, capabilities = ?info.capabilities, "Device added");
                    self.devices.push(info);
                }
                Event::Device(DeviceEvent::Removed(removed)) => {
                    let name = removed.device().name().to_string();
                    info!(device = %name, "Device removed");
                    if let Some(index) = self.devices.iter().position(|d| d.name == name) {
                        self.devices.remove(index);
                    }
                }
                other => {
                    if let Some(translated) = translate(other) {
                        trace!(event = ?translated, "libinput event");
                        batch.push(translated);
                    }
                }
            }
        }
        Ok(batch)
    }

    fn wait(&self) -> GesturedResult<()> {
        let mut pollfd = libc::pollfd {
            fd: self.context.as_raw_fd(),
            events: libc::POLLIN,
            revents: 0,
        };
        // SAFETY: pollfd is a valid, exclusively borrowed struct for one fd
        let ret = unsafe { libc::poll(&mut pollfd, 1, -1) };
        if ret < 0 {
            let err = std::io::Error::last_os_error();
            if err.kind() != std::io::ErrorKind::Interrupted {
                return Err(err.into());
            }
        }
        Ok(())
    }
}

impl EventSource for LibinputSource {
    fn devices(&self) -> &[DeviceInfo] {
        &self.devices
    }

    fn next_batch(&mut self) -> GesturedResult<Option<Vec<InputEvent>>> {
        loop {
            let batch = self.drain()?;
            if !batch.is_empty() {
                return Ok(Some(batch));
            }
            self.wait()?;
        }
    }
}

fn device_info(device: &Device) -> DeviceInfo {
    let mut capabilities = DeviceCapabilities::empty();
    if device.has_capability(DeviceCapability::Gesture) {
        capabilities |= DeviceCapabilities::GESTURE;
    }
    if device.has_capability(DeviceCapability::Touch) {
        capabilities |= DeviceCapabilities::TOUCH;
    }
    if device.has_capability(DeviceCapability::Switch) {
        capabilities |= DeviceCapabilities::SWITCH;
    }

    DeviceInfo {
        name: device.name().to_string(),
        capabilities,
        size_mm: device.size(),
    }
}

fn translate(event: Event) -> Option<InputEvent> {
    match event {
        Event::Gesture(GestureEvent::Swipe(swipe)) => {
            let fingers = swipe.finger_count().max(0) as u32;
            match swipe {
                GestureSwipeEvent::Begin(_) => Some(InputEvent::SwipeBegin { fingers }),
                GestureSwipeEvent::Update(update) => Some(InputEvent::SwipeUpdate {
                    fingers,
                    dx: update.dx_unaccelerated(),
                    dy: update.dy_unaccelerated(),
                }),
                GestureSwipeEvent::End(end) => Some(InputEvent::SwipeEnd {
                    fingers,
                    cancelled: end.cancelled(),
                }),
                _ => None,
            }
        }
        Event::Gesture(GestureEvent::Pinch(pinch)) => {
            let fingers = pinch.finger_count().max(0) as u32;
            match pinch {
                GesturePinchEvent::Begin(_) => Some(InputEvent::PinchBegin { fingers }),
                GesturePinchEvent::Update(update) => Some(InputEvent::PinchUpdate {
                    fingers,
                    scale: update.scale(),
                    angle_delta: update.angle_delta(),
                }),
                GesturePinchEvent::End(end) => Some(InputEvent::PinchEnd {
                    fingers,
                    cancelled: end.cancelled(),
                }),
                _ => None,
            }
        }
        Event::Touch(touch) => match touch {
            TouchEvent::Down(down) => Some(InputEvent::TouchDown {
                slot: down.seat_slot(),
                time_msec: u64::from(down.time()),
            }),
            TouchEvent::Motion(motion) => Some(InputEvent::TouchMotion {
                slot: motion.seat_slot(),
                time_msec: u64::from(motion.time()),
                x: motion.x(),
                y: motion.y(),
            }),
            TouchEvent::Up(up) => Some(InputEvent::TouchUp {
                slot: up.seat_slot(),
                time_msec: u64::from(up.time()),
            }),
            TouchEvent::Cancel(_) => Some(InputEvent::TouchCancel),
            _ => None,
        },
        Event::Switch(SwitchEvent::Toggle(toggle)) => match toggle.switch() {
            Some(Switch::TabletMode) => {
                let state = match toggle.switch_state() {
                    ToggleState::Off => SwitchState::Laptop,
                    ToggleState::On => SwitchState::Tablet,
                };
                Some(InputEvent::SwitchToggle { state })
            }
            other => {
                debug!(switch = ?other, "Ignoring switch");
                None
            }
        },
        _ => None,
    }
}
