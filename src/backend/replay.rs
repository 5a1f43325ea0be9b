//! Recorded input sessions
//!
//! A replay file holds one JSON object per line. Device lines describe the
//! hardware the session was recorded on, every other line is an event:
//!
//! ```text
//! {"device": {"name": "touchpad", "capabilities": "GESTURE"}}
//! {"event": "swipe_begin", "fingers": 3}
//! {"event": "swipe_update", "fingers": 3, "dx": -120.0, "dy": 4.0}
//! {"event": "swipe_end", "fingers": 3}
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use super::{DeviceInfo, EventSource, InputEvent};
use crate::error::{GesturedError, GesturedResult};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReplayRecord {
    Device { device: DeviceInfo },
    Event(InputEvent),
}

/// Event source backed by a recorded session
///
/// The whole session is delivered as a single batch.
#[derive(Debug, Default)]
pub struct ReplaySource {
    devices: Vec<DeviceInfo>,
    events: Option<Vec<InputEvent>>,
}

impl ReplaySource {
    pub fn open(path: &Path) -> GesturedResult<Self> {
        info!("Loading replay from: {:?}", path);
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<B: BufRead>(reader: B) -> GesturedResult<Self> {
        let mut devices = Vec::new();
        let mut events = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let record = serde_json::from_str(line).map_err(|source| GesturedError::Replay {
                line: index + 1,
                source,
            })?;
            match record {
                ReplayRecord::Device { device } => {
                    debug!(device = %device.name, capabilities = ?device.capabilities, "Replay device");
                    devices.push(device);
                }
                ReplayRecord::Event(event) => events.push(event),
            }
        }

        info!(
            devices = devices.len(),
            events = events.len(),
            "Replay loaded"
        );
        Ok(Self {
            devices,
            events: Some(events),
        })
    }
}

impl EventSource for ReplaySource {
    fn devices(&self) -> &[DeviceInfo] {
        &self.devices
    }

    fn next_batch(&mut self) -> GesturedResult<Option<Vec<InputEvent>>> {
        Ok(self.events.take())
    }
}
