//! Command execution for gestured
//!
//! [`ShellRunner`] is the production [`CommandResolver`]: it looks gestures
//! up in the binding table of the [`Config`] and launches the bound command
//! through `sh -c` without waiting for it.

use std::process::{Child, Command, Stdio};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::log_error;
use crate::gesture::{Binding, CommandResolver, DispatchOutcome, SwitchState};

/// Environment variable holding the finger count of the gesture
pub const FINGERS_ENV: &str = "GESTURED_FINGERS";
/// Environment variable holding the gesture name, e.g. `swipe:left`
pub const GESTURE_ENV: &str = "GESTURED_GESTURE";

#[derive(Debug)]
pub struct ShellRunner {
    config: Config,
    /// Launched commands not yet reaped
    children: Vec<Child>,
    /// Log commands instead of running them
    dry_run: bool,
}

impl ShellRunner {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            children: Vec::new(),
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Number of launched commands still running
    pub fn running(&mut self) -> usize {
        self.reap();
        self.children.len()
    }

    fn launch(&mut self, command: String, fingers: u32, gesture: String) -> DispatchOutcome {
        self.reap();

        if self.dry_run {
            info!(fingers, %gesture, "Would run: {command}");
            return DispatchOutcome::Dispatched;
        }

        info!(fingers, %gesture, "Running: {command}");
        let spawned = Command::new("sh")
            .arg("-c")
            .arg(&command)
            .env(FINGERS_ENV, fingers.to_string())
            .env(GESTURE_ENV, &gesture)
            .stdin(Stdio::null())
            .spawn();
        if let Some(child) = log_error(spawned) {
            debug!(pid = child.id(), "Command started");
            self.children.push(child);
        }

        // A failed launch still consumed the gesture
        DispatchOutcome::Dispatched
    }

    /// Collect the exit status of finished commands
    fn reap(&mut self) {
        self.children.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                debug!(pid = child.id(), %status, "Command finished");
                false
            }
            Ok(None) => true,
            Err(e) => {
                warn!(pid = child.id(), "Failed to query command status: {e}");
                false
            }
        });
    }
}

impl CommandResolver for ShellRunner {
    fn resolve_and_run(&mut self, fingers: u32, binding: Binding) -> DispatchOutcome {
        let Some(command) = self.config.command_for(fingers, binding).map(str::to_owned) else {
            debug!(fingers, %binding, "No command bound");
            return DispatchOutcome::NoCommandBound;
        };
        self.launch(command, fingers, binding.to_string())
    }

    fn run_switch(&mut self, state: SwitchState) -> DispatchOutcome {
        let Some(command) = self.config.switch_command(state).map(str::to_owned) else {
            debug!(state = state.name(), "No switch command bound");
            return DispatchOutcome::NoCommandBound;
        };
        self.launch(command, 0, format!("switch:{}", state.name()))
    }

    fn idle(&mut self) {
        self.reap();
    }
}
