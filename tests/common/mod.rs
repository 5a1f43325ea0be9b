//! Common testing utilities for gestured integration tests
#![allow(dead_code)]

use std::error::Error;

use gestured::backend::{self, replay::ReplaySource, EventSource};
use gestured::config::parser::parse_config;
use gestured::config::Config;
use gestured::gesture::{Binding, CommandResolver, DispatchOutcome, SwitchState};
use gestured::GestureState;

/// Resolver that records gestures instead of running commands
///
/// A gesture counts as bound when the config has a command for it.
#[derive(Debug)]
pub struct RecordingResolver {
    pub config: Config,
    /// Every bound gesture, in dispatch order
    pub dispatched: Vec<(u32, Binding)>,
    /// Gestures that were recognized but had no command
    pub unbound: Vec<(u32, Binding)>,
    pub switches: Vec<SwitchState>,
}

impl RecordingResolver {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            dispatched: Vec::new(),
            unbound: Vec::new(),
            switches: Vec::new(),
        }
    }

    pub fn from_config_str(config: &str) -> Result<Self, Box<dyn Error>> {
        Ok(Self::new(parse_config(config)?))
    }
}

impl CommandResolver for RecordingResolver {
    fn resolve_and_run(&mut self, fingers: u32, binding: Binding) -> DispatchOutcome {
        if self.config.command_for(fingers, binding).is_some() {
            self.dispatched.push((fingers, binding));
            DispatchOutcome::Dispatched
        } else {
            self.unbound.push((fingers, binding));
            DispatchOutcome::NoCommandBound
        }
    }

    fn run_switch(&mut self, state: SwitchState) -> DispatchOutcome {
        self.switches.push(state);
        match self.config.switch_command(state) {
            Some(_) => DispatchOutcome::Dispatched,
            None => DispatchOutcome::NoCommandBound,
        }
    }
}

/// Run a replay through the engine and hand back what it dispatched
pub fn run_replay(
    resolver: RecordingResolver,
    mut source: ReplaySource,
) -> Result<RecordingResolver, Box<dyn Error>> {
    let settings = resolver.config.settings.clone();
    let mut state = GestureState::new(settings, source.devices(), resolver)?;
    backend::run(&mut source, &mut state)?;
    Ok(state.into_resolver())
}

/// Same as [`run_replay`] with both config and replay given inline
pub fn replay_str(config: &str, replay: &str) -> Result<RecordingResolver, Box<dyn Error>> {
    let resolver = RecordingResolver::from_config_str(config)?;
    let source = ReplaySource::from_reader(replay.as_bytes())?;
    run_replay(resolver, source)
}
