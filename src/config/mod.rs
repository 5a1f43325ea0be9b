use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, error, info, warn};

use crate::error::GesturedResult;
use crate::gesture::{Binding, SwitchState};

pub mod parser;


#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Variables defined with 'set'
    pub variables: HashMap<String, String>,
    /// Recognition thresholds and policies
    pub settings: GestureSettings,
    /// Commands bound to (finger count, gesture)
    pub bindings: HashMap<(u32, Binding), String>,
    /// Commands run when the laptop/tablet switch flips
    pub switch_commands: HashMap<SwitchState, String>,
}

/// Tunables of the recognition engine
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSettings {
    /// Touchpad swipe distance, as a multiple of the base swipe distance
    pub swipe_threshold: f64,
    /// Fire a touchpad swipe at most once per gesture
    pub swipe_one_shot: bool,
    /// Fire a touchpad swipe on release if the threshold was never reached
    pub swipe_trigger_on_release: bool,
    /// Share of the screen a single-finger touch swipe must cover, 0 disables
    pub longswipe_percentage: f64,
    /// Relative scale change that triggers a pinch
    pub pinch_threshold: f64,
    /// Rotation in degrees that triggers a rotate
    pub rotate_threshold: f64,
    /// Which input family drives swipes
    pub interact: InteractType,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            swipe_threshold: 0.5,
            swipe_one_shot: true,
            swipe_trigger_on_release: true,
            longswipe_percentage: 0.0,
            pinch_threshold: 0.25,
            rotate_threshold: 20.0,
            interact: InteractType::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InteractType {
    /// Pick from device capabilities
    #[default]
    Auto,
    Gesture,
    Touch,
    Both,
}

impl FromStr for InteractType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(InteractType::Auto),
            "gesture" => Ok(InteractType::Gesture),
            "touch" => Ok(InteractType::Touch),
            "both" => Ok(InteractType::Both),
            _ => Err(format!("Unknown interact type: {s}")),
        }
    }
}

impl Config {
    /// Load config from file
    pub fn load_from_file(path: &Path) -> GesturedResult<Self> {
        let content = std::fs::read_to_string(path)?;
        parser::parse_config(&content)
    }

    /// Get a variable value
    pub fn get_variable(&self, name: &str) -> Option<String> {
        self.variables.get(name).cloned()
    }

    /// Expand variables in a string
    pub fn expand_variables(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (name, value) in &self.variables {
            result = result.replace(&format!("${name}"), value);
        }
        result
    }

    /// Command bound to a gesture, if any
    pub fn command_for(&self, fingers: u32, binding: Binding) -> Option<&str> {
        self.bindings
            .get(&(fingers, binding))
            .map(String::as_str)
            .filter(|command| !command.trim().is_empty())
    }

    pub fn switch_command(&self, state: SwitchState) -> Option<&str> {
        self.switch_commands
            .get(&state)
            .map(String::as_str)
            .filter(|command| !command.trim().is_empty())
    }
}

/// Environment variable naming an explicit config file
pub const CONFIG_FILE_ENV: &str = "GESTURED_CONFIG_FILE";

/// Candidate config locations, most specific first
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !config_home.is_empty() {
            paths.push(Path::new(&config_home).join("gestured/config"));
        }
    }
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            paths.push(Path::new(&home).join(".config/gestured/config"));
        }
    }
    paths.push(PathBuf::from("/etc/gestured/config"));

    paths
}

/// Load the configuration, falling back to defaults
///
/// An explicit path (or `GESTURED_CONFIG_FILE`) is tried first, then the
/// usual locations from [`config_paths`].
pub fn load_config(explicit: Option<&Path>) -> Config {
    let from_env = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);
    if let Some(path) = explicit.map(Path::to_path_buf).or(from_env) {
        if path.exists() {
            info!("Loading config from: {:?}", path);
            match Config::load_from_file(&path) {
                Ok(config) => {
                    info!(
                        "Successfully loaded config with {} gesture bindings",
                        config.bindings.len()
                    );
                    return config;
                }
                Err(e) => error!("Failed to load config from {:?}: {}", path, e),
            }
        } else {
            error!("Config file does not exist: {:?}", path);
        }
    }

    for path in &config_paths() {
        if path.exists() {
            info!("Loading config from: {:?}", path);
            match Config::load_from_file(path) {
                Ok(config) => {
                    info!(
                        "Successfully loaded config with {} gesture bindings",
                        config.bindings.len()
                    );
                    for ((fingers, binding), command) in &config.bindings {
                        debug!("  Binding: {} fingers {} -> {:?}", fingers, binding, command);
                    }
                    debug!("Settings: {:?}", config.settings);
                    return config;
                }
                Err(e) => error!("Failed to load config from {:?}: {}", path, e),
            }
        }
    }

    warn!("No config file found, using defaults");
    Config::default()
}
