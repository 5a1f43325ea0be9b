//! gestured - Touchpad and Touchscreen Gesture Daemon
//!
//! gestured watches libinput gesture and touch events and runs a shell
//! command for every recognized gesture:
//!
//! - **Swipes**: eight directions on the touchpad, optionally repeating as
//!   the fingers keep moving
//! - **Touchscreen swipes**: assembled from individual finger slots, with a
//!   minimum length for single-finger swipes
//! - **Pinch and rotate**: one-shot bindings that fall through to continuous
//!   triggering when nothing one-shot is bound
//! - **Tablet mode**: the laptop/tablet switch selects which device family
//!   drives swipes and can run its own commands
//!
//! # Architecture
//!
//! - [`gesture`]: the recognition state machines and their vocabulary
//! - [`state`]: the state owning every in-flight gesture
//! - [`input`]: routing of input events into the state machines
//! - [`backend`]: event sources (libinput, recorded replays)
//! - [`command`]: launching bound commands
//! - [`config`]: configuration file parsing and discovery

#![warn(rust_2018_idioms)]

pub mod backend;
pub mod command;
pub mod config;
pub mod error;
pub mod gesture;
pub mod input;
pub mod state;

pub use error::{GesturedError, GesturedResult};
pub use state::GestureState;
