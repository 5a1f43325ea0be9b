mod common;

use std::path::Path;

use common::{replay_str, run_replay, RecordingResolver};
use gestured::backend::replay::ReplaySource;
use gestured::config::Config;
use gestured::gesture::{Binding, Direction, SwipeSource};

const TOUCHPAD: &str = r#"{"device": {"name": "touchpad", "capabilities": "GESTURE"}}"#;

fn swipe(direction: Direction) -> Binding {
    Binding::Swipe(SwipeSource::Gesture, direction)
}

#[test]
fn test_swipe_fires_once_past_threshold() -> Result<(), Box<dyn std::error::Error>> {
    let config = "bindswipe 3 left exec swaymsg workspace next";
    let replay = format!(
        r#"{TOUCHPAD}
{{"event": "swipe_begin", "fingers": 3}}
{{"event": "swipe_update", "fingers": 3, "dx": -300.0, "dy": 10.0}}
{{"event": "swipe_update", "fingers": 3, "dx": -300.0, "dy": -5.0}}
{{"event": "swipe_update", "fingers": 3, "dx": -900.0, "dy": 0.0}}
{{"event": "swipe_end", "fingers": 3}}
"#
    );

    let resolver = replay_str(config, &replay)?;
    assert_eq!(resolver.dispatched, vec![(3, swipe(Direction::Left))]);
    assert!(resolver.unbound.is_empty());
    Ok(())
}

#[test]
fn test_short_swipe_fires_on_release() -> Result<(), Box<dyn std::error::Error>> {
    let config = "bindswipe 4 up exec rofi -show drun";
    let replay = format!(
        r#"{TOUCHPAD}
{{"event": "swipe_begin", "fingers": 4}}
{{"event": "swipe_update", "fingers": 4, "dx": 3.0, "dy": -40.0}}
{{"event": "swipe_end", "fingers": 4}}
{{"event": "swipe_begin", "fingers": 4}}
{{"event": "swipe_update", "fingers": 4, "dx": 3.0, "dy": -40.0}}
{{"event": "swipe_end", "fingers": 4, "cancelled": true}}
"#
    );

    let resolver = replay_str(config, &replay)?;
    assert_eq!(resolver.dispatched, vec![(4, swipe(Direction::Up))]);
    Ok(())
}

#[test]
fn test_repeating_swipe_needs_more_motion_each_time() -> Result<(), Box<dyn std::error::Error>> {
    let config = "gesture_swipe one_shot no\nbindswipe 3 right exec brightnessctl set +5%";
    // Thresholds 500, then 1000, then 1500 units of motion
    let replay = format!(
        r#"{TOUCHPAD}
{{"event": "swipe_begin", "fingers": 3}}
{{"event": "swipe_update", "fingers": 3, "dx": 510.0, "dy": 0.0}}
{{"event": "swipe_update", "fingers": 3, "dx": 900.0, "dy": 0.0}}
{{"event": "swipe_update", "fingers": 3, "dx": 200.0, "dy": 0.0}}
{{"event": "swipe_update", "fingers": 3, "dx": 1400.0, "dy": 0.0}}
{{"event": "swipe_end", "fingers": 3}}
"#
    );

    let resolver = replay_str(config, &replay)?;
    assert_eq!(
        resolver.dispatched,
        vec![
            (3, swipe(Direction::Right)),
            (3, swipe(Direction::Right)),
        ]
    );
    Ok(())
}

#[test]
fn test_diagonal_swipe_and_unbound_fingers() -> Result<(), Box<dyn std::error::Error>> {
    let config = "bindswipe 3 right_down exec true";
    let replay = format!(
        r#"{TOUCHPAD}
{{"event": "swipe_begin", "fingers": 3}}
{{"event": "swipe_update", "fingers": 3, "dx": 400.0, "dy": 300.0}}
{{"event": "swipe_end", "fingers": 3}}
{{"event": "swipe_begin", "fingers": 5}}
{{"event": "swipe_update", "fingers": 5, "dx": 400.0, "dy": 300.0}}
{{"event": "swipe_end", "fingers": 5}}
"#
    );

    let resolver = replay_str(config, &replay)?;
    assert_eq!(resolver.dispatched, vec![(3, swipe(Direction::RightDown))]);
    assert_eq!(resolver.unbound, vec![(5, swipe(Direction::RightDown))]);
    Ok(())
}

#[test]
fn test_recorded_session_from_files() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_from_file(Path::new("tests/test_configs/gestures.conf"))?;
    let source = ReplaySource::open(Path::new("tests/replays/touchpad_session.jsonl"))?;

    let resolver = run_replay(RecordingResolver::new(config), source)?;
    assert_eq!(
        resolver.dispatched,
        vec![
            (3, swipe(Direction::Left)),
            (3, swipe(Direction::Up)),
            (
                2,
                Binding::Pinch(
                    gestured::gesture::TriggerMode::OneShot,
                    gestured::gesture::PinchAction::Out
                )
            ),
        ]
    );
    Ok(())
}
