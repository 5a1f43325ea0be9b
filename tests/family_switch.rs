mod common;

use common::replay_str;
use gestured::gesture::{Binding, Direction, SwipeSource, SwitchState};

const DEVICES: &str = r#"{"device": {"name": "touchpad", "capabilities": "GESTURE | SWITCH"}}
{"device": {"name": "touchscreen", "capabilities": "TOUCH", "size_mm": [260.0, 170.0]}}
"#;

const TOUCH_SWIPE_RIGHT: &str = r#"{"event": "touch_down", "slot": 0, "time_msec": 100}
{"event": "touch_down", "slot": 1, "time_msec": 110}
{"event": "touch_motion", "slot": 0, "time_msec": 120, "x": 10.0, "y": 50.0}
{"event": "touch_motion", "slot": 1, "time_msec": 120, "x": 10.0, "y": 80.0}
{"event": "touch_motion", "slot": 0, "time_msec": 160, "x": 80.0, "y": 51.0}
{"event": "touch_motion", "slot": 1, "time_msec": 160, "x": 82.0, "y": 80.0}
{"event": "touch_up", "slot": 0, "time_msec": 200}
{"event": "touch_up", "slot": 1, "time_msec": 205}
"#;

const SWIPE_LEFT: &str = r#"{"event": "swipe_begin", "fingers": 3}
{"event": "swipe_update", "fingers": 3, "dx": -700.0, "dy": 12.0}
{"event": "swipe_end", "fingers": 3}
"#;

const CONFIG: &str = r#"
bindswipe 3 left exec swaymsg workspace prev
bindswipe --touch 2 right exec swaymsg workspace next
bindswitch tablet exec onboard
"#;

fn switch(state: SwitchState) -> String {
    format!("{{\"event\": \"switch_toggle\", \"state\": \"{}\"}}\n", state.name())
}

fn touchpad_left() -> (u32, Binding) {
    (3, Binding::Swipe(SwipeSource::Gesture, Direction::Left))
}

fn touchscreen_right() -> (u32, Binding) {
    (2, Binding::Swipe(SwipeSource::Touch, Direction::Right))
}

#[test]
fn test_switch_moves_between_families() -> Result<(), Box<dyn std::error::Error>> {
    let replay = [
        DEVICES,
        TOUCH_SWIPE_RIGHT,
        SWIPE_LEFT,
        switch(SwitchState::Tablet).as_str(),
        SWIPE_LEFT,
        TOUCH_SWIPE_RIGHT,
        switch(SwitchState::Laptop).as_str(),
        TOUCH_SWIPE_RIGHT,
        SWIPE_LEFT,
    ]
    .concat();

    let resolver = replay_str(CONFIG, &replay)?;
    assert_eq!(
        resolver.dispatched,
        vec![touchpad_left(), touchscreen_right(), touchpad_left()]
    );
    assert_eq!(
        resolver.switches,
        vec![SwitchState::Tablet, SwitchState::Laptop]
    );
    Ok(())
}

#[test]
fn test_both_families_stay_live() -> Result<(), Box<dyn std::error::Error>> {
    let config = format!("interact both\n{CONFIG}");
    let replay = [
        DEVICES,
        SWIPE_LEFT,
        TOUCH_SWIPE_RIGHT,
        switch(SwitchState::Laptop).as_str(),
        TOUCH_SWIPE_RIGHT,
    ]
    .concat();

    let resolver = replay_str(&config, &replay)?;
    assert_eq!(
        resolver.dispatched,
        vec![touchpad_left(), touchscreen_right(), touchscreen_right()]
    );
    Ok(())
}

#[test]
fn test_forced_touch_family_ignores_touchpad() -> Result<(), Box<dyn std::error::Error>> {
    let config = format!("interact touch\n{CONFIG}");
    let replay = [DEVICES, SWIPE_LEFT, TOUCH_SWIPE_RIGHT].concat();

    let resolver = replay_str(&config, &replay)?;
    assert_eq!(resolver.dispatched, vec![touchscreen_right()]);
    Ok(())
}

#[test]
fn test_switch_mid_touch_drops_the_gesture() -> Result<(), Box<dyn std::error::Error>> {
    // Fingers land in tablet mode and lift after the switch flipped back
    let stranded = r#"{"event": "touch_down", "slot": 0, "time_msec": 10}
{"event": "touch_down", "slot": 1, "time_msec": 20}
"#;
    let lifted = r#"{"event": "touch_up", "slot": 0, "time_msec": 40}
{"event": "touch_up", "slot": 1, "time_msec": 45}
"#;
    let replay = [
        DEVICES,
        switch(SwitchState::Tablet).as_str(),
        stranded,
        switch(SwitchState::Laptop).as_str(),
        lifted,
        switch(SwitchState::Tablet).as_str(),
        TOUCH_SWIPE_RIGHT,
        TOUCH_SWIPE_RIGHT,
        TOUCH_SWIPE_RIGHT,
    ]
    .concat();

    let resolver = replay_str(CONFIG, &replay)?;
    assert_eq!(
        resolver.dispatched,
        vec![touchscreen_right(), touchscreen_right(), touchscreen_right()]
    );
    assert_eq!(
        resolver.switches,
        vec![SwitchState::Tablet, SwitchState::Laptop, SwitchState::Tablet]
    );
    Ok(())
}

#[test]
fn test_no_usable_device() {
    let replay = r#"{"device": {"name": "lid switch", "capabilities": "SWITCH"}}"#;
    assert!(replay_str(CONFIG, replay).is_err());
}
