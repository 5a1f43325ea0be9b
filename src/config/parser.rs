use super::*;
use crate::error::GesturedError;
use crate::gesture::{Direction, PinchAction, SwipeSource, TriggerMode};

/// Parse a gestured config file
///
/// Lines that fail to parse are reported and skipped, so one typo does not
/// throw away the rest of the bindings.
pub fn parse_config(content: &str) -> GesturedResult<Config> {
    let mut config = Config::default();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Err(e) = parse_line(&mut config, line) {
            warn!("Failed to parse config line {} '{}': {}", line_num + 1, line, e);
        }
    }

    Ok(config)
}

fn invalid(message: impl Into<String>) -> GesturedError {
    GesturedError::Config(message.into())
}

fn parse_line(config: &mut Config, line: &str) -> GesturedResult<()> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let first_part = parts.first().ok_or_else(|| invalid("Empty command line"))?;

    match *first_part {
        "set" => parse_set(config, &parts[1..])?,
        "gesture_swipe" => parse_gesture_swipe(config, &parts[1..])?,
        "touch_swipe" => parse_touch_swipe(config, &parts[1..])?,
        "pinch" => {
            config.settings.pinch_threshold = parse_threshold("pinch", &parts[1..])?;
        }
        "rotate" => {
            config.settings.rotate_threshold = parse_threshold("rotate", &parts[1..])?;
        }
        "interact" => {
            let value = parts.get(1).ok_or_else(|| invalid("interact requires a type"))?;
            config.settings.interact = value.parse().map_err(invalid)?;
        }
        "bindswipe" => parse_bindswipe(config, &parts[1..])?,
        "bindpinch" => parse_bindpinch(config, &parts[1..])?,
        "bindswitch" => parse_bindswitch(config, &parts[1..])?,
        other => return Err(invalid(format!("Unknown command: {other}"))),
    }

    Ok(())
}

fn parse_set(config: &mut Config, parts: &[&str]) -> GesturedResult<()> {
    if parts.len() < 2 {
        return Err(invalid("set requires variable name and value"));
    }

    let var_name = parts[0].strip_prefix('$').unwrap_or(parts[0]);
    let value = parts[1..].join(" ");

    // Expand any variables in the value
    let expanded_value = config.expand_variables(&value);
    config
        .variables
        .insert(var_name.to_string(), expanded_value);

    Ok(())
}

fn parse_gesture_swipe(config: &mut Config, parts: &[&str]) -> GesturedResult<()> {
    let [key, value] = parts else {
        return Err(invalid("gesture_swipe requires a setting and a value"));
    };

    match *key {
        "threshold" => config.settings.swipe_threshold = parse_positive(value)?,
        "one_shot" => config.settings.swipe_one_shot = parse_bool(value)?,
        "trigger_on_release" => config.settings.swipe_trigger_on_release = parse_bool(value)?,
        _ => return Err(invalid(format!("Unknown gesture_swipe setting: {key}"))),
    }
    Ok(())
}

fn parse_touch_swipe(config: &mut Config, parts: &[&str]) -> GesturedResult<()> {
    match parts {
        ["longswipe_percentage", value] => {
            let percentage: f64 = value
                .parse()
                .map_err(|_| invalid(format!("Invalid number: {value}")))?;
            if !(0.0..=100.0).contains(&percentage) {
                return Err(invalid("longswipe_percentage must be between 0 and 100"));
            }
            config.settings.longswipe_percentage = percentage;
            Ok(())
        }
        _ => Err(invalid("touch_swipe requires 'longswipe_percentage <value>'")),
    }
}

fn parse_threshold(name: &str, parts: &[&str]) -> GesturedResult<f64> {
    match parts {
        ["threshold", value] => parse_positive(value),
        _ => Err(invalid(format!("{name} requires 'threshold <value>'"))),
    }
}

fn parse_positive(value: &str) -> GesturedResult<f64> {
    let number: f64 = value
        .parse()
        .map_err(|_| invalid(format!("Invalid number: {value}")))?;
    if !number.is_finite() || number <= 0.0 {
        return Err(invalid(format!("Threshold must be positive: {value}")));
    }
    Ok(number)
}

/// Booleans compatible with i3/sway: yes/no, true/false, on/off, 1/0
fn parse_bool(value: &str) -> GesturedResult<bool> {
    match value.to_lowercase().as_str() {
        "yes" | "true" | "on" | "1" | "enabled" => Ok(true),
        "no" | "false" | "off" | "0" | "disabled" => Ok(false),
        _ => Err(invalid(format!("Invalid boolean: {value}"))),
    }
}

fn parse_fingers(value: &str, minimum: u32) -> GesturedResult<u32> {
    let fingers: u32 = value
        .parse()
        .map_err(|_| invalid(format!("Invalid finger count: {value}")))?;
    if fingers < minimum {
        return Err(invalid(format!("Finger count must be at least {minimum}")));
    }
    Ok(fingers)
}

/// Take the command part of a binding, with an optional leading `exec`
fn parse_command(config: &Config, parts: &[&str]) -> GesturedResult<String> {
    let parts = match parts.first() {
        Some(&"exec") => &parts[1..],
        _ => parts,
    };
    if parts.is_empty() {
        return Err(invalid("Binding requires a command"));
    }
    Ok(config.expand_variables(&parts.join(" ")))
}

fn parse_bindswipe(config: &mut Config, parts: &[&str]) -> GesturedResult<()> {
    let (source, parts) = match parts.first() {
        Some(&"--touch") => (SwipeSource::Touch, &parts[1..]),
        Some(&"--gesture") => (SwipeSource::Gesture, &parts[1..]),
        _ => (SwipeSource::Gesture, parts),
    };
    if parts.len() < 3 {
        return Err(invalid("bindswipe requires fingers, direction and command"));
    }

    let fingers = parse_fingers(parts[0], 1)?;
    let direction: Direction = parts[1].parse().map_err(invalid)?;
    let command = parse_command(config, &parts[2..])?;

    config
        .bindings
        .insert((fingers, Binding::Swipe(source, direction)), command);
    Ok(())
}

fn parse_bindpinch(config: &mut Config, parts: &[&str]) -> GesturedResult<()> {
    let (mode, parts) = match parts.first() {
        Some(&"--continuous") => (TriggerMode::Continuous, &parts[1..]),
        Some(&"--oneshot") => (TriggerMode::OneShot, &parts[1..]),
        _ => (TriggerMode::OneShot, parts),
    };
    if parts.len() < 3 {
        return Err(invalid("bindpinch requires fingers, action and command"));
    }

    let fingers = parse_fingers(parts[0], 2)?;
    let action: PinchAction = parts[1].parse().map_err(invalid)?;
    let command = parse_command(config, &parts[2..])?;

    config
        .bindings
        .insert((fingers, Binding::Pinch(mode, action)), command);
    Ok(())
}

fn parse_bindswitch(config: &mut Config, parts: &[&str]) -> GesturedResult<()> {
    if parts.len() < 2 {
        return Err(invalid("bindswitch requires a switch state and command"));
    }

    let state: SwitchState = parts[0].parse().map_err(invalid)?;
    let command = parse_command(config, &parts[1..])?;
    config.switch_commands.insert(state, command);
    Ok(())
}
