//! Translation of partial light states into native bridge commands.

use crate::command::LightCommand;
use crate::state::{ColorSetting, LightStateUpdate};
use crate::types::PowerMode;

/// Build the minimal native command for an update.
///
/// Switching off wins over everything else: the command then only carries the
/// power attribute, whatever else the update sets. Otherwise exactly the set
/// attributes are copied, and only the payload of the active color
/// representation.
///
/// # Examples
///
/// ```
/// use hue_bridge_rs::{Brightness, Color, LightStateUpdate, PowerMode, translate};
///
/// let mut update = LightStateUpdate::new();
/// update.power(PowerMode::Off);
/// update.brightness(&Brightness::create(5000).unwrap());
/// update.color(&Color::rgb(255, 0, 0));
///
/// assert!(translate(&update).is_power_off());
/// ```
pub fn translate(update: &LightStateUpdate) -> LightCommand {
    let mut command = LightCommand::new();

    if update.on == Some(false) {
        command.power(PowerMode::Off);
        return command;
    }

    if let Some(on) = update.on {
        command.power(PowerMode::from(on));
    }
    if let Some(brightness) = &update.brightness {
        command.brightness(brightness);
    }
    match &update.color {
        ColorSetting::Rgb(color) => command.color(color),
        ColorSetting::HueSaturation(hs) => command.hue_saturation(hs),
        ColorSetting::Temperature(temperature) => command.temperature(temperature),
        ColorSetting::None => {}
    }
    if let Some(transition) = &update.transition {
        command.transition(transition);
    }

    command
}
