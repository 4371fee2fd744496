//! Native state command sent to the bridge.

use serde::{Deserialize, Serialize};

use crate::types::{Brightness, Color, ColorTemperature, HueSaturation, PowerMode, TransitionTime};

/// A state command in the bridge's native units.
///
/// Only attributes that are set are serialized, so the bridge leaves every
/// other attribute of the fixture untouched.
///
/// ```
/// use hue_bridge_rs::{Brightness, LightCommand};
///
/// let mut command = LightCommand::new();
/// assert!(command.is_empty());
///
/// command.brightness(&Brightness::new());
/// assert_eq!(serde_json::to_string(&command).unwrap(), r#"{"bri":254}"#);
/// ```
#[serde_with::skip_serializing_none]
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LightCommand {
    pub(crate) on: Option<bool>,
    pub(crate) bri: Option<u8>,
    pub(crate) hue: Option<u16>,
    pub(crate) sat: Option<u8>,
    pub(crate) ct: Option<u16>,
    pub(crate) rgb: Option<Color>,
    #[serde(rename = "transitiontime")]
    pub(crate) transition_time: Option<u16>,
}

impl LightCommand {
    /// Create a new empty command.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check if this command does nothing but switch the fixture off.
    ///
    /// ```
    /// use hue_bridge_rs::{LightCommand, PowerMode};
    ///
    /// let mut command = LightCommand::new();
    /// command.power(PowerMode::Off);
    /// assert!(command.is_power_off());
    /// ```
    pub fn is_power_off(&self) -> bool {
        *self
            == LightCommand {
                on: Some(false),
                ..Self::default()
            }
    }

    pub fn power(&mut self, power: PowerMode) {
        self.on = Some(power.is_on());
    }

    pub fn brightness(&mut self, brightness: &Brightness) {
        self.bri = Some(brightness.native());
    }

    pub fn hue_saturation(&mut self, hs: &HueSaturation) {
        self.hue = Some(hs.native_hue());
        self.sat = Some(hs.native_saturation());
    }

    pub fn temperature(&mut self, temperature: &ColorTemperature) {
        self.ct = Some(temperature.mired());
    }

    /// Set the RGB color.
    ///
    /// The triple is handed to the transport as is; converting it into the
    /// bridge's color space is the transport's job.
    pub fn color(&mut self, color: &Color) {
        self.rgb = Some(*color);
    }

    pub fn transition(&mut self, transition: &TransitionTime) {
        self.transition_time = Some(transition.steps());
    }

    pub fn get_on(&self) -> Option<bool> {
        self.on
    }

    /// Brightness, 0-254.
    pub fn get_bri(&self) -> Option<u8> {
        self.bri
    }

    /// Hue, 0-65535.
    pub fn get_hue(&self) -> Option<u16> {
        self.hue
    }

    /// Saturation, 0-254.
    pub fn get_sat(&self) -> Option<u8> {
        self.sat
    }

    /// Color temperature in mired.
    pub fn get_ct(&self) -> Option<u16> {
        self.ct
    }

    pub fn get_rgb(&self) -> Option<Color> {
        self.rgb
    }

    /// Transition time in 100ms steps.
    pub fn get_transition_time(&self) -> Option<u16> {
        self.transition_time
    }
}
