//! Light state values and partial state updates.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::light_type::LightType;
use crate::transport::NativeLightState;
use crate::types::{Brightness, Color, ColorTemperature, HueSaturation, PowerMode, TransitionTime};

/// Which color representation is authoritative for a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ColorMode {
    /// The fixture does not support color.
    #[default]
    None,
    Rgb,
    HueSaturation,
    Temperature,
}

/// A color in exactly one representation.
///
/// Only one payload can be carried at a time, so a request can never hold
/// hue/saturation values next to an RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorSetting {
    #[default]
    None,
    Rgb(Color),
    HueSaturation(HueSaturation),
    Temperature(ColorTemperature),
}

impl ColorSetting {
    pub fn mode(&self) -> ColorMode {
        match self {
            ColorSetting::None => ColorMode::None,
            ColorSetting::Rgb(_) => ColorMode::Rgb,
            ColorSetting::HueSaturation(_) => ColorMode::HueSaturation,
            ColorSetting::Temperature(_) => ColorMode::Temperature,
        }
    }
}

/// The state of a light, as read from the bridge or as desired by a caller.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LightState {
    on: bool,
    brightness: Brightness,
    color: ColorSetting,
    approximate_rgb: Option<Color>,
}

impl LightState {
    pub fn new(on: bool, brightness: Brightness, color: ColorSetting) -> Self {
        LightState {
            on,
            brightness,
            color,
            approximate_rgb: None,
        }
    }

    /// Whether or not the light is on.
    pub fn on(&self) -> bool {
        self.on
    }

    /// Brightness; only meaningful while the light is on.
    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    pub fn color(&self) -> &ColorSetting {
        &self.color
    }

    /// The color mode. [`ColorMode::None`] means the light does not support color.
    pub fn color_mode(&self) -> ColorMode {
        self.color.mode()
    }

    /// The color as RGB, approximated when the light is in another mode.
    pub fn approximate_rgb(&self) -> Option<Color> {
        match self.color {
            ColorSetting::None => None,
            ColorSetting::Rgb(color) => Some(color),
            _ => self.approximate_rgb,
        }
    }

    /// Read a fixture's state from the bridge's native representation.
    ///
    /// Color-capable fixtures always read back some color. The reported color
    /// mode picks the representation; if its fields are missing, whichever
    /// group the bridge did populate is used.
    pub(crate) fn from_native(native: &NativeLightState, light_type: &LightType) -> Self {
        let brightness = native.bri.map(Brightness::from_native).unwrap_or_else(Brightness::new);
        if !light_type.supports_color() {
            return LightState::new(native.on, brightness, ColorSetting::None);
        }

        let hue_saturation = match (native.hue, native.sat) {
            (Some(hue), Some(sat)) => Some(HueSaturation::from_native(hue, sat)),
            _ => None,
        };
        let temperature = native.ct.map(ColorTemperature::from_mired);
        let approximate_rgb = native
            .approximate_rgb
            .or_else(|| hue_saturation.map(|hs| hs.to_color()));

        let reported = match native.color_mode.as_deref() {
            Some("hs") => hue_saturation.map(ColorSetting::HueSaturation),
            Some("ct") => temperature.map(ColorSetting::Temperature),
            Some("xy") => approximate_rgb.map(ColorSetting::Rgb),
            _ => None,
        };
        let color = reported
            .or_else(|| hue_saturation.map(ColorSetting::HueSaturation))
            .or_else(|| temperature.map(ColorSetting::Temperature))
            .or_else(|| approximate_rgb.map(ColorSetting::Rgb))
            .unwrap_or_else(|| resting_color(light_type));

        LightState {
            on: native.on,
            brightness,
            color,
            approximate_rgb,
        }
    }
}

/// Color assumed for a color-capable fixture that reported no color fields.
fn resting_color(light_type: &LightType) -> ColorSetting {
    match light_type {
        LightType::ColorTemperature => {
            ColorSetting::Temperature(ColorTemperature::from_mired(ColorTemperature::MIRED_MIN))
        }
        _ => ColorSetting::HueSaturation(HueSaturation::from_native(0, 0)),
    }
}

/// A partial light state: every attribute is optional and unset attributes are
/// left untouched on the fixture.
///
/// # Examples
///
/// ```
/// use hue_bridge_rs::{Brightness, Color, LightStateUpdate, PowerMode, TransitionTime};
///
/// let mut update = LightStateUpdate::new();
/// assert!(update.is_empty());
///
/// update.power(PowerMode::On);
/// update.brightness(&Brightness::create(7500).unwrap());
/// update.color(&Color::rgb(255, 0, 0));
/// update.transition(&TransitionTime::from_millis(400));
/// assert!(!update.is_empty());
/// ```
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LightStateUpdate {
    pub(crate) on: Option<bool>,
    pub(crate) brightness: Option<Brightness>,
    #[serde(default)]
    pub(crate) color: ColorSetting,
    pub(crate) transition: Option<TransitionTime>,
}

impl LightStateUpdate {
    /// Create an update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.on.is_none()
            && self.brightness.is_none()
            && self.color == ColorSetting::None
            && self.transition.is_none()
    }

    /// Switch the fixture on or off.
    ///
    /// Switching off overrides every other attribute of the update.
    pub fn power(&mut self, power: PowerMode) {
        self.on = Some(power.is_on());
    }

    pub fn brightness(&mut self, brightness: &Brightness) {
        self.brightness = Some(*brightness);
    }

    /// Set an RGB color, replacing any other color set on this update.
    pub fn color(&mut self, color: &Color) {
        self.color = ColorSetting::Rgb(*color);
    }

    /// Set a hue/saturation color, replacing any other color set on this update.
    pub fn hue_saturation(&mut self, hs: &HueSaturation) {
        self.color = ColorSetting::HueSaturation(*hs);
    }

    /// Set a white color temperature, replacing any other color set on this update.
    pub fn temperature(&mut self, temperature: &ColorTemperature) {
        self.color = ColorSetting::Temperature(*temperature);
    }

    pub fn transition(&mut self, transition: &TransitionTime) {
        self.transition = Some(*transition);
    }

    pub fn get_on(&self) -> Option<bool> {
        self.on
    }

    pub fn get_brightness(&self) -> Option<Brightness> {
        self.brightness
    }

    pub fn get_color(&self) -> &ColorSetting {
        &self.color
    }

    pub fn get_transition(&self) -> Option<TransitionTime> {
        self.transition
    }

    /// The part of this update an outlet can act on: power and transition.
    pub fn switch_only(&self) -> LightStateUpdate {
        LightStateUpdate {
            on: self.on,
            transition: self.transition,
            ..LightStateUpdate::new()
        }
    }

    /// The state a fixture ends up in once this update is applied to `current`.
    ///
    /// Color is left alone on fixtures without color support.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::{Brightness, Color, ColorSetting, LightState, LightStateUpdate, PowerMode};
    ///
    /// let current = LightState::new(true, Brightness::new(), ColorSetting::Rgb(Color::rgb(0, 0, 255)));
    ///
    /// let mut update = LightStateUpdate::new();
    /// update.brightness(&Brightness::create(100).unwrap());
    /// let next = update.applied_to(&current);
    /// assert_eq!(next.brightness().value(), 100);
    /// assert_eq!(next.color(), current.color());
    ///
    /// update.power(PowerMode::Off);
    /// let next = update.applied_to(&current);
    /// assert!(!next.on());
    /// assert_eq!(next.brightness(), current.brightness());
    /// ```
    pub fn applied_to(&self, current: &LightState) -> LightState {
        let mut next = current.clone();
        if self.on == Some(false) {
            next.on = false;
            return next;
        }
        if let Some(on) = self.on {
            next.on = on;
        }
        if let Some(brightness) = self.brightness {
            next.brightness = brightness;
        }
        if current.color_mode() != ColorMode::None && self.color != ColorSetting::None {
            next.color = self.color;
            next.approximate_rgb = match self.color {
                ColorSetting::HueSaturation(hs) => Some(hs.to_color()),
                _ => None,
            };
        }
        next
    }
}

impl From<PowerMode> for LightStateUpdate {
    fn from(power: PowerMode) -> Self {
        let mut update = LightStateUpdate::new();
        update.power(power);
        update
    }
}

impl From<&Brightness> for LightStateUpdate {
    fn from(brightness: &Brightness) -> Self {
        let mut update = LightStateUpdate::new();
        update.brightness(brightness);
        update
    }
}

impl From<&Color> for LightStateUpdate {
    fn from(color: &Color) -> Self {
        let mut update = LightStateUpdate::new();
        update.color(color);
        update
    }
}

impl From<&HueSaturation> for LightStateUpdate {
    fn from(hs: &HueSaturation) -> Self {
        let mut update = LightStateUpdate::new();
        update.hue_saturation(hs);
        update
    }
}

impl From<&ColorTemperature> for LightStateUpdate {
    fn from(temperature: &ColorTemperature) -> Self {
        let mut update = LightStateUpdate::new();
        update.temperature(temperature);
        update
    }
}
