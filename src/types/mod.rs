//! Value types for light control parameters.
//!
//! Levels are expressed in basis points (0-10000) and scaled to the bridge's
//! native ranges when a command is built.

mod brightness;
mod color;
mod color_temperature;
mod hue_saturation;
mod power;
mod transition;

pub use brightness::Brightness;
pub use color::Color;
pub use color_temperature::ColorTemperature;
pub use hue_saturation::HueSaturation;
pub use power::PowerMode;
pub use transition::TransitionTime;

/// Upper bound of every basis point value.
pub(crate) const BASIS_POINTS_MAX: u16 = 10_000;

/// Scale a basis point value onto `0..=native_max`, rounding to nearest.
pub(crate) fn to_native(value: u16, native_max: u32) -> u32 {
    let value = u32::from(value.min(BASIS_POINTS_MAX));
    (value * native_max + u32::from(BASIS_POINTS_MAX) / 2) / u32::from(BASIS_POINTS_MAX)
}

/// Scale a native value in `0..=native_max` back to basis points.
pub(crate) fn from_native(value: u32, native_max: u32) -> u16 {
    if native_max == 0 {
        return 0;
    }
    let value = value.min(native_max);
    let scaled = (value * u32::from(BASIS_POINTS_MAX) + native_max / 2) / native_max;
    u16::try_from(scaled).unwrap_or(BASIS_POINTS_MAX)
}
