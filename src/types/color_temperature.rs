//! Color temperature control.

use serde::{Deserialize, Serialize};

use super::{BASIS_POINTS_MAX, from_native, to_native};

/// Color temperature in basis points, with valid values from 0 to 10000.
///
/// 0 is the coolest white the bridge supports and 10000 the warmest. On the
/// wire this maps onto the bridge's mired range:
/// - 0: 153 mired (about 6500K, daylight)
/// - 5000: 327 mired (about 3000K)
/// - 10000: 500 mired (2000K, candle-like)
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ColorTemperature {
    pub(crate) value: u16,
}

impl ColorTemperature {
    const MAX: u16 = BASIS_POINTS_MAX;
    pub(crate) const MIRED_MIN: u16 = 153;
    pub(crate) const MIRED_MAX: u16 = 500;

    /// Get the temperature in basis points.
    pub fn value(&self) -> u16 {
        self.value
    }

    /// Create a new ColorTemperature with the given value.
    ///
    /// Returns `None` if value is outside the valid range (0-10000).
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::ColorTemperature;
    ///
    /// assert!(ColorTemperature::create(0).is_some());
    /// assert!(ColorTemperature::create(10000).is_some());
    /// assert!(ColorTemperature::create(10001).is_none());
    /// ```
    pub fn create(value: u16) -> Option<Self> {
        if value <= Self::MAX {
            Some(ColorTemperature { value })
        } else {
            None
        }
    }

    /// The `ct` value in mired sent to the bridge.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::ColorTemperature;
    ///
    /// assert_eq!(ColorTemperature::create(0).unwrap().mired(), 153);
    /// assert_eq!(ColorTemperature::create(10000).unwrap().mired(), 500);
    /// ```
    pub fn mired(&self) -> u16 {
        let span = u32::from(Self::MIRED_MAX - Self::MIRED_MIN);
        let offset = u16::try_from(to_native(self.value, span)).unwrap_or(Self::MIRED_MAX);
        Self::MIRED_MIN + offset
    }

    /// Out of range mired values are clamped.
    pub(crate) fn from_mired(mired: u16) -> Self {
        let mired = mired.clamp(Self::MIRED_MIN, Self::MIRED_MAX);
        ColorTemperature {
            value: from_native(
                u32::from(mired - Self::MIRED_MIN),
                u32::from(Self::MIRED_MAX - Self::MIRED_MIN),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mired_midpoint() {
        assert_eq!(ColorTemperature::create(5000).unwrap().mired(), 327);
    }

    #[test]
    fn test_from_mired_clamps() {
        assert_eq!(ColorTemperature::from_mired(100).value(), 0);
        assert_eq!(ColorTemperature::from_mired(600).value(), 10_000);
        assert_eq!(ColorTemperature::from_mired(500).value(), 10_000);
    }
}
