//! Hue and Saturation color representation.

use serde::{Deserialize, Serialize};

use super::{BASIS_POINTS_MAX, Color, from_native, to_native};

/// Hue and Saturation color representation.
///
/// Both components are expressed in basis points (0-10000):
/// - Hue: position on the color wheel, 0 and 10000 both being red
/// - Saturation: the intensity of the color, 0 being white
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HueSaturation {
    hue: u16,
    saturation: u16,
}

impl HueSaturation {
    /// Highest native `hue` value.
    pub(crate) const NATIVE_HUE_MAX: u16 = 65_535;
    /// Highest native `sat` value.
    pub(crate) const NATIVE_SAT_MAX: u8 = 254;

    /// Create a new HueSaturation with the given values.
    ///
    /// Returns `None` if either value is above 10000.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::HueSaturation;
    ///
    /// assert!(HueSaturation::create(0, 10000).is_some());
    /// assert!(HueSaturation::create(3333, 5000).is_some());
    /// assert!(HueSaturation::create(10001, 5000).is_none());
    /// assert!(HueSaturation::create(5000, 10001).is_none());
    /// ```
    pub fn create(hue: u16, saturation: u16) -> Option<Self> {
        if hue <= BASIS_POINTS_MAX && saturation <= BASIS_POINTS_MAX {
            Some(HueSaturation { hue, saturation })
        } else {
            None
        }
    }

    /// Get the hue value.
    pub fn hue(&self) -> u16 {
        self.hue
    }

    /// Get the saturation value.
    pub fn saturation(&self) -> u16 {
        self.saturation
    }

    /// The `hue` value sent to the bridge (0-65535).
    pub fn native_hue(&self) -> u16 {
        u16::try_from(to_native(self.hue, u32::from(Self::NATIVE_HUE_MAX)))
            .unwrap_or(Self::NATIVE_HUE_MAX)
    }

    /// The `sat` value sent to the bridge (0-254).
    pub fn native_saturation(&self) -> u8 {
        u8::try_from(to_native(self.saturation, u32::from(Self::NATIVE_SAT_MAX)))
            .unwrap_or(Self::NATIVE_SAT_MAX)
    }

    pub(crate) fn from_native(hue: u16, sat: u8) -> Self {
        HueSaturation {
            hue: from_native(u32::from(hue), u32::from(Self::NATIVE_HUE_MAX)),
            saturation: from_native(u32::from(sat), u32::from(Self::NATIVE_SAT_MAX)),
        }
    }

    /// Approximate this color as RGB.
    ///
    /// Uses HSV to RGB conversion with Value fixed at 255 (max brightness).
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::HueSaturation;
    ///
    /// let hs = HueSaturation::create(0, 10000).unwrap();
    /// let color = hs.to_color();
    /// assert_eq!(color.red(), 255);
    /// assert_eq!(color.green(), 0);
    /// assert_eq!(color.blue(), 0);
    /// ```
    pub fn to_color(&self) -> Color {
        let s = f32::from(self.saturation) / f32::from(BASIS_POINTS_MAX);
        let v = 1.0;

        if s == 0.0 {
            let gray = (v * 255.0) as u8;
            return Color::rgb(gray, gray, gray);
        }

        let h = f32::from(self.hue) * 360.0 / f32::from(BASIS_POINTS_MAX) / 60.0;
        let i = h.floor() as i32;
        let f = h - i as f32;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match i % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Color::rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
    }
}

impl From<&HueSaturation> for Color {
    fn from(hs: &HueSaturation) -> Self {
        hs.to_color()
    }
}
