//! Brightness control for bridge lights.

use serde::{Deserialize, Serialize};

use super::{BASIS_POINTS_MAX, from_native, to_native};

/// Brightness level in basis points, from 0 to 10000.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Brightness {
    pub(crate) value: u16,
}

impl Default for Brightness {
    fn default() -> Self {
        Self::new()
    }
}

impl Brightness {
    const MAX: u16 = BASIS_POINTS_MAX;
    /// Highest `bri` value the bridge accepts.
    pub(crate) const NATIVE_MAX: u8 = 254;

    /// Full brightness.
    pub fn new() -> Self {
        Brightness { value: Self::MAX }
    }

    pub fn value(&self) -> u16 {
        self.value
    }

    /// Returns None if value is outside valid range (0-10000).
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::Brightness;
    ///
    /// assert!(Brightness::create(0).is_some());
    /// assert!(Brightness::create(10000).is_some());
    /// assert!(Brightness::create(10001).is_none());
    /// ```
    pub fn create(value: u16) -> Option<Self> {
        if Self::is_valid(value) {
            Some(Brightness { value })
        } else {
            None
        }
    }

    /// Returns default (full brightness) if value is invalid.
    pub fn create_or(value: u16) -> Self {
        if Self::is_valid(value) {
            Brightness { value }
        } else {
            Self::new()
        }
    }

    /// The `bri` value sent to the bridge (0-254).
    pub fn native(&self) -> u8 {
        u8::try_from(to_native(self.value, u32::from(Self::NATIVE_MAX))).unwrap_or(Self::NATIVE_MAX)
    }

    pub(crate) fn from_native(bri: u8) -> Self {
        Brightness {
            value: from_native(u32::from(bri), u32::from(Self::NATIVE_MAX)),
        }
    }

    fn is_valid(value: u16) -> bool {
        value <= Self::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_scaling() {
        assert_eq!(Brightness::create(0).unwrap().native(), 0);
        assert_eq!(Brightness::new().native(), 254);
        assert_eq!(Brightness::create(5000).unwrap().native(), 127);
    }

    #[test]
    fn test_create_or_falls_back_to_full() {
        assert_eq!(Brightness::create_or(20_000).value(), 10_000);
        assert_eq!(Brightness::create_or(42).value(), 42);
    }

    #[test]
    fn test_from_native() {
        assert_eq!(Brightness::from_native(254).value(), 10_000);
        assert_eq!(Brightness::from_native(0).value(), 0);
    }
}
