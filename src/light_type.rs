//! Fixture type detection from the bridge's hardware type tag.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::EnumString;

/// Hardware type of a bridge resource, parsed from its declared type tag.
///
/// # Examples
///
/// ```
/// use hue_bridge_rs::{FixtureKind, LightType};
///
/// assert_eq!(LightType::from_tag("Extended color light"), LightType::ExtendedColor);
/// assert_eq!(LightType::from_tag("On/Off plug-in unit").kind(), FixtureKind::Outlet);
///
/// let unknown = LightType::from_tag("Ceiling projector");
/// assert_eq!(unknown, LightType::Unknown("Ceiling projector".to_string()));
/// assert_eq!(unknown.kind(), FixtureKind::ColorLight);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumString)]
pub enum LightType {
    #[strum(serialize = "Extended color light")]
    ExtendedColor,
    #[strum(serialize = "Color light")]
    Color,
    #[strum(serialize = "Color temperature light")]
    ColorTemperature,
    #[strum(serialize = "Dimmable light")]
    Dimmable,
    /// The one type tag reserved for simple switchable outlets.
    #[strum(serialize = "On/Off plug-in unit")]
    OnOffPlug,
    /// Any tag not listed above.
    #[strum(disabled)]
    Unknown(String),
}

/// Whether a fixture is a light or a plain switchable outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FixtureKind {
    ColorLight,
    Outlet,
}

impl LightType {
    /// Type tag the bridge reports for simple outlets.
    pub const OUTLET_TAG: &'static str = "On/Off plug-in unit";

    pub fn from_tag(tag: &str) -> Self {
        match LightType::from_str(tag) {
            Ok(light_type) => light_type,
            Err(_) => LightType::Unknown(tag.to_string()),
        }
    }

    /// The type tag as reported by the bridge.
    pub fn tag(&self) -> &str {
        match self {
            LightType::ExtendedColor => "Extended color light",
            LightType::Color => "Color light",
            LightType::ColorTemperature => "Color temperature light",
            LightType::Dimmable => "Dimmable light",
            LightType::OnOffPlug => Self::OUTLET_TAG,
            LightType::Unknown(tag) => tag,
        }
    }

    pub fn kind(&self) -> FixtureKind {
        match self {
            LightType::OnOffPlug => FixtureKind::Outlet,
            _ => FixtureKind::ColorLight,
        }
    }

    /// Whether the fixture reports any color representation.
    pub fn supports_color(&self) -> bool {
        !matches!(self, LightType::Dimmable | LightType::OnOffPlug)
    }
}
