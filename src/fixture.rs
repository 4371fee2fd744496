//! Read-only fixture projection of a bridge resource.

use serde::{Deserialize, Serialize};

use crate::light_type::{FixtureKind, LightType};
use crate::state::LightState;

/// Numeric identifier of a fixture, stable per physical device.
pub type FixtureId = u32;

/// A light or outlet as seen in one bridge snapshot.
///
/// Fixtures are rebuilt on every read and never cached, so a `Fixture` only
/// describes the device at the moment it was read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    id: FixtureId,
    name: String,
    light_type: LightType,
    state: LightState,
}

impl Fixture {
    pub fn new(id: FixtureId, name: &str, light_type: LightType, state: LightState) -> Self {
        Fixture {
            id,
            name: name.to_string(),
            light_type,
            state,
        }
    }

    pub fn id(&self) -> FixtureId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FixtureKind {
        self.light_type.kind()
    }

    pub fn light_type(&self) -> &LightType {
        &self.light_type
    }

    /// The state reported by the bridge when the snapshot was taken.
    pub fn state(&self) -> &LightState {
        &self.state
    }

    pub fn is_outlet(&self) -> bool {
        self.kind() == FixtureKind::Outlet
    }
}
