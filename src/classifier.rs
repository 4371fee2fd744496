//! Partitioning of a bridge snapshot into lights and outlets.

use log::warn;

use crate::fixture::{Fixture, FixtureId};
use crate::light_type::{FixtureKind, LightType};
use crate::state::LightState;
use crate::transport::NativeLight;

/// Lights and outlets of one snapshot. The two collections are disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    pub lights: Vec<Fixture>,
    pub outlets: Vec<Fixture>,
}

/// Project a native record onto a [`Fixture`].
///
/// Returns `None` for records whose identifier is not numeric.
pub fn to_fixture(native: &NativeLight) -> Option<Fixture> {
    let Ok(id) = native.identifier.parse::<FixtureId>() else {
        warn!(
            "skipping bridge resource with non-numeric identifier {:?}",
            native.identifier
        );
        return None;
    };
    let light_type = LightType::from_tag(&native.type_tag);
    let state = LightState::from_native(&native.state, &light_type);
    Some(Fixture::new(id, &native.name, light_type, state))
}

/// Split a snapshot by fixture kind.
pub fn classify(snapshot: &[NativeLight]) -> Classified {
    let mut classified = Classified::default();
    for fixture in snapshot.iter().filter_map(to_fixture) {
        match fixture.kind() {
            FixtureKind::ColorLight => classified.lights.push(fixture),
            FixtureKind::Outlet => classified.outlets.push(fixture),
        }
    }
    classified
}

/// All fixtures of the given kind.
pub fn fixtures_of_kind(snapshot: &[NativeLight], kind: FixtureKind) -> Vec<Fixture> {
    snapshot
        .iter()
        .filter_map(to_fixture)
        .filter(|fixture| fixture.kind() == kind)
        .collect()
}

/// Find a fixture of the given kind by id.
pub fn find(snapshot: &[NativeLight], kind: FixtureKind, id: FixtureId) -> Option<Fixture> {
    snapshot
        .iter()
        .filter_map(to_fixture)
        .find(|fixture| fixture.kind() == kind && fixture.id() == id)
}

/// Native identifier of the fixture with the given id, of any kind.
pub fn native_identifier(snapshot: &[NativeLight], id: FixtureId) -> Option<&str> {
    snapshot
        .iter()
        .find(|native| native.identifier.parse::<FixtureId>().ok() == Some(id))
        .map(|native| native.identifier.as_str())
}
