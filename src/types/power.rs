//! Power mode for light and outlet control.

use serde::{Deserialize, Serialize};

/// Power state for a fixture.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum PowerMode {
    /// Turn the fixture on
    On,
    /// Turn the fixture off
    Off,
}

impl PowerMode {
    pub fn is_on(self) -> bool {
        matches!(self, PowerMode::On)
    }
}

impl From<bool> for PowerMode {
    fn from(on: bool) -> Self {
        if on { PowerMode::On } else { PowerMode::Off }
    }
}
