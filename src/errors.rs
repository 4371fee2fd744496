use crate::fixture::FixtureId;

/// All error types that can occur when driving fixtures through a bridge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to deserialize JSON data.
    #[error("failed to load json: {0:?}")]
    JsonLoad(serde_json::Error),

    /// The addressed fixture is not part of the bridge's current snapshot.
    #[error("fixture {0} not found")]
    FixtureNotFound(FixtureId),

    /// A read or write was attempted without an active bridge connection.
    #[error("not connected to a bridge")]
    NotConnected,

    /// The bridge reported that it could not apply a submitted command.
    #[error("bridge rejected command for fixture {fixture}: {reason}")]
    TransportRejected { fixture: String, reason: String },

    /// The bridge connection dropped while it was established.
    #[error("connection to the bridge was lost")]
    ConnectionLost,

    /// The transport refused to take a request.
    #[error("transport {action} error: {reason}")]
    Transport { action: String, reason: String },

    /// A value was outside of its accepted range.
    #[error("invalid {name}: {reason}")]
    InvalidValue { name: String, reason: String },

    /// Failed to parse a [`crate::Color`] from a string.
    #[error("invalid color string: {0}")]
    InvalidColorString(String),
}

impl Error {
    /// Create a new transport error
    pub fn transport(action: &str, reason: impl Into<String>) -> Self {
        Error::Transport {
            action: action.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a new transport rejected error
    pub fn transport_rejected(fixture: &str, reason: &str) -> Self {
        Error::TransportRejected {
            fixture: fixture.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a new invalid value error
    pub fn invalid_value(name: &str, reason: &str) -> Self {
        Error::InvalidValue {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
