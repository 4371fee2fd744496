//! Connection lifecycle state machine.
//!
//! ```text
//!                connect()              Connected
//! Disconnected ------------> Connecting ----------> Connected
//!      ^                         |                      |
//!      +-------------------------+----------------------+
//!        disconnect(), ConnectionFailed, Disconnected
//! ```

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::errors::Error;
use crate::transport::TransportEvent;

/// State of the connection to the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Notification published to subscribers of a bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BridgeEvent {
    /// A connection attempt to the given address started.
    Connecting { address: String },
    Connected,
    /// A connection attempt failed before the session came up.
    ConnectionFailed { reason: String },
    /// The session was closed on request.
    Disconnected,
    /// An established session went away unexpectedly.
    ConnectionLost { reason: Option<String> },
    CommandSucceeded { identifier: String },
    /// The bridge refused a command.
    CommandRejected { identifier: String, reason: String },
}

impl BridgeEvent {
    /// The error this event reports, if any.
    ///
    /// ```
    /// use hue_bridge_rs::{BridgeEvent, Error};
    ///
    /// let event = BridgeEvent::CommandRejected {
    ///     identifier: "3".to_string(),
    ///     reason: "device unreachable".to_string(),
    /// };
    /// assert!(matches!(event.to_error(), Some(Error::TransportRejected { .. })));
    /// assert!(BridgeEvent::Connected.to_error().is_none());
    /// ```
    pub fn to_error(&self) -> Option<Error> {
        match self {
            BridgeEvent::ConnectionFailed { reason } => Some(Error::transport("connect", reason.as_str())),
            BridgeEvent::ConnectionLost { .. } => Some(Error::ConnectionLost),
            BridgeEvent::CommandRejected { identifier, reason } => {
                Some(Error::transport_rejected(identifier, reason))
            }
            _ => None,
        }
    }
}

impl ConnectionState {
    /// Transition for an explicit connect request.
    pub(crate) fn on_connect(self, address: &str) -> (Self, Option<BridgeEvent>) {
        (
            ConnectionState::Connecting,
            Some(BridgeEvent::Connecting {
                address: address.to_string(),
            }),
        )
    }

    /// Transition for an explicit disconnect request.
    pub(crate) fn on_disconnect(self) -> (Self, Option<BridgeEvent>) {
        match self {
            ConnectionState::Disconnected => (self, None),
            _ => (ConnectionState::Disconnected, Some(BridgeEvent::Disconnected)),
        }
    }

    /// Transition for the transport's own liveness check reporting no session.
    pub(crate) fn on_liveness_lost(self) -> (Self, Option<BridgeEvent>) {
        match self {
            ConnectionState::Connected => (
                ConnectionState::Disconnected,
                Some(BridgeEvent::ConnectionLost { reason: None }),
            ),
            _ => (self, None),
        }
    }

    /// Transition for an asynchronous transport notification.
    pub(crate) fn on_event(self, event: &TransportEvent) -> (Self, Option<BridgeEvent>) {
        use ConnectionState::{Connected, Connecting, Disconnected};

        match (self, event) {
            (Connecting, TransportEvent::Connected) => (Connected, Some(BridgeEvent::Connected)),
            (Connecting, TransportEvent::ConnectionFailed { reason }) => (
                Disconnected,
                Some(BridgeEvent::ConnectionFailed {
                    reason: reason.clone(),
                }),
            ),
            (Connecting, TransportEvent::Disconnected { reason }) => (
                Disconnected,
                Some(BridgeEvent::ConnectionFailed {
                    reason: reason.clone().unwrap_or_else(|| "disconnected".to_string()),
                }),
            ),
            (Connected, TransportEvent::ConnectionFailed { reason }) => (
                Disconnected,
                Some(BridgeEvent::ConnectionLost {
                    reason: Some(reason.clone()),
                }),
            ),
            (Connected, TransportEvent::Disconnected { reason }) => (
                Disconnected,
                Some(BridgeEvent::ConnectionLost {
                    reason: reason.clone(),
                }),
            ),
            (_, TransportEvent::CommandSucceeded { identifier }) => (
                self,
                Some(BridgeEvent::CommandSucceeded {
                    identifier: identifier.clone(),
                }),
            ),
            (_, TransportEvent::CommandRejected { identifier, reason }) => (
                self,
                Some(BridgeEvent::CommandRejected {
                    identifier: identifier.clone(),
                    reason: reason.clone(),
                }),
            ),
            // Duplicate or late lifecycle notifications change nothing.
            _ => (self, None),
        }
    }
}
