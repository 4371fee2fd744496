//! Boundary to the vendor bridge client.
//!
//! The crate does not talk to the network itself. Discovery, authentication
//! and the wire protocol live behind [`BridgeTransport`], which a vendor client
//! implements. Everything the transport learns asynchronously (the session
//! coming up or going away, a command being applied or refused) is reported
//! through the [`EventSender`] it was handed.

use std::future::Future;

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::command::LightCommand;
use crate::config::BridgeConfig;
use crate::errors::Error;
use crate::types::Color;

type Result<T> = std::result::Result<T, Error>;

/// A fixture record from the bridge's resource snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeLight {
    /// Stable identifier of the resource on the bridge.
    pub identifier: String,
    pub name: String,
    /// Declared hardware type, e.g. `"Extended color light"`.
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default)]
    pub state: NativeLightState,
}

/// State of a fixture in the bridge's native units.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeLightState {
    pub on: bool,
    /// 0-254
    pub bri: Option<u8>,
    /// 0-65535
    pub hue: Option<u16>,
    /// 0-254
    pub sat: Option<u8>,
    /// Mired
    pub ct: Option<u16>,
    /// `"hs"`, `"ct"` or `"xy"`.
    #[serde(rename = "colormode")]
    pub color_mode: Option<String>,
    /// RGB approximation computed by the vendor's color utilities.
    #[serde(default)]
    pub approximate_rgb: Option<Color>,
}

/// Notification from the transport, delivered asynchronously.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum TransportEvent {
    /// The session with the bridge is established.
    Connected,
    /// The session could not be established.
    ConnectionFailed { reason: String },
    /// An established session went away.
    Disconnected { reason: Option<String> },
    /// The bridge applied a command.
    CommandSucceeded { identifier: String },
    /// The bridge refused a command.
    CommandRejected { identifier: String, reason: String },
}

/// Sending half of a transport notification channel.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: UnboundedSender<TransportEvent>,
}

impl EventSender {
    pub(crate) fn channel() -> (Self, UnboundedReceiver<TransportEvent>) {
        let (sender, receiver) = mpsc::unbounded();
        (EventSender { sender }, receiver)
    }

    /// Deliver a notification.
    ///
    /// Returns `false` once the session that handed out this sender was
    /// closed. The notification is logged and dropped in that case.
    pub fn notify(&self, event: TransportEvent) -> bool {
        match self.sender.unbounded_send(event) {
            Ok(()) => true,
            Err(err) => {
                warn!("dropping {:?}: bridge session is closed", err.into_inner());
                false
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Vendor bridge client.
///
/// Implementations must not block the caller: `connect` and
/// `send_state_command` return once the request is handed off, and report the
/// outcome later through the given [`EventSender`].
pub trait BridgeTransport: Send + Sync + 'static {
    /// Start establishing a session with the bridge at `config.address`,
    /// authenticating as `config.username`.
    fn connect(
        &self,
        config: &BridgeConfig,
        events: EventSender,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Whether the transport currently holds a live session.
    fn is_access_point_connected(&self) -> bool;

    /// Close the session.
    fn disconnect(&self) -> impl Future<Output = Result<()>> + Send;

    /// Release every resource held for the session.
    fn destroy(&self);

    /// Current fixture records as cached by the transport.
    fn resource_snapshot(&self) -> Vec<NativeLight>;

    /// Apply a command to the fixture with the given native identifier.
    fn send_state_command(
        &self,
        identifier: &str,
        command: &LightCommand,
        listener: EventSender,
    ) -> impl Future<Output = Result<()>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_light_from_bridge_json() {
        let light: NativeLight = serde_json::from_value(serde_json::json!({
            "identifier": "3",
            "name": "Bar",
            "type": "Extended color light",
            "state": {"on": true, "bri": 200, "hue": 1000, "sat": 100, "colormode": "hs"}
        }))
        .unwrap();

        assert_eq!(light.type_tag, "Extended color light");
        assert_eq!(light.state.color_mode.as_deref(), Some("hs"));
        assert!(light.state.ct.is_none());
        assert!(light.state.approximate_rgb.is_none());
    }

    #[test]
    fn test_notify_after_receiver_dropped() {
        let (sender, receiver) = EventSender::channel();
        assert!(sender.notify(TransportEvent::Connected));
        drop(receiver);
        assert!(sender.is_closed());
        assert!(!sender.notify(TransportEvent::Connected));
    }

    #[test]
    fn test_event_serializes_with_method() {
        let event = TransportEvent::CommandRejected {
            identifier: "2".to_string(),
            reason: "off".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            serde_json::json!({"method": "commandRejected", "identifier": "2", "reason": "off"})
        );
    }
}
