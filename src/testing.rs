//! In-memory transport for exercising the crate without a bridge.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::command::LightCommand;
use crate::config::BridgeConfig;
use crate::errors::Error;
use crate::transport::{BridgeTransport, EventSender, NativeLight, NativeLightState, TransportEvent};

type Result<T> = std::result::Result<T, Error>;

/// A fixture record with the given identity and a switched-off state.
pub fn native_light(identifier: &str, name: &str, type_tag: &str) -> NativeLight {
    NativeLight {
        identifier: identifier.to_string(),
        name: name.to_string(),
        type_tag: type_tag.to_string(),
        state: NativeLightState::default(),
    }
}

/// Let spawned watcher tasks drain their queues.
pub async fn settle() {
    crate::runtime::sleep(Duration::from_millis(10)).await;
}

#[derive(Default)]
struct Inner {
    connected: bool,
    events: Option<EventSender>,
    last_config: Option<BridgeConfig>,
    snapshot: Vec<NativeLight>,
    sent: Vec<(String, LightCommand)>,
    connect_calls: usize,
    disconnect_calls: usize,
    destroy_calls: usize,
    connect_error: Option<String>,
    reject_reason: Option<String>,
}

/// Scripted [`BridgeTransport`].
///
/// Connection outcomes are driven by the test through
/// [`accept_connection`](Self::accept_connection) and friends. Commands are
/// acknowledged right away unless [`reject_commands`](Self::reject_commands)
/// was called.
#[derive(Default)]
pub struct MockTransport {
    inner: Mutex<Inner>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Vec<NativeLight>) -> Self {
        let transport = Self::new();
        transport.lock().snapshot = snapshot;
        transport
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver a notification on the current session's channel.
    pub fn notify(&self, event: TransportEvent) -> bool {
        let events = self.lock().events.clone();
        events.is_some_and(|events| events.notify(event))
    }

    pub fn accept_connection(&self) {
        self.lock().connected = true;
        self.notify(TransportEvent::Connected);
    }

    pub fn refuse_connection(&self, reason: &str) {
        self.lock().connected = false;
        self.notify(TransportEvent::ConnectionFailed {
            reason: reason.to_string(),
        });
    }

    pub fn drop_connection(&self, reason: Option<&str>) {
        self.lock().connected = false;
        self.notify(TransportEvent::Disconnected {
            reason: reason.map(str::to_string),
        });
    }

    /// Lose the session without notifying anyone.
    pub fn lose_silently(&self) {
        self.lock().connected = false;
    }

    pub fn fail_next_connect(&self, reason: &str) {
        self.lock().connect_error = Some(reason.to_string());
    }

    pub fn reject_commands(&self, reason: &str) {
        self.lock().reject_reason = Some(reason.to_string());
    }

    pub fn set_snapshot(&self, snapshot: Vec<NativeLight>) {
        self.lock().snapshot = snapshot;
    }

    pub fn sent(&self) -> Vec<(String, LightCommand)> {
        self.lock().sent.clone()
    }

    pub fn last_config(&self) -> Option<BridgeConfig> {
        self.lock().last_config.clone()
    }

    pub fn connect_calls(&self) -> usize {
        self.lock().connect_calls
    }

    pub fn disconnect_calls(&self) -> usize {
        self.lock().disconnect_calls
    }

    pub fn destroy_calls(&self) -> usize {
        self.lock().destroy_calls
    }
}

impl BridgeTransport for MockTransport {
    async fn connect(&self, config: &BridgeConfig, events: EventSender) -> Result<()> {
        let mut inner = self.lock();
        inner.connect_calls += 1;
        inner.last_config = Some(config.clone());
        if let Some(reason) = inner.connect_error.take() {
            return Err(Error::transport("connect", reason));
        }
        inner.events = Some(events);
        Ok(())
    }

    fn is_access_point_connected(&self) -> bool {
        self.lock().connected
    }

    async fn disconnect(&self) -> Result<()> {
        let mut inner = self.lock();
        inner.disconnect_calls += 1;
        inner.connected = false;
        Ok(())
    }

    fn destroy(&self) {
        let mut inner = self.lock();
        inner.destroy_calls += 1;
        inner.events = None;
    }

    fn resource_snapshot(&self) -> Vec<NativeLight> {
        self.lock().snapshot.clone()
    }

    async fn send_state_command(
        &self,
        identifier: &str,
        command: &LightCommand,
        listener: EventSender,
    ) -> Result<()> {
        let reject_reason = {
            let mut inner = self.lock();
            inner.sent.push((identifier.to_string(), command.clone()));
            inner.reject_reason.clone()
        };
        let identifier = identifier.to_string();
        listener.notify(match reject_reason {
            Some(reason) => TransportEvent::CommandRejected { identifier, reason },
            None => TransportEvent::CommandSucceeded { identifier },
        });
        Ok(())
    }
}
