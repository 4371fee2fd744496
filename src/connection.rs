//! Ownership of the single bridge session.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::StreamExt;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use log::{debug, error, info, warn};

use crate::command::LightCommand;
use crate::config::BridgeConfig;
use crate::errors::Error;
use crate::history::CommandHistory;
use crate::lifecycle::{BridgeEvent, ConnectionState};
use crate::runtime::{self, TaskHandle};
use crate::transport::{BridgeTransport, EventSender, NativeLight, TransportEvent};

type Result<T> = std::result::Result<T, Error>;

/// Resources held from a connect request until the session is explicitly
/// closed. A session that dropped on its own keeps delivering the outcomes of
/// commands still in flight.
struct Session {
    address: String,
    events: EventSender,
    watcher: TaskHandle,
}

/// Everything guarded by the manager's lock.
struct Shared {
    state: ConnectionState,
    /// Bumped for every new or torn down session so late notifications of an
    /// old session are recognised.
    generation: u64,
    session: Option<Session>,
    /// Configuration of the most recent connect request.
    config: Option<BridgeConfig>,
    subscribers: Vec<UnboundedSender<BridgeEvent>>,
    history: CommandHistory,
}

impl Shared {
    fn new() -> Self {
        Shared {
            state: ConnectionState::Disconnected,
            generation: 0,
            session: None,
            config: None,
            subscribers: Vec::new(),
            history: CommandHistory::new(),
        }
    }

    fn transition(&mut self, (state, event): (ConnectionState, Option<BridgeEvent>)) {
        if state != self.state {
            info!("bridge connection {} -> {}", self.state, state);
            self.state = state;
        }
        if let Some(event) = event {
            self.publish(event);
        }
    }

    fn publish(&mut self, event: BridgeEvent) {
        if let Some(err) = event.to_error() {
            error!("bridge error: {err}");
            self.history.record_error(&err.to_string());
        }
        self.subscribers
            .retain(|subscriber| subscriber.unbounded_send(event.clone()).is_ok());
    }

    fn apply(&mut self, event: &TransportEvent) {
        self.history.record_received(event);
        let transition = self.state.on_event(event);
        self.transition(transition);
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn watch(
    shared: Arc<Mutex<Shared>>,
    generation: u64,
    mut events: UnboundedReceiver<TransportEvent>,
) {
    while let Some(event) = events.next().await {
        let mut shared = lock(&shared);
        if shared.generation != generation {
            match event {
                TransportEvent::CommandRejected { .. } => {
                    warn!("ignoring {:?} from a closed bridge session", event)
                }
                _ => debug!("ignoring {:?} from a closed bridge session", event),
            }
            break;
        }
        shared.apply(&event);
    }
}

/// Owns the connection to one bridge.
///
/// Transitions happen on explicit [`connect`](Self::connect) and
/// [`disconnect`](Self::disconnect) calls and on notifications the transport
/// delivers to the session's watcher task. All of them go through one lock.
pub struct ConnectionManager<T: BridgeTransport> {
    transport: Arc<T>,
    shared: Arc<Mutex<Shared>>,
}

impl<T: BridgeTransport> ConnectionManager<T> {
    pub fn new(transport: T) -> Self {
        ConnectionManager {
            transport: Arc::new(transport),
            shared: Arc::new(Mutex::new(Shared::new())),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The manager's view of the connection.
    pub fn state(&self) -> ConnectionState {
        lock(&self.shared).state
    }

    /// Start connecting to the configured bridge.
    ///
    /// Returns once the transport took the request; the outcome arrives as a
    /// [`BridgeEvent`]. An existing session is closed first.
    pub async fn connect(&self, config: &BridgeConfig) -> Result<()> {
        config.validate()?;

        let has_session = lock(&self.shared).session.is_some();
        if has_session {
            info!("closing the current session before reconnecting");
            self.disconnect().await?;
        }

        let (events, receiver) = EventSender::channel();
        {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            let watcher = runtime::spawn(watch(
                Arc::clone(&self.shared),
                shared.generation,
                receiver,
            ));
            shared.session = Some(Session {
                address: config.address.to_string(),
                events: events.clone(),
                watcher,
            });
            shared.config = Some(config.clone());
            let transition = shared.state.on_connect(config.address.as_str());
            shared.transition(transition);
        }

        info!(
            "connecting to bridge {} as {} ({})",
            config.address, config.app_name, config.device_name
        );
        if let Err(err) = self.transport.connect(config, events).await {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            if let Some(session) = shared.session.take() {
                session.watcher.abort();
            }
            shared.transition((
                ConnectionState::Disconnected,
                Some(BridgeEvent::ConnectionFailed {
                    reason: err.to_string(),
                }),
            ));
            drop(shared);
            self.transport.destroy();
            return Err(err);
        }
        Ok(())
    }

    /// Whether the transport holds a live session right now.
    ///
    /// If the transport lost the session while the manager still considered
    /// it connected, the manager moves to `Disconnected`.
    pub fn is_connected(&self) -> bool {
        let live = self.transport.is_access_point_connected();
        if !live {
            let mut shared = lock(&self.shared);
            let transition = shared.state.on_liveness_lost();
            shared.transition(transition);
        }
        live
    }

    /// Fail with [`Error::NotConnected`] unless a session is established.
    pub fn ensure_connected(&self) -> Result<()> {
        if self.is_connected() && self.state() == ConnectionState::Connected {
            Ok(())
        } else {
            Err(Error::NotConnected)
        }
    }

    /// Close the session and release the transport's resources.
    ///
    /// Calling this without a session only releases resources.
    pub async fn disconnect(&self) -> Result<()> {
        let session = {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            let transition = shared.state.on_disconnect();
            shared.transition(transition);
            shared.session.take()
        };
        if let Some(session) = session {
            info!("disconnecting from bridge {}", session.address);
            session.watcher.abort();
        }

        let result = if self.transport.is_access_point_connected() {
            self.transport.disconnect().await
        } else {
            Ok(())
        };
        self.transport.destroy();
        result
    }

    /// Wait until the pending connection attempt succeeds or fails.
    pub async fn wait_for_connection(&self, timeout: Duration) -> Result<()> {
        let mut events = self.subscribe();
        match self.state() {
            ConnectionState::Connected => return Ok(()),
            ConnectionState::Disconnected => return Err(Error::NotConnected),
            ConnectionState::Connecting => {}
        }

        let outcome = runtime::timeout(timeout, async move {
            while let Some(event) = events.next().await {
                match event {
                    BridgeEvent::Connected => return Ok(()),
                    BridgeEvent::ConnectionFailed { reason } => {
                        return Err(Error::transport("connect", reason));
                    }
                    BridgeEvent::Disconnected | BridgeEvent::ConnectionLost { .. } => {
                        return Err(Error::NotConnected);
                    }
                    _ => {}
                }
            }
            Err(Error::NotConnected)
        })
        .await;

        outcome.map_err(|_| {
            warn!("bridge did not connect within {:?}", timeout);
            Error::transport("connect", "timed out waiting for the bridge")
        })?
    }

    /// Receive every [`BridgeEvent`] published from now on.
    pub fn subscribe(&self) -> UnboundedReceiver<BridgeEvent> {
        let (sender, receiver) = mpsc::unbounded();
        lock(&self.shared).subscribers.push(sender);
        receiver
    }

    /// The bridge's current fixture records.
    pub fn snapshot(&self) -> Result<Vec<NativeLight>> {
        self.ensure_connected()?;
        Ok(self.transport.resource_snapshot())
    }

    /// Hand a command to the transport. The outcome is published later as a
    /// [`BridgeEvent`].
    pub async fn send_command(&self, identifier: &str, command: &LightCommand) -> Result<()> {
        self.ensure_connected()?;
        let listener = {
            let mut shared = lock(&self.shared);
            let Some(session) = &shared.session else {
                return Err(Error::NotConnected);
            };
            let listener = session.events.clone();
            shared.history.record_sent(identifier, command);
            listener
        };

        debug!("sending {:?} to fixture {}", command, identifier);
        self.transport
            .send_state_command(identifier, command, listener)
            .await
            .inspect_err(|err| lock(&self.shared).history.record_error(&err.to_string()))
    }

    pub fn config(&self) -> Option<BridgeConfig> {
        lock(&self.shared).config.clone()
    }

    pub fn history(&self) -> CommandHistory {
        lock(&self.shared).history.clone()
    }

    pub fn clear_history(&self) {
        lock(&self.shared).history.clear();
    }
}
