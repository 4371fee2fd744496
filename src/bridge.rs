//! Fixture control through a lighting bridge.

use std::time::Duration;

use futures::channel::mpsc::UnboundedReceiver;
use log::debug;
use serde_json::{Value, json};

use crate::classifier::{self, Classified};
use crate::command::LightCommand;
use crate::config::BridgeConfig;
use crate::connection::ConnectionManager;
use crate::errors::Error;
use crate::fixture::{Fixture, FixtureId};
use crate::history::CommandHistory;
use crate::lifecycle::{BridgeEvent, ConnectionState};
use crate::light_type::FixtureKind;
use crate::state::LightStateUpdate;
use crate::transport::{BridgeTransport, NativeLight};
use crate::translator::translate;
use crate::types::PowerMode;

type Result<T> = std::result::Result<T, Error>;

/// Entry point for listing and driving the fixtures of one bridge.
///
/// Every read takes a fresh snapshot from the transport; nothing is cached.
/// Writes are fire-and-observe: they return once the transport took the
/// command, and the bridge's verdict arrives as a [`BridgeEvent`].
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use hue_bridge_rs::{Bridge, BridgeConfig, BridgeTransport, Brightness, LightStateUpdate};
///
/// async fn dim_first_light<T: BridgeTransport>(transport: T) -> Result<(), hue_bridge_rs::Error> {
///     let bridge = Bridge::new(transport);
///     bridge.connect(&BridgeConfig::new("192.168.1.20", "stage-user")?).await?;
///     bridge.wait_for_connection(Duration::from_secs(10)).await?;
///
///     if let Some(light) = bridge.lights()?.first() {
///         let update = LightStateUpdate::from(&Brightness::create(2500).unwrap());
///         bridge.update_light_state(light.id(), &update).await?;
///     }
///     bridge.disconnect().await
/// }
/// ```
pub struct Bridge<T: BridgeTransport> {
    manager: ConnectionManager<T>,
}

impl<T: BridgeTransport> Bridge<T> {
    pub fn new(transport: T) -> Self {
        Self::with_manager(ConnectionManager::new(transport))
    }

    pub fn with_manager(manager: ConnectionManager<T>) -> Self {
        Bridge { manager }
    }

    pub fn manager(&self) -> &ConnectionManager<T> {
        &self.manager
    }

    pub async fn connect(&self, config: &BridgeConfig) -> Result<()> {
        self.manager.connect(config).await
    }

    pub async fn disconnect(&self) -> Result<()> {
        self.manager.disconnect().await
    }

    pub fn is_connected(&self) -> bool {
        self.manager.is_connected()
    }

    pub fn state(&self) -> ConnectionState {
        self.manager.state()
    }

    pub async fn wait_for_connection(&self, timeout: Duration) -> Result<()> {
        self.manager.wait_for_connection(timeout).await
    }

    pub fn subscribe(&self) -> UnboundedReceiver<BridgeEvent> {
        self.manager.subscribe()
    }

    /// Current lights and outlets, in snapshot order.
    pub fn fixtures(&self) -> Result<Classified> {
        Ok(classifier::classify(&self.manager.snapshot()?))
    }

    /// All fixtures that are not outlets.
    pub fn lights(&self) -> Result<Vec<Fixture>> {
        Ok(classifier::fixtures_of_kind(
            &self.manager.snapshot()?,
            FixtureKind::ColorLight,
        ))
    }

    pub fn outlets(&self) -> Result<Vec<Fixture>> {
        Ok(classifier::fixtures_of_kind(
            &self.manager.snapshot()?,
            FixtureKind::Outlet,
        ))
    }

    /// The light with the given id, or `None` if the bridge has no such light.
    pub fn light(&self, id: FixtureId) -> Result<Option<Fixture>> {
        Ok(classifier::find(
            &self.manager.snapshot()?,
            FixtureKind::ColorLight,
            id,
        ))
    }

    pub fn outlet(&self, id: FixtureId) -> Result<Option<Fixture>> {
        Ok(classifier::find(
            &self.manager.snapshot()?,
            FixtureKind::Outlet,
            id,
        ))
    }

    pub async fn turn_outlet_on(&self, id: FixtureId) -> Result<LightCommand> {
        self.switch_outlet(id, PowerMode::On).await
    }

    pub async fn turn_outlet_off(&self, id: FixtureId) -> Result<LightCommand> {
        self.switch_outlet(id, PowerMode::Off).await
    }

    async fn switch_outlet(&self, id: FixtureId, power: PowerMode) -> Result<LightCommand> {
        let snapshot = self.manager.snapshot()?;
        if classifier::find(&snapshot, FixtureKind::Outlet, id).is_none() {
            return Err(Error::FixtureNotFound(id));
        }
        self.submit(&snapshot, id, &LightStateUpdate::from(power))
            .await
    }

    /// Push a partial state update to a fixture.
    ///
    /// Only the fields set on `update` are sent. A power-off update turns the
    /// fixture off and drops every other field. Outlets only receive power and
    /// transition. Returns the native command that was handed to the transport.
    pub async fn update_light_state(
        &self,
        id: FixtureId,
        update: &LightStateUpdate,
    ) -> Result<LightCommand> {
        let snapshot = self.manager.snapshot()?;
        if classifier::find(&snapshot, FixtureKind::Outlet, id).is_some() {
            let switch = update.switch_only();
            if switch != *update {
                debug!("outlet {} only takes power, dropping other fields", id);
            }
            return self.submit(&snapshot, id, &switch).await;
        }
        self.submit(&snapshot, id, update).await
    }

    async fn submit(
        &self,
        snapshot: &[NativeLight],
        id: FixtureId,
        update: &LightStateUpdate,
    ) -> Result<LightCommand> {
        let identifier =
            classifier::native_identifier(snapshot, id).ok_or(Error::FixtureNotFound(id))?;
        let command = translate(update);
        debug!("fixture {} -> {:?}", id, command);
        self.manager.send_command(identifier, &command).await?;
        Ok(command)
    }

    pub fn history(&self) -> CommandHistory {
        self.manager.history()
    }

    pub fn clear_history(&self) {
        self.manager.clear_history();
    }

    /// Returns diagnostics including connection state, fixture counts,
    /// configuration and history.
    pub fn diagnostics(&self) -> Value {
        let config = self.manager.config();
        let mut diag = json!({
            "state": self.state().to_string(),
            "address": config.as_ref().map(|c| c.address.to_string()),
            "app_name": config.as_ref().map(|c| c.app_name.clone()),
            "device_name": config.as_ref().map(|c| c.device_name.clone()),
        });

        if let Ok(fixtures) = self.fixtures() {
            diag["lights"] = json!(fixtures.lights.len());
            diag["outlets"] = json!(fixtures.outlets.len());
        }

        diag["history"] = serde_json::to_value(self.history().summary()).unwrap_or(Value::Null);
        diag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light_type::LightType;
    use crate::state::ColorMode;
    use crate::testing::{MockTransport, native_light, settle};
    use crate::history::HistoryRecord;
    use crate::transport::{NativeLightState, TransportEvent};
    use crate::types::{Brightness, Color, ColorTemperature, HueSaturation, TransitionTime};
    use futures::StreamExt;

    fn snapshot() -> Vec<NativeLight> {
        let mut stage = native_light("1", "Stage left", "Extended color light");
        stage.state = NativeLightState {
            on: true,
            bri: Some(254),
            hue: Some(0),
            sat: Some(254),
            color_mode: Some("hs".to_string()),
            ..Default::default()
        };
        vec![
            stage,
            native_light("2", "Fog machine", LightType::OUTLET_TAG),
            native_light("3", "Hallway", "Dimmable light"),
        ]
    }

    async fn connected() -> Bridge<MockTransport> {
        let bridge = Bridge::new(MockTransport::with_snapshot(snapshot()));
        bridge
            .connect(&BridgeConfig::new("10.0.0.2", "stage-user").unwrap())
            .await
            .unwrap();
        bridge.manager().transport().accept_connection();
        bridge
            .wait_for_connection(Duration::from_secs(1))
            .await
            .unwrap();
        bridge
    }

    #[tokio::test]
    async fn test_reads_require_connection() {
        let bridge = Bridge::new(MockTransport::with_snapshot(snapshot()));
        assert_eq!(bridge.lights().unwrap_err(), Error::NotConnected);
        assert_eq!(bridge.outlet(2).unwrap_err(), Error::NotConnected);
        assert_eq!(
            bridge
                .update_light_state(1, &LightStateUpdate::from(PowerMode::On))
                .await
                .unwrap_err(),
            Error::NotConnected
        );
        assert!(bridge.manager().transport().sent().is_empty());
    }

    #[tokio::test]
    async fn test_lists_and_lookups() {
        let bridge = connected().await;

        let lights = bridge.lights().unwrap();
        assert_eq!(lights.iter().map(Fixture::id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(bridge.outlets().unwrap().len(), 1);

        let stage = bridge.light(1).unwrap().unwrap();
        assert_eq!(stage.state().color_mode(), ColorMode::HueSaturation);
        assert_eq!(stage.state().approximate_rgb(), Some(Color::rgb(255, 0, 0)));

        assert!(bridge.light(2).unwrap().is_none());
        assert!(bridge.outlet(2).unwrap().is_some());
        assert!(bridge.light(42).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_is_never_stale() {
        let bridge = connected().await;
        assert!(bridge.light(3).unwrap().is_some());

        bridge
            .manager()
            .transport()
            .set_snapshot(vec![native_light("1", "Stage left", "Color light")]);
        assert!(bridge.light(3).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_power_off_short_circuits() {
        let bridge = connected().await;
        let mut update = LightStateUpdate::new();
        update.brightness(&Brightness::create(5000).unwrap());
        update.color(&Color::rgb(10, 20, 30));
        update.power(PowerMode::Off);

        let command = bridge.update_light_state(1, &update).await.unwrap();
        assert!(command.is_power_off());

        let sent = bridge.manager().transport().sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "1");
        assert_eq!(serde_json::to_value(&sent[0].1).unwrap(), json!({"on": false}));
    }

    #[tokio::test]
    async fn test_partial_update_touches_only_set_fields() {
        let bridge = connected().await;
        let mut update = LightStateUpdate::new();
        update.power(PowerMode::On);
        update.hue_saturation(&HueSaturation::create(5000, 10000).unwrap());
        update.transition(&TransitionTime::from_millis(400));

        let command = bridge.update_light_state(1, &update).await.unwrap();
        assert_eq!(
            serde_json::to_value(&command).unwrap(),
            json!({"on": true, "hue": 32768, "sat": 254, "transitiontime": 4})
        );
    }

    #[tokio::test]
    async fn test_temperature_update() {
        let bridge = connected().await;
        let update = LightStateUpdate::from(&ColorTemperature::create(0).unwrap());
        let command = bridge.update_light_state(1, &update).await.unwrap();
        assert_eq!(command.get_ct(), Some(153));
        assert!(command.get_on().is_none());
    }

    #[tokio::test]
    async fn test_unknown_fixture() {
        let bridge = connected().await;
        let err = bridge
            .update_light_state(99, &LightStateUpdate::from(PowerMode::On))
            .await
            .unwrap_err();
        assert_eq!(err, Error::FixtureNotFound(99));
        assert!(bridge.manager().transport().sent().is_empty());
    }

    #[tokio::test]
    async fn test_outlet_switching() {
        let bridge = connected().await;

        let command = bridge.turn_outlet_on(2).await.unwrap();
        assert_eq!(serde_json::to_value(&command).unwrap(), json!({"on": true}));
        bridge.turn_outlet_off(2).await.unwrap();

        let sent = bridge.manager().transport().sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].1.get_on(), Some(false));

        // A light is not an outlet.
        assert_eq!(
            bridge.turn_outlet_on(1).await.unwrap_err(),
            Error::FixtureNotFound(1)
        );
    }

    #[tokio::test]
    async fn test_rejection_is_published_and_recorded() {
        let bridge = connected().await;
        let mut events = bridge.subscribe();
        bridge
            .manager()
            .transport()
            .reject_commands("device unreachable");

        bridge.turn_outlet_on(2).await.unwrap();
        settle().await;

        assert_eq!(
            events.next().await,
            Some(BridgeEvent::CommandRejected {
                identifier: "2".to_string(),
                reason: "device unreachable".to_string(),
            })
        );
        assert_eq!(
            bridge.history().last_error(),
            Some(
                Error::transport_rejected("2", "device unreachable")
                    .to_string()
                    .as_str()
            )
        );
    }

    #[tokio::test]
    async fn test_success_is_published() {
        let bridge = connected().await;
        let mut events = bridge.subscribe();

        bridge.turn_outlet_off(2).await.unwrap();
        assert_eq!(
            events.next().await,
            Some(BridgeEvent::CommandSucceeded {
                identifier: "2".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_lifecycle_through_facade() {
        let bridge = connected().await;
        assert!(bridge.is_connected());

        bridge.disconnect().await.unwrap();
        assert!(!bridge.is_connected());
        bridge.disconnect().await.unwrap();
        assert!(!bridge.is_connected());
        assert_eq!(bridge.state(), ConnectionState::Disconnected);
        assert_eq!(bridge.lights().unwrap_err(), Error::NotConnected);
    }

    #[tokio::test]
    async fn test_connection_lost_blocks_writes() {
        let bridge = connected().await;
        bridge.manager().transport().drop_connection(None);
        settle().await;

        assert_eq!(
            bridge.turn_outlet_on(2).await.unwrap_err(),
            Error::NotConnected
        );
    }

    #[tokio::test]
    async fn test_history_and_diagnostics() {
        let bridge = connected().await;
        bridge.turn_outlet_on(2).await.unwrap();
        settle().await;

        let history = bridge.history();
        let records: Vec<_> = history.entries().map(|e| e.record.clone()).collect();
        assert_eq!(
            records,
            vec![
                HistoryRecord::Received {
                    event: TransportEvent::Connected
                },
                HistoryRecord::Sent {
                    identifier: "2".to_string(),
                    command: translate(&LightStateUpdate::from(PowerMode::On)),
                },
                HistoryRecord::Received {
                    event: TransportEvent::CommandSucceeded {
                        identifier: "2".to_string()
                    }
                },
            ]
        );

        let diag = bridge.diagnostics();
        assert_eq!(diag["state"], "Connected");
        assert_eq!(diag["lights"], 2);
        assert_eq!(diag["outlets"], 1);
        assert_eq!(diag["app_name"], "Adventure Room");
        assert_eq!(diag["history"]["sent"], 1);
        assert_eq!(diag["history"]["received"], 2);
        assert_eq!(diag["history"]["rejected"], 0);

        bridge.clear_history();
        assert!(bridge.history().is_empty());
    }

    #[tokio::test]
    async fn test_outlet_update_carries_only_power() {
        let bridge = connected().await;
        let mut update = LightStateUpdate::new();
        update.power(PowerMode::On);
        update.brightness(&Brightness::create(5000).unwrap());
        update.color(&Color::rgb(255, 0, 0));
        update.transition(&TransitionTime::from_millis(200));

        let command = bridge.update_light_state(2, &update).await.unwrap();
        assert_eq!(
            serde_json::to_value(&command).unwrap(),
            json!({"on": true, "transitiontime": 2})
        );

        // A color-only update leaves nothing for an outlet.
        let command = bridge
            .update_light_state(2, &LightStateUpdate::from(&Color::rgb(1, 2, 3)))
            .await
            .unwrap();
        assert!(command.is_empty());
    }

    #[tokio::test]
    async fn test_connect_passes_config_to_transport() {
        let bridge = connected().await;
        let config = bridge.manager().transport().last_config().unwrap();
        assert_eq!(config.address.as_str(), "10.0.0.2");
        assert_eq!(config.username.expose(), "stage-user");
        assert_eq!(config.device_name, "Adventure Room - Philips Hue Module");
    }

    #[tokio::test]
    async fn test_translation_is_pure() {
        let bridge = connected().await;
        let update = LightStateUpdate::from(&Brightness::create(10000).unwrap());
        let first = bridge.update_light_state(3, &update).await.unwrap();
        let second = bridge.update_light_state(3, &update).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.get_bri(), Some(254));
    }
}
