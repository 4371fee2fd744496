//! # hue_bridge_rs
//!
//! An async Rust library for driving the lights and outlets behind a Philips
//! Hue style lighting bridge.
//!
//! The crate sits between a show controller and a vendor bridge client. It
//! lists fixtures, tells color lights apart from plain on/off outlets, and
//! turns partial state requests into the bridge's native command shape. The
//! vendor client itself is plugged in through the [`BridgeTransport`] trait.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::str::FromStr;
//! use std::time::Duration;
//! use hue_bridge_rs::{Bridge, BridgeConfig, Color, LightStateUpdate};
//!
//! // Works with any async runtime!
//! async fn paint_it_blue(transport: MyTransport) -> Result<(), Box<dyn std::error::Error>> {
//!     let bridge = Bridge::new(transport);
//!     bridge.connect(&BridgeConfig::new("192.168.1.20", "stage-user")?).await?;
//!     bridge.wait_for_connection(Duration::from_secs(10)).await?;
//!
//!     let update = LightStateUpdate::from(&Color::from_str("0,0,255")?);
//!     for light in bridge.lights()? {
//!         bridge.update_light_state(light.id(), &update).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Runtime Agnostic**: Works with tokio, async-std, or smol async runtimes
//! - **Fixture Classification**: Lights and outlets by declared hardware type, see [`LightType`]
//! - **Partial Updates**: Only the fields set on a [`LightStateUpdate`] reach the bridge
//! - **Exclusive Color**: RGB, hue/saturation or white temperature via [`ColorSetting`]
//! - **Power-off Short-circuit**: Turning a light off drops every other field
//! - **Connection Lifecycle**: Explicit state machine with [`BridgeEvent`] notifications
//! - **History**: Sent commands and bridge notifications in a [`CommandHistory`]
//!
//! ## Units
//!
//! Brightness, hue, saturation and white temperature are given in basis points
//! (0-10000) and scaled to the bridge's native ranges by [`translate`].
//! Transitions are given in milliseconds and sent in 100ms steps.
//!
//! ## Runtime Selection
//!
//! This library is runtime-agnostic. Select your preferred runtime using feature flags:
//!
//! ### Using tokio (default)
//!
//! ```toml
//! [dependencies]
//! hue-bridge-rs = "0.1"
//! tokio = { version = "1", features = ["rt-multi-thread", "macros"] }
//! ```
//!
//! ### Using async-std
//!
//! ```toml
//! [dependencies]
//! hue-bridge-rs = { version = "0.1", default-features = false, features = ["runtime-async-std"] }
//! async-std = { version = "1.12", features = ["attributes"] }
//! ```
//!
//! ### Using smol
//!
//! ```toml
//! [dependencies]
//! hue-bridge-rs = { version = "0.1", default-features = false, features = ["runtime-smol"] }
//! smol = "2"
//! ```
//!
//! ## Feature Flags
//!
//! - `runtime-tokio` (default): Use the tokio async runtime
//! - `runtime-async-std`: Use the async-std runtime
//! - `runtime-smol`: Use the smol runtime

mod bridge;
mod classifier;
mod command;
mod config;
mod connection;
mod errors;
mod fixture;
mod history;
mod lifecycle;
mod light_type;
pub mod runtime;
mod state;
#[cfg(test)]
mod testing;
mod translator;
mod transport;
mod types;

// Re-export public API
pub use bridge::Bridge;
pub use classifier::{Classified, classify};
pub use command::LightCommand;
pub use config::{BridgeAddress, BridgeConfig, Credential};
pub use connection::ConnectionManager;
pub use errors::Error;
pub use fixture::{Fixture, FixtureId};
pub use history::{CommandHistory, HistoryEntry, HistoryRecord, HistorySummary};
pub use lifecycle::{BridgeEvent, ConnectionState};
pub use light_type::{FixtureKind, LightType};
pub use state::{ColorMode, ColorSetting, LightState, LightStateUpdate};
pub use translator::translate;
pub use transport::{BridgeTransport, EventSender, NativeLight, NativeLightState, TransportEvent};
pub use types::{Brightness, Color, ColorTemperature, HueSaturation, PowerMode, TransitionTime};
