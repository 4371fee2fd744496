//! Bridge connection configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// Network address of a bridge: a host name or an IP address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BridgeAddress(String);

impl BridgeAddress {
    pub fn new(address: &str) -> Result<Self> {
        let address = address.trim();
        if address.is_empty() {
            return Err(Error::invalid_value("address", "must not be empty"));
        }
        Ok(BridgeAddress(address.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BridgeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The whitelisted user name the bridge handed out during pairing.
///
/// Never printed in full.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(username: &str) -> Result<Self> {
        if username.is_empty() {
            return Err(Error::invalid_value("username", "must not be empty"));
        }
        Ok(Credential(username.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Everything needed to open a session with a bridge.
///
/// # Examples
///
/// ```
/// use hue_bridge_rs::BridgeConfig;
///
/// let config = BridgeConfig::from_json(r#"{"address": "192.168.1.2", "username": "abc123"}"#).unwrap();
/// assert_eq!(config.address.as_str(), "192.168.1.2");
/// assert_eq!(config.app_name, "Adventure Room");
/// assert!(!format!("{:?}", config).contains("abc123"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfig {
    pub address: BridgeAddress,
    pub username: Credential,
    /// Application name announced to the bridge.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Device name announced to the bridge.
    #[serde(default = "default_device_name")]
    pub device_name: String,
}

fn default_app_name() -> String {
    String::from("Adventure Room")
}

fn default_device_name() -> String {
    String::from("Adventure Room - Philips Hue Module")
}

impl BridgeConfig {
    pub fn new(address: &str, username: &str) -> Result<Self> {
        Ok(BridgeConfig {
            address: BridgeAddress::new(address)?,
            username: Credential::new(username)?,
            app_name: default_app_name(),
            device_name: default_device_name(),
        })
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: BridgeConfig = serde_json::from_str(json).map_err(Error::JsonLoad)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        BridgeAddress::new(self.address.as_str())?;
        Credential::new(self.username.expose())?;
        Ok(())
    }
}
