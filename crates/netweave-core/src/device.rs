//! Device and neighbor records produced by a discovery run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attributes of one interface, as reported by a structured extractor
pub type InterfaceAttributes = BTreeMap<String, String>;

/// Neighbor discovery protocol a record was learned from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Cisco Discovery Protocol
    Cdp,
    /// Link Layer Discovery Protocol
    Lldp,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::Cdp => write!(f, "CDP"),
            Protocol::Lldp => write!(f, "LLDP"),
        }
    }
}

/// An adjacent device reported by CDP or LLDP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborRecord {
    /// Remote device identifier (CDP device ID or LLDP system name)
    pub device_id: String,
    /// Remote management address
    pub address: String,
    /// Remote platform/model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Interface on the reporting device
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_interface: Option<String>,
    /// Interface on the remote device
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_interface: Option<String>,
    /// Protocol the record came from
    pub protocol: Protocol,
}

impl NeighborRecord {
    /// Create a record with only the mandatory fields set
    pub fn new(protocol: Protocol, device_id: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            address: address.into(),
            platform: None,
            local_interface: None,
            remote_interface: None,
            protocol,
        }
    }

    /// A neighbor is only usable as a traversal edge with both identity fields
    pub fn is_valid(&self) -> bool {
        !self.device_id.trim().is_empty() && !self.address.trim().is_empty()
    }
}

/// Identity information extracted from `show version`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Hardware model (e.g. "WS-C2960-24TT-L")
    #[serde(default)]
    pub hardware: Option<String>,
    /// Software version (e.g. "15.0(2)SE11")
    #[serde(default)]
    pub version: Option<String>,
    /// Device hostname
    #[serde(default)]
    pub hostname: Option<String>,
}

/// Login credentials for a device
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Connection parameters for one device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceParams {
    /// Management address to connect to
    #[serde(alias = "ip")]
    pub address: String,
    #[serde(flatten)]
    pub credentials: Credentials,
    /// Device OS flavor (informational, e.g. "cisco_ios")
    #[serde(default = "default_device_type")]
    pub device_type: String,
    /// SSH port override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

fn default_device_type() -> String {
    "cisco_ios".to_string()
}

impl DeviceParams {
    pub fn new(address: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            address: address.into(),
            credentials,
            device_type: default_device_type(),
            port: None,
        }
    }

    /// Same credentials and device type, different address
    pub fn for_neighbor(&self, address: &str) -> Self {
        Self {
            address: address.to_string(),
            ..self.clone()
        }
    }
}

/// Everything learned about a single device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Management address (unique key)
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// When the device was processed
    pub discovered_at: DateTime<Utc>,
    /// Merged CDP/LLDP neighbors
    #[serde(default)]
    pub neighbors: Vec<NeighborRecord>,
    /// Interface name -> attributes
    #[serde(default)]
    pub interfaces: BTreeMap<String, InterfaceAttributes>,
    /// Raw command output, kept for troubleshooting only
    #[serde(skip)]
    pub raw_output: BTreeMap<String, String>,
}

impl DeviceRecord {
    /// Minimal record for a device that could not be reached
    pub fn unreachable(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            hostname: None,
            hardware: None,
            version: None,
            discovered_at: Utc::now(),
            neighbors: Vec::new(),
            interfaces: BTreeMap::new(),
            raw_output: BTreeMap::new(),
        }
    }

    /// Full record for a device that answered
    pub fn discovered(
        address: impl Into<String>,
        version: VersionInfo,
        neighbors: Vec<NeighborRecord>,
        interfaces: BTreeMap<String, InterfaceAttributes>,
        raw_output: BTreeMap<String, String>,
    ) -> Self {
        Self {
            address: address.into(),
            hostname: version.hostname,
            hardware: version.hardware,
            version: version.version,
            discovered_at: Utc::now(),
            neighbors,
            interfaces,
            raw_output,
        }
    }

    /// Display label: hostname when known, otherwise the address
    pub fn label(&self) -> &str {
        self.hostname.as_deref().unwrap_or(&self.address)
    }

    /// Addresses of all reported neighbors, in record order
    pub fn neighbor_addresses(&self) -> impl Iterator<Item = &str> {
        self.neighbors.iter().map(|n| n.address.as_str())
    }
}
