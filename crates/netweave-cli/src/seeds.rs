//! Seed device list loading

use anyhow::{Context, Result};
use netweave_core::DeviceParams;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct DeviceList {
    #[serde(default, rename = "device")]
    devices: Vec<DeviceParams>,
}

/// Load `[[device]]` entries; an unreadable or malformed file is fatal
pub fn load_devices(path: &Path) -> Result<Vec<DeviceParams>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read device list {}", path.display()))?;
    let devices = parse_devices(&content)
        .with_context(|| format!("Invalid device list {}", path.display()))?;

    if devices.is_empty() {
        warn!(path = %path.display(), "Device list has no [[device]] entries");
    } else {
        info!(path = %path.display(), count = devices.len(), "Loaded seed devices");
    }
    Ok(devices)
}

pub fn parse_devices(content: &str) -> Result<Vec<DeviceParams>> {
    let list: DeviceList = toml::from_str(content)?;
    Ok(list.devices)
}
