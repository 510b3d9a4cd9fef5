//! Conversion of session command outcomes into parser input
//!
//! Structured rows come from templated extractors whose column names vary
//! between templates, so a handful of common aliases are accepted per field.
//! Failed commands become empty raw text.

use netweave_core::{InterfaceAttributes, NeighborRecord, Protocol, VersionInfo};
use netweave_session::CommandOutcome;
use serde_json::Value;

use crate::parser::CommandOutput;

const DEVICE_ID_KEYS: &[&str] = &[
    "device_id",
    "neighbor_name",
    "destination_host",
    "neighbor",
    "system_name",
];
const ADDRESS_KEYS: &[&str] = &["address", "ip", "management_ip", "management_address", "mgmt_address"];
const PLATFORM_KEYS: &[&str] = &["platform"];
const LOCAL_INTERFACE_KEYS: &[&str] = &["local_interface", "local_port"];
const REMOTE_INTERFACE_KEYS: &[&str] = &[
    "remote_interface",
    "remote_port",
    "neighbor_interface",
    "neighbor_port_id",
    "port_id",
];

/// Neighbor parser input; rows without identifier or address are discarded here
pub fn neighbor_input(
    outcome: Option<&CommandOutcome>,
    protocol: Protocol,
) -> CommandOutput<Vec<NeighborRecord>> {
    match outcome {
        Some(CommandOutcome::Text(text)) => CommandOutput::Raw(text.clone()),
        Some(CommandOutcome::Records(rows)) => CommandOutput::Structured(
            rows.iter()
                .filter_map(|row| {
                    let mut neighbor = NeighborRecord::new(
                        protocol,
                        row_string(row, DEVICE_ID_KEYS)?,
                        row_string(row, ADDRESS_KEYS)?,
                    );
                    neighbor.platform = row_string(row, PLATFORM_KEYS);
                    neighbor.local_interface = row_string(row, LOCAL_INTERFACE_KEYS);
                    neighbor.remote_interface = row_string(row, REMOTE_INTERFACE_KEYS);
                    Some(neighbor)
                })
                .collect(),
        ),
        Some(CommandOutcome::Error(_)) | None => CommandOutput::Raw(String::new()),
    }
}

pub fn version_input(outcome: Option<&CommandOutcome>) -> CommandOutput<Vec<VersionInfo>> {
    match outcome {
        Some(CommandOutcome::Text(text)) => CommandOutput::Raw(text.clone()),
        Some(CommandOutcome::Records(rows)) => CommandOutput::Structured(
            rows.iter()
                .map(|row| VersionInfo {
                    hardware: row_string(row, &["hardware", "model"]),
                    version: row_string(row, &["version", "software_version"]),
                    hostname: row_string(row, &["hostname"]),
                })
                .collect(),
        ),
        Some(CommandOutcome::Error(_)) | None => CommandOutput::Raw(String::new()),
    }
}

pub fn interface_input(outcome: Option<&CommandOutcome>) -> CommandOutput<Vec<InterfaceAttributes>> {
    match outcome {
        Some(CommandOutcome::Text(text)) => CommandOutput::Raw(text.clone()),
        Some(CommandOutcome::Records(rows)) => CommandOutput::Structured(
            rows.iter()
                .filter_map(Value::as_object)
                .map(|row| {
                    row.iter()
                        .filter_map(|(key, value)| scalar_string(value).map(|v| (key.clone(), v)))
                        .collect::<InterfaceAttributes>()
                })
                .collect(),
        ),
        Some(CommandOutcome::Error(_)) | None => CommandOutput::Raw(String::new()),
    }
}

/// First non-empty value among `keys`; list values contribute their first element
fn row_string(row: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| match row.get(*key)? {
            Value::Array(items) => items.first().and_then(scalar_string),
            value => scalar_string(value),
        })
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
