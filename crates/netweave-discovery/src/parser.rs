//! Parsers for neighbor detail, `show version`, and `show interfaces` output
//!
//! Every extraction is best-effort: fields are matched independently, a field
//! that cannot be found stays empty, and nothing here returns an error. Neighbor
//! blocks without a device identifier or an address are dropped.

use netweave_core::{InterfaceAttributes, NeighborRecord, Protocol, VersionInfo};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::{debug, trace};

/// Command output as handed to the parsers
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput<T> {
    /// Screen text captured from the device
    Raw(String),
    /// Records already produced by an upstream templated extractor
    Structured(T),
}

/// Label-anchored patterns for one neighbor protocol
struct NeighborPatterns {
    separator: Regex,
    device_id: Regex,
    address: Regex,
    platform: Option<Regex>,
    local_interface: Regex,
    remote_interface: Regex,
}

static CDP: LazyLock<NeighborPatterns> = LazyLock::new(|| NeighborPatterns {
    separator: Regex::new(r"-{3,}").unwrap(),
    device_id: Regex::new(r"Device ID:[ \t]*([^\r\n]+)").unwrap(),
    address: Regex::new(r"IP(?:v4)? [Aa]ddress:[ \t]*([^\r\n]+)").unwrap(),
    platform: Some(Regex::new(r"Platform:[ \t]*([^,\r\n]+)").unwrap()),
    local_interface: Regex::new(r"Interface:[ \t]*([^,\r\n]+)").unwrap(),
    remote_interface: Regex::new(r"Port ID \(outgoing port\):[ \t]*([^\r\n]+)").unwrap(),
});

static LLDP: LazyLock<NeighborPatterns> = LazyLock::new(|| NeighborPatterns {
    separator: Regex::new(r"\r?\n[ \t]*\r?\nDevice ID:[^\r\n]*|-{3,}").unwrap(),
    device_id: Regex::new(r"System Name:[ \t]*([^\r\n]+)").unwrap(),
    address: Regex::new(
        r"Management Address(?:es)?:[ \t]*(?:\r?\n[ \t]*)?(?:IP(?:v[46])?:[ \t]*)?([0-9]{1,3}(?:\.[0-9]{1,3}){3}|[0-9A-Fa-f]*:[0-9A-Fa-f:.]+)",
    )
    .unwrap(),
    platform: None,
    local_interface: Regex::new(r"Local (?:Interface|Intf):[ \t]*([^\r\n]+)").unwrap(),
    remote_interface: Regex::new(r"Port (?:ID|id):[ \t]*([^\r\n]+)").unwrap(),
});

static HARDWARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:cisco|Cisco)\s+(\S+)(?:\s+\S+){0,3}\s+processor").unwrap());
static SOFTWARE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Software\b[^\r\n]*?\bVersion\s+([^,\s]+)").unwrap());
static HOSTNAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\S+)\s+uptime\s+is").unwrap());

/// Parse `show cdp neighbors detail` / `show lldp neighbors detail` output
pub fn parse_neighbors(
    protocol: Protocol,
    input: CommandOutput<Vec<NeighborRecord>>,
) -> Vec<NeighborRecord> {
    let text = match input {
        CommandOutput::Structured(records) => {
            return records.into_iter().filter(NeighborRecord::is_valid).collect();
        }
        CommandOutput::Raw(text) => text,
    };

    let patterns: &NeighborPatterns = match protocol {
        Protocol::Cdp => &CDP,
        Protocol::Lldp => &LLDP,
    };

    let mut neighbors = Vec::new();
    for block in patterns.separator.split(&text) {
        if block.trim().is_empty() {
            continue;
        }
        match parse_neighbor_block(protocol, patterns, block).filter(NeighborRecord::is_valid) {
            Some(neighbor) => neighbors.push(neighbor),
            None => trace!(protocol = %protocol, "Dropping neighbor block without device ID or address"),
        }
    }

    debug!(protocol = %protocol, count = neighbors.len(), "Parsed neighbors");
    neighbors
}

fn parse_neighbor_block(
    protocol: Protocol,
    patterns: &NeighborPatterns,
    block: &str,
) -> Option<NeighborRecord> {
    let device_id = first_capture(&patterns.device_id, block)?;
    let address = first_capture(&patterns.address, block)?;

    let mut neighbor = NeighborRecord::new(protocol, device_id, address);
    neighbor.platform = patterns
        .platform
        .as_ref()
        .and_then(|re| first_capture(re, block));
    neighbor.local_interface = first_capture(&patterns.local_interface, block);
    neighbor.remote_interface = first_capture(&patterns.remote_interface, block);
    Some(neighbor)
}

/// Parse `show version` output
pub fn parse_version(input: CommandOutput<Vec<VersionInfo>>) -> VersionInfo {
    let text = match input {
        CommandOutput::Structured(records) => {
            return records.into_iter().next().unwrap_or_default();
        }
        CommandOutput::Raw(text) => text,
    };

    VersionInfo {
        hardware: first_capture(&HARDWARE, &text),
        version: first_capture(&SOFTWARE_VERSION, &text),
        hostname: first_capture(&HOSTNAME, &text),
    }
}

/// Key `show interfaces` rows by interface name
///
/// Raw text is not parsed yet and yields an empty map.
pub fn parse_interfaces(
    input: CommandOutput<Vec<InterfaceAttributes>>,
) -> BTreeMap<String, InterfaceAttributes> {
    match input {
        CommandOutput::Structured(rows) => rows
            .into_iter()
            .map(|row| {
                let name = row
                    .get("interface")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string());
                (name, row)
            })
            .collect(),
        CommandOutput::Raw(_) => BTreeMap::new(),
    }
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}
