//! Address validation and excluded-range matching

use ipnetwork::IpNetwork;
use std::net::IpAddr;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid IP address: {0:?}")]
    Invalid(String),
}

/// Parse a management address as found in device lists and neighbor output
pub fn parse_address(address: &str) -> Result<IpAddr, AddressError> {
    address
        .trim()
        .parse::<IpAddr>()
        .map_err(|_| AddressError::Invalid(address.to_string()))
}

/// Key used for an address everywhere in a run
///
/// Parsable addresses take their canonical text form, so `2001:DB8:0:0::1`
/// and `2001:db8::1` are the same device. Anything else is only trimmed and
/// gets rejected when it is dequeued.
pub fn canonical_address(address: &str) -> String {
    match parse_address(address) {
        Ok(ip) => ip.to_string(),
        Err(_) => address.trim().to_string(),
    }
}

/// Address ranges that must never be visited
#[derive(Debug, Clone, Default)]
pub struct ExclusionList {
    ranges: Vec<IpNetwork>,
}

impl ExclusionList {
    /// Build from CIDR strings, ignoring (and logging) entries that do not parse
    pub fn from_cidrs<S: AsRef<str>>(cidrs: &[S]) -> Self {
        let ranges = cidrs
            .iter()
            .filter_map(|cidr| {
                let cidr = cidr.as_ref().trim();
                match cidr.parse::<IpNetwork>() {
                    Ok(network) => Some(network),
                    Err(e) => {
                        warn!(subnet = %cidr, error = %e, "Invalid subnet format, ignoring");
                        None
                    }
                }
            })
            .collect();
        Self { ranges }
    }

    /// The first range containing `ip`, if any
    pub fn matching(&self, ip: IpAddr) -> Option<&IpNetwork> {
        self.ranges.iter().find(|network| network.contains(ip))
    }

    pub fn is_excluded(&self, ip: IpAddr) -> bool {
        self.matching(ip).is_some()
    }

    pub fn ranges(&self) -> &[IpNetwork] {
        &self.ranges
    }
}
