//! Merging of CDP and LLDP neighbor lists

use netweave_core::NeighborRecord;
use std::collections::HashSet;

/// Merge two neighbor lists, CDP first
///
/// CDP records are kept verbatim and in order. An LLDP record is appended only
/// when no earlier record (CDP or LLDP) has the same address.
pub fn merge(cdp: Vec<NeighborRecord>, lldp: Vec<NeighborRecord>) -> Vec<NeighborRecord> {
    let mut seen: HashSet<String> = cdp.iter().map(|n| n.address.clone()).collect();
    let mut merged = cdp;

    for neighbor in lldp {
        if seen.insert(neighbor.address.clone()) {
            merged.push(neighbor);
        }
    }

    merged
}
