//! Netweave Discovery - Neighbor-protocol network discovery
//!
//! This crate turns device command output into a discovered topology:
//! - Parsers for CDP/LLDP neighbor detail, `show version`, and `show interfaces`
//! - CDP/LLDP neighbor reconciliation
//! - Address validation and excluded ranges
//! - A breadth-first frontier that visits devices through a session provider

pub mod exclusion;
pub mod frontier;
pub mod input;
pub mod parser;
pub mod reconcile;

pub use exclusion::{canonical_address, parse_address, AddressError, ExclusionList};
pub use frontier::{
    assemble_record, Decision, Frontier, FrontierConfig, RunSummary, VisitState,
    AUXILIARY_COMMANDS, CDP_COMMAND, DEFAULT_MAX_DEVICES, INTERFACES_COMMAND, LLDP_COMMAND,
    VERSION_COMMAND,
};
pub use parser::{parse_interfaces, parse_neighbors, parse_version, CommandOutput};
pub use reconcile::merge;
