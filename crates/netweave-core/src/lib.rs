//! Netweave Core - Device records, record store, and topology graph
//!
//! This crate provides the foundational types for the Netweave system:
//! - Device, neighbor, and version records produced by discovery
//! - Device record store with JSON persistence
//! - Topology graph derivation for renderers

pub mod device;
pub mod store;
pub mod topology;

pub use device::{
    Credentials, DeviceParams, DeviceRecord, InterfaceAttributes, NeighborRecord, Protocol,
    VersionInfo,
};
pub use store::{DeviceStore, StoreError};
pub use topology::{DeviceType, Topology, TopologyEdge, TopologyGraph, TopologyNode};
