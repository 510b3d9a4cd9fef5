//! Topology graph derived from the device store
//!
//! Nodes are stored devices; edges are neighbor relationships between two
//! stored devices, deduplicated by unordered address pair.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::device::DeviceRecord;
use crate::store::DeviceStore;

/// Coarse role of a device, used for diagram styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Switch,
    Router,
    Firewall,
}

impl DeviceType {
    /// Guess the role from the hardware model, then from hostname hints
    pub fn classify(record: &DeviceRecord) -> Self {
        let hardware = record.hardware.as_deref().unwrap_or("").to_lowercase();
        let hostname = record.hostname.as_deref().unwrap_or("").to_lowercase();

        let any_in = |haystack: &str, needles: &[&str]| needles.iter().any(|n| haystack.contains(n));

        if any_in(&hardware, &["cat", "2960", "3750", "9300"]) {
            DeviceType::Switch
        } else if any_in(&hardware, &["isr", "4300", "4400", "1900", "2900", "3900"]) {
            DeviceType::Router
        } else if any_in(&hardware, &["asa", "firepower"]) {
            DeviceType::Firewall
        } else if hostname.contains("sw") {
            DeviceType::Switch
        } else if any_in(&hostname, &["rt", "rtr"]) {
            DeviceType::Router
        } else if hostname.contains("fw") {
            DeviceType::Firewall
        } else {
            DeviceType::Switch
        }
    }
}

/// A node in the topology graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyNode {
    /// Management address
    pub address: String,
    /// Hostname, or the address when unknown
    pub label: String,
    pub device_type: DeviceType,
}

/// An undirected link between two stored devices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyEdge {
    pub address_a: String,
    pub address_b: String,
    /// Interface on `address_a`
    pub local_interface: String,
    /// Interface on `address_b`
    pub remote_interface: String,
}

/// Nodes and links ready for a renderer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Topology {
    nodes: BTreeMap<String, TopologyNode>,
    edges: Vec<TopologyEdge>,
}

impl Topology {
    /// Create a new empty topology
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            edges: Vec::new(),
        }
    }

    /// Build topology from the device store
    pub fn from_store(store: &DeviceStore) -> Self {
        let mut topology = Self::new();

        for record in store.records() {
            topology.add_node(TopologyNode {
                address: record.address.clone(),
                label: record.label().to_string(),
                device_type: DeviceType::classify(record),
            });
        }

        let mut linked: HashSet<(String, String)> = HashSet::new();
        for record in store.records() {
            for neighbor in &record.neighbors {
                if !store.contains(&neighbor.address) || neighbor.address == record.address {
                    continue;
                }

                let pair = if record.address <= neighbor.address {
                    (record.address.clone(), neighbor.address.clone())
                } else {
                    (neighbor.address.clone(), record.address.clone())
                };
                if !linked.insert(pair) {
                    continue;
                }

                topology.edges.push(TopologyEdge {
                    address_a: record.address.clone(),
                    address_b: neighbor.address.clone(),
                    local_interface: neighbor.local_interface.clone().unwrap_or_default(),
                    remote_interface: neighbor.remote_interface.clone().unwrap_or_default(),
                });
            }
        }

        tracing::debug!(
            nodes = topology.nodes.len(),
            edges = topology.edges.len(),
            "Built topology graph"
        );
        topology
    }

    /// Add a node to the topology
    pub fn add_node(&mut self, node: TopologyNode) {
        self.nodes.insert(node.address.clone(), node);
    }

    /// Get a node by address
    pub fn get_node(&self, address: &str) -> Option<&TopologyNode> {
        self.nodes.get(address)
    }

    /// All nodes in address order
    pub fn nodes(&self) -> impl Iterator<Item = &TopologyNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[TopologyEdge] {
        &self.edges
    }

    /// Get topology as JSON-serializable structure
    pub fn to_graph(&self) -> TopologyGraph {
        TopologyGraph {
            nodes: self.nodes.values().cloned().collect(),
            edges: self.edges.clone(),
        }
    }
}

/// Serializable topology graph handed to renderers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyGraph {
    pub nodes: Vec<TopologyNode>,
    pub edges: Vec<TopologyEdge>,
}
