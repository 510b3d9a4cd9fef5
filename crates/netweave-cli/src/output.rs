//! Result files and the console summary

use anyhow::Result;
use chrono::{DateTime, Local};
use netweave_core::{DeviceStore, Topology};
use netweave_discovery::RunSummary;
use std::path::{Path, PathBuf};
use tracing::info;

/// Paths written for one run
#[derive(Debug)]
pub struct WrittenFiles {
    pub discovery: PathBuf,
    pub topology: PathBuf,
}

/// Write `discovery_<ts>.json` and `topology_<ts>.json` into `dir`
pub fn write_results(store: &DeviceStore, dir: &Path, now: DateTime<Local>) -> Result<WrittenFiles> {
    let stamp = now.format("%Y%m%d_%H%M%S");
    let discovery = dir.join(format!("discovery_{}.json", stamp));
    let topology = dir.join(format!("topology_{}.json", stamp));

    store.save(&discovery)?;
    info!(path = %discovery.display(), devices = store.len(), "Saved discovery results");

    let graph = Topology::from_store(store).to_graph();
    std::fs::write(&topology, serde_json::to_string_pretty(&graph)?)?;
    info!(
        path = %topology.display(),
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "Saved topology"
    );

    Ok(WrittenFiles {
        discovery,
        topology,
    })
}

/// Human-readable run report
pub fn render_summary(store: &DeviceStore, summary: &RunSummary) -> String {
    let mut out = format!(
        "Discovered {} devices ({} unreachable, {} skipped, {} left unvisited):\n",
        store.len(),
        summary.failed,
        summary.skipped,
        summary.unvisited
    );
    for record in store.records() {
        out.push_str(&format!("  - {} at {}\n", record.label(), record.address));
        if let Some(hardware) = &record.hardware {
            out.push_str(&format!("    Hardware: {}\n", hardware));
        }
        if let Some(version) = &record.version {
            out.push_str(&format!("    Version: {}\n", version));
        }
        if !record.neighbors.is_empty() {
            out.push_str(&format!("    Neighbors: {}\n", record.neighbors.len()));
        }
    }
    out
}
