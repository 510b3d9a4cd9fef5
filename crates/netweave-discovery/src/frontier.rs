//! Breadth-first discovery over CDP/LLDP neighbor relationships
//!
//! The frontier owns the pending queue, the attempted set, and the device
//! store. Devices are visited one at a time in FIFO order. Every successful
//! visit enqueues the device's neighbors with the parent's credentials.

use netweave_core::{DeviceParams, DeviceRecord, DeviceStore, Protocol};
use netweave_session::{CommandOutputs, SessionProvider};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet, VecDeque};
use tracing::{debug, error, info, warn, Instrument, Span};

use crate::exclusion::{canonical_address, parse_address, ExclusionList};
use crate::input::{interface_input, neighbor_input, version_input};
use crate::parser::{parse_interfaces, parse_neighbors, parse_version};
use crate::reconcile::merge;

pub const VERSION_COMMAND: &str = "show version";
pub const CDP_COMMAND: &str = "show cdp neighbors detail";
pub const LLDP_COMMAND: &str = "show lldp neighbors detail";
pub const INTERFACES_COMMAND: &str = "show interfaces";

/// Commands whose output is only kept as raw text
pub const AUXILIARY_COMMANDS: &[&str] = &[
    "show ip interface brief",
    "show vlan brief",
    "show spanning-tree bridge",
    "show ip route",
];

pub const DEFAULT_MAX_DEVICES: usize = 100;

/// Traversal bounds and command set
#[derive(Debug, Clone)]
pub struct FrontierConfig {
    /// Maximum number of stored devices
    pub max_devices: usize,
    /// Ranges that are never visited
    pub excluded: ExclusionList,
    /// Diagnostic commands run after the discovery commands
    pub auxiliary_commands: Vec<String>,
}

impl Default for FrontierConfig {
    fn default() -> Self {
        Self {
            max_devices: DEFAULT_MAX_DEVICES,
            excluded: ExclusionList::default(),
            auxiliary_commands: AUXILIARY_COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl FrontierConfig {
    /// Full ordered command set sent to every device
    pub fn commands(&self) -> Vec<String> {
        let mut commands: Vec<String> = [VERSION_COMMAND, CDP_COMMAND, LLDP_COMMAND, INTERFACES_COMMAND]
            .iter()
            .map(|c| c.to_string())
            .collect();
        for extra in &self.auxiliary_commands {
            if !commands.contains(extra) {
                commands.push(extra.clone());
            }
        }
        commands
    }
}

/// Where an address is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitState {
    /// Queued, not yet processed
    Pending,
    /// Being visited right now
    InProgress,
    /// Session opened and commands run
    Discovered,
    /// Session could not be opened
    Failed,
    /// Address inside an excluded range
    SkippedExcluded,
    /// Address does not parse as an IP address
    SkippedInvalidAddress,
    /// Queue entry for an address that was already processed
    SkippedDuplicate,
}

/// One dequeued entry and what was decided for it, in processing order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub address: String,
    pub state: VisitState,
}

/// Counters for a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub discovered: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Entries still queued when the run stopped
    pub unvisited: usize,
}

/// Breadth-first discovery engine
pub struct Frontier<S: SessionProvider> {
    session: S,
    config: FrontierConfig,
    span: Span,
    queue: VecDeque<DeviceParams>,
    /// Every address ever queued, in canonical form; superset of `attempted`
    seen: HashSet<String>,
    attempted: BTreeMap<String, VisitState>,
    decisions: Vec<Decision>,
    store: DeviceStore,
}

impl<S: SessionProvider> Frontier<S> {
    /// Create a frontier; all of its events are emitted inside `span`
    pub fn new(session: S, config: FrontierConfig, span: Span) -> Self {
        Self {
            session,
            config,
            span,
            queue: VecDeque::new(),
            seen: HashSet::new(),
            attempted: BTreeMap::new(),
            decisions: Vec::new(),
            store: DeviceStore::new(),
        }
    }

    /// Queue seed devices in order; repeated seeds are resolved at dequeue time
    pub fn seed(&mut self, devices: impl IntoIterator<Item = DeviceParams>) {
        for mut params in devices {
            params.address = canonical_address(&params.address);
            self.seen.insert(params.address.clone());
            self.queue.push_back(params);
        }
    }

    /// Process the queue until it is empty or the device cap is reached
    pub async fn run(&mut self) -> RunSummary {
        let span = self.span.clone();
        self.drain().instrument(span).await;
        self.summary()
    }

    async fn drain(&mut self) {
        info!(
            seeds = self.queue.len(),
            max_devices = self.config.max_devices,
            excluded_ranges = self.config.excluded.ranges().len(),
            "Starting network discovery"
        );

        while self.store.len() < self.config.max_devices {
            let Some(mut params) = self.queue.pop_front() else {
                break;
            };
            params.address = canonical_address(&params.address);
            let address = params.address.clone();

            if self.attempted.contains_key(&address) {
                debug!(address = %address, "Already attempted, dropping queue entry");
                self.decisions.push(Decision {
                    address,
                    state: VisitState::SkippedDuplicate,
                });
                continue;
            }

            let ip = match parse_address(&address) {
                Ok(ip) => ip,
                Err(e) => {
                    warn!(address = %address, error = %e, "Invalid address, skipping");
                    self.finish(address, VisitState::SkippedInvalidAddress);
                    continue;
                }
            };

            if let Some(range) = self.config.excluded.matching(ip) {
                info!(address = %address, range = %range, "Skipping address in excluded range");
                self.finish(address, VisitState::SkippedExcluded);
                continue;
            }

            self.attempted.insert(address.clone(), VisitState::InProgress);
            let (record, state) = self.visit(&params).await;

            let neighbors: Vec<String> = record.neighbor_addresses().map(str::to_string).collect();
            if let Err(e) = self.store.insert(record) {
                error!(address = %address, error = %e, "Device record not stored");
            }
            self.finish(address.clone(), state);

            if state == VisitState::Discovered {
                self.enqueue_neighbors(&params, &neighbors);
            }
        }

        if !self.queue.is_empty() {
            info!(
                unvisited = self.queue.len(),
                max_devices = self.config.max_devices,
                "Device limit reached, leaving queued devices unvisited"
            );
        }
        info!(devices = self.store.len(), "Discovery complete");
    }

    /// Connect, run the command set, and build the device record
    async fn visit(&self, params: &DeviceParams) -> (DeviceRecord, VisitState) {
        let address = params.address.as_str();
        info!(address = %address, "Starting discovery for device");

        let mut session = match self.session.connect(params).await {
            Ok(session) => session,
            Err(e) => {
                error!(address = %address, kind = e.kind(), error = %e, "Failed to connect, skipping");
                return (DeviceRecord::unreachable(address), VisitState::Failed);
            }
        };

        let commands = self.config.commands();
        let outputs = self.session.run(&mut session, &commands).await;
        self.session.disconnect(session).await;

        let failed_commands = outputs.values().filter(|o| o.is_error()).count();
        let record = assemble_record(address, &outputs);
        info!(
            address = %address,
            hostname = record.hostname.as_deref().unwrap_or("-"),
            neighbors = record.neighbors.len(),
            failed_commands = failed_commands,
            "Discovered device"
        );
        (record, VisitState::Discovered)
    }

    fn enqueue_neighbors(&mut self, parent: &DeviceParams, neighbors: &[String]) {
        for neighbor in neighbors {
            let neighbor = canonical_address(neighbor);
            if neighbor == parent.address {
                debug!(address = %parent.address, "Device lists itself as a neighbor, ignoring");
                continue;
            }
            if !self.seen.insert(neighbor.clone()) {
                continue;
            }
            debug!(address = %neighbor, parent = %parent.address, "Queued neighbor");
            self.queue.push_back(parent.for_neighbor(&neighbor));
        }
    }

    fn finish(&mut self, address: String, state: VisitState) {
        self.attempted.insert(address.clone(), state);
        self.decisions.push(Decision { address, state });
    }

    fn summary(&self) -> RunSummary {
        let mut summary = RunSummary {
            unvisited: self.queue.len(),
            ..RunSummary::default()
        };
        for state in self.attempted.values() {
            match state {
                VisitState::Discovered => summary.discovered += 1,
                VisitState::Failed => summary.failed += 1,
                VisitState::Pending | VisitState::InProgress => {}
                _ => summary.skipped += 1,
            }
        }
        summary
    }

    /// Current state of an address, `None` if never seen
    pub fn state(&self, address: &str) -> Option<VisitState> {
        let address = canonical_address(address);
        match self.attempted.get(&address) {
            Some(state) => Some(*state),
            None if self.seen.contains(&address) => Some(VisitState::Pending),
            None => None,
        }
    }

    /// Terminal state of every processed address
    pub fn attempted(&self) -> &BTreeMap<String, VisitState> {
        &self.attempted
    }

    /// Every dequeue decision in processing order
    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    /// Addresses still waiting in the queue, front first
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(|p| p.address.as_str())
    }

    pub fn store(&self) -> &DeviceStore {
        &self.store
    }

    pub fn into_store(self) -> DeviceStore {
        self.store
    }

    pub fn session(&self) -> &S {
        &self.session
    }
}

/// Parse and merge one device's command output into a record
pub fn assemble_record(address: &str, outputs: &CommandOutputs) -> DeviceRecord {
    let version = parse_version(version_input(outputs.get(VERSION_COMMAND)));
    let cdp = parse_neighbors(
        Protocol::Cdp,
        neighbor_input(outputs.get(CDP_COMMAND), Protocol::Cdp),
    );
    let lldp = parse_neighbors(
        Protocol::Lldp,
        neighbor_input(outputs.get(LLDP_COMMAND), Protocol::Lldp),
    );
    let neighbors = merge(cdp, lldp);
    let interfaces = parse_interfaces(interface_input(outputs.get(INTERFACES_COMMAND)));
    let raw_output = outputs
        .iter()
        .map(|(command, outcome)| (command.clone(), outcome.to_raw()))
        .collect();

    DeviceRecord::discovered(address, version, neighbors, interfaces, raw_output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use netweave_core::Credentials;
    use netweave_session::{CommandOutcome, ConnectionError};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Session provider answering from canned per-device output
    #[derive(Default)]
    struct ScriptedProvider {
        devices: HashMap<String, Result<BTreeMap<String, String>, ConnectionError>>,
        connects: Mutex<Vec<DeviceParams>>,
    }

    impl ScriptedProvider {
        fn device(mut self, address: &str, hostname: &str, cdp: &str, lldp: &str) -> Self {
            let mut outputs = BTreeMap::new();
            outputs.insert(
                VERSION_COMMAND.to_string(),
                format!(
                    "Cisco IOS Software, C2960 Software (C2960-LANBASEK9-M), Version 15.0(2)SE11, RELEASE SOFTWARE (fc3)\n\
                     {} uptime is 1 day, 2 hours\n\
                     cisco WS-C2960-24TT-L (PowerPC405) processor (revision B0) with 65536K bytes of memory.\n",
                    hostname
                ),
            );
            outputs.insert(CDP_COMMAND.to_string(), cdp.to_string());
            outputs.insert(LLDP_COMMAND.to_string(), lldp.to_string());
            self.devices.insert(address.to_string(), Ok(outputs));
            self
        }

        fn unreachable(mut self, address: &str, error: ConnectionError) -> Self {
            self.devices.insert(address.to_string(), Err(error));
            self
        }

        fn connected(&self) -> Vec<String> {
            self.connects
                .lock()
                .unwrap()
                .iter()
                .map(|p| p.address.clone())
                .collect()
        }
    }

    #[async_trait]
    impl SessionProvider for ScriptedProvider {
        type Session = String;

        async fn connect(&self, params: &DeviceParams) -> Result<String, ConnectionError> {
            self.connects.lock().unwrap().push(params.clone());
            match self.devices.get(&params.address) {
                Some(Ok(_)) => Ok(params.address.clone()),
                Some(Err(e)) => Err(e.clone()),
                None => Err(ConnectionError::Timeout(params.address.clone())),
            }
        }

        async fn run(&self, session: &mut String, commands: &[String]) -> CommandOutputs {
            let outputs = match self.devices.get(session.as_str()) {
                Some(Ok(outputs)) => outputs.clone(),
                _ => BTreeMap::new(),
            };
            commands
                .iter()
                .map(|command| {
                    let outcome = match outputs.get(command) {
                        Some(text) => CommandOutcome::Text(text.clone()),
                        None => CommandOutcome::Error("% Invalid input detected".to_string()),
                    };
                    (command.clone(), outcome)
                })
                .collect()
        }

        async fn disconnect(&self, _session: String) {}
    }

    fn cdp_entry(device_id: &str, ip: &str) -> String {
        format!(
            "-------------------------\n\
             Device ID: {}\n\
             Entry address(es):\n  IP address: {}\n\
             Platform: cisco WS-C2960-24TT-L,  Capabilities: Switch IGMP\n\
             Interface: GigabitEthernet0/1,  Port ID (outgoing port): GigabitEthernet0/2\n\n",
            device_id, ip
        )
    }

    fn lldp_entry(system_name: &str, ip: &str) -> String {
        format!(
            "\nDevice ID: {}\nLocal Interface: Gi0/3\nPort ID: Gi0/4\nSystem Name: {}\nManagement Address: {}\n",
            system_name, system_name, ip
        )
    }

    fn seed(address: &str) -> DeviceParams {
        DeviceParams::new(
            address,
            Credentials {
                username: "netops".to_string(),
                password: Some("secret".to_string()),
            },
        )
    }

    fn frontier(provider: ScriptedProvider, max_devices: usize, excluded: &[&str]) -> Frontier<ScriptedProvider> {
        let config = FrontierConfig {
            max_devices,
            excluded: ExclusionList::from_cidrs(excluded),
            ..FrontierConfig::default()
        };
        Frontier::new(provider, config, Span::none())
    }

    fn scenario_provider() -> ScriptedProvider {
        let lldp = format!("{}{}", lldp_entry("sw2-lldp", "10.0.0.2"), lldp_entry("SW3", "10.0.0.3"));
        ScriptedProvider::default()
            .device("10.0.0.1", "SW1", &cdp_entry("SW2", "10.0.0.2"), &lldp)
            .device("10.0.0.2", "SW2", "", "")
            .device("10.0.0.3", "SW3", "", "")
    }

    #[tokio::test]
    async fn test_scenario_merges_and_visits_neighbors() {
        let mut frontier = frontier(scenario_provider(), 10, &[]);
        frontier.seed(vec![seed("10.0.0.1")]);
        let summary = frontier.run().await;

        let root = frontier.store().get("10.0.0.1").unwrap();
        assert_eq!(root.hostname.as_deref(), Some("SW1"));
        assert_eq!(root.hardware.as_deref(), Some("WS-C2960-24TT-L"));
        assert_eq!(root.version.as_deref(), Some("15.0(2)SE11"));
        assert_eq!(root.neighbors.len(), 2);
        assert_eq!(root.neighbors[0].address, "10.0.0.2");
        assert_eq!(root.neighbors[0].device_id, "SW2");
        assert_eq!(root.neighbors[0].protocol, Protocol::Cdp);
        assert_eq!(root.neighbors[1].address, "10.0.0.3");
        assert_eq!(root.neighbors[1].protocol, Protocol::Lldp);

        assert_eq!(frontier.store().len(), 3);
        assert_eq!(
            frontier.session().connected(),
            vec!["10.0.0.1", "10.0.0.2", "10.0.0.3"]
        );
        assert_eq!(
            summary,
            RunSummary {
                discovered: 3,
                failed: 0,
                skipped: 0,
                unvisited: 0
            }
        );
    }

    #[tokio::test]
    async fn test_neighbors_inherit_parent_credentials() {
        let mut frontier = frontier(scenario_provider(), 10, &[]);
        frontier.seed(vec![seed("10.0.0.1")]);
        frontier.run().await;

        let connects = frontier.session().connects.lock().unwrap().clone();
        for params in &connects {
            assert_eq!(params.credentials.username, "netops");
            assert_eq!(params.credentials.password.as_deref(), Some("secret"));
        }
    }

    #[tokio::test]
    async fn test_device_cap_of_one() {
        let mut frontier = frontier(scenario_provider(), 1, &[]);
        frontier.seed(vec![seed("10.0.0.1")]);
        let summary = frontier.run().await;

        assert_eq!(frontier.store().len(), 1);
        assert!(frontier.store().contains("10.0.0.1"));
        assert_eq!(frontier.session().connected(), vec!["10.0.0.1"]);
        assert_eq!(frontier.pending().collect::<Vec<_>>(), vec!["10.0.0.2", "10.0.0.3"]);
        assert_eq!(frontier.state("10.0.0.2"), Some(VisitState::Pending));
        assert_eq!(summary.unvisited, 2);
    }

    #[tokio::test]
    async fn test_zero_cap_visits_nothing() {
        let mut frontier = frontier(scenario_provider(), 0, &[]);
        frontier.seed(vec![seed("10.0.0.1")]);
        frontier.run().await;
        assert!(frontier.store().is_empty());
        assert!(frontier.session().connected().is_empty());
    }

    #[tokio::test]
    async fn test_excluded_seed_is_attempted_not_stored() {
        let mut frontier = frontier(scenario_provider(), 10, &["10.0.0.0/24"]);
        frontier.seed(vec![seed("10.0.0.1")]);
        frontier.run().await;

        assert_eq!(frontier.state("10.0.0.1"), Some(VisitState::SkippedExcluded));
        assert!(frontier.attempted().contains_key("10.0.0.1"));
        assert!(frontier.store().is_empty());
        assert!(frontier.session().connected().is_empty());
    }

    #[tokio::test]
    async fn test_excluded_neighbor_never_discovered() {
        let provider = ScriptedProvider::default()
            .device("10.0.0.1", "SW1", &cdp_entry("MGMT", "10.0.9.1"), "")
            .device("10.0.9.1", "MGMT", "", "");
        let mut frontier = frontier(provider, 10, &["10.0.9.0/24"]);
        frontier.seed(vec![seed("10.0.0.1")]);
        frontier.run().await;

        assert_eq!(frontier.state("10.0.9.1"), Some(VisitState::SkippedExcluded));
        assert!(!frontier.store().contains("10.0.9.1"));
        assert_eq!(frontier.session().connected(), vec!["10.0.0.1"]);
    }

    #[tokio::test]
    async fn test_invalid_address_skipped() {
        let mut frontier = frontier(scenario_provider(), 10, &[]);
        frontier.seed(vec![seed("core-switch.example.net"), seed("10.0.0.3")]);
        let summary = frontier.run().await;

        assert_eq!(
            frontier.state("core-switch.example.net"),
            Some(VisitState::SkippedInvalidAddress)
        );
        assert!(!frontier.store().contains("core-switch.example.net"));
        assert_eq!(frontier.session().connected(), vec!["10.0.0.3"]);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.discovered, 1);
    }

    #[tokio::test]
    async fn test_failed_connection_stores_minimal_record() {
        let provider = ScriptedProvider::default()
            .unreachable("10.0.0.1", ConnectionError::AuthFailure("10.0.0.1".to_string()))
            .device("10.0.0.2", "SW2", "", "");
        let mut frontier = frontier(provider, 10, &[]);
        frontier.seed(vec![seed("10.0.0.1"), seed("10.0.0.2")]);
        let summary = frontier.run().await;

        assert_eq!(frontier.state("10.0.0.1"), Some(VisitState::Failed));
        let failed = frontier.store().get("10.0.0.1").unwrap();
        assert!(failed.hostname.is_none());
        assert!(failed.neighbors.is_empty());
        assert_eq!(frontier.state("10.0.0.2"), Some(VisitState::Discovered));
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.discovered, 1);
    }

    #[tokio::test]
    async fn test_failed_devices_count_toward_cap() {
        let provider = ScriptedProvider::default()
            .unreachable("10.0.0.1", ConnectionError::Timeout("10.0.0.1".to_string()))
            .device("10.0.0.2", "SW2", "", "")
            .device("10.0.0.3", "SW3", "", "");
        let mut frontier = frontier(provider, 2, &[]);
        frontier.seed(vec![seed("10.0.0.1"), seed("10.0.0.2"), seed("10.0.0.3")]);
        let summary = frontier.run().await;

        assert_eq!(frontier.store().len(), 2);
        assert_eq!(frontier.session().connected(), vec!["10.0.0.1", "10.0.0.2"]);
        assert_eq!(summary.unvisited, 1);
    }

    #[tokio::test]
    async fn test_self_and_repeated_neighbors_visited_once() {
        let cdp = format!(
            "{}{}{}",
            cdp_entry("SW1", "10.0.0.1"),
            cdp_entry("SW2", "10.0.0.2"),
            cdp_entry("SW2", "10.0.0.2")
        );
        let provider = ScriptedProvider::default()
            .device("10.0.0.1", "SW1", &cdp, "")
            .device("10.0.0.2", "SW2", &cdp_entry("SW1", "10.0.0.1"), "");
        let mut frontier = frontier(provider, 1, &[]);
        frontier.seed(vec![seed("10.0.0.1")]);
        frontier.run().await;

        // Repeated neighbor is queued once and the self reference not at all
        assert_eq!(frontier.pending().collect::<Vec<_>>(), vec!["10.0.0.2"]);

        let provider = ScriptedProvider::default()
            .device("10.0.0.1", "SW1", &cdp, "")
            .device("10.0.0.2", "SW2", &cdp_entry("SW1", "10.0.0.1"), "");
        let mut frontier = self::frontier(provider, 10, &[]);
        frontier.seed(vec![seed("10.0.0.1")]);
        frontier.run().await;

        assert_eq!(frontier.session().connected(), vec!["10.0.0.1", "10.0.0.2"]);
        assert_eq!(
            frontier.decisions(),
            &[
                Decision {
                    address: "10.0.0.1".to_string(),
                    state: VisitState::Discovered
                },
                Decision {
                    address: "10.0.0.2".to_string(),
                    state: VisitState::Discovered
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_duplicate_seed_skipped_at_dequeue() {
        let mut frontier = frontier(scenario_provider(), 1, &[]);
        frontier.seed(vec![seed("10.0.0.3"), seed(" 10.0.0.3 ")]);
        frontier.run().await;

        assert_eq!(frontier.session().connected(), vec!["10.0.0.3"]);
        // The cap stops the loop before the duplicate entry is looked at
        assert_eq!(frontier.pending().collect::<Vec<_>>(), vec!["10.0.0.3"]);

        let mut frontier = self::frontier(scenario_provider(), 10, &[]);
        frontier.seed(vec![seed("10.0.0.3"), seed("10.0.0.3")]);
        frontier.run().await;

        assert_eq!(frontier.session().connected(), vec!["10.0.0.3"]);
        let states: Vec<VisitState> = frontier.decisions().iter().map(|d| d.state).collect();
        assert_eq!(states, vec![VisitState::Discovered, VisitState::SkippedDuplicate]);
        assert_eq!(frontier.state("10.0.0.3"), Some(VisitState::Discovered));
    }

    #[tokio::test]
    async fn test_address_spellings_share_one_visit() {
        let provider = ScriptedProvider::default()
            .device("2001:db8::1", "R1", &cdp_entry("R2", "2001:db8::2"), "")
            .device(
                "2001:db8::2",
                "R2",
                &format!("{}{}", cdp_entry("R1", "2001:DB8:0:0::1"), cdp_entry("R2", "2001:0DB8::2")),
                "",
            );
        let mut frontier = frontier(provider, 10, &[]);
        frontier.seed(vec![seed("2001:DB8::1"), seed("2001:db8:0::1")]);
        frontier.run().await;

        assert_eq!(frontier.session().connected(), vec!["2001:db8::1", "2001:db8::2"]);
        assert_eq!(frontier.store().len(), 2);
        assert!(frontier.store().contains("2001:db8::1"));
        assert_eq!(frontier.state("2001:DB8:0:0::1"), Some(VisitState::Discovered));
        let states: Vec<VisitState> = frontier.decisions().iter().map(|d| d.state).collect();
        assert_eq!(
            states,
            vec![
                VisitState::Discovered,
                VisitState::SkippedDuplicate,
                VisitState::Discovered
            ]
        );
    }

    #[tokio::test]
    async fn test_breadth_first_order() {
        let provider = ScriptedProvider::default()
            .device(
                "10.0.0.1",
                "R1",
                &format!("{}{}", cdp_entry("R2", "10.0.0.2"), cdp_entry("R3", "10.0.0.3")),
                "",
            )
            .device("10.0.0.2", "R2", &cdp_entry("R4", "10.0.0.4"), "")
            .device("10.0.0.3", "R3", "", &lldp_entry("R5", "10.0.0.5"))
            .device("10.0.0.4", "R4", "", "")
            .device("10.0.0.5", "R5", "", "");
        let mut frontier = frontier(provider, 10, &[]);
        frontier.seed(vec![seed("10.0.0.1")]);
        frontier.run().await;

        assert_eq!(
            frontier.session().connected(),
            vec!["10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.4", "10.0.0.5"]
        );
        assert!(frontier.store().len() <= 10);
    }

    #[test]
    fn test_assemble_record_keeps_raw_output() {
        let mut outputs = CommandOutputs::new();
        outputs.insert(
            VERSION_COMMAND.to_string(),
            CommandOutcome::Text("edge1 uptime is 5 weeks\n".to_string()),
        );
        outputs.insert(
            CDP_COMMAND.to_string(),
            CommandOutcome::Error("command timed out after 30s".to_string()),
        );
        outputs.insert(
            LLDP_COMMAND.to_string(),
            CommandOutcome::Text(lldp_entry("core", "10.0.0.9")),
        );

        let record = assemble_record("10.0.0.8", &outputs);
        assert_eq!(record.address, "10.0.0.8");
        assert_eq!(record.hostname.as_deref(), Some("edge1"));
        assert_eq!(record.neighbors.len(), 1);
        assert_eq!(record.neighbors[0].protocol, Protocol::Lldp);
        assert!(record.interfaces.is_empty());
        assert_eq!(
            record.raw_output[CDP_COMMAND],
            "ERROR: command timed out after 30s"
        );
    }

    #[test]
    fn test_command_set_order() {
        let config = FrontierConfig {
            auxiliary_commands: vec!["show version".to_string(), "show inventory".to_string()],
            ..FrontierConfig::default()
        };
        assert_eq!(
            config.commands(),
            vec![
                VERSION_COMMAND,
                CDP_COMMAND,
                LLDP_COMMAND,
                INTERFACES_COMMAND,
                "show inventory"
            ]
        );
    }
}
