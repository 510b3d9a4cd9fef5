//! Configuration loading and validation

use anyhow::Result;
use netweave_discovery::{ExclusionList, FrontierConfig, AUXILIARY_COMMANDS, DEFAULT_MAX_DEVICES};
use netweave_session::SshConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Stop after this many devices are stored
    #[serde(default = "default_max_devices")]
    pub max_devices: usize,
    /// CIDR ranges that are never visited
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Extra commands captured per device (raw output only)
    #[serde(default = "default_auxiliary_commands")]
    pub auxiliary_commands: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_devices: default_max_devices(),
            exclude: Vec::new(),
            auxiliary_commands: default_auxiliary_commands(),
        }
    }
}

fn default_max_devices() -> usize {
    DEFAULT_MAX_DEVICES
}

fn default_auxiliary_commands() -> Vec<String> {
    AUXILIARY_COMMANDS.iter().map(|c| c.to_string()).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// SSH port for devices without their own
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,
    /// Pause between commands on the same device
    #[serde(default = "default_command_pause")]
    pub command_pause_ms: u64,
    #[serde(default = "default_ssh_binary")]
    pub ssh_binary: String,
    /// Where control sockets live (system temp dir when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            connect_timeout_secs: default_connect_timeout(),
            command_timeout_secs: default_command_timeout(),
            command_pause_ms: default_command_pause(),
            ssh_binary: default_ssh_binary(),
            control_dir: None,
        }
    }
}

fn default_port() -> u16 {
    22
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_command_timeout() -> u64 {
    30
}

fn default_command_pause() -> u64 {
    500 // devices drop back-to-back exec requests
}

fn default_ssh_binary() -> String {
    "ssh".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for discovery and topology JSON files
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Config {
    /// Convert to FrontierConfig
    pub fn to_frontier_config(&self) -> FrontierConfig {
        FrontierConfig {
            max_devices: self.discovery.max_devices,
            excluded: ExclusionList::from_cidrs(&self.discovery.exclude),
            auxiliary_commands: self.discovery.auxiliary_commands.clone(),
        }
    }

    /// Convert to SshConfig
    pub fn to_ssh_config(&self) -> SshConfig {
        let defaults = SshConfig::default();
        SshConfig {
            ssh_binary: self.session.ssh_binary.clone(),
            port: self.session.port,
            connect_timeout_secs: self.session.connect_timeout_secs,
            command_timeout_secs: self.session.command_timeout_secs,
            command_pause_ms: self.session.command_pause_ms,
            control_dir: self.session.control_dir.clone().unwrap_or(defaults.control_dir),
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Ok(Config::default())
    }
}

/// Save default configuration to file
pub fn save_default_config(path: &Path) -> Result<()> {
    let mut config = Config::default();
    config.discovery.exclude = vec!["192.168.186.0/24".to_string()];

    let content = toml::to_string_pretty(&config)?;
    std::fs::write(path, content)?;
    Ok(())
}
