//! Remote command session contract used by the discovery frontier

use async_trait::async_trait;
use netweave_core::DeviceParams;
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a session could not be opened
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("Connection to {0} timed out")]
    Timeout(String),
    #[error("Authentication failed for {0}")]
    AuthFailure(String),
    #[error("Failed to connect to {address}: {reason}")]
    Other { address: String, reason: String },
}

impl ConnectionError {
    /// Short label for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            ConnectionError::Timeout(_) => "timeout",
            ConnectionError::AuthFailure(_) => "auth",
            ConnectionError::Other { .. } => "other",
        }
    }
}

/// Result of running one command on a device
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Raw screen text
    Text(String),
    /// Rows already extracted by a templated parser
    Records(Vec<serde_json::Value>),
    /// The command failed; the message is kept inline
    Error(String),
}

impl CommandOutcome {
    /// Text form stored in the raw output map of a device record
    pub fn to_raw(&self) -> String {
        match self {
            CommandOutcome::Text(text) => text.clone(),
            CommandOutcome::Records(rows) => serde_json::to_string_pretty(rows).unwrap_or_default(),
            CommandOutcome::Error(e) => format!("ERROR: {}", e),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CommandOutcome::Error(_))
    }
}

/// Command -> outcome for every command of one `run` call
pub type CommandOutputs = BTreeMap<String, CommandOutcome>;

/// Opens sessions to devices and runs show commands on them
///
/// Implementations pace consecutive commands themselves and never fail a whole
/// `run`: per-command problems are reported as [`CommandOutcome::Error`].
#[async_trait]
pub trait SessionProvider: Send + Sync {
    type Session: Send;

    /// Establish a session with the device
    async fn connect(&self, params: &DeviceParams) -> Result<Self::Session, ConnectionError>;

    /// Run commands in order, one outcome per command
    async fn run(&self, session: &mut Self::Session, commands: &[String]) -> CommandOutputs;

    /// Close the session; failures are logged, not returned
    async fn disconnect(&self, session: Self::Session);
}

/// Turn a command into a file-system friendly name ("show cdp neighbors detail" -> "show_cdp_neighbors_detail")
pub fn command_slug(command: &str) -> String {
    command
        .trim()
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Turn an address into a file-system friendly name (IPv6 colons become underscores)
pub fn address_slug(address: &str) -> String {
    address
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect()
}
