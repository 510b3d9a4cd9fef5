//! Replay of previously captured command output
//!
//! Layout: `<root>/<address>/<command_slug>.txt` holds raw text, and
//! `<root>/<address>/<command_slug>.json` may hold pre-extracted rows instead.
//! A device without a directory behaves like an unreachable device.

use async_trait::async_trait;
use netweave_core::DeviceParams;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::session::{
    address_slug, command_slug, CommandOutcome, CommandOutputs, ConnectionError, SessionProvider,
};

/// A "connection" to one captured device directory
#[derive(Debug)]
pub struct CaptureSession {
    address: String,
    dir: PathBuf,
}

/// [`SessionProvider`] that reads command output from disk
pub struct CaptureProvider {
    root: PathBuf,
}

impl CaptureProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn read_command(&self, dir: &std::path::Path, command: &str) -> CommandOutcome {
        let slug = command_slug(command);

        let json_path = dir.join(format!("{}.json", slug));
        if let Ok(content) = tokio::fs::read_to_string(&json_path).await {
            return match serde_json::from_str::<Vec<serde_json::Value>>(&content) {
                Ok(rows) => CommandOutcome::Records(rows),
                Err(e) => CommandOutcome::Error(format!("invalid capture {}: {}", json_path.display(), e)),
            };
        }

        let text_path = dir.join(format!("{}.txt", slug));
        match tokio::fs::read_to_string(&text_path).await {
            Ok(text) => CommandOutcome::Text(text),
            Err(e) => CommandOutcome::Error(format!("no capture for '{}': {}", command, e)),
        }
    }
}

#[async_trait]
impl SessionProvider for CaptureProvider {
    type Session = CaptureSession;

    async fn connect(&self, params: &DeviceParams) -> Result<CaptureSession, ConnectionError> {
        let dir = self.root.join(address_slug(&params.address));
        match tokio::fs::metadata(&dir).await {
            Ok(meta) if meta.is_dir() => {
                debug!(address = %params.address, dir = %dir.display(), "Replaying captured output");
                Ok(CaptureSession {
                    address: params.address.clone(),
                    dir,
                })
            }
            _ => Err(ConnectionError::Other {
                address: params.address.clone(),
                reason: format!("no capture directory at {}", dir.display()),
            }),
        }
    }

    async fn run(&self, session: &mut CaptureSession, commands: &[String]) -> CommandOutputs {
        let mut outputs = CommandOutputs::new();
        for command in commands {
            let outcome = self.read_command(&session.dir, command).await;
            if let CommandOutcome::Error(ref e) = outcome {
                warn!(address = %session.address, command = %command, error = %e, "Command failed");
            }
            outputs.insert(command.clone(), outcome);
        }
        outputs
    }

    async fn disconnect(&self, session: CaptureSession) {
        debug!(address = %session.address, "Closed capture session");
    }
}
