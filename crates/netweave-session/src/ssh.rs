//! OpenSSH-backed sessions
//!
//! `connect` starts a ControlMaster connection in the background; every command
//! is then sent as a separate exec request over the master socket, and
//! `disconnect` asks the master to exit. Password logins go through `sshpass -e`
//! so the password never shows up on a command line.

use async_trait::async_trait;
use netweave_core::DeviceParams;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{sleep, timeout, Duration};
use tracing::{debug, info, trace, warn};

use crate::session::{
    address_slug, CommandOutcome, CommandOutputs, ConnectionError, SessionProvider,
};

/// SSH client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SshConfig {
    /// ssh executable
    pub ssh_binary: String,
    /// Default port when the device entry has none
    pub port: u16,
    pub connect_timeout_secs: u64,
    pub command_timeout_secs: u64,
    /// Pause between consecutive commands on one device
    pub command_pause_ms: u64,
    /// Directory for control sockets and connection logs
    pub control_dir: PathBuf,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            ssh_binary: "ssh".to_string(),
            port: 22,
            connect_timeout_secs: 10,
            command_timeout_secs: 30,
            command_pause_ms: 500,
            control_dir: std::env::temp_dir(),
        }
    }
}

/// An open ControlMaster connection
#[derive(Debug)]
pub struct SshSession {
    address: String,
    target: String,
    port: u16,
    control_path: PathBuf,
    log_path: PathBuf,
}

/// [`SessionProvider`] driving the system OpenSSH client
pub struct SshProvider {
    config: SshConfig,
}

impl SshProvider {
    pub fn new(config: SshConfig) -> Self {
        Self { config }
    }

    fn control_path(&self, address: &str) -> PathBuf {
        self.config.control_dir.join(format!(
            "netweave-{}-{}.ctl",
            address_slug(address),
            std::process::id()
        ))
    }

    /// Run a command over an established master connection
    async fn exec(&self, session: &SshSession, command: &str) -> CommandOutcome {
        let mut cmd = Command::new(&self.config.ssh_binary);
        cmd.arg("-S")
            .arg(&session.control_path)
            .args(["-o", "ControlMaster=no", "-o", "BatchMode=yes"])
            .arg("-p")
            .arg(session.port.to_string())
            .arg(&session.target)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let limit = Duration::from_secs(self.config.command_timeout_secs);
        match timeout(limit, cmd.output()).await {
            Err(_) => CommandOutcome::Error(format!(
                "command timed out after {}s",
                self.config.command_timeout_secs
            )),
            Ok(Err(e)) => CommandOutcome::Error(e.to_string()),
            Ok(Ok(output)) if output.status.success() => {
                CommandOutcome::Text(String::from_utf8_lossy(&output.stdout).into_owned())
            }
            Ok(Ok(output)) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let reason = stderr.trim();
                if reason.is_empty() {
                    CommandOutcome::Error(format!("ssh exited with {}", output.status))
                } else {
                    CommandOutcome::Error(reason.to_string())
                }
            }
        }
    }
}

#[async_trait]
impl SessionProvider for SshProvider {
    type Session = SshSession;

    async fn connect(&self, params: &DeviceParams) -> Result<SshSession, ConnectionError> {
        let address = params.address.clone();
        let port = params.port.unwrap_or(self.config.port);
        let control_path = self.control_path(&address);
        let log_path = control_path.with_extension("log");
        let target = format!("{}@{}", params.credentials.username, address);

        info!(address = %address, port = port, "Connecting");

        let mut cmd = match &params.credentials.password {
            Some(password) => {
                let mut cmd = Command::new("sshpass");
                cmd.arg("-e").arg(&self.config.ssh_binary).env("SSHPASS", password);
                cmd
            }
            None => {
                let mut cmd = Command::new(&self.config.ssh_binary);
                cmd.args(["-o", "BatchMode=yes"]);
                cmd
            }
        };
        cmd.args(["-M", "-N", "-f", "-S"])
            .arg(&control_path)
            .arg("-E")
            .arg(&log_path)
            .args(["-o", "StrictHostKeyChecking=accept-new"])
            .arg("-o")
            .arg(format!("ConnectTimeout={}", self.config.connect_timeout_secs))
            .arg("-p")
            .arg(port.to_string())
            .arg(&target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        // ssh enforces ConnectTimeout itself; the outer limit also covers a stalled login
        let limit = Duration::from_secs(self.config.connect_timeout_secs * 2 + 5);
        let status = match timeout(limit, cmd.status()).await {
            Err(_) => return Err(ConnectionError::Timeout(address)),
            Ok(Err(e)) => {
                return Err(ConnectionError::Other {
                    address,
                    reason: format!("failed to start ssh: {}", e),
                })
            }
            Ok(Ok(status)) => status,
        };

        if status.success() {
            info!(address = %address, "Successfully connected");
            return Ok(SshSession {
                address,
                target,
                port,
                control_path,
                log_path,
            });
        }

        let log = tokio::fs::read_to_string(&log_path).await.unwrap_or_default();
        let _ = tokio::fs::remove_file(&log_path).await;
        debug!(address = %address, status = %status, log = %log.trim(), "ssh master failed");

        // sshpass exits with 5 on a rejected password
        let sshpass_rejected = params.credentials.password.is_some() && status.code() == Some(5);
        Err(classify_failure(address, &log, sshpass_rejected))
    }

    async fn run(&self, session: &mut SshSession, commands: &[String]) -> CommandOutputs {
        let mut outputs = CommandOutputs::new();
        let pause = Duration::from_millis(self.config.command_pause_ms);

        for (i, command) in commands.iter().enumerate() {
            if i > 0 && !pause.is_zero() {
                sleep(pause).await;
            }

            trace!(address = %session.address, command = %command, "Executing command");
            let outcome = self.exec(session, command).await;
            if let CommandOutcome::Error(ref e) = outcome {
                warn!(address = %session.address, command = %command, error = %e, "Command failed");
            }
            outputs.insert(command.clone(), outcome);
        }

        outputs
    }

    async fn disconnect(&self, session: SshSession) {
        let result = Command::new(&self.config.ssh_binary)
            .arg("-S")
            .arg(&session.control_path)
            .args(["-O", "exit"])
            .arg(&session.target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match result {
            Ok(status) if status.success() => {
                debug!(address = %session.address, "Disconnected");
            }
            Ok(status) => {
                warn!(address = %session.address, status = %status, "Error during disconnect");
            }
            Err(e) => {
                warn!(address = %session.address, error = %e, "Error during disconnect");
            }
        }

        let _ = tokio::fs::remove_file(&session.log_path).await;
    }
}

/// Map ssh diagnostics to a connection error kind
fn classify_failure(address: String, log: &str, password_rejected: bool) -> ConnectionError {
    let lower = log.to_lowercase();
    if password_rejected
        || lower.contains("permission denied")
        || lower.contains("authentication failed")
        || lower.contains("too many authentication failures")
    {
        ConnectionError::AuthFailure(address)
    } else if lower.contains("timed out") {
        ConnectionError::Timeout(address)
    } else {
        let reason = log
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .last()
            .unwrap_or("ssh exited with an error")
            .to_string();
        ConnectionError::Other { address, reason }
    }
}
