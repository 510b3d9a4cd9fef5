//! Netweave Session - Remote command sessions for device discovery
//!
//! This crate defines the session contract the discovery frontier consumes
//! and two implementations of it:
//! - OpenSSH ControlMaster sessions for live devices
//! - Replay of captured command output for offline runs

pub mod capture;
pub mod session;
pub mod ssh;

pub use capture::{CaptureProvider, CaptureSession};
pub use session::{
    address_slug, command_slug, CommandOutcome, CommandOutputs, ConnectionError, SessionProvider,
};
pub use ssh::{SshConfig, SshProvider, SshSession};
