//! Device record store keyed by management address
//!
//! The store is persisted as pretty-printed JSON ordered by address so that two
//! runs against the same network diff cleanly. Raw command output is never
//! written out.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::device::DeviceRecord;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Device {0} is already stored")]
    Duplicate(String),
}

/// Discovered devices, at most one record per address
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceStore {
    devices: BTreeMap<String, DeviceRecord>,
}

impl DeviceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            devices: BTreeMap::new(),
        }
    }

    /// Insert a record; records are never replaced once stored
    pub fn insert(&mut self, record: DeviceRecord) -> Result<(), StoreError> {
        if self.devices.contains_key(&record.address) {
            return Err(StoreError::Duplicate(record.address));
        }
        self.devices.insert(record.address.clone(), record);
        Ok(())
    }

    pub fn get(&self, address: &str) -> Option<&DeviceRecord> {
        self.devices.get(address)
    }

    pub fn contains(&self, address: &str) -> bool {
        self.devices.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Stored records in address order
    pub fn records(&self) -> impl Iterator<Item = &DeviceRecord> {
        self.devices.values()
    }

    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.devices.keys().map(|k| k.as_str())
    }

    /// Serialize to pretty JSON (raw output stripped)
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a store from a file written by [`DeviceStore::save`]
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path)?;
        let store: DeviceStore = serde_json::from_str(&content)?;
        Ok(store)
    }

    /// Save the store to a file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let content = self.to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
