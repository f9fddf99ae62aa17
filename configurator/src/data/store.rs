//! Persisted configuration store: written at confirm time, read by checkout.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use bevy::prelude::*;

use crate::data::model::SavedConfiguration;
use crate::error::StoreError;

/// Where a confirmed configuration lives until an order is created.
pub trait ConfigStore: Send + Sync + 'static {
    fn save(&mut self, config: &SavedConfiguration) -> Result<(), StoreError>;
    fn load(&self) -> Result<Option<SavedConfiguration>, StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Bevy resource wrapping the active store implementation.
#[derive(Resource)]
pub struct StoreResource(pub Box<dyn ConfigStore>);

impl StoreResource {
    pub fn new(store: impl ConfigStore) -> Self {
        Self(Box::new(store))
    }
}

/// Pretty-printed JSON file on disk.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ConfigStore for JsonFileStore {
    fn save(&mut self, config: &SavedConfiguration) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(config)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        info!("configurator: saved shoe configuration to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<SavedConfiguration>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.io_error(err)),
        }
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error(err)),
        }
    }
}

/// In-process store. Clones share the same slot, so a caller can keep a handle
/// to inspect what the app wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<SavedConfiguration>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<SavedConfiguration> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ConfigStore for MemoryStore {
    fn save(&mut self, config: &SavedConfiguration) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(config.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<SavedConfiguration>, StoreError> {
        Ok(self.get())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
