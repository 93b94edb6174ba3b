use crate::config::InventoryConfig;
use crate::error::{BulkDeleteReport, InventoryError};
use crate::filter::SuffixFilter;
use crate::remover;
use crate::scanner;
use crate::types::{FileEntry, Inventory};
use log::warn;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    /// Inventory reflects the last scan, nothing is being written.
    Idle,
    Mutating,
}

/// Owns the current inventory snapshot for one directory and filter.
///
/// Deletes are only performed when one of the delete methods is called;
/// asking the user is the caller's job.
#[derive(Debug)]
pub struct InventoryManager {
    config: InventoryConfig,
    inventory: Inventory,
    state: ManagerState,
}

impl InventoryManager {
    #[must_use]
    pub fn new(config: InventoryConfig) -> Self {
        Self {
            config,
            inventory: Inventory::default(),
            state: ManagerState::Idle,
        }
    }

    #[must_use]
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    #[must_use]
    pub fn state(&self) -> ManagerState {
        self.state
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.config.directory
    }

    #[must_use]
    pub fn filter(&self) -> &SuffixFilter {
        &self.config.filter
    }

    /// Replace the snapshot with a fresh scan.
    ///
    /// When the directory is unavailable the snapshot is cleared so it shows
    /// zero files, and the error is still returned.
    pub fn refresh(&mut self) -> Result<(), InventoryError> {
        match scanner::scan(&self.config.directory, &self.config.filter) {
            Ok(inventory) => {
                self.inventory = inventory;
                Ok(())
            }
            Err(err) => {
                self.inventory = Inventory::default();
                Err(err)
            }
        }
    }

    /// Delete one file and rescan.
    ///
    /// A stale entry is logged and triggers a rescan before being returned.
    /// `DeleteFailed` leaves the snapshot untouched.
    pub fn delete_one(&mut self, entry: &FileEntry) -> Result<(), InventoryError> {
        let result = self.mutate(|| remover::delete_one(entry));
        match result {
            Ok(()) => self.refresh(),
            Err(err) if err.is_stale() => {
                warn!("{err}; refreshing file list");
                self.refresh()?;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Best-effort delete of the whole current snapshot, then rescan.
    pub fn delete_all(&mut self) -> Result<BulkDeleteReport, InventoryError> {
        let snapshot = self.inventory.clone();
        let report = self.mutate(|| remover::delete_all(&snapshot));
        self.refresh()?;
        Ok(report)
    }

    fn mutate<T>(&mut self, op: impl FnOnce() -> T) -> T {
        self.state = ManagerState::Mutating;
        let out = op();
        self.state = ManagerState::Idle;
        out
    }
}
