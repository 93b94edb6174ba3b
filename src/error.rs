use std::path::PathBuf;
use thiserror::Error;

/// Failures the inventory can report to its caller.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Target directory is missing, not a directory, or unreadable.
    #[error("Directory {} is unavailable: {source}", path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    /// File listed by the last scan is gone from disk.
    #[error("File {} no longer exists", path.display())]
    StaleEntry { path: PathBuf },
    /// Removal failed for a reason other than the file being absent.
    #[error("Failed to delete {}: {source}", path.display())]
    DeleteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl InventoryError {
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleEntry { .. })
    }
}

/// Outcome of a best-effort bulk delete.
#[derive(Debug, Default)]
pub struct BulkDeleteReport {
    pub deleted: usize,
    /// Entries already gone when visited.
    pub skipped: usize,
    pub failures: Vec<InventoryError>,
}

impl BulkDeleteReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
