use crate::error::{BulkDeleteReport, InventoryError};
use crate::types::{FileEntry, Inventory};
use log::{info, warn};
use std::fs;
use std::io::ErrorKind;

/// Remove the file behind `entry`.
///
/// A file that is already gone is `StaleEntry`: rescan, don't retry.
pub fn delete_one(entry: &FileEntry) -> Result<(), InventoryError> {
    match fs::remove_file(&entry.path) {
        Ok(()) => {
            info!("Deleted {}", entry.path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Err(InventoryError::StaleEntry {
            path: entry.path.clone(),
        }),
        Err(source) => Err(InventoryError::DeleteFailed {
            path: entry.path.clone(),
            source,
        }),
    }
}

/// Delete every entry of the snapshot that still exists, without stopping
/// on failures. Vanished entries are counted as skipped, not as errors.
#[must_use]
pub fn delete_all(inventory: &Inventory) -> BulkDeleteReport {
    let mut report = BulkDeleteReport::default();

    for entry in inventory {
        // Checks the entry itself, so a link whose target is gone still gets removed.
        if fs::symlink_metadata(&entry.path).is_err() {
            report.skipped += 1;
            continue;
        }
        match delete_one(entry) {
            Ok(()) => report.deleted += 1,
            // Lost the race after the existence check.
            Err(InventoryError::StaleEntry { .. }) => report.skipped += 1,
            Err(err) => {
                warn!("{err}");
                report.failures.push(err);
            }
        }
    }

    info!(
        "Bulk delete: {} deleted, {} skipped, {} failed",
        report.deleted,
        report.skipped,
        report.failures.len()
    );
    report
}
