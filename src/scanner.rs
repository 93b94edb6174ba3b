use crate::error::InventoryError;
use crate::filter::SuffixFilter;
use crate::types::{FileEntry, Inventory};
use chrono::{DateTime, Local};
use log::debug;
use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;
use walkdir::WalkDir;

/// List the files directly inside `directory` whose name matches `filter`.
///
/// Subdirectories are neither listed nor descended into. Entries come back
/// sorted by file name. A directory without matches yields an empty
/// inventory; a missing or unreadable one is `DirectoryUnavailable`.
pub fn scan(directory: &Path, filter: &SuffixFilter) -> Result<Inventory, InventoryError> {
    let unavailable = |source: io::Error| InventoryError::DirectoryUnavailable {
        path: directory.to_path_buf(),
        source,
    };

    // Fails for missing paths, plain files and unreadable directories alike.
    fs::read_dir(directory).map_err(unavailable)?;

    let mut entries = Vec::new();
    for item in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match item {
            Ok(entry) => entry,
            // Root read failures surface at depth 0; anything deeper is a
            // child that changed under us.
            Err(err) if err.depth() == 0 => {
                return Err(unavailable(err.into_io_error().unwrap_or_else(|| {
                    io::Error::other("directory could not be read")
                })));
            }
            Err(err) => {
                debug!("Skipping unreadable entry in {}: {err}", directory.display());
                continue;
            }
        };

        let file_type = entry.file_type();
        if !file_type.is_file() && !file_type.is_symlink() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if !filter.matches(&name) {
            continue;
        }

        // Links are listed by their own path but sized by their target. The
        // file may also vanish between listing and stat.
        let metadata = match fs::metadata(entry.path()) {
            Ok(m) if m.is_file() => m,
            Ok(_) => continue,
            Err(err) => {
                debug!("Skipping {name}: {err}");
                continue;
            }
        };

        let modified: DateTime<Local> =
            metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH).into();

        entries.push(FileEntry {
            path: entry.into_path(),
            name,
            size: metadata.len(),
            modified,
        });
    }

    debug!(
        "Scanned {}: {} file(s) matching {filter}",
        directory.display(),
        entries.len()
    );
    Ok(Inventory::new(entries))
}
