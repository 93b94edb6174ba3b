use chrono::{DateTime, Local};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub modified: DateTime<Local>,
}

/// Files matching the filter at the moment of the last scan.
///
/// Never patched in place: a rescan builds a new one and the manager swaps it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    entries: Vec<FileEntry>,
}

impl Inventory {
    #[must_use]
    pub fn new(entries: Vec<FileEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FileEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a FileEntry;
    type IntoIter = std::slice::Iter<'a, FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_entry(name: &str, size: u64) -> FileEntry {
        FileEntry {
            path: PathBuf::from("/save").join(name),
            name: name.to_string(),
            size,
            modified: Local::now(),
        }
    }

    #[test]
    fn test_find_and_total_size() {
        let inventory = Inventory::new(vec![make_entry("a.json", 10), make_entry("b.json", 32)]);

        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.total_size(), 42);
        assert_eq!(inventory.find("b.json").map(|e| e.size), Some(32));
        assert!(inventory.find("c.json").is_none());
        assert_eq!(inventory.get(0).map(|e| e.name.as_str()), Some("a.json"));
    }

    #[test]
    fn test_default_is_empty() {
        let inventory = Inventory::default();
        assert!(inventory.is_empty());
        assert_eq!(inventory.total_size(), 0);
    }
}
