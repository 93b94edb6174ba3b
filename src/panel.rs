//! Front-end glue around [`InventoryManager`]: asks before destructive
//! actions and hands the directory to the OS file browser.

use crate::error::{BulkDeleteReport, InventoryError};
use crate::manager::{InventoryManager, ManagerState};
use crate::report;
use crate::types::FileEntry;
use colored::Colorize;
use log::warn;
use std::io::{self, BufRead, Write};
use std::path::Path;
use thiserror::Error;

pub trait Confirm {
    fn confirm(&mut self, title: &str, message: &str) -> bool;
}

/// Source of typed answers. `Stdin` locks per line, so a command loop can
/// share it with the prompt.
pub trait LineInput {
    fn next_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl LineInput for io::Stdin {
    fn next_line(&mut self, buf: &mut String) -> io::Result<usize> {
        self.read_line(buf)
    }
}

impl LineInput for &[u8] {
    fn next_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// Yes/no question on the terminal. Only `y`/`yes` count as yes.
pub struct TerminalPrompt<R = io::Stdin> {
    input: R,
}

impl TerminalPrompt {
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(io::stdin())
    }
}

impl<R: LineInput> TerminalPrompt<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: LineInput> Confirm for TerminalPrompt<R> {
    fn confirm(&mut self, title: &str, message: &str) -> bool {
        print!("{}\n{message} [y/N] ", title.yellow());
        io::stdout().flush().ok();

        let mut answer = String::new();
        match self.input.next_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => is_yes(&answer),
        }
    }
}

fn is_yes(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Backs `--yes`.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _title: &str, _message: &str) -> bool {
        true
    }
}

pub trait PathOpener {
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// Native file browser via the `open` crate.
pub struct SystemOpener;

impl PathOpener for SystemOpener {
    fn open(&self, path: &Path) -> io::Result<()> {
        open::that(path)
    }
}

/// What happened to a requested delete.
#[derive(Debug)]
pub enum Outcome<T> {
    Done(T),
    Declined,
}

pub struct Panel<C, O> {
    manager: InventoryManager,
    confirm: C,
    opener: O,
}

impl<C: Confirm, O: PathOpener> Panel<C, O> {
    pub fn new(manager: InventoryManager, confirm: C, opener: O) -> Self {
        Self {
            manager,
            confirm,
            opener,
        }
    }

    #[must_use]
    pub fn manager(&self) -> &InventoryManager {
        &self.manager
    }

    pub fn refresh(&mut self) -> Result<(), InventoryError> {
        self.manager.refresh()
    }

    pub fn render(&self) {
        report::print_inventory(
            self.manager.directory(),
            self.manager.filter(),
            self.manager.inventory(),
        );
    }

    pub fn open_folder(&self) -> io::Result<()> {
        self.opener.open(self.manager.directory())
    }

    /// Delete by 1-based list position or by file name, after confirmation.
    ///
    /// A stale entry is not a failure here: the manager already rescanned.
    pub fn delete(&mut self, selector: &str) -> Result<Outcome<()>, PanelError> {
        debug_assert_eq!(self.manager.state(), ManagerState::Idle);
        let entry = self
            .select(selector)
            .cloned()
            .ok_or_else(|| PanelError::NoSuchEntry(selector.to_string()))?;

        let message = format!("Are you sure you want to delete the {} file?", entry.name);
        if !self.confirm.confirm("Confirm File Deletion", &message) {
            return Ok(Outcome::Declined);
        }

        match self.manager.delete_one(&entry) {
            Ok(()) => Ok(Outcome::Done(())),
            Err(err) if err.is_stale() => Ok(Outcome::Done(())),
            Err(err) => Err(err.into()),
        }
    }

    pub fn delete_all(&mut self) -> Result<Outcome<BulkDeleteReport>, PanelError> {
        debug_assert_eq!(self.manager.state(), ManagerState::Idle);
        if self.manager.inventory().is_empty() {
            warn!("Nothing to delete");
            return Ok(Outcome::Done(BulkDeleteReport::default()));
        }
        if !self.confirm.confirm(
            "Confirm Deletion of All Files",
            "Are you sure you want to delete all files?",
        ) {
            return Ok(Outcome::Declined);
        }
        Ok(Outcome::Done(self.manager.delete_all()?))
    }

    fn select(&self, selector: &str) -> Option<&FileEntry> {
        let inventory = self.manager.inventory();
        if let Ok(position) = selector.parse::<usize>()
            && position >= 1
            && let Some(entry) = inventory.get(position - 1)
        {
            return Some(entry);
        }
        inventory.find(selector)
    }
}

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("No file named or numbered '{0}' in the current list")]
    NoSuchEntry(String),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InventoryConfig;
    use crate::filter::SuffixFilter;
    use std::cell::RefCell;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Scripted(Vec<bool>);

    impl Confirm for Scripted {
        fn confirm(&mut self, _title: &str, _message: &str) -> bool {
            self.0.remove(0)
        }
    }

    #[derive(Default)]
    struct RecordingOpener(RefCell<Vec<PathBuf>>);

    impl PathOpener for RecordingOpener {
        fn open(&self, path: &Path) -> io::Result<()> {
            self.0.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    fn panel_with<C: Confirm>(
        names: &[&str],
        confirm: C,
    ) -> (TempDir, Panel<C, RecordingOpener>) {
        let dir = TempDir::new().unwrap();
        for name in names {
            fs::write(dir.path().join(name), b"{}").unwrap();
        }
        let manager = InventoryManager::new(InventoryConfig::new(
            dir.path().to_path_buf(),
            SuffixFilter::default(),
        ));
        let mut panel = Panel::new(manager, confirm, RecordingOpener::default());
        panel.refresh().unwrap();
        (dir, panel)
    }

    #[test]
    fn test_declined_delete_leaves_file() {
        let (dir, mut panel) = panel_with(&["a.json"], Scripted(vec![false]));

        let outcome = panel.delete("a.json").unwrap();

        assert!(matches!(outcome, Outcome::Declined));
        assert!(dir.path().join("a.json").exists());
        assert_eq!(panel.manager().inventory().len(), 1);
    }

    #[test]
    fn test_delete_by_position() {
        let (dir, mut panel) = panel_with(&["a.json", "b.json"], AssumeYes);

        panel.delete("2").unwrap();

        assert!(!dir.path().join("b.json").exists());
        assert_eq!(panel.manager().inventory().len(), 1);
    }

    #[test]
    fn test_delete_stale_entry_is_recovered() {
        let (dir, mut panel) = panel_with(&["a.json", "b.json"], AssumeYes);
        fs::remove_file(dir.path().join("a.json")).unwrap();

        let outcome = panel.delete("a.json").unwrap();

        assert!(matches!(outcome, Outcome::Done(())));
        assert!(panel.manager().inventory().find("a.json").is_none());
    }

    #[test]
    fn test_delete_unknown_entry() {
        let (_dir, mut panel) = panel_with(&["a.json"], AssumeYes);
        assert!(matches!(
            panel.delete("9"),
            Err(PanelError::NoSuchEntry(_))
        ));
    }

    #[test]
    fn test_delete_all_requires_confirmation() {
        let (dir, mut panel) = panel_with(&["a.json", "b.json"], Scripted(vec![false, true]));

        assert!(matches!(panel.delete_all().unwrap(), Outcome::Declined));
        assert_eq!(panel.manager().inventory().len(), 2);

        let Outcome::Done(report) = panel.delete_all().unwrap() else {
            panic!("expected delete to run");
        };
        assert_eq!(report.deleted, 2);
        assert!(panel.manager().inventory().is_empty());
        assert!(!dir.path().join("a.json").exists());
    }

    #[test]
    fn test_open_folder_passes_directory() {
        let (dir, panel) = panel_with(&[], AssumeYes);
        panel.open_folder().unwrap();
        assert_eq!(panel.opener.0.borrow().as_slice(), &[dir.path().to_path_buf()]);
    }

    #[test]
    fn test_terminal_prompt_answers() {
        assert!(TerminalPrompt::new("yes\n".as_bytes()).confirm("t", "m"));
        assert!(TerminalPrompt::new("Y\n".as_bytes()).confirm("t", "m"));
        assert!(!TerminalPrompt::new("n\n".as_bytes()).confirm("t", "m"));
        assert!(!TerminalPrompt::new("".as_bytes()).confirm("t", "m"));
    }
}
