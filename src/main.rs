mod config;
mod error;
mod filter;
mod manager;
mod panel;
mod remover;
mod report;
mod scanner;
mod types;

use clap::{Parser, Subcommand};
use colored::Colorize;
use config::ConfigSource;
use filter::SuffixFilter;
use log::LevelFilter;
use manager::InventoryManager;
use panel::{
    AssumeYes, Confirm, LineInput, Outcome, Panel, PanelError, PathOpener, SystemOpener,
    TerminalPrompt,
};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory to list (overrides INFO_FILES_DIR and --company/--product)
    #[arg(long, short = 'd', global = true)]
    dir: Option<PathBuf>,

    /// Which files to list, e.g. "*.json"
    #[arg(long, short = 'f', default_value = "*.json", global = true)]
    filter: SuffixFilter,

    /// Company name used to locate the persistent data path
    #[arg(long, global = true)]
    company: Option<String>,

    /// Product name used to locate the persistent data path
    #[arg(long, global = true)]
    product: Option<String>,

    /// Delete without asking for confirmation
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    /// More log output (-v info, -vv debug)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the files and their sizes
    List,
    /// Delete one file by list number or name
    Delete { name: String },
    /// Delete every listed file
    DeleteAll,
    /// Open the directory in the system file browser
    Open,
    /// Keep the list on screen and act on it with short commands
    Interactive,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let source = ConfigSource {
        dir: args.dir.clone(),
        company: args.company.clone(),
        product: args.product.clone(),
        filter: args.filter.clone(),
        ..ConfigSource::default()
    }
    .with_env();

    let config = match source.resolve() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    let manager = InventoryManager::new(config);
    let command = args.command.unwrap_or(Command::List);

    let ok = if args.yes {
        run(Panel::new(manager, AssumeYes, SystemOpener), command)
    } else {
        run(
            Panel::new(manager, TerminalPrompt::stdin(), SystemOpener),
            command,
        )
    };

    if !ok {
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Returns false when an error was reported to the user.
fn run<C: Confirm>(mut panel: Panel<C, SystemOpener>, command: Command) -> bool {
    match command {
        Command::Open => open_folder(&panel),
        Command::List => {
            let ok = refresh(&mut panel);
            panel.render();
            ok
        }
        Command::Delete { name } => {
            if !refresh(&mut panel) {
                return false;
            }
            let ok = delete_one(&mut panel, &name);
            panel.render();
            ok
        }
        Command::DeleteAll => {
            if !refresh(&mut panel) {
                return false;
            }
            let ok = delete_all(&mut panel);
            panel.render();
            ok
        }
        Command::Interactive => interactive(&mut panel, &mut io::stdin()),
    }
}

fn refresh<C: Confirm, O: PathOpener>(panel: &mut Panel<C, O>) -> bool {
    match panel.refresh() {
        Ok(()) => true,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            false
        }
    }
}

fn open_folder<C: Confirm, O: PathOpener>(panel: &Panel<C, O>) -> bool {
    match panel.open_folder() {
        Ok(()) => true,
        Err(e) => {
            eprintln!(
                "{} Could not open {}: {e}",
                "Error:".red(),
                panel.manager().directory().display()
            );
            false
        }
    }
}

fn delete_one<C: Confirm, O: PathOpener>(panel: &mut Panel<C, O>, name: &str) -> bool {
    match panel.delete(name) {
        Ok(Outcome::Done(())) => true,
        Ok(Outcome::Declined) => {
            println!("Cancelled.");
            true
        }
        Err(e) => {
            report_panel_error(&e);
            false
        }
    }
}

fn delete_all<C: Confirm, O: PathOpener>(panel: &mut Panel<C, O>) -> bool {
    match panel.delete_all() {
        Ok(Outcome::Done(summary)) => {
            report::print_bulk_report(&summary);
            summary.is_clean()
        }
        Ok(Outcome::Declined) => {
            println!("Cancelled.");
            true
        }
        Err(e) => {
            report_panel_error(&e);
            false
        }
    }
}

fn report_panel_error(e: &PanelError) {
    eprintln!("{} {e}", "Error:".red());
}

/// Command loop over the snapshot. The exit status reflects the last
/// refresh, so a failed scan that a later `r` fixes no longer counts, plus
/// any delete or open failure along the way.
fn interactive<C: Confirm, O: PathOpener>(
    panel: &mut Panel<C, O>,
    input: &mut impl LineInput,
) -> bool {
    let mut scanned = refresh(panel);
    let mut ok = true;
    panel.render();

    loop {
        print!("\n{} ", "[r]efresh [o]pen [d <n|name>]elete [a]ll [q]uit >".cyan());
        io::stdout().flush().ok();

        let mut line = String::new();
        match input.next_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let line = line.trim();
        let (cmd, arg) = line.split_once(' ').unwrap_or((line, ""));
        let arg = arg.trim();

        match cmd {
            "" => continue,
            "q" | "quit" | "exit" => break,
            "r" | "refresh" => scanned = refresh(panel),
            "o" | "open" => {
                ok &= open_folder(panel);
                continue;
            }
            "d" | "delete" if !arg.is_empty() => ok &= delete_one(panel, arg),
            "a" | "all" => ok &= delete_all(panel),
            _ => {
                println!("Unknown command '{line}'");
                continue;
            }
        }
        panel.render();
    }

    ok && scanned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InventoryConfig;
    use std::collections::VecDeque;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    struct NoOpen;

    impl PathOpener for NoOpen {
        fn open(&self, _path: &Path) -> io::Result<()> {
            Ok(())
        }
    }

    /// Feeds typed lines, running a hook before handing out each one.
    struct Script<F: FnMut()> {
        lines: VecDeque<&'static str>,
        before_each: F,
    }

    impl<F: FnMut()> LineInput for Script<F> {
        fn next_line(&mut self, buf: &mut String) -> io::Result<usize> {
            (self.before_each)();
            match self.lines.pop_front() {
                Some(line) => {
                    buf.push_str(line);
                    buf.push('\n');
                    Ok(line.len() + 1)
                }
                None => Ok(0),
            }
        }
    }

    fn panel_for(dir: &Path) -> Panel<AssumeYes, NoOpen> {
        let manager = InventoryManager::new(InventoryConfig::new(
            dir.to_path_buf(),
            SuffixFilter::default(),
        ));
        Panel::new(manager, AssumeYes, NoOpen)
    }

    #[test]
    fn test_interactive_recovers_after_later_refresh() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("save");
        let mut panel = panel_for(&dir);

        let created = dir.clone();
        let mut input = Script {
            lines: VecDeque::from(["r", "q"]),
            before_each: move || {
                fs::create_dir_all(&created).unwrap();
                fs::write(created.join("slot.json"), b"{}").unwrap();
            },
        };

        assert!(interactive(&mut panel, &mut input));
        assert_eq!(panel.manager().inventory().len(), 1);
    }

    #[test]
    fn test_interactive_reports_unrecovered_scan_failure() {
        let root = TempDir::new().unwrap();
        let mut panel = panel_for(&root.path().join("missing"));
        let mut input = Script {
            lines: VecDeque::from(["q"]),
            before_each: || {},
        };

        assert!(!interactive(&mut panel, &mut input));
    }

    #[test]
    fn test_interactive_delete_all() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.json"), b"{}").unwrap();
        fs::write(dir.path().join("b.json"), b"{}").unwrap();
        let mut panel = panel_for(dir.path());
        let mut input = Script {
            lines: VecDeque::from(["a", "q"]),
            before_each: || {},
        };

        assert!(interactive(&mut panel, &mut input));
        assert!(panel.manager().inventory().is_empty());
    }
}
