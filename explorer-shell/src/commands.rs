//! Maps one command line onto exactly one engine call.

use clap::{Parser, Subcommand};
use colored::Colorize;
use file_explorer_core::{CoreError, FileManager, SortMode, Status};
use std::io::{self, Write};

use crate::render;
use crate::tokenize::split_line;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Parser, Debug)]
#[command(name = "explorer", no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// Change directory (no argument goes home)
    Cd { path: Option<String> },
    /// Print the working directory
    Pwd,
    /// List files
    Ls {
        /// Sort by size, largest first
        #[arg(short = 's', conflicts_with = "time")]
        size: bool,
        /// Sort by modification time, newest first
        #[arg(short = 't')]
        time: bool,
    },
    /// Copy a file or directory
    Cp { src: String, dst: String },
    /// Move or rename a file or directory
    Mv { src: String, dst: String },
    /// Create an empty file
    Touch { path: String },
    /// Create a directory
    Mkdir { path: String },
    /// Remove a file or a directory with its contents
    Rm { path: String },
    /// Remove an empty directory
    Rmdir { path: String },
    /// Show file status
    Stat { path: String },
    /// Search names below the working directory
    Search {
        keyword: String,
        /// Directory to search instead of the working directory
        #[arg(long)]
        root: Option<String>,
    },
    /// Disk usage of a directory
    Du { path: Option<String> },
    /// Exit the shell
    #[command(alias = "quit")]
    Exit,
}

/// Parses and runs one line. Engine failures are printed, not returned;
/// only output errors propagate.
pub fn run_line(manager: &mut FileManager, line: &str, out: &mut impl Write) -> io::Result<Flow> {
    let args = match split_line(line) {
        Ok(args) if args.is_empty() => return Ok(Flow::Continue),
        Ok(args) => args,
        Err(err) => {
            writeln!(out, "{}", err.to_string().red())?;
            return Ok(Flow::Continue);
        }
    };

    let parsed = match Line::try_parse_from(&args) {
        Ok(parsed) => parsed,
        Err(err) => {
            write!(out, "{}", err.render())?;
            return Ok(Flow::Continue);
        }
    };

    tracing::debug!("dispatching {:?}", parsed.command);
    execute(manager, parsed.command, out)
}

fn execute(
    manager: &mut FileManager,
    command: ShellCommand,
    out: &mut impl Write,
) -> io::Result<Flow> {
    let result: Result<String, CoreError> = match command {
        ShellCommand::Cd { path } => manager
            .change_directory(path.as_deref().unwrap_or(""))
            .map(|_| String::new()),
        ShellCommand::Pwd => Ok(format!("{}\n", manager.current_path().display())),
        ShellCommand::Ls { size, time } => {
            let mode = if size {
                SortMode::BySize
            } else if time {
                SortMode::ByTime
            } else {
                SortMode::Default
            };
            manager.list_files(mode).map(|files| render::listing(&files))
        }
        ShellCommand::Cp { src, dst } => manager.copy_item(&src, &dst).map(|_| String::new()),
        ShellCommand::Mv { src, dst } => manager.move_item(&src, &dst).map(|_| String::new()),
        ShellCommand::Touch { path } => manager.create_file(&path).map(|_| String::new()),
        ShellCommand::Mkdir { path } => manager.create_directory(&path).map(|_| String::new()),
        ShellCommand::Rm { path } => manager.remove_path(&path).map(|_| String::new()),
        ShellCommand::Rmdir { path } => {
            manager.remove_empty_directory(&path).map(|_| String::new())
        }
        ShellCommand::Stat { path } => manager.file_stat(&path).map(|info| render::stat(&info)),
        ShellCommand::Search { keyword, root } => {
            let found = match root {
                Some(root) => manager.search_in(&root, &keyword),
                None => manager.search(&keyword),
            };
            found.map(|files| render::search_results(&files))
        }
        ShellCommand::Du { path } => manager
            .calculate_dir_size(path.as_deref().unwrap_or("."))
            .map(render::disk_usage),
        ShellCommand::Exit => return Ok(Flow::Exit),
    };

    match result {
        Ok(text) => write!(out, "{text}")?,
        Err(err) => {
            let status = Status::from(err);
            writeln!(out, "{}", status.message.red())?;
        }
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use file_explorer_core::ExplorerConfig;
    use std::fs;
    use tempfile::TempDir;

    fn manager(tmp: &TempDir) -> FileManager {
        let config = ExplorerConfig::default()
            .with_start_dir(tmp.path())
            .with_home_dir(tmp.path());
        FileManager::with_config(config).unwrap()
    }

    fn run(manager: &mut FileManager, line: &str) -> (Flow, String) {
        let mut out = Vec::new();
        let flow = run_line(manager, line, &mut out).unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    #[test]
    fn touch_then_stat() {
        let tmp = TempDir::new().unwrap();
        let mut fm = manager(&tmp);

        let (_, out) = run(&mut fm, "touch 'my file.txt'");
        assert!(out.is_empty());
        let (_, out) = run(&mut fm, "stat \"my file.txt\"");
        assert!(out.contains("Type: File"));
        assert!(out.contains("Size: 0 bytes"));
    }

    #[test]
    fn cd_and_pwd() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        let mut fm = manager(&tmp);

        run(&mut fm, "cd sub");
        let (_, out) = run(&mut fm, "pwd");
        assert_eq!(out.trim(), tmp.path().join("sub").display().to_string());

        run(&mut fm, "cd");
        assert_eq!(fm.current_path(), tmp.path());
    }

    #[test]
    fn failures_print_the_status_message() {
        let tmp = TempDir::new().unwrap();
        let mut fm = manager(&tmp);

        let (flow, out) = run(&mut fm, "cd nowhere");
        assert_eq!(flow, Flow::Continue);
        assert!(out.contains("path not found"));
    }

    #[test]
    fn ls_renders_table() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "abc").unwrap();
        fs::create_dir(tmp.path().join("dir")).unwrap();
        let mut fm = manager(&tmp);

        let (_, out) = run(&mut fm, "ls -s");
        assert!(out.contains("Name"));
        assert!(out.contains("a.txt"));
        assert!(out.contains("Directory"));
    }

    #[test]
    fn ls_rejects_both_sort_flags() {
        let tmp = TempDir::new().unwrap();
        let mut fm = manager(&tmp);

        let (flow, out) = run(&mut fm, "ls -s -t");
        assert_eq!(flow, Flow::Continue);
        assert!(!out.is_empty());
    }

    #[test]
    fn search_reports_empty_results() {
        let tmp = TempDir::new().unwrap();
        let mut fm = manager(&tmp);

        let (_, out) = run(&mut fm, "search nothing");
        assert_eq!(out, "No files found.\n");
    }

    #[test]
    fn rm_recurses_but_rmdir_needs_empty() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("full")).unwrap();
        fs::write(tmp.path().join("full/x"), "").unwrap();
        let mut fm = manager(&tmp);

        let (_, out) = run(&mut fm, "rmdir full");
        assert!(out.contains("directory not empty"));
        let (_, out) = run(&mut fm, "rm full");
        assert!(out.is_empty());
        assert!(!tmp.path().join("full").exists());
    }

    #[test]
    fn du_defaults_to_working_directory() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("f"), vec![0u8; 300]).unwrap();
        let mut fm = manager(&tmp);

        let (_, out) = run(&mut fm, "du");
        assert_eq!(out, "Size: 300 bytes (300 B)\n");
    }

    #[test]
    fn exit_and_unknown_commands() {
        let tmp = TempDir::new().unwrap();
        let mut fm = manager(&tmp);

        assert_eq!(run(&mut fm, "exit").0, Flow::Exit);
        assert_eq!(run(&mut fm, "quit").0, Flow::Exit);
        let (flow, out) = run(&mut fm, "frobnicate");
        assert_eq!(flow, Flow::Continue);
        assert!(!out.is_empty());
        assert_eq!(run(&mut fm, "   ").0, Flow::Continue);
    }
}
