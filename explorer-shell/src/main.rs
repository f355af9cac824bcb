use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use file_explorer_core::config::LOG_ENV;
use file_explorer_core::{ExplorerConfig, FileManager};
use std::io::{self, BufRead, Write};
use tracing::info;

mod commands;
mod render;
mod tokenize;

use commands::Flow;

#[derive(Parser, Debug)]
#[command(name = "explorer")]
#[command(about = "Interactive file exploration shell")]
#[command(version)]
struct Cli {
    /// Directory to start in (default: current directory)
    #[arg(long, env = "EXPLORER_START_DIR")]
    start_dir: Option<String>,

    /// Skip recursive directory totals in `ls`
    #[arg(long)]
    no_dir_sizes: bool,

    /// Log level (trace, debug, info, warn, error); EXPLORER_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Run a single command line and exit
    #[arg(short = 'c', long = "command")]
    command: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let mut config = ExplorerConfig::from_env();
    if let Some(dir) = &cli.start_dir {
        config = config.with_start_dir(dir);
    }
    if cli.no_dir_sizes {
        config = config.with_size_directories(false);
    }

    let mut manager = FileManager::with_config(config)
        .context("unable to open the starting directory")?;
    info!(
        "explorer v{} starting in {}",
        env!("CARGO_PKG_VERSION"),
        manager.current_path().display()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(line) = cli.command {
        commands::run_line(&mut manager, &line, &mut out)?;
        return Ok(());
    }

    run_repl(&mut manager, &mut out)
}

fn run_repl(manager: &mut FileManager, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", "Mini File Explorer".yellow().bold())?;
    writeln!(out, "Type `help` for the list of commands, `exit` to leave.")?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line_count = 1usize;
    let mut line = String::new();

    loop {
        write!(
            out,
            "{} {}> ",
            format!("[{line_count}]").blue().bold(),
            manager.current_path().display()
        )?;
        out.flush()?;

        line.clear();
        // EOF / ^D
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        line_count += 1;

        if commands::run_line(manager, &line, out)? == Flow::Exit {
            break;
        }
    }

    writeln!(out, "Exiting shell...")?;
    Ok(())
}
