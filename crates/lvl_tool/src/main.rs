#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

mod commands;
mod options;

pub use options::*;

use clap::Parser;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};

pub type ToolResult<T> = anyhow::Result<T>;

#[derive(Parser, Debug)]
#[command(version, about = "Create, inspect and edit .lvl platformer levels", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    command: commands::Command,
}

fn start_logger() -> Option<LoggerHandle> {
    let Some(log_dir) = Options::get_log_dir() else {
        eprintln!("Failed to create log file");
        return None;
    };
    let logger = match Logger::try_with_env_or_str("info") {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("Invalid log specification: {err}");
            return None;
        }
    };
    match logger
        .log_to_file(FileSpec::default().directory(&log_dir).basename("lvl_tool").suffix("log").suppress_timestamp())
        .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
        .create_symlink(log_dir.join("lvl_tool.log"))
        .duplicate_to_stderr(flexi_logger::Duplicate::Warn)
        .start()
    {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logger: {err}");
            None
        }
    }
}

fn main() {
    let args = Args::parse();
    let _logger = start_logger();

    log::info!("Starting lvl_tool {}", env!("CARGO_PKG_VERSION"));
    let options = Options::load_options();

    let mut stdout = std::io::stdout().lock();
    if let Err(err) = commands::execute(&args.command, &options, &mut stdout) {
        log::error!("{err:#}");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
