//! esddrop - Drag-and-drop option builder for the ESD talk script converter
//!
//! Main entry point for the console application.
//!
//! # Overview
//!
//! Files and directories dropped onto the executable arrive as command line
//! arguments. The binary:
//! - Initializes logging (`<config dir>/logs/esddrop.<date>`)
//! - Loads `esdtoolconfig.json`, running the guided setup on first use
//! - Asks for shared decompile directories when bundles were dropped
//! - Prints the synthesized converter arguments to stdout, one per line
//!
//! # Exit codes
//!
//! - `0`: arguments printed, or the user backed out of a prompt
//! - `1`: some dropped paths were not recognized (details on stderr)
//! - `2`: nothing was dropped

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use esddrop::ui::ConsolePrompt;
use esddrop::{build_options, ConfigManager, Synthesis, APP_NAME, VERSION};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "esddrop", version, about = "Build ESD converter arguments from dropped files")]
struct Args {
    /// Files and directories to convert
    paths: Vec<Utf8PathBuf>,

    /// Directory holding esdtoolconfig.json (defaults to the executable's directory)
    #[arg(long)]
    config_dir: Option<Utf8PathBuf>,

    /// Log at debug level and echo log lines to stderr
    #[arg(long)]
    debug: bool,
}

impl Args {
    /// Echo log lines to stderr; stdout stays reserved for the arguments
    fn console_logging(&self) -> bool {
        self.debug
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let config_dir = match &args.config_dir {
        Some(dir) => dir.clone(),
        None => default_config_dir()?,
    };
    let config_manager = ConfigManager::new(&config_dir)?;
    let _guard = esddrop::logging::setup_logging(
        &config_manager.config_dir().join("logs"),
        APP_NAME,
        args.debug,
        args.console_logging(),
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    if args.paths.is_empty() {
        eprintln!("Drag and drop files or directories onto {} to convert them.", APP_NAME);
        return Ok(ExitCode::from(2));
    }

    let mut prompt = ConsolePrompt::new();

    let Some(config) = config_manager.load_or_create(&mut prompt)? else {
        tracing::info!("No configuration available, exiting");
        return Ok(ExitCode::SUCCESS);
    };

    match build_options(&config, &args.paths, &mut prompt) {
        Synthesis::Ready(arguments) => {
            for argument in &arguments {
                println!("{}", argument);
            }
            Ok(ExitCode::SUCCESS)
        }
        Synthesis::Rejected(errors) => {
            tracing::error!("{} dropped paths were rejected", errors.len());
            Ok(ExitCode::FAILURE)
        }
        Synthesis::Aborted => Ok(ExitCode::SUCCESS),
    }
}

/// Directory containing the running executable
fn default_config_dir() -> Result<Utf8PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the executable")?;
    let exe = Utf8PathBuf::from_path_buf(exe)
        .map_err(|p| anyhow::anyhow!("Executable path is not UTF-8: {}", p.display()))?;
    Ok(exe
        .parent()
        .map(Utf8Path::to_path_buf)
        .unwrap_or_else(|| Utf8PathBuf::from(".")))
}
