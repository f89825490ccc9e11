//! mooring CLI - property capability classification for build components

use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use mooring::util::config::{global_config_path, load_config, project_config_path, Config};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("mooring=debug")
    } else {
        EnvFilter::new("mooring=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => {
            let cwd = std::env::current_dir().context("failed to get current directory")?;
            load_config(global_config_path().as_deref(), &project_config_path(&cwd))
        }
    };
    let color = !cli.no_color && std::io::stderr().is_terminal();

    // Execute command
    match cli.command {
        Commands::Validate(args) => commands::validate::execute(args, &config, color),
        Commands::Describe(args) => commands::describe::execute(args, &config),
    }
}
