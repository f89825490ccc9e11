//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// mooring - classify and validate the properties of build component types
#[derive(Parser)]
#[command(name = "mooring")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true, env = "MOORING_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate every type declared in a type catalog
    Validate(ValidateArgs),

    /// Show how the properties of one type are classified
    Describe(DescribeArgs),
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Path to the type catalog (TOML)
    pub catalog: PathBuf,

    /// Inspection scheme (tasks, transform-actions, transform-parameters)
    #[arg(long, default_value = "tasks")]
    pub scheme: String,
}

#[derive(Args)]
pub struct DescribeArgs {
    /// Path to the type catalog (TOML)
    pub catalog: PathBuf,

    /// Type to describe (aliases are accepted)
    #[arg(value_name = "TYPE")]
    pub type_name: String,

    /// Inspection scheme (tasks, transform-actions, transform-parameters)
    #[arg(long, default_value = "tasks")]
    pub scheme: String,

    /// Print the classification as JSON
    #[arg(long)]
    pub json: bool,
}
