//! Command-line interface for FanHub.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// FanHub - TV show fan site
/// REST API and server-rendered UI
#[derive(Parser)]
#[command(name = "fanhub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default search path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run migrations, seed an empty database and serve the REST API (default)
    #[command(alias = "api")]
    Serve,

    /// Serve the web UI against the configured API
    #[command(alias = "web")]
    Ui,

    /// Run migrations and the seed routine, then exit
    Seed,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}
