//! CLI argument definitions using clap
//!
//! Commands:
//! - notesd init --config <path>
//! - notesd serve --config <path> [--port <port>]
//! - notesd openapi

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// notesd - CRUD HTTP service for notes
#[derive(Parser, Debug)]
#[command(name = "notesd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Write a default configuration file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./notesd.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file. Defaults apply when it does not exist.
        #[arg(long, default_value = "./notesd.json")]
        config: PathBuf,

        /// Override the configured HTTP port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the OpenAPI document and exit
    Openapi,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
