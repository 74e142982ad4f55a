//! CLI module for notesd
//!
//! Provides command-line interface for:
//! - init: Write a default configuration file
//! - serve: Boot the service and serve HTTP
//! - openapi: Print the API description

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, openapi, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
