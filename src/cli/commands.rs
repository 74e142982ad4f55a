//! CLI command implementations
//!
//! `serve` follows a fixed boot sequence: load config, init logging,
//! connect, migrate, serve. Any failure before serving aborts the process.

use std::fs::OpenOptions;
use std::io::{self, ErrorKind, Write};
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::http_server::{api_document, HttpServer};
use crate::observability::{self, log_event, Event, MetricsRegistry};
use crate::service::NoteService;
use crate::storage::{Database, SqliteNoteRepository};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
        Command::Openapi => openapi(&mut io::stdout().lock()),
    }
}

/// Write a default configuration file.
///
/// Refuses to overwrite an existing file.
pub fn init(config_path: &Path) -> CliResult<()> {
    let content = Config::default().to_json_pretty()?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(config_path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => CliError::already_initialized(config_path.display()),
            _ => CliError::io_error(format!(
                "Failed to create {}: {}",
                config_path.display(),
                e
            )),
        })?;

    file.write_all(content.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()?;

    Ok(())
}

/// Boot the service and serve HTTP until Ctrl-C
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load_or_default(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
        config.validate()?;
    }

    observability::init(&config.logging)?;
    log_event(Event::BootStart);
    tracing::info!(
        event = %Event::ConfigLoaded,
        path = %config_path.display(),
        database = %config.database.url,
        "configuration ready"
    );

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(run_server(config))
}

async fn run_server(config: Config) -> CliResult<()> {
    let db = Database::connect(&config.database).await?;
    log_event(Event::DatabaseConnected);

    let applied = db.migrate().await?;
    tracing::info!(event = %Event::MigrationsApplied, applied, "schema up to date");

    let service = NoteService::new(
        Arc::new(SqliteNoteRepository::new(&db)),
        Arc::new(MetricsRegistry::new()),
    );
    let server = HttpServer::with_config(config.http, service)?;

    let result = server
        .start()
        .await
        .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)));

    db.close().await;
    log_event(Event::ShutdownComplete);
    result
}

/// Print the OpenAPI document
pub fn openapi(out: &mut impl Write) -> CliResult<()> {
    let document = api_document()?;
    serde_json::to_writer_pretty(&mut *out, &document)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
