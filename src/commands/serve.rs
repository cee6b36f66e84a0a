//! Serve command implementation.
//!
//! The serve command:
//! 1. Loads the stats artifact
//! 2. Builds the route table
//! 3. Serves reports until the process is stopped

use crate::commands::models::ServeArgs;
use crate::parser::load_dataset;
use crate::server::{serve, viewer_router};
use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;
use std::time::Instant;

/// Execute the serve command
///
/// **Public** - main entry point called from main.rs
///
/// Only returns on startup failure or if the listener dies.
///
/// # Errors
/// * Stats artifact cannot be read or is inconsistent
/// * Address cannot be bound
pub fn execute_serve(args: ServeArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Loading stats from: {}", args.stats_file.display());
    let dataset = load_dataset(&args.stats_file).with_context(|| {
        format!("Failed to load stats file {}", args.stats_file.display())
    })?;

    let router = viewer_router().context("Failed to build route table")?;

    info!(
        "Ready in {:.2}s; open http://{}/ in a browser",
        start_time.elapsed().as_secs_f64(),
        args.bind_addr()
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime
        .block_on(serve(&args.bind_addr(), Arc::new(router), Arc::new(dataset)))
        .context("Report server stopped")?;

    Ok(())
}

/// Validate serve arguments
///
/// **Public** - can be called before execute_serve for early validation
pub fn validate_args(args: &ServeArgs) -> Result<()> {
    if args.stats_file.as_os_str().is_empty() {
        anyhow::bail!("Stats file path cannot be empty");
    }

    if !args.stats_file.exists() {
        anyhow::bail!("Stats file not found: {}", args.stats_file.display());
    }

    if args.stats_file.is_dir() {
        anyhow::bail!("Stats file is a directory: {}", args.stats_file.display());
    }

    if args.host.is_empty() {
        anyhow::bail!("Host cannot be empty");
    }

    if args.port == 0 {
        anyhow::bail!("Port must be greater than 0");
    }

    Ok(())
}
