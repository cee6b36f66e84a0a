//! Callprof Viewer CLI
//!
//! Loads a captured call profile and serves it as an HTML report.

use anyhow::Result;
use callprof_viewer::commands::{
    display_schema, display_version, execute_serve, validate_args, validate_stats_file, ServeArgs,
};
use callprof_viewer::utils::config::{DEFAULT_HOST, DEFAULT_PORT};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

/// Callprof Viewer - browse captured call profiles
#[derive(Parser, Debug)]
#[command(name = "callprof-viewer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the report for a stats artifact
    Serve {
        /// Stats artifact (JSON) to load
        stats_file: PathBuf,

        /// Port to listen on
        #[arg(default_value_t = DEFAULT_PORT, env = "CALLPROF_VIEWER_PORT")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = DEFAULT_HOST, env = "CALLPROF_VIEWER_HOST")]
        host: String,
    },

    /// Validate a stats artifact and print a summary
    Validate {
        /// Path to stats JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Serve {
            stats_file,
            port,
            host,
        } => {
            let args = ServeArgs {
                stats_file,
                host,
                port,
            };

            // Validate args first
            validate_args(&args)?;

            execute_serve(args)?;
        }

        Commands::Validate { file } => {
            validate_stats_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
