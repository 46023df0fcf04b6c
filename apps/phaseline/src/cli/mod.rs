//! # Phaseline CLI Module
//!
//! This module implements the CLI interface for Phaseline.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `status` - Show store counts
//! - `phases` - List the phase catalog
//! - `solutions` - List solutions with progress
//! - `progress` - Resolved ordering and percentage for one solution
//! - `seed` - Seed the built-in phase catalog
//! - `init` - Initialize a new empty database

mod commands;

use clap::{Parser, Subcommand};
use phaseline_core::PhaselineError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Phaseline - Solution Tracker
///
/// A deterministic phase ordering and progress engine behind a REST
/// API: solutions advance through an ordered, per-solution subset of
/// globally cataloged lifecycle phases.
#[derive(Parser, Debug)]
#[command(name = "phaseline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the tracker database
    #[arg(short = 'D', long, global = true, default_value = "phaseline.db")]
    pub database: PathBuf,

    /// Storage backend: "redb" (ACID database) or "memory" (volatile)
    #[arg(short = 'B', long, global = true, default_value = "redb")]
    pub backend: String,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Show store counts
    Status,

    /// List the phase catalog
    Phases,

    /// List solutions with status and progress
    Solutions,

    /// Show the resolved phase ordering and progress for a solution
    Progress {
        /// Solution id
        #[arg(short, long)]
        solution: String,
    },

    /// Idempotently seed the built-in phase catalog
    Seed,

    /// Initialize a new empty database
    Init {
        /// Force initialization even if database exists
        #[arg(short, long)]
        force: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), PhaselineError> {
    let backend = cli.backend.as_str();
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => {
            cmd_server(&cli.database, backend, &host, port).await
        }
        Some(Commands::Status) => cmd_status(&cli.database, backend, json_mode),
        Some(Commands::Phases) => cmd_phases(&cli.database, backend, json_mode),
        Some(Commands::Solutions) => cmd_solutions(&cli.database, backend, json_mode),
        Some(Commands::Progress { solution }) => {
            cmd_progress(&cli.database, backend, json_mode, &solution)
        }
        Some(Commands::Seed) => cmd_seed(&cli.database, backend, json_mode),
        Some(Commands::Init { force }) => cmd_init(&cli.database, force),
        None => {
            // No subcommand - show status by default
            cmd_status(&cli.database, backend, json_mode)
        }
    }
}
