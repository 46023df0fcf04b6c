//! # Phaseline - Solution Tracker Server
//!
//! The main binary for the Phaseline phase tracker.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for catalog and solution operations
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! phaseline server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! phaseline seed
//! phaseline phases
//! phaseline progress --solution <id>
//! ```

use clap::Parser;
use phaseline::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing — PHASELINE_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("PHASELINE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "phaseline=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Phaseline startup banner.
fn print_banner() {
    println!(
        r#"
  ─────────────────────────────────────────
   PHASELINE  v{}
   Solution tracker — phases • progress
  ─────────────────────────────────────────
"#,
        env!("CARGO_PKG_VERSION")
    );
}
