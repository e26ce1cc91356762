//! # ECHO - Climate Policy Analysis Agent
//!
//! The main binary for the ECHO policy pipeline.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  apps/echo-agent (THE BINARY)                │
//! │                                                              │
//! │   ┌─────────────┐      ┌──────────────┐      ┌───────────┐   │
//! │   │    CLI      │      │    Config    │      │  Render   │   │
//! │   │   (clap)    │      │    (toml)    │      │  (json)   │   │
//! │   └──────┬──────┘      └──────┬───────┘      └─────┬─────┘   │
//! │          └────────────────────┼────────────────────┘         │
//! │                               ▼                              │
//! │                       ┌───────────────┐                      │
//! │                       │   echo-core   │                      │
//! │                       │  (THE LOGIC)  │                      │
//! │                       └───────────────┘                      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Run the embedded proposal
//! echo-agent
//!
//! # Run a custom proposal
//! echo-agent run --policy "Impose a carbon tax of $80 per ton" --recipient me@example.org
//!
//! # Single stages
//! echo-agent model --rate 45
//! echo-agent extract --text "a carbon tax of $95"
//! ```

use clap::Parser;
use echo_agent::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing. ECHO_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("ECHO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "echo_agent=info,echo_core=info".into());

    // Logs go to stderr; stdout carries the report.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!(code = e.code(), "Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the ECHO startup banner.
fn print_banner() {
    println!(
        r#"
  ███████╗ ██████╗██╗  ██╗ ██████╗
  ██╔════╝██╔════╝██║  ██║██╔═══██╗
  █████╗  ██║     ███████║██║   ██║
  ██╔══╝  ██║     ██╔══██║██║   ██║
  ███████╗╚██████╗██║  ██║╚██████╔╝
  ╚══════╝ ╚═════╝╚═╝  ╚═╝ ╚═════╝

  Climate Policy Analysis Agent v{}

  Lookup • Model • Synthesize • Persist
"#,
        env!("CARGO_PKG_VERSION")
    );
}
