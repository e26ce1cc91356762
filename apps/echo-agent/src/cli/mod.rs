//! # ECHO CLI Module
//!
//! This module implements the CLI interface for ECHO.
//!
//! ## Available Commands
//!
//! - `run` - Run the four-stage policy pipeline (default)
//! - `model` - Run only the climate model for a rate
//! - `extract` - Run only the tax rate extractor

mod commands;

use crate::config::load_config;
use clap::{Parser, Subcommand};
use echo_core::EchoError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// ECHO - Climate Policy Analysis Agent
///
/// Looks up market data, models a carbon tax, summarises the result,
/// stores it and notifies the analyst.
#[derive(Parser, Debug)]
#[command(name = "echo-agent")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

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
    /// Run the full pipeline
    Run {
        /// Policy proposal text (overrides the configured one)
        #[arg(short, long)]
        policy: Option<String>,

        /// Analyst to notify (overrides the configured one)
        #[arg(short, long)]
        recipient: Option<String>,
    },

    /// Run only the climate model
    Model {
        /// Carbon tax rate in USD per ton
        #[arg(short, long, allow_negative_numbers = true)]
        rate: f64,
    },

    /// Extract the tax rate from a policy text
    Extract {
        /// Policy proposal text
        #[arg(short, long)]
        text: String,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), EchoError> {
    let config = load_config(cli.config.as_deref())?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Run { policy, recipient }) => {
            cmd_run(&config, json_mode, cli.verbose, policy, recipient)
        }
        Some(Commands::Model { rate }) => cmd_model(json_mode, rate),
        Some(Commands::Extract { text }) => cmd_extract(&config, json_mode, &text),
        None => {
            // No subcommand - run the embedded proposal
            cmd_run(&config, json_mode, cli.verbose, None, None)
        }
    }
}
