//! # sync-cli
//!
//! Command-line client for the code-sync relay.
//!
//! ## Commands
//!
//! - `create`: Store a JSON object and print its sync code
//! - `fetch`: Print the record stored under a code
//! - `update`: Replace the record stored under a code
//! - `health`: Check that the relay is up
//!
//! ## Example
//!
//! ```bash
//! # Store data, get a code
//! sync-cli create '{"exercise":"bench"}'
//!
//! # On another device, read it back
//! sync-cli fetch K7M2QX
//!
//! # Replace it
//! sync-cli update K7M2QX --file workout.json
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod client;
mod commands;
mod payload;

use client::RelayClient;
use commands::{create, fetch, health, update};

/// Command-line client for the code-sync relay.
#[derive(Parser, Debug)]
#[command(name = "sync-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Base URL of the relay
    #[arg(
        long,
        global = true,
        env = "SYNC_RELAY_URL",
        default_value = "http://127.0.0.1:8787"
    )]
    relay: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store a JSON object under a new sync code
    Create {
        /// JSON object to store (or use --file)
        json: Option<String>,

        /// File containing the JSON object
        #[arg(long, short, conflicts_with = "json")]
        file: Option<PathBuf>,
    },

    /// Print the record stored under a sync code
    Fetch {
        /// Sync code (case-insensitive)
        code: String,

        /// Write the record to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Replace the record stored under a sync code
    Update {
        /// Sync code (case-insensitive)
        code: String,

        /// JSON object to store (or use --file)
        json: Option<String>,

        /// File containing the JSON object
        #[arg(long, short, conflicts_with = "json")]
        file: Option<PathBuf>,
    },

    /// Check relay liveness
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = RelayClient::new(&cli.relay)?;

    match cli.command {
        Commands::Create { json, file } => {
            create::run(&client, json.as_deref(), file.as_deref()).await?;
        }
        Commands::Fetch { code, output } => {
            fetch::run(&client, &code, output.as_deref()).await?;
        }
        Commands::Update { code, json, file } => {
            update::run(&client, &code, json.as_deref(), file.as_deref()).await?;
        }
        Commands::Health => {
            health::run(&client).await?;
        }
    }

    Ok(())
}
