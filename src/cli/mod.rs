pub mod config;
pub mod serve;
pub mod session;

use clap::{Parser, Subcommand};

/// Concierge relay - session-correlating chat proxy
#[derive(Debug, Parser)]
#[command(name = "concierge-relay", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(long, default_value_t = 8787)]
        port: u16,
    },

    /// Inspect or clear stored session records
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },

    /// Print the effective configuration with secrets elided
    Config,
}

/// Session record maintenance.
#[derive(Debug, Subcommand)]
pub enum SessionCommands {
    /// Print the stored record for a user
    Show {
        /// User identifier the record is keyed by
        user_id: String,
    },

    /// Delete the stored record for a user
    Clear {
        /// User identifier the record is keyed by
        user_id: String,
    },
}
