use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

/// Top-level CLI parser for the `snackbot` binary.
#[derive(Debug, Parser)]
#[command(
    name = "snackbot",
    version,
    about = "Snackbot - which snack is acceptable right now"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Fetch the sheet once and print the API response
    Now {
        /// Evaluate at this instant instead of the current time (RFC 3339)
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
}
