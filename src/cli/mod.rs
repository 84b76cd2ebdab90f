//! CLI commands
//!
//! - `serve`: run the API server
//! - `keygen`: provision the persisted signing key pair without serving

pub mod keygen;
pub mod serve;

use clap::{Parser, Subcommand};

/// Postboard - token-gated posting API
#[derive(Parser)]
#[command(name = "postboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,

    /// Generate (or load) the persisted signing key pair and exit
    Keygen,
}
