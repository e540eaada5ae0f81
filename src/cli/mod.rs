//! CLI for the team management service

pub mod serve;

use clap::{Parser, Subcommand};

/// Crowd Teams - team management for a crowdsourcing platform
#[derive(Parser)]
#[command(name = "crowd-teams")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,
}
