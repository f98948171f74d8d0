//! CLI module - Command-line interface for Muster
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Muster - Member registry
/// Register members, search them by name and view rank statistics
#[derive(Parser)]
#[command(name = "muster")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    #[command(alias = "daemon", alias = "-d", alias = "--daemon")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Create or upgrade the database schema
    Migrate,

    /// Register a new member, prompting for any field not given as a flag
    Register {
        /// Full name
        #[arg(long)]
        name: Option<String>,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Military rank, as listed by `muster ranks`
        #[arg(long)]
        rank: Option<String>,
        /// Phone number
        #[arg(long)]
        phone: Option<String>,
        /// Postal address
        #[arg(long)]
        address: Option<String>,
    },

    /// List all members, newest first
    #[command(alias = "ls", alias = "l")]
    List,

    /// Search members by name
    #[command(alias = "s")]
    Search {
        /// Text to look for inside member names
        #[arg(required = true)]
        term: Vec<String>,
    },

    /// Show member counts per rank
    Stats,

    /// Show the number of registered members
    Count,

    /// List valid military ranks, highest first
    Ranks,
}

pub use commands::*;
