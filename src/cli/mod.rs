//! CLI module for the Tenant Auth Gateway

pub mod serve;

use clap::{Parser, Subcommand};

/// Tenant Auth Gateway - routes logins to per-tenant identity providers
#[derive(Parser)]
#[command(name = "tenant-auth-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the authentication server
    Serve,
}
