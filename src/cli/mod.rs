//! CLI module for guardrail-keys
//!
//! Provides subcommands for working with issued keys:
//! - `catalog`: show the selectable validators and models
//! - `list`: show keys issued to the current principal
//! - `create`: register a key for a validator selection
//! - `delete`: revoke a key

pub mod commands;
pub mod context;
pub mod render;

use clap::{Args, Parser, Subcommand};

/// guardrail-keys - Configure guardrail validators and manage API keys
#[derive(Parser)]
#[command(name = "guardrail-keys")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Key service base URL (overrides configuration)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Access token to send instead of the configured credential provider
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the validator and model catalog
    Catalog,

    /// List issued keys
    List(ListArgs),

    /// Register a new key
    Create(CreateArgs),

    /// Revoke a key
    Delete(DeleteArgs),
}

#[derive(Args, Clone)]
pub struct ListArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Show full key values instead of a prefix
    #[arg(long)]
    pub show_secrets: bool,
}

#[derive(Args, Clone)]
pub struct CreateArgs {
    /// Input validator id (repeatable)
    #[arg(long = "input", value_name = "ID")]
    pub input: Vec<String>,

    /// Output validator id (repeatable)
    #[arg(long = "output", value_name = "ID")]
    pub output: Vec<String>,

    /// Model the key is bound to
    #[arg(long, value_name = "ID")]
    pub model: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct DeleteArgs {
    /// Id of the key to revoke, as shown by `list`
    pub key_id: String,
}
