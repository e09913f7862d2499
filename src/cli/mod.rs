//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// scribe - a small multi-user notes web application
#[derive(Parser, Debug)]
#[command(name = "scribe", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (default: ~/.config/scribe/config.toml)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub database: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the web server
    Serve(ServeArgs),

    /// Create a user account; the password is read from stdin
    Adduser(AdduserArgs),

    /// List user accounts with their note counts
    Users(UsersArgs),

    /// Delete a user account and all of its notes
    Deluser(DeluserArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `serve` command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to listen on (default: 127.0.0.1:8000)
    #[arg(short, long)]
    pub bind: Option<String>,
}

/// Arguments for the `adduser` command
#[derive(Parser, Debug)]
pub struct AdduserArgs {
    /// Username for the new account
    pub username: String,
}

/// Arguments for the `users` command
#[derive(Parser, Debug)]
pub struct UsersArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `deluser` command
#[derive(Parser, Debug)]
pub struct DeluserArgs {
    /// Username of the account to delete
    pub username: String,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
