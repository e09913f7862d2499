//! scribe - a small multi-user notes web application

pub mod auth;
pub mod cli;
pub mod domain;
pub mod logging;
pub mod store;
pub mod web;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_adduser, handle_deluser, handle_serve, handle_users},
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        clap_complete::generate(args.shell, &mut Cli::command(), "scribe", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;
    let db_path = config.database_path(cli.database.as_ref());

    match &cli.command {
        Command::Serve(args) => handle_serve(args, &db_path, &config),
        Command::Adduser(args) => handle_adduser(args, &db_path, &config),
        Command::Users(args) => handle_users(args, &db_path),
        Command::Deluser(args) => handle_deluser(args, &db_path),
        Command::Completions(_) => Ok(()),
    }
}
