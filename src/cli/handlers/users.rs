//! Account administration handlers: adduser, users, deluser.

use anyhow::{Context, Result, bail};
use chrono::Utc;
use log::info;
use std::io::{self, BufRead, Write};
use std::path::Path;

use super::{build_hasher, open_store};
use crate::auth::Hasher;
use crate::cli::config::Config;
use crate::cli::output::{Output, OutputFormat, UserListing};
use crate::cli::{AdduserArgs, DeluserArgs, UsersArgs};
use crate::domain::{User, Username, password_problems};
use crate::store::{UserRepository, UserSummary};

pub fn handle_adduser(args: &AdduserArgs, db_path: &Path, config: &Config) -> Result<()> {
    let password = read_password(io::stdin().lock())?;
    let hasher = build_hasher(&config.password_hashing)?;
    let mut store = open_store(db_path)?;

    let user = create_account(&mut store, &hasher, &args.username, &password)?;
    println!("Created user {} (id {})", user.username(), user.id());
    Ok(())
}

/// Reads a password from the first line of `input`.
fn read_password(mut input: impl BufRead) -> Result<String> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("no password given on stdin");
    }
    Ok(password)
}

/// Validates and stores a new account, applying the same username and
/// password rules as the signup page.
pub fn create_account(
    store: &mut impl UserRepository,
    hasher: &dyn Hasher,
    username: &str,
    password: &str,
) -> Result<User> {
    let username = Username::new(username).context("invalid username")?;

    let problems = password_problems(password, Some(username.as_str()));
    if !problems.is_empty() {
        bail!("password rejected: {}", problems.join(" "));
    }

    let hash = hasher.generate_hash(password)?;
    let user = store.create_user(&username, &hash, Utc::now())?;
    info!("created user {} (id {})", user.username(), user.id());
    Ok(user)
}

pub fn handle_users(args: &UsersArgs, db_path: &Path) -> Result<()> {
    let store = open_store(db_path)?;
    let users = store.list_users().context("failed to list users")?;
    write_users(&users, args.format, &mut io::stdout().lock())
}

/// Writes a user listing in the requested format.
pub fn write_users(
    users: &[UserSummary],
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if users.is_empty() {
                writeln!(out, "No users found.")?;
                return Ok(());
            }
            writeln!(
                out,
                "{:>6}  {:<30}  {:>6}  {:<10}  {:<10}",
                "ID", "Username", "Notes", "Joined", "Last login"
            )?;
            writeln!(
                out,
                "{:>6}  {:<30}  {:>6}  {:<10}  {:<10}",
                "------",
                "------------------------------",
                "------",
                "----------",
                "----------"
            )?;
            for summary in users {
                let user = summary.user();
                let last_login = user
                    .last_login()
                    .map(|at| at.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "never".to_string());
                writeln!(
                    out,
                    "{:>6}  {:<30}  {:>6}  {:<10}  {:<10}",
                    user.id().get(),
                    user.username().as_str(),
                    summary.note_count(),
                    user.date_joined().format("%Y-%m-%d").to_string(),
                    last_login
                )?;
            }
        }
        OutputFormat::Json => {
            let listings: Vec<UserListing> = users.iter().map(UserListing::from).collect();
            serde_json::to_writer_pretty(&mut *out, &Output::new(listings))?;
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn handle_deluser(args: &DeluserArgs, db_path: &Path) -> Result<()> {
    let mut store = open_store(db_path)?;
    if !store.delete_user(&args.username)? {
        bail!("no such user: {}", args.username);
    }
    info!("deleted user {}", args.username);
    println!("Deleted user {} and their notes", args.username);
    Ok(())
}
