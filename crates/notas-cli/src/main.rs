//! Notas CLI - manage notes stored on the remote notes service
//!
//! Sign in once per profile; the session token lives in the OS keychain.

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod error;


use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::auth_cmd::run_auth;
use crate::commands::common::GlobalOptions;
use crate::commands::complete::run_set_completed;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::list::run_list;
use crate::commands::show::run_show;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        if let Some(hint) = error.hint() {
            eprintln!("{hint}");
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("notas=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let global = GlobalOptions {
        profile: cli.profile,
        api_url: cli.api_url,
    };

    match cli.command {
        Commands::Auth { command } => run_auth(command, &global).await?,
        Commands::List {
            limit,
            status,
            json,
        } => run_list(limit, status, json, &global).await?,
        Commands::Show { id, json } => run_show(&id, json, &global).await?,
        Commands::Add {
            title,
            description,
            completed,
        } => run_add(&title, description, completed, &global).await?,
        Commands::Edit {
            id,
            title,
            description,
        } => run_edit(&id, title, description, &global).await?,
        Commands::Done { id } => run_set_completed(&id, true, &global).await?,
        Commands::Undone { id } => run_set_completed(&id, false, &global).await?,
        Commands::Delete { id, yes } => run_delete(&id, yes, &global).await?,
        Commands::Config { command } => run_config(command, &global)?,
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref())?;
        }
    }

    Ok(())
}
