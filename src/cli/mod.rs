pub mod commands;
pub mod utils;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::app::AppContext;
use crate::config::CONFIG;
use crate::notify::ConsoleNotifier;
use crate::storage::FileStorage;

#[derive(Parser)]
#[command(name = "wfadmin")]
#[command(about = "wfadmin - Command-line console for the form workflow engine")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login, logout and password management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Authorized menu tree and the routes derived from it")]
    Menu {
        #[command(subcommand)]
        cmd: commands::menu::MenuCommands,
    },

    #[command(about = "Resolve a console path through the navigation guard")]
    Nav {
        #[arg(help = "Path to open, e.g. /tasks or /admin/users")]
        path: String,
    },

    #[command(about = "Form definitions and submissions")]
    Forms {
        #[command(subcommand)]
        cmd: commands::forms::FormCommands,
    },

    #[command(about = "Approval tasks")]
    Tasks {
        #[command(subcommand)]
        cmd: commands::tasks::TaskCommands,
    },

    #[command(about = "User administration")]
    Users {
        #[command(subcommand)]
        cmd: commands::users::UserCommands,
    },

    #[command(about = "Process instance administration")]
    Instances {
        #[command(subcommand)]
        cmd: commands::instances::InstanceCommands,
    },

    #[command(about = "System settings")]
    Settings {
        #[command(subcommand)]
        cmd: commands::settings::SettingsCommands,
    },

    #[command(about = "In-app notifications")]
    Notifications {
        #[command(subcommand)]
        cmd: commands::notifications::NotificationCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Application context backed by the on-disk session in the config dir
pub fn open_context() -> anyhow::Result<AppContext> {
    let storage = FileStorage::open_default()?;
    tracing::debug!("Using session storage at {}", storage.dir().display());

    Ok(AppContext::new(
        CONFIG.clone(),
        Arc::new(storage),
        Arc::new(ConsoleNotifier),
    ))
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let mut ctx = open_context()?;

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &mut ctx, output_format).await,
        Commands::Menu { cmd } => commands::menu::handle(cmd, &mut ctx, output_format).await,
        Commands::Nav { path } => commands::nav::handle(&path, &mut ctx, output_format).await,
        Commands::Forms { cmd } => commands::forms::handle(cmd, &mut ctx, output_format).await,
        Commands::Tasks { cmd } => commands::tasks::handle(cmd, &mut ctx, output_format).await,
        Commands::Users { cmd } => commands::users::handle(cmd, &mut ctx, output_format).await,
        Commands::Instances { cmd } => commands::instances::handle(cmd, &mut ctx, output_format).await,
        Commands::Settings { cmd } => commands::settings::handle(cmd, &mut ctx, output_format).await,
        Commands::Notifications { cmd } => {
            commands::notifications::handle(cmd, &mut ctx, output_format).await
        }
    }
}
