pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "lists")]
#[command(about = "Task lists CLI - developer tooling for the task lists server")]
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
    #[command(about = "Print a signed token for a principal")]
    Token {
        #[arg(long, help = "Principal id (random if omitted)")]
        user: Option<Uuid>,
        #[arg(long, default_value = "developer", help = "Display name")]
        name: String,
        #[arg(long, help = "Mark the session as a guest")]
        guest: bool,
    },

    #[command(about = "Create missing tables in DATABASE_URL")]
    InitDb,
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

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = crate::config::config();

    match cli.command {
        Commands::Token { user, name, guest } => {
            commands::token::handle(config, user, name, guest, output_format)
        }
        Commands::InitDb => commands::db::init(config, output_format).await,
    }
}
