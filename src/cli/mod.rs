pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "blog-api")]
#[command(about = "Authenticated blog API server and developer tools")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server")]
    Serve {
        #[arg(long, help = "Listen port (overrides PORT / BLOG_API_PORT)")]
        port: Option<u16>,
        #[arg(long, help = "Use an in-process store instead of DATABASE_URL")]
        memory: bool,
    },

    #[command(about = "Print a signed development token for a subject id")]
    Token {
        #[arg(long, help = "Subject (author) id to put in the token")]
        subject: i32,
        #[arg(long, help = "Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
        hours: Option<u64>,
        #[arg(long, help = "Omit the exp claim")]
        no_expiry: bool,
    },

    #[command(about = "Validate configuration and open one database connection")]
    Check,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    match cli.command {
        Commands::Serve { port, memory } => commands::serve::handle(config, port, memory).await,
        Commands::Token { subject, hours, no_expiry } => {
            commands::token::handle(&config, subject, hours, no_expiry)
        }
        Commands::Check => commands::check::handle(&config).await,
    }
}
