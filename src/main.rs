use clap::Parser;
use tracing_subscriber::EnvFilter;

use concierge_relay::cli::{Cli, Commands, SessionCommands};
use concierge_relay::dirs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Ensure storage directories exist
    dirs::ensure_dirs()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            concierge_relay::cli::serve::execute(&host, port).await?;
        }
        Commands::Session { command } => match command {
            SessionCommands::Show { user_id } => {
                concierge_relay::cli::session::show(&user_id).await?;
            }
            SessionCommands::Clear { user_id } => {
                concierge_relay::cli::session::clear(&user_id).await?;
            }
        },
        Commands::Config => {
            concierge_relay::cli::config::execute()?;
        }
    }

    Ok(())
}
