//! Polyglot CLI binary.
//!
//! This binary provides command-line access to the tutoring relay:
//! - Serve `POST /api/chat` over HTTP
//! - Ask a single question from the terminal
//! - Inspect the configured model fallback order

use clap::Parser;
use polyglot_server::LoggingConfig;

mod cli;
#[cfg(feature = "observability")]
mod observability;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, handle_ask_command, handle_models_command, handle_serve_command};

    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();
    let logging = LoggingConfig::new(cli.verbose, cli.json_logs());

    #[cfg(feature = "observability")]
    let provider = observability::init_observability(&logging)?;
    #[cfg(not(feature = "observability"))]
    polyglot_server::init_logging(&logging)?;

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Serve { bind, .. } => handle_serve_command(config_path, bind).await,
        Commands::Ask { message } => handle_ask_command(config_path, &message).await,
        Commands::Models => handle_models_command(config_path),
    };

    #[cfg(feature = "observability")]
    observability::shutdown_observability(provider);

    result?;
    Ok(())
}
