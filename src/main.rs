// Mobile Developer Console
// Main entry point

use anyhow::Result;

use mdc_console::config::load_config;
use mdc_console::server::ConsoleServer;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Load configuration; missing required environment is fatal
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    };

    ConsoleServer::new(config)?.serve().await
}
