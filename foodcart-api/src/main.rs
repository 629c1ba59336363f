use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use foodcart_catalog::{CatalogStore, MemoryStore, PgStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod extract;
mod handlers;
mod json;
mod models;

use config::Config;
use handlers::{AppState, app};

#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Keep the catalog in process memory instead of PostgreSQL
        #[arg(long)]
        in_memory: bool,
    },
    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Serve { in_memory } => serve(config, in_memory).await,
        Commands::Migrate => {
            let store = PgStore::connect(config.database_url()?, config.pool_size)?;
            store.run_migrations()?;
            info!("migrations applied");
            Ok(())
        }
    }
}

async fn serve(
    config: Config,
    in_memory: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let store: Arc<dyn CatalogStore> = if in_memory {
        warn!("using in-memory store, data is lost on shutdown");
        Arc::new(MemoryStore::new())
    } else {
        let store = PgStore::connect(config.database_url()?, config.pool_size)?;
        store.run_migrations()?;
        Arc::new(store)
    };

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!("Foodcart API listening on {}", listener.local_addr()?);

    axum::serve(listener, app(AppState::new(store, config))).await?;

    Ok(())
}
